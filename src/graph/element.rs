//! 属性目标
//!
//! 属性可以挂在图本身、某个顶点或某条边上

use crate::graph::edge::Edge;
use crate::graph::vertex::VertexId;
use std::fmt;

/// 属性操作的目标元素
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    /// 图本身
    Graph,
    /// 顶点
    Vertex(VertexId),
    /// 边
    Edge(Edge),
}

impl From<VertexId> for Element {
    fn from(v: VertexId) -> Self {
        Element::Vertex(v)
    }
}

impl From<u32> for Element {
    fn from(v: u32) -> Self {
        Element::Vertex(VertexId::new(v))
    }
}

impl From<Edge> for Element {
    fn from(e: Edge) -> Self {
        Element::Edge(e)
    }
}

impl From<(VertexId, VertexId)> for Element {
    fn from(pair: (VertexId, VertexId)) -> Self {
        Element::Edge(pair.into())
    }
}

impl From<(u32, u32)> for Element {
    fn from(pair: (u32, u32)) -> Self {
        Element::Edge(pair.into())
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Graph => write!(f, "graph"),
            Element::Vertex(v) => write!(f, "vertex {}", v),
            Element::Edge(e) => write!(f, "{}", e),
        }
    }
}
