//! 边定义
//!
//! 简单图中一条边由 (src, dst) 唯一确定；无向图的边按 `src <= dst` 规范化存储

use crate::graph::vertex::VertexId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 边
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// 源顶点
    pub src: VertexId,
    /// 目标顶点
    pub dst: VertexId,
}

impl Edge {
    /// 创建新边
    pub fn new(src: impl Into<VertexId>, dst: impl Into<VertexId>) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
        }
    }

    /// 反向边
    pub fn reverse(&self) -> Self {
        Self {
            src: self.dst,
            dst: self.src,
        }
    }

    /// 规范化：无向图中较小的端点在前
    pub fn canonical(&self, directed: bool) -> Self {
        if directed || self.src <= self.dst {
            *self
        } else {
            self.reverse()
        }
    }

    /// 是否为自环
    pub fn is_self_loop(&self) -> bool {
        self.src == self.dst
    }

    /// 是否与顶点关联
    pub fn touches(&self, v: VertexId) -> bool {
        self.src == v || self.dst == v
    }
}

impl From<(VertexId, VertexId)> for Edge {
    fn from((src, dst): (VertexId, VertexId)) -> Self {
        Self { src, dst }
    }
}

impl From<(u32, u32)> for Edge {
    fn from((src, dst): (u32, u32)) -> Self {
        Self::new(src, dst)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge {} => {}", self.src, self.dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_canonical() {
        let e = Edge::new(3, 1);
        assert_eq!(e.canonical(false), Edge::new(1, 3));
        assert_eq!(e.canonical(true), e);
        assert_eq!(e.reverse(), Edge::new(1, 3));
    }

    #[test]
    fn test_edge_touches() {
        let e = Edge::new(2, 2);
        assert!(e.is_self_loop());
        assert!(e.touches(VertexId::new(2)));
        assert!(!e.touches(VertexId::new(0)));
        assert_eq!(Edge::new(0, 1).to_string(), "Edge 0 => 1");
    }
}
