//! 顶点标识
//!
//! 顶点为稠密编号 `0..n`，与底层 petgraph 图的节点下标一致

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 顶点 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VertexId(pub u32);

impl VertexId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// 作为 usize 下标
    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// 转换为底层图的节点下标
    pub fn node(&self) -> NodeIndex<u32> {
        NodeIndex::new(self.index())
    }
}

impl From<u32> for VertexId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NodeIndex<u32>> for VertexId {
    fn from(n: NodeIndex<u32>) -> Self {
        Self(n.index() as u32)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_id_node_roundtrip() {
        let v = VertexId::new(7);
        assert_eq!(v.node().index(), 7);
        assert_eq!(VertexId::from(v.node()), v);
        assert_eq!(v.to_string(), "7");
    }
}
