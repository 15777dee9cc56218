//! 边权重视图与最短路径
//!
//! 权重取自每条边上 `weight_field` 指定的属性，缺失时使用图的默认权重

use super::edge::Edge;
use super::graph::Graph;
use super::vertex::VertexId;
use crate::error::{Error, Result};
use petgraph::algo::{astar, dijkstra};
use petgraph::visit::EdgeRef;
use petgraph::EdgeType;
use std::collections::HashMap;
use tracing::warn;

/// 只读的边权重矩阵视图
///
/// 对任意顶点对都有定义：不存在的边或没有权重属性的边取默认权重。
#[derive(Debug, Clone, Copy)]
pub struct MetaWeights<'a, Ty: EdgeType> {
    graph: &'a Graph<Ty>,
}

impl<'a, Ty: EdgeType> MetaWeights<'a, Ty> {
    pub(crate) fn new(graph: &'a Graph<Ty>) -> Self {
        Self { graph }
    }

    /// 矩阵维度 (n, n)
    pub fn size(&self) -> (usize, usize) {
        let n = self.graph.vertex_count();
        (n, n)
    }

    /// 获取 `src -> dst` 的权重
    ///
    /// 属性值不是数值时记录警告并返回默认权重。
    pub fn get(&self, src: impl Into<VertexId>, dst: impl Into<VertexId>) -> f64 {
        let (src, dst) = (src.into(), dst.into());
        match self.try_get(src, dst) {
            Ok(w) => w,
            Err(e) => {
                warn!(src = src.as_u32(), dst = dst.as_u32(), error = %e, "权重不是数值，使用默认权重");
                self.graph.default_weight()
            }
        }
    }

    /// 获取 `src -> dst` 的权重，属性值不是数值时返回错误
    pub fn try_get(&self, src: impl Into<VertexId>, dst: impl Into<VertexId>) -> Result<f64> {
        let e = self.graph.canonical(Edge::new(src, dst));
        let value = self
            .graph
            .edge_props_map()
            .get(&e)
            .and_then(|p| p.get(self.graph.weight_field()));
        match value {
            None => Ok(self.graph.default_weight()),
            Some(v) => v.as_float().ok_or_else(|| {
                Error::InvalidWeight(format!(
                    "{} 的 :{} 为 {}（{}）",
                    e,
                    self.graph.weight_field(),
                    v,
                    v.type_name()
                ))
            }),
        }
    }

    /// 物化为稠密矩阵
    pub fn matrix(&self) -> Vec<Vec<f64>> {
        let n = self.graph.vertex_count() as u32;
        (0..n)
            .map(|s| (0..n).map(|d| self.get(s, d)).collect())
            .collect()
    }
}

impl<Ty: EdgeType> Graph<Ty> {
    /// 权重视图
    pub fn weights(&self) -> MetaWeights<'_, Ty> {
        MetaWeights::new(self)
    }

    /// 已存在的边的权重，边不存在时返回 None
    pub fn edge_weight(&self, src: impl Into<VertexId>, dst: impl Into<VertexId>) -> Option<f64> {
        let (src, dst) = (src.into(), dst.into());
        if !self.has_edge(src, dst) {
            return None;
        }
        Some(self.weights().get(src, dst))
    }

    /// 单源最短路径距离（Dijkstra，要求权重非负）
    ///
    /// 结果只包含可达顶点；源顶点不存在时为空。
    pub fn dijkstra_shortest_paths(&self, source: impl Into<VertexId>) -> HashMap<VertexId, f64> {
        let source = source.into();
        if !self.has_vertex(source) {
            return HashMap::new();
        }
        let w = self.weights();
        dijkstra(self.graph(), source.node(), None, |e| {
            w.get(VertexId::from(e.source()), VertexId::from(e.target()))
        })
        .into_iter()
        .map(|(n, d)| (VertexId::from(n), d))
        .collect()
    }

    /// 两点间最短路径（A*，零启发），返回 (总权重, 顶点序列)
    pub fn shortest_path(
        &self,
        src: impl Into<VertexId>,
        dst: impl Into<VertexId>,
    ) -> Option<(f64, Vec<VertexId>)> {
        let (src, dst) = (src.into(), dst.into());
        if !self.has_vertex(src) || !self.has_vertex(dst) {
            return None;
        }
        let w = self.weights();
        let goal = dst.node();
        astar(
            self.graph(),
            src.node(),
            |n| n == goal,
            |e| w.get(VertexId::from(e.source()), VertexId::from(e.target())),
            |_| 0.0,
        )
        .map(|(cost, path)| (cost, path.into_iter().map(VertexId::from).collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{MetaDiGraph, MetaGraph};

    fn v(i: u32) -> VertexId {
        VertexId::new(i)
    }

    fn path_graph() -> MetaGraph {
        let mut g = MetaGraph::with_vertices(5).with_default_weight(3.0);
        for i in 0..4u32 {
            g.add_edge(i, i + 1);
        }
        g
    }

    #[test]
    fn test_default_weights() {
        let g = path_graph();
        let w = g.weights();
        assert_eq!(w.size(), (5, 5));
        assert_eq!(w.get(0, 1), 3.0);
        // 不存在的边同样返回默认权重
        assert_eq!(w.get(0, 4), 3.0);
        assert_eq!(g.edge_weight(0, 4), None);
    }

    #[test]
    fn test_weight_field_lookup() {
        let mut g = path_graph();
        g.set_prop((1, 2), "weight", 0.2).unwrap();
        g.set_prop((2, 3), "cost", 7).unwrap();

        assert_eq!(g.weights().get(2, 1), 0.2);
        assert_eq!(g.weights().get(2, 3), 3.0);

        g.set_weight_field("cost");
        assert_eq!(g.weight_field(), "cost");
        assert_eq!(g.weights().get(3, 2), 7.0);
        assert_eq!(g.weights().get(1, 2), 3.0);
    }

    #[test]
    fn test_non_numeric_weight() {
        let mut g = path_graph();
        g.set_prop((0, 1), "weight", "heavy").unwrap();
        assert!(matches!(g.weights().try_get(0, 1), Err(Error::InvalidWeight(_))));
        assert_eq!(g.weights().get(0, 1), 3.0);
    }

    #[test]
    fn test_directed_weights() {
        let mut g = MetaDiGraph::with_vertices(2);
        g.add_edge(0u32, 1u32);
        g.set_prop((0, 1), "weight", 5.0).unwrap();
        assert_eq!(g.weights().get(0, 1), 5.0);
        assert_eq!(g.weights().get(1, 0), 1.0);
    }

    #[test]
    fn test_weight_matrix() {
        let mut g = MetaGraph::with_vertices(2);
        g.add_edge(0u32, 1u32);
        g.set_prop((0, 1), "weight", 2).unwrap();
        assert_eq!(g.weights().matrix(), vec![vec![1.0, 2.0], vec![2.0, 1.0]]);
    }

    #[test]
    fn test_dijkstra() {
        let mut g = path_graph();
        g.add_edge(0u32, 4u32);
        g.set_prop((0, 4), "weight", 20.0).unwrap();

        let dist = g.dijkstra_shortest_paths(0);
        assert_eq!(dist[&v(0)], 0.0);
        assert_eq!(dist[&v(2)], 6.0);
        assert_eq!(dist[&v(4)], 12.0);

        g.set_default_weight(1.0);
        assert_eq!(g.default_weight(), 1.0);
        assert_eq!(g.dijkstra_shortest_paths(0)[&v(4)], 4.0);
        assert!(g.dijkstra_shortest_paths(42).is_empty());
    }

    #[test]
    fn test_shortest_path() {
        let mut g = path_graph();
        g.add_edge(1u32, 3u32);
        g.set_prop((1, 3), "weight", 1.0).unwrap();

        let (cost, path) = g.shortest_path(0, 4).unwrap();
        assert_eq!(cost, 7.0);
        assert_eq!(path, vec![v(0), v(1), v(3), v(4)]);

        let mut d = MetaDiGraph::with_vertices(2);
        d.add_edge(1u32, 0u32);
        assert!(d.shortest_path(0, 1).is_none());
    }
}
