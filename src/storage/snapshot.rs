//! 图快照
//!
//! 元数据图的可序列化表示，二进制与 JSON 格式共用

use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, VertexId};
use crate::types::{Properties, PropertyValue};
use petgraph::EdgeType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tracing::info;

/// 边记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub src: u32,
    pub dst: u32,
    #[serde(default)]
    pub props: Properties,
}

/// 顶点记录（仅保存有属性的顶点）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexRecord {
    pub id: u32,
    pub props: Properties,
}

/// 图快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub directed: bool,
    pub vertex_count: u32,
    pub weight_field: String,
    pub default_weight: f64,
    pub indexing_props: Vec<String>,
    pub graph_props: Properties,
    pub vertices: Vec<VertexRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl GraphSnapshot {
    /// 从图生成快照
    pub fn from_graph<Ty: EdgeType>(g: &Graph<Ty>) -> Self {
        let mut vertices: Vec<VertexRecord> = g
            .vertex_props_map()
            .iter()
            .map(|(v, p)| VertexRecord {
                id: v.as_u32(),
                props: p.clone(),
            })
            .collect();
        vertices.sort_by_key(|r| r.id);

        let eprops = g.edge_props_map();
        let edges = g
            .edges()
            .map(|e| EdgeRecord {
                src: e.src.as_u32(),
                dst: e.dst.as_u32(),
                props: eprops.get(&e).cloned().unwrap_or_default(),
            })
            .collect();

        Self {
            directed: g.is_directed(),
            vertex_count: g.vertex_count() as u32,
            weight_field: g.weight_field().to_string(),
            default_weight: g.default_weight(),
            indexing_props: g.indexing_props().iter().cloned().collect(),
            graph_props: g.graph_props_map().clone(),
            vertices,
            edges,
        }
    }

    /// 由快照重建图，索引从顶点属性重新构建
    pub fn into_graph<Ty: EdgeType>(self) -> Result<Graph<Ty>> {
        if self.directed != Ty::is_directed() {
            return Err(Error::StorageError(format!(
                "快照方向性不匹配: 快照为{}图",
                if self.directed { "有向" } else { "无向" }
            )));
        }

        let mut g = Graph::<Ty>::with_vertices(self.vertex_count as usize)
            .with_weight_field(self.weight_field)
            .with_default_weight(self.default_weight);

        let mut vprops = HashMap::with_capacity(self.vertices.len());
        for record in self.vertices {
            let v = VertexId::new(record.id);
            if !g.has_vertex(v) {
                return Err(Error::StorageError(format!("快照引用了不存在的顶点 {}", v)));
            }
            vprops.insert(v, record.props);
        }

        let mut eprops = HashMap::new();
        for record in self.edges {
            let e = g.canonical(Edge::new(record.src, record.dst));
            if !g.add_edge(e.src, e.dst) {
                return Err(Error::StorageError(format!("快照中的边无效或重复: {}", e)));
            }
            if !record.props.is_empty() {
                eprops.insert(e, record.props);
            }
        }

        g.load_raw_props(self.graph_props, vprops, eprops);
        g.rebuild_index(&self.indexing_props)?;
        Ok(g)
    }
}

impl GraphSnapshot {
    /// 找出第一个 JSON 无法表示的非有限浮点数，返回其位置描述
    fn non_finite_float(&self) -> Option<String> {
        if !self.default_weight.is_finite() {
            return Some(format!("默认权重 {}", self.default_weight));
        }
        let find = |props: &Properties| {
            props
                .iter()
                .find(|(_, v)| has_non_finite(v))
                .map(|(k, _)| k.clone())
        };
        if let Some(k) = find(&self.graph_props) {
            return Some(format!("图属性 :{}", k));
        }
        for record in &self.vertices {
            if let Some(k) = find(&record.props) {
                return Some(format!("顶点 {} 的 :{}", record.id, k));
            }
        }
        for record in &self.edges {
            if let Some(k) = find(&record.props) {
                return Some(format!("边 {} => {} 的 :{}", record.src, record.dst, k));
            }
        }
        None
    }
}

fn has_non_finite(value: &PropertyValue) -> bool {
    match value {
        PropertyValue::Float(f) => !f.is_finite(),
        PropertyValue::List(items) => items.iter().any(has_non_finite),
        PropertyValue::Map(map) => map.values().any(has_non_finite),
        _ => false,
    }
}

/// 保存为 JSON 快照
///
/// JSON 不能表示 NaN 与无穷大，图中含有此类浮点数时返回错误且不创建文件。
pub fn save_json<Ty: EdgeType>(path: impl AsRef<Path>, g: &Graph<Ty>) -> Result<()> {
    let path = path.as_ref();
    let snapshot = GraphSnapshot::from_graph(g);
    if let Some(location) = snapshot.non_finite_float() {
        return Err(Error::SerializationError(format!(
            "JSON 无法表示非有限浮点数: {}",
            location
        )));
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &snapshot)?;
    info!(path = %path.display(), vertices = g.vertex_count(), edges = g.edge_count(), "已保存 JSON 快照");
    Ok(())
}

/// 加载 JSON 快照
pub fn load_json<Ty: EdgeType>(path: impl AsRef<Path>) -> Result<Graph<Ty>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let snapshot: GraphSnapshot = serde_json::from_reader(reader)?;
    let g = snapshot.into_graph()?;
    info!(path = %path.display(), vertices = g.vertex_count(), edges = g.edge_count(), "已加载 JSON 快照");
    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Element, MetaDiGraph, MetaGraph};
    use crate::types::PropertyValue;
    use tempfile::TempDir;

    fn sample_graph() -> MetaGraph {
        let mut g = MetaGraph::with_vertices(3).with_default_weight(2.5);
        g.add_edge(0u32, 1u32);
        g.add_edge(2u32, 1u32);
        g.set_prop(Element::Graph, "title", "sample").unwrap();
        g.set_prop((1, 0), "weight", 0.5).unwrap();
        g.set_prop(VertexId::new(2), "color", "blue").unwrap();
        g.set_indexing_prop("name").unwrap();
        g
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let g = sample_graph();
        let snapshot = GraphSnapshot::from_graph(&g);
        assert_eq!(snapshot.edges.len(), 2);
        assert_eq!(snapshot.indexing_props, vec!["name".to_string()]);

        let restored: MetaGraph = snapshot.into_graph().unwrap();
        assert_eq!(restored.vertex_count(), 3);
        assert_eq!(restored.default_weight(), 2.5);
        assert_eq!(restored.get_prop((0, 1), "weight").unwrap(), &PropertyValue::Float(0.5));
        assert_eq!(
            restored.vertex_by_index("name", &"name1".into()).unwrap(),
            VertexId::new(1)
        );
    }

    #[test]
    fn test_snapshot_direction_mismatch() {
        let snapshot = GraphSnapshot::from_graph(&sample_graph());
        let result: Result<MetaDiGraph> = snapshot.into_graph();
        assert!(matches!(result, Err(Error::StorageError(_))));
    }

    #[test]
    fn test_json_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("g.json");
        let g = sample_graph();

        save_json(&path, &g).unwrap();
        let restored: MetaGraph = load_json(&path).unwrap();
        assert_eq!(GraphSnapshot::from_graph(&restored), GraphSnapshot::from_graph(&g));
        assert_eq!(
            restored.get_prop(VertexId::new(2), "color").unwrap().as_str(),
            Some("blue")
        );
    }

    #[test]
    fn test_json_rejects_non_finite_floats() {
        let dir = TempDir::new().unwrap();

        let path = dir.path().join("inf.json");
        let g = MetaGraph::with_vertices(1).with_default_weight(f64::INFINITY);
        assert!(matches!(save_json(&path, &g), Err(Error::SerializationError(_))));
        assert!(!path.exists());

        let path = dir.path().join("nan.json");
        let mut g = MetaGraph::with_vertices(1);
        g.set_prop(VertexId::new(0), "scores", vec![PropertyValue::Float(f64::NAN)])
            .unwrap();
        assert!(matches!(save_json(&path, &g), Err(Error::SerializationError(_))));
        assert!(!path.exists());

        // 二进制快照保留非有限浮点数
        let path = dir.path().join("inf.mg");
        let g = MetaGraph::with_vertices(1).with_default_weight(f64::INFINITY);
        crate::storage::save_binary(&path, &g, false).unwrap();
        let restored: MetaGraph = crate::storage::load_binary(&path).unwrap();
        assert_eq!(restored.default_weight(), f64::INFINITY);
    }
}
