//! 数据导入模块
//!
//! 从 CSV 和 JSON Lines 批量导入顶点与边。顶点通过键属性标识，
//! 键属性在导入开始时被设为索引属性。

use crate::error::{Error, Result};
use crate::graph::{Edge, Graph, VertexId};
use crate::types::{Properties, PropertyValue};
use petgraph::EdgeType;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// 默认键属性
pub const DEFAULT_KEY_PROPERTY: &str = "name";

/// 导入统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportStats {
    pub vertices_imported: usize,
    pub edges_imported: usize,
    pub errors: usize,
    pub duration_ms: u64,
}

impl ImportStats {
    fn merge(&mut self, other: &ImportStats) {
        self.vertices_imported += other.vertices_imported;
        self.edges_imported += other.edges_imported;
        self.errors += other.errors;
        self.duration_ms += other.duration_ms;
    }
}

/// JSON Lines 记录
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum Record {
    Vertex {
        key: serde_json::Value,
        #[serde(default)]
        props: serde_json::Map<String, serde_json::Value>,
    },
    Edge {
        src: serde_json::Value,
        dst: serde_json::Value,
        #[serde(default)]
        props: serde_json::Map<String, serde_json::Value>,
    },
}

/// 单行导入结果：(新增/更新的顶点数, 新增/更新的边数)
type RowOutcome = (usize, usize);

/// 批量导入器
pub struct BatchImporter<'a, Ty: EdgeType> {
    graph: &'a mut Graph<Ty>,
    key_prop: String,
    batch_size: usize,
}

impl<'a, Ty: EdgeType> BatchImporter<'a, Ty> {
    /// 创建导入器，使用默认键属性
    pub fn new(graph: &'a mut Graph<Ty>) -> Result<Self> {
        Self::with_key_property(graph, DEFAULT_KEY_PROPERTY)
    }

    /// 创建导入器并将 `key_prop` 设为索引属性
    pub fn with_key_property(graph: &'a mut Graph<Ty>, key_prop: impl Into<String>) -> Result<Self> {
        let key_prop = key_prop.into();
        graph.set_indexing_prop(&key_prop)?;
        Ok(Self {
            graph,
            key_prop,
            batch_size: 10000,
        })
    }

    /// 设置批次大小（每批输出一次进度日志）
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// 键属性
    pub fn key_property(&self) -> &str {
        &self.key_prop
    }

    /// 按键查找顶点，不存在时创建。返回 (顶点, 是否新建)
    fn resolve(&mut self, key: PropertyValue) -> Result<(VertexId, bool)> {
        if let Ok(v) = self.graph.vertex_by_index(&self.key_prop, &key) {
            return Ok((v, false));
        }
        let v = self.graph.add_vertex();
        self.graph.set_indexing_prop_value(v, &self.key_prop, key)?;
        Ok((v, true))
    }

    fn import_vertex(&mut self, key: PropertyValue, props: Properties) -> Result<RowOutcome> {
        if key.is_null() {
            return Err(Error::ImportError("键为空".to_string()));
        }
        let (v, created) = self.resolve(key)?;
        if let Err(e) = self.graph.set_props(v, props) {
            if created {
                self.graph.rem_vertex(v);
            }
            return Err(e);
        }
        Ok((1, 0))
    }

    fn import_edge(
        &mut self,
        src: PropertyValue,
        dst: PropertyValue,
        props: Properties,
    ) -> Result<RowOutcome> {
        if src.is_null() || dst.is_null() {
            return Err(Error::ImportError("边端点为空".to_string()));
        }
        let (s, s_new) = self.resolve(src)?;
        let (d, d_new) = self.resolve(dst)?;
        self.graph.add_edge(s, d);
        self.graph.set_props(Edge::new(s, d), props)?;
        Ok((s_new as usize + d_new as usize, 1))
    }

    fn record_row(&self, stats: &mut ImportStats, row: usize, outcome: Result<RowOutcome>) {
        match outcome {
            Ok((v, e)) => {
                stats.vertices_imported += v;
                stats.edges_imported += e;
            }
            Err(e) => {
                warn!(row, error = %e, "跳过无效记录");
                stats.errors += 1;
            }
        }
        if row % self.batch_size == 0 {
            debug!(row, "导入进度");
        }
    }

    /// 从 CSV 导入顶点
    ///
    /// 表头必须包含键列，其余非空单元格按字面量解析为顶点属性。
    /// 已存在的键会更新对应顶点。
    pub fn import_vertices_csv<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportStats> {
        let start = Instant::now();
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path.as_ref())?;
        let headers = reader.headers()?.clone();
        let key_col = headers
            .iter()
            .position(|h| h == self.key_prop)
            .ok_or_else(|| Error::ImportError(format!("缺少键列 '{}'", self.key_prop)))?;

        let mut stats = ImportStats::default();
        for (i, record) in reader.records().enumerate() {
            let row = i + 1;
            let outcome = record.map_err(Error::from).and_then(|record| {
                let key = record
                    .get(key_col)
                    .filter(|s| !s.is_empty())
                    .map(PropertyValue::parse_literal)
                    .ok_or_else(|| Error::ImportError("键为空".to_string()))?;
                let props = row_props(&headers, &record, &[key_col]);
                self.import_vertex(key, props)
            });
            self.record_row(&mut stats, row, outcome);
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            path = %path.as_ref().display(),
            vertices = stats.vertices_imported,
            errors = stats.errors,
            "顶点导入完成"
        );
        Ok(stats)
    }

    /// 从 CSV 导入边
    ///
    /// 表头必须包含 `src` 与 `dst` 列，端点按键值解析，未知键会新建顶点。
    pub fn import_edges_csv<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportStats> {
        let start = Instant::now();
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path.as_ref())?;
        let headers = reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| Error::ImportError(format!("缺少列 '{}'", name)))
        };
        let src_col = column("src")?;
        let dst_col = column("dst")?;

        let mut stats = ImportStats::default();
        for (i, record) in reader.records().enumerate() {
            let row = i + 1;
            let outcome = record.map_err(Error::from).and_then(|record| {
                let endpoint = |col: usize| {
                    record
                        .get(col)
                        .filter(|s| !s.is_empty())
                        .map(PropertyValue::parse_literal)
                        .ok_or_else(|| Error::ImportError("边端点为空".to_string()))
                };
                let src = endpoint(src_col)?;
                let dst = endpoint(dst_col)?;
                let props = row_props(&headers, &record, &[src_col, dst_col]);
                self.import_edge(src, dst, props)
            });
            self.record_row(&mut stats, row, outcome);
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            path = %path.as_ref().display(),
            vertices = stats.vertices_imported,
            edges = stats.edges_imported,
            errors = stats.errors,
            "边导入完成"
        );
        Ok(stats)
    }

    /// 从 JSON Lines 导入顶点和边
    pub fn import_jsonl<P: AsRef<Path>>(&mut self, path: P) -> Result<ImportStats> {
        let start = Instant::now();
        let reader = BufReader::new(File::open(path.as_ref())?);

        let mut stats = ImportStats::default();
        for (i, line) in reader.lines().enumerate() {
            let row = i + 1;
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let outcome = serde_json::from_str::<Record>(&line)
                .map_err(|e| Error::ImportError(format!("JSON 解析错误: {}", e)))
                .and_then(|record| match record {
                    Record::Vertex { key, props } => {
                        self.import_vertex(PropertyValue::from_json(&key), json_props(&props))
                    }
                    Record::Edge { src, dst, props } => self.import_edge(
                        PropertyValue::from_json(&src),
                        PropertyValue::from_json(&dst),
                        json_props(&props),
                    ),
                });
            self.record_row(&mut stats, row, outcome);
        }

        stats.duration_ms = start.elapsed().as_millis() as u64;
        info!(
            path = %path.as_ref().display(),
            vertices = stats.vertices_imported,
            edges = stats.edges_imported,
            errors = stats.errors,
            "JSONL 导入完成"
        );
        Ok(stats)
    }

    /// 依次导入顶点文件、边文件和 JSONL 文件，返回合计统计
    pub fn import_all(
        &mut self,
        vertices: Option<&Path>,
        edges: Option<&Path>,
        jsonl: Option<&Path>,
    ) -> Result<ImportStats> {
        let mut total = ImportStats::default();
        if let Some(path) = vertices {
            total.merge(&self.import_vertices_csv(path)?);
        }
        if let Some(path) = edges {
            total.merge(&self.import_edges_csv(path)?);
        }
        if let Some(path) = jsonl {
            total.merge(&self.import_jsonl(path)?);
        }
        Ok(total)
    }
}

/// 除 `skip` 列以外的非空单元格
fn row_props(headers: &csv::StringRecord, record: &csv::StringRecord, skip: &[usize]) -> Properties {
    headers
        .iter()
        .zip(record.iter())
        .enumerate()
        .filter(|(i, (_, cell))| !skip.contains(i) && !cell.is_empty())
        .map(|(_, (h, cell))| (h.to_string(), PropertyValue::parse_literal(cell)))
        .collect()
}

fn json_props(map: &serde_json::Map<String, serde_json::Value>) -> Properties {
    map.iter()
        .map(|(k, v)| (k.clone(), PropertyValue::from_json(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{MetaDiGraph, MetaGraph};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_file(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_import_vertices_csv() {
        let mut graph = MetaGraph::new();
        let file = write_file(&["name,age,city", "alice,30,Paris", "bob,,Rome", ",5,Oslo", "alice,31,"]);

        let mut importer = BatchImporter::new(&mut graph).unwrap();
        let stats = importer.import_vertices_csv(file.path()).unwrap();
        assert_eq!(stats.vertices_imported, 3);
        assert_eq!(stats.errors, 1);

        assert_eq!(graph.vertex_count(), 2);
        let alice = graph.vertex_by_index("name", &"alice".into()).unwrap();
        assert_eq!(graph.get_prop(alice, "age").unwrap(), &PropertyValue::Int(31));
        assert_eq!(graph.get_prop(alice, "city").unwrap().as_str(), Some("Paris"));
        let bob = graph.vertex_by_index("name", &"bob".into()).unwrap();
        assert!(!graph.has_prop(bob, "age"));
    }

    #[test]
    fn test_missing_key_column() {
        let mut graph = MetaGraph::new();
        let file = write_file(&["id,age", "1,2"]);
        let mut importer = BatchImporter::new(&mut graph).unwrap();
        assert!(matches!(
            importer.import_vertices_csv(file.path()),
            Err(Error::ImportError(_))
        ));
    }

    #[test]
    fn test_import_edges_csv() {
        let mut graph = MetaDiGraph::new();
        let vertices = write_file(&["name", "a", "b"]);
        let edges = write_file(&["src,dst,weight", "a,b,2.5", "b,c,1", "c,,4"]);

        let mut importer = BatchImporter::new(&mut graph).unwrap();
        importer.import_vertices_csv(vertices.path()).unwrap();
        let stats = importer.import_edges_csv(edges.path()).unwrap();
        assert_eq!(stats.edges_imported, 2);
        assert_eq!(stats.vertices_imported, 1);
        assert_eq!(stats.errors, 1);

        let a = graph.vertex_by_index("name", &"a".into()).unwrap();
        let b = graph.vertex_by_index("name", &"b".into()).unwrap();
        assert_eq!(graph.weights().get(a, b), 2.5);
        assert_eq!(graph.vertex_count(), 3);
    }

    #[test]
    fn test_import_jsonl() {
        let mut graph = MetaGraph::new();
        let file = write_file(&[
            r#"{"kind":"vertex","key":"alice","props":{"age":30}}"#,
            r#"{"kind":"edge","src":"alice","dst":"bob","props":{"since":"2017-05-01"}}"#,
            "",
            r#"{"kind":"mystery"}"#,
            "not json",
        ]);

        let mut importer = BatchImporter::with_key_property(&mut graph, "id").unwrap();
        assert_eq!(importer.key_property(), "id");
        let stats = importer.import_jsonl(file.path()).unwrap();
        assert_eq!(stats.vertices_imported, 2);
        assert_eq!(stats.edges_imported, 1);
        assert_eq!(stats.errors, 2);

        let alice = graph.vertex_by_index("id", &"alice".into()).unwrap();
        let bob = graph.vertex_by_index("id", &"bob".into()).unwrap();
        assert_eq!(graph.get_prop(alice, "age").unwrap(), &PropertyValue::Int(30));
        assert!(graph.has_prop((bob, alice), "since"));
    }

    #[test]
    fn test_indexing_column_is_rejected() {
        let mut graph = MetaGraph::with_vertices(1);
        graph.set_indexing_prop("code").unwrap();
        let file = write_file(&["name,code", "x,42"]);

        let mut importer = BatchImporter::new(&mut graph).unwrap();
        let stats = importer.import_vertices_csv(file.path()).unwrap();
        assert_eq!(stats.errors, 1);
        // 失败的新顶点会被回滚
        assert_eq!(graph.vertex_count(), 1);
    }

    #[test]
    fn test_import_all() {
        let mut graph = MetaGraph::new();
        let vertices = write_file(&["name", "a"]);
        let edges = write_file(&["src,dst", "a,b"]);

        let mut importer = BatchImporter::new(&mut graph).unwrap().with_batch_size(1);
        let stats = importer
            .import_all(Some(vertices.path()), Some(edges.path()), None)
            .unwrap();
        assert_eq!(stats.vertices_imported, 2);
        assert_eq!(stats.edges_imported, 1);
    }
}
