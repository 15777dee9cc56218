//! 持久化模块
//!
//! 将元数据图保存为：
//! - 带校验和、可选 lz4 压缩的二进制快照 (`.mg`)
//! - JSON 快照 (`.json`)
//! - Graphviz DOT (`.dot` / `.gv`，仅导出)

mod dot;
mod format;
mod snapshot;

pub use dot::write_dot;
pub use format::{decode, encode, load_binary, save_binary, FileHeader, FILE_VERSION, HEADER_SIZE, MAGIC};
pub use snapshot::{load_json, save_json, EdgeRecord, GraphSnapshot, VertexRecord};

use crate::error::{Error, Result};
use crate::graph::Graph;
use petgraph::EdgeType;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// 文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Binary,
    Json,
    Dot,
}

impl Format {
    /// 根据扩展名推断格式
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "mg" => Some(Format::Binary),
            "json" => Some(Format::Json),
            "dot" | "gv" => Some(Format::Dot),
            _ => None,
        }
    }
}

/// 按格式保存，二进制格式启用压缩
pub fn save<Ty: EdgeType>(path: impl AsRef<Path>, g: &Graph<Ty>, format: Format) -> Result<()> {
    let path = path.as_ref();
    match format {
        Format::Binary => save_binary(path, g, true),
        Format::Json => save_json(path, g),
        Format::Dot => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_dot(&mut writer, g)?;
            writer.flush()?;
            info!(path = %path.display(), "已导出 DOT");
            Ok(())
        }
    }
}

/// 按扩展名加载（DOT 不支持加载）
pub fn load<Ty: EdgeType>(path: impl AsRef<Path>) -> Result<Graph<Ty>> {
    let path = path.as_ref();
    match Format::from_path(path) {
        Some(Format::Binary) => load_binary(path),
        Some(Format::Json) => load_json(path),
        Some(Format::Dot) => Err(Error::StorageError("DOT 格式仅支持导出".to_string())),
        None => Err(Error::StorageError(format!(
            "无法识别的文件格式: {}",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MetaDiGraph;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path("a/b.mg"), Some(Format::Binary));
        assert_eq!(Format::from_path("b.JSON"), Some(Format::Json));
        assert_eq!(Format::from_path("c.gv"), Some(Format::Dot));
        assert_eq!(Format::from_path("d.txt"), None);
        assert_eq!(Format::from_path("noext"), None);
    }

    #[test]
    fn test_save_and_load_dispatch() {
        let dir = TempDir::new().unwrap();
        let mut g = MetaDiGraph::with_vertices(2);
        g.add_edge(0u32, 1u32);

        for name in ["g.mg", "g.json"] {
            let path = dir.path().join(name);
            save(&path, &g, Format::from_path(&path).unwrap()).unwrap();
            let restored: MetaDiGraph = load(&path).unwrap();
            assert!(restored.has_edge(0u32, 1u32));
            assert!(!restored.has_edge(1u32, 0u32));
        }

        let dot = dir.path().join("g.dot");
        save(&dot, &g, Format::Dot).unwrap();
        assert!(std::fs::read_to_string(&dot).unwrap().contains("0 -> 1;"));
        assert!(load::<petgraph::Directed>(&dot).is_err());
        assert!(load::<petgraph::Undirected>(dir.path().join("g.mg")).is_err());
    }
}
