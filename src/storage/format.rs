//! 二进制快照文件
//!
//! 文件布局：
//! ```text
//! +--------+---------+-------+-------------+-------+----------+
//! | magic  | version | flags | payload_len | crc32 | reserved |
//! | 8B     | 4B      | 4B    | 8B          | 4B    | 4B       |
//! +--------+---------+-------+-------------+-------+----------+
//! | payload: bincode(GraphSnapshot)，可选 lz4 压缩             |
//! +-----------------------------------------------------------+
//! ```
//! 所有整数均为小端序，CRC32 覆盖磁盘上的 payload 字节。

use super::snapshot::GraphSnapshot;
use crate::error::{Error, Result};
use crate::graph::Graph;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use lz4_flex::{compress_prepend_size, decompress_size_prepended};
use petgraph::EdgeType;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::info;

/// 文件魔数
pub const MAGIC: &[u8; 8] = b"METAGRPH";
/// 文件版本
pub const FILE_VERSION: u32 = 1;
/// 文件头大小
pub const HEADER_SIZE: usize = 32;

const FLAG_DIRECTED: u32 = 1 << 0;
const FLAG_LZ4: u32 = 1 << 1;

/// 文件头部
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub version: u32,
    pub flags: u32,
    pub payload_len: u64,
    pub checksum: u32,
}

impl FileHeader {
    pub fn is_directed(&self) -> bool {
        self.flags & FLAG_DIRECTED != 0
    }

    pub fn is_compressed(&self) -> bool {
        self.flags & FLAG_LZ4 != 0
    }

    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(HEADER_SIZE);
        buf.extend_from_slice(MAGIC);
        buf.write_u32::<LittleEndian>(self.version)?;
        buf.write_u32::<LittleEndian>(self.flags)?;
        buf.write_u64::<LittleEndian>(self.payload_len)?;
        buf.write_u32::<LittleEndian>(self.checksum)?;
        buf.write_u32::<LittleEndian>(0)?;
        Ok(buf)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE {
            return Err(Error::StorageError("文件头部数据不足".to_string()));
        }
        if &bytes[0..8] != MAGIC {
            return Err(Error::StorageError("无效的快照文件格式".to_string()));
        }
        let mut cursor = Cursor::new(&bytes[8..HEADER_SIZE]);
        let version = cursor.read_u32::<LittleEndian>()?;
        if version != FILE_VERSION {
            return Err(Error::StorageError(format!(
                "不支持的文件版本: {}（当前 {}）",
                version, FILE_VERSION
            )));
        }
        Ok(Self {
            version,
            flags: cursor.read_u32::<LittleEndian>()?,
            payload_len: cursor.read_u64::<LittleEndian>()?,
            checksum: cursor.read_u32::<LittleEndian>()?,
        })
    }
}

/// 编码为完整的文件字节
pub fn encode<Ty: EdgeType>(g: &Graph<Ty>, compress: bool) -> Result<Vec<u8>> {
    let raw = bincode::serialize(&GraphSnapshot::from_graph(g))?;
    let payload = if compress {
        compress_prepend_size(&raw)
    } else {
        raw
    };

    let mut flags = 0;
    if g.is_directed() {
        flags |= FLAG_DIRECTED;
    }
    if compress {
        flags |= FLAG_LZ4;
    }

    let header = FileHeader {
        version: FILE_VERSION,
        flags,
        payload_len: payload.len() as u64,
        checksum: crc32fast::hash(&payload),
    };

    let mut bytes = header.to_bytes()?;
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// 从文件字节解码
pub fn decode<Ty: EdgeType>(bytes: &[u8]) -> Result<Graph<Ty>> {
    let header = FileHeader::from_bytes(bytes)?;
    let payload = &bytes[HEADER_SIZE..];
    if payload.len() as u64 != header.payload_len {
        return Err(Error::StorageError(format!(
            "数据长度错误: 期望 {}, 实际 {}",
            header.payload_len,
            payload.len()
        )));
    }

    let actual = crc32fast::hash(payload);
    if actual != header.checksum {
        return Err(Error::ChecksumMismatch {
            expected: header.checksum,
            actual,
        });
    }

    if header.is_directed() != Ty::is_directed() {
        return Err(Error::StorageError(format!(
            "文件中为{}图",
            if header.is_directed() { "有向" } else { "无向" }
        )));
    }

    let snapshot: GraphSnapshot = if header.is_compressed() {
        let raw = decompress_size_prepended(payload)
            .map_err(|e| Error::StorageError(format!("解压失败: {}", e)))?;
        bincode::deserialize(&raw)?
    } else {
        bincode::deserialize(payload)?
    };
    snapshot.into_graph()
}

/// 保存二进制快照
pub fn save_binary<Ty: EdgeType>(path: impl AsRef<Path>, g: &Graph<Ty>, compress: bool) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode(g, compress)?;
    fs::write(path, &bytes)?;
    info!(
        path = %path.display(),
        bytes = bytes.len(),
        compress,
        "已保存二进制快照"
    );
    Ok(())
}

/// 加载二进制快照
pub fn load_binary<Ty: EdgeType>(path: impl AsRef<Path>) -> Result<Graph<Ty>> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    let g = decode(&bytes)?;
    info!(
        path = %path.display(),
        vertices = g.vertex_count(),
        edges = g.edge_count(),
        "已加载二进制快照"
    );
    Ok(g)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Element, MetaDiGraph, MetaGraph, VertexId};
    use crate::types::PropertyValue;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample_graph() -> MetaGraph {
        let mut g = MetaGraph::with_vertices(4);
        g.add_edge(0u32, 1u32);
        g.add_edge(1u32, 2u32);
        g.add_edge(3u32, 3u32);
        g.set_prop(Element::Graph, "description", "round trip").unwrap();
        g.set_prop((2, 1), "since", NaiveDate::from_ymd_opt(2017, 5, 1).unwrap())
            .unwrap();
        g.set_prop((0, 1), "weight", 4).unwrap();
        g.set_weight_field("weight");
        g.set_indexing_prop_value(3u32, "name", "dora").unwrap();
        g
    }

    #[test]
    fn test_header_layout() {
        let bytes = encode(&MetaDiGraph::new(), false).unwrap();
        assert_eq!(&bytes[0..8], MAGIC);
        let header = FileHeader::from_bytes(&bytes).unwrap();
        assert!(header.is_directed());
        assert!(!header.is_compressed());
        assert_eq!(header.payload_len as usize, bytes.len() - HEADER_SIZE);
    }

    #[test]
    fn test_binary_roundtrip() {
        let dir = TempDir::new().unwrap();
        for compress in [false, true] {
            let path = dir.path().join(format!("g-{}.mg", compress));
            let g = sample_graph();
            save_binary(&path, &g, compress).unwrap();

            let restored: MetaGraph = load_binary(&path).unwrap();
            assert_eq!(restored.vertex_count(), 4);
            assert_eq!(restored.edge_count(), 3);
            assert!(restored.has_edge(3u32, 3u32));
            assert_eq!(restored.weights().get(1u32, 0u32), 4.0);
            assert_eq!(
                restored.vertex_by_index("name", &"dora".into()).unwrap(),
                VertexId::new(3)
            );
            assert!(matches!(
                restored.get_prop((1, 2), "since").unwrap(),
                PropertyValue::Date(_)
            ));
        }
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut bytes = encode(&sample_graph(), false).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xff;
        assert!(matches!(
            decode::<petgraph::Undirected>(&bytes),
            Err(Error::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_bad_magic_and_direction() {
        let bytes = encode(&sample_graph(), true).unwrap();

        let mut bad = bytes.clone();
        bad[0] = b'X';
        assert!(matches!(
            decode::<petgraph::Undirected>(&bad),
            Err(Error::StorageError(_))
        ));

        assert!(matches!(
            decode::<petgraph::Directed>(&bytes),
            Err(Error::StorageError(_))
        ));
        assert!(decode::<petgraph::Undirected>(&bytes[..10]).is_err());
    }
}
