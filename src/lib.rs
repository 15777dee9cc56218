//! MetaGraph - 带元数据的图
//!
//! 在 petgraph 简单图之上提供：
//! - 图、顶点、边三级键值属性
//! - 可配置的边权重与最短路径
//! - 取值唯一、支持反向查找的索引属性
//! - 二进制 / JSON 快照、DOT 导出与批量导入

pub mod cli;
pub mod error;
pub mod graph;
pub mod import;
pub mod metrics;
pub mod storage;
pub mod types;

// 重导出常用类型
pub use error::{Error, Result};
pub use graph::{Edge, Element, Graph, MetaDiGraph, MetaGraph, MetaWeights, VertexId};
pub use import::{BatchImporter, ImportStats};
pub use storage::Format;
pub use types::{props, Properties, PropertyValue, DEFAULT_WEIGHT, DEFAULT_WEIGHT_FIELD};

/// 库版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
