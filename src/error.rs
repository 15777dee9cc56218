//! 错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("属性未定义: {0}")]
    PropertyNotFound(String),

    #[error("顶点不存在: {0}")]
    VertexNotFound(String),

    #[error("边不存在: {0}")]
    EdgeNotFound(String),

    #[error("':{0}' is an indexing property, use `set_indexing_prop()` instead")]
    IndexingProperty(String),

    #[error("索引 ':{prop}' 已包含值 {value}")]
    DuplicateIndexValue { prop: String, value: String },

    #[error("不是索引属性: {0}")]
    NotIndexingProperty(String),

    #[error("索引 ':{prop}' 中不存在值 {value}")]
    IndexValueNotFound { prop: String, value: String },

    #[error("无效的权重: {0}")]
    InvalidWeight(String),

    #[error("无效的子图: {0}")]
    InvalidSubgraph(String),

    #[error("存储错误: {0}")]
    StorageError(String),

    #[error("数据校验失败: 期望 CRC {expected}, 实际 {actual}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("解析错误: {0}")]
    ParseError(String),

    #[error("导入错误: {0}")]
    ImportError(String),

    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV 错误: {0}")]
    CsvError(#[from] csv::Error),

    #[error("序列化错误: {0}")]
    SerializationError(String),
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::SerializationError(e.to_string())
    }
}
