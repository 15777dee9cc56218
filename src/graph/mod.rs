//! 图核心模块
//!
//! 定义顶点、边、属性目标和元数据图

mod edge;
mod element;
mod graph;
mod index;
mod vertex;
mod weights;

pub use edge::Edge;
pub use element::Element;
pub use graph::{Graph, MetaDiGraph, MetaGraph};
pub use index::{IndexKey, PropertyIndex};
pub use vertex::VertexId;
pub use weights::MetaWeights;
