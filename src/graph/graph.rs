//! 元数据图
//!
//! 在 petgraph 简单图之上叠加图、顶点、边三级键值属性，
//! 以及默认边权重和唯一值索引属性

use super::edge::Edge;
use super::element::Element;
use super::index::PropertyIndex;
use super::vertex::VertexId;
use crate::error::{Error, Result};
use crate::metrics::{global_metrics, Metrics};
use crate::types::{Properties, PropertyValue, DEFAULT_WEIGHT, DEFAULT_WEIGHT_FIELD};
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use petgraph::graph::{Graph as PetGraph, IndexType};
use petgraph::visit::EdgeRef;
use petgraph::{Directed, Direction, EdgeType, Undirected};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// 无属性元素共享的空属性表
static EMPTY_PROPS: Lazy<Properties> = Lazy::new(Properties::new);

/// 无向元数据图
pub type MetaGraph = Graph<Undirected>;

/// 有向元数据图
pub type MetaDiGraph = Graph<Directed>;

/// 元数据图
///
/// 顶点为稠密编号 `0..n`。删除顶点时底层图会把最后一个顶点移到被删除的位置，
/// 被移动顶点的属性、关联边属性和索引条目随之迁移。
#[derive(Debug, Clone)]
pub struct Graph<Ty: EdgeType> {
    /// 底层简单图
    graph: PetGraph<(), (), Ty, u32>,
    /// 图级属性
    gprops: Properties,
    /// 顶点属性
    vprops: HashMap<VertexId, Properties>,
    /// 边属性（键为规范化后的边）
    eprops: HashMap<Edge, Properties>,
    /// 权重字段名
    weight_field: String,
    /// 默认权重
    default_weight: f64,
    /// 索引属性
    index: PropertyIndex,
    /// 指标
    metrics: Arc<Metrics>,
}

impl<Ty: EdgeType> Graph<Ty> {
    /// 创建空图
    pub fn new() -> Self {
        Self {
            graph: PetGraph::default(),
            gprops: Properties::new(),
            vprops: HashMap::new(),
            eprops: HashMap::new(),
            weight_field: DEFAULT_WEIGHT_FIELD.to_string(),
            default_weight: DEFAULT_WEIGHT,
            index: PropertyIndex::new(),
            metrics: global_metrics(),
        }
    }

    /// 创建含 n 个孤立顶点的图
    pub fn with_vertices(n: usize) -> Self {
        let mut g = Self::new();
        g.add_vertices(n);
        g
    }

    /// 由现有 petgraph 图构造（仅复制结构，平行边会被合并）
    pub fn from_graph<N, E, Ix: IndexType>(source: &PetGraph<N, E, Ty, Ix>) -> Self {
        let mut g = Self::with_vertices(source.node_count());
        for e in source.edge_references() {
            g.add_edge(
                VertexId::new(e.source().index() as u32),
                VertexId::new(e.target().index() as u32),
            );
        }
        g
    }

    /// 设置默认权重（构造器风格）
    pub fn with_default_weight(mut self, weight: f64) -> Self {
        self.default_weight = weight;
        self
    }

    /// 设置权重字段（构造器风格）
    pub fn with_weight_field(mut self, field: impl Into<String>) -> Self {
        self.weight_field = field.into();
        self
    }

    /// 底层图的只读引用
    pub fn graph(&self) -> &PetGraph<(), (), Ty, u32> {
        &self.graph
    }

    /// 是否为有向图
    pub fn is_directed(&self) -> bool {
        Ty::is_directed()
    }

    // ==================== 顶点操作 ====================

    /// 添加顶点
    pub fn add_vertex(&mut self) -> VertexId {
        let v = VertexId::from(self.graph.add_node(()));
        self.metrics.record_vertex_insert();
        v
    }

    /// 批量添加顶点，返回添加的数量
    pub fn add_vertices(&mut self, n: usize) -> usize {
        for _ in 0..n {
            self.add_vertex();
        }
        n
    }

    /// 添加带属性的顶点
    ///
    /// 属性中不能包含索引属性。
    pub fn add_vertex_with_props(&mut self, props: Properties) -> Result<VertexId> {
        self.check_not_indexing(props.keys())?;
        let v = self.add_vertex();
        if !props.is_empty() {
            self.vprops.insert(v, props);
        }
        Ok(v)
    }

    /// 顶点是否存在
    pub fn has_vertex(&self, v: VertexId) -> bool {
        v.index() < self.graph.node_count()
    }

    /// 删除顶点
    ///
    /// 最后一个顶点会移动到 `v` 的位置，其元数据随之迁移。
    /// 顶点不存在时返回 false。
    pub fn rem_vertex(&mut self, v: VertexId) -> bool {
        if !self.has_vertex(v) {
            return false;
        }
        let last = VertexId::new(self.graph.node_count() as u32 - 1);

        // 释放被删除顶点的索引值并清除其元数据
        self.clear_props(v);
        self.eprops.retain(|e, _| !e.touches(v));

        let moved_edges: Vec<(Edge, Properties)> = if last != v {
            let keys: Vec<Edge> = self
                .eprops
                .keys()
                .filter(|e| e.touches(last))
                .copied()
                .collect();
            keys.into_iter()
                .filter_map(|e| self.eprops.remove(&e).map(|p| (e, p)))
                .collect()
        } else {
            Vec::new()
        };

        self.graph.remove_node(v.node());

        if last != v {
            if let Some(props) = self.vprops.remove(&last) {
                for prop in self.index.props().clone() {
                    if let Some(value) = props.get(&prop) {
                        self.index.insert(&prop, value.clone(), v);
                    }
                }
                self.vprops.insert(v, props);
            }

            let directed = self.is_directed();
            for (e, props) in moved_edges {
                let relabel = |x: VertexId| if x == last { v } else { x };
                let e = Edge::new(relabel(e.src), relabel(e.dst)).canonical(directed);
                self.eprops.insert(e, props);
            }
        }

        self.metrics.record_vertex_removal();
        debug!(vertex = v.as_u32(), moved_from = last.as_u32(), "删除顶点");
        true
    }

    /// 顶点数量
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    /// 所有顶点
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + Clone {
        (0..self.graph.node_count() as u32).map(VertexId::new)
    }

    /// 邻居顶点（有向图为出边邻居），升序
    pub fn neighbors(&self, v: VertexId) -> Vec<VertexId> {
        if !self.has_vertex(v) {
            return Vec::new();
        }
        let mut out: Vec<VertexId> = self.graph.neighbors(v.node()).map(VertexId::from).collect();
        out.sort();
        out.dedup();
        out
    }

    /// 入边邻居（无向图与 `neighbors` 相同），升序
    pub fn in_neighbors(&self, v: VertexId) -> Vec<VertexId> {
        if !self.has_vertex(v) {
            return Vec::new();
        }
        let mut out: Vec<VertexId> = self
            .graph
            .neighbors_directed(v.node(), Direction::Incoming)
            .map(VertexId::from)
            .collect();
        out.sort();
        out.dedup();
        out
    }

    // ==================== 边操作 ====================

    /// 添加边
    ///
    /// 端点不存在或边已存在时返回 false。
    pub fn add_edge(&mut self, src: impl Into<VertexId>, dst: impl Into<VertexId>) -> bool {
        let (src, dst) = (src.into(), dst.into());
        if !self.has_vertex(src) || !self.has_vertex(dst) || self.has_edge(src, dst) {
            return false;
        }
        self.graph.add_edge(src.node(), dst.node(), ());
        self.metrics.record_edge_insert();
        true
    }

    /// 添加带属性的边
    pub fn add_edge_with_props(
        &mut self,
        src: impl Into<VertexId>,
        dst: impl Into<VertexId>,
        props: Properties,
    ) -> bool {
        let (src, dst) = (src.into(), dst.into());
        if !self.add_edge(src, dst) {
            return false;
        }
        if !props.is_empty() {
            let e = self.canonical(Edge::new(src, dst));
            self.eprops.insert(e, props);
        }
        true
    }

    /// 边是否存在
    pub fn has_edge(&self, src: impl Into<VertexId>, dst: impl Into<VertexId>) -> bool {
        let (src, dst) = (src.into(), dst.into());
        self.has_vertex(src)
            && self.has_vertex(dst)
            && self.graph.find_edge(src.node(), dst.node()).is_some()
    }

    /// 删除边及其属性，边不存在时返回 false
    pub fn rem_edge(&mut self, src: impl Into<VertexId>, dst: impl Into<VertexId>) -> bool {
        let (src, dst) = (src.into(), dst.into());
        if !self.has_vertex(src) || !self.has_vertex(dst) {
            return false;
        }
        let Some(id) = self.graph.find_edge(src.node(), dst.node()) else {
            return false;
        };
        self.graph.remove_edge(id);
        let e = self.canonical(Edge::new(src, dst));
        self.eprops.remove(&e);
        self.metrics.record_edge_removal();
        true
    }

    /// 边数量
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// 所有边（无向图中已规范化）
    pub fn edges(&self) -> impl Iterator<Item = Edge> + Clone + '_ {
        let directed = self.is_directed();
        self.graph.edge_references().map(move |e| {
            Edge::new(
                VertexId::from(e.source()),
                VertexId::from(e.target()),
            )
            .canonical(directed)
        })
    }

    /// 按图的方向性规范化边
    pub fn canonical(&self, e: Edge) -> Edge {
        e.canonical(self.is_directed())
    }

    // ==================== 属性操作 ====================

    fn resolve(&self, target: impl Into<Element>) -> Element {
        match target.into() {
            Element::Edge(e) => Element::Edge(self.canonical(e)),
            other => other,
        }
    }

    fn exists(&self, target: &Element) -> bool {
        match target {
            Element::Graph => true,
            Element::Vertex(v) => self.has_vertex(*v),
            Element::Edge(e) => self.has_edge(e.src, e.dst),
        }
    }

    fn props_ref(&self, target: &Element) -> Option<&Properties> {
        match target {
            Element::Graph => Some(&self.gprops),
            Element::Vertex(v) => self.vprops.get(v),
            Element::Edge(e) => self.eprops.get(e),
        }
    }

    /// 取得目标的可写属性表，元素不存在时返回 None
    fn props_entry(&mut self, target: Element) -> Option<&mut Properties> {
        if !self.exists(&target) {
            return None;
        }
        match target {
            Element::Graph => Some(&mut self.gprops),
            Element::Vertex(v) => Some(self.vprops.entry(v).or_default()),
            Element::Edge(e) => Some(self.eprops.entry(e).or_default()),
        }
    }

    fn check_not_indexing<'a>(&self, keys: impl IntoIterator<Item = &'a String>) -> Result<()> {
        for key in keys {
            if self.index.contains(key) {
                self.metrics.record_rejected_write();
                return Err(Error::IndexingProperty(key.clone()));
            }
        }
        Ok(())
    }

    /// 获取目标的全部属性
    ///
    /// 目标没有属性或不存在时返回空表。
    pub fn props(&self, target: impl Into<Element>) -> &Properties {
        let target = self.resolve(target);
        self.metrics.record_property_read();
        self.props_ref(&target).unwrap_or(&EMPTY_PROPS)
    }

    /// 获取指定属性，未定义时返回错误
    pub fn get_prop(&self, target: impl Into<Element>, prop: &str) -> Result<&PropertyValue> {
        let target = self.resolve(target);
        self.metrics.record_property_read();
        self.props_ref(&target)
            .and_then(|p| p.get(prop))
            .ok_or_else(|| Error::PropertyNotFound(format!("{} 的 :{}", target, prop)))
    }

    /// 属性是否已定义
    pub fn has_prop(&self, target: impl Into<Element>, prop: &str) -> bool {
        let target = self.resolve(target);
        self.props_ref(&target)
            .map(|p| p.contains_key(prop))
            .unwrap_or(false)
    }

    /// 设置（替换）属性
    ///
    /// 顶点或边不存在时返回 `Ok(false)`。顶点的索引属性必须通过
    /// [`Graph::set_indexing_prop_value`] 设置。
    pub fn set_prop(
        &mut self,
        target: impl Into<Element>,
        prop: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<bool> {
        let target = self.resolve(target);
        if let Element::Vertex(_) = target {
            self.check_not_indexing([&prop.to_string()])?;
        }
        let metrics = self.metrics.clone();
        match self.props_entry(target) {
            Some(props) => {
                props.insert(prop.to_string(), value.into());
                metrics.record_property_write();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// 批量合并属性
    ///
    /// 顶点或边不存在时不做任何修改并返回 `Ok(false)`。
    pub fn set_props(&mut self, target: impl Into<Element>, props: Properties) -> Result<bool> {
        let target = self.resolve(target);
        if let Element::Vertex(_) = target {
            self.check_not_indexing(props.keys())?;
        }
        let metrics = self.metrics.clone();
        match self.props_entry(target) {
            Some(existing) => {
                for (k, v) in props {
                    existing.insert(k, v);
                    metrics.record_property_write();
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// 删除单个属性
    ///
    /// 属性、顶点或边不存在时不做任何事。删除顶点的索引属性会同时释放索引值。
    pub fn rem_prop(&mut self, target: impl Into<Element>, prop: &str) {
        let target = self.resolve(target);
        let removed = match target {
            Element::Graph => self.gprops.remove(prop),
            Element::Vertex(v) => {
                let removed = self.vprops.get_mut(&v).and_then(|p| p.remove(prop));
                if self.vprops.get(&v).map(|p| p.is_empty()).unwrap_or(false) {
                    self.vprops.remove(&v);
                }
                if let Some(value) = &removed {
                    if self.index.contains(prop) {
                        self.index.remove(prop, value);
                    }
                }
                removed
            }
            Element::Edge(e) => {
                let removed = self.eprops.get_mut(&e).and_then(|p| p.remove(prop));
                if self.eprops.get(&e).map(|p| p.is_empty()).unwrap_or(false) {
                    self.eprops.remove(&e);
                }
                removed
            }
        };
        if removed.is_some() {
            self.metrics.record_property_removal();
        }
    }

    /// 清除目标的全部属性（含索引值）
    pub fn clear_props(&mut self, target: impl Into<Element>) {
        let target = self.resolve(target);
        match target {
            Element::Graph => self.gprops.clear(),
            Element::Vertex(v) => {
                if let Some(props) = self.vprops.remove(&v) {
                    for (prop, value) in &props {
                        if self.index.contains(prop) {
                            self.index.remove(prop, value);
                        }
                    }
                }
            }
            Element::Edge(e) => {
                self.eprops.remove(&e);
            }
        }
    }

    // ==================== 过滤 ====================

    /// 满足谓词的顶点（惰性、可克隆以重新开始）
    pub fn filter_vertices<'a, F>(&'a self, pred: F) -> impl Iterator<Item = VertexId> + Clone + 'a
    where
        F: Fn(&Self, VertexId) -> bool + Clone + 'a,
    {
        self.vertices().filter(move |&v| pred(self, v))
    }

    /// 定义了属性 `prop`（可选地等于 `value`）的顶点
    pub fn filter_vertices_by_prop<'a>(
        &'a self,
        prop: &'a str,
        value: Option<&'a PropertyValue>,
    ) -> impl Iterator<Item = VertexId> + Clone + 'a {
        self.vertices().filter(move |v| {
            match self.vprops.get(v).and_then(|p| p.get(prop)) {
                Some(found) => value.map_or(true, |want| found == want),
                None => false,
            }
        })
    }

    /// 满足谓词的边（惰性、可克隆以重新开始）
    pub fn filter_edges<'a, F>(&'a self, pred: F) -> impl Iterator<Item = Edge> + Clone + 'a
    where
        F: Fn(&Self, Edge) -> bool + Clone + 'a,
    {
        self.edges().filter(move |&e| pred(self, e))
    }

    /// 定义了属性 `prop`（可选地等于 `value`）的边
    pub fn filter_edges_by_prop<'a>(
        &'a self,
        prop: &'a str,
        value: Option<&'a PropertyValue>,
    ) -> impl Iterator<Item = Edge> + Clone + 'a {
        self.edges().filter(move |e| {
            match self.eprops.get(e).and_then(|p| p.get(prop)) {
                Some(found) => value.map_or(true, |want| found == want),
                None => false,
            }
        })
    }

    // ==================== 权重设置 ====================

    /// 权重字段名
    pub fn weight_field(&self) -> &str {
        &self.weight_field
    }

    /// 设置权重字段名
    pub fn set_weight_field(&mut self, field: impl Into<String>) {
        self.weight_field = field.into();
    }

    /// 默认权重
    pub fn default_weight(&self) -> f64 {
        self.default_weight
    }

    /// 设置默认权重
    pub fn set_default_weight(&mut self, weight: f64) {
        self.default_weight = weight;
    }

    // ==================== 索引属性 ====================

    /// 所有索引属性
    pub fn indexing_props(&self) -> &IndexSet<String> {
        self.index.props()
    }

    /// 将属性设为索引属性
    ///
    /// 已有取值必须在顶点间唯一，否则返回错误且图保持不变。
    /// 没有该属性的顶点被赋予默认值 `"{prop}{v}"`。
    pub fn set_indexing_prop(&mut self, prop: &str) -> Result<&IndexSet<String>> {
        if self.index.contains(prop) {
            return Ok(self.index.props());
        }

        let mut entries = Vec::new();
        let mut defaults = Vec::new();
        for v in self.vertices() {
            match self.vprops.get(&v).and_then(|p| p.get(prop)) {
                Some(value) => entries.push((v, value.clone())),
                None => defaults.push((v, PropertyValue::String(format!("{}{}", prop, v)))),
            }
        }
        entries.extend(defaults.iter().cloned());

        if let Err(dup) = self.index.add_prop(prop, entries) {
            self.metrics.record_rejected_write();
            return Err(Error::DuplicateIndexValue {
                prop: prop.to_string(),
                value: dup.to_string(),
            });
        }

        let assigned = defaults.len();
        for (v, value) in defaults {
            self.vprops
                .entry(v)
                .or_default()
                .insert(prop.to_string(), value);
        }

        debug!(prop, defaults = assigned, "新增索引属性");
        Ok(self.index.props())
    }

    /// 为顶点设置索引属性值
    ///
    /// `prop` 尚不是索引属性时先将其设为索引属性。值已被其他顶点占用时返回错误；
    /// 顶点原有的索引值被释放。
    pub fn set_indexing_prop_value(
        &mut self,
        v: impl Into<VertexId>,
        prop: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<&IndexSet<String>> {
        let v = v.into();
        if !self.has_vertex(v) {
            return Err(Error::VertexNotFound(v.to_string()));
        }
        if !self.index.contains(prop) {
            self.set_indexing_prop(prop)?;
        }

        let value = value.into();
        match self.index.lookup(prop, &value) {
            Some(owner) if owner == v => return Ok(self.index.props()),
            Some(_) => {
                self.metrics.record_rejected_write();
                return Err(Error::DuplicateIndexValue {
                    prop: prop.to_string(),
                    value: value.to_string(),
                });
            }
            None => {}
        }

        let old = self.vprops.get(&v).and_then(|p| p.get(prop)).cloned();
        if let Some(old) = old {
            self.index.remove(prop, &old);
        }
        self.index.insert(prop, value.clone(), v);
        self.vprops
            .entry(v)
            .or_default()
            .insert(prop.to_string(), value);
        self.metrics.record_property_write();

        Ok(self.index.props())
    }

    /// 通过索引值查找顶点
    pub fn vertex_by_index(&self, prop: &str, value: &PropertyValue) -> Result<VertexId> {
        if !self.index.contains(prop) {
            return Err(Error::NotIndexingProperty(prop.to_string()));
        }
        let found = self.index.lookup(prop, value);
        self.metrics.record_index_lookup(found.is_some());
        found.ok_or_else(|| Error::IndexValueNotFound {
            prop: prop.to_string(),
            value: value.to_string(),
        })
    }

    /// 获取顶点的索引值
    pub fn index_value(&self, v: impl Into<VertexId>, prop: &str) -> Result<&PropertyValue> {
        if !self.index.contains(prop) {
            return Err(Error::NotIndexingProperty(prop.to_string()));
        }
        let v: VertexId = v.into();
        self.get_prop(v, prop)
    }

    // ==================== 派生图 ====================

    /// 诱导子图
    ///
    /// 保留给定顶点及其之间的边和全部元数据。返回的映射表中
    /// `vmap[new] == old`。
    pub fn induced_subgraph(&self, vertices: &[VertexId]) -> Result<(Self, Vec<VertexId>)> {
        let mut old_to_new = HashMap::with_capacity(vertices.len());
        for (i, &v) in vertices.iter().enumerate() {
            if !self.has_vertex(v) {
                return Err(Error::InvalidSubgraph(format!("顶点 {} 不存在", v)));
            }
            if old_to_new.insert(v, VertexId::new(i as u32)).is_some() {
                return Err(Error::InvalidSubgraph(format!("顶点 {} 重复", v)));
            }
        }

        let mut sub = Self::with_vertices(vertices.len())
            .with_default_weight(self.default_weight)
            .with_weight_field(self.weight_field.clone());
        sub.gprops = self.gprops.clone();

        for (&old, &new) in &old_to_new {
            if let Some(p) = self.vprops.get(&old) {
                sub.vprops.insert(new, p.clone());
            }
        }

        for e in self.edges() {
            if let (Some(&s), Some(&d)) = (old_to_new.get(&e.src), old_to_new.get(&e.dst)) {
                sub.add_edge(s, d);
                if let Some(p) = self.eprops.get(&e) {
                    let key = sub.canonical(Edge::new(s, d));
                    sub.eprops.insert(key, p.clone());
                }
            }
        }

        for prop in self.index.props() {
            let entries: Vec<(VertexId, PropertyValue)> = sub
                .vertices()
                .filter_map(|v| sub.vprops.get(&v)?.get(prop).map(|val| (v, val.clone())))
                .collect();
            // 原图中的值唯一，子集中同样唯一
            sub.index
                .add_prop(prop, entries)
                .map_err(|dup| Error::DuplicateIndexValue {
                    prop: prop.clone(),
                    value: dup.to_string(),
                })?;
        }

        Ok((sub, vertices.to_vec()))
    }

    // ==================== crate 内访问 ====================

    pub(crate) fn graph_props_map(&self) -> &Properties {
        &self.gprops
    }

    pub(crate) fn vertex_props_map(&self) -> &HashMap<VertexId, Properties> {
        &self.vprops
    }

    pub(crate) fn edge_props_map(&self) -> &HashMap<Edge, Properties> {
        &self.eprops
    }

    /// 直接装载属性（持久化恢复使用，跳过索引检查）
    pub(crate) fn load_raw_props(
        &mut self,
        gprops: Properties,
        vprops: HashMap<VertexId, Properties>,
        eprops: HashMap<Edge, Properties>,
    ) {
        self.gprops = gprops;
        self.vprops = vprops;
        self.eprops = eprops;
    }

    /// 按当前顶点属性重建索引
    pub(crate) fn rebuild_index(&mut self, props: &[String]) -> Result<()> {
        self.index.clear();
        for prop in props {
            let entries: Vec<(VertexId, PropertyValue)> = self
                .vertices()
                .filter_map(|v| self.vprops.get(&v)?.get(prop).map(|val| (v, val.clone())))
                .collect();
            self.index
                .add_prop(prop, entries)
                .map_err(|dup| Error::DuplicateIndexValue {
                    prop: prop.clone(),
                    value: dup.to_string(),
                })?;
        }
        Ok(())
    }
}

impl Graph<Undirected> {
    /// 转换为有向图，每条无向边变为两条携带相同属性的有向边
    pub fn to_directed(&self) -> Graph<Directed> {
        let mut g = Graph::<Directed>::with_vertices(self.vertex_count())
            .with_default_weight(self.default_weight)
            .with_weight_field(self.weight_field.clone());
        g.gprops = self.gprops.clone();
        g.vprops = self.vprops.clone();
        g.index = self.index.clone();

        for e in self.edges() {
            let props = self.eprops.get(&e).cloned();
            let arcs = if e.is_self_loop() {
                vec![e]
            } else {
                vec![e, e.reverse()]
            };
            for arc in arcs {
                g.add_edge(arc.src, arc.dst);
                if let Some(p) = &props {
                    g.eprops.insert(arc, p.clone());
                }
            }
        }
        g
    }
}

impl<Ty: EdgeType> Default for Graph<Ty> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ty: EdgeType> fmt::Display for Graph<Ty> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}, {}}} {} u32 metagraph with f64 weights defined by :{} (default weight {:?})",
            self.vertex_count(),
            self.edge_count(),
            if self.is_directed() { "directed" } else { "undirected" },
            self.weight_field,
            self.default_weight
        )
    }
}
