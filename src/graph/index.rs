//! 索引属性
//!
//! 被标记为索引的顶点属性在所有顶点间取值唯一，并维护 值 -> 顶点 的反向映射

use crate::graph::vertex::VertexId;
use crate::types::PropertyValue;
use indexmap::IndexSet;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// 可哈希的索引键
///
/// 浮点数按规范化后的位模式比较（`-0.0 == 0.0`，所有 NaN 相等），
/// Map 的比较与键顺序无关。
#[derive(Debug, Clone)]
pub struct IndexKey(pub PropertyValue);

fn float_bits(v: f64) -> u64 {
    if v == 0.0 {
        0.0f64.to_bits()
    } else if v.is_nan() {
        f64::NAN.to_bits()
    } else {
        v.to_bits()
    }
}

fn key_eq(a: &PropertyValue, b: &PropertyValue) -> bool {
    use PropertyValue::*;
    match (a, b) {
        (Float(x), Float(y)) => float_bits(*x) == float_bits(*y),
        (List(xs), List(ys)) => xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| key_eq(x, y)),
        (Map(xm), Map(ym)) => {
            xm.len() == ym.len()
                && xm
                    .iter()
                    .all(|(k, x)| ym.get(k).map(|y| key_eq(x, y)).unwrap_or(false))
        }
        (List(_), _) | (Map(_), _) | (Float(_), _) => false,
        _ => a == b,
    }
}

fn key_hash<H: Hasher>(v: &PropertyValue, state: &mut H) {
    use PropertyValue::*;
    std::mem::discriminant(v).hash(state);
    match v {
        Null => {}
        Bool(b) => b.hash(state),
        Int(i) => i.hash(state),
        UInt(u) => u.hash(state),
        Float(f) => float_bits(*f).hash(state),
        String(s) => s.hash(state),
        Date(d) => d.hash(state),
        DateTime(dt) => dt.hash(state),
        Bytes(b) => b.hash(state),
        List(items) => {
            items.len().hash(state);
            for item in items {
                key_hash(item, state);
            }
        }
        Map(map) => {
            map.len().hash(state);
            let mut keys: Vec<&std::string::String> = map.keys().collect();
            keys.sort();
            for k in keys {
                k.hash(state);
                key_hash(&map[k.as_str()], state);
            }
        }
    }
}

impl PartialEq for IndexKey {
    fn eq(&self, other: &Self) -> bool {
        key_eq(&self.0, &other.0)
    }
}

impl Eq for IndexKey {}

impl Hash for IndexKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        key_hash(&self.0, state)
    }
}

/// 索引属性集合及其反向映射
#[derive(Debug, Clone, Default)]
pub struct PropertyIndex {
    /// 索引属性名（保持声明顺序）
    props: IndexSet<String>,
    /// 属性名 -> (值 -> 顶点)
    value_to_id: HashMap<String, HashMap<IndexKey, VertexId>>,
}

impl PropertyIndex {
    /// 创建空索引
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否为索引属性
    pub fn contains(&self, prop: &str) -> bool {
        self.props.contains(prop)
    }

    /// 所有索引属性
    pub fn props(&self) -> &IndexSet<String> {
        &self.props
    }

    /// 注册新的索引属性
    ///
    /// `entries` 中的值必须互不相同；出现重复时返回该值且不做任何修改。
    pub fn add_prop(
        &mut self,
        prop: &str,
        entries: Vec<(VertexId, PropertyValue)>,
    ) -> std::result::Result<(), PropertyValue> {
        let mut map = HashMap::with_capacity(entries.len());
        for (v, value) in entries {
            let key = IndexKey(value);
            if map.contains_key(&key) {
                return Err(key.0);
            }
            map.insert(key, v);
        }
        self.props.insert(prop.to_string());
        self.value_to_id.insert(prop.to_string(), map);
        Ok(())
    }

    /// 通过值查找顶点
    pub fn lookup(&self, prop: &str, value: &PropertyValue) -> Option<VertexId> {
        self.value_to_id
            .get(prop)?
            .get(&IndexKey(value.clone()))
            .copied()
    }

    /// 写入 值 -> 顶点 映射（调用方负责唯一性检查）
    pub fn insert(&mut self, prop: &str, value: PropertyValue, v: VertexId) {
        self.value_to_id
            .entry(prop.to_string())
            .or_default()
            .insert(IndexKey(value), v);
    }

    /// 移除某个值的映射
    pub fn remove(&mut self, prop: &str, value: &PropertyValue) -> Option<VertexId> {
        self.value_to_id
            .get_mut(prop)?
            .remove(&IndexKey(value.clone()))
    }

    /// 清空所有索引
    pub fn clear(&mut self) {
        self.props.clear();
        self.value_to_id.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use std::collections::HashSet;

    #[test]
    fn test_index_key_float_normalization() {
        assert_eq!(IndexKey(PropertyValue::Float(0.0)), IndexKey(PropertyValue::Float(-0.0)));
        assert_eq!(IndexKey(PropertyValue::Float(f64::NAN)), IndexKey(PropertyValue::Float(f64::NAN)));
        assert_ne!(IndexKey(PropertyValue::Int(1)), IndexKey(PropertyValue::Float(1.0)));
    }

    #[test]
    fn test_index_key_map_order_independent() {
        let mut a = IndexMap::new();
        a.insert("x".to_string(), PropertyValue::Int(1));
        a.insert("y".to_string(), PropertyValue::Int(2));
        let mut b = IndexMap::new();
        b.insert("y".to_string(), PropertyValue::Int(2));
        b.insert("x".to_string(), PropertyValue::Int(1));

        let mut set = HashSet::new();
        set.insert(IndexKey(PropertyValue::Map(a)));
        assert!(set.contains(&IndexKey(PropertyValue::Map(b))));
    }

    #[test]
    fn test_property_index() {
        let mut index = PropertyIndex::new();
        index
            .add_prop(
                "name",
                vec![
                    (VertexId::new(0), "a".into()),
                    (VertexId::new(1), "b".into()),
                ],
            )
            .unwrap();

        assert!(index.contains("name"));
        assert_eq!(index.lookup("name", &"b".into()), Some(VertexId::new(1)));
        assert_eq!(index.lookup("name", &"a".into()), Some(VertexId::new(0)));

        assert_eq!(index.remove("name", &"a".into()), Some(VertexId::new(0)));
        assert_eq!(index.lookup("name", &"a".into()), None);
    }

    #[test]
    fn test_add_prop_rejects_duplicates() {
        let mut index = PropertyIndex::new();
        let dup = index.add_prop(
            "name",
            vec![
                (VertexId::new(0), "a".into()),
                (VertexId::new(1), "a".into()),
            ],
        );
        assert_eq!(dup, Err(PropertyValue::from("a")));
        assert!(!index.contains("name"));
    }
}
