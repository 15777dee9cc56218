//! 属性值和通用类型定义

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// 默认权重字段名
pub const DEFAULT_WEIGHT_FIELD: &str = "weight";

/// 默认边权重
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// 属性值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Bytes(Vec<u8>),
    List(Vec<PropertyValue>),
    Map(IndexMap<String, PropertyValue>),
}

impl PropertyValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Null => "null",
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Int(_) => "int",
            PropertyValue::UInt(_) => "uint",
            PropertyValue::Float(_) => "float",
            PropertyValue::String(_) => "string",
            PropertyValue::Date(_) => "date",
            PropertyValue::DateTime(_) => "datetime",
            PropertyValue::Bytes(_) => "bytes",
            PropertyValue::List(_) => "list",
            PropertyValue::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(v) => Some(*v),
            PropertyValue::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// 数值类型统一转换为 f64（权重读取使用）
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Int(v) => Some(*v as f64),
            PropertyValue::UInt(v) => Some(*v as f64),
            PropertyValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            PropertyValue::Date(v) => Some(*v),
            PropertyValue::DateTime(v) => Some(v.date()),
            _ => None,
        }
    }

    /// 从文本推断属性值类型
    ///
    /// 依次尝试: null、布尔、整数、浮点数、日期（`YYYY-MM-DD`）、
    /// 日期时间（`YYYY-MM-DDTHH:MM:SS`），否则作为字符串。
    /// 以双引号包裹的文本总是字符串。
    pub fn parse_literal(text: &str) -> PropertyValue {
        let text = text.trim();

        if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
            return PropertyValue::String(text[1..text.len() - 1].to_string());
        }

        match text {
            "null" => return PropertyValue::Null,
            "true" => return PropertyValue::Bool(true),
            "false" => return PropertyValue::Bool(false),
            _ => {}
        }

        if let Ok(v) = text.parse::<i64>() {
            return PropertyValue::Int(v);
        }
        // "inf"、"nan" 之类不含数字的文本保留为字符串
        if text.bytes().any(|b| b.is_ascii_digit()) {
            if let Ok(v) = text.parse::<f64>() {
                return PropertyValue::Float(v);
            }
        }
        if let Ok(d) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return PropertyValue::Date(d);
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
                return PropertyValue::DateTime(dt);
            }
        }

        PropertyValue::String(text.to_string())
    }

    /// 由 JSON 值转换
    pub fn from_json(value: &serde_json::Value) -> PropertyValue {
        use serde_json::Value;
        match value {
            Value::Null => PropertyValue::Null,
            Value::Bool(b) => PropertyValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    PropertyValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    PropertyValue::UInt(u)
                } else {
                    PropertyValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => PropertyValue::String(s.clone()),
            Value::Array(items) => PropertyValue::List(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => PropertyValue::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => write!(f, "null"),
            PropertyValue::Bool(v) => write!(f, "{}", v),
            PropertyValue::Int(v) => write!(f, "{}", v),
            PropertyValue::UInt(v) => write!(f, "{}", v),
            PropertyValue::Float(v) => write!(f, "{}", v),
            PropertyValue::String(v) => write!(f, "{}", v),
            PropertyValue::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            PropertyValue::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%dT%H:%M:%S")),
            PropertyValue::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            PropertyValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            PropertyValue::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        PropertyValue::Int(v as i64)
    }
}

impl From<i64> for PropertyValue {
    fn from(v: i64) -> Self {
        PropertyValue::Int(v)
    }
}

impl From<u32> for PropertyValue {
    fn from(v: u32) -> Self {
        PropertyValue::UInt(v as u64)
    }
}

impl From<u64> for PropertyValue {
    fn from(v: u64) -> Self {
        PropertyValue::UInt(v)
    }
}

impl From<f64> for PropertyValue {
    fn from(v: f64) -> Self {
        PropertyValue::Float(v)
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::String(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        PropertyValue::String(v.to_string())
    }
}

impl From<NaiveDate> for PropertyValue {
    fn from(v: NaiveDate) -> Self {
        PropertyValue::Date(v)
    }
}

impl From<NaiveDateTime> for PropertyValue {
    fn from(v: NaiveDateTime) -> Self {
        PropertyValue::DateTime(v)
    }
}

impl From<Vec<u8>> for PropertyValue {
    fn from(v: Vec<u8>) -> Self {
        PropertyValue::Bytes(v)
    }
}

impl From<Vec<PropertyValue>> for PropertyValue {
    fn from(v: Vec<PropertyValue>) -> Self {
        PropertyValue::List(v)
    }
}

impl From<IndexMap<String, PropertyValue>> for PropertyValue {
    fn from(v: IndexMap<String, PropertyValue>) -> Self {
        PropertyValue::Map(v)
    }
}

/// 属性映射
pub type Properties = HashMap<String, PropertyValue>;

/// 由键值对构造属性映射
pub fn props<K, V, I>(pairs: I) -> Properties
where
    K: Into<String>,
    V: Into<PropertyValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal() {
        assert_eq!(PropertyValue::parse_literal("42"), PropertyValue::Int(42));
        assert_eq!(PropertyValue::parse_literal("0.2"), PropertyValue::Float(0.2));
        assert_eq!(PropertyValue::parse_literal("true"), PropertyValue::Bool(true));
        assert_eq!(PropertyValue::parse_literal("null"), PropertyValue::Null);
        assert_eq!(
            PropertyValue::parse_literal("2017-05-01"),
            PropertyValue::Date(NaiveDate::from_ymd_opt(2017, 5, 1).unwrap())
        );
        assert_eq!(
            PropertyValue::parse_literal("\"42\""),
            PropertyValue::String("42".to_string())
        );
        assert_eq!(
            PropertyValue::parse_literal("inf"),
            PropertyValue::String("inf".to_string())
        );
        assert_eq!(
            PropertyValue::parse_literal("Susan"),
            PropertyValue::String("Susan".to_string())
        );
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(PropertyValue::Int(3).as_float(), Some(3.0));
        assert_eq!(PropertyValue::UInt(7).as_float(), Some(7.0));
        assert_eq!(PropertyValue::from("x").as_float(), None);
        assert_eq!(PropertyValue::UInt(u64::MAX).as_int(), None);
    }

    #[test]
    fn test_display() {
        let list = PropertyValue::List(vec![1.into(), "a".into()]);
        assert_eq!(list.to_string(), "[1, a]");

        let mut map = IndexMap::new();
        map.insert("k".to_string(), PropertyValue::Bool(false));
        assert_eq!(PropertyValue::Map(map).to_string(), "{k: false}");
    }

    #[test]
    fn test_from_json() {
        let value = serde_json::json!({"b": [1, 2.5, "x"], "a": null, "big": 18446744073709551615u64});
        match PropertyValue::from_json(&value) {
            PropertyValue::Map(map) => {
                assert_eq!(map.len(), 3);
                assert_eq!(
                    map["b"],
                    PropertyValue::List(vec![
                        PropertyValue::Int(1),
                        PropertyValue::Float(2.5),
                        PropertyValue::from("x"),
                    ])
                );
                assert!(map["a"].is_null());
                assert_eq!(map["big"], PropertyValue::UInt(u64::MAX));
            }
            other => panic!("unexpected value: {:?}", other),
        }
    }

    #[test]
    fn test_props_builder() {
        let p = props([("name", PropertyValue::from("Susan")), ("id", 123.into())]);
        assert_eq!(p.len(), 2);
        assert_eq!(p["id"], PropertyValue::Int(123));
    }
}
