use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single attribute value: one string or an ordered list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Scalar(String),
    Sequence(Vec<String>),
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Scalar(s.to_string())
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(v: Vec<&str>) -> Self {
        FieldValue::Sequence(v.into_iter().map(str::to_string).collect())
    }
}

/// Raw attributes describing one data provider, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRecord {
    fields: Vec<(String, FieldValue)>,
}

impl SourceRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Exact-name duplicates replace in place; case variants are kept side by side.
    pub fn insert(&mut self, name: &str, value: impl Into<FieldValue>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    /// First field (in insertion order) whose name matches ignoring ASCII case.
    pub fn get_ignore_case(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    /// Field stored under exactly `name`.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// The provider record the tool falls back to when no source file is given.
    pub fn sample() -> Self {
        SourceRecord::new()
            .with("address", "0xC522E6A633545872f1afc0cdD7b2D96d97E3dE67")
            .with("name", "Ftso_xyz")
            .with("url", "Example.com")
            .with("logo", "12345678.png")
            .with("nodeID", vec!["node1", "node2", "node3", "node4", "node5"])
    }
}

impl Serialize for SourceRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SourceRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields =
            deserializer.deserialize_map(OrderedPairs::<FieldValue>::new("a source record object"))?;
        let mut record = SourceRecord::new();
        for (name, value) in fields {
            record.insert(&name, value);
        }
        Ok(record)
    }
}

/// Collects a JSON object into a `Vec` so key order survives deserialization.
pub(crate) struct OrderedPairs<V> {
    expecting: &'static str,
    marker: std::marker::PhantomData<V>,
}

impl<V> OrderedPairs<V> {
    pub(crate) fn new(expecting: &'static str) -> Self {
        Self {
            expecting,
            marker: std::marker::PhantomData,
        }
    }
}

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedPairs<V> {
    type Value = Vec<(String, V)>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.expecting)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut out = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            out.push((key, value));
        }
        Ok(out)
    }
}

/// Remapped record keyed by canonical field names, in format order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputRecord {
    fields: Vec<(String, Vec<String>)>,
}

impl OutputRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, key: &str, values: Vec<String>) {
        self.fields.push((key.to_string(), values));
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_slice())
    }

    #[cfg(test)]
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for OutputRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (key, values) in &self.fields {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case_and_prefers_first() {
        let record = SourceRecord::new()
            .with("NodeID", vec!["a"])
            .with("nodeid", vec!["b"]);
        assert_eq!(record.len(), 2);
        assert_eq!(record.get_ignore_case("nodeid"), Some(&FieldValue::from(vec!["a"])));
        assert_eq!(record.get_ignore_case("missing"), None);
        assert_eq!(record.get("nodeid"), Some(&FieldValue::from(vec!["b"])));
        assert_eq!(record.get("NODEID"), None);
    }

    #[test]
    fn exact_duplicate_replaces_in_place() {
        let mut record = SourceRecord::new().with("name", "old").with("url", "u");
        record.insert("name", "new");
        assert_eq!(record.len(), 2);
        assert_eq!(record.get_ignore_case("NAME"), Some(&FieldValue::from("new")));
    }

    #[test]
    fn deserialize_keeps_key_order() {
        let record: SourceRecord =
            serde_json::from_str(r#"{"Name":"first","name":"second","nodeID":["n1","n2"]}"#).unwrap();
        assert_eq!(record.get_ignore_case("name"), Some(&FieldValue::from("first")));
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"Name":"first","name":"second","nodeID":["n1","n2"]}"#
        );
    }

    #[test]
    fn deserialize_rejects_non_string_values() {
        assert!(serde_json::from_str::<SourceRecord>(r#"{"name": 7}"#).is_err());
        assert!(serde_json::from_str::<SourceRecord>(r#"["name"]"#).is_err());
    }

    #[test]
    fn output_serializes_in_insertion_order() {
        let mut out = OutputRecord::new();
        out.push("url", vec!["u".to_string()]);
        out.push("address", Vec::new());
        assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"url":["u"],"address":[]}"#);
        assert_eq!(out.keys().collect::<Vec<_>>(), ["url", "address"]);
    }
}
