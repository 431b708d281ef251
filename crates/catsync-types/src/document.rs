//! Two-level catalog documents: group key → group → item key → value.

use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::canonical::canonicalize_table;
use crate::error::TypeError;
use crate::value::{Table, Value};

/// An object-rooted catalog document.
///
/// Each top-level entry is a *group*. A group whose value is a [`Table`] is
/// a table group; any other value is a non-table group that the engines
/// treat as an opaque unit.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    groups: Table,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing table as a document.
    pub fn from_table(groups: Table) -> Self {
        Self { groups }
    }

    /// All groups, table and non-table, in document order.
    pub fn groups(&self) -> &Table {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut Table {
        &mut self.groups
    }

    pub fn into_table(self) -> Table {
        self.groups
    }

    pub fn get(&self, group: &str) -> Option<&Value> {
        self.groups.get(group)
    }

    /// Insert a group, returning the previous value if the key existed.
    pub fn insert(&mut self, group: impl Into<String>, value: Value) -> Option<Value> {
        self.groups.insert(group, value)
    }

    /// Number of top-level groups of any shape.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Table groups only, in document order.
    pub fn table_groups(&self) -> impl Iterator<Item = (&String, &Table)> + '_ {
        self.groups
            .iter()
            .filter_map(|(key, value)| value.as_table().map(|table| (key, table)))
    }

    /// Total number of items across all table groups.
    pub fn item_count(&self) -> usize {
        self.table_groups().map(|(_, items)| items.len()).sum()
    }

    /// Recursively key-sorted copy of this document.
    pub fn canonicalize(self) -> Self {
        Self {
            groups: canonicalize_table(self.groups),
        }
    }
}

impl TryFrom<Value> for Document {
    type Error = TypeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Table(groups) => Ok(Self { groups }),
            other => Err(TypeError::NonObjectTopLevel {
                found: other.shape(),
            }),
        }
    }
}

impl From<Document> for Value {
    fn from(document: Document) -> Self {
        Value::Table(document.groups)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.groups.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Document::try_from(value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        Document::try_from(Value::from(value)).unwrap()
    }

    #[test]
    fn rejects_non_object_root() {
        let err = Document::try_from(Value::from(json!([1, 2]))).unwrap_err();
        assert_eq!(err, TypeError::NonObjectTopLevel { found: "array" });

        let err = Document::try_from(Value::from("text")).unwrap_err();
        assert_eq!(err, TypeError::NonObjectTopLevel { found: "string" });
    }

    #[test]
    fn counts_table_groups_and_items() {
        let d = doc(json!({
            "common": {"a": 1, "b": 2},
            "nav": {"home": "Home"},
            "title": "scalar group",
            "list": [1, 2, 3]
        }));
        assert_eq!(d.len(), 4);
        assert_eq!(d.table_groups().count(), 2);
        assert_eq!(d.item_count(), 3);
    }

    #[test]
    fn deserialize_rejects_list_root() {
        let result: Result<Document, _> = serde_json::from_str("[]");
        assert!(result.is_err());
    }

    #[test]
    fn canonicalize_sorts_groups_and_items() {
        let d: Document = serde_json::from_str(r#"{"b": {"y": 1, "x": 2}, "a": "s"}"#).unwrap();
        let text = serde_json::to_string(&d.canonicalize()).unwrap();
        assert_eq!(text, r#"{"a":"s","b":{"x":2,"y":1}}"#);
    }
}
