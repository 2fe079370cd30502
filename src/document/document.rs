//! Flattened document structure sent to the search engine.

use serde::{Deserialize, Serialize};

use crate::document::field_value::{FieldMap, FieldValue};

/// Name of the field that carries the document key.
pub const DOCUMENT_KEY_FIELD: &str = "id";

/// Update semantics of a field during a partial (atomic) update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldModifier {
    /// Replace the stored value.
    Set,
    /// Append to a multi-valued field.
    Add,
    /// Remove the given value(s) from a multi-valued field.
    Remove,
}

impl FieldModifier {
    /// The keyword the search engine expects for this modifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldModifier::Set => "set",
            FieldModifier::Add => "add",
            FieldModifier::Remove => "remove",
        }
    }
}

/// A single field of a [`Document`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentField {
    /// Indexed field name (the descriptor's alias).
    pub name: String,
    /// The field value.
    pub value: FieldValue,
    /// Field-level boost.
    pub boost: f32,
    /// Optional update modifier.
    pub modifier: Option<FieldModifier>,
}

/// A document represents a single entity flattened for indexing.
///
/// Fields keep their insertion order. Adding a field under a name that is
/// already present replaces the value in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    key: String,
    boost: f32,
    fields: Vec<DocumentField>,
}

impl Document {
    /// Create a new empty document with the given key.
    pub fn new<S: Into<String>>(key: S) -> Self {
        Document {
            key: key.into(),
            boost: 1.0,
            fields: Vec::new(),
        }
    }

    /// Get the document key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Set the document key.
    pub fn set_key<S: Into<String>>(&mut self, key: S) {
        self.key = key.into();
    }

    /// Get the document boost.
    pub fn boost(&self) -> f32 {
        self.boost
    }

    /// Set the document boost.
    pub fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    /// Add a field value to the document.
    pub fn add_field<S: Into<String>>(&mut self, name: S, value: FieldValue, boost: f32) {
        let name = name.into();
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value;
                field.boost = boost;
            }
            None => self.fields.push(DocumentField {
                name,
                value,
                boost,
                modifier: None,
            }),
        }
    }

    /// Record an update modifier against a field.
    ///
    /// Returns `false` if the document has no such field.
    pub fn set_field_modifier(&mut self, name: &str, modifier: FieldModifier) -> bool {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.modifier = Some(modifier);
                true
            }
            None => false,
        }
    }

    /// Get a field by name.
    pub fn field(&self, name: &str) -> Option<&DocumentField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get a field value by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldValue> {
        self.field(name).map(|f| &f.value)
    }

    /// Check if the document has a field.
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Remove a field from the document.
    pub fn remove_field(&mut self, name: &str) -> Option<DocumentField> {
        let position = self.fields.iter().position(|f| f.name == name)?;
        Some(self.fields.remove(position))
    }

    /// Get all fields in insertion order.
    pub fn fields(&self) -> &[DocumentField] {
        &self.fields
    }

    /// Get all field names in insertion order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Get the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Flatten into a single mapping: the key under [`DOCUMENT_KEY_FIELD`],
    /// then every field value. Boosts and modifiers are dropped.
    pub fn into_field_map(self) -> FieldMap {
        let mut map = FieldMap::new();
        map.insert(DOCUMENT_KEY_FIELD.to_string(), FieldValue::Text(self.key));
        for field in self.fields {
            map.insert(field.name, field.value);
        }
        map
    }

    /// Render the document as a JSON update command body.
    ///
    /// Fields with a modifier are wrapped as `{"<modifier>": value}`.
    pub fn to_update_json(&self) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        object.insert(
            DOCUMENT_KEY_FIELD.to_string(),
            serde_json::Value::String(self.key.clone()),
        );
        if self.boost != 1.0 {
            object.insert("_boost_".to_string(), serde_json::Value::from(self.boost));
        }

        for field in &self.fields {
            let value = field.value.to_json();
            let value = match field.modifier {
                Some(modifier) => {
                    let mut wrapped = serde_json::Map::new();
                    wrapped.insert(modifier.as_str().to_string(), value);
                    serde_json::Value::Object(wrapped)
                }
                None => value,
            };
            object.insert(field.name.clone(), value);
        }

        serde_json::Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_field_replaces_in_place() {
        let mut doc = Document::new("book_1");
        doc.add_field("title_s", FieldValue::from("First"), 1.0);
        doc.add_field("text_t", FieldValue::from("body"), 1.0);
        doc.add_field("title_s", FieldValue::from("Second"), 2.0);

        assert_eq!(doc.field_names(), vec!["title_s", "text_t"]);
        assert_eq!(doc.get_field("title_s"), Some(&FieldValue::from("Second")));
        assert_eq!(doc.field("title_s").map(|f| f.boost), Some(2.0));
    }

    #[test]
    fn test_field_modifier() {
        let mut doc = Document::new("book_1");
        doc.add_field("tags_ss", FieldValue::from(vec!["a"]), 1.0);

        assert!(doc.set_field_modifier("tags_ss", FieldModifier::Add));
        assert!(!doc.set_field_modifier("missing", FieldModifier::Set));
        assert_eq!(
            doc.field("tags_ss").and_then(|f| f.modifier),
            Some(FieldModifier::Add)
        );
    }

    #[test]
    fn test_remove_field() {
        let mut doc = Document::new("book_1");
        doc.add_field("title_s", FieldValue::from("First"), 1.0);

        assert!(doc.remove_field("title_s").is_some());
        assert!(doc.remove_field("title_s").is_none());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_into_field_map_includes_key() {
        let mut doc = Document::new("author_3");
        doc.add_field("name_s", FieldValue::from("Ada"), 1.0);

        let map = doc.into_field_map();
        assert_eq!(map.get("id"), Some(&FieldValue::from("author_3")));
        assert_eq!(map.get("name_s"), Some(&FieldValue::from("Ada")));
    }

    #[test]
    fn test_to_update_json() {
        let mut doc = Document::new("book_1");
        doc.set_boost(1.5);
        doc.add_field("title_s", FieldValue::from("Dune"), 1.0);
        doc.add_field("tags_ss", FieldValue::from(vec!["scifi"]), 1.0);
        doc.set_field_modifier("tags_ss", FieldModifier::Add);

        assert_eq!(
            doc.to_update_json(),
            serde_json::json!({
                "id": "book_1",
                "_boost_": 1.5,
                "title_s": "Dune",
                "tags_ss": { "add": ["scifi"] }
            })
        );
    }

    #[test]
    fn test_key_comes_first_in_rendered_forms() {
        let mut doc = Document::new("book_1");
        doc.add_field("title_s", FieldValue::from("Dune"), 1.0);
        doc.add_field("author_s", FieldValue::from("Herbert"), 1.0);

        let json = doc.to_update_json();
        let keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["id", "title_s", "author_s"]);
        assert_eq!(
            json.to_string(),
            r#"{"id":"book_1","title_s":"Dune","author_s":"Herbert"}"#
        );

        let map = doc.into_field_map();
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "title_s", "author_s"]);
    }
}
