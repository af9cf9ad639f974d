use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Number, Value};

/// One value of a generated BRD body
///
/// A closed variant over the JSON shapes the backend can return. Mappings keep
/// their entries in a `Vec` so the original key order is what gets displayed.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DocumentNode {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    List(Vec<DocumentNode>),
    Map(Vec<(String, DocumentNode)>),
}

impl DocumentNode {
    /// Parse a node from JSON text
    ///
    /// # Examples
    /// ```
    /// use brd_viewer::document::DocumentNode;
    ///
    /// let node = DocumentNode::from_json_str(r#"{"scope": "pilot", "goals": []}"#).unwrap();
    /// assert_eq!(node.keys(), vec!["scope", "goals"]);
    /// ```
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Value>(json).map(DocumentNode::from)
    }

    /// True for the values the renderer leaves out: null, `""` and `[]`
    pub fn is_blank(&self) -> bool {
        match self {
            DocumentNode::Null => true,
            DocumentNode::Text(text) => text.is_empty(),
            DocumentNode::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Look up a key in a mapping; `None` for missing keys and non-mappings
    pub fn get(&self, key: &str) -> Option<&DocumentNode> {
        match self {
            DocumentNode::Map(entries) => entries
                .iter()
                .find(|(entry_key, _)| entry_key == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Keys of a mapping in their original order
    pub fn keys(&self) -> Vec<&str> {
        match self {
            DocumentNode::Map(entries) => entries.iter().map(|(key, _)| key.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    /// Nesting depth; scalars and null count as 0
    pub fn depth(&self) -> usize {
        match self {
            DocumentNode::List(items) => 1 + items.iter().map(|n| n.depth()).max().unwrap_or(0),
            DocumentNode::Map(entries) => {
                1 + entries.iter().map(|(_, n)| n.depth()).max().unwrap_or(0)
            }
            _ => 0,
        }
    }

    /// Convert back into a `serde_json::Value`
    ///
    /// # Returns
    /// * `Value` - An equivalent JSON value; mapping entries are inserted in
    ///   order, so with `preserve_order` the key order is kept
    pub fn to_json(&self) -> Value {
        match self {
            DocumentNode::Null => Value::Null,
            DocumentNode::Bool(flag) => Value::Bool(*flag),
            DocumentNode::Number(number) => Value::Number(number.clone()),
            DocumentNode::Text(text) => Value::String(text.clone()),
            DocumentNode::List(items) => {
                Value::Array(items.iter().map(DocumentNode::to_json).collect())
            }
            DocumentNode::Map(entries) => {
                let mut map = Map::new();
                for (key, value) in entries {
                    map.insert(key.clone(), value.to_json());
                }
                Value::Object(map)
            }
        }
    }
}

impl From<Value> for DocumentNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => DocumentNode::Null,
            Value::Bool(flag) => DocumentNode::Bool(flag),
            Value::Number(number) => DocumentNode::Number(number),
            Value::String(text) => DocumentNode::Text(text),
            Value::Array(items) => {
                DocumentNode::List(items.into_iter().map(DocumentNode::from).collect())
            }
            Value::Object(map) => DocumentNode::Map(
                map.into_iter()
                    .map(|(key, value)| (key, DocumentNode::from(value)))
                    .collect(),
            ),
        }
    }
}

impl<'de> Deserialize<'de> for DocumentNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(DocumentNode::from)
    }
}

impl Serialize for DocumentNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}
