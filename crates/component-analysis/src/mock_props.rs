//! Mock property synthesis
//!
//! Generated components usually need props to render anything useful. The
//! preview feeds them deterministic sample values picked from the coarse
//! type label the extractor recorded for each prop.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::StructuralSummary;

/// A sample value for one prop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MockValue {
    Text(String),
    Number(i64),
    Bool(bool),
    List(Vec<String>),
    Record(BTreeMap<String, MockValue>),
    /// A callable that only reports that it was invoked
    Callback { name: String },
}

impl MockValue {
    /// The value as plain JSON (callbacks become their display string)
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            MockValue::Text(s) => serde_json::Value::String(s.clone()),
            MockValue::Number(n) => serde_json::Value::from(*n),
            MockValue::Bool(b) => serde_json::Value::Bool(*b),
            MockValue::List(items) => serde_json::Value::from(items.clone()),
            MockValue::Record(fields) => serde_json::Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            MockValue::Callback { name } => serde_json::Value::String(format!("[function {}]", name)),
        }
    }
}

/// Pick the sample value for a prop from its type label.
///
/// | label | value |
/// |---|---|
/// | `string` | `"Sample <key>"` |
/// | `number` | `42` |
/// | `boolean` | `true` |
/// | `array`, `T[]`, `Array<T>` | three placeholder items |
/// | `object` | `{ id: 1, name: "Sample Object" }` |
/// | `function`, `(..) => ..` | no-op callback |
/// | anything else | `"Mock <key>"` |
pub fn mock_value_for(key: &str, type_label: &str) -> MockValue {
    let label = type_label.trim();
    let lower = label.to_ascii_lowercase();

    if is_function_type(label, &lower) {
        return MockValue::Callback {
            name: key.to_string(),
        };
    }

    match lower.as_str() {
        "string" => MockValue::Text(format!("Sample {}", key)),
        "number" => MockValue::Number(42),
        "boolean" => MockValue::Bool(true),
        "object" => sample_record(),
        _ if is_array_type(label, &lower) => MockValue::List(
            ["Item 1", "Item 2", "Item 3"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        ),
        _ => MockValue::Text(format!("Mock {}", key)),
    }
}

fn is_function_type(label: &str, lower: &str) -> bool {
    lower == "function" || label.contains("=>")
}

fn is_array_type(label: &str, lower: &str) -> bool {
    lower == "array" || label.ends_with("[]") || label.starts_with("Array<")
}

fn sample_record() -> MockValue {
    let mut fields = BTreeMap::new();
    fields.insert("id".to_string(), MockValue::Number(1));
    fields.insert(
        "name".to_string(),
        MockValue::Text("Sample Object".to_string()),
    );
    MockValue::Record(fields)
}

/// Prop name -> sample value, regenerated whenever the summary changes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MockPropertySet(BTreeMap<String, MockValue>);

impl MockPropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive sample values for every prop in the summary
    pub fn from_summary(summary: &StructuralSummary) -> Self {
        Self(
            summary
                .props
                .iter()
                .map(|(key, label)| (key.clone(), mock_value_for(key, label)))
                .collect(),
        )
    }

    pub fn get(&self, key: &str) -> Option<&MockValue> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: MockValue) -> Option<MockValue> {
        self.0.insert(key.into(), value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &MockValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, MockValue)> for MockPropertySet {
    fn from_iter<I: IntoIterator<Item = (String, MockValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy() {
        assert_eq!(
            mock_value_for("title", "string"),
            MockValue::Text("Sample title".into())
        );
        assert_eq!(mock_value_for("count", "number"), MockValue::Number(42));
        assert_eq!(mock_value_for("open", "boolean"), MockValue::Bool(true));
        assert_eq!(
            mock_value_for("tags", "string[]"),
            MockValue::List(vec!["Item 1".into(), "Item 2".into(), "Item 3".into()])
        );
        assert!(matches!(
            mock_value_for("items", "Array<Item>"),
            MockValue::List(_)
        ));
        assert!(matches!(mock_value_for("user", "object"), MockValue::Record(_)));
        assert_eq!(
            mock_value_for("onClick", "() => void"),
            MockValue::Callback {
                name: "onClick".into()
            }
        );
        assert_eq!(
            mock_value_for("variant", "'primary' | 'secondary'"),
            MockValue::Text("Mock variant".into())
        );
        assert_eq!(
            mock_value_for("extra", "any"),
            MockValue::Text("Mock extra".into())
        );
    }

    #[test]
    fn test_from_summary_is_deterministic() {
        let mut summary = StructuralSummary::default();
        summary.props.insert("label".into(), "string".into());
        summary.props.insert("count".into(), "number".into());

        let a = MockPropertySet::from_summary(&summary);
        let b = MockPropertySet::from_summary(&summary);
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
        assert_eq!(a.get("label"), Some(&MockValue::Text("Sample label".into())));
    }

    #[test]
    fn test_to_json() {
        let record = sample_record().to_json();
        assert_eq!(record, serde_json::json!({"id": 1, "name": "Sample Object"}));
    }

    #[test]
    fn test_serde_shape() {
        let mut set = MockPropertySet::new();
        set.insert("count", MockValue::Number(42));
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json, serde_json::json!({"count": {"kind": "number", "value": 42}}));

        let back: MockPropertySet = serde_json::from_value(json).unwrap();
        assert_eq!(back, set);
    }
}
