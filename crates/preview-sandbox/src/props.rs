//! Mock props as a JavaScript expression
//!
//! Props cannot cross into the engine as JSON because callbacks must be real
//! functions, so they are written out as an object literal instead.

use component_analysis::{MockPropertySet, MockValue};

use crate::transpile::json_string;

/// Render mock props as a JavaScript object literal
pub fn to_js_literal(props: &MockPropertySet) -> String {
    let fields: Vec<String> = props
        .iter()
        .map(|(key, value)| format!("{}: {}", json_string(key), value_literal(value)))
        .collect();
    format!("{{{}}}", fields.join(", "))
}

fn value_literal(value: &MockValue) -> String {
    match value {
        MockValue::Callback { name } => format!("__preview.callback({})", json_string(name)),
        MockValue::Record(fields) => {
            let fields: Vec<String> = fields
                .iter()
                .map(|(key, value)| format!("{}: {}", json_string(key), value_literal(value)))
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
        other => other.to_json().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal() {
        let mut props = MockPropertySet::new();
        props.insert("title", MockValue::Text("Sample title".into()));
        props.insert("count", MockValue::Number(42));
        props.insert("onClick", MockValue::Callback { name: "onClick".into() });
        props.insert("tags", MockValue::List(vec!["Item 1".into()]));

        assert_eq!(
            to_js_literal(&props),
            r#"{"count": 42, "onClick": __preview.callback("onClick"), "tags": ["Item 1"], "title": "Sample title"}"#
        );
    }

    #[test]
    fn test_empty_literal() {
        assert_eq!(to_js_literal(&MockPropertySet::new()), "{}");
    }
}
