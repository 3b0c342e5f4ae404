//! JSON framework document parsing
//!
//! Control entries are coerced defensively: exports from other tools use a
//! mix of key names and leave optional fields out, so every field falls back
//! rather than failing. Structural problems (missing `name`, missing
//! `controls`) are still hard errors, reported distinctly from JSON syntax
//! errors.

use serde_json::Value;

use crate::model::{Control, ControlType, Criticality, FrameworkSource, ParsedFramework};
use crate::service::parser::error::ParseError;
use crate::service::parser::normalize_control_id;

/// Parse a JSON framework document into a normalized framework.
pub fn parse_json(document: &str) -> Result<ParsedFramework, ParseError> {
    let value: Value =
        serde_json::from_str(document).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

    let name = match value.get("name").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => return Err(ParseError::MissingField("name")),
    };

    let Some(raw_controls) = value.get("controls").and_then(Value::as_array) else {
        return Err(ParseError::MissingField("controls"));
    };

    let controls: Vec<Control> = raw_controls.iter().map(coerce_control).collect();
    let metadata = ParsedFramework::import_metadata(controls.len());

    Ok(ParsedFramework {
        name,
        version: str_field(&value, &["version"]).unwrap_or_default(),
        description: str_field(&value, &["description"]).unwrap_or_default(),
        source: FrameworkSource::JsonUpload,
        controls,
        metadata,
    })
}

/// Coerce a single control entry, falling back on every field.
fn coerce_control(entry: &Value) -> Control {
    let id = str_field(entry, &["id", "control_id"]).unwrap_or_default();

    Control {
        id: normalize_control_id(&id),
        category: str_field(entry, &["category"])
            .unwrap_or_else(|| "Uncategorized".to_string()),
        title: str_field(entry, &["title"]).unwrap_or_default(),
        description: str_field(entry, &["description"]).unwrap_or_default(),
        control_type: ControlType::from_import_value(
            &str_field(entry, &["controlType", "control_type"]).unwrap_or_default(),
        ),
        criticality: str_field(entry, &["criticality"])
            .and_then(|c| Criticality::from_import_value(&c)),
        related_controls: string_array(entry, &["relatedControls", "related_controls"]),
        objectives: string_array(entry, &["objectives"]),
    }
}

/// First non-empty string value found under any of the given keys.
fn str_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| value.get(k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Pass a list field through only when it is already an array.
fn string_array(value: &Value, keys: &[&str]) -> Option<Vec<String>> {
    keys.iter()
        .filter_map(|k| value.get(k).and_then(Value::as_array))
        .next()
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_complete_document() {
        let doc = r#"{
            "name": "Acme Security Baseline",
            "version": "2.1",
            "description": "Internal control set",
            "controls": [
                {
                    "id": "AC.1.1",
                    "category": "AC.1",
                    "title": "Account provisioning",
                    "description": "Accounts are provisioned on approval",
                    "controlType": "technical",
                    "criticality": "high",
                    "relatedControls": ["AC.1.2"],
                    "objectives": ["Limit access to authorized users"]
                }
            ]
        }"#;

        let framework = parse_json(doc).expect("valid document");
        assert_eq!(framework.name, "Acme Security Baseline");
        assert_eq!(framework.version, "2.1");
        assert_eq!(framework.controls.len(), 1);

        let control = &framework.controls[0];
        assert_eq!(control.id, "AC.1.1");
        assert_eq!(control.control_type, ControlType::Technical);
        assert_eq!(control.criticality, Some(Criticality::High));
        assert_eq!(control.related_controls.as_deref(), Some(&["AC.1.2".to_string()][..]));
    }

    #[test]
    fn malformed_json_is_a_distinct_error() {
        let err = parse_json("{not json").expect_err("syntax error");
        assert!(matches!(err, ParseError::InvalidJson(_)));
    }

    #[test]
    fn missing_name_fails() {
        let err = parse_json(r#"{"controls": []}"#).expect_err("no name");
        assert!(matches!(err, ParseError::MissingField("name")));
    }

    #[test]
    fn missing_controls_array_fails() {
        let err = parse_json(r#"{"name": "X"}"#).expect_err("no controls");
        assert!(matches!(err, ParseError::MissingField("controls")));
    }

    #[test]
    fn control_fields_are_coerced() {
        let doc = r#"{
            "name": "Sparse",
            "controls": [
                {"control_id": "C-1", "title": "Something"},
                {"relatedControls": "not-an-array", "objectives": 42}
            ]
        }"#;

        let framework = parse_json(doc).expect("valid document");
        assert_eq!(framework.controls[0].id, "C-1");
        assert_eq!(framework.controls[0].category, "Uncategorized");
        assert_eq!(framework.controls[0].control_type, ControlType::Operational);

        // Non-array list fields are dropped, not coerced
        assert_eq!(framework.controls[1].id, "");
        assert!(framework.controls[1].related_controls.is_none());
        assert!(framework.controls[1].objectives.is_none());
    }

    #[test]
    fn unknown_control_type_survives_coercion() {
        let doc = r#"{
            "name": "X",
            "controls": [{"id": "C-1", "title": "T", "controlType": "hybrid"}]
        }"#;
        let framework = parse_json(doc).expect("valid document");
        assert_eq!(
            framework.controls[0].control_type,
            ControlType::Other("hybrid".to_string())
        );
    }

    #[test]
    fn serialized_framework_round_trips() {
        let original = parse_json(
            r#"{
                "name": "Roundtrip",
                "version": "1.0",
                "controls": [
                    {"id": "A.5.1", "category": "A.5", "title": "Policy",
                     "description": "Policy control", "controlType": "management"},
                    {"id": "A.6.1", "category": "A.6", "title": "Segregation",
                     "description": "Separate duties", "controlType": "operational"}
                ]
            }"#,
        )
        .expect("valid document");

        let serialized = serde_json::to_string(&original).expect("serializable");
        let reparsed = parse_json(&serialized).expect("round-trip parses");

        assert_eq!(reparsed.name, original.name);
        assert_eq!(reparsed.controls.len(), original.controls.len());
        for (a, b) in original.controls.iter().zip(reparsed.controls.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.title, b.title);
            assert_eq!(a.category, b.category);
            assert_eq!(a.control_type, b.control_type);
        }
    }
}
