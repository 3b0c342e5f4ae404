//! CSV framework document parsing
//!
//! Header-driven, positional comma split. Quoted fields are not supported:
//! a description containing an embedded comma will shift the remaining
//! columns. This is the documented contract of the CSV path, not an
//! oversight; inputs are expected to keep fields comma-free.

use crate::model::{Control, ControlType, Criticality, FrameworkSource, ParsedFramework};
use crate::service::parser::error::ParseError;
use crate::service::parser::{extract_category_from_control_id, normalize_control_id};

const REQUIRED_COLUMNS: &[&str] = &["control_id", "category", "title"];

/// Parse a CSV framework document into a normalized framework.
///
/// The first line is a header row matched case-insensitively against the
/// known column names. Blank lines are skipped.
pub fn parse_csv(document: &str) -> Result<ParsedFramework, ParseError> {
    let lines: Vec<&str> = document.lines().collect();
    if lines.len() < 2 {
        return Err(ParseError::CsvTooShort);
    }

    let header: Vec<String> = lines[0]
        .split(',')
        .map(|h| h.trim().to_lowercase())
        .collect();

    let col = |name: &str| header.iter().position(|h| h == name);
    let (Some(id_idx), Some(category_idx), Some(title_idx)) =
        (col("control_id"), col("category"), col("title"))
    else {
        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| col(name).is_none())
            .copied()
            .collect();
        return Err(ParseError::CsvMissingColumns(missing.join(", ")));
    };
    let description_idx = col("description");
    let control_type_idx = col("control_type");
    let criticality_idx = col("criticality");

    let field = |fields: &[&str], idx: Option<usize>| -> String {
        idx.and_then(|i| fields.get(i))
            .map(|f| f.trim().to_string())
            .unwrap_or_default()
    };

    let mut controls = Vec::new();
    for line in lines.iter().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();

        let id = normalize_control_id(&field(&fields, Some(id_idx)));
        let mut category = field(&fields, Some(category_idx));
        if category.is_empty() {
            category = extract_category_from_control_id(&id);
        }

        controls.push(Control {
            id,
            category,
            title: field(&fields, Some(title_idx)),
            description: field(&fields, description_idx),
            control_type: ControlType::from_import_value(&field(&fields, control_type_idx)),
            criticality: Criticality::from_import_value(&field(&fields, criticality_idx)),
            related_controls: None,
            objectives: None,
        });
    }

    let metadata = ParsedFramework::import_metadata(controls.len());

    Ok(ParsedFramework {
        name: "Custom Framework (CSV Import)".to_string(),
        version: "1.0".to_string(),
        description: format!("Imported from CSV with {} controls", controls.len()),
        source: FrameworkSource::CsvUpload,
        controls,
        metadata,
    })
}
