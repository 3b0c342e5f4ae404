//! Structural validation for parsed frameworks
//!
//! Checks a `ParsedFramework` for completeness before it is handed to
//! downstream consumers. Validation never fails as an operation: callers
//! always get the full list of problems and decide policy themselves
//! (reject the import, warn, repair).

use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{ControlType, ParsedFramework};

/// Result of framework validation
#[derive(Debug, Serialize, ToSchema)]
pub struct FrameworkValidationResult {
    /// Whether the framework passed validation
    pub is_valid: bool,
    /// Itemized structural errors, in check order
    pub errors: Vec<String>,
}

impl FrameworkValidationResult {
    /// Create a new validation result with no issues
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Add an error to the validation result
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }
}

/// Validate a parsed framework for structural completeness.
///
/// Checks, in order, accumulating all failures rather than short-circuiting:
/// 1. `name` is non-empty
/// 2. `controls` is non-empty
/// 3. every control has an id, a title, and a category
/// 4. every control's type is one of technical, operational, management
///
/// Parsers carry unrecognized control types through verbatim, so an import
/// that declared a bogus type is reported here, not silently rewritten.
pub fn validate_framework(framework: &ParsedFramework) -> FrameworkValidationResult {
    let mut result = FrameworkValidationResult::valid();

    if framework.name.trim().is_empty() {
        result.add_error("Framework name is required".to_string());
    }

    if framework.controls.is_empty() {
        result.add_error("Framework must contain at least one control".to_string());
    }

    for (index, control) in framework.controls.iter().enumerate() {
        let label = if control.id.trim().is_empty() {
            format!("control at position {}", index)
        } else {
            format!("control {}", control.id)
        };

        if control.id.trim().is_empty() {
            result.add_error(format!("Missing id for {}", label));
        }
        if control.title.trim().is_empty() {
            result.add_error(format!("Missing title for {}", label));
        }
        if control.category.trim().is_empty() {
            result.add_error(format!("Missing category for {}", label));
        }
        if let ControlType::Other(raw) = &control.control_type {
            result.add_error(format!(
                "Invalid control type '{}' for {} (expected technical, operational or management)",
                raw, label
            ));
        }
    }

    result
}
