//! Pre-flight validation of diagram and config documents
//!
//! The layout and draw passes assume a validated tree, so this gate runs
//! first and collects every violation it can find (not just the first),
//! each tagged with the instance path of the offending value.

use serde_json::Value;
use thiserror::Error;

use crate::model::{Config, Diagram, Element, Style};

/// A single schema violation, located by instance path
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// JSON-pointer-ish location, e.g. `/elements/3/style/strokeWidth`
    pub path: String,
    pub message: String,
}

impl Violation {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Errors produced by the validation gate
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The input was not JSON at all
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The input was JSON but violated the document schema
    #[error("schema validation failed:\n{}", format_violations(.0))]
    Invalid(Vec<Violation>),
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse and validate a diagram document from JSON text
pub fn parse_diagram(input: &str) -> Result<Diagram, SchemaError> {
    let value: Value = serde_json::from_str(input)?;
    diagram_from_value(value)
}

/// Validate a diagram document from an already-parsed JSON value
pub fn diagram_from_value(value: Value) -> Result<Diagram, SchemaError> {
    let mut violations = Vec::new();

    let Value::Object(mut fields) = value else {
        return Err(SchemaError::Invalid(vec![Violation::new(
            "root",
            "document must be an object",
        )]));
    };

    let raw_elements = match fields.remove("elements") {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(SchemaError::Invalid(vec![Violation::new(
                "/elements",
                "must be an array",
            )]))
        }
        None => {
            return Err(SchemaError::Invalid(vec![Violation::new(
                "root",
                "missing required field 'elements'",
            )]))
        }
    };
    for key in fields.keys() {
        violations.push(Violation::new("root", format!("unknown field '{}'", key)));
    }

    let mut elements = Vec::with_capacity(raw_elements.len());
    for (index, raw) in raw_elements.into_iter().enumerate() {
        let path = format!("/elements/{}", index);
        match Element::from_value(raw) {
            Ok(element) => {
                check_element(&element, &path, &mut violations);
                elements.push(element);
            }
            Err(message) => violations.push(Violation::new(path, message)),
        }
    }

    if violations.is_empty() {
        Ok(Diagram { elements })
    } else {
        Err(SchemaError::Invalid(violations))
    }
}

/// Parse and validate a config document from JSON text
pub fn parse_config(input: &str) -> Result<Config, SchemaError> {
    let value: Value = serde_json::from_str(input)?;
    let config: Config = serde_json::from_value(value)
        .map_err(|e| SchemaError::Invalid(vec![Violation::new("root", e.to_string())]))?;
    if config.padding < 0.0 {
        return Err(SchemaError::Invalid(vec![Violation::new(
            "/padding",
            "must be >= 0",
        )]));
    }
    Ok(config)
}

/// Range and arity checks that the type-driven decoding cannot express
fn check_element(element: &Element, path: &str, violations: &mut Vec<Violation>) {
    if let Some(style) = element.style() {
        check_style(style, path, violations);
    }
    match element {
        Element::Line(line) => {
            if line.points.len() < 2 {
                violations.push(Violation::new(
                    format!("{}/points", path),
                    "must have at least 2 points",
                ));
            }
        }
        Element::Shape(shape) => {
            for (index, child) in shape.children.iter().enumerate() {
                check_element(child, &format!("{}/children/{}", path, index), violations);
            }
        }
        Element::Text(_) | Element::Arrow(_) => {}
    }
}

fn check_style(style: &Style, element_path: &str, violations: &mut Vec<Violation>) {
    let mut check_range = |field: &str, value: Option<f64>, min: f64, max: f64| {
        let Some(value) = value else { return };
        if value < min {
            violations.push(Violation::new(
                format!("{}/style/{}", element_path, field),
                format!("must be >= {}", min),
            ));
        } else if value > max {
            violations.push(Violation::new(
                format!("{}/style/{}", element_path, field),
                format!("must be <= {}", max),
            ));
        }
    };
    check_range("strokeWidth", style.stroke_width, 1.0, 4.0);
    check_range("roughness", style.roughness, 0.0, 2.0);
    check_range("opacity", style.opacity, 0.0, 100.0);
}
