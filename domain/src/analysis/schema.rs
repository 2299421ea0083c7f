//! Response-shape contract for the structured analysis call.
//!
//! [`AnalysisSchema`] is both halves of the contract: the schema document
//! declared to the generation service alongside the prompt, and the check
//! applied to whatever text comes back. The check runs whether or not the
//! service enforced the schema itself.

use super::result::{AnalysisResult, ChartType};
use serde_json::{Map, Value, json};
use thiserror::Error;

/// Ways a response can violate the analysis contract
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    #[error("response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("required field '{0}' is missing")]
    MissingField(&'static str),

    #[error("field '{field}' has the wrong shape: {detail}")]
    WrongType { field: &'static str, detail: String },
}

/// The analysis response schema
pub struct AnalysisSchema;

impl AnalysisSchema {
    /// Fields a conforming response must carry. `impactScore` is absent on
    /// purpose: it is best-effort metadata.
    pub const REQUIRED: [&'static str; 7] = [
        "title",
        "executiveSummary",
        "operationalInsights",
        "toolSuggestions",
        "chartData",
        "chartType",
        "chartTitle",
    ];

    const IMPACT_SCORE: &'static str = "impactScore";

    /// Schema document in the generation service's OpenAPI subset
    pub fn document() -> Value {
        let chart_types: Vec<&str> = ChartType::all().iter().map(|c| c.as_str()).collect();

        json!({
            "type": "OBJECT",
            "properties": {
                "title": {
                    "type": "STRING",
                    "description": "A catchy title for the analysis"
                },
                "executiveSummary": {
                    "type": "STRING",
                    "description": "Short, high-level summary for executives to make decisions."
                },
                "operationalInsights": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "List of easy-to-understand points for operational staff."
                },
                "toolSuggestions": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" },
                    "description": "List of software/AI tools or scripts I should build/use to solve these problems, fitting my job scope."
                },
                "chartType": {
                    "type": "STRING",
                    "enum": chart_types
                },
                "chartTitle": { "type": "STRING" },
                "chartData": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "name": { "type": "STRING" },
                            "value": { "type": "NUMBER" },
                            "category": { "type": "STRING" }
                        },
                        "required": ["name", "value"]
                    }
                },
                "impactScore": {
                    "type": "NUMBER",
                    "description": "A score 0-100 of how impactful this analysis is."
                }
            },
            "required": Self::REQUIRED
        })
    }

    /// Parse and validate a raw response body.
    ///
    /// All-or-nothing: either a complete [`AnalysisResult`] or a violation.
    /// A non-numeric `impactScore` is dropped rather than rejected.
    pub fn parse(raw: &str) -> Result<AnalysisResult, SchemaViolation> {
        let value: Value = serde_json::from_str(raw.trim())
            .map_err(|e| SchemaViolation::InvalidJson(e.to_string()))?;

        let Value::Object(mut object) = value else {
            return Err(SchemaViolation::NotAnObject);
        };

        for field in Self::REQUIRED {
            match object.get(field) {
                None | Some(Value::Null) => return Err(SchemaViolation::MissingField(field)),
                Some(_) => {}
            }
        }

        if object
            .get(Self::IMPACT_SCORE)
            .is_some_and(|score| !score.is_number())
        {
            object.remove(Self::IMPACT_SCORE);
        }

        Self::check_field_shapes(&object)?;

        serde_json::from_value(Value::Object(object)).map_err(|e| SchemaViolation::WrongType {
            field: "response",
            detail: e.to_string(),
        })
    }

    fn check_field_shapes(object: &Map<String, Value>) -> Result<(), SchemaViolation> {
        for field in ["title", "executiveSummary", "chartTitle"] {
            if !object[field].is_string() {
                return Err(wrong_type(field, "expected a string"));
            }
        }

        for field in ["operationalInsights", "toolSuggestions"] {
            let is_string_list = object[field]
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string));
            if !is_string_list {
                return Err(wrong_type(field, "expected an array of strings"));
            }
        }

        let chart_type = object["chartType"].as_str().unwrap_or_default();
        if !ChartType::all().iter().any(|c| c.as_str() == chart_type) {
            return Err(wrong_type(
                "chartType",
                format!("{} is not one of bar, line, pie", object["chartType"]),
            ));
        }

        let Some(points) = object["chartData"].as_array() else {
            return Err(wrong_type("chartData", "expected an array"));
        };
        for (i, point) in points.iter().enumerate() {
            let valid = point.get("name").is_some_and(Value::is_string)
                && point.get("value").is_some_and(Value::is_number);
            if !valid {
                return Err(wrong_type(
                    "chartData",
                    format!("point {} needs a string 'name' and a numeric 'value'", i),
                ));
            }
        }

        Ok(())
    }
}

fn wrong_type(field: &'static str, detail: impl Into<String>) -> SchemaViolation {
    SchemaViolation::WrongType {
        field,
        detail: detail.into(),
    }
}
