//! JSON Schema of the `AnalyzeResult` wire contract.

use serde_json::{json, Value};

/// Identifier logged with every verification run.
pub const SCHEMA_ID: &str = "labelscan-analyze-result-v1";

/// The schema the presentation layer relies on.
///
/// `score` is an integer on the wire even though it is a float internally.
/// Unknown top-level fields are rejected so additions are deliberate.
pub fn analyze_result_schema() -> Value {
    let risk_level = json!({
        "type": "string",
        "enum": ["Low Risk", "Medium Risk", "High Risk"]
    });

    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "type": "object",
        "required": [
            "score",
            "risk_classification",
            "flagged_ingredients",
            "unknown_ingredients",
            "summary",
            "total_ingredients",
            "conflict_count"
        ],
        "additionalProperties": false,
        "properties": {
            "score": { "type": "integer", "minimum": 0, "maximum": 100 },
            "risk_classification": risk_level.clone(),
            "flagged_ingredients": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["ingredient", "risk_level", "reasons", "severity"],
                    "additionalProperties": false,
                    "properties": {
                        "ingredient": { "type": "string", "minLength": 1 },
                        "risk_level": risk_level,
                        "reasons": {
                            "type": "array",
                            "minItems": 1,
                            "items": { "type": "string", "minLength": 1 }
                        },
                        "severity": { "type": "number", "minimum": 0, "maximum": 1 }
                    }
                }
            },
            "unknown_ingredients": {
                "type": "array",
                "items": { "type": "string", "minLength": 1 }
            },
            "summary": { "type": "string", "minLength": 1 },
            "total_ingredients": { "type": "integer", "minimum": 0 },
            "conflict_count": { "type": "integer", "minimum": 0 },
            "audio_base64": { "type": "string" }
        }
    })
}
