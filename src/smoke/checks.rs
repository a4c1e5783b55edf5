//! The six test groups run against the service.
//!
//! A group returns `Ok(true)` only when every call in it answered 200 and
//! carried the fields the group looks for. Per-call problems (transport,
//! bad JSON, missing field) are printed and turn the group into a fail;
//! `Err` is reserved for failing to write the report itself.

use std::io::Write;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::SmokeError;

use super::client::{Reply, ServiceClient};

pub const WEB_PAGES: [&str; 2] = ["/", "/dashboard"];
pub const VISUALIZATIONS: [&str; 4] = ["correlation", "distribution", "pairplot", "performance"];

/// Body for `/api/generate_data`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateDataRequest {
    pub samples: u32,
}

impl Default for GenerateDataRequest {
    fn default() -> Self {
        Self { samples: 1000 }
    }
}

/// Body for `/api/predict`.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionRequest {
    pub age: u32,
    pub income: u32,
    pub education_years: u32,
    pub experience: f64,
    pub satisfaction_score: f64,
    pub performance_rating: u32,
}

impl Default for PredictionRequest {
    fn default() -> Self {
        Self {
            age: 30,
            income: 55000,
            education_years: 16,
            experience: 8.5,
            satisfaction_score: 7.5,
            performance_rating: 4,
        }
    }
}

// ---------------------------------------------------------------------------
// Group registry
// ---------------------------------------------------------------------------

pub type CheckFn = fn(&ServiceClient, &mut dyn Write) -> Result<bool, SmokeError>;

/// Run order and display names.
pub const TEST_GROUPS: [(&str, CheckFn); 6] = [
    ("Web Pages", check_web_pages),
    ("Health Check", check_health),
    ("Data Generation", check_data_generation),
    ("Model Training", check_model_training),
    ("Prediction", check_prediction),
    ("Visualization", check_visualizations),
];

// ---------------------------------------------------------------------------
// JSON helpers
// ---------------------------------------------------------------------------

/// Look up a `/`-separated field path, e.g. `stats/shape`.
pub fn require<'a>(value: &'a JsonValue, path: &str) -> Result<&'a JsonValue, SmokeError> {
    let pointer = format!("/{path}");
    value
        .pointer(&pointer)
        .ok_or_else(|| SmokeError::MissingField(path.replace('/', ".")))
}

fn require_object<'a>(
    value: &'a JsonValue,
    path: &str,
) -> Result<&'a serde_json::Map<String, JsonValue>, SmokeError> {
    require(value, path)?
        .as_object()
        .ok_or_else(|| SmokeError::UnexpectedType {
            field: path.to_string(),
            expected: "an object",
        })
}

fn require_array<'a>(value: &'a JsonValue, path: &str) -> Result<&'a Vec<JsonValue>, SmokeError> {
    require(value, path)?
        .as_array()
        .ok_or_else(|| SmokeError::UnexpectedType {
            field: path.to_string(),
            expected: "an array",
        })
}

/// Human rendering: strings unquoted, arrays as `[a, b]`.
pub fn display(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(items) => {
            let items: Vec<String> = items.iter().map(display).collect();
            format!("[{}]", items.join(", "))
        }
        other => other.to_string(),
    }
}

fn marker(ok: bool) -> &'static str {
    if ok {
        "✅"
    } else {
        "❌"
    }
}

/// Print the status line for a JSON call and, on 200, its detail lines.
///
/// `details` extracts `(label, text)` pairs from the parsed body; any error it
/// returns is printed as a failure of the call.
fn json_call(
    out: &mut dyn Write,
    label: &str,
    reply: Result<Reply, SmokeError>,
    details: impl FnOnce(&JsonValue) -> Result<Vec<(&'static str, String)>, SmokeError>,
) -> Result<bool, SmokeError> {
    let reply = match reply {
        Ok(reply) => reply,
        Err(err) => {
            writeln!(out, "❌ {label} failed: {err}")?;
            return Ok(false);
        }
    };

    writeln!(out, "{} {label}: {}", marker(reply.is_ok()), reply.status)?;
    if !reply.is_ok() {
        return Ok(false);
    }

    match reply.json().and_then(|body| details(&body)) {
        Ok(lines) => {
            for (name, text) in lines {
                writeln!(out, "   {name}: {text}")?;
            }
            Ok(true)
        }
        Err(err) => {
            writeln!(out, "❌ {label} failed: {err}")?;
            Ok(false)
        }
    }
}

/// Print one status line per plain GET; true when all answered 200.
fn status_calls(
    out: &mut dyn Write,
    targets: impl IntoIterator<Item = (String, Result<Reply, SmokeError>)>,
) -> Result<bool, SmokeError> {
    let mut all_ok = true;
    for (label, reply) in targets {
        match reply {
            Ok(reply) => {
                writeln!(out, "{} {label}: {}", marker(reply.is_ok()), reply.status)?;
                all_ok &= reply.is_ok();
            }
            Err(err) => {
                writeln!(out, "❌ {label} failed: {err}")?;
                all_ok = false;
            }
        }
    }
    Ok(all_ok)
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

pub fn check_web_pages(client: &ServiceClient, out: &mut dyn Write) -> Result<bool, SmokeError> {
    status_calls(
        out,
        WEB_PAGES
            .iter()
            .map(|page| (format!("Page ({page})"), client.get_page(page))),
    )
}

pub fn check_health(client: &ServiceClient, out: &mut dyn Write) -> Result<bool, SmokeError> {
    json_call(out, "Health Check", client.get_api("/health"), |body| {
        Ok(vec![
            ("Status", display(require(body, "status")?)),
            ("Service", display(require(body, "service")?)),
        ])
    })
}

pub fn check_data_generation(
    client: &ServiceClient,
    out: &mut dyn Write,
) -> Result<bool, SmokeError> {
    let reply = client.post_api_json("/generate_data", &GenerateDataRequest::default());
    json_call(out, "Data Generation", reply, |body| {
        Ok(vec![
            ("Success", display(require(body, "success")?)),
            ("Shape", display(require(body, "stats/shape")?)),
        ])
    })
}

pub fn check_model_training(
    client: &ServiceClient,
    out: &mut dyn Write,
) -> Result<bool, SmokeError> {
    json_call(out, "Model Training", client.post_api_empty("/train_models"), |body| {
        let success = display(require(body, "success")?);
        let models: Vec<&String> = require_object(body, "results")?.keys().collect();
        Ok(vec![("Success", success), ("Models", format!("{models:?}"))])
    })
}

pub fn check_prediction(client: &ServiceClient, out: &mut dyn Write) -> Result<bool, SmokeError> {
    let reply = client.post_api_json("/predict", &PredictionRequest::default());
    json_call(out, "Prediction", reply, |body| {
        Ok(vec![
            ("Success", display(require(body, "success")?)),
            ("Predictions", require_array(body, "predictions")?.len().to_string()),
        ])
    })
}

pub fn check_visualizations(
    client: &ServiceClient,
    out: &mut dyn Write,
) -> Result<bool, SmokeError> {
    status_calls(
        out,
        VISUALIZATIONS.iter().map(|kind| {
            (
                format!("Visualization ({kind})"),
                client.get_api(&format!("/visualize/{kind}")),
            )
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_fields_are_found() {
        let body = json!({"success": true, "stats": {"shape": [1000, 8]}});
        assert_eq!(display(require(&body, "stats/shape").unwrap()), "[1000, 8]");
        assert!(matches!(
            require(&body, "stats/columns"),
            Err(SmokeError::MissingField(f)) if f == "stats.columns"
        ));
    }

    #[test]
    fn wrong_container_types_are_rejected() {
        let body = json!({"results": [1, 2], "predictions": {"a": 1}});
        assert!(matches!(
            require_object(&body, "results"),
            Err(SmokeError::UnexpectedType { expected: "an object", .. })
        ));
        assert!(matches!(
            require_array(&body, "predictions"),
            Err(SmokeError::UnexpectedType { expected: "an array", .. })
        ));
    }

    #[test]
    fn display_unquotes_strings() {
        assert_eq!(display(&json!("healthy")), "healthy");
        assert_eq!(display(&json!(true)), "true");
        assert_eq!(display(&json!(["a", 1])), "[a, 1]");
    }

    #[test]
    fn prediction_payload_matches_the_service_fields() {
        let value = serde_json::to_value(PredictionRequest::default()).unwrap();
        for field in [
            "age",
            "income",
            "education_years",
            "experience",
            "satisfaction_score",
            "performance_rating",
        ] {
            assert!(value.get(field).is_some(), "missing {field}");
        }
        assert_eq!(value["experience"], 8.5);
        assert_eq!(
            serde_json::to_value(GenerateDataRequest::default()).unwrap(),
            json!({"samples": 1000})
        );
    }

    #[test]
    fn non_200_json_call_fails_without_details() {
        let mut out = Vec::new();
        let reply = Ok(Reply {
            status: 500,
            body: "{}".to_string(),
        });
        let ok = json_call(&mut out, "Health Check", reply, |_| Ok(vec![])).unwrap();
        assert!(!ok);
        assert_eq!(String::from_utf8(out).unwrap(), "❌ Health Check: 500\n");
    }

    #[test]
    fn missing_field_fails_a_200_call() {
        let mut out = Vec::new();
        let reply = Ok(Reply {
            status: 200,
            body: r#"{"status":"ok"}"#.to_string(),
        });
        let ok = json_call(&mut out, "Health Check", reply, |body| {
            Ok(vec![
                ("Status", display(require(body, "status")?)),
                ("Service", display(require(body, "service")?)),
            ])
        })
        .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(!ok);
        assert!(text.contains("✅ Health Check: 200"));
        assert!(text.contains("❌ Health Check failed: missing field 'service'"));
    }
}
