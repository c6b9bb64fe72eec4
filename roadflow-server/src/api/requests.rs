//! Request bodies accepted by the gateway.
//!
//! Bodies are taken as raw JSON and checked field by field so that a missing
//! or mistyped field produces a readable `success: false` message instead of
//! a serde rejection. Ids and multipliers may also arrive as numeric strings,
//! which is what form-driven clients tend to send.

use roadflow_core::{JunctionId, TrafficUpdate};
use serde::Deserialize;
use serde_json::Value;

use super::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathRequest {
    pub source: JunctionId,
    pub destination: JunctionId,
}

impl PathRequest {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let object = as_object(body)?;
        Ok(Self {
            source: junction_id(object, "source")?,
            destination: junction_id(object, "destination")?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficRequest {
    pub from: JunctionId,
    pub to: JunctionId,
    pub multiplier: f64,
}

impl TrafficRequest {
    pub fn from_json(body: &Value) -> Result<Self, ApiError> {
        let object = as_object(body)?;
        Ok(Self {
            from: junction_id(object, "from")?,
            to: junction_id(object, "to")?,
            multiplier: multiplier(object, "multiplier")?,
        })
    }
}

impl From<TrafficRequest> for TrafficUpdate {
    fn from(request: TrafficRequest) -> Self {
        TrafficUpdate {
            from: request.from,
            to: request.to,
            multiplier: request.multiplier,
        }
    }
}

/// Query string of `GET /junctions/search`
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub name: Option<String>,
    pub prefix: Option<String>,
}

/// Query string of `GET /traffic/history`
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub from: JunctionId,
    pub to: JunctionId,
    pub limit: Option<usize>,
}

/// Query string of `GET /traffic/severe`
#[derive(Debug, Default, Deserialize)]
pub struct SevereQuery {
    pub threshold: Option<f64>,
}

/// Query string of `GET /traffic/analytics`
#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    pub top: Option<usize>,
}

type Object = serde_json::Map<String, Value>;

fn as_object(body: &Value) -> Result<&Object, ApiError> {
    body.as_object()
        .ok_or_else(|| ApiError::InvalidRequest("Request body must be a JSON object".into()))
}

fn field<'a>(object: &'a Object, name: &str) -> Result<&'a Value, ApiError> {
    match object.get(name) {
        None | Some(Value::Null) => Err(ApiError::InvalidRequest(format!(
            "Missing field '{name}'"
        ))),
        Some(value) => Ok(value),
    }
}

fn junction_id(object: &Object, name: &str) -> Result<JunctionId, ApiError> {
    let invalid = || ApiError::InvalidRequest(format!("Field '{name}' must be an integer junction id"));
    match field(object, name)? {
        Value::Number(number) => number.as_i64().ok_or_else(invalid),
        Value::String(text) => text.trim().parse().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

fn multiplier(object: &Object, name: &str) -> Result<f64, ApiError> {
    let invalid = || ApiError::InvalidRequest(format!("Field '{name}' must be a finite number"));
    let value = match field(object, name)? {
        Value::Number(number) => number.as_f64().ok_or_else(invalid)?,
        Value::String(text) => text.trim().parse::<f64>().map_err(|_| invalid())?,
        _ => return Err(invalid()),
    };
    if value.is_finite() { Ok(value) } else { Err(invalid()) }
}
