//! Reshaping of Fillout submissions
//!
//! Fillout delivers every sub-collection of a submission as a list of
//! `{ id, ... }` items. Downstream steps address items by id, so each list is
//! turned into a map from id to the remaining fields. Everything else in the
//! submission is passed through unchanged.

use crate::error::{FilloutError, FilloutResult};
use serde_json::{Map, Number, Value};

/// Sub-collections of a submission that are keyed by id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionCollection {
    Questions,
    Calculations,
    Documents,
    Scheduling,
    Payments,
    UrlParameters,
}

impl SubmissionCollection {
    pub const ALL: [SubmissionCollection; 6] = [
        Self::Questions,
        Self::Calculations,
        Self::Documents,
        Self::Scheduling,
        Self::Payments,
        Self::UrlParameters,
    ];

    pub fn field(&self) -> &'static str {
        match self {
            Self::Questions => "questions",
            Self::Calculations => "calculations",
            Self::Documents => "documents",
            Self::Scheduling => "scheduling",
            Self::Payments => "payments",
            Self::UrlParameters => "urlParameters",
        }
    }

    /// Fields dropped from each item besides the id
    fn stripped_fields(&self) -> &'static [&'static str] {
        match self {
            // widget type only adds noise downstream
            Self::Questions => &["type"],
            _ => &[],
        }
    }
}

/// Turn a list of `{ id, ...fields }` into `{ id: { ...fields } }`.
///
/// `None` and `null` yield an empty map. Later items win on duplicate ids.
pub fn transform_array_to_id_map(
    collection: SubmissionCollection,
    items: Option<&Value>,
) -> FilloutResult<Map<String, Value>> {
    let items = match items {
        None | Some(Value::Null) => return Ok(Map::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(FilloutError::invalid_collection(
                collection.field(),
                format!("expected a list, got {}", type_name(other)),
            ));
        }
    };

    let mut mapped = Map::new();
    for (index, item) in items.iter().enumerate() {
        let Value::Object(fields) = item else {
            return Err(FilloutError::invalid_collection(
                collection.field(),
                format!("item {} is {}, expected an object", index, type_name(item)),
            ));
        };

        let mut fields = fields.clone();
        let id = match fields.remove("id") {
            Some(Value::String(id)) => id,
            Some(Value::Number(id)) => number_key(&id),
            Some(other) => {
                return Err(FilloutError::invalid_collection(
                    collection.field(),
                    format!("item {} has a {} id", index, type_name(&other)),
                ));
            }
            None => {
                return Err(FilloutError::invalid_collection(
                    collection.field(),
                    format!("item {} has no id", index),
                ));
            }
        };

        for stripped in collection.stripped_fields() {
            fields.remove(*stripped);
        }

        mapped.insert(id, Value::Object(fields));
    }

    Ok(mapped)
}

/// Reshape one submission object
pub fn transform_submission(submission: Value) -> FilloutResult<Value> {
    let Value::Object(mut submission) = submission else {
        return Err(FilloutError::MissingSubmission);
    };

    for collection in SubmissionCollection::ALL {
        let mapped = transform_array_to_id_map(collection, submission.get(collection.field()))?;
        submission.insert(collection.field().to_string(), Value::Object(mapped));
    }

    Ok(Value::Object(submission))
}

/// Parse a raw webhook body and reshape the `submission` it carries
pub fn parse_webhook_body(body: &[u8]) -> FilloutResult<Value> {
    let payload: Value =
        serde_json::from_slice(body).map_err(|e| FilloutError::InvalidBody(e.to_string()))?;

    // Some hosts hand over the body as a JSON encoded string.
    let payload = match payload {
        Value::String(inner) => serde_json::from_str(&inner)
            .map_err(|e| FilloutError::InvalidBody(e.to_string()))?,
        other => other,
    };

    let submission = match payload {
        Value::Object(mut payload) => payload
            .remove("submission")
            .filter(|s| !s.is_null())
            .ok_or(FilloutError::MissingSubmission)?,
        _ => return Err(FilloutError::MissingSubmission),
    };

    transform_submission(submission)
}

/// Map key for a numeric id. Integral floats render without a fraction, so
/// `1.0` and `1` address the same item.
fn number_key(id: &Number) -> String {
    if id.is_f64()
        && let Some(value) = id.as_f64()
        && value.fract() == 0.0
        && value.abs() < 1e21
    {
        return format!("{}", value as i128);
    }
    id.to_string()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
