//! Query encoding for list options.
//!
//! Options types declare their parameter names with `#[serde(rename = "...")]`
//! and are flattened into `key=value` pairs. Fields left at their zero value
//! are never sent: the API treats an absent parameter differently from an
//! explicit `0` or empty string.

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::ClientError;

/// Appends the parameters set in `options` as the query string of `path`.
///
/// Returns `path` unchanged when `options` is `None`. Any query already present
/// on `path` is replaced. Parameters are emitted in name order; list values
/// repeat the parameter once per element.
pub fn add_options<O>(path: &str, options: Option<&O>) -> Result<String, ClientError>
where
    O: Serialize + ?Sized,
{
    let Some(options) = options else {
        return Ok(path.to_owned());
    };

    let pairs = query_pairs(options)?;
    let base = path.split_once('?').map_or(path, |(base, _)| base);
    if pairs.is_empty() {
        return Ok(base.to_owned());
    }

    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    Ok(format!("{base}?{query}"))
}

/// Flattens `options` into the non-zero query parameters it declares.
fn query_pairs<O>(options: &O) -> Result<Vec<(String, String)>, ClientError>
where
    O: Serialize + ?Sized,
{
    let value = serde_json::to_value(options)
        .map_err(|err| ClientError::InvalidQueryOptions(err.to_string()))?;
    let fields = match value {
        Value::Object(fields) => fields,
        Value::Null => return Ok(Vec::new()),
        other => {
            return Err(ClientError::InvalidQueryOptions(format!(
                "expected a struct of parameters, got {other}"
            )));
        }
    };

    let mut pairs = Vec::with_capacity(fields.len());
    for (name, value) in fields {
        if let Value::Array(values) = value {
            for value in values {
                if let Some(param) = scalar_param(&name, value)? {
                    pairs.push((name.clone(), param));
                }
            }
        } else if let Some(param) = scalar_param(&name, value)? {
            pairs.push((name, param));
        }
    }
    pairs.sort_by(|(left, _), (right, _)| left.cmp(right));
    Ok(pairs)
}

fn scalar_param(name: &str, value: Value) -> Result<Option<String>, ClientError> {
    match value {
        Value::Null | Value::Bool(false) => Ok(None),
        Value::Bool(true) => Ok(Some("true".to_owned())),
        Value::String(text) if text.is_empty() => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Number(number) if number.as_u64() == Some(0) || number.as_i64() == Some(0) => {
            Ok(None)
        }
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Array(_) | Value::Object(_) => Err(ClientError::InvalidQueryOptions(format!(
            "parameter '{name}' must be a scalar or a list of scalars"
        ))),
    }
}
