//! HTTP API assertions.
//!
//! Body assertions look at the raw text, as an operator running `curl`
//! would. JSON assertions parse the body and navigate it with a
//! [`JsonPath`]; a path that does not resolve is a mismatch naming where the
//! path broke off.

use super::filesystem::compile;
use super::{quoted, ApiRequest, Outcome};
use crate::error::ProbeError;
use crate::http::{Api, ApiResponse, JsonPath, Lookup};
use serde_json::Value;

fn fetch(api: &dyn Api, request: &ApiRequest) -> Result<ApiResponse, ProbeError> {
    api.get(&request.path, &request.credentials)
}

fn describe(request: &ApiRequest, response: &ApiResponse) -> String {
    format!(
        "GET {} as {} ({})",
        request.path, request.credentials.username, response.status
    )
}

/// Decode the body as JSON.
///
/// An error page (non-2xx status with a body that is not JSON) is an answer,
/// not a broken check, and comes back as `Err(Mismatch)`. A 2xx body that is
/// not JSON is a [`ProbeError::InvalidJson`].
fn parse(
    request: &ApiRequest,
    response: &ApiResponse,
    what: &str,
) -> Result<Result<Value, Outcome>, ProbeError> {
    match serde_json::from_str(&response.body) {
        Ok(value) => Ok(Ok(value)),
        Err(_) if !response.is_success() => Ok(Err(Outcome::Mismatch(format!(
            "{}: body is not JSON",
            what
        )))),
        Err(e) => Err(ProbeError::InvalidJson {
            path: request.path.clone(),
            message: e.to_string(),
        }),
    }
}

/// The response body contains `literal`.
pub fn body_contains(
    api: &dyn Api,
    request: &ApiRequest,
    literal: &str,
) -> Result<Outcome, ProbeError> {
    let response = fetch(api, request)?;
    let what = describe(request, &response);
    Ok(if response.body.contains(literal) {
        Outcome::Match(format!("{} contains {}", what, quoted(literal)))
    } else {
        Outcome::Mismatch(format!("{} does not contain {}", what, quoted(literal)))
    })
}

/// The response body matches `pattern`.
pub fn body_matches(
    api: &dyn Api,
    request: &ApiRequest,
    pattern: &str,
) -> Result<Outcome, ProbeError> {
    let regex = compile(pattern)?;
    let response = fetch(api, request)?;
    let what = describe(request, &response);
    Ok(if regex.is_match(&response.body) {
        Outcome::Match(format!("{} matches /{}/", what, pattern))
    } else {
        Outcome::Mismatch(format!("{} does not match /{}/", what, pattern))
    })
}

/// The JSON value at `path` equals `expected`.
pub fn json_equals(
    api: &dyn Api,
    request: &ApiRequest,
    path: &JsonPath,
    expected: &Value,
) -> Result<Outcome, ProbeError> {
    let response = fetch(api, request)?;
    let what = describe(request, &response);
    let value = match parse(request, &response, &what)? {
        Ok(value) => value,
        Err(mismatch) => return Ok(mismatch),
    };

    Ok(match path.lookup(&value) {
        Lookup::Found(actual) if actual == expected => {
            Outcome::Match(format!("{}: {} is {}", what, path, actual))
        }
        Lookup::Found(actual) => Outcome::Mismatch(format!(
            "{}: {} is {}, expected {}",
            what, path, actual, expected
        )),
        Lookup::Missing { at } => {
            Outcome::Mismatch(format!("{}: key path {} is absent", what, at))
        }
    })
}

/// The JSON body has a value at `path`.
pub fn json_has_path(
    api: &dyn Api,
    request: &ApiRequest,
    path: &JsonPath,
) -> Result<Outcome, ProbeError> {
    let response = fetch(api, request)?;
    let what = describe(request, &response);
    let value = match parse(request, &response, &what)? {
        Ok(value) => value,
        Err(mismatch) => return Ok(mismatch),
    };

    Ok(match path.lookup(&value) {
        Lookup::Found(_) => Outcome::Match(format!("{}: {} is present", what, path)),
        Lookup::Missing { at } => {
            Outcome::Mismatch(format!("{}: key path {} is absent", what, at))
        }
    })
}
