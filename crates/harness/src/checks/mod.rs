//! Request/response contract checks.
//!
//! Each check performs exactly one HTTP call, validates the status code
//! against the endpoint's expected set, and validates the body shape. A
//! failed assertion aborts that check only; nothing is retried.
//!
//! Expected status sets per operation kind:
//! - read: `{200}`
//! - create: `{200, 201}`
//! - update: `{200, 204}`
//! - delete: `{200, 204, 404}` (caller-idempotent; already-deleted is fine)

pub mod favourites;
pub mod gateway;
pub mod products;
pub mod users;

use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::HarnessError;

pub(crate) const READ_OK: &[StatusCode] = &[StatusCode::OK];
pub(crate) const CREATE_OK: &[StatusCode] = &[StatusCode::OK, StatusCode::CREATED];
pub(crate) const UPDATE_OK: &[StatusCode] = &[StatusCode::OK, StatusCode::NO_CONTENT];
pub(crate) const DELETE_OK: &[StatusCode] = &[
    StatusCode::OK,
    StatusCode::NO_CONTENT,
    StatusCode::NOT_FOUND,
];

/// Validate a response status against the operation's expected set.
pub(crate) fn expect_status(
    response: &Response,
    expected: &'static [StatusCode],
    context: &str,
) -> Result<(), HarnessError> {
    let status = response.status();
    if expected.contains(&status) {
        Ok(())
    } else {
        Err(HarnessError::UnexpectedStatus {
            context: context.to_string(),
            status,
            expected,
        })
    }
}

/// Decode a JSON body into the expected shape.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: Response,
    context: &str,
) -> Result<T, HarnessError> {
    response
        .json::<T>()
        .await
        .map_err(|e| HarnessError::Decode {
            context: context.to_string(),
            message: e.to_string(),
        })
}

/// Assert that a submitted field was echoed back unchanged.
pub(crate) fn ensure_echo<T: PartialEq + std::fmt::Debug>(
    context: &str,
    field: &'static str,
    expected: &T,
    actual: &T,
) -> Result<(), HarnessError> {
    if expected == actual {
        Ok(())
    } else {
        Err(HarnessError::FieldMismatch {
            context: context.to_string(),
            field,
            expected: format!("{expected:?}"),
            actual: format!("{actual:?}"),
        })
    }
}
