// src/api/response.rs
//! Turns transport responses into typed results or structured errors.

use super::transport::HttpResponse;
use crate::constants::BODY_PREVIEW_LENGTH;
use crate::error::{ApiErrorCode, Error, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::ops::Deref;

/// A decoded result together with the exact bytes it was decoded from.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: u16,
    raw: Vec<u8>,
}

impl<T> ApiResponse<T> {
    pub(crate) fn new(data: T, status: u16, raw: Vec<u8>) -> Self {
        Self { data, status, raw }
    }

    /// The response body, verbatim.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    pub fn into_inner(self) -> T {
        self.data
    }

    pub fn into_parts(self) -> (T, Vec<u8>) {
        (self.data, self.raw)
    }
}

impl<T> Deref for ApiResponse<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.data
    }
}

/// The structured error body: `{"object":"error","status":..,"code":..,"message":..}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    #[serde(default)]
    message: String,
}

/// Decode a non-success response into [`Error::Api`].
///
/// Bodies that are not the structured error JSON keep their text as the
/// message, with the bare status as the code.
pub(crate) fn decode_error(status: u16, raw: Vec<u8>) -> Error {
    let (code, message) = match serde_json::from_slice::<ErrorBody>(&raw) {
        Ok(body) => (ApiErrorCode::from_api_response(&body.code), body.message),
        Err(_) => (
            ApiErrorCode::HttpStatus(status),
            String::from_utf8_lossy(&raw).trim().to_string(),
        ),
    };
    Error::Api {
        status,
        code,
        message,
        raw,
    }
}

/// Decode a response: errors for non-2xx, the typed payload otherwise.
pub(crate) fn decode_response<T: DeserializeOwned>(response: HttpResponse) -> Result<ApiResponse<T>> {
    let success = response.is_success();
    let HttpResponse { status, body, .. } = response;
    log::debug!("Response status {} ({} bytes)", status, body.len());

    if !success {
        return Err(decode_error(status, body));
    }

    match serde_json::from_slice::<T>(&body) {
        Ok(data) => Ok(ApiResponse::new(data, status, body)),
        Err(source) => {
            log::debug!("Undecodable body: {}", preview(&body));
            Err(Error::Decode { source, raw: body })
        }
    }
}

fn preview(body: &[u8]) -> String {
    String::from_utf8_lossy(body)
        .chars()
        .take(BODY_PREVIEW_LENGTH)
        .collect()
}
