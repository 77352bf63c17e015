use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use std::sync::Arc;
use strum_macros::AsRefStr;

use crate::provider::{self, ProviderRejection};

use super::types::DataParsingError;

pub type WebResult<T> = core::result::Result<T, Error>;

/// Every way a subscription request can fail at the endpoint boundary.
#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("data parsing error: {0}")]
    Validation(#[from] DataParsingError),
    #[error("the address is already a list member")]
    MemberExists(ProviderRejection),
    #[error("provider error: {0}")]
    Provider(provider::Error),
}

/// Splits the "already a member" rejection off the other provider failures.
impl From<provider::Error> for Error {
    fn from(er: provider::Error) -> Self {
        match er {
            provider::Error::Rejected(rejection) if rejection.is_member_exists() => {
                Error::MemberExists(rejection)
            }
            other => Error::Provider(other),
        }
    }
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        use ClientError::*;

        match self {
            Error::Validation(data_er) => (
                StatusCode::BAD_REQUEST,
                InvalidInput {
                    field: data_er.field(),
                    rule: data_er.as_ref().to_string(),
                    message: data_er.to_string(),
                },
            ),
            // Kept at 500 so older clients that only sniff the body keep working.
            Error::MemberExists(rejection) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                MemberExists(rejection.body.clone()),
            ),
            Error::Provider(provider::Error::Rejected(rejection)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ServiceError(rejection.body.clone()),
            ),
            Error::Provider(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ServiceError(json!({ "message": "Service Error!" })),
            ),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// What the client gets to see. The `AsRefStr` representation is the `kind` code of the body.
#[derive(Debug, AsRefStr, derive_more::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ClientError {
    #[display("Received invalid input: {message}")]
    InvalidInput {
        field: &'static str,
        rule: String,
        message: String,
    },
    #[display("Email already subscribed")]
    MemberExists(Value),
    #[display("Service Error!")]
    ServiceError(Value),
}

impl ClientError {
    /// The value of the `error` field in the response body.
    /// Provider failures embed the provider's error document unchanged.
    pub fn error_body(&self) -> Value {
        match self {
            ClientError::InvalidInput {
                field,
                rule,
                message,
            } => json!({
                "field": field,
                "rule": rule,
                "message": message,
            }),
            ClientError::MemberExists(provider_er) | ClientError::ServiceError(provider_er) => {
                provider_er.clone()
            }
        }
    }
}
