//! Request structs of the `web` module, their parsing implementations and tests for those.
//! `ValidEmail` is shared with the `form` module so both sides validate the same way.

use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;
use validator::ValidateEmail;

// ###################################
// ->   STRUCTS
// ###################################
/// The body of `PUT /api/newsletter/subscribe`.
/// Can be deserialized even if the email is invalid.
#[derive(Debug, Deserialize, Serialize)]
pub struct SubscribeRequest {
    pub email: String,
}

impl SubscribeRequest {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// Validated Subscriber Email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEmail(String);

impl AsRef<str> for ValidEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ValidEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ValidEmail {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref();

        if value.validate_email() {
            Ok(ValidEmail(value.to_owned()))
        } else {
            Err(DataParsingError::EmailInvalid)
        }
    }
}

impl TryFrom<SubscribeRequest> for ValidEmail {
    type Error = DataParsingError;

    fn try_from(req: SubscribeRequest) -> Result<Self, Self::Error> {
        ValidEmail::parse(req.email)
    }
}

// ###################################
// ->   ERROR
// ###################################
/// The `AsRefStr` representation names the validation rule that failed.
#[derive(Debug, AsRefStr, thiserror::Error)]
#[strum(serialize_all = "snake_case")]
pub enum DataParsingError {
    #[error("email invalid")]
    EmailInvalid,
}

impl DataParsingError {
    /// The request field the failed rule applies to.
    pub fn field(&self) -> &'static str {
        match self {
            DataParsingError::EmailInvalid => "email",
        }
    }
}
