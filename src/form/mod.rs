//! The client side of the subscription: validates the candidate email, issues one
//! request to the endpoint and maps the response to an `Outcome`.
//!
//! State is published through a `tokio::sync::watch` channel so a UI can disable
//! its submit control while `FormState::busy` is set.

mod client;

pub use client::{SubscribeClient, SUBSCRIBE_PATH};

use reqwest::StatusCode;
use serde_json::Value;
use strum_macros::AsRefStr;
use tokio::sync::watch;
use tracing::{debug, error};

use crate::{provider::MEMBER_EXISTS_MARKER, web::types::ValidEmail};

pub const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

// ###################################
// ->   STRUCTS
// ###################################
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, derive_more::Display)]
pub enum Outcome {
    #[display("Thanks! Check your inbox to confirm the subscription.")]
    Success,
    #[display("Please enter a valid email address.")]
    InvalidInput,
    #[display("This email is already subscribed.")]
    EmailExists,
    #[display("Something went wrong, please try again later.")]
    ServerError,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormState {
    pub busy: bool,
    pub outcome: Option<Outcome>,
}

pub struct SubscriptionForm {
    client: SubscribeClient,
    state: watch::Sender<FormState>,
}

impl SubscriptionForm {
    pub fn new(client: SubscribeClient) -> Self {
        let (state, _) = watch::channel(FormState::default());
        SubscriptionForm { client, state }
    }

    /// Builds the form with a transport pointed at `base_url` and the default timeout.
    pub fn with_base_url<S: AsRef<str>>(base_url: S) -> Result<Self> {
        Ok(Self::new(SubscribeClient::new(base_url, REQUEST_TIMEOUT)?))
    }

    pub fn watch(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> FormState {
        *self.state.borrow()
    }

    pub fn is_busy(&self) -> bool {
        self.state.borrow().busy
    }

    /// Returns `None` for an empty candidate, nothing happens in that case.
    ///
    /// Concurrent submissions are not queued or cancelled, the caller is expected
    /// to hold off while the form is busy.
    /// An invalid candidate submitted mid-flight sets `InvalidInput` without touching `busy`,
    /// and the in-flight result overwrites it once it lands.
    #[tracing::instrument(name = "Submitting subscription form", skip(self, candidate))]
    pub async fn submit(&self, candidate: &str) -> Option<Outcome> {
        if candidate.is_empty() {
            return None;
        }

        let email = match ValidEmail::parse(candidate) {
            Ok(email) => email,
            Err(er) => {
                debug!("{:<12} - {er}", "FORM");
                self.state
                    .send_modify(|st| st.outcome = Some(Outcome::InvalidInput));
                return Some(Outcome::InvalidInput);
            }
        };

        let busy = BusyGuard::start(&self.state);

        let outcome = match self.client.subscribe(&email).await {
            Ok((status, body)) => classify_response(status, &body),
            Err(er) => {
                error!("{:<12} - subscribe request failed: {er}", "FORM");
                Outcome::ServerError
            }
        };

        busy.resolve(outcome);
        Some(outcome)
    }
}

/// Maps the endpoint's response to an `Outcome`.
/// Duplicate membership is recognised either by the `member_exists` kind code or by the
/// provider's marker text anywhere in the body.
pub fn classify_response(status: StatusCode, body: &str) -> Outcome {
    if status.is_success() {
        return Outcome::Success;
    }
    if status == StatusCode::BAD_REQUEST {
        return Outcome::InvalidInput;
    }

    let kind_is_member_exists = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("kind").and_then(Value::as_str).map(|k| k == "member_exists"))
        .unwrap_or(false);

    if kind_is_member_exists || body.contains(MEMBER_EXISTS_MARKER) {
        Outcome::EmailExists
    } else {
        Outcome::ServerError
    }
}

/// Sets `busy` (and clears the previous outcome) for as long as it lives.
/// Dropping it unresolved, e.g. when the submission future is cancelled or panics,
/// still clears `busy` and settles on `Outcome::ServerError`.
struct BusyGuard<'a> {
    state: &'a watch::Sender<FormState>,
    resolved: bool,
}

impl<'a> BusyGuard<'a> {
    fn start(state: &'a watch::Sender<FormState>) -> Self {
        state.send_modify(|st| {
            st.busy = true;
            st.outcome = None;
        });
        BusyGuard {
            state,
            resolved: false,
        }
    }

    fn resolve(mut self, outcome: Outcome) {
        self.finish(outcome);
    }

    fn finish(&mut self, outcome: Outcome) {
        self.state.send_modify(|st| {
            st.busy = false;
            st.outcome = Some(outcome);
        });
        self.resolved = true;
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if !self.resolved {
            self.finish(Outcome::ServerError);
        }
    }
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("url parsing error: {0}")]
    UrlParsing(String),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
