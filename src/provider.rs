use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use strum_macros::AsRefStr;

use crate::{config::MailchimpConfig, utils, web::types::ValidEmail};

/// The text the provider puts in its error document when the address is already on the list.
pub const MEMBER_EXISTS_MARKER: &str = "Member Exists";

#[derive(Debug, Clone, Copy, AsRefStr, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    /// Double opt-in, the provider sends a confirmation email first.
    #[strum(serialize = "pending")]
    Pending,
}

/// HTTP client for the mailing-list provider's "add list member" operation.
#[derive(Debug)]
pub struct ListClient {
    pub http_client: Client,
    pub url: reqwest::Url,
    pub list_id: String,
    api_key: SecretString,
}

impl ListClient {
    pub fn new<S: AsRef<str>>(
        url: S,
        list_id: impl Into<String>,
        api_key: SecretString,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let url =
            reqwest::Url::parse(url.as_ref()).map_err(|e| Error::UrlParsing(e.to_string()))?;

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(ListClient {
            http_client,
            url,
            list_id: list_id.into(),
            api_key,
        })
    }

    pub fn from_config(config: &MailchimpConfig) -> Result<Self> {
        Self::new(
            config.base_url(),
            config.list_id.clone(),
            config.api_key.clone(),
            config.timeout(),
        )
    }

    /// Creates a `pending` member for `email` and returns the provider's member document.
    #[tracing::instrument(name = "Adding list member", skip(self, email), fields(list_id = %self.list_id))]
    pub async fn add_member(&self, email: &ValidEmail) -> Result<Value> {
        let url = utils::join_url(&self.url, &format!("3.0/lists/{}/members", self.list_id))
            .map_err(Error::UrlParsing)?;

        let member = NewMember {
            email_address: email.as_ref(),
            status: MemberStatus::Pending,
        };

        let resp = self
            .http_client
            .post(url)
            .basic_auth("anystring", Some(self.api_key.expose_secret()))
            .json(&member)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            let member_doc = resp.json::<Value>().await?;
            return Ok(member_doc);
        }

        let text = resp.text().await?;
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        tracing::debug!("{:<12} - provider rejected member: {status}", "ADD_MEMBER");

        Err(Error::Rejected(ProviderRejection {
            status: status.as_u16(),
            body,
        }))
    }
}

#[derive(Serialize)]
pub struct NewMember<'a> {
    pub email_address: &'a str,
    pub status: MemberStatus,
}

/// A non-success response from the provider together with its error document.
#[derive(Debug, Clone)]
pub struct ProviderRejection {
    pub status: u16,
    pub body: Value,
}

impl ProviderRejection {
    /// True if any text nested in the error document contains `MEMBER_EXISTS_MARKER`.
    pub fn is_member_exists(&self) -> bool {
        contains_marker(&self.body)
    }
}

fn contains_marker(value: &Value) -> bool {
    match value {
        Value::String(s) => s.contains(MEMBER_EXISTS_MARKER),
        Value::Array(items) => items.iter().any(contains_marker),
        Value::Object(map) => map.values().any(contains_marker),
        _ => false,
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
    #[error("provider rejected the request with status {}", .0.status)]
    Rejected(ProviderRejection),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
