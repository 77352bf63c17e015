use reqwest::{Client, StatusCode};

use crate::{
    utils,
    web::types::{SubscribeRequest, ValidEmail},
};

use super::{Error, Result};

pub const SUBSCRIBE_PATH: &str = "api/newsletter/subscribe";

/// The transport the form uses to reach the subscription endpoint.
#[derive(Debug)]
pub struct SubscribeClient {
    pub http_client: Client,
    pub url: reqwest::Url,
}

impl SubscribeClient {
    pub fn new<S: AsRef<str>>(base_url: S, timeout: std::time::Duration) -> Result<Self> {
        let base =
            reqwest::Url::parse(base_url.as_ref()).map_err(|e| Error::UrlParsing(e.to_string()))?;
        let url = utils::join_url(&base, SUBSCRIBE_PATH).map_err(Error::UrlParsing)?;

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(SubscribeClient { http_client, url })
    }

    /// Issues a single `PUT` and hands back the status with the raw body text.
    pub async fn subscribe(&self, email: &ValidEmail) -> Result<(StatusCode, String)> {
        let resp = self
            .http_client
            .put(self.url.clone())
            .json(&SubscribeRequest::new(email.as_ref()))
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;

        Ok((status, body))
    }
}
