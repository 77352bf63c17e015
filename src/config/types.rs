//! The configuration structs used to build the AppConfig, and their impls.
use secrecy::SecretString;
use serde::Deserialize;
use strum_macros::AsRefStr;

use crate::config::ConfigError;

/// The audience every subscriber gets added to unless the configuration says otherwise.
pub const DEFAULT_LIST_ID: &str = "6fa2f6d4b3";

// ###################################
// ->   STRUCTS
// ###################################
#[derive(AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub net_config: NetConfig,
    pub mailchimp_config: MailchimpConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: [u8; 4],
    pub app_port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct MailchimpConfig {
    pub api_key: SecretString,
    /// The data center of the account, e.g. `us6`.
    pub server_prefix: String,
    #[serde(default = "default_list_id")]
    pub list_id: String,
    /// Overrides the URL derived from `server_prefix`.
    #[serde(default)]
    pub base_url: Option<String>,
    pub timeout_millis: u64,
}

fn default_list_id() -> String {
    DEFAULT_LIST_ID.to_string()
}

// ###################################
// ->   IMPLs
// ###################################
impl MailchimpConfig {
    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| format!("https://{}.api.mailchimp.com", self.server_prefix))
    }
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_millis)
    }
}

// ###################################
// ->   TRY FROMs
// ###################################

impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(Self::Error::StringToEnvironmentFail(value)),
        }
    }
}

// ###################################
// ->   TESTS
// ###################################
