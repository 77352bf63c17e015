use crate::{config, provider};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("provider client error: {0}")]
    Provider(#[from] provider::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
