pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to build the 'Environment' from the provided string: {0}")]
    StringToEnvironmentFail(String),
    #[error("failed to determine the current directory: {0}")]
    CurrentDir(std::io::Error),

    #[error("figment extraction error: {0}")]
    Figment(#[from] figment::Error),
}
