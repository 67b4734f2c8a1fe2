#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
