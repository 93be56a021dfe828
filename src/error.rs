pub type CambatchResult<T> = Result<T, CambatchError>;

#[derive(thiserror::Error, Debug)]
pub enum CambatchError {
    #[error("usage error: {0}")]
    Usage(String),

    #[error("host error: {0}")]
    Host(String),

    #[error("scene error: {0}")]
    Scene(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CambatchError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }

    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene(msg.into())
    }
}
