use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("invalid memory configuration: {0}")]
    InvalidConfig(String),

    #[error("{attr} has {len} values but the memory has {port_count} ports")]
    PortCountMismatch {
        attr: &'static str,
        len: usize,
        port_count: usize,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("error parsing TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("error serializing/deserializing JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("error rendering template: {0}")]
    Template(#[from] tera::Error),
}

impl From<derive_builder::UninitializedFieldError> for Error {
    fn from(e: derive_builder::UninitializedFieldError) -> Self {
        Self::InvalidConfig(format!("missing required field `{}`", e.field_name()))
    }
}
