use thiserror::Error;

#[derive(Error, Debug)]
pub enum JtError {
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Parent {kind} '{key}' does not exist")]
    ParentMissing { kind: &'static str, key: String },

    #[error("{kind} '{key}' already exists")]
    AlreadyExists { kind: &'static str, key: String },

    #[error("{kind} '{key}' does not exist")]
    NotFound { kind: &'static str, key: String },

    #[error("Cannot remove {kind} '{key}': it has child {child} tags")]
    HasChildren {
        kind: &'static str,
        key: String,
        child: &'static str,
    },

    #[error("Not inside vault directory ({0})")]
    NotInVault(String),

    #[error("Cannot move '{from}' to '{to}': {reason}")]
    LevelMismatch {
        from: String,
        to: String,
        reason: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Tool error: {0}")]
    Tool(String),

    #[error("Vault error: {0}")]
    Vault(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl JtError {
    pub fn not_found(kind: &'static str, key: impl Into<String>) -> Self {
        JtError::NotFound {
            kind,
            key: key.into(),
        }
    }

    pub fn already_exists(kind: &'static str, key: impl Into<String>) -> Self {
        JtError::AlreadyExists {
            kind,
            key: key.into(),
        }
    }

    pub fn parent_missing(kind: &'static str, key: impl Into<String>) -> Self {
        JtError::ParentMissing {
            kind,
            key: key.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, JtError>;
