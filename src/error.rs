use thiserror::Error;

use crate::account::{Density, ResourceId};

#[derive(Error, Debug)]
pub enum PhoneAccountError {
    #[error("Malformed handle '{handle}': {reason}")]
    MalformedHandle { handle: String, reason: String },
    #[error("Malformed encoding: {0}")]
    MalformedEncoding(String),
    #[error("Malformed component name: {0}")]
    MalformedComponent(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PhoneAccountError>;

/// Resource lookups that came back empty. Account accessors turn these into
/// `None` plus a log line; only table loading hands them to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("Cannot find package {0}")]
    PackageNotFound(String),
    #[error("Cannot find string {res_id} in package {package}")]
    StringNotFound { package: String, res_id: ResourceId },
    #[error("Cannot find icon {res_id} ({density}) in package {package}")]
    IconNotFound {
        package: String,
        res_id: ResourceId,
        density: Density,
    },
    #[error("Invalid resource table: {0}")]
    InvalidTable(String),
}
