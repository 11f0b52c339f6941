use std::fmt;

use crate::model::{GroupId, ParamId, VersionId, ZoneId};

/// Errors raised by scaling group lifecycle operations
#[derive(Debug, Clone)]
pub enum PipelineError {
    /// The group is protected and cannot be removed
    ProtectedGroup(GroupId),
    GroupIndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::ProtectedGroup(id) => {
                write!(f, "group {id} is protected and cannot be removed")
            }
            PipelineError::GroupIndexOutOfRange { index, len } => {
                write!(f, "group index {index} out of range (have {len} groups)")
            }
        }
    }
}

impl std::error::Error for PipelineError {}

/// Errors raised while importing or exporting exchange files
#[derive(Debug)]
pub enum ExchangeError {
    /// Top-level shape matches neither the current wrapper nor the legacy
    /// root-groups layout
    UnknownFormat,
    UnsupportedVersion(String),
    Parse(serde_json::Error),
    Io(std::io::Error),
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeError::UnknownFormat => {
                write!(f, "unrecognized import file format")
            }
            ExchangeError::UnsupportedVersion(v) => {
                write!(f, "unsupported export format version {v:?}")
            }
            ExchangeError::Parse(e) => write!(f, "invalid export JSON: {e}"),
            ExchangeError::Io(e) => write!(f, "export file I/O error: {e}"),
        }
    }
}

impl std::error::Error for ExchangeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExchangeError::Parse(e) => Some(e),
            ExchangeError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(e: serde_json::Error) -> Self {
        ExchangeError::Parse(e)
    }
}

impl From<std::io::Error> for ExchangeError {
    fn from(e: std::io::Error) -> Self {
        ExchangeError::Io(e)
    }
}

/// Errors surfaced by the store dispatcher
#[derive(Debug, Clone)]
pub enum StoreError {
    Pipeline(PipelineError),
    UnknownParameter(ParamId),
    UnknownVersion(VersionId),
    UnknownZone(ZoneId),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Pipeline(e) => write!(f, "{e}"),
            StoreError::UnknownParameter(id) => write!(f, "parameter {id} not found"),
            StoreError::UnknownVersion(id) => write!(f, "version {id} not found"),
            StoreError::UnknownZone(id) => write!(f, "zone {id} not found"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Pipeline(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PipelineError> for StoreError {
    fn from(e: PipelineError) -> Self {
        StoreError::Pipeline(e)
    }
}
