//! Error types for the adapter framework
//!
//! This module defines the error hierarchy for the entire crate.
//! Every error maps onto a stable wire [`ErrorCode`] so it can be returned
//! to the platform as a [`PageError`].

use crate::wire::{ErrorCode, PageError};
use thiserror::Error;

/// The main error type for the adapter framework
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Request Shape Errors
    // ============================================================================
    #[error("Invalid page request config: {message}")]
    InvalidPageRequestConfig { message: String },

    #[error("Invalid datasource config: {message}")]
    InvalidDatasourceConfig { message: String },

    #[error("Invalid entity config: {message}")]
    InvalidEntityConfig { message: String },

    // ============================================================================
    // Adapter Errors
    // ============================================================================
    #[error("Internal error: {message}")]
    Internal { message: String },

    // ============================================================================
    // JSON Conversion Errors
    // ============================================================================
    #[error("JSON conversion error: {message}")]
    JsonConversion { message: String },

    #[error("JSONPath error: {message}")]
    JsonPath { message: String },

    #[error("Invalid cursor: {message}")]
    Cursor { message: String },

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Unauthenticated: {message}")]
    Unauthenticated { message: String },

    #[error("Auth token store error: {message}")]
    TokenStore { message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid page request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidPageRequestConfig {
            message: message.into(),
        }
    }

    /// Create an invalid datasource error
    pub fn invalid_datasource(message: impl Into<String>) -> Self {
        Self::InvalidDatasourceConfig {
            message: message.into(),
        }
    }

    /// Create an invalid entity error
    pub fn invalid_entity(message: impl Into<String>) -> Self {
        Self::InvalidEntityConfig {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a JSON conversion error
    pub fn json_conversion(message: impl Into<String>) -> Self {
        Self::JsonConversion {
            message: message.into(),
        }
    }

    /// Create a JSONPath error
    pub fn json_path(message: impl Into<String>) -> Self {
        Self::JsonPath {
            message: message.into(),
        }
    }

    /// Create a cursor error
    pub fn cursor(message: impl Into<String>) -> Self {
        Self::Cursor {
            message: message.into(),
        }
    }

    /// Create an unauthenticated error
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    /// Create a token store error
    pub fn token_store(message: impl Into<String>) -> Self {
        Self::TokenStore {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// The wire error code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::InvalidPageRequestConfig { .. } | Error::Cursor { .. } => {
                ErrorCode::InvalidPageRequestConfig
            }
            Error::InvalidDatasourceConfig { .. } => ErrorCode::InvalidDatasourceConfig,
            Error::InvalidEntityConfig { .. } => ErrorCode::InvalidEntityConfig,
            Error::Unauthenticated { .. } => ErrorCode::Unauthenticated,
            Error::Internal { .. }
            | Error::JsonConversion { .. }
            | Error::JsonPath { .. }
            | Error::TokenStore { .. }
            | Error::Config { .. }
            | Error::YamlParse(_)
            | Error::JsonParse(_)
            | Error::Io(_)
            | Error::Other(_) => ErrorCode::Internal,
        }
    }

    /// The message carried on the wire (without the category prefix)
    pub fn message(&self) -> String {
        match self {
            Error::InvalidPageRequestConfig { message }
            | Error::InvalidDatasourceConfig { message }
            | Error::InvalidEntityConfig { message }
            | Error::Internal { message }
            | Error::JsonConversion { message }
            | Error::JsonPath { message }
            | Error::Cursor { message }
            | Error::Unauthenticated { message }
            | Error::TokenStore { message }
            | Error::Config { message } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Convert into a wire error
    pub fn to_wire(&self) -> PageError {
        PageError::new(self.code(), self.message())
    }
}

/// Result type alias for the adapter framework
pub type Result<T> = std::result::Result<T, Error>;
