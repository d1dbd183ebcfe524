// Copyright 2025 the Widget Store Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;
use widget_store::{StoreError, WidgetId};

/// Errors surfaced to the transport layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A request field or parameter failed validation.
    #[error("{0}")]
    InvalidParameter(String),
    /// The addressed widget does not exist.
    #[error("Widget with id '{0}' not found!")]
    NotFound(WidgetId),
    /// The store refused the mutation.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    ConfigSyntax(#[from] toml::de::Error),
    /// Configuration values are inconsistent.
    #[error("invalid configuration: {0}")]
    ConfigValue(String),
}

impl ServiceError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }
}
