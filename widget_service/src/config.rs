// Copyright 2025 the Widget Store Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Service configuration.

use serde::Deserialize;

use crate::error::ServiceError;

/// Paging policy for list requests.
///
/// Missing keys take their defaults, so an empty document is valid:
///
/// ```
/// use widget_service::ServiceConfig;
///
/// let config = ServiceConfig::from_toml_str("max_page_size = 100").unwrap();
/// assert_eq!(config.default_page_size, 10);
/// assert_eq!(config.max_page_size, 100);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Page size used when a page number is given without a size.
    pub default_page_size: usize,
    /// Largest page size a caller may request.
    pub max_page_size: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 500,
        }
    }
}

impl ServiceConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ServiceError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that `1 <= default_page_size <= max_page_size`.
    pub fn validate(&self) -> Result<(), ServiceError> {
        if self.default_page_size == 0 {
            return Err(ServiceError::ConfigValue(
                "default_page_size must be greater than zero".into(),
            ));
        }
        if self.default_page_size > self.max_page_size {
            return Err(ServiceError::ConfigValue(format!(
                "default_page_size ({}) exceeds max_page_size ({})",
                self.default_page_size, self.max_page_size
            )));
        }
        Ok(())
    }
}
