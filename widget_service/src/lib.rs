// Copyright 2025 the Widget Store Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget Service: the validating layer between a transport and a
//! [`widget_store::WidgetRepository`].
//!
//! The store trusts its inputs. This crate is where untrusted requests are
//! checked and shaped:
//!
//! - [`validate_new`] and [`validate_patch`] enforce mandatory geometry and
//!   positive extents.
//! - [`WidgetService::list`] applies the paging policy from [`ServiceConfig`]
//!   and picks the rectangle scan path.
//! - Unknown ids become [`ServiceError::NotFound`], which a transport maps to
//!   its own not-found signal.
//!
//! It has no opinion on wire formats; [`WidgetInput`] and [`ListParams`]
//! implement `serde::Deserialize` so any serde-based decoder can produce them.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use widget_service::{ListParams, ServiceConfig, WidgetInput, WidgetService};
//! use widget_store::WidgetStore;
//!
//! let svc = WidgetService::new(Arc::new(WidgetStore::new()), ServiceConfig::default());
//! let w = svc.create(&WidgetInput::new(0, 0, 10, 10)).unwrap();
//! assert_eq!(svc.get(w.id).unwrap(), w);
//! assert!(svc.create(&WidgetInput::new(0, 0, 0, 10)).is_err());
//! assert_eq!(svc.list(&ListParams::default()).unwrap().len(), 1);
//! ```

mod config;
mod error;
mod input;
mod service;

pub use config::ServiceConfig;
pub use error::ServiceError;
pub use input::{WidgetInput, validate_new, validate_patch};
pub use service::{ListParams, WidgetService};
