// Copyright 2025 the Widget Store Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

use crate::types::WidgetId;

/// Reasons a store mutation can be refused.
///
/// A refused mutation leaves the store exactly as it was.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StoreError {
    /// An insert named an id that is already stored.
    #[error("widget {0} already exists")]
    DuplicateId(WidgetId),
    /// An update named an id that is not stored.
    #[error("widget {0} not found")]
    UnknownWidget(WidgetId),
    /// Placing the widget would push a z-order past `i32::MAX`.
    #[error("z-order {z_order} cannot be raised without overflowing")]
    ZOrderOverflow {
        /// The z-order that could not be incremented.
        z_order: i32,
    },
}
