// Copyright 2025 the Widget Store Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Request bodies and their validation.

use serde::{Deserialize, Serialize};
use widget_store::{WidgetDraft, WidgetPatch};

use crate::error::ServiceError;

/// A widget as submitted by a client: every field may be missing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetInput {
    /// Left edge.
    pub x: Option<i32>,
    /// Bottom edge.
    pub y: Option<i32>,
    /// Horizontal extent.
    pub width: Option<i32>,
    /// Vertical extent.
    pub height: Option<i32>,
    /// Requested stacking order.
    pub z_order: Option<i32>,
}

impl WidgetInput {
    /// Input with full geometry and no z-order.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            width: Some(width),
            height: Some(height),
            z_order: None,
        }
    }

    /// Request a z-order.
    #[must_use]
    pub const fn with_z_order(mut self, z_order: i32) -> Self {
        self.z_order = Some(z_order);
        self
    }
}

/// Validate a creation request.
///
/// Geometry is mandatory and both extents must be positive.
pub fn validate_new(input: &WidgetInput) -> Result<WidgetDraft, ServiceError> {
    let (Some(x), Some(y), Some(width), Some(height)) =
        (input.x, input.y, input.width, input.height)
    else {
        return Err(ServiceError::invalid(
            "Widget's 'x', 'y', 'width' and 'height' parameters are mandatory.",
        ));
    };
    check_extent("width", width)?;
    check_extent("height", height)?;
    let mut draft = WidgetDraft::new(x, y, width, height);
    draft.z_order = input.z_order;
    Ok(draft)
}

/// Validate an update request.
///
/// Missing fields keep the stored values, which are already valid, so only
/// the extents that are present need checking.
pub fn validate_patch(input: &WidgetInput) -> Result<WidgetPatch, ServiceError> {
    if let Some(width) = input.width {
        check_extent("width", width)?;
    }
    if let Some(height) = input.height {
        check_extent("height", height)?;
    }
    Ok(WidgetPatch {
        x: input.x,
        y: input.y,
        width: input.width,
        height: input.height,
        z_order: input.z_order,
    })
}

fn check_extent(name: &str, value: i32) -> Result<(), ServiceError> {
    if value <= 0 {
        return Err(ServiceError::invalid(format!(
            "Widget's '{name}' must be greater than zero, but was: {value}."
        )));
    }
    Ok(())
}
