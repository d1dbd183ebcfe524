// Copyright 2025 the Widget Store Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Record types: widgets, store inputs, and query geometry.

use core::fmt;

use chrono::{DateTime, Utc};

/// Stable identity of a widget.
///
/// Identity is the id alone. Two widgets are never compared by z-order for
/// membership purposes; z-order is only a key of the order index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// The raw id value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A 2D integer point, used as a query corner.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Create a point.
    #[inline(always)]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Query rectangle spanned by a lower-left and an upper-right corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Area {
    /// Minimum corner (inclusive).
    pub lower_left: Point,
    /// Maximum corner (inclusive).
    pub upper_right: Point,
}

impl Area {
    /// Create an area from its two corners.
    #[inline(always)]
    pub const fn new(lower_left: Point, upper_right: Point) -> Self {
        Self {
            lower_left,
            upper_right,
        }
    }

    /// Build an area only when both corners are present.
    pub fn from_corners(lower_left: Option<Point>, upper_right: Option<Point>) -> Option<Self> {
        Some(Self::new(lower_left?, upper_right?))
    }

    /// Whether the widget lies entirely inside this area.
    ///
    /// Edges are inclusive. A widget that merely overlaps the area is not
    /// contained.
    ///
    /// # Examples
    ///
    /// ```
    /// use widget_store::{Area, Point, Widget, WidgetId};
    ///
    /// let area = Area::new(Point::new(0, 0), Point::new(100, 150));
    /// let inside = Widget::new(WidgetId(1), 0, 50, 100, 100, 1);
    /// let crossing = Widget::new(WidgetId(2), 50, 50, 100, 100, 2);
    /// assert!(area.contains(&inside));
    /// assert!(!area.contains(&crossing));
    /// ```
    #[inline]
    pub fn contains(&self, widget: &Widget) -> bool {
        i64::from(widget.x) >= i64::from(self.lower_left.x)
            && widget.right() <= i64::from(self.upper_right.x)
            && i64::from(widget.y) >= i64::from(self.lower_left.y)
            && widget.top() <= i64::from(self.upper_right.y)
    }
}

/// A stored widget.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Widget {
    /// Unique, immutable identifier.
    pub id: WidgetId,
    /// Left edge.
    pub x: i32,
    /// Bottom edge.
    pub y: i32,
    /// Horizontal extent; always positive.
    pub width: i32,
    /// Vertical extent; always positive.
    pub height: i32,
    /// Stacking order, unique across the store. Higher is on top.
    pub z_order: i32,
    /// Time of the last insert, update, or shift that touched this widget.
    pub modified_at: DateTime<Utc>,
}

impl Widget {
    /// Create a widget stamped with the current time.
    pub fn new(id: WidgetId, x: i32, y: i32, width: i32, height: i32, z_order: i32) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
            z_order,
            modified_at: Utc::now(),
        }
    }

    /// Right edge, widened so that `x + width` cannot overflow.
    #[inline]
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Top edge, widened so that `y + height` cannot overflow.
    #[inline]
    pub fn top(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }
}

/// Input for inserting a widget.
///
/// Geometry is mandatory. The id and z-order are filled in by the store when
/// absent.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WidgetDraft {
    /// Caller-chosen id, or `None` to draw one from the store's allocator.
    pub id: Option<WidgetId>,
    /// Left edge.
    pub x: i32,
    /// Bottom edge.
    pub y: i32,
    /// Horizontal extent; must be positive.
    pub width: i32,
    /// Vertical extent; must be positive.
    pub height: i32,
    /// Requested stacking order, or `None` to go on top.
    pub z_order: Option<i32>,
}

impl WidgetDraft {
    /// A draft with the given geometry, no id, and no z-order.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            id: None,
            x,
            y,
            width,
            height,
            z_order: None,
        }
    }

    /// Request a specific z-order.
    #[must_use]
    pub const fn with_z_order(mut self, z_order: i32) -> Self {
        self.z_order = Some(z_order);
        self
    }

    /// Request a specific id.
    #[must_use]
    pub const fn with_id(mut self, id: WidgetId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Partial update of a widget. Absent fields keep their stored value.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WidgetPatch {
    /// New left edge.
    pub x: Option<i32>,
    /// New bottom edge.
    pub y: Option<i32>,
    /// New width; must be positive when present.
    pub width: Option<i32>,
    /// New height; must be positive when present.
    pub height: Option<i32>,
    /// New stacking order.
    pub z_order: Option<i32>,
}

impl WidgetPatch {
    /// Merge this patch over `current`, keeping the id and timestamp.
    pub(crate) fn merge(&self, current: &Widget) -> Widget {
        Widget {
            id: current.id,
            x: self.x.unwrap_or(current.x),
            y: self.y.unwrap_or(current.y),
            width: self.width.unwrap_or(current.width),
            height: self.height.unwrap_or(current.height),
            z_order: self.z_order.unwrap_or(current.z_order),
            modified_at: current.modified_at,
        }
    }
}
