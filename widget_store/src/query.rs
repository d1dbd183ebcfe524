// Copyright 2025 the Widget Store Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scan queries: pagination and rectangle containment.
//!
//! Two access paths answer rectangle queries:
//! - [`scan_ordered`] walks the z-order view and filters, which also serves
//!   paging;
//! - [`scan_spatial`] walks the x-ordered view and stops at the first widget
//!   whose left edge reaches the query's right edge, then sorts the hits by
//!   z-order.
//!
//! For the same area both return the same widgets in the same order.

use core::num::NonZeroUsize;

use tracing::trace;

use crate::indices::Indices;
use crate::types::{Area, Point, Widget};

/// One page of a z-ordered scan. Both fields are 1-based.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Page {
    /// Widgets per page.
    pub size: NonZeroUsize,
    /// Page number, starting at 1.
    pub number: NonZeroUsize,
}

impl Page {
    /// Create a page selector.
    pub const fn new(size: NonZeroUsize, number: NonZeroUsize) -> Self {
        Self { size, number }
    }

    /// Half-open range `[begin, end)` of positions covered by this page, or
    /// `None` if `begin` is not representable (the page is past any store).
    pub fn bounds(&self) -> Option<(usize, usize)> {
        let begin = (self.number.get() - 1).checked_mul(self.size.get())?;
        Some((begin, begin.saturating_add(self.size.get())))
    }
}

/// Filters for [`find_all`](crate::WidgetRepository::find_all).
///
/// The default query returns every widget in z-order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    /// Restrict the scan to one page, counted after the area filter.
    pub page: Option<Page>,
    /// Keep only widgets fully contained in this area.
    pub area: Option<Area>,
}

impl Query {
    /// Every widget, in z-order.
    pub const fn all() -> Self {
        Self {
            page: None,
            area: None,
        }
    }

    /// Build a query from optional request parameters.
    ///
    /// Paging applies only when both `size` and `number` are present, and the
    /// area filter only when both corners are present.
    pub fn from_parts(
        size: Option<NonZeroUsize>,
        number: Option<NonZeroUsize>,
        lower_left: Option<Point>,
        upper_right: Option<Point>,
    ) -> Self {
        let page = match (size, number) {
            (Some(size), Some(number)) => Some(Page::new(size, number)),
            _ => None,
        };
        Self {
            page,
            area: Area::from_corners(lower_left, upper_right),
        }
    }

    /// Restrict to a page.
    #[must_use]
    pub const fn paged(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    /// Restrict to widgets inside `area`.
    #[must_use]
    pub const fn within(mut self, area: Area) -> Self {
        self.area = Some(area);
        self
    }
}

/// Answer `query` by walking the z-order view.
pub(crate) fn scan_ordered(indices: &Indices, query: &Query) -> Vec<Widget> {
    let matching = indices
        .iter_by_z()
        .filter(|w| query.area.is_none_or(|area| area.contains(w)));
    match query.page {
        None => matching.copied().collect(),
        Some(page) => match page.bounds() {
            Some((begin, end)) if begin < indices.len() => {
                matching.skip(begin).take(end - begin).copied().collect()
            }
            _ => Vec::new(),
        },
    }
}

/// Answer an area query by walking the x-ordered view.
pub(crate) fn scan_spatial(indices: &Indices, area: Area) -> Vec<Widget> {
    let mut hits = Vec::new();
    let mut visited = 0_usize;
    for widget in indices.iter_by_x() {
        // Widths are positive, so nothing from here on can fit.
        if widget.x >= area.upper_right.x {
            break;
        }
        visited += 1;
        if area.contains(widget) {
            hits.push(*widget);
        }
    }
    trace!(
        visited,
        total = indices.len(),
        hits = hits.len(),
        "spatial scan finished"
    );
    hits.sort_unstable_by_key(|w| w.z_order);
    hits
}
