// Copyright 2025 the Widget Store Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order collision resolution.
//!
//! When a widget lands on a z-order that is already taken, the occupant and
//! every widget directly stacked above it move up by one. The walk stops at
//! the first gap, so only the contiguous run starting at the collision moves:
//!
//! ```text
//! before:  1 2 3 4 . . 7      insert at 2
//! after:   1 N 3 4 5 . 7      (old 2,3,4 became 3,4,5; 7 untouched)
//! ```

use chrono::{DateTime, Utc};
use smallvec::SmallVec;
use tracing::debug;

use super::Indices;
use crate::error::StoreError;
use crate::types::WidgetId;

impl Indices {
    /// Free `z_order` by pushing the run of widgets starting at it up by one.
    ///
    /// Returns how many widgets moved (0 when `z_order` was free). Shifted
    /// widgets get `now` as their modification time. On error nothing has
    /// been changed.
    pub(crate) fn make_room(
        &mut self,
        z_order: i32,
        now: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        if !self.by_z.contains_key(&z_order) {
            return Ok(0);
        }

        let mut run: SmallVec<[(i32, WidgetId); 8]> = SmallVec::new();
        let mut previous = i64::from(z_order);
        for (&current, &id) in self.by_z.range(z_order..) {
            if i64::from(current) > previous + 1 {
                break;
            }
            previous = i64::from(current);
            run.push((current, id));
        }

        let &(last, _) = run
            .last()
            .expect("shift run starts at an occupied z-order");
        if last == i32::MAX {
            debug!(z_order, "rejecting shift that would overflow z-order");
            return Err(StoreError::ZOrderOverflow { z_order: last });
        }

        // Top-down, so each target key has already been vacated.
        for &(current, id) in run.iter().rev() {
            let raised = current + 1;
            self.by_z.remove(&current);
            self.by_z.insert(raised, id);
            let widget = self
                .by_id
                .get_mut(&id)
                .expect("index invariant violated: by_z references a missing id");
            widget.z_order = raised;
            widget.modified_at = now;
        }

        debug!(z_order, shifted = run.len(), "shifted z-order run");
        Ok(run.len())
    }
}
