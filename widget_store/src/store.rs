// Copyright 2025 the Widget Store Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The repository trait and its in-memory implementation.

use chrono::Utc;
use tracing::debug;

use crate::error::StoreError;
use crate::indices::Indices;
use crate::lock::StampedLock;
use crate::query::{Query, scan_ordered, scan_spatial};
use crate::sequence::{IdAllocator, IdSequence};
use crate::types::{Area, Widget, WidgetDraft, WidgetId, WidgetPatch};

/// Storage contract for widgets.
///
/// Reads never fail: absent widgets are reported as `None` or an empty list.
/// Every write is atomic with respect to every read.
pub trait WidgetRepository: Send + Sync {
    /// Store a new widget and return it as stored.
    ///
    /// A missing id is drawn from the allocator; a missing z-order puts the
    /// widget on top. A z-order that is already taken pushes the occupying
    /// run of widgets up by one.
    fn insert(&self, draft: WidgetDraft) -> Result<Widget, StoreError>;

    /// Apply `patch` to widget `id` and return the result.
    ///
    /// Changing the z-order follows the same collision rules as
    /// [`insert`][Self::insert]. The widget does not collide with itself.
    fn update(&self, id: WidgetId, patch: WidgetPatch) -> Result<Widget, StoreError>;

    /// Look up a widget by id.
    fn find_by_id(&self, id: WidgetId) -> Option<Widget>;

    /// Widgets matching `query`, in increasing z-order.
    fn find_all(&self, query: &Query) -> Vec<Widget>;

    /// Widgets fully inside `area`, in increasing z-order, found through the
    /// x-ordered view.
    ///
    /// Returns the same list as `find_all(&Query::all().within(area))`.
    fn find_all_in_rectangle(&self, area: Area) -> Vec<Widget>;

    /// Delete a widget. Deleting an absent id is a no-op returning `None`.
    fn remove(&self, id: WidgetId) -> Option<Widget>;

    /// The widget with the greatest z-order.
    fn max_z_order(&self) -> Option<Widget>;

    /// Number of stored widgets.
    fn len(&self) -> usize;

    /// Whether the store is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Delete every widget. The id sequence is left alone.
    fn clear(&self);

    /// Restart the id sequence.
    fn reset_sequence(&self);
}

/// In-memory widget store parameterized by its id allocator.
///
/// All three views live behind one [`StampedLock`]: writes hold it
/// exclusively for their whole duration, reads try an optimistic pass first.
#[derive(Debug)]
pub struct StoreGeneric<A: IdAllocator> {
    indices: StampedLock<Indices>,
    ids: A,
}

/// Store using the default [`IdSequence`] allocator.
pub type WidgetStore = StoreGeneric<IdSequence>;

impl WidgetStore {
    /// Create an empty store whose first generated id is 1.
    pub fn new() -> Self {
        Self::with_allocator(IdSequence::new())
    }
}

impl Default for WidgetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: IdAllocator> StoreGeneric<A> {
    /// Create an empty store drawing ids from `ids`.
    pub fn with_allocator(ids: A) -> Self {
        Self {
            indices: StampedLock::new(Indices::new()),
            ids,
        }
    }

    /// The id allocator in use.
    pub fn allocator(&self) -> &A {
        &self.ids
    }

    /// Next allocator id not already claimed by a caller-chosen id.
    fn fresh_id(&self, indices: &Indices) -> WidgetId {
        loop {
            let id = self.ids.next_id();
            if !indices.contains(id) {
                return id;
            }
            debug!(%id, "allocator id already taken, skipping");
        }
    }
}

impl<A: IdAllocator> WidgetRepository for StoreGeneric<A> {
    fn insert(&self, draft: WidgetDraft) -> Result<Widget, StoreError> {
        let mut indices = self.indices.write();
        if let Some(id) = draft.id
            && indices.contains(id)
        {
            debug!(%id, "rejecting insert of duplicate id");
            return Err(StoreError::DuplicateId(id));
        }
        let z_order = match draft.z_order {
            Some(z_order) => z_order,
            None => indices.next_z_order()?,
        };
        let now = Utc::now();
        indices.make_room(z_order, now)?;
        let id = match draft.id {
            Some(id) => id,
            None => self.fresh_id(&indices),
        };
        let widget = Widget {
            id,
            x: draft.x,
            y: draft.y,
            width: draft.width,
            height: draft.height,
            z_order,
            modified_at: now,
        };
        indices.link(widget);
        Ok(widget)
    }

    fn update(&self, id: WidgetId, patch: WidgetPatch) -> Result<Widget, StoreError> {
        let mut indices = self.indices.write();
        let current = indices
            .unlink(id)
            .ok_or(StoreError::UnknownWidget(id))?;
        let now = Utc::now();
        let mut next = patch.merge(&current);
        next.modified_at = now;
        if let Err(err) = indices.make_room(next.z_order, now) {
            // Nothing moved, so the old slot is still free.
            indices.link(current);
            return Err(err);
        }
        indices.link(next);
        Ok(next)
    }

    fn find_by_id(&self, id: WidgetId) -> Option<Widget> {
        self.indices.read(|indices| indices.get(id).copied())
    }

    fn find_all(&self, query: &Query) -> Vec<Widget> {
        self.indices.read(|indices| scan_ordered(indices, query))
    }

    fn find_all_in_rectangle(&self, area: Area) -> Vec<Widget> {
        self.indices.read(|indices| scan_spatial(indices, area))
    }

    fn remove(&self, id: WidgetId) -> Option<Widget> {
        self.indices.write().unlink(id)
    }

    fn max_z_order(&self) -> Option<Widget> {
        self.indices.read(|indices| indices.top().copied())
    }

    fn len(&self) -> usize {
        self.indices.read(Indices::len)
    }

    fn clear(&self) {
        self.indices.write().clear();
    }

    fn reset_sequence(&self) {
        self.ids.reset();
    }
}
