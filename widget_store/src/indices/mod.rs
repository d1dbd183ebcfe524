// Copyright 2025 the Widget Store Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The three views over one widget set: by id, by z-order, and by x.
//!
//! `by_id` owns the records. `by_z` and `by_x` only map their ordering keys
//! to ids, so a record exists exactly once and every view resolves to it.
//! All mutation goes through [`Indices::link`], [`Indices::unlink`], and the
//! shift engine, which keep the three views in lockstep.

mod shift;

use core::fmt;
use std::collections::{BTreeMap, BTreeSet};

use hashbrown::HashMap;

use crate::error::StoreError;
use crate::types::{Widget, WidgetId};

pub(crate) struct Indices {
    by_id: HashMap<WidgetId, Widget>,
    by_z: BTreeMap<i32, WidgetId>,
    by_x: BTreeSet<(i32, WidgetId)>,
}

impl Indices {
    pub(crate) fn new() -> Self {
        Self {
            by_id: HashMap::new(),
            by_z: BTreeMap::new(),
            by_x: BTreeSet::new(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }

    #[inline]
    pub(crate) fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.by_id.get(&id)
    }

    #[inline]
    pub(crate) fn contains(&self, id: WidgetId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// The widget on top of the stack.
    pub(crate) fn top(&self) -> Option<&Widget> {
        let (_, id) = self.by_z.last_key_value()?;
        Some(self.resolve(id))
    }

    /// Z-order for a widget that asked to go on top: one above the current
    /// maximum, or 1 for an empty store.
    pub(crate) fn next_z_order(&self) -> Result<i32, StoreError> {
        match self.by_z.last_key_value() {
            None => Ok(1),
            Some((&z_order, _)) => z_order
                .checked_add(1)
                .ok_or(StoreError::ZOrderOverflow { z_order }),
        }
    }

    /// Add a widget to all three views.
    ///
    /// The caller guarantees that neither its id nor its z-order is taken.
    pub(crate) fn link(&mut self, widget: Widget) {
        debug_assert!(
            !self.by_id.contains_key(&widget.id),
            "linking duplicate id {}",
            widget.id
        );
        let previous = self.by_z.insert(widget.z_order, widget.id);
        debug_assert!(
            previous.is_none(),
            "linking duplicate z-order {}",
            widget.z_order
        );
        self.by_x.insert((widget.x, widget.id));
        self.by_id.insert(widget.id, widget);
    }

    /// Remove a widget from all three views. Absent ids are ignored.
    pub(crate) fn unlink(&mut self, id: WidgetId) -> Option<Widget> {
        let widget = self.by_id.remove(&id)?;
        self.by_z.remove(&widget.z_order);
        self.by_x.remove(&(widget.x, widget.id));
        Some(widget)
    }

    pub(crate) fn clear(&mut self) {
        self.by_id.clear();
        self.by_z.clear();
        self.by_x.clear();
    }

    /// Widgets in strictly increasing z-order.
    pub(crate) fn iter_by_z(&self) -> impl Iterator<Item = &Widget> + '_ {
        self.by_z.values().map(|id| self.resolve(id))
    }

    /// Widgets in increasing x (ties broken by id).
    pub(crate) fn iter_by_x(&self) -> impl Iterator<Item = &Widget> + '_ {
        self.by_x.iter().map(|(_, id)| self.resolve(id))
    }

    fn resolve(&self, id: &WidgetId) -> &Widget {
        self.by_id
            .get(id)
            .expect("index invariant violated: ordered view references a missing id")
    }

    /// Check every cross-view invariant, panicking on the first violation.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.by_z.len(), self.by_id.len(), "by_z and by_id differ in size");
        assert_eq!(self.by_x.len(), self.by_id.len(), "by_x and by_id differ in size");
        for (z_order, id) in &self.by_z {
            let widget = self.by_id.get(id).expect("by_z references a missing id");
            assert_eq!(widget.z_order, *z_order, "stale z-order key for {id}");
        }
        for (x, id) in &self.by_x {
            let widget = self.by_id.get(id).expect("by_x references a missing id");
            assert_eq!(widget.x, *x, "stale x key for {id}");
        }
    }
}

impl fmt::Debug for Indices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (min_z, max_z) = (
            self.by_z.first_key_value().map(|(z, _)| *z),
            self.by_z.last_key_value().map(|(z, _)| *z),
        );
        f.debug_struct("Indices")
            .field("len", &self.by_id.len())
            .field("min_z", &min_z)
            .field("max_z", &max_z)
            .finish_non_exhaustive()
    }
}
