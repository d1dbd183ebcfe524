// Copyright 2025 the Widget Store Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Id allocation.

use core::fmt::Debug;
use core::sync::atomic::{AtomicU64, Ordering};

use crate::types::WidgetId;

/// Source of fresh widget ids.
///
/// The store only asks for an id when a draft arrives without one, and always
/// does so while holding its write lock.
pub trait IdAllocator: Debug + Send + Sync {
    /// Return the next id. Successive calls must be strictly increasing until
    /// [`reset`][IdAllocator::reset] is called.
    fn next_id(&self) -> WidgetId;

    /// Restart the sequence from its initial value.
    fn reset(&self);
}

/// Monotonic counter starting at 1.
#[derive(Debug, Default)]
pub struct IdSequence {
    last: AtomicU64,
}

impl IdSequence {
    /// Create a sequence whose first id is 1.
    pub const fn new() -> Self {
        Self {
            last: AtomicU64::new(0),
        }
    }
}

impl IdAllocator for IdSequence {
    #[inline]
    fn next_id(&self) -> WidgetId {
        WidgetId(self.last.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn reset(&self) {
        self.last.store(0, Ordering::Relaxed);
    }
}
