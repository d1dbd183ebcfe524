// Copyright 2025 the Widget Store Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget Store: a concurrent, in-memory store of z-ordered 2D widgets.
//!
//! A widget is an axis-aligned rectangle with a unique id and a unique
//! stacking order (z-order). The store keeps three views over the same set:
//!
//! - by id, for O(1) lookups,
//! - by z-order, which defines the order of every scan,
//! - by x, which accelerates rectangle queries.
//!
//! Inserting or moving a widget onto a z-order that is already taken shifts
//! the occupant, and every widget stacked directly above it, up by one. Only
//! the contiguous run is touched; the first gap absorbs the shift.
//!
//! All views sit behind a single lock. Writes hold it exclusively for their
//! whole duration, including any shift. Reads first try an optimistic pass
//! validated against a write stamp and fall back to a shared lock, so a read
//! never sees a half-applied write.
//!
//! # Example
//!
//! ```rust
//! use widget_store::{Area, Point, Query, WidgetDraft, WidgetRepository, WidgetStore};
//!
//! let store = WidgetStore::new();
//! let a = store.insert(WidgetDraft::new(0, 0, 10, 10)).unwrap();
//! let b = store.insert(WidgetDraft::new(5, 5, 10, 10)).unwrap();
//! assert_eq!((a.z_order, b.z_order), (1, 2));
//!
//! // Land a new widget on z-order 1: `a` and `b` move up.
//! let c = store.insert(WidgetDraft::new(50, 50, 10, 10).with_z_order(1)).unwrap();
//! let order: Vec<_> = store.find_all(&Query::all()).iter().map(|w| w.id).collect();
//! assert_eq!(order, [c.id, a.id, b.id]);
//!
//! // Only fully contained widgets match a rectangle.
//! let area = Area::new(Point::new(0, 0), Point::new(15, 15));
//! let inside: Vec<_> = store.find_all_in_rectangle(area).iter().map(|w| w.id).collect();
//! assert_eq!(inside, [a.id, b.id]);
//! ```
//!
//! # Inputs are trusted
//!
//! The store does not validate geometry. Callers must ensure `width > 0` and
//! `height > 0` before inserting or patching; the rectangle scan over the
//! x-ordered view relies on it.
//!
//! ## Features
//!
//! - `serde`: derives `Serialize`/`Deserialize` for the record and query types.

mod error;
mod indices;
mod lock;
mod query;
mod sequence;
mod store;
mod types;

pub use error::StoreError;
pub use query::{Page, Query};
pub use sequence::{IdAllocator, IdSequence};
pub use store::{StoreGeneric, WidgetRepository, WidgetStore};
pub use types::{Area, Point, Widget, WidgetDraft, WidgetId, WidgetPatch};
