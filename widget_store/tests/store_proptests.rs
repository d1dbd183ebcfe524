// Copyright 2025 the Widget Store Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for the widget store.
//!
//! Random operation sequences run against the store and against a naive
//! model that stores widgets in a `Vec` and shifts z-orders by brute force.
//! After every step the two must agree, and the store's invariants must hold.

use proptest::prelude::*;
use proptest::sample::Index;
use widget_store::{
    Area, Point, Query, Widget, WidgetDraft, WidgetId, WidgetPatch, WidgetRepository, WidgetStore,
};

/// Comparable part of a widget (everything except the timestamp).
type Row = (WidgetId, i32, i32, i32, i32, i32);

fn row(w: &Widget) -> Row {
    (w.id, w.x, w.y, w.width, w.height, w.z_order)
}

// ============================================================================
//  Model
// ============================================================================

#[derive(Debug, Default)]
struct Model {
    rows: Vec<Row>,
    next_id: u64,
}

impl Model {
    fn shift_from(&mut self, z_order: i32) {
        if !self.rows.iter().any(|r| r.5 == z_order) {
            return;
        }
        let mut target = z_order;
        // Raise the occupant of each consecutive slot until a free one.
        let mut to_raise = Vec::new();
        while let Some(pos) = self.rows.iter().position(|r| r.5 == target) {
            to_raise.push(pos);
            target += 1;
        }
        for pos in to_raise {
            self.rows[pos].5 += 1;
        }
    }

    fn insert(&mut self, x: i32, y: i32, w: i32, h: i32, z_order: Option<i32>) -> Row {
        let z_order =
            z_order.unwrap_or_else(|| self.rows.iter().map(|r| r.5).max().map_or(1, |m| m + 1));
        self.shift_from(z_order);
        self.next_id += 1;
        let r = (WidgetId(self.next_id), x, y, w, h, z_order);
        self.rows.push(r);
        r
    }

    fn update(&mut self, id: WidgetId, patch: WidgetPatch) {
        let pos = self.rows.iter().position(|r| r.0 == id).expect("known id");
        let mut r = self.rows.remove(pos);
        r.1 = patch.x.unwrap_or(r.1);
        r.2 = patch.y.unwrap_or(r.2);
        r.3 = patch.width.unwrap_or(r.3);
        r.4 = patch.height.unwrap_or(r.4);
        r.5 = patch.z_order.unwrap_or(r.5);
        self.shift_from(r.5);
        self.rows.push(r);
    }

    fn remove(&mut self, id: WidgetId) {
        self.rows.retain(|r| r.0 != id);
    }

    fn scan(&self) -> Vec<Row> {
        let mut rows = self.rows.clone();
        rows.sort_by_key(|r| r.5);
        rows
    }
}

// ============================================================================
//  Strategies
// ============================================================================

#[derive(Clone, Debug)]
enum Op {
    Insert {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        z: Option<i32>,
    },
    Update(Index, WidgetPatch),
    Remove(Index),
    RemoveMissing(u64),
}

fn coord() -> impl Strategy<Value = i32> {
    -50..50_i32
}

fn extent() -> impl Strategy<Value = i32> {
    1..40_i32
}

/// Narrow z range so collisions are common.
fn z_order() -> impl Strategy<Value = i32> {
    -3..12_i32
}

fn patch() -> impl Strategy<Value = WidgetPatch> {
    (
        prop::option::of(coord()),
        prop::option::of(coord()),
        prop::option::of(extent()),
        prop::option::of(extent()),
        prop::option::of(z_order()),
    )
        .prop_map(|(x, y, width, height, z_order)| WidgetPatch {
            x,
            y,
            width,
            height,
            z_order,
        })
}

fn operations(max_ops: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            4 => (coord(), coord(), extent(), extent(), prop::option::of(z_order()))
                .prop_map(|(x, y, w, h, z)| Op::Insert { x, y, w, h, z }),
            2 => (any::<Index>(), patch()).prop_map(|(i, p)| Op::Update(i, p)),
            1 => any::<Index>().prop_map(Op::Remove),
            1 => (1_000_u64..2_000).prop_map(Op::RemoveMissing),
        ],
        0..=max_ops,
    )
}

fn area() -> impl Strategy<Value = Area> {
    (coord(), coord(), 0..120_i32, 0..120_i32).prop_map(|(x, y, w, h)| {
        Area::new(Point::new(x, y), Point::new(x + w, y + h))
    })
}

// ============================================================================
//  Checks
// ============================================================================

fn check_invariants(store: &WidgetStore) -> Result<(), TestCaseError> {
    let all = store.find_all(&Query::all());
    prop_assert_eq!(all.len(), store.len());
    for pair in all.windows(2) {
        prop_assert!(
            pair[0].z_order < pair[1].z_order,
            "scan not strictly increasing: {:?}",
            pair
        );
    }
    let mut ids: Vec<_> = all.iter().map(|w| w.id).collect();
    ids.sort_unstable();
    ids.dedup();
    prop_assert_eq!(ids.len(), all.len(), "duplicate ids");
    for w in &all {
        prop_assert_eq!(store.find_by_id(w.id), Some(*w));
    }
    Ok(())
}

fn apply(store: &WidgetStore, model: &mut Model, op: &Op) {
    match *op {
        Op::Insert { x, y, w, h, z } => {
            let mut draft = WidgetDraft::new(x, y, w, h);
            draft.z_order = z;
            let stored = store.insert(draft).expect("insert");
            let expected = model.insert(x, y, w, h, z);
            assert_eq!(row(&stored), expected, "inserted widget differs");
        }
        Op::Update(index, patch) => {
            if model.rows.is_empty() {
                return;
            }
            let id = model.rows[index.index(model.rows.len())].0;
            store.update(id, patch).expect("update");
            model.update(id, patch);
        }
        Op::Remove(index) => {
            if model.rows.is_empty() {
                return;
            }
            let id = model.rows[index.index(model.rows.len())].0;
            assert!(store.remove(id).is_some(), "known id must be removed");
            model.remove(id);
        }
        Op::RemoveMissing(raw) => {
            let before = store.len();
            assert_eq!(store.remove(WidgetId(raw)), None);
            assert_eq!(store.len(), before, "deleting a missing id changed size");
        }
    }
}

// ============================================================================
//  Properties
// ============================================================================

proptest! {
    #[test]
    fn store_matches_model(ops in operations(60)) {
        let store = WidgetStore::new();
        let mut model = Model::default();
        for op in &ops {
            apply(&store, &mut model, op);
            let scanned: Vec<Row> = store.find_all(&Query::all()).iter().map(row).collect();
            prop_assert_eq!(scanned, model.scan(), "after {:?}", op);
            check_invariants(&store)?;
        }
    }

    #[test]
    fn rectangle_paths_agree(ops in operations(40), areas in prop::collection::vec(area(), 1..8)) {
        let store = WidgetStore::new();
        let mut model = Model::default();
        for op in &ops {
            apply(&store, &mut model, op);
        }
        for area in areas {
            let spatial = store.find_all_in_rectangle(area);
            let ordered = store.find_all(&Query::all().within(area));
            prop_assert_eq!(&spatial, &ordered);
            let expected: Vec<Row> = model
                .scan()
                .into_iter()
                .filter(|r| {
                    r.1 >= area.lower_left.x
                        && r.1 + r.3 <= area.upper_right.x
                        && r.2 >= area.lower_left.y
                        && r.2 + r.4 <= area.upper_right.y
                })
                .collect();
            let got: Vec<Row> = spatial.iter().map(row).collect();
            prop_assert_eq!(got, expected);
        }
    }

    #[test]
    fn pages_concatenate_to_the_full_scan(
        ops in operations(40),
        size in 1_usize..7,
        area in prop::option::of(area()),
    ) {
        use core::num::NonZeroUsize;
        use widget_store::Page;

        let store = WidgetStore::new();
        let mut model = Model::default();
        for op in &ops {
            apply(&store, &mut model, op);
        }
        let base = Query { page: None, area };
        let full = store.find_all(&base);
        let mut joined = Vec::new();
        for number in 1.. {
            let page = Page::new(
                NonZeroUsize::new(size).unwrap(),
                NonZeroUsize::new(number).unwrap(),
            );
            let chunk = store.find_all(&base.paged(page));
            prop_assert!(chunk.len() <= size);
            if chunk.is_empty() {
                break;
            }
            joined.extend(chunk);
        }
        prop_assert_eq!(joined, full);
    }

    #[test]
    fn insert_then_find_round_trips(x in coord(), y in coord(), w in extent(), h in extent()) {
        let store = WidgetStore::new();
        let stored = store.insert(WidgetDraft::new(x, y, w, h)).unwrap();
        let found = store.find_by_id(stored.id).unwrap();
        prop_assert_eq!((found.x, found.y, found.width, found.height), (x, y, w, h));
        prop_assert_eq!(found.z_order, 1);
        prop_assert_eq!(found, stored);
    }
}
