// Copyright 2025 the Widget Store Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Readers scanning the store while writers keep inserting at the bottom.
//!
//! Every snapshot a reader takes must be strictly ordered by z, even though
//! each insert renumbers the whole stack.
//!
//! Run:
//! - `RUST_LOG=widget_store=trace cargo run -p widget_demos --example concurrent_readers`

use std::thread;

use tracing::info;
use tracing_subscriber::EnvFilter;
use widget_store::{Query, WidgetDraft, WidgetRepository, WidgetStore};

const WRITERS: i32 = 2;
const READERS: usize = 4;
const INSERTS: i32 = 500;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store = WidgetStore::new();
    let (scans, torn) = thread::scope(|s| {
        for t in 0..WRITERS {
            let store = &store;
            s.spawn(move || {
                for i in 0..INSERTS {
                    let draft = WidgetDraft::new(t * 1_000 + i, i, 10, 10).with_z_order(1);
                    let _ = store.insert(draft);
                }
            });
        }
        let readers: Vec<_> = (0..READERS)
            .map(|_| {
                let store = &store;
                s.spawn(move || {
                    let mut scans = 0_usize;
                    let mut torn = 0_usize;
                    while store.len() < (WRITERS * INSERTS) as usize {
                        let all = store.find_all(&Query::all());
                        if !all.windows(2).all(|p| p[0].z_order < p[1].z_order) {
                            torn += 1;
                        }
                        scans += 1;
                    }
                    (scans, torn)
                })
            })
            .collect();
        readers
            .into_iter()
            .filter_map(|h| h.join().ok())
            .fold((0, 0), |(a, b), (s, t)| (a + s, b + t))
    });

    let top = store.max_z_order().map(|w| w.z_order);
    info!(widgets = store.len(), ?top, scans, torn, "done");
    println!(
        "{} widgets, top z = {top:?}, {scans} scans, {torn} out-of-order snapshots",
        store.len()
    );
}
