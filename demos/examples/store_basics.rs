// Copyright 2025 the Widget Store Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Walk through the service: create, shift, page, query a rectangle, delete.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p widget_demos --example store_basics`

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;
use widget_service::{ListParams, ServiceConfig, ServiceError, WidgetInput, WidgetService};
use widget_store::{Point, Widget, WidgetStore};

fn show(label: &str, widgets: &[Widget]) {
    println!("{label}:");
    for w in widgets {
        println!(
            "  #{:<3} z={:<4} at ({}, {}) size {}x{}",
            w.id, w.z_order, w.x, w.y, w.width, w.height
        );
    }
}

fn main() -> Result<(), ServiceError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServiceConfig::from_toml_str("default_page_size = 3")?;
    let svc = WidgetService::new(Arc::new(WidgetStore::new()), config);

    // Three widgets stacked at z = 1, 2, 3, then one more dropped onto z = 1.
    for (x, y) in [(0, 0), (50, 50), (100, 100)] {
        svc.create(&WidgetInput::new(x, y, 100, 100))?;
    }
    let bottom = svc.create(&WidgetInput::new(0, 50, 100, 100).with_z_order(1))?;
    info!(id = %bottom.id, "inserted under the stack");
    show("after shift", &svc.list(&ListParams::default())?);

    let page_two = ListParams {
        page: Some(2),
        ..ListParams::default()
    };
    show("page 2 (size 3)", &svc.list(&page_two)?);

    let rect = ListParams {
        lower_left: Some(Point::new(0, 0)),
        upper_right: Some(Point::new(100, 150)),
        ..ListParams::default()
    };
    show("inside (0,0)-(100,150)", &svc.list(&rect)?);

    let moved = svc.update(
        bottom.id,
        &WidgetInput {
            z_order: Some(10),
            ..WidgetInput::default()
        },
    )?;
    info!(id = %moved.id, z_order = moved.z_order, "moved to the top");
    svc.delete(moved.id);
    show("after delete", &svc.list(&ListParams::default())?);

    match svc.create(&WidgetInput::new(0, 0, 0, 10)) {
        Err(err) => println!("rejected: {err}"),
        Ok(w) => println!("unexpectedly accepted #{}", w.id),
    }
    Ok(())
}
