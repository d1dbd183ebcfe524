// Copyright 2025 the Widget Store Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Request handling over a [`WidgetRepository`].

use core::num::NonZeroUsize;
use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;
use widget_store::{Area, Point, Query, StoreError, Widget, WidgetId, WidgetRepository};

use crate::config::ServiceConfig;
use crate::error::ServiceError;
use crate::input::{WidgetInput, validate_new, validate_patch};

/// Raw list-request parameters, before validation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ListParams {
    /// Widgets per page.
    pub size: Option<i64>,
    /// 1-based page number.
    pub page: Option<i64>,
    /// Lower-left corner of the query rectangle.
    pub lower_left: Option<Point>,
    /// Upper-right corner of the query rectangle.
    pub upper_right: Option<Point>,
}

/// Validating front end for a widget repository.
#[derive(Debug)]
pub struct WidgetService<R: WidgetRepository> {
    repo: Arc<R>,
    config: ServiceConfig,
}

impl<R: WidgetRepository> Clone for WidgetService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            config: self.config.clone(),
        }
    }
}

impl<R: WidgetRepository> WidgetService<R> {
    /// Wrap `repo` with the given configuration.
    pub fn new(repo: Arc<R>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    /// The underlying repository.
    pub fn repository(&self) -> &Arc<R> {
        &self.repo
    }

    /// The active configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Validate and store a new widget.
    pub fn create(&self, input: &WidgetInput) -> Result<Widget, ServiceError> {
        let draft = validate_new(input).inspect_err(|err| debug!(%err, "rejected create"))?;
        let widget = self.repo.insert(draft)?;
        debug!(id = %widget.id, z_order = widget.z_order, "created widget");
        Ok(widget)
    }

    /// Fetch one widget.
    pub fn get(&self, id: WidgetId) -> Result<Widget, ServiceError> {
        self.repo.find_by_id(id).ok_or(ServiceError::NotFound(id))
    }

    /// Validate and apply a partial update.
    pub fn update(&self, id: WidgetId, input: &WidgetInput) -> Result<Widget, ServiceError> {
        let patch = validate_patch(input).inspect_err(|err| debug!(%err, "rejected update"))?;
        match self.repo.update(id, patch) {
            Ok(widget) => Ok(widget),
            Err(StoreError::UnknownWidget(id)) => Err(ServiceError::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }

    /// Delete a widget. Deleting an unknown id succeeds.
    pub fn delete(&self, id: WidgetId) {
        if self.repo.remove(id).is_some() {
            debug!(%id, "deleted widget");
        }
    }

    /// List widgets in z-order.
    ///
    /// A request with only the two corners goes through the x-ordered
    /// rectangle path. Everything else is a z-order scan: the page size
    /// defaults to [`ServiceConfig::default_page_size`], and paging applies
    /// only when a page number is present.
    pub fn list(&self, params: &ListParams) -> Result<Vec<Widget>, ServiceError> {
        let area = Area::from_corners(params.lower_left, params.upper_right);
        if params.size.is_none()
            && params.page.is_none()
            && let Some(area) = area
        {
            return Ok(self.repo.find_all_in_rectangle(area));
        }

        let size = match params.size {
            None => self.config.default_page_size,
            Some(size) => self.page_size(size)?,
        };
        let page = params.page.map(page_number).transpose()?;
        let query = Query::from_parts(
            NonZeroUsize::new(size),
            page,
            params.lower_left,
            params.upper_right,
        );
        Ok(self.repo.find_all(&query))
    }

    fn page_size(&self, size: i64) -> Result<usize, ServiceError> {
        if size <= 0 {
            return Err(ServiceError::invalid(format!(
                "Page size must be greater than zero, but was: {size}."
            )));
        }
        let max = self.config.max_page_size;
        match usize::try_from(size) {
            Ok(size) if size <= max => Ok(size),
            _ => Err(ServiceError::invalid(format!(
                "Page size can be at most {max}, but was: {size}."
            ))),
        }
    }
}

fn page_number(page: i64) -> Result<NonZeroUsize, ServiceError> {
    usize::try_from(page)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or_else(|| {
            ServiceError::invalid(format!(
                "The requested 'page' must be greater than zero, but was: {page}."
            ))
        })
}
