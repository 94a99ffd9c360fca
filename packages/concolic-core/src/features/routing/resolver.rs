//! URL resolver seam and the virtual router

use std::sync::Arc;

use super::domain::{ResolverMatch, ViewMap};
use crate::errors::{ConcolicError, Result};
use crate::shared::models::Value;

/// Path → view resolution, injected into the request pipeline
pub trait UrlResolver: Send + Sync {
    fn resolve(&self, path: &str) -> Result<ResolverMatch>;

    fn reverse(&self, view_name: &str, args: &[Value]) -> String;
}

/// Resolves paths by asking each view of a `ViewMap` in order.
///
/// Holds no state besides the map, so resolving the same path twice gives
/// the same match. Built per request; cheap to construct.
#[derive(Debug, Clone)]
pub struct VirtualRouter {
    views: Arc<ViewMap>,
}

impl VirtualRouter {
    pub fn new(views: Arc<ViewMap>) -> Self {
        Self { views }
    }

    pub fn views(&self) -> &ViewMap {
        &self.views
    }
}

impl UrlResolver for VirtualRouter {
    fn resolve(&self, path: &str) -> Result<ResolverMatch> {
        for (name, view) in self.views.iter() {
            if let Some(path_match) = view.match_path(path) {
                tracing::debug!("resolved {} to {}", path, name);
                return Ok(ResolverMatch::new(name, view.clone(), path_match));
            }
        }
        tracing::debug!("no view matches {}", path);
        Err(ConcolicError::not_found(path))
    }

    fn reverse(&self, view_name: &str, _args: &[Value]) -> String {
        format!("<reverse: {}>", view_name)
    }
}
