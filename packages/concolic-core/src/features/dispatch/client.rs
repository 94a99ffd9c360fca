//! Simulated client
//!
//! Issues a request the way a browser would reach the application: symbolic
//! fields become tokens, the form is urlencoded, then parsed back through the
//! injected parser (which restores the tokens), resolved through the injected
//! resolver and handed to the view.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::parser::{encode_urlencoded, FormParser};
use super::request::{Method, Request, Response};
use super::shim::build_post_data;
use crate::config::ClientConfig;
use crate::errors::{ConcolicError, Result};
use crate::features::data_access::ModelRegistry;
use crate::features::routing::UrlResolver;
use crate::features::value_bridge::SymbolicBridge;
use crate::shared::models::Value;

pub struct SymClient {
    bridge: SymbolicBridge,
    parser: Arc<dyn FormParser>,
    resolver: Arc<dyn UrlResolver>,
    models: ModelRegistry,
    config: ClientConfig,
}

impl fmt::Debug for SymClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymClient")
            .field("bridge", &self.bridge)
            .field("models", &self.models)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SymClient {
    pub fn new(
        bridge: SymbolicBridge,
        parser: Arc<dyn FormParser>,
        resolver: Arc<dyn UrlResolver>,
        models: ModelRegistry,
        config: ClientConfig,
    ) -> Self {
        Self {
            bridge,
            parser,
            resolver,
            models,
            config,
        }
    }

    /// GET with `data` as the query string
    pub fn get(&self, path: &str, data: &BTreeMap<String, Value>) -> Result<Response> {
        self.request(Method::Get, path, data)
    }

    /// POST with `data` as a urlencoded body
    pub fn post(&self, path: &str, data: &BTreeMap<String, Value>) -> Result<Response> {
        self.request(Method::Post, path, data)
    }

    /// Run one request through parse, resolve and view.
    ///
    /// A path no view serves yields a 404 response; errors raised by the view
    /// (including FieldErrors from data access) propagate.
    pub fn request(&self, method: Method, path: &str, data: &BTreeMap<String, Value>) -> Result<Response> {
        let request = self.build_request(method, path, data)?;
        tracing::debug!("{} {}", method, request.path);

        let resolved = match self.resolver.resolve(&request.path) {
            Ok(resolved) => resolved,
            Err(ConcolicError::NotFound { path }) => return Ok(Response::not_found(&path)),
            Err(err) => return Err(err),
        };
        resolved.call(&request)
    }

    /// Request as the view will see it, without dispatching it
    pub fn build_request(&self, method: Method, path: &str, data: &BTreeMap<String, Value>) -> Result<Request> {
        let (path, inline_query) = path.split_once('?').unwrap_or((path, ""));
        let encoded = encode_urlencoded(&build_post_data(&self.bridge, data));

        let (query, body) = match method {
            Method::Get => (join_query(inline_query, &encoded), String::new()),
            Method::Post => (inline_query.to_string(), encoded),
        };

        let mut request = Request::new(method, path, self.models.clone());
        request.get = self.parser.parse(&query)?;
        if method == Method::Post {
            request.post = self.parser.parse(&body)?;
            request.meta.insert(
                "CONTENT_TYPE".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            );
        }

        request.meta.insert("REQUEST_METHOD".to_string(), method.to_string());
        request.meta.insert("SERVER_NAME".to_string(), self.config.server_name.clone());
        request.meta.insert("wsgi.url_scheme".to_string(), self.config.url_scheme.clone());
        request.meta.insert("PATH_INFO".to_string(), path.to_string());
        request.meta.insert("QUERY_STRING".to_string(), query);
        Ok(request)
    }
}

fn join_query(inline: &str, encoded: &str) -> String {
    match (inline.is_empty(), encoded.is_empty()) {
        (true, _) => encoded.to_string(),
        (false, true) => inline.to_string(),
        (false, false) => format!("{}&{}", inline, encoded),
    }
}
