//! Simulated request and response

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::form::FormData;
use crate::errors::Result;
use crate::features::data_access::{Manager, ModelRegistry};
use crate::shared::models::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request as a view sees it: parsed (and restored) form data plus the
/// mutation-aware managers of the run.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub get: FormData<Value>,
    pub post: FormData<Value>,
    pub meta: BTreeMap<String, String>,
    models: ModelRegistry,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>, models: ModelRegistry) -> Self {
        Self {
            method,
            path: path.into(),
            get: FormData::new(),
            post: FormData::new(),
            meta: BTreeMap::new(),
            models,
        }
    }

    /// `Model.objects` for the view
    pub fn objects(&self, model: &str) -> Result<Arc<dyn Manager>> {
        self.models.objects(model)
    }

    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }

    /// `scheme://SERVER_NAME/path`, built from the request environment
    pub fn build_absolute_uri(&self) -> String {
        let scheme = self.meta("wsgi.url_scheme").unwrap_or("http");
        let host = self.meta("SERVER_NAME").unwrap_or_default();
        match self.meta("QUERY_STRING") {
            Some(query) if !query.is_empty() => format!("{}://{}{}?{}", scheme, host, self.path, query),
            _ => format!("{}://{}{}", scheme, host, self.path),
        }
    }
}

/// View result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub status: u16,
    pub body: String,
    /// Values handed to rendering, kept unconverted so symbolic values
    /// survive into the response
    pub context: BTreeMap<String, Value>,
}

impl Response {
    pub fn ok(body: impl Into<String>) -> Self {
        Self::with_status(200, body)
    }

    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            context: BTreeMap::new(),
        }
    }

    pub fn not_found(path: &str) -> Self {
        Self::with_status(404, format!("Not Found: {}", path))
    }

    pub fn redirect(location: impl Into<String>) -> Self {
        Self::with_status(302, location)
    }

    /// Builder: add a rendering context entry
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
