//! Form-parser seam
//!
//! The request pipeline parses bodies through a `FormParser` it is handed,
//! so symbolic restoration is plugged in by wrapping the parser instead of
//! patching the host's parser in place.

use std::collections::BTreeMap;
use std::sync::Arc;

use url::form_urlencoded;

use super::form::FormData;
use super::shim::parse_post_data;
use crate::errors::Result;
use crate::features::value_bridge::SymbolicBridge;
use crate::shared::models::Value;

pub trait FormParser: Send + Sync {
    /// Split a body into raw string fields
    fn parse_raw(&self, body: &str) -> Result<FormData<String>>;

    /// Parse a body into values
    fn parse(&self, body: &str) -> Result<FormData<Value>> {
        let raw = self.parse_raw(body)?;
        Ok(raw
            .iter_lists()
            .flat_map(|(key, values)| values.iter().map(move |v| (key, Value::Str(v.clone()))))
            .collect())
    }
}

impl<P: FormParser + ?Sized> FormParser for Arc<P> {
    fn parse_raw(&self, body: &str) -> Result<FormData<String>> {
        (**self).parse_raw(body)
    }

    fn parse(&self, body: &str) -> Result<FormData<Value>> {
        (**self).parse(body)
    }
}

/// `application/x-www-form-urlencoded` bodies and query strings
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlEncodedParser;

impl FormParser for UrlEncodedParser {
    fn parse_raw(&self, body: &str) -> Result<FormData<String>> {
        Ok(form_urlencoded::parse(body.trim_start_matches('?').as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect())
    }
}

/// Wraps a parser and restores tokens in its output
#[derive(Debug, Clone)]
pub struct SymbolicFormParser<P> {
    inner: P,
    bridge: SymbolicBridge,
}

impl<P: FormParser> SymbolicFormParser<P> {
    pub fn new(inner: P, bridge: SymbolicBridge) -> Self {
        Self { inner, bridge }
    }
}

impl<P: FormParser> FormParser for SymbolicFormParser<P> {
    fn parse_raw(&self, body: &str) -> Result<FormData<String>> {
        self.inner.parse_raw(body)
    }

    fn parse(&self, body: &str) -> Result<FormData<Value>> {
        Ok(parse_post_data(&self.bridge, &self.inner.parse_raw(body)?))
    }
}

/// Encode fields as a urlencoded body; values must already be tokens or
/// concrete.
pub fn encode_urlencoded(fields: &BTreeMap<String, Value>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in fields {
        serializer.append_pair(key, &value.to_form_string());
    }
    serializer.finish()
}
