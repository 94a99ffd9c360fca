//! Regex-matched views
//!
//! Convenience for views whose path logic is a URL pattern. Named groups
//! become kwargs, unnamed groups positional args. Patterns are used as given,
//! so anchor them (`^...$`) to avoid prefix matches.

use regex::Regex;
use std::fmt;
use std::sync::Arc;

use super::domain::{Args, Kwargs, PathMatch, View, ViewArgs};
use crate::errors::Result;
use crate::features::dispatch::{Request, Response};
use crate::shared::models::Value;

type Handler = Arc<dyn Fn(&Request, &ViewArgs) -> Result<Response> + Send + Sync>;

#[derive(Clone)]
pub struct RegexView {
    pattern: Regex,
    handler: Handler,
}

impl fmt::Debug for RegexView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegexView")
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

impl RegexView {
    pub fn new<H>(pattern: &str, handler: H) -> Result<Self>
    where
        H: Fn(&Request, &ViewArgs) -> Result<Response> + Send + Sync + 'static,
    {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            handler: Arc::new(handler),
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl View for RegexView {
    fn match_path(&self, path: &str) -> Option<PathMatch> {
        let captures = self.pattern.captures(path)?;
        let mut kwargs = Kwargs::new();
        let mut args = Args::new();
        for (i, name) in self.pattern.capture_names().enumerate().skip(1) {
            let Some(group) = captures.get(i) else {
                continue;
            };
            let value = Value::from(group.as_str());
            match name {
                Some(name) => {
                    kwargs.insert(name.to_string(), value);
                }
                None => args.push(value),
            }
        }
        Some(PathMatch::Full { kwargs, args })
    }

    fn call(&self, request: &Request, args: &ViewArgs) -> Result<Response> {
        (self.handler)(request, args)
    }
}
