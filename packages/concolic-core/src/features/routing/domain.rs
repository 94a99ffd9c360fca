//! Views, view map and resolver matches

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use crate::errors::Result;
use crate::features::dispatch::{Request, Response};
use crate::shared::models::Value;

pub type Kwargs = BTreeMap<String, Value>;
pub type Args = Vec<Value>;

/// What a view's own matcher returned for a path
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PathMatch {
    /// Matched with no arguments
    #[default]
    Bare,
    /// Named groups only
    Kwargs(Kwargs),
    /// Named and positional groups
    Full { kwargs: Kwargs, args: Args },
}

impl PathMatch {
    /// `(kwargs, args)`; named groups win, so positional args are dropped
    /// whenever kwargs is non-empty.
    pub fn normalize(self) -> (Kwargs, Args) {
        match self {
            PathMatch::Bare => (Kwargs::new(), Args::new()),
            PathMatch::Kwargs(kwargs) => (kwargs, Args::new()),
            PathMatch::Full { kwargs, args } if kwargs.is_empty() => (kwargs, args),
            PathMatch::Full { kwargs, .. } => (kwargs, Args::new()),
        }
    }
}

impl From<()> for PathMatch {
    fn from(_: ()) -> Self {
        PathMatch::Bare
    }
}

impl From<Kwargs> for PathMatch {
    fn from(kwargs: Kwargs) -> Self {
        PathMatch::Kwargs(kwargs)
    }
}

impl From<(Kwargs, Args)> for PathMatch {
    fn from((kwargs, args): (Kwargs, Args)) -> Self {
        PathMatch::Full { kwargs, args }
    }
}

/// Arguments a view is called with
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewArgs {
    pub args: Args,
    pub kwargs: Kwargs,
}

impl ViewArgs {
    pub fn kwarg(&self, name: &str) -> Option<&Value> {
        self.kwargs.get(name)
    }
}

/// Application view: matches its own paths and handles requests
pub trait View: Send + Sync {
    /// `Some` if this view serves `path`
    fn match_path(&self, path: &str) -> Option<PathMatch>;

    fn call(&self, request: &Request, args: &ViewArgs) -> Result<Response>;
}

/// View built from a matcher closure and a handler closure
pub struct FnView<M, H> {
    matcher: M,
    handler: H,
}

impl<M, H> FnView<M, H>
where
    M: Fn(&str) -> Option<PathMatch> + Send + Sync,
    H: Fn(&Request, &ViewArgs) -> Result<Response> + Send + Sync,
{
    pub fn new(matcher: M, handler: H) -> Self {
        Self { matcher, handler }
    }
}

impl<M, H> View for FnView<M, H>
where
    M: Fn(&str) -> Option<PathMatch> + Send + Sync,
    H: Fn(&Request, &ViewArgs) -> Result<Response> + Send + Sync,
{
    fn match_path(&self, path: &str) -> Option<PathMatch> {
        (self.matcher)(path)
    }

    fn call(&self, request: &Request, args: &ViewArgs) -> Result<Response> {
        (self.handler)(request, args)
    }
}

/// Ordered, immutable routing surface: dotted view name → view
#[derive(Clone, Default)]
pub struct ViewMap {
    entries: Vec<(String, Arc<dyn View>)>,
}

impl fmt::Debug for ViewMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl ViewMap {
    pub fn builder() -> ViewMapBuilder {
        ViewMapBuilder::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn View>)> {
        self.entries.iter().map(|(name, view)| (name.as_str(), view))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn View>> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, view)| view)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// First dotted segment of every view name (`app` of `app.views.f`)
    pub fn app_labels(&self) -> BTreeSet<&str> {
        self.entries
            .iter()
            .filter_map(|(name, _)| name.split('.').next())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Default)]
pub struct ViewMapBuilder {
    entries: Vec<(String, Arc<dyn View>)>,
}

impl ViewMapBuilder {
    /// Add a view; a repeated name replaces the earlier view in place
    pub fn view(mut self, name: impl Into<String>, view: impl View + 'static) -> Self {
        self.insert(name.into(), Arc::new(view));
        self
    }

    /// Add an already shared view
    pub fn shared(mut self, name: impl Into<String>, view: Arc<dyn View>) -> Self {
        self.insert(name.into(), view);
        self
    }

    pub fn build(self) -> ViewMap {
        ViewMap {
            entries: self.entries,
        }
    }

    fn insert(&mut self, name: String, view: Arc<dyn View>) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = view,
            None => self.entries.push((name, view)),
        }
    }
}

/// Result of resolving one path
#[derive(Clone)]
pub struct ResolverMatch {
    pub func: Arc<dyn View>,
    pub args: Args,
    pub kwargs: Kwargs,
    /// Last dotted segment of the view name
    pub url_name: String,
    /// Full dotted view name
    pub view_path: String,
}

impl ResolverMatch {
    pub fn new(view_path: &str, func: Arc<dyn View>, path_match: PathMatch) -> Self {
        let (kwargs, args) = path_match.normalize();
        let url_name = view_path.rsplit('.').next().unwrap_or(view_path).to_string();
        Self {
            func,
            args,
            kwargs,
            url_name,
            view_path: view_path.to_string(),
        }
    }

    pub fn view_args(&self) -> ViewArgs {
        ViewArgs {
            args: self.args.clone(),
            kwargs: self.kwargs.clone(),
        }
    }

    /// Invoke the resolved view
    pub fn call(&self, request: &Request) -> Result<Response> {
        self.func.call(request, &self.view_args())
    }

    /// Same view object and same arguments
    pub fn same_as(&self, other: &ResolverMatch) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
            && self.args == other.args
            && self.kwargs == other.kwargs
            && self.view_path == other.view_path
    }
}

impl fmt::Debug for ResolverMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverMatch")
            .field("args", &self.args)
            .field("kwargs", &self.kwargs)
            .field("url_name", &self.url_name)
            .field("view_path", &self.view_path)
            .finish_non_exhaustive()
    }
}
