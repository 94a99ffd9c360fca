//! Virtual Router
//!
//! Dispatches a path to application view code without a deployed URL table.
//! Each view decides for itself whether it serves a path; the router only
//! walks the `ViewMap` in order and normalizes what the first match returns.

pub mod domain;
pub mod pattern;
pub mod resolver;

pub use domain::{Args, FnView, Kwargs, PathMatch, ResolverMatch, View, ViewArgs, ViewMap, ViewMapBuilder};
pub use pattern::RegexView;
pub use resolver::{UrlResolver, VirtualRouter};
