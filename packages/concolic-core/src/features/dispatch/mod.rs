//! Request Dispatch Shim
//!
//! ## Architecture
//!
//! ```text
//! dispatch
//! ├── form     # FormData: multi-value form mapping
//! ├── shim     # build_post_data / parse_post_data
//! ├── parser   # FormParser seam, UrlEncodedParser, SymbolicFormParser
//! ├── request  # Request, Response, Method
//! └── client   # SymClient: simulated GET/POST
//! ```

pub mod client;
pub mod form;
pub mod parser;
pub mod request;
pub mod shim;

pub use client::SymClient;
pub use form::FormData;
pub use parser::{encode_urlencoded, FormParser, SymbolicFormParser, UrlEncodedParser};
pub use request::{Method, Request, Response};
pub use shim::{build_post_data, parse_post_data};
