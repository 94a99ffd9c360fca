//! Symbolic Value Bridge
//!
//! The only place that knows the tagged-string token format. Everything else
//! goes through `SymbolicBridge::encode` / `SymbolicBridge::decode`, so the
//! token layout can change without touching call sites.
//!
//! ```rust,ignore
//! let bridge = SymbolicBridge::new(DEFAULT_TAG, Arc::new(SampleLibrary::new()));
//! let token = bridge.encode(&Value::from(SymbolicValue::int("x1", 0)));
//! // Value::Str("CoNcOlIc::concolic_int:x1")
//! let back = bridge.decode(token.as_str().unwrap());
//! assert_eq!(back.as_symbolic().unwrap().id(), "x1");
//! ```

pub mod codec;
pub mod token;

pub use codec::SymbolicBridge;
pub use token::Token;
