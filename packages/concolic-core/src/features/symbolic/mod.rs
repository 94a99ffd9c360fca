//! Symbolic-value library port
//!
//! The symbolic-value primitives belong to the external execution engine.
//! This crate only needs three capabilities from it:
//!
//! 1. test whether a value is a symbolic int or string
//! 2. construct a symbolic value from an identifier
//! 3. read a value's symbolic identifier
//!
//! (1) and (3) are answered by the shared `Value` model; (2) is the
//! `SymbolicLibrary` trait, injected into the bridge.

pub mod library;

pub use library::{SampleLibrary, SymbolicLibrary};
