//! Runtime support library for ahead-of-time compiled yar programs.
//!
//! The value model lives in [`runtime`]; [`runtime::abi`] is the C surface
//! generated code links against.

pub mod config;
pub mod diagnostics;
pub mod runtime;
