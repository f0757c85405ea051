pub mod abi;
pub mod builtins;
pub mod error;
pub mod format;
pub mod heap;
pub mod ops;
pub mod platform;
pub mod value;

pub use error::{RuntimeError, RuntimeResult};
pub use value::Value;
