/// Shared utilities used by every layer: error types, the Result alias
/// and filesystem security checks.
pub mod error;
pub mod result;
pub mod security;

pub use result::Result;
