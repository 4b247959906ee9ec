/// Application layer - the cleaner session facade and read models
///
/// This layer orchestrates the domain services and coordinates with
/// infrastructure through ports.
pub mod dto;
pub mod session;

pub use session::CleanerSession;
