/// Ports module defining interfaces for hexagonal architecture
///
/// This module contains the outbound (driven) ports - the infrastructure
/// interfaces the application core consumes.
pub mod outbound;
