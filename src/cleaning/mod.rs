/// Asset-cleaning domain: the dependency-graph engine (relational map,
/// classification, exclusion propagation) and the deletion sequencer.
pub mod domain;
pub mod services;
