pub mod classifier;
pub mod propagator;
pub mod sequencer;

pub use classifier::NodeClassifier;
pub use propagator::ExclusionPropagator;
pub use sequencer::{DeletionOutcome, DeletionSequencer, RoundProgress, DEFAULT_CHUNK_LIMIT};
