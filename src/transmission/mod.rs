/// Transmission protocol layer
pub mod sequencer;

pub use sequencer::*;
