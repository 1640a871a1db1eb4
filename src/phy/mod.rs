// Physical layer: serial framing, buffer sizing, OOK waveform synthesis

pub mod frame;
pub mod sizing;
pub mod waveform;

pub use sizing::{BufferPlan, PlanError};
pub use waveform::{AllocationError, SampleBuffer, WaveformBuilder};
