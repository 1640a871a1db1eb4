// Transmit-side device seam. The core only ever borrows a RadioSink;
// opening, tuning and closing the device belong to the caller.

pub mod file;
#[cfg(feature = "soapy")]
pub mod soapy;

use thiserror::Error;

use crate::phy::SampleBuffer;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("device I/O failed")]
    Io(#[from] std::io::Error),

    #[error("buffer of {len} pairs is not a multiple of the {block}-pair stream block")]
    UnalignedBuffer { len: usize, block: usize },

    #[error("stream used before configure_streaming")]
    NotConfigured,

    #[cfg(feature = "soapy")]
    #[error("SoapySDR backend error")]
    Backend(#[from] soapysdr::Error),
}

/// Synchronous stream geometry negotiated before transmission.
#[derive(Debug, Clone, Copy)]
pub struct StreamSetup {
    /// Stream block size in (I,Q) pairs; pushed buffers must be multiples
    pub block_pairs: usize,
    /// Driver-side buffering depth in blocks
    pub num_blocks: usize,
    /// Per-push timeout (milliseconds)
    pub timeout_ms: u64,
}

/// A configured, ready-to-transmit radio handle.
///
/// `push_samples` blocks until the device has accepted the whole buffer.
pub trait RadioSink {
    fn configure_streaming(&mut self, setup: &StreamSetup) -> Result<(), DeviceError>;
    fn enable_transmit(&mut self, on: bool) -> Result<(), DeviceError>;
    fn push_samples(&mut self, samples: &SampleBuffer) -> Result<(), DeviceError>;
}
