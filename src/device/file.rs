use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};
use tracing::info;

use super::{DeviceError, RadioSink, StreamSetup};
use crate::phy::SampleBuffer;

/// File-backed sink: writes pushed buffers as interleaved little-endian
/// 16-bit I/Q (the SC16 stream the hardware would have been fed).
///
/// Enforces the same block-alignment contract as the hardware path, so
/// offline runs catch sizing bugs.
pub struct FileSink<W: Write> {
    writer: W,
    setup: Option<StreamSetup>,
    transmitting: bool,
    pairs_written: usize,
}

impl FileSink<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self, DeviceError> {
        let file = File::create(path)?;
        info!("Writing SC16 I/Q stream to {}", path.display());
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> FileSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            setup: None,
            transmitting: false,
            pairs_written: 0,
        }
    }

    /// Total pairs accepted so far
    pub fn pairs_written(&self) -> usize {
        self.pairs_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RadioSink for FileSink<W> {
    fn configure_streaming(&mut self, setup: &StreamSetup) -> Result<(), DeviceError> {
        self.setup = Some(*setup);
        Ok(())
    }

    fn enable_transmit(&mut self, on: bool) -> Result<(), DeviceError> {
        self.transmitting = on;
        if !on {
            self.writer.flush()?;
        }
        Ok(())
    }

    fn push_samples(&mut self, samples: &SampleBuffer) -> Result<(), DeviceError> {
        let setup = self.setup.ok_or(DeviceError::NotConfigured)?;
        if !self.transmitting {
            return Err(DeviceError::NotConfigured);
        }
        if samples.len() % setup.block_pairs != 0 {
            return Err(DeviceError::UnalignedBuffer {
                len: samples.len(),
                block: setup.block_pairs,
            });
        }

        for pair in samples.as_pairs() {
            self.writer.write_i16::<LittleEndian>(pair.re)?;
            self.writer.write_i16::<LittleEndian>(pair.im)?;
        }
        self.pairs_written += samples.len();
        Ok(())
    }
}
