use num_complex::Complex;
use soapysdr::Direction::Tx;
use tracing::{debug, info};

use super::{DeviceError, RadioSink, StreamSetup};
use crate::phy::SampleBuffer;

const TX_CHANNEL: usize = 0;

/// RF parameters applied to the transmit channel before a run.
#[derive(Debug, Clone)]
pub struct RadioTuning {
    pub frequency_hz: f64,
    pub sample_rate: f64,
    pub bandwidth: f64,
    pub gain_db: f64,
    pub antenna: Option<String>,
}

/// SoapySDR-backed hardware sink on TX channel 0.
pub struct SoapySink {
    dev: soapysdr::Device,
    stream: Option<soapysdr::TxStream<Complex<i16>>>,
    timeout_us: i64,
}

impl SoapySink {
    /// Open the first device matching `filter` (e.g. `driver=bladerf`) and
    /// apply `tuning`, logging the values the hardware settled on.
    pub fn open(filter: &str, tuning: &RadioTuning) -> Result<Self, DeviceError> {
        soapysdr::configure_logging();
        let dev = soapysdr::Device::new(filter)?;
        info!("Opened SoapySDR device: {}", dev.hardware_key()?);

        dev.set_frequency(Tx, TX_CHANNEL, tuning.frequency_hz, ())?;
        dev.set_sample_rate(Tx, TX_CHANNEL, tuning.sample_rate)?;
        info!(
            "Set sample rate to {}",
            dev.sample_rate(Tx, TX_CHANNEL)?
        );
        dev.set_bandwidth(Tx, TX_CHANNEL, tuning.bandwidth)?;
        info!("Set bandwidth to {}", dev.bandwidth(Tx, TX_CHANNEL)?);
        dev.set_gain(Tx, TX_CHANNEL, tuning.gain_db)?;
        if let Some(antenna) = &tuning.antenna {
            dev.set_antenna(Tx, TX_CHANNEL, antenna.as_str())?;
        }

        Ok(Self {
            dev,
            stream: None,
            timeout_us: 0,
        })
    }
}

impl RadioSink for SoapySink {
    fn configure_streaming(&mut self, setup: &StreamSetup) -> Result<(), DeviceError> {
        debug!(
            "Configuring CS16 TX stream: {} blocks of {} pairs",
            setup.num_blocks, setup.block_pairs
        );
        self.stream = Some(self.dev.tx_stream::<Complex<i16>>(&[TX_CHANNEL])?);
        self.timeout_us = setup.timeout_ms as i64 * 1000;
        Ok(())
    }

    fn enable_transmit(&mut self, on: bool) -> Result<(), DeviceError> {
        let stream = self.stream.as_mut().ok_or(DeviceError::NotConfigured)?;
        if on {
            stream.activate(None)?;
        } else {
            stream.deactivate(None)?;
        }
        Ok(())
    }

    fn push_samples(&mut self, samples: &SampleBuffer) -> Result<(), DeviceError> {
        let stream = self.stream.as_mut().ok_or(DeviceError::NotConfigured)?;
        let mut remaining = samples.as_pairs();
        // write() may accept fewer pairs than offered; loop until the
        // whole buffer is in the driver's hands.
        while !remaining.is_empty() {
            let written = stream.write(&[remaining], None, false, self.timeout_us)?;
            remaining = &remaining[written..];
        }
        Ok(())
    }
}
