use thiserror::Error;
use tracing::{debug, info};

use crate::device::{DeviceError, RadioSink, StreamSetup};
use crate::phy::{AllocationError, BufferPlan, PlanError, SampleBuffer, WaveformBuilder};
use crate::utils::consts::{BLOCK_PAIRS, STREAM_BLOCKS, STREAM_TIMEOUT_MS};

/// Transmission protocol phases. `Failed` is absorbing and reachable from
/// any non-terminal phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Configured,
    WarmingUp,
    Transmitting,
    Done,
    Failed,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error("failed to configure streaming")]
    Configure(#[source] DeviceError),

    #[error("failed to enable the transmit path")]
    Enable(#[source] DeviceError),

    #[error("failed to transmit the warm-up carrier")]
    Warmup(#[source] DeviceError),

    #[error("failed to transmit payload repeat {repeat} of {total}")]
    Payload {
        repeat: u32,
        total: u32,
        #[source]
        source: DeviceError,
    },
}

/// Progress seam for the CLI; the core stays free of UI crates.
pub trait RunObserver {
    fn phase_changed(&mut self, phase: Phase) {
        let _ = phase;
    }
    fn repeat_done(&mut self, repeat: u32, total: u32) {
        let _ = (repeat, total);
    }
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Parameters of one transmission run.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    pub sample_rate: u32,
    pub baud: u32,
    pub warmup_seconds: u32,
    pub repeats: u32,
    pub mark: i16,
    pub space: i16,
}

/// One prepared transmission: owns the warm-up and payload buffers,
/// borrows the sink only while transmitting.
pub struct TransmissionRun {
    warmup: SampleBuffer,
    payload: SampleBuffer,
    repeats: u32,
    phase: Phase,
}

impl TransmissionRun {
    /// Size and build both buffers up front. Fails before any device
    /// interaction on an invalid rate or an allocation failure.
    pub fn prepare(payload: &[u8], config: &RunConfig) -> Result<Self, RunError> {
        let plan = BufferPlan::new(
            payload.len(),
            config.sample_rate,
            config.baud,
            config.warmup_seconds,
        )?;
        debug!(
            "Buffer plan: {} samples/symbol, {} -> {} payload pairs, {} warm-up pairs",
            plan.samples_per_symbol, plan.raw_pairs, plan.padded_pairs, plan.warmup_pairs
        );

        let builder =
            WaveformBuilder::new(plan.samples_per_symbol, config.mark, config.space);
        let warmup = builder.build_warmup(&plan)?;
        let sample_buffer = builder.build_payload(payload, &plan)?;

        Ok(Self {
            warmup,
            payload: sample_buffer,
            repeats: config.repeats,
            phase: Phase::Idle,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Pairs pushed by a completed run (warm-up plus all repeats)
    pub fn total_pairs(&self) -> usize {
        self.warmup.len() + self.payload.len() * self.repeats as usize
    }

    /// Drive the protocol to completion: configure, enable, warm up, then
    /// push the payload buffer `repeats` times. The first error aborts the
    /// run; nothing is retried. The caller disables the transmit path
    /// afterwards.
    pub fn transmit(
        &mut self,
        sink: &mut dyn RadioSink,
        observer: &mut dyn RunObserver,
    ) -> Result<(), RunError> {
        let result = self.pipeline(sink, observer);
        if result.is_err() {
            self.enter(Phase::Failed, observer);
        }
        result
    }

    fn pipeline(
        &mut self,
        sink: &mut dyn RadioSink,
        observer: &mut dyn RunObserver,
    ) -> Result<(), RunError> {
        let setup = StreamSetup {
            block_pairs: BLOCK_PAIRS,
            num_blocks: STREAM_BLOCKS,
            timeout_ms: STREAM_TIMEOUT_MS,
        };
        sink.configure_streaming(&setup)
            .map_err(RunError::Configure)?;
        self.enter(Phase::Configured, observer);

        sink.enable_transmit(true).map_err(RunError::Enable)?;
        self.enter(Phase::WarmingUp, observer);
        info!("Warming up transmitter ({} pairs)...", self.warmup.len());
        sink.push_samples(&self.warmup).map_err(RunError::Warmup)?;

        self.enter(Phase::Transmitting, observer);
        if self.payload.is_empty() {
            info!("Payload is empty; nothing to transmit after warm-up");
        } else {
            info!(
                "Transmitting {} pairs x {} repeats...",
                self.payload.len(),
                self.repeats
            );
            for repeat in 0..self.repeats {
                sink.push_samples(&self.payload)
                    .map_err(|source| RunError::Payload {
                        repeat,
                        total: self.repeats,
                        source,
                    })?;
                observer.repeat_done(repeat, self.repeats);
            }
        }

        self.enter(Phase::Done, observer);
        Ok(())
    }

    fn enter(&mut self, phase: Phase, observer: &mut dyn RunObserver) {
        debug!("Run phase: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        observer.phase_changed(phase);
    }
}
