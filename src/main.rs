use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use ooktx::device::RadioSink;
use ooktx::device::file::FileSink;
use ooktx::transmission::{RunConfig, TransmissionRun};
use ooktx::ui::{RunProgress, print_banner};
use ooktx::utils::consts::*;
use ooktx::utils::logging::init_logging;

#[derive(Parser)]
#[clap(name = "ooktx", version)]
#[clap(about = "Transmit a file as an OOK/RS232-framed carrier through an SDR", long_about = None)]
struct Cli {
    /// File to transmit
    file: PathBuf,

    /// Carrier frequency (Hz)
    #[clap(long, default_value_t = CARRIER_FREQ)]
    frequency: u64,

    /// Sample rate (Hz)
    #[clap(long, default_value_t = SAMPLE_RATE)]
    sample_rate: u32,

    /// Serial baud rate
    #[clap(long, default_value_t = BAUD_RATE)]
    baud: u32,

    /// Transmit gain (dB)
    #[clap(long, default_value_t = TX_GAIN)]
    gain: f64,

    /// Transmit bandwidth (Hz), defaults to half the sample rate
    #[clap(long)]
    bandwidth: Option<u32>,

    /// Times the payload is retransmitted
    #[clap(long, default_value_t = PAYLOAD_REPEATS)]
    repeats: u32,

    /// Carrier-only warm-up before data (seconds)
    #[clap(long, default_value_t = WARMUP_SECONDS)]
    warmup_secs: u32,

    /// SoapySDR device filter, e.g. "driver=bladerf" (requires the soapy feature)
    #[clap(long, default_value = "")]
    device: String,

    /// Write the SC16 I/Q stream to this file instead of a radio
    #[clap(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging();
    print_banner();
    let cli = Cli::parse();

    let payload = fs::read(&cli.file)
        .with_context(|| format!("could not read input file '{}'", cli.file.display()))?;
    info!(
        "Loaded {} bytes from {}",
        payload.len(),
        cli.file.display()
    );
    info!(
        "Tuning: {} Hz carrier, {} Hz sample rate, {} Bd, {:.1} dB gain, {:.0} Hz bandwidth",
        cli.frequency,
        cli.sample_rate,
        cli.baud,
        cli.gain,
        cli.bandwidth
            .map(f64::from)
            .unwrap_or(cli.sample_rate as f64 / 2.0)
    );

    let config = RunConfig {
        sample_rate: cli.sample_rate,
        baud: cli.baud,
        warmup_seconds: cli.warmup_secs,
        repeats: cli.repeats,
        mark: MARK_LEVEL,
        space: SPACE_LEVEL,
    };
    let mut run = TransmissionRun::prepare(&payload, &config)
        .context("could not prepare the transmission buffers")?;

    let mut sink: Box<dyn RadioSink> = match &cli.output {
        Some(path) => Box::new(FileSink::create(path)?),
        None => open_hardware(&cli)?,
    };

    let mut progress = RunProgress::new(cli.repeats);
    let result = run.transmit(sink.as_mut(), &mut progress);

    // Always try to drop the carrier, but never mask a run error with a
    // disable error.
    if let Err(err) = sink.enable_transmit(false) {
        if result.is_ok() {
            return Err(err).context("could not disable the transmit path");
        }
        error!("Could not disable the transmit path: {}", err);
    }

    result.context("transmission run failed")?;
    info!(
        "Transmission complete, {} sample pairs pushed",
        run.total_pairs()
    );
    Ok(())
}

#[cfg(feature = "soapy")]
fn open_hardware(cli: &Cli) -> Result<Box<dyn RadioSink>> {
    use ooktx::device::soapy::{RadioTuning, SoapySink};

    let tuning = RadioTuning {
        frequency_hz: cli.frequency as f64,
        sample_rate: cli.sample_rate as f64,
        bandwidth: cli
            .bandwidth
            .map(f64::from)
            .unwrap_or(cli.sample_rate as f64 / 2.0),
        gain_db: cli.gain,
        antenna: None,
    };
    let sink = SoapySink::open(&cli.device, &tuning)
        .context("could not open and tune the SoapySDR device")?;
    Ok(Box::new(sink))
}

#[cfg(not(feature = "soapy"))]
fn open_hardware(cli: &Cli) -> Result<Box<dyn RadioSink>> {
    anyhow::bail!(
        "built without SoapySDR support, cannot open device '{}'; pass --output <path> \
         to write an SC16 file, or rebuild with --features soapy",
        cli.device
    )
}
