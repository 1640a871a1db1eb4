/// 日志级别（可被 RUST_LOG 覆盖）
pub const LOG_LEVEL: &str = "info";

// ============================================================================
// Transmission Parameters
// ============================================================================

/// Sample rate (Hz)
pub const SAMPLE_RATE: u32 = 300_000;

/// Serial baud rate (symbols per second)
pub const BAUD_RATE: u32 = 300;

/// Carrier frequency (Hz) - 315 MHz ISM band
pub const CARRIER_FREQ: u64 = 315_000_000;

/// Transmit gain (dB)
pub const TX_GAIN: f64 = 9.0;

/// Sample magnitude for a logical 1 (carrier on / idle)
pub const MARK_LEVEL: i16 = 1024;

/// Sample magnitude for a logical 0 (carrier off)
pub const SPACE_LEVEL: i16 = 0;

/// Symbols per serial frame: start + 8 data bits + stop
pub const SYMBOLS_PER_FRAME: usize = 10;

/// Bytes per interleaved I/Q pair on the wire (16-bit I + 16-bit Q)
pub const BYTES_PER_PAIR: usize = 4;

// ============================================================================
// Streaming Parameters
// ============================================================================

/// Sample-pair granularity of the transmit stream; every pushed buffer
/// must be a multiple of this
pub const BLOCK_PAIRS: usize = 1024;

/// Number of stream blocks buffered by the driver
pub const STREAM_BLOCKS: usize = 2;

/// Stream timeout (milliseconds)
pub const STREAM_TIMEOUT_MS: u64 = 60_000;

/// Carrier-only warm-up before data (seconds)
pub const WARMUP_SECONDS: u32 = 5;

/// Times the payload buffer is retransmitted per run
pub const PAYLOAD_REPEATS: u32 = 10;
