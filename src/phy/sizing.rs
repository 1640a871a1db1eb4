use thiserror::Error;

use crate::utils::consts::{BLOCK_PAIRS, BYTES_PER_PAIR, SYMBOLS_PER_FRAME};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("baud rate {baud} does not fit in sample rate {sample_rate} (zero samples per symbol)")]
    InvalidRate { sample_rate: u32, baud: u32 },
}

/// Precomputed buffer geometry for one transmission run.
///
/// All counts are in (I,Q) sample pairs; `*_bytes` helpers assume the
/// 4-byte interleaved SC16 wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferPlan {
    pub samples_per_symbol: usize,
    pub raw_pairs: usize,
    pub padded_pairs: usize,
    pub warmup_pairs: usize,
}

impl BufferPlan {
    /// Size the payload and warm-up buffers for `payload_len` bytes at the
    /// given rates.
    ///
    /// `samples_per_symbol` is truncating integer division; when the baud
    /// rate does not divide the sample rate evenly the effective symbol
    /// timing drifts from nominal. A zero quotient is rejected since it
    /// would silently produce an empty waveform.
    pub fn new(
        payload_len: usize,
        sample_rate: u32,
        baud: u32,
        warmup_seconds: u32,
    ) -> Result<Self, PlanError> {
        let samples_per_symbol = if baud == 0 {
            0
        } else {
            (sample_rate / baud) as usize
        };
        if samples_per_symbol == 0 {
            return Err(PlanError::InvalidRate { sample_rate, baud });
        }

        let raw_pairs = payload_len * SYMBOLS_PER_FRAME * samples_per_symbol;
        let padded_pairs = round_up_to_block(raw_pairs);
        let warmup_pairs =
            round_up_to_block(sample_rate as usize * warmup_seconds as usize);

        Ok(Self {
            samples_per_symbol,
            raw_pairs,
            padded_pairs,
            warmup_pairs,
        })
    }

    /// Wire size of the padded payload buffer
    pub fn padded_bytes(&self) -> usize {
        self.padded_pairs * BYTES_PER_PAIR
    }

    /// Wire size of the warm-up buffer
    pub fn warmup_bytes(&self) -> usize {
        self.warmup_pairs * BYTES_PER_PAIR
    }
}

/// Round a pair count up to the next multiple of the stream block size.
/// Already-aligned counts (including zero) are unchanged.
fn round_up_to_block(pairs: usize) -> usize {
    match pairs % BLOCK_PAIRS {
        0 => pairs,
        rem => pairs + (BLOCK_PAIRS - rem),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_is_aligned_and_not_smaller() {
        for len in [0usize, 1, 7, 100, 1024, 4096, 12345] {
            let plan = BufferPlan::new(len, 300_000, 300, 5).unwrap();
            assert_eq!(plan.padded_pairs % BLOCK_PAIRS, 0);
            assert!(plan.padded_pairs >= plan.raw_pairs);
            assert!(plan.padded_pairs - plan.raw_pairs < BLOCK_PAIRS);
        }
    }

    #[test]
    fn test_reference_scenario_one_byte() {
        // 300 kHz / 300 Bd = 1000 samples per symbol
        let plan = BufferPlan::new(1, 300_000, 300, 5).unwrap();
        assert_eq!(plan.samples_per_symbol, 1000);
        assert_eq!(plan.raw_pairs, 10_000);
        assert_eq!(plan.padded_pairs, 10_240);
        assert_eq!(plan.padded_bytes(), 40_960);
    }

    #[test]
    fn test_empty_payload_is_a_valid_zero_plan() {
        let plan = BufferPlan::new(0, 300_000, 300, 5).unwrap();
        assert_eq!(plan.raw_pairs, 0);
        assert_eq!(plan.padded_pairs, 0);
    }

    #[test]
    fn test_aligned_raw_count_gains_no_padding() {
        // 1024 samples/symbol * 10 symbols -> already block-aligned
        let plan = BufferPlan::new(1, 307_200, 300, 5).unwrap();
        assert_eq!(plan.samples_per_symbol, 1024);
        assert_eq!(plan.raw_pairs, 10_240);
        assert_eq!(plan.padded_pairs, 10_240);
    }

    #[test]
    fn test_warmup_is_five_seconds_block_aligned() {
        let plan = BufferPlan::new(1, 300_000, 300, 5).unwrap();
        assert!(plan.warmup_pairs >= 300_000 * 5);
        assert_eq!(plan.warmup_pairs % BLOCK_PAIRS, 0);
    }

    #[test]
    fn test_zero_samples_per_symbol_rejected() {
        assert_eq!(
            BufferPlan::new(1, 300, 48_000, 5),
            Err(PlanError::InvalidRate {
                sample_rate: 300,
                baud: 48_000
            })
        );
        assert!(BufferPlan::new(1, 300_000, 0, 5).is_err());
    }

    #[test]
    fn test_truncating_division_preserved() {
        // 48000 / 299 = 160.53.. -> truncates to 160
        let plan = BufferPlan::new(1, 48_000, 299, 5).unwrap();
        assert_eq!(plan.samples_per_symbol, 160);
    }
}
