use num_complex::Complex;
use thiserror::Error;

use crate::phy::frame;
use crate::phy::sizing::BufferPlan;
use crate::utils::consts::SYMBOLS_PER_FRAME;

#[derive(Debug, Error)]
#[error("could not allocate sample buffer of {pairs} pairs")]
pub struct AllocationError {
    pub pairs: usize,
    #[source]
    source: std::collections::TryReserveError,
}

/// Owned buffer of interleaved (I,Q) 16-bit sample pairs.
///
/// Pair `n` of symbol `j` of byte `i` lives at offset
/// `i * 10 * samples_per_symbol + j * samples_per_symbol + n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    pairs: Vec<Complex<i16>>,
}

impl SampleBuffer {
    /// Allocate `len` pairs, every pair set to `(fill, fill)`.
    /// Allocation failure is reported, not panicked.
    pub fn filled(len: usize, fill: i16) -> Result<Self, AllocationError> {
        let mut pairs = Vec::new();
        pairs
            .try_reserve_exact(len)
            .map_err(|source| AllocationError { pairs: len, source })?;
        pairs.resize(len, Complex::new(fill, fill));
        Ok(Self { pairs })
    }

    /// Number of (I,Q) pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Overwrite one pair. Panics on out-of-range index; callers size the
    /// buffer from the same plan that drives the offsets.
    pub fn set_pair(&mut self, index: usize, i: i16, q: i16) {
        self.pairs[index] = Complex::new(i, q);
    }

    pub fn get_pair(&self, index: usize) -> Complex<i16> {
        self.pairs[index]
    }

    pub fn as_pairs(&self) -> &[Complex<i16>] {
        &self.pairs
    }
}

/// Expands serial frames into oversampled OOK sample buffers.
pub struct WaveformBuilder {
    samples_per_symbol: usize,
    mark: i16,
    space: i16,
}

impl WaveformBuilder {
    pub fn new(samples_per_symbol: usize, mark: i16, space: i16) -> Self {
        Self {
            samples_per_symbol,
            mark,
            space,
        }
    }

    /// Build the padded payload buffer for `payload`.
    ///
    /// The whole buffer is first filled with the mark level, then the
    /// framed symbols are written over it. The padding tail past the last
    /// symbol therefore idles at mark, so the radio keeps a clean carrier
    /// instead of going silent. The fill-then-overwrite order is a
    /// correctness requirement.
    pub fn build_payload(
        &self,
        payload: &[u8],
        plan: &BufferPlan,
    ) -> Result<SampleBuffer, AllocationError> {
        debug_assert_eq!(plan.samples_per_symbol, self.samples_per_symbol);
        let mut buffer = SampleBuffer::filled(plan.padded_pairs, self.mark)?;

        for (i, symbols) in frame::frames(payload).enumerate() {
            for (j, &symbol) in symbols.iter().enumerate() {
                let level = if symbol == 1 { self.mark } else { self.space };
                let base = i * SYMBOLS_PER_FRAME * self.samples_per_symbol
                    + j * self.samples_per_symbol;
                for k in 0..self.samples_per_symbol {
                    buffer.set_pair(base + k, level, level);
                }
            }
        }

        Ok(buffer)
    }

    /// Build the carrier-only warm-up buffer: every pair at mark level.
    /// It carries no data; it only lets the transmit chain settle.
    pub fn build_warmup(&self, plan: &BufferPlan) -> Result<SampleBuffer, AllocationError> {
        SampleBuffer::filled(plan.warmup_pairs, self.mark)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::consts::{MARK_LEVEL, SPACE_LEVEL};

    fn builder(spp: usize) -> WaveformBuilder {
        WaveformBuilder::new(spp, MARK_LEVEL, SPACE_LEVEL)
    }

    /// Majority vote over one symbol window of the I component.
    fn decode_symbol(buffer: &SampleBuffer, symbol_index: usize, spp: usize) -> u8 {
        let start = symbol_index * spp;
        let marks = (start..start + spp)
            .filter(|&n| buffer.get_pair(n).re == MARK_LEVEL)
            .count();
        if marks * 2 > spp { 1 } else { 0 }
    }

    #[test]
    fn test_round_trip_extreme_bytes() {
        let spp = 8;
        let plan = BufferPlan::new(2, 2400, 300, 5).unwrap();
        assert_eq!(plan.samples_per_symbol, spp);
        let buffer = builder(spp).build_payload(&[0x00, 0xFF], &plan).unwrap();

        let decoded: Vec<u8> =
            (0..10).map(|j| decode_symbol(&buffer, j, spp)).collect();
        assert_eq!(decoded, [0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);

        let decoded: Vec<u8> =
            (10..20).map(|j| decode_symbol(&buffer, j, spp)).collect();
        assert_eq!(decoded, [0, 1, 1, 1, 1, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_pairs_within_a_symbol_are_identical_and_iq_equal() {
        let spp = 4;
        let plan = BufferPlan::new(1, 1200, 300, 5).unwrap();
        let buffer = builder(spp).build_payload(&[0xA5], &plan).unwrap();

        for j in 0..10 {
            let first = buffer.get_pair(j * spp);
            assert_eq!(first.re, first.im);
            for k in 1..spp {
                assert_eq!(buffer.get_pair(j * spp + k), first);
            }
        }
    }

    #[test]
    fn test_padding_tail_idles_at_mark() {
        let plan = BufferPlan::new(1, 300_000, 300, 5).unwrap();
        let buffer = builder(plan.samples_per_symbol)
            .build_payload(&[0x41], &plan)
            .unwrap();

        assert_eq!(buffer.len(), plan.padded_pairs);
        for n in plan.raw_pairs..plan.padded_pairs {
            assert_eq!(buffer.get_pair(n), Complex::new(MARK_LEVEL, MARK_LEVEL));
        }
    }

    #[test]
    fn test_build_is_deterministic() {
        let plan = BufferPlan::new(3, 48_000, 1200, 5).unwrap();
        let b = builder(plan.samples_per_symbol);
        let payload = [0xDE, 0xAD, 0xBE];
        let first = b.build_payload(&payload, &plan).unwrap();
        let second = b.build_payload(&payload, &plan).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_payload_builds_empty_buffer() {
        let plan = BufferPlan::new(0, 300_000, 300, 5).unwrap();
        let buffer = builder(plan.samples_per_symbol)
            .build_payload(&[], &plan)
            .unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_warmup_is_all_mark() {
        let plan = BufferPlan::new(0, 4800, 300, 1).unwrap();
        let warmup = builder(plan.samples_per_symbol).build_warmup(&plan).unwrap();
        assert_eq!(warmup.len(), plan.warmup_pairs);
        assert!(
            warmup
                .as_pairs()
                .iter()
                .all(|p| *p == Complex::new(MARK_LEVEL, MARK_LEVEL))
        );
    }
}
