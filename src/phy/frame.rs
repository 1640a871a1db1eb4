// RS232-style asynchronous serial framing:
// START(0) - LSB - ... - MSB - STOP(1), idle level is 1.
// Ten symbols per payload byte.

use crate::utils::consts::SYMBOLS_PER_FRAME;

/// One payload byte -> 10 binary symbols (0/1), start bit first,
/// data bits LSB-first, stop bit last.
pub fn frame_bits(byte: u8) -> [u8; SYMBOLS_PER_FRAME] {
    let mut symbols = [0u8; SYMBOLS_PER_FRAME];
    for j in 1..=8 {
        symbols[j] = (byte >> (j - 1)) & 1;
    }
    symbols[9] = 1;
    symbols
}

/// Iterator over the serial frames of a payload, one frame per byte.
/// Frames are produced lazily; the whole symbol stream is never
/// materialized.
pub fn frames(payload: &[u8]) -> impl Iterator<Item = [u8; SYMBOLS_PER_FRAME]> + '_ {
    payload.iter().map(|&b| frame_bits(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_and_stop_bits_fixed_for_all_bytes() {
        for b in 0..=255u8 {
            let f = frame_bits(b);
            assert_eq!(f[0], 0, "start bit for {:#04x}", b);
            assert_eq!(f[9], 1, "stop bit for {:#04x}", b);
        }
    }

    #[test]
    fn test_data_bits_reassemble_lsb_first() {
        for b in 0..=255u8 {
            let f = frame_bits(b);
            let mut reassembled = 0u8;
            for j in 1..=8 {
                reassembled |= f[j] << (j - 1);
            }
            assert_eq!(reassembled, b);
        }
    }

    #[test]
    fn test_known_frame_for_ascii_a() {
        // 0x41 = 0100_0001, LSB-first: 1,0,0,0,0,0,1,0
        assert_eq!(frame_bits(0x41), [0, 1, 0, 0, 0, 0, 0, 1, 0, 1]);
    }

    #[test]
    fn test_frames_iterates_per_byte() {
        let payload = [0x00, 0xFF];
        let frames: Vec<_> = frames(&payload).collect();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0], [0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(frames[1], [0, 1, 1, 1, 1, 1, 1, 1, 1, 1]);
    }
}
