//! Block error-correction codec seam.
//!
//! The framing layer never does field arithmetic itself. It hands fixed-size
//! blocks to a [`BlockCodec`] and only trusts the booleans that come back:
//! "is the syndrome non-zero" after [`decode`](BlockCodec::decode), and
//! "did correction succeed" after [`correct`](BlockCodec::correct).
//!
//! [`ReedSolomonCodec`] is the bundled implementation, a systematic
//! Reed-Solomon code over GF(2^8) with [`ECC_LEN`] parity symbols. It corrects
//! up to [`CORRECTABLE_ERRORS`](crate::consts::CORRECTABLE_ERRORS) symbol errors
//! per frame, or twice as many erasures when their positions are known.
//!
//! ## Usage
//!
//! ```rust
//! use rf_fec::codec::{BlockCodec, ReedSolomonCodec};
//! use rf_fec::consts::{FRAME_SIZE, MAX_PAYLOAD_LEN};
//!
//! let mut codec = ReedSolomonCodec::new();
//! let mut frame = [0u8; FRAME_SIZE];
//! codec.encode(&[0x42; MAX_PAYLOAD_LEN], &mut frame);
//!
//! frame[3] ^= 0xff;
//! codec.decode(&mut frame);
//! assert!(codec.syndrome_nonzero());
//! assert!(codec.correct(&mut frame, &[]));
//! assert_eq!(frame[3], 0x42);
//! ```

use core::fmt;

use reed_solomon::{Decoder, Encoder};

use crate::consts::{ECC_LEN, FRAME_SIZE, MAX_PAYLOAD_LEN};

/// An error-correcting block code with a fixed geometry of
/// [`MAX_PAYLOAD_LEN`] data symbols and [`FRAME_SIZE`] coded symbols.
///
/// Implementations may keep state between [`decode`](Self::decode) and
/// [`syndrome_nonzero`](Self::syndrome_nonzero); callers always invoke them in that order.
pub trait BlockCodec {
    /// Encodes a full payload block into a coded frame.
    ///
    /// Must be deterministic: the same input always yields the same frame.
    fn encode(&mut self, input: &[u8; MAX_PAYLOAD_LEN], output: &mut [u8; FRAME_SIZE]);

    /// Decodes a coded block in place and latches its syndrome state.
    fn decode(&mut self, frame: &mut [u8]);

    /// Returns `true` if the last [`decode`](Self::decode) found residual errors.
    fn syndrome_nonzero(&self) -> bool;

    /// Attempts to correct `frame` in place.
    ///
    /// `erasures` lists symbol positions known to be unreliable; pass an empty
    /// slice for blind error correction. Returns `false` when the errors exceed
    /// the code's capacity, in which case the contents of `frame` must not be trusted.
    fn correct(&mut self, frame: &mut [u8], erasures: &[u8]) -> bool;
}

/// Systematic Reed-Solomon codec backed by the `reed-solomon` crate.
///
/// Codewords are laid out as `[data | parity]`, so the payload can be read
/// straight out of the first [`MAX_PAYLOAD_LEN`] bytes of a corrected frame.
pub struct ReedSolomonCodec {
    encoder: Encoder,
    decoder: Decoder,
    syndrome_nonzero: bool,
}

impl ReedSolomonCodec {
    /// Creates a codec with [`ECC_LEN`] parity symbols.
    pub fn new() -> Self {
        Self {
            encoder: Encoder::new(ECC_LEN),
            decoder: Decoder::new(ECC_LEN),
            syndrome_nonzero: false,
        }
    }
}

impl Default for ReedSolomonCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ReedSolomonCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReedSolomonCodec")
            .field("ecc_len", &ECC_LEN)
            .field("syndrome_nonzero", &self.syndrome_nonzero)
            .finish()
    }
}

impl BlockCodec for ReedSolomonCodec {
    fn encode(&mut self, input: &[u8; MAX_PAYLOAD_LEN], output: &mut [u8; FRAME_SIZE]) {
        let encoded = self.encoder.encode(&input[..]);
        output.copy_from_slice(&encoded[..FRAME_SIZE]);
    }

    fn decode(&mut self, frame: &mut [u8]) {
        // Systematic code: the symbols are already in place, only the syndromes matter.
        self.syndrome_nonzero = self.decoder.is_corrupted(&frame[..]);
    }

    fn syndrome_nonzero(&self) -> bool {
        self.syndrome_nonzero
    }

    fn correct(&mut self, frame: &mut [u8], erasures: &[u8]) -> bool {
        let erase_pos = if erasures.is_empty() {
            None
        } else {
            Some(erasures)
        };
        match self.decoder.correct(&mut frame[..], erase_pos) {
            Ok(recovered) => {
                let len = frame.len().min(recovered.len());
                frame[..len].copy_from_slice(&recovered[..len]);
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> [u8; MAX_PAYLOAD_LEN] {
        let mut payload = [0u8; MAX_PAYLOAD_LEN];
        for (i, b) in payload.iter_mut().enumerate() {
            *b = (i as u8).wrapping_mul(7).wrapping_add(3);
        }
        payload
    }

    #[test]
    fn test_encode_is_systematic() {
        let mut codec = ReedSolomonCodec::new();
        let payload = sample_payload();
        let mut frame = [0u8; FRAME_SIZE];
        codec.encode(&payload, &mut frame);

        assert_eq!(&frame[..MAX_PAYLOAD_LEN], &payload[..]);
        assert!(frame[MAX_PAYLOAD_LEN..].iter().any(|&b| b != 0));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let mut codec = ReedSolomonCodec::new();
        let payload = sample_payload();
        let mut first = [0u8; FRAME_SIZE];
        let mut second = [0u8; FRAME_SIZE];
        codec.encode(&payload, &mut first);
        codec.encode(&payload, &mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn test_decode_latches_syndrome() {
        let mut codec = ReedSolomonCodec::new();
        let mut frame = [0u8; FRAME_SIZE];
        codec.encode(&sample_payload(), &mut frame);

        codec.decode(&mut frame);
        assert!(!codec.syndrome_nonzero());

        frame[10] ^= 0x01;
        codec.decode(&mut frame);
        assert!(codec.syndrome_nonzero());

        frame[10] ^= 0x01;
        codec.decode(&mut frame);
        assert!(!codec.syndrome_nonzero());
    }

    #[test]
    fn test_correct_repairs_errors_within_capacity() {
        let mut codec = ReedSolomonCodec::new();
        let mut clean = [0u8; FRAME_SIZE];
        codec.encode(&sample_payload(), &mut clean);

        let mut frame = clean;
        for pos in [0usize, 9, 21, 33, 47, 50, 58, 63] {
            frame[pos] ^= 0xa5;
        }
        assert!(codec.correct(&mut frame, &[]));
        assert_eq!(&frame[..MAX_PAYLOAD_LEN], &clean[..MAX_PAYLOAD_LEN]);
    }

    #[test]
    fn test_correct_uses_erasure_positions() {
        let mut codec = ReedSolomonCodec::new();
        let mut clean = [0u8; FRAME_SIZE];
        codec.encode(&sample_payload(), &mut clean);

        // Twelve erasures is past the blind capacity but within 2t when positions are known.
        let positions: [u8; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 40, 41, 42, 43];
        let mut frame = clean;
        for &pos in &positions {
            frame[pos as usize] = 0;
        }
        assert!(codec.correct(&mut frame, &positions));
        assert_eq!(&frame[..MAX_PAYLOAD_LEN], &clean[..MAX_PAYLOAD_LEN]);
    }
}
