//! Fixed-size frame construction and recovery.
//!
//! A [`FrameCodec`] maps a caller's message onto a [`Frame`] and back:
//!
//! 1. [`pad`](FrameCodec::pad) zero-fills the message to [`MAX_PAYLOAD_LEN`] bytes,
//!    refusing messages that do not fit.
//! 2. [`encode_frame`](FrameCodec::encode_frame) hands the padded block to the
//!    [`BlockCodec`] and returns a [`FRAME_SIZE`] byte frame.
//! 3. On receipt, [`decode_frame`](FrameCodec::decode_frame) reports whether the
//!    syndrome is non-zero and [`correct`](FrameCodec::correct) attempts a blind repair.
//! 4. [`extract_payload`](FrameCodec::extract_payload) returns the first
//!    [`MAX_PAYLOAD_LEN`] symbols, padding included.
//!
//! Padding is never stripped. The frame carries no length field, so the true
//! message length has to be known out-of-band.

use crate::codec::BlockCodec;
use crate::consts::{FRAME_SIZE, MAX_PAYLOAD_LEN};
use crate::error::FrameError;

/// A coded frame exactly as it goes over the air.
pub type Frame = [u8; FRAME_SIZE];

/// A message zero-padded on the right to exactly [`MAX_PAYLOAD_LEN`] bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct PaddedPayload([u8; MAX_PAYLOAD_LEN]);

impl PaddedPayload {
    /// Returns the padded bytes.
    pub fn as_bytes(&self) -> &[u8; MAX_PAYLOAD_LEN] {
        &self.0
    }
}

impl AsRef<[u8]> for PaddedPayload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Pads, encodes, decodes and corrects frames through a [`BlockCodec`].
#[derive(Debug)]
pub struct FrameCodec<C> {
    codec: C,
}

impl<C: BlockCodec> FrameCodec<C> {
    /// Wraps a block codec.
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    /// Returns the wrapped block codec.
    pub fn release(self) -> C {
        self.codec
    }

    /// Copies `message` into a zero-filled [`PaddedPayload`].
    ///
    /// # Errors
    /// [`FrameError::PayloadTooLarge`] if `message` is longer than [`MAX_PAYLOAD_LEN`].
    /// Oversized messages are refused outright, never truncated.
    pub fn pad(message: &[u8]) -> Result<PaddedPayload, FrameError> {
        if message.len() > MAX_PAYLOAD_LEN {
            return Err(FrameError::too_large(message.len()));
        }
        let mut padded = [0u8; MAX_PAYLOAD_LEN];
        padded[..message.len()].copy_from_slice(message);
        Ok(PaddedPayload(padded))
    }

    /// Encodes a padded payload into a frame.
    pub fn encode_frame(&mut self, payload: &PaddedPayload) -> Frame {
        let mut frame = [0u8; FRAME_SIZE];
        self.codec.encode(&payload.0, &mut frame);
        frame
    }

    /// Decodes `frame` in place.
    ///
    /// Returns `true` if the syndrome is non-zero and correction must be attempted.
    pub fn decode_frame(&mut self, frame: &mut Frame) -> bool {
        self.codec.decode(&mut frame[..]);
        self.codec.syndrome_nonzero()
    }

    /// Attempts blind error correction on `frame`, with no known erasures.
    ///
    /// Returns `false` if the errors exceed the code's capacity. The frame
    /// contents are unreliable in that case.
    pub fn correct(&mut self, frame: &mut Frame) -> bool {
        self.codec.correct(&mut frame[..], &[])
    }

    /// Copies the payload symbols of `frame` into `out`.
    pub fn extract_payload(frame: &Frame, out: &mut [u8; MAX_PAYLOAD_LEN]) {
        out.copy_from_slice(&frame[..MAX_PAYLOAD_LEN]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::ReedSolomonCodec;
    use crate::consts::CORRECTABLE_ERRORS;

    type Codec = FrameCodec<ReedSolomonCodec>;

    #[test]
    fn test_pad_appends_zeroes() {
        let padded = Codec::pad(b"hello").unwrap();
        assert_eq!(&padded.as_bytes()[..5], b"hello");
        assert!(padded.as_bytes()[5..].iter().all(|&b| b == 0));
        assert_eq!(padded.as_bytes().len(), MAX_PAYLOAD_LEN);
    }

    #[test]
    fn test_pad_accepts_empty_and_full_messages() {
        let empty = Codec::pad(&[]).unwrap();
        assert_eq!(empty.as_bytes(), &[0u8; MAX_PAYLOAD_LEN]);

        let full = Codec::pad(&[0xee; MAX_PAYLOAD_LEN]).unwrap();
        assert_eq!(full.as_bytes(), &[0xee; MAX_PAYLOAD_LEN]);
    }

    #[test]
    fn test_pad_is_idempotent() {
        let once = Codec::pad(b"abc").unwrap();
        let twice = Codec::pad(once.as_ref()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_pad_refuses_oversized_message() {
        let message = [1u8; MAX_PAYLOAD_LEN + 1];
        assert_eq!(
            Codec::pad(&message),
            Err(FrameError::PayloadTooLarge {
                len: MAX_PAYLOAD_LEN + 1,
                max: MAX_PAYLOAD_LEN
            })
        );
    }

    #[test]
    fn test_clean_round_trip() {
        let mut codec = Codec::new(ReedSolomonCodec::new());
        let padded = Codec::pad(b"telemetry 42").unwrap();
        let mut frame = codec.encode_frame(&padded);

        assert!(!codec.decode_frame(&mut frame));
        let mut out = [0xffu8; MAX_PAYLOAD_LEN];
        Codec::extract_payload(&frame, &mut out);
        assert_eq!(&out, padded.as_bytes());
    }

    #[test]
    fn test_single_error_is_corrected() {
        let mut codec = Codec::new(ReedSolomonCodec::new());
        let padded = Codec::pad(b"single symbol hit").unwrap();
        let mut frame = codec.encode_frame(&padded);
        frame[4] ^= 0x5a;

        assert!(codec.decode_frame(&mut frame));
        assert!(codec.correct(&mut frame));
        let mut out = [0u8; MAX_PAYLOAD_LEN];
        Codec::extract_payload(&frame, &mut out);
        assert_eq!(&out, padded.as_bytes());
    }

    #[test]
    fn test_errors_at_capacity_are_corrected() {
        let mut codec = Codec::new(ReedSolomonCodec::new());
        let padded = Codec::pad(b"right at the edge").unwrap();
        let mut frame = codec.encode_frame(&padded);
        for i in 0..CORRECTABLE_ERRORS {
            frame[i * 7] ^= 0x81;
        }

        assert!(codec.decode_frame(&mut frame));
        assert!(codec.correct(&mut frame));
        assert_eq!(&frame[..MAX_PAYLOAD_LEN], padded.as_bytes());
    }

    #[test]
    fn test_corruption_beyond_capacity_is_reported() {
        let mut codec = Codec::new(ReedSolomonCodec::new());
        let padded = Codec::pad(b"too much noise").unwrap();
        let mut frame = codec.encode_frame(&padded);
        for (i, b) in frame.iter_mut().enumerate().take(24) {
            *b ^= 0x3c ^ (i as u8);
        }

        assert!(codec.decode_frame(&mut frame));
        assert!(!codec.correct(&mut frame));
    }
}
