//! Error types returned by the framing layer and the radio pipelines.

use crate::consts::MAX_PAYLOAD_LEN;

/// Framing errors detected before anything reaches the transceiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum FrameError {
    /// The message does not fit in a single frame. Nothing is transmitted.
    #[error("message of {len} bytes exceeds the {max} byte payload capacity")]
    PayloadTooLarge {
        /// Length of the rejected message
        len: usize,
        /// Payload capacity of a frame
        max: usize,
    },
}

impl FrameError {
    pub(crate) fn too_large(len: usize) -> Self {
        FrameError::PayloadTooLarge {
            len,
            max: MAX_PAYLOAD_LEN,
        }
    }
}

/// Errors surfaced by [`Radio`](crate::radio::Radio) operations.
///
/// `E` is the error type of the underlying [`Transceiver`](crate::transceiver::Transceiver).
/// Link failures are passed through untouched; this layer never retries.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error<E> {
    /// The frame could not be built.
    #[error(transparent)]
    Frame(#[from] FrameError),
    /// The transceiver reported a failure.
    #[error("transceiver link failure: {0:?}")]
    Link(E),
}
