//! Constants shared by the framing, codec and radio layers.
//!
//! The frame geometry is fixed at compile time and must be identical on the
//! transmitter and the receiver:
//!
//! ```text
//! |<------------- FRAME_SIZE (64) ------------->|
//! |<-- MAX_PAYLOAD_LEN (48) -->|<- ECC_LEN (16) ->|
//! |  message + zero padding    |  RS parity       |
//! ```
//!
//! ## Key Concepts
//!
//! - **Payload**: the caller's message, zero-padded on the right to [`MAX_PAYLOAD_LEN`].
//! - **Parity**: Reed-Solomon check symbols appended by the block codec.
//! - **Headroom**: spare receive buffer space so an oversized frame can still be
//!   read out of the transceiver and flagged, instead of being dropped by the driver.

/// Maximum size (in bytes) of a user message.
///
/// Shorter messages are padded with zero bytes up to this length before encoding.
pub const MAX_PAYLOAD_LEN: usize = 48;

/// Number of Reed-Solomon parity symbols appended to every payload.
pub const ECC_LEN: usize = 16;

/// Size (in bytes) of a transmitted frame: padded payload plus parity.
pub const FRAME_SIZE: usize = MAX_PAYLOAD_LEN + ECC_LEN;

/// Number of symbol errors the code can correct per frame without erasure hints.
pub const CORRECTABLE_ERRORS: usize = ECC_LEN / 2;

/// Extra receive buffer space beyond [`FRAME_SIZE`].
pub const RX_HEADROOM: usize = 32;

/// Size of the scratch buffer handed to the transceiver on receive.
pub const RX_BUF_LEN: usize = FRAME_SIZE + RX_HEADROOM;

/// Time the radio is held powered off during [`configure`](crate::radio::Radio::configure).
pub const SETTLE_DELAY_MS: u32 = 500;

/// Highest transmit power level accepted by the transceiver.
pub const MAX_TX_POWER: u8 = 0x7f;

/// Default carrier frequency.
pub const DEFAULT_FREQUENCY_MHZ: f32 = 433.0;

// The RS code works over GF(2^8): a codeword cannot exceed 255 symbols.
const _: () = assert!(FRAME_SIZE <= 255);
