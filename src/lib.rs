//! # rf-fec
//!
//! A portable, no_std forward-error-corrected framing layer for half-duplex
//! packet radios.
//!
//! Every message is zero-padded to a fixed payload size, Reed-Solomon encoded
//! into a fixed-size frame and handed to the transceiver as one atomic packet.
//! On receipt the frame is decoded, checked and, if needed, corrected before
//! the payload is handed back together with a status that tells apart:
//!
//! - nothing received
//! - received cleanly
//! - received with corrected errors
//! - received but uncorrectable or malformed
//!
//! ## Crate features
//! | Feature     | Description |
//! |-------------|-------------|
//! | `std`       | Disables `#![no_std]` support |
//! | `log`       | Enables [`LogDiagnostics`](diagnostics::LogDiagnostics) |
//! | `defmt-0-3` | Derives `defmt::Format` and enables `DefmtDiagnostics` |
//!
//! ## Layers
//!
//! - [`codec`]: the [`BlockCodec`](codec::BlockCodec) seam and the bundled Reed-Solomon codec
//! - [`frame`]: padding, frame encode/decode, payload extraction
//! - [`transceiver`]: the [`Transceiver`](transceiver::Transceiver) seam the radio driver implements
//! - [`radio`]: configuration, blocking transmit, polled receive
//! - [`diagnostics`]: injected event sinks in place of debug prints
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rf_fec::codec::ReedSolomonCodec;
//! use rf_fec::diagnostics::LogDiagnostics;
//! use rf_fec::radio::Radio;
//!
//! let mut radio = Radio::with_diagnostics(driver, ReedSolomonCodec::new(), None, LogDiagnostics);
//! radio.configure(&mut delay)?;
//! radio.transmit(b"hello")?;
//! ```
//!
//! ## Integration Notes
//!
//! - Frame geometry is fixed at compile time in [`consts`]; both ends must agree.
//! - The frame carries no length field. Receivers get the padded payload back.
//! - One [`Radio`](radio::Radio) per transceiver, driven from a single control loop.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

pub use heapless;

pub mod codec;
pub mod consts;
pub mod diagnostics;
pub mod error;
pub mod frame;
pub mod outcome;
pub mod radio;
pub mod transceiver;

pub use error::{Error, FrameError};
pub use outcome::ReceiveOutcome;
pub use radio::{ConfigReport, Radio, RadioState};
