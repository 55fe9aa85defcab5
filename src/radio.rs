//! Radio context: lifecycle, transmit pipeline and receive pipeline.
//!
//! [`Radio`] owns everything the pipelines touch: the [`Transceiver`], the
//! [`FrameCodec`], the [`RadioConfig`], a [`Diagnostics`] sink and the
//! [`RadioState`]. There is no global radio handle; create one `Radio` and
//! drive it from a single control loop.
//!
//! ## Transmit
//!
//! [`transmit`](Radio::transmit) pads, encodes and sends one frame, then blocks
//! until the transceiver reports the frame has left the antenna. A message
//! longer than [`MAX_PAYLOAD_LEN`] is refused before the transceiver is touched.
//!
//! ## Receive
//!
//! [`try_receive`](Radio::try_receive) polls the transceiver once. Per call:
//!
//! ```text
//! Idle -> Polled -> NoData
//!                -> Decoded -> Clean
//!                           -> Correcting -> Corrected
//!                                         -> Uncorrectable
//! ```
//!
//! The result is a [`ReceiveOutcome`] whose flags tell these paths apart,
//! plus a frame size mismatch flag that does not stop decoding.
//!
//! ## Example
//!
//! ```rust,ignore
//! use rf_fec::codec::ReedSolomonCodec;
//! use rf_fec::consts::MAX_PAYLOAD_LEN;
//! use rf_fec::radio::Radio;
//!
//! let mut radio = Radio::new(my_transceiver, ReedSolomonCodec::new(), None);
//! let report = radio.configure(&mut delay)?;
//! if !report.is_healthy() {
//!     // degraded, but still usable
//! }
//!
//! radio.transmit(b"hello")?;
//!
//! let mut message = [0u8; MAX_PAYLOAD_LEN];
//! loop {
//!     let outcome = radio.try_receive(&mut message)?;
//!     if outcome.is_trustworthy() {
//!         break;
//!     }
//! }
//! ```

use embedded_hal::delay::DelayNs;
use nb::block;

use crate::codec::BlockCodec;
use crate::consts::{FRAME_SIZE, MAX_PAYLOAD_LEN, MAX_TX_POWER, RX_BUF_LEN, SETTLE_DELAY_MS};
use crate::diagnostics::{Diagnostics, Event, NoDiagnostics};
use crate::error::{Error, FrameError};
use crate::frame::{Frame, FrameCodec};
use crate::outcome::ReceiveOutcome;
use crate::transceiver::{RadioConfig, Transceiver};

/// Power state and last signal strength of the radio.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct RadioState {
    /// Whether the radio was last switched on.
    pub powered: bool,
    /// RSSI of the last received frame. Untouched by empty polls.
    pub last_rssi: u8,
}

/// Non-fatal findings from [`Radio::configure`].
///
/// A `false` here means the radio may be misconfigured. Transmit and receive
/// still work as far as the hardware allows.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct ConfigReport {
    /// The transceiver accepted the frame size.
    pub initialized: bool,
    /// The bus health probe got an answer.
    pub probe_ok: bool,
    /// The carrier frequency was accepted.
    pub frequency_ok: bool,
}

impl ConfigReport {
    /// Returns `true` if every configuration step succeeded.
    pub fn is_healthy(&self) -> bool {
        self.initialized && self.probe_ok && self.frequency_ok
    }
}

/// A forward-error-corrected framing layer on top of a [`Transceiver`].
///
/// ## Type Parameters
///
/// - `T`: the [`Transceiver`] driver
/// - `C`: the [`BlockCodec`] used to build frames
/// - `D`: the [`Diagnostics`] sink, [`NoDiagnostics`] by default
///
/// ## Notes
///
/// - Not reentrant. Transmit and receive must not overlap.
/// - [`transmit`](Self::transmit) has no timeout. A transceiver that never
///   completes a send hangs the caller.
#[derive(Debug)]
pub struct Radio<T, C, D = NoDiagnostics> {
    transceiver: T,
    frames: FrameCodec<C>,
    config: RadioConfig,
    diagnostics: D,
    state: RadioState,
}

impl<T, C> Radio<T, C, NoDiagnostics>
where
    T: Transceiver,
    C: BlockCodec,
{
    /// Creates a radio without diagnostics.
    ///
    /// # Arguments
    /// - `transceiver`: the physical radio driver
    /// - `codec`: the block codec shared by both ends of the link
    /// - `config`: radio settings, [`RadioConfig::default`] if `None`
    pub fn new(transceiver: T, codec: C, config: Option<RadioConfig>) -> Self {
        Self::with_diagnostics(transceiver, codec, config, NoDiagnostics)
    }
}

impl<T, C, D> Radio<T, C, D>
where
    T: Transceiver,
    C: BlockCodec,
    D: Diagnostics,
{
    /// Creates a radio reporting to `diagnostics`.
    pub fn with_diagnostics(
        transceiver: T,
        codec: C,
        config: Option<RadioConfig>,
        diagnostics: D,
    ) -> Self {
        Self {
            transceiver,
            frames: FrameCodec::new(codec),
            config: config.unwrap_or_default(),
            diagnostics,
            state: RadioState::default(),
        }
    }

    /// Consumes the radio and returns its parts.
    pub fn release(self) -> (T, C, D) {
        (self.transceiver, self.frames.release(), self.diagnostics)
    }

    /// Settings applied by [`configure`](Self::configure).
    pub fn config(&self) -> &RadioConfig {
        &self.config
    }

    /// Current power state and last RSSI.
    pub fn state(&self) -> RadioState {
        self.state
    }

    /// Signal strength of the last received frame.
    pub fn last_rssi(&self) -> u8 {
        self.state.last_rssi
    }

    /// Mutable access to the transceiver driver.
    pub fn transceiver_mut(&mut self) -> &mut T {
        &mut self.transceiver
    }

    /// The diagnostics sink.
    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    /// Power-cycles and configures the transceiver.
    ///
    /// The radio is switched off, held off for [`SETTLE_DELAY_MS`], switched on,
    /// initialized for [`FRAME_SIZE`] byte frames, probed, tuned, given its modem
    /// profile and set to the configured transmit power.
    ///
    /// Probe, init and frequency failures are warnings: they are reported in the
    /// returned [`ConfigReport`] and the sequence carries on.
    ///
    /// # Errors
    /// [`Error::Link`] if the transceiver fails a power, modem or power level call.
    pub fn configure<DL: DelayNs>(
        &mut self,
        delay: &mut DL,
    ) -> Result<ConfigReport, Error<T::Error>> {
        self.radio_off()?;
        delay.delay_ms(SETTLE_DELAY_MS);
        self.radio_on()?;

        let initialized = self.transceiver.initialize(FRAME_SIZE);
        self.diagnostics.record(Event::Initialized { ok: initialized });

        let probe_ok = self.transceiver.probe();
        self.diagnostics.record(Event::Probe { ok: probe_ok });

        let mhz = self.config.frequency_mhz;
        let frequency_ok = self.transceiver.set_frequency(mhz);
        self.diagnostics.record(Event::Frequency {
            mhz,
            ok: frequency_ok,
        });

        self.transceiver
            .set_modem_profile(self.config.modem_profile)
            .map_err(Error::Link)?;
        self.transceiver
            .set_tx_power(self.config.tx_power.min(MAX_TX_POWER))
            .map_err(Error::Link)?;
        self.diagnostics.record(Event::Configured);

        Ok(ConfigReport {
            initialized,
            probe_ok,
            frequency_ok,
        })
    }

    /// Switches the radio on.
    pub fn radio_on(&mut self) -> Result<(), Error<T::Error>> {
        self.transceiver.power_on().map_err(Error::Link)?;
        self.state.powered = true;
        Ok(())
    }

    /// Switches the radio off.
    pub fn radio_off(&mut self) -> Result<(), Error<T::Error>> {
        self.transceiver.power_off().map_err(Error::Link)?;
        self.state.powered = false;
        Ok(())
    }

    /// Encodes `message` into one frame and transmits it, blocking until the
    /// transceiver confirms the frame was sent.
    ///
    /// # Errors
    /// - [`Error::Frame`] if `message` exceeds [`MAX_PAYLOAD_LEN`]. Nothing is sent.
    /// - [`Error::Link`] if the transceiver fails to send. There is no retry.
    pub fn transmit(&mut self, message: &[u8]) -> Result<(), Error<T::Error>> {
        let padded = match FrameCodec::<C>::pad(message) {
            Ok(padded) => padded,
            Err(FrameError::PayloadTooLarge { len, max }) => {
                self.diagnostics.record(Event::PayloadTooLarge { len, max });
                return Err(FrameError::PayloadTooLarge { len, max }.into());
            }
        };

        let frame = self.frames.encode_frame(&padded);
        self.diagnostics.record(Event::FrameEncoded { frame });

        let started = self.diagnostics.now_micros();
        self.transceiver.send(&frame).map_err(Error::Link)?;
        block!(self.transceiver.poll_send_complete()).map_err(Error::Link)?;
        let finished = self.diagnostics.now_micros();

        self.diagnostics.record(Event::Transmitted {
            len: message.len(),
            elapsed_us: started
                .zip(finished)
                .map(|(start, end)| end.wrapping_sub(start)),
        });
        Ok(())
    }

    /// Polls the transceiver once and decodes whatever arrived.
    ///
    /// If nothing is waiting, returns [`ReceiveOutcome::none`] immediately and
    /// leaves both `out` and the radio state untouched.
    ///
    /// Otherwise exactly [`MAX_PAYLOAD_LEN`] bytes are written to `out`, padding
    /// included, even when the frame turns out to be uncorrectable. Check
    /// [`ReceiveOutcome::uncorrectable`] and [`ReceiveOutcome::frame_size_mismatch`]
    /// before trusting them.
    ///
    /// # Errors
    /// [`Error::Link`] if the transceiver reports a receive failure.
    pub fn try_receive(
        &mut self,
        out: &mut [u8; MAX_PAYLOAD_LEN],
    ) -> Result<ReceiveOutcome, Error<T::Error>> {
        let mut buf = [0u8; RX_BUF_LEN];
        let len = match self.transceiver.receive(&mut buf) {
            Ok(len) => len,
            Err(nb::Error::WouldBlock) => return Ok(ReceiveOutcome::none()),
            Err(nb::Error::Other(err)) => return Err(Error::Link(err)),
        };

        let mut outcome = ReceiveOutcome {
            received: true,
            ..ReceiveOutcome::none()
        };
        self.state.last_rssi = self.transceiver.last_rssi();
        self.diagnostics.record(Event::Received {
            len,
            rssi: self.state.last_rssi,
        });

        if len != FRAME_SIZE {
            outcome.frame_size_mismatch = true;
            self.diagnostics.record(Event::FrameSizeMismatch {
                received: len,
                expected: FRAME_SIZE,
            });
            // A short frame is decoded over zero fill.
            buf[len.min(RX_BUF_LEN)..].fill(0);
        }

        let mut frame: Frame = [0u8; FRAME_SIZE];
        frame.copy_from_slice(&buf[..FRAME_SIZE]);

        if self.frames.decode_frame(&mut frame) {
            outcome.correction_attempted = true;
            self.diagnostics.record(Event::ErrorsDetected);
            if self.frames.correct(&mut frame) {
                self.diagnostics.record(Event::Corrected);
            } else {
                outcome.uncorrectable = true;
                self.diagnostics.record(Event::Uncorrectable);
            }
        } else {
            self.diagnostics.record(Event::Clean);
        }

        FrameCodec::<C>::extract_payload(&frame, out);
        Ok(outcome)
    }
}
