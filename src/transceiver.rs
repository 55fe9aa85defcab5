//! Half-duplex transceiver seam.
//!
//! This module defines what the framing layer needs from the physical radio:
//! power control, one-shot configuration, a blocking send and a non-blocking
//! receive probe. Register maps, SPI traffic and interrupt handling live in the
//! [`Transceiver`] implementation, not here.
//!
//! Completion and arrival are polled with [`nb`]: `WouldBlock` from
//! [`poll_send_complete`](Transceiver::poll_send_complete) means the frame is
//! still on the air, and `WouldBlock` from [`receive`](Transceiver::receive)
//! means nothing has arrived.

use core::fmt::Debug;

use embedded_hal::digital::OutputPin;

use crate::consts::{DEFAULT_FREQUENCY_MHZ, MAX_TX_POWER};

/// Modem presets supported by the transceiver.
///
/// Names follow `<modulation>_Rb<data rate kbps>Fd<deviation kHz>`.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum ModemProfile {
    /// 2-FSK, 5 kbps, 10 kHz deviation.
    FskRb5Fd10,
    /// Gaussian FSK, 5 kbps, 10 kHz deviation.
    #[default]
    GfskRb5Fd10,
    /// Gaussian FSK, 50 kbps, 100 kHz deviation.
    GfskRb50Fd100,
    /// Gaussian FSK, 150 kbps, 300 kHz deviation.
    GfskRb150Fd300,
    /// On-off keying, 5 kbps, 30 kHz receive bandwidth.
    OokRb5Bw30,
}

/// Static radio settings applied by [`configure`](crate::radio::Radio::configure).
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct RadioConfig {
    /// Carrier frequency in MHz.
    pub frequency_mhz: f32,
    /// Modem preset.
    pub modem_profile: ModemProfile,
    /// Transmit power level, `0..=MAX_TX_POWER`.
    pub tx_power: u8,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            frequency_mhz: DEFAULT_FREQUENCY_MHZ,
            modem_profile: ModemProfile::default(),
            tx_power: MAX_TX_POWER,
        }
    }
}

/// A half-duplex packet radio that moves whole frames.
pub trait Transceiver {
    /// Bus or device error reported by the driver.
    type Error: Debug;

    /// Enables the radio.
    fn power_on(&mut self) -> Result<(), Self::Error>;

    /// Shuts the radio down.
    fn power_off(&mut self) -> Result<(), Self::Error>;

    /// Initializes the device for fixed `frame_size` byte packets.
    fn initialize(&mut self, frame_size: usize) -> bool;

    /// Queries the device's part information to check bus health.
    fn probe(&mut self) -> bool;

    /// Tunes the carrier. Returns `false` if the frequency was rejected.
    fn set_frequency(&mut self, mhz: f32) -> bool;

    /// Selects a modem preset.
    fn set_modem_profile(&mut self, profile: ModemProfile) -> Result<(), Self::Error>;

    /// Sets the transmit power level.
    fn set_tx_power(&mut self, level: u8) -> Result<(), Self::Error>;

    /// Starts transmitting `frame`.
    fn send(&mut self, frame: &[u8]) -> Result<(), Self::Error>;

    /// Reports whether the last [`send`](Self::send) has left the antenna.
    fn poll_send_complete(&mut self) -> nb::Result<(), Self::Error>;

    /// Copies a received packet into `buf` and returns its length.
    ///
    /// Returns `WouldBlock` if no packet is waiting. Must not block.
    fn receive(&mut self, buf: &mut [u8]) -> nb::Result<usize, Self::Error>;

    /// Signal strength of the last received packet.
    fn last_rssi(&self) -> u8;
}

/// Active-low enable line for a radio's shutdown/gate input.
///
/// Driving the pin `LOW` powers the radio, `HIGH` shuts it down. Intended as a
/// building block for [`Transceiver::power_on`] and [`Transceiver::power_off`].
#[derive(Debug)]
pub struct EnableLine<P> {
    pin: P,
}

impl<P: OutputPin> EnableLine<P> {
    /// Wraps the gate pin. The pin is left untouched until the first call.
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Powers the radio (pin `LOW`).
    pub fn enable(&mut self) -> Result<(), P::Error> {
        self.pin.set_low()
    }

    /// Shuts the radio down (pin `HIGH`).
    pub fn disable(&mut self) -> Result<(), P::Error> {
        self.pin.set_high()
    }

    /// Mutable access to the wrapped pin.
    pub fn pin_mut(&mut self) -> &mut P {
        &mut self.pin
    }

    /// Returns the wrapped pin.
    pub fn release(self) -> P {
        self.pin
    }
}
