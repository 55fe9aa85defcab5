//! Result of a single receive poll.

/// Status of one [`try_receive`](crate::radio::Radio::try_receive) call.
///
/// The four facts are independent and can be combined freely. A clean frame
/// yields `received` and nothing else, an empty poll yields all `false`.
///
/// | Fact                    | Status bit |
/// |-------------------------|------------|
/// | `received`              | `0x01`     |
/// | `correction_attempted`  | `0x02`     |
/// | `uncorrectable`         | `0x04`     |
/// | `frame_size_mismatch`   | `0x08`     |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub struct ReceiveOutcome {
    /// A frame arrived and was processed.
    pub received: bool,
    /// The syndrome was non-zero and error correction ran.
    pub correction_attempted: bool,
    /// Error correction failed. The payload must not be trusted.
    pub uncorrectable: bool,
    /// The received frame length differed from [`FRAME_SIZE`](crate::consts::FRAME_SIZE).
    pub frame_size_mismatch: bool,
}

impl ReceiveOutcome {
    /// Bit set when a frame was received.
    pub const RECEIVED: u8 = 0x01;
    /// Bit set when error correction was attempted.
    pub const CORRECTION_ATTEMPTED: u8 = 0x02;
    /// Bit set when error correction failed.
    pub const UNCORRECTABLE: u8 = 0x04;
    /// Bit set when the frame length was wrong.
    pub const FRAME_SIZE_MISMATCH: u8 = 0x08;

    /// Outcome of a poll that found nothing.
    pub const fn none() -> Self {
        Self {
            received: false,
            correction_attempted: false,
            uncorrectable: false,
            frame_size_mismatch: false,
        }
    }

    /// Returns `true` if nothing was received.
    pub fn is_none(&self) -> bool {
        !self.received
    }

    /// Returns `true` if a frame arrived with the expected size and either
    /// decoded cleanly or was repaired.
    pub fn is_trustworthy(&self) -> bool {
        self.received && !self.uncorrectable && !self.frame_size_mismatch
    }

    /// Packs the outcome into the compact status byte.
    pub fn bits(&self) -> u8 {
        let mut bits = 0;
        if self.received {
            bits |= Self::RECEIVED;
        }
        if self.correction_attempted {
            bits |= Self::CORRECTION_ATTEMPTED;
        }
        if self.uncorrectable {
            bits |= Self::UNCORRECTABLE;
        }
        if self.frame_size_mismatch {
            bits |= Self::FRAME_SIZE_MISMATCH;
        }
        bits
    }

    /// Unpacks a compact status byte. Unknown bits are ignored.
    pub fn from_bits(bits: u8) -> Self {
        Self {
            received: bits & Self::RECEIVED != 0,
            correction_attempted: bits & Self::CORRECTION_ATTEMPTED != 0,
            uncorrectable: bits & Self::UNCORRECTABLE != 0,
            frame_size_mismatch: bits & Self::FRAME_SIZE_MISMATCH != 0,
        }
    }
}

impl From<ReceiveOutcome> for u8 {
    fn from(outcome: ReceiveOutcome) -> u8 {
        outcome.bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_nothing_received() {
        let outcome = ReceiveOutcome::default();
        assert_eq!(outcome, ReceiveOutcome::none());
        assert!(outcome.is_none());
        assert!(!outcome.is_trustworthy());
        assert_eq!(outcome.bits(), 0);
    }

    #[test]
    fn test_clean_receive_sets_only_received() {
        let outcome = ReceiveOutcome {
            received: true,
            ..ReceiveOutcome::none()
        };
        assert_eq!(outcome.bits(), 0x01);
        assert!(outcome.is_trustworthy());
    }

    #[test]
    fn test_status_byte_layout() {
        let outcome = ReceiveOutcome {
            received: true,
            correction_attempted: true,
            uncorrectable: true,
            frame_size_mismatch: false,
        };
        assert_eq!(outcome.bits(), 1 + 2 + 4);
        assert_eq!(u8::from(outcome), 7);
        assert!(!outcome.is_trustworthy());
    }

    #[test]
    fn test_flags_are_independent() {
        for bits in 0u8..16 {
            let outcome = ReceiveOutcome::from_bits(bits);
            assert_eq!(outcome.bits(), bits);
        }
        assert_eq!(ReceiveOutcome::from_bits(0xf0), ReceiveOutcome::none());
    }

    #[test]
    fn test_corrected_frame_is_trustworthy() {
        let outcome = ReceiveOutcome::from_bits(
            ReceiveOutcome::RECEIVED | ReceiveOutcome::CORRECTION_ATTEMPTED,
        );
        assert!(outcome.is_trustworthy());
        let mismatched = ReceiveOutcome {
            frame_size_mismatch: true,
            ..outcome
        };
        assert!(!mismatched.is_trustworthy());
    }
}
