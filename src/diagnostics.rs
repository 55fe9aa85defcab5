//! Injected diagnostics sinks.
//!
//! Every pipeline step reports what it did through a [`Diagnostics`] sink
//! instead of printing directly. Diagnostics are a side channel: errors are
//! always propagated through return values, never only through an [`Event`].
//!
//! ## Sinks
//!
//! | Sink                 | Feature     | Description |
//! |----------------------|-------------|-------------|
//! | [`NoDiagnostics`]    |             | Discards everything (default) |
//! | [`EventLog`]         |             | Keeps the most recent `N` events in a ring |
//! | [`Timed`]            |             | Adds a microsecond clock to any sink |
//! | `LogDiagnostics`     | `log`       | Emits through the `log` facade |
//! | `DefmtDiagnostics`   | `defmt-0-3` | Emits through `defmt` |
//!
//! A `&mut D` is itself a sink, so a caller can keep ownership of an
//! [`EventLog`] and inspect it between calls.

use heapless::Deque;

use crate::consts::FRAME_SIZE;

/// Something worth reporting that happened inside the radio pipelines.
#[derive(PartialEq, Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt-0-3", derive(defmt::Format))]
pub enum Event {
    /// The transceiver accepted (or rejected) the frame size during initialization.
    Initialized {
        /// Whether initialization succeeded
        ok: bool,
    },
    /// Result of the bus health probe.
    Probe {
        /// Whether the device answered
        ok: bool,
    },
    /// Result of tuning the carrier.
    Frequency {
        /// Requested frequency in MHz
        mhz: f32,
        /// Whether the device accepted it
        ok: bool,
    },
    /// The configuration sequence finished.
    Configured,
    /// A transmit was refused because the message does not fit in a frame.
    PayloadTooLarge {
        /// Length of the refused message
        len: usize,
        /// Payload capacity
        max: usize,
    },
    /// The coded frame about to be sent.
    FrameEncoded {
        /// Frame contents
        frame: [u8; FRAME_SIZE],
    },
    /// A frame left the antenna.
    Transmitted {
        /// Length of the caller's message
        len: usize,
        /// Time spent in send and completion wait, if the sink has a clock
        elapsed_us: Option<u32>,
    },
    /// A packet arrived.
    Received {
        /// Length reported by the transceiver
        len: usize,
        /// Signal strength of the packet
        rssi: u8,
    },
    /// The received packet length was not the frame size.
    FrameSizeMismatch {
        /// Length reported by the transceiver
        received: usize,
        /// Expected frame size
        expected: usize,
    },
    /// The frame decoded with a zero syndrome.
    Clean,
    /// The syndrome was non-zero; correction follows.
    ErrorsDetected,
    /// Correction succeeded.
    Corrected,
    /// Correction failed; the payload is untrusted.
    Uncorrectable,
}

/// Receiver of pipeline [`Event`]s.
pub trait Diagnostics {
    /// Records one event.
    fn record(&mut self, event: Event);

    /// Current time in microseconds, used to time transmissions.
    ///
    /// Sinks without a clock return `None` and transmit timing is skipped.
    fn now_micros(&mut self) -> Option<u32> {
        None
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &mut D {
    fn record(&mut self, event: Event) {
        (**self).record(event);
    }

    fn now_micros(&mut self) -> Option<u32> {
        (**self).now_micros()
    }
}

/// A sink that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiagnostics;

impl Diagnostics for NoDiagnostics {
    fn record(&mut self, _event: Event) {}
}

/// Bounded in-memory log of the most recent `N` events.
///
/// When full, the oldest event is dropped to make room and counted in
/// [`dropped`](EventLog::dropped).
#[derive(Debug)]
pub struct EventLog<const N: usize> {
    events: Deque<Event, N>,
    dropped: usize,
}

impl<const N: usize> EventLog<N> {
    /// Creates an empty log.
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
            dropped: 0,
        }
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    /// Returns `true` if `event` is still in the log.
    pub fn contains(&self, event: &Event) -> bool {
        self.events.iter().any(|e| e == event)
    }

    /// Most recent event.
    pub fn last(&self) -> Option<&Event> {
        self.events.back()
    }

    /// Number of events held.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if no events are held.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events evicted since creation or the last [`clear`](Self::clear).
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Forgets all events.
    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }
}

impl<const N: usize> Default for EventLog<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Diagnostics for EventLog<N> {
    fn record(&mut self, event: Event) {
        if self.events.is_full() {
            let _ = self.events.pop_front();
            self.dropped += 1;
        }
        let _ = self.events.push_back(event);
    }
}

/// Adds a microsecond clock to a sink.
///
/// `clock` is any monotonic microsecond counter, e.g. a HAL timer read.
/// It may wrap; elapsed times are computed with wrapping arithmetic.
#[derive(Debug)]
pub struct Timed<D, F> {
    inner: D,
    clock: F,
}

impl<D, F> Timed<D, F>
where
    D: Diagnostics,
    F: FnMut() -> u32,
{
    /// Wraps `inner` with `clock`.
    pub fn new(inner: D, clock: F) -> Self {
        Self { inner, clock }
    }

    /// Returns the wrapped sink.
    pub fn release(self) -> D {
        self.inner
    }
}

impl<D, F> Diagnostics for Timed<D, F>
where
    D: Diagnostics,
    F: FnMut() -> u32,
{
    fn record(&mut self, event: Event) {
        self.inner.record(event);
    }

    fn now_micros(&mut self) -> Option<u32> {
        Some((self.clock)())
    }
}

#[cfg(feature = "log")]
pub use self::log_sink::LogDiagnostics;

#[cfg(feature = "log")]
mod log_sink {
    use super::{Diagnostics, Event};

    /// Emits events through the `log` facade.
    ///
    /// Failures go out at `warn`, routine progress at `info`/`debug` and frame
    /// dumps at `trace`.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LogDiagnostics;

    impl Diagnostics for LogDiagnostics {
        fn record(&mut self, event: Event) {
            match event {
                Event::Initialized { ok: true } => log::debug!("transceiver initialized"),
                Event::Initialized { ok: false } => log::warn!("transceiver init failed"),
                Event::Probe { ok: true } => log::info!("SPI OK"),
                Event::Probe { ok: false } => log::warn!("SPI ERROR"),
                Event::Frequency { mhz, ok: true } => log::info!("frequency set to {} MHz", mhz),
                Event::Frequency { mhz, ok: false } => {
                    log::warn!("set frequency to {} MHz failed", mhz)
                }
                Event::Configured => log::info!("RF configured"),
                Event::PayloadTooLarge { len, max } => {
                    log::warn!("message too large: {} > {} bytes", len, max)
                }
                Event::FrameEncoded { frame } => log::trace!("encoded frame {:?}", frame),
                Event::Transmitted {
                    len,
                    elapsed_us: Some(us),
                } => log::debug!("sent {} bytes in {} us", len, us),
                Event::Transmitted {
                    len,
                    elapsed_us: None,
                } => log::debug!("sent {} bytes", len),
                Event::Received { len, rssi } => {
                    log::debug!("got {} bytes at RSSI {}", len, rssi)
                }
                Event::FrameSizeMismatch { received, expected } => {
                    log::warn!("got frame of size {}, expecting {}", received, expected)
                }
                Event::Clean => log::debug!("no errors"),
                Event::ErrorsDetected => log::info!("there were errors"),
                Event::Corrected => log::info!("corrected successfully"),
                Event::Uncorrectable => log::warn!("uncorrectable errors"),
            }
        }
    }
}

#[cfg(feature = "defmt-0-3")]
pub use self::defmt_sink::DefmtDiagnostics;

#[cfg(feature = "defmt-0-3")]
mod defmt_sink {
    use super::{Diagnostics, Event};

    /// Emits events through `defmt`.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct DefmtDiagnostics;

    impl Diagnostics for DefmtDiagnostics {
        fn record(&mut self, event: Event) {
            match event {
                Event::Initialized { ok: false }
                | Event::Probe { ok: false }
                | Event::Frequency { ok: false, .. }
                | Event::PayloadTooLarge { .. }
                | Event::FrameSizeMismatch { .. }
                | Event::Uncorrectable => defmt::warn!("{}", event),
                Event::FrameEncoded { .. } => defmt::trace!("{}", event),
                _ => defmt::debug!("{}", event),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_log_keeps_most_recent() {
        let mut log: EventLog<2> = EventLog::new();
        log.record(Event::Clean);
        log.record(Event::ErrorsDetected);
        log.record(Event::Corrected);

        assert_eq!(log.len(), 2);
        assert_eq!(log.dropped(), 1);
        assert!(!log.contains(&Event::Clean));
        assert_eq!(log.last(), Some(&Event::Corrected));
        assert_eq!(
            log.iter().copied().collect::<Vec<_>>(),
            vec![Event::ErrorsDetected, Event::Corrected]
        );

        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.dropped(), 0);
    }

    #[test]
    fn test_mut_ref_forwards_to_sink() {
        fn emit<D: Diagnostics>(mut sink: D) -> Option<u32> {
            sink.record(Event::Configured);
            sink.now_micros()
        }

        let mut log: EventLog<4> = EventLog::new();
        assert_eq!(emit(&mut log), None);
        assert_eq!(log.last(), Some(&Event::Configured));
    }

    #[test]
    fn test_timed_sink_reads_clock() {
        let mut now = 100u32;
        let mut timed = Timed::new(EventLog::<4>::new(), move || {
            now += 25;
            now
        });
        assert_eq!(timed.now_micros(), Some(125));
        assert_eq!(timed.now_micros(), Some(150));

        timed.record(Event::Clean);
        assert!(timed.release().contains(&Event::Clean));
    }

    #[test]
    fn test_no_diagnostics_has_no_clock() {
        let mut sink = NoDiagnostics;
        sink.record(Event::Uncorrectable);
        assert_eq!(sink.now_micros(), None);
    }

    #[cfg(feature = "log")]
    #[test]
    fn test_log_sink_handles_every_event() {
        let mut sink = LogDiagnostics;
        for event in [
            Event::Initialized { ok: false },
            Event::Probe { ok: true },
            Event::Frequency {
                mhz: 433.0,
                ok: false,
            },
            Event::Configured,
            Event::PayloadTooLarge { len: 60, max: 48 },
            Event::FrameEncoded {
                frame: [0; FRAME_SIZE],
            },
            Event::Transmitted {
                len: 5,
                elapsed_us: Some(1200),
            },
            Event::Received { len: 64, rssi: 90 },
            Event::FrameSizeMismatch {
                received: 60,
                expected: 64,
            },
            Event::Clean,
            Event::ErrorsDetected,
            Event::Corrected,
            Event::Uncorrectable,
        ] {
            sink.record(event);
        }
    }
}
