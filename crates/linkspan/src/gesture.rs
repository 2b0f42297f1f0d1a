//! Touch gesture recognition.
//!
//! Two recognizers observe the same input stream:
//!
//! - [`TouchRecognizer`] tracks the raw single-pointer lifecycle
//!   (`Possible → Began → Changed* → Ended | Cancelled | Failed`) and
//!   reports every transition. It knows nothing about links; the label
//!   drives highlighting from its transitions.
//! - [`TapRecognizer`] detects a discrete tap: a press-release where total
//!   movement stayed inside a slop radius and duration stayed under a
//!   timeout.

use std::time::{Duration, Instant};

use linkspan_core::logging::targets;

use crate::events::{TouchInput, TouchPhase};
use crate::geometry::Point;

/// Default tap timeout in milliseconds.
///
/// A tap must complete within this duration to be recognized.
pub const DEFAULT_TAP_TIMEOUT_MS: u64 = 300;

/// Default maximum movement for a tap in pixels.
///
/// Movement beyond this threshold cancels tap recognition.
pub const DEFAULT_TAP_SLOP: f32 = 10.0;

/// The lifecycle phase of a touch gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GesturePhase {
    /// No touch sequence is in progress.
    #[default]
    Possible,
    /// The touch went down.
    Began,
    /// The touch moved while down.
    Changed,
    /// The touch lifted (terminal).
    Ended,
    /// The system interrupted the sequence (terminal).
    Cancelled,
    /// Input arrived that cannot begin a sequence (terminal).
    Failed,
}

impl GesturePhase {
    /// Whether the phase is one of the terminal states.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled | Self::Failed)
    }

    /// Whether a touch sequence is in progress.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Began | Self::Changed)
    }
}

/// Tracks the lifecycle of a single-pointer touch sequence.
///
/// A terminal recognizer ignores further input until [`reset`](Self::reset)
/// rearms it to [`GesturePhase::Possible`].
#[derive(Debug, Default)]
pub struct TouchRecognizer {
    phase: GesturePhase,
    position: Point,
}

impl TouchRecognizer {
    /// Create a recognizer in the `Possible` phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current lifecycle phase.
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// The position of the most recent processed input.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Rearm the recognizer for a new touch sequence.
    pub fn reset(&mut self) {
        self.phase = GesturePhase::Possible;
    }

    /// Advance the lifecycle with a new input sample.
    ///
    /// Returns the phase entered by this sample, or `None` when the sample
    /// caused no transition (input after a terminal phase).
    pub fn process(&mut self, input: &TouchInput) -> Option<GesturePhase> {
        let next = match (self.phase, input.phase) {
            (GesturePhase::Possible, TouchPhase::Started) => GesturePhase::Began,
            (GesturePhase::Began | GesturePhase::Changed, TouchPhase::Moved) => {
                GesturePhase::Changed
            }
            (GesturePhase::Began | GesturePhase::Changed, TouchPhase::Ended) => GesturePhase::Ended,
            (GesturePhase::Began | GesturePhase::Changed, TouchPhase::Cancelled) => {
                GesturePhase::Cancelled
            }
            // A move or lift with no preceding press cannot become a
            // sequence.
            (GesturePhase::Possible, _) => GesturePhase::Failed,
            _ => return None,
        };

        tracing::trace!(
            target: targets::GESTURE,
            from = ?self.phase,
            to = ?next,
            position = ?input.position,
            "touch transition"
        );

        self.phase = next;
        self.position = input.position;
        Some(next)
    }
}

/// Configuration for tap recognition.
#[derive(Debug, Clone)]
pub struct GestureConfig {
    /// Maximum duration for a tap.
    pub tap_timeout: Duration,
    /// Maximum movement allowed for a tap.
    pub tap_slop: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_timeout: Duration::from_millis(DEFAULT_TAP_TIMEOUT_MS),
            tap_slop: DEFAULT_TAP_SLOP,
        }
    }
}

/// State for a press that may still become a tap.
#[derive(Debug, Clone)]
struct PendingTap {
    start_time: Instant,
    start_position: Point,
    moved_beyond_slop: bool,
}

/// Recognizes discrete taps from the touch input stream.
#[derive(Debug, Default)]
pub struct TapRecognizer {
    config: GestureConfig,
    pending: Option<PendingTap>,
}

impl TapRecognizer {
    /// Create a recognizer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recognizer with the given configuration.
    pub fn with_config(config: GestureConfig) -> Self {
        Self {
            config,
            pending: None,
        }
    }

    /// Discard any pending press.
    pub fn reset(&mut self) {
        self.pending = None;
    }

    /// Feed an input sample; returns the tap position when a clean
    /// press-release completes.
    pub fn process(&mut self, input: &TouchInput) -> Option<Point> {
        match input.phase {
            TouchPhase::Started => {
                self.pending = Some(PendingTap {
                    start_time: Instant::now(),
                    start_position: input.position,
                    moved_beyond_slop: false,
                });
                None
            }
            TouchPhase::Moved => {
                if let Some(pending) = &mut self.pending
                    && !pending.moved_beyond_slop
                {
                    let dx = input.position.x - pending.start_position.x;
                    let dy = input.position.y - pending.start_position.y;
                    if (dx * dx + dy * dy).sqrt() > self.config.tap_slop {
                        pending.moved_beyond_slop = true;
                    }
                }
                None
            }
            TouchPhase::Cancelled => {
                self.pending = None;
                None
            }
            TouchPhase::Ended => {
                let pending = self.pending.take()?;
                let duration = pending.start_time.elapsed();
                if pending.moved_beyond_slop || duration >= self.config.tap_timeout {
                    return None;
                }
                tracing::trace!(
                    target: targets::GESTURE,
                    position = ?input.position,
                    ?duration,
                    "tap recognized"
                );
                Some(input.position)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(phase: TouchPhase, x: f32, y: f32) -> TouchInput {
        TouchInput::new(Point::new(x, y), phase)
    }

    #[test]
    fn test_lifecycle_transitions() {
        let mut recognizer = TouchRecognizer::new();
        assert_eq!(recognizer.phase(), GesturePhase::Possible);

        assert_eq!(
            recognizer.process(&input(TouchPhase::Started, 1.0, 1.0)),
            Some(GesturePhase::Began)
        );
        assert_eq!(
            recognizer.process(&input(TouchPhase::Moved, 2.0, 1.0)),
            Some(GesturePhase::Changed)
        );
        assert_eq!(
            recognizer.process(&input(TouchPhase::Moved, 3.0, 1.0)),
            Some(GesturePhase::Changed)
        );
        assert_eq!(
            recognizer.process(&input(TouchPhase::Ended, 3.0, 1.0)),
            Some(GesturePhase::Ended)
        );
        assert!(recognizer.phase().is_terminal());
    }

    #[test]
    fn test_cancellation_is_terminal() {
        let mut recognizer = TouchRecognizer::new();

        recognizer.process(&input(TouchPhase::Started, 0.0, 0.0));
        assert_eq!(
            recognizer.process(&input(TouchPhase::Cancelled, 0.0, 0.0)),
            Some(GesturePhase::Cancelled)
        );
        // Terminal: further input is ignored until reset.
        assert_eq!(recognizer.process(&input(TouchPhase::Moved, 1.0, 1.0)), None);

        recognizer.reset();
        assert_eq!(
            recognizer.process(&input(TouchPhase::Started, 0.0, 0.0)),
            Some(GesturePhase::Began)
        );
    }

    #[test]
    fn test_move_before_press_fails() {
        let mut recognizer = TouchRecognizer::new();

        assert_eq!(
            recognizer.process(&input(TouchPhase::Moved, 0.0, 0.0)),
            Some(GesturePhase::Failed)
        );
        assert_eq!(recognizer.process(&input(TouchPhase::Started, 0.0, 0.0)), None);
    }

    #[test]
    fn test_tap_recognized_on_clean_press_release() {
        let mut tap = TapRecognizer::new();

        assert_eq!(tap.process(&input(TouchPhase::Started, 5.0, 5.0)), None);
        assert_eq!(
            tap.process(&input(TouchPhase::Ended, 6.0, 5.0)),
            Some(Point::new(6.0, 5.0))
        );
    }

    #[test]
    fn test_tap_rejected_when_slop_exceeded() {
        let mut tap = TapRecognizer::new();

        tap.process(&input(TouchPhase::Started, 5.0, 5.0));
        tap.process(&input(TouchPhase::Moved, 50.0, 5.0));
        // Returning inside the slop radius does not resurrect the tap.
        tap.process(&input(TouchPhase::Moved, 6.0, 5.0));
        assert_eq!(tap.process(&input(TouchPhase::Ended, 6.0, 5.0)), None);
    }

    #[test]
    fn test_tap_rejected_after_timeout() {
        let mut tap = TapRecognizer::with_config(GestureConfig {
            tap_timeout: Duration::from_millis(1),
            tap_slop: DEFAULT_TAP_SLOP,
        });

        tap.process(&input(TouchPhase::Started, 5.0, 5.0));
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(tap.process(&input(TouchPhase::Ended, 5.0, 5.0)), None);
    }

    #[test]
    fn test_tap_rejected_on_cancel() {
        let mut tap = TapRecognizer::new();

        tap.process(&input(TouchPhase::Started, 5.0, 5.0));
        tap.process(&input(TouchPhase::Cancelled, 5.0, 5.0));
        assert_eq!(tap.process(&input(TouchPhase::Ended, 5.0, 5.0)), None);
    }
}
