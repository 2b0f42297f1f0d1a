//! Logging facilities for LinkSpan.
//!
//! LinkSpan instruments with the `tracing` crate. To see logs, install a
//! tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! All emission sites use the targets below, so individual subsystems can be
//! filtered with `tracing` directives, e.g.
//! `RUST_LOG=linkspan::label=debug,linkspan_core::signal=off`.

/// Target names for log filtering.
///
/// Shared across the LinkSpan crates so every subsystem filters under a
/// stable name.
pub mod targets {
    /// Signal emission.
    pub const SIGNAL: &str = "linkspan_core::signal";
    /// Styled text decomposition and recomposition.
    pub const STYLED_TEXT: &str = "linkspan::styled_text";
    /// Hit-test adapter queries.
    pub const HIT_TEST: &str = "linkspan::hit_test";
    /// Touch gesture recognition.
    pub const GESTURE: &str = "linkspan::gesture";
    /// Label controller state changes.
    pub const LABEL: &str = "linkspan::label";
}
