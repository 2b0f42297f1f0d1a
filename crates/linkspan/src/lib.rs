//! LinkSpan - link-aware styled-text labels.
//!
//! LinkSpan models a block of styled text containing zero or more *links*
//! (arbitrary values attached to character ranges, not necessarily
//! navigable URLs), detects which link lies under a pointer interaction,
//! and reports taps and live highlight state through signals.
//!
//! The crate is layout-agnostic: text layout is consumed through the
//! [`TextLayoutOracle`] trait, with a `cosmic-text` backed implementation
//! ([`CosmicOracle`]) included for hosts without their own layout engine.
//!
//! # Overview
//!
//! - [`styled_text`]: the style run model. [`StyledText`] decomposition
//!   into standard style runs and [`LinkRun`]s, and recomposition with
//!   normal/highlighted link styling.
//! - [`hit_test`]: the [`TextContainer`] description and the pure
//!   point-to-character adapter over the layout oracle.
//! - [`gesture`]: the touch lifecycle state machine and tap recognizer.
//! - [`label`]: [`LinkLabel`], the controller tying the above together.
//! - [`touch`]: conversion from winit touch events.
//!
//! # Example
//!
//! ```no_run
//! use linkspan::{
//!     CosmicOracle, LinkLabel, LinkValue, Point, Size, StyledText,
//!     TextContainer, TouchInput, TouchPhase,
//! };
//!
//! let mut label = LinkLabel::new();
//! label.set_container(TextContainer::new(Size::new(320.0, 48.0)));
//! label.set_styled_text(Some(
//!     StyledText::new("Read the manual")
//!         .with_link(LinkValue::Token("manual".into()), 9..15)
//!         .unwrap(),
//! ));
//!
//! label.link_activated.connect(|(_label, value)| {
//!     println!("activated: {value:?}");
//! });
//!
//! // Pointer events from the host surface drive highlight and selection.
//! let mut oracle = CosmicOracle::new();
//! let at = Point::new(200.0, 24.0);
//! label.handle_touch(&mut oracle, TouchInput::new(at, TouchPhase::Started));
//! label.handle_touch(&mut oracle, TouchInput::new(at, TouchPhase::Ended));
//! ```

pub mod error;
pub mod events;
pub mod geometry;
pub mod gesture;
pub mod hit_test;
pub mod label;
pub mod layout;
pub mod styled_text;
pub mod touch;

pub use linkspan_core::{ConnectionGuard, ConnectionId, Signal};

pub use error::StyledTextError;
pub use events::{TouchInput, TouchPhase};
pub use geometry::{Point, Rect, Size};
pub use gesture::{
    DEFAULT_TAP_SLOP, DEFAULT_TAP_TIMEOUT_MS, GestureConfig, GesturePhase, TapRecognizer,
    TouchRecognizer,
};
pub use hit_test::{LineBreakMode, TextContainer, TextLayoutOracle, character_index_at};
pub use label::{LabelId, LinkLabel};
pub use layout::CosmicOracle;
pub use styled_text::{
    AttributeMap, AttributeValue, LINK_ATTRIBUTE, LinkRun, LinkValue, StyleAttribute, StyledText,
    UNDERLINE_ATTRIBUTE, UnderlineStyle, compose,
};
