//! The link label controller.
//!
//! [`LinkLabel`] owns the currently assigned styled text, decomposes it into
//! standard style runs and link runs on assignment, tracks which link (if
//! any) is highlighted under the pointer, and rebuilds the display text
//! whenever link styling or highlight state changes. Hosts feed it pointer
//! input ([`LinkLabel::handle_touch`]) and read back the display text
//! ([`LinkLabel::styled_text`]); confirmed link taps and every display or
//! highlight change are reported through signals.
//!
//! All operations are synchronous: recomposition and display update complete
//! before the mutating call returns, so observers reading the display text
//! immediately afterwards always see the post-mutation result.
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
//! let mut oracle = CosmicOracle::new();
//! let at = Point::new(200.0, 24.0);
//! label.handle_touch(&mut oracle, TouchInput::new(at, TouchPhase::Started));
//! label.handle_touch(&mut oracle, TouchInput::new(at, TouchPhase::Ended));
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use linkspan_core::Signal;
use linkspan_core::logging::targets;

use crate::events::TouchInput;
use crate::geometry::Point;
use crate::gesture::{TapRecognizer, TouchRecognizer};
use crate::hit_test::{TextContainer, TextLayoutOracle, character_index_at};
use crate::styled_text::{
    AttributeMap, LinkRun, LinkValue, StyleAttribute, StyledText, compose,
};

static NEXT_LABEL_ID: AtomicU64 = AtomicU64::new(1);

/// A process-unique label identity.
///
/// Carried in emitted signals so observers watching several labels can
/// attribute events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelId(u64);

impl LabelId {
    fn next() -> Self {
        Self(NEXT_LABEL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A label controller for styled text with tappable links.
///
/// The controller is single-threaded and event-driven; all state is private
/// and mutated only by the host's event-processing context.
#[derive(Debug)]
pub struct LinkLabel {
    id: LabelId,

    /// Plain text of the currently assigned styled text.
    text: Option<String>,
    /// Non-link style runs captured from the assigned text.
    standard_attributes: Vec<StyleAttribute>,
    /// Link runs captured from the assigned text.
    link_runs: Vec<LinkRun>,

    /// Styling applied to links at rest.
    link_attributes: AttributeMap,
    /// Styling applied to the highlighted link.
    highlighted_link_attributes: AttributeMap,
    /// The link run currently under the pointer, if any.
    highlighted: Option<LinkRun>,

    /// The recomposed display text handed to the host surface.
    display: Option<StyledText>,
    /// The host surface's text container, used for hit-testing.
    container: TextContainer,

    touch: TouchRecognizer,
    tap: TapRecognizer,

    /// Emitted with `(label, link value)` on a confirmed tap selection.
    pub link_activated: Signal<(LabelId, LinkValue)>,
    /// Emitted with the new display text after every recomposition.
    pub display_changed: Signal<Option<StyledText>>,
    /// Emitted when the highlighted link run actually changes.
    pub highlight_changed: Signal<Option<LinkRun>>,
}

impl Default for LinkLabel {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkLabel {
    /// Create a label with no text and single-underline link styling.
    pub fn new() -> Self {
        Self {
            id: LabelId::next(),
            text: None,
            standard_attributes: Vec::new(),
            link_runs: Vec::new(),
            link_attributes: AttributeMap::underline(),
            highlighted_link_attributes: AttributeMap::underline(),
            highlighted: None,
            display: None,
            container: TextContainer::default(),
            touch: TouchRecognizer::new(),
            tap: TapRecognizer::new(),
            link_activated: Signal::new(),
            display_changed: Signal::new(),
            highlight_changed: Signal::new(),
        }
    }

    /// This label's identity.
    pub fn id(&self) -> LabelId {
        self.id
    }

    /// Assign styled text, replacing any previous assignment.
    ///
    /// The text is decomposed into standard style runs and link runs, the
    /// highlight is cleared, in-flight touch sequences are discarded, and
    /// the display text is rebuilt. `None` (or empty text) clears all
    /// internal state and displays nothing.
    pub fn set_styled_text(&mut self, text: Option<StyledText>) {
        self.touch.reset();
        self.tap.reset();

        if self.highlighted.take().is_some() {
            self.highlight_changed.emit(None);
        }

        match text.filter(|t| !t.is_empty()) {
            Some(text) => {
                let (standard, links) = text.decompose();
                tracing::debug!(
                    target: targets::LABEL,
                    label = ?self.id,
                    standard = standard.len(),
                    links = links.len(),
                    "assigned styled text"
                );
                self.text = Some(text.text().to_string());
                self.standard_attributes = standard;
                self.link_runs = links;
            }
            None => {
                tracing::debug!(target: targets::LABEL, label = ?self.id, "cleared styled text");
                self.text = None;
                self.standard_attributes.clear();
                self.link_runs.clear();
            }
        }

        self.recompose();
    }

    /// The current display text (recomposed), as the host surface sees it.
    pub fn styled_text(&self) -> Option<&StyledText> {
        self.display.as_ref()
    }

    /// The styling applied to links at rest.
    pub fn link_attributes(&self) -> &AttributeMap {
        &self.link_attributes
    }

    /// Replace the link styling and rebuild the display text.
    pub fn set_link_attributes(&mut self, attributes: AttributeMap) {
        self.link_attributes = attributes;
        self.recompose();
    }

    /// The styling applied to the highlighted link.
    pub fn highlighted_link_attributes(&self) -> &AttributeMap {
        &self.highlighted_link_attributes
    }

    /// Replace the highlighted-link styling and rebuild the display text.
    pub fn set_highlighted_link_attributes(&mut self, attributes: AttributeMap) {
        self.highlighted_link_attributes = attributes;
        self.recompose();
    }

    /// The host surface's text container used for hit-testing.
    pub fn container(&self) -> TextContainer {
        self.container
    }

    /// Update the text container (call when the host surface resizes or
    /// reconfigures).
    pub fn set_container(&mut self, container: TextContainer) {
        self.container = container;
    }

    /// The link run currently highlighted, if any.
    pub fn highlighted_link(&self) -> Option<&LinkRun> {
        self.highlighted.as_ref()
    }

    /// The link value under `point`, if any.
    ///
    /// Delegates to the hit-test adapter, then scans the link runs for the
    /// first whose range covers the reported index.
    pub fn link_value_at<O: TextLayoutOracle + ?Sized>(
        &self,
        oracle: &mut O,
        point: Point,
    ) -> Option<&LinkValue> {
        self.link_at(oracle, point).map(|run| &run.value)
    }

    /// Feed one pointer input sample.
    ///
    /// Advances both recognizers. While the touch is active, the link under
    /// the pointer is re-resolved on every sample and becomes the highlight
    /// (a no-op when unchanged, so each actual transition recomposes exactly
    /// once); any terminal phase clears the highlight. A completed tap that
    /// lands on a link emits [`link_activated`](Self::link_activated).
    ///
    /// With no link runs present this returns immediately without
    /// hit-testing; the highlight can never become set on a link-less label.
    pub fn handle_touch<O: TextLayoutOracle + ?Sized>(&mut self, oracle: &mut O, input: TouchInput) {
        if self.link_runs.is_empty() {
            return;
        }

        let transition = self.touch.process(&input);
        let tap = self.tap.process(&input);

        if let Some(phase) = transition {
            if phase.is_active() {
                let run = self.link_at(oracle, input.position).cloned();
                self.set_highlight(run);
            } else {
                self.set_highlight(None);
                self.touch.reset();
            }
        }

        if let Some(position) = tap
            && let Some(value) = self.link_value_at(oracle, position).cloned()
        {
            tracing::debug!(
                target: targets::LABEL,
                label = ?self.id,
                value = ?value,
                "link activated"
            );
            self.link_activated.emit((self.id, value));
        }
    }

    fn link_at<O: TextLayoutOracle + ?Sized>(
        &self,
        oracle: &mut O,
        point: Point,
    ) -> Option<&LinkRun> {
        if self.link_runs.is_empty() {
            return None;
        }
        let text = self.text.as_deref()?;
        let index = character_index_at(oracle, point, text, &self.container)?;
        self.link_runs.iter().find(|run| run.contains(index))
    }

    fn set_highlight(&mut self, run: Option<LinkRun>) {
        if self.highlighted == run {
            return;
        }
        tracing::debug!(target: targets::LABEL, label = ?self.id, run = ?run, "highlight changed");
        self.highlighted = run.clone();
        self.highlight_changed.emit(run);
        self.recompose();
    }

    fn recompose(&mut self) {
        self.display = self.text.as_deref().map(|text| {
            compose(
                text,
                &self.standard_attributes,
                &self.link_runs,
                &self.link_attributes,
                &self.highlighted_link_attributes,
                self.highlighted.as_ref(),
            )
        });
        self.display_changed.emit(self.display.clone());
    }
}
