//! Styled text and the link-aware style run model.
//!
//! A [`StyledText`] is plain text plus an ordered list of attribute runs,
//! each run binding a string key and an [`AttributeValue`] to a half-open
//! byte range. The label never edits runs in place: assigned text is
//! [decomposed](StyledText::decompose) once into "standard" style runs and
//! link runs, and display text is rebuilt from those parts by [`compose`]
//! whenever link styling or highlight state changes.
//!
//! # Example
//!
//! ```
//! use linkspan::styled_text::{AttributeValue, LinkValue, StyledText};
//!
//! let text = StyledText::new("Hello world")
//!     .with_attribute("foreground", AttributeValue::Color([0, 0, 0, 255]), 0..11)
//!     .unwrap()
//!     .with_link(LinkValue::Token("greeting".into()), 6..11)
//!     .unwrap();
//!
//! let (standard, links) = text.decompose();
//! assert_eq!(standard.len(), 1);
//! assert_eq!(links.len(), 1);
//! ```

use std::ops::Range;

use linkspan_core::logging::targets;
use url::Url;

use crate::error::StyledTextError;

/// The well-known attribute key marking a link span.
///
/// During decomposition, runs under this key whose value is a
/// [`AttributeValue::Url`] or [`AttributeValue::Str`] become [`LinkRun`]s;
/// any other payload kind under this key is dropped.
pub const LINK_ATTRIBUTE: &str = "link";

/// The well-known attribute key for underline decoration, used by the
/// default link attribute maps.
pub const UNDERLINE_ATTRIBUTE: &str = "underline";

/// Underline decoration styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnderlineStyle {
    /// A single line.
    #[default]
    Single,
    /// A thicker single line.
    Thick,
    /// Two parallel lines.
    Double,
}

/// An attribute payload.
///
/// Keys are open-ended strings rather than a closed enumeration, so hosts
/// can carry attribute kinds the label itself knows nothing about; the
/// payload variants cover what label styling needs and pass through
/// decomposition and recomposition untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// A boolean flag.
    Bool(bool),
    /// An integral quantity.
    Int(i64),
    /// A floating-point quantity (e.g. a font size).
    Float(f64),
    /// An RGBA color.
    Color([u8; 4]),
    /// A string payload.
    Str(String),
    /// A parsed URL payload.
    Url(Url),
    /// An underline decoration.
    Underline(UnderlineStyle),
}

/// One non-link formatting instruction over a span of text.
///
/// Captured during decomposition and reapplied verbatim during
/// recomposition; immutable once captured.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleAttribute {
    /// The attribute key.
    pub key: String,
    /// The attribute payload.
    pub value: AttributeValue,
    /// The half-open byte range the attribute covers.
    pub range: Range<usize>,
}

/// The payload carried by a link run.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkValue {
    /// A URL-like reference.
    Url(Url),
    /// An opaque token the host interprets.
    Token(String),
}

impl LinkValue {
    /// The URL payload, if this is a [`LinkValue::Url`].
    pub fn as_url(&self) -> Option<&Url> {
        match self {
            Self::Url(url) => Some(url),
            Self::Token(_) => None,
        }
    }

    /// The token payload, if this is a [`LinkValue::Token`].
    pub fn as_token(&self) -> Option<&str> {
        match self {
            Self::Token(token) => Some(token),
            Self::Url(_) => None,
        }
    }
}

/// One link-annotated span of text.
///
/// Compared by value (payload plus range); highlight transitions rely on
/// this equality to detect the run under the pointer actually changing.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRun {
    /// The link payload.
    pub value: LinkValue,
    /// The half-open byte range the link covers.
    pub range: Range<usize>,
}

impl LinkRun {
    /// Check whether a byte index falls inside this run.
    pub fn contains(&self, index: usize) -> bool {
        self.range.contains(&index)
    }
}

/// An ordered key/value mapping of style attributes.
///
/// Insertion order is preserved and is the order attributes are applied
/// during recomposition; inserting an existing key overwrites its value in
/// place without changing its position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AttributeMap {
    entries: Vec<(String, AttributeValue)>,
}

impl AttributeMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default link styling: a single underline.
    pub fn underline() -> Self {
        let mut map = Self::new();
        map.insert(
            UNDERLINE_ATTRIBUTE,
            AttributeValue::Underline(UnderlineStyle::Single),
        );
        map
    }

    /// Insert a key/value pair, overwriting in place if the key exists.
    pub fn insert(&mut self, key: impl Into<String>, value: AttributeValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Insert a key/value pair, consuming and returning the map.
    pub fn with(mut self, key: impl Into<String>, value: AttributeValue) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Remove a key, returning its value if present.
    pub fn remove(&mut self, key: &str) -> Option<AttributeValue> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One attribute run as stored on a [`StyledText`].
#[derive(Debug, Clone, PartialEq)]
struct AttributeRun {
    key: String,
    value: AttributeValue,
    range: Range<usize>,
}

/// Text content paired with ordered formatting attribute runs.
///
/// Ranges are byte ranges into the text and are validated on application:
/// start not past end, both endpoints in bounds and on char boundaries.
/// Runs are kept in application order; where runs overlap on the same key,
/// the later-applied run wins, matching the usual attributed-string
/// semantics of host text systems.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyledText {
    text: String,
    runs: Vec<AttributeRun>,
}

impl StyledText {
    /// Create styled text with no attributes applied.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            runs: Vec::new(),
        }
    }

    /// The plain text content.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The length of the text in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Check if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Apply an attribute to a byte range of the text.
    pub fn apply_attribute(
        &mut self,
        key: impl Into<String>,
        value: AttributeValue,
        range: Range<usize>,
    ) -> Result<(), StyledTextError> {
        self.validate_range(&range)?;
        self.runs.push(AttributeRun {
            key: key.into(),
            value,
            range,
        });
        Ok(())
    }

    /// Apply an attribute, consuming and returning the text.
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: AttributeValue,
        range: Range<usize>,
    ) -> Result<Self, StyledTextError> {
        self.apply_attribute(key, value, range)?;
        Ok(self)
    }

    /// Annotate a byte range as a link.
    pub fn with_link(
        self,
        value: LinkValue,
        range: Range<usize>,
    ) -> Result<Self, StyledTextError> {
        let value = match value {
            LinkValue::Url(url) => AttributeValue::Url(url),
            LinkValue::Token(token) => AttributeValue::Str(token),
        };
        self.with_attribute(LINK_ATTRIBUTE, value, range)
    }

    /// Iterate all attribute runs in application order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeValue, &Range<usize>)> {
        self.runs
            .iter()
            .map(|run| (run.key.as_str(), &run.value, &run.range))
    }

    /// The number of attribute runs.
    pub fn attribute_count(&self) -> usize {
        self.runs.len()
    }

    /// Split the runs into standard style attributes and link runs.
    ///
    /// Every run is visited exactly once, in application order. Runs under
    /// [`LINK_ATTRIBUTE`] become [`LinkRun`]s when their payload is a URL or
    /// a string; link runs with any other payload are dropped. All other
    /// runs are captured verbatim as [`StyleAttribute`]s.
    pub fn decompose(&self) -> (Vec<StyleAttribute>, Vec<LinkRun>) {
        let mut standard = Vec::new();
        let mut links = Vec::new();

        for run in &self.runs {
            if run.key == LINK_ATTRIBUTE {
                match &run.value {
                    AttributeValue::Url(url) => links.push(LinkRun {
                        value: LinkValue::Url(url.clone()),
                        range: run.range.clone(),
                    }),
                    AttributeValue::Str(token) => links.push(LinkRun {
                        value: LinkValue::Token(token.clone()),
                        range: run.range.clone(),
                    }),
                    other => {
                        tracing::debug!(
                            target: targets::STYLED_TEXT,
                            range = ?run.range,
                            value = ?other,
                            "dropping link attribute with unsupported payload"
                        );
                    }
                }
            } else {
                standard.push(StyleAttribute {
                    key: run.key.clone(),
                    value: run.value.clone(),
                    range: run.range.clone(),
                });
            }
        }

        tracing::trace!(
            target: targets::STYLED_TEXT,
            standard = standard.len(),
            links = links.len(),
            "decomposed styled text"
        );

        (standard, links)
    }

    /// Push a run captured from this same text, skipping validation.
    fn push_run_unchecked(&mut self, key: &str, value: &AttributeValue, range: Range<usize>) {
        debug_assert!(range.end <= self.text.len());
        self.runs.push(AttributeRun {
            key: key.to_string(),
            value: value.clone(),
            range,
        });
    }

    fn validate_range(&self, range: &Range<usize>) -> Result<(), StyledTextError> {
        let len = self.text.len();
        if range.start > range.end {
            return Err(StyledTextError::InvalidRange {
                start: range.start,
                end: range.end,
            });
        }
        if range.start > len || range.end > len {
            return Err(StyledTextError::OutOfBounds {
                start: range.start,
                end: range.end,
                len,
            });
        }
        for index in [range.start, range.end] {
            if !self.text.is_char_boundary(index) {
                return Err(StyledTextError::NotCharBoundary { index });
            }
        }
        Ok(())
    }
}

/// Rebuild display text from decomposed parts.
///
/// The output carries the same plain text with all attributes rebuilt from
/// scratch: first every standard attribute verbatim in captured order, then
/// for each link run the pairs of the applicable map (the highlighted map
/// when the run equals `highlighted`, the normal map otherwise), one
/// key/value pair at a time in map order.
///
/// Strip-then-reapply makes the operation idempotent: composing twice with
/// unchanged inputs yields identical output, and changing only the highlight
/// or only a map yields a correctly updated result without diffing the
/// previous output.
///
/// The ranges in `standard` and `links` must have been captured from this
/// same `text` (as [`StyledText::decompose`] produces them).
pub fn compose(
    text: &str,
    standard: &[StyleAttribute],
    links: &[LinkRun],
    link_attributes: &AttributeMap,
    highlighted_attributes: &AttributeMap,
    highlighted: Option<&LinkRun>,
) -> StyledText {
    let mut output = StyledText::new(text);

    for attribute in standard {
        output.push_run_unchecked(&attribute.key, &attribute.value, attribute.range.clone());
    }

    for link in links {
        let map = if Some(link) == highlighted {
            highlighted_attributes
        } else {
            link_attributes
        };
        for (key, value) in map.iter() {
            output.push_run_unchecked(key, value, link.range.clone());
        }
    }

    tracing::trace!(
        target: targets::STYLED_TEXT,
        runs = output.attribute_count(),
        highlighted = highlighted.is_some(),
        "composed display text"
    );

    output
}
