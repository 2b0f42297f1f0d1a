//! Point-to-character hit-testing over an external layout collaborator.
//!
//! The label does not lay text out itself. It describes the host surface's
//! text container ([`TextContainer`]) and consumes a [`TextLayoutOracle`],
//! which computes the laid-out bounding box and maps box-local points to
//! byte indices. [`character_index_at`] is the pure adapter gluing the two:
//! it anchors the bounding box at the center of the container, translates
//! the query point into box-local space, and refuses points outside the box
//! rather than extrapolating onto padding.

use linkspan_core::logging::targets;

use crate::geometry::{Point, Rect, Size};

/// How the host surface breaks lines that exceed the container width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineBreakMode {
    /// No wrapping; overflowing text is clipped.
    Clip,
    /// Wrap at word boundaries.
    #[default]
    WordWrap,
    /// Wrap at any character.
    CharWrap,
    /// No wrapping; overflowing text is truncated with an ellipsis.
    TruncateTail,
}

/// Description of the host surface's text container.
///
/// Carries everything the layout oracle needs to reproduce the surface's
/// layout: the available size, the line-break mode, and the maximum visible
/// line count (`None` = unlimited).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextContainer {
    /// The available size text is laid out within.
    pub size: Size,
    /// The line-break mode.
    pub line_break: LineBreakMode,
    /// Maximum number of rendered lines, or `None` for no limit.
    pub max_lines: Option<usize>,
}

impl TextContainer {
    /// Create a container of the given size with word wrapping and no line
    /// limit.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            line_break: LineBreakMode::default(),
            max_lines: None,
        }
    }

    /// Set the line-break mode.
    pub fn with_line_break(mut self, line_break: LineBreakMode) -> Self {
        self.line_break = line_break;
        self
    }

    /// Limit the number of rendered lines.
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = Some(max_lines);
        self
    }
}

impl Default for TextContainer {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

/// The external text layout collaborator.
///
/// Implementations reproduce the host surface's layout for a given text and
/// container. Queries may arrive at pointer-move frequency; implementations
/// are expected to cache their shaping (see [`crate::layout::CosmicOracle`]).
pub trait TextLayoutOracle {
    /// The bounding box actually used by the laid-out text within the
    /// container, in the container's coordinate space before centering.
    ///
    /// An empty rect means nothing is rendered (empty text, zero-sized
    /// container).
    fn used_rect(&mut self, text: &str, container: &TextContainer) -> Rect;

    /// The byte index of the character nearest `local`, a point in the used
    /// rect's coordinate space.
    ///
    /// Character semantics, not insertion-point semantics: a point over a
    /// glyph reports that glyph's cluster start. Only called for points the
    /// used rect contains.
    fn byte_index_at_local(
        &mut self,
        local: Point,
        text: &str,
        container: &TextContainer,
    ) -> usize;
}

/// Map a point in the container's coordinate space to a byte index.
///
/// The used bounding box is assumed center-anchored within the container in
/// both axes (the host surface centers its text block). Returns `None` when
/// the translated point falls outside the box, so points over padding or
/// whitespace margins never resolve to a character.
///
/// Pure over its inputs; safe to call on every pointer move.
pub fn character_index_at<O: TextLayoutOracle + ?Sized>(
    oracle: &mut O,
    point: Point,
    text: &str,
    container: &TextContainer,
) -> Option<usize> {
    if text.is_empty() {
        return None;
    }

    let bounds = oracle.used_rect(text, container);
    if bounds.size.is_empty() {
        return None;
    }

    // Offset of the centered bounding box within the container.
    let offset = Point::new(
        (container.size.width - bounds.size.width) * 0.5 - bounds.origin.x,
        (container.size.height - bounds.size.height) * 0.5 - bounds.origin.y,
    );
    let local = Point::new(point.x - offset.x, point.y - offset.y);

    if !bounds.contains(local) {
        tracing::trace!(
            target: targets::HIT_TEST,
            ?point,
            ?bounds,
            "point outside rendered text"
        );
        return None;
    }

    let index = oracle.byte_index_at_local(local, text, container);
    tracing::trace!(target: targets::HIT_TEST, ?point, index, "hit");
    Some(index)
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Test doubles for the layout collaborator.

    use super::*;

    /// A monospace-grid oracle: every char is `advance` wide, lines are
    /// `line_height` tall, text lays out as a single line.
    pub(crate) struct FixedGridOracle {
        pub advance: f32,
        pub line_height: f32,
    }

    impl FixedGridOracle {
        pub fn new(advance: f32, line_height: f32) -> Self {
            Self {
                advance,
                line_height,
            }
        }
    }

    impl TextLayoutOracle for FixedGridOracle {
        fn used_rect(&mut self, text: &str, _container: &TextContainer) -> Rect {
            if text.is_empty() {
                return Rect::ZERO;
            }
            let columns = text.chars().count() as f32;
            Rect::new(0.0, 0.0, columns * self.advance, self.line_height)
        }

        fn byte_index_at_local(
            &mut self,
            local: Point,
            text: &str,
            _container: &TextContainer,
        ) -> usize {
            let column = (local.x / self.advance).floor().max(0.0) as usize;
            text.char_indices()
                .nth(column)
                .map(|(index, _)| index)
                .unwrap_or_else(|| {
                    text.char_indices().next_back().map(|(index, _)| index).unwrap_or(0)
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::FixedGridOracle;
    use super::*;

    fn container(width: f32, height: f32) -> TextContainer {
        TextContainer::new(Size::new(width, height))
    }

    #[test]
    fn test_index_inside_snug_container() {
        // "Hello" is 5 columns of 10px in a container of exactly that size,
        // so no centering offset applies.
        let mut oracle = FixedGridOracle::new(10.0, 20.0);
        let container = container(50.0, 20.0);

        assert_eq!(
            character_index_at(&mut oracle, Point::new(5.0, 10.0), "Hello", &container),
            Some(0)
        );
        assert_eq!(
            character_index_at(&mut oracle, Point::new(25.0, 10.0), "Hello", &container),
            Some(2)
        );
        assert_eq!(
            character_index_at(&mut oracle, Point::new(49.0, 10.0), "Hello", &container),
            Some(4)
        );
    }

    #[test]
    fn test_centering_offset_is_applied() {
        // 50px of text centered in a 200x100 container occupies
        // x in [75, 125), y in [40, 60).
        let mut oracle = FixedGridOracle::new(10.0, 20.0);
        let container = container(200.0, 100.0);

        assert_eq!(
            character_index_at(&mut oracle, Point::new(76.0, 50.0), "Hello", &container),
            Some(0)
        );
        assert_eq!(
            character_index_at(&mut oracle, Point::new(124.0, 50.0), "Hello", &container),
            Some(4)
        );
    }

    #[test]
    fn test_points_outside_bounding_box_miss() {
        let mut oracle = FixedGridOracle::new(10.0, 20.0);
        let container = container(200.0, 100.0);

        // Inside the container, outside the centered 50x20 box.
        for point in [
            Point::new(10.0, 50.0),
            Point::new(190.0, 50.0),
            Point::new(100.0, 10.0),
            Point::new(100.0, 90.0),
            Point::new(125.0, 60.0),
        ] {
            assert_eq!(
                character_index_at(&mut oracle, point, "Hello", &container),
                None,
                "expected miss at {point:?}"
            );
        }
    }

    #[test]
    fn test_empty_text_never_hits() {
        let mut oracle = FixedGridOracle::new(10.0, 20.0);
        let container = container(200.0, 100.0);

        assert_eq!(
            character_index_at(&mut oracle, Point::new(100.0, 50.0), "", &container),
            None
        );
    }

    #[test]
    fn test_multibyte_text_reports_char_boundaries() {
        // "héllo": columns map to byte offsets 0, 1, 3, 4, 5.
        let mut oracle = FixedGridOracle::new(10.0, 20.0);
        let container = container(50.0, 20.0);

        assert_eq!(
            character_index_at(&mut oracle, Point::new(15.0, 10.0), "héllo", &container),
            Some(1)
        );
        assert_eq!(
            character_index_at(&mut oracle, Point::new(25.0, 10.0), "héllo", &container),
            Some(3)
        );
    }
}
