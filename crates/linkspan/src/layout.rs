//! A production layout oracle backed by `cosmic-text`.
//!
//! [`CosmicOracle`] reproduces a host surface's plain-text layout well
//! enough to hit-test it: it shapes the text into a `cosmic_text::Buffer`
//! configured from the [`TextContainer`], reports the used bounding box of
//! the layout runs, and maps box-local points to byte indices through the
//! glyph clusters.
//!
//! The most recent shaping is cached per (text, container) pair, so
//! pointer-move-frequency queries against an unchanged label reuse one
//! `Buffer`.

use std::fmt;

use cosmic_text::{Attrs, Buffer, FontSystem, Metrics, Shaping, Wrap};

use crate::geometry::{Point, Rect};
use crate::hit_test::{LineBreakMode, TextContainer, TextLayoutOracle};

/// Default font size in points, matching common label defaults.
const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Default line height multiplier.
const DEFAULT_LINE_HEIGHT_FACTOR: f32 = 1.2;

fn wrap_for(mode: LineBreakMode) -> Wrap {
    match mode {
        LineBreakMode::Clip | LineBreakMode::TruncateTail => Wrap::None,
        LineBreakMode::WordWrap => Wrap::Word,
        LineBreakMode::CharWrap => Wrap::Glyph,
    }
}

/// Byte offsets at which each buffer line starts.
///
/// `cosmic-text` splits its buffer lines on `'\n'`; glyph cluster offsets
/// are relative to their line's text.
fn line_start_offsets(text: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (index, byte) in text.bytes().enumerate() {
        if byte == b'\n' {
            starts.push(index + 1);
        }
    }
    starts
}

/// The last shaping performed, keyed by its inputs.
struct CachedShape {
    text: String,
    container: TextContainer,
    buffer: Buffer,
}

/// A [`TextLayoutOracle`] that shapes text with `cosmic-text`.
pub struct CosmicOracle {
    font_system: FontSystem,
    font_size: f32,
    line_height: f32,
    cache: Option<CachedShape>,
}

impl CosmicOracle {
    /// Create an oracle with system fonts and default metrics.
    pub fn new() -> Self {
        Self::with_metrics(
            DEFAULT_FONT_SIZE,
            DEFAULT_FONT_SIZE * DEFAULT_LINE_HEIGHT_FACTOR,
        )
    }

    /// Create an oracle with explicit font size and line height, which must
    /// match the host surface's metrics for hit-tests to line up.
    pub fn with_metrics(font_size: f32, line_height: f32) -> Self {
        Self {
            font_system: FontSystem::new(),
            font_size,
            line_height,
            cache: None,
        }
    }

    /// The font size used for shaping.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// The line height used for shaping.
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    fn shape(&mut self, text: &str, container: &TextContainer) -> Buffer {
        let metrics = Metrics::new(self.font_size, self.line_height);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);

        buffer.set_wrap(&mut self.font_system, wrap_for(container.line_break));

        let width = (container.size.width > 0.0).then_some(container.size.width);
        let height_limit = container
            .max_lines
            .map(|lines| lines as f32 * self.line_height);
        let height = match (container.size.height > 0.0, height_limit) {
            (true, Some(limit)) => Some(container.size.height.min(limit)),
            (true, None) => Some(container.size.height),
            (false, limit) => limit,
        };
        buffer.set_size(&mut self.font_system, width, height);

        buffer.set_text(&mut self.font_system, text, Attrs::new(), Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);

        buffer
    }

    fn shaped(&mut self, text: &str, container: &TextContainer) -> &Buffer {
        let stale = !matches!(
            &self.cache,
            Some(cached) if cached.text == text && cached.container == *container
        );
        if stale {
            let buffer = self.shape(text, container);
            self.cache = Some(CachedShape {
                text: text.to_string(),
                container: *container,
                buffer,
            });
        }
        &self.cache.as_ref().expect("cache populated above").buffer
    }
}

impl Default for CosmicOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CosmicOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CosmicOracle")
            .field("font_size", &self.font_size)
            .field("line_height", &self.line_height)
            .field("cached", &self.cache.is_some())
            .finish()
    }
}

impl TextLayoutOracle for CosmicOracle {
    fn used_rect(&mut self, text: &str, container: &TextContainer) -> Rect {
        if text.is_empty() {
            return Rect::ZERO;
        }

        let buffer = self.shaped(text, container);
        let mut width: f32 = 0.0;
        let mut height: f32 = 0.0;
        for run in buffer.layout_runs() {
            width = width.max(run.line_w);
            height = height.max(run.line_top + run.line_height);
        }

        Rect::new(0.0, 0.0, width, height)
    }

    fn byte_index_at_local(
        &mut self,
        local: Point,
        text: &str,
        container: &TextContainer,
    ) -> usize {
        let line_starts = line_start_offsets(text);
        let buffer = self.shaped(text, container);

        let mut nearest = 0;
        for run in buffer.layout_runs() {
            let line_base = line_starts.get(run.line_i).copied().unwrap_or(0);

            if local.y < run.line_top || local.y >= run.line_top + run.line_height {
                // Remember the last run above the point as the vertical
                // fallback.
                if local.y >= run.line_top
                    && let Some(last) = run.glyphs.last()
                {
                    nearest = line_base + last.start;
                }
                continue;
            }

            for glyph in run.glyphs.iter() {
                if local.x >= glyph.x && local.x < glyph.x + glyph.w {
                    return line_base + glyph.start;
                }
            }

            // On the line but between/past glyphs: clamp to the nearest end.
            if let Some(first) = run.glyphs.first()
                && local.x < first.x
            {
                return line_base + first.start;
            }
            return run
                .glyphs
                .last()
                .map(|glyph| line_base + glyph.start)
                .unwrap_or(line_base);
        }

        nearest
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::Size;
    use crate::hit_test::character_index_at;

    use super::*;

    #[test]
    fn test_wrap_mapping() {
        assert!(matches!(wrap_for(LineBreakMode::Clip), Wrap::None));
        assert!(matches!(wrap_for(LineBreakMode::TruncateTail), Wrap::None));
        assert!(matches!(wrap_for(LineBreakMode::WordWrap), Wrap::Word));
        assert!(matches!(wrap_for(LineBreakMode::CharWrap), Wrap::Glyph));
    }

    #[test]
    fn test_line_start_offsets() {
        assert_eq!(line_start_offsets("abc"), vec![0]);
        assert_eq!(line_start_offsets("ab\ncd\ne"), vec![0, 3, 6]);
        assert_eq!(line_start_offsets(""), vec![0]);
    }

    #[test]
    fn test_empty_text_has_empty_used_rect_and_never_hits() {
        let mut oracle = CosmicOracle::new();
        let container = TextContainer::new(Size::new(100.0, 40.0));

        assert_eq!(oracle.used_rect("", &container), Rect::ZERO);
        assert_eq!(
            character_index_at(&mut oracle, Point::new(50.0, 20.0), "", &container),
            None
        );
    }
}
