//! Pixel positioning of a character range inside a form field.
//!
//! Mirrors the field's text layout instead of asking the field itself: the
//! value is laid out run by run with the same content width, padding and
//! scroll offsets the field uses, and the requested range's bounding box is
//! read back from that mirror layout.

/// Pixel rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Measures text the way the field's font renders it.
pub trait TextMeasurer {
    /// Advance width of one character in pixels.
    fn char_width(&self, ch: char) -> f32;
    /// Height of one rendered line in pixels.
    fn line_height(&self) -> f32;
}

/// Fixed-advance measurer (a monospace font at a known size).
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasurer {
    pub advance: f32,
    pub line_height: f32,
}

impl TextMeasurer for MonospaceMeasurer {
    fn char_width(&self, _ch: char) -> f32 {
        self.advance
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}

/// Whether the field wraps: an `<input>` never wraps, a `<textarea>` wraps
/// at its content width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    SingleLine,
    MultiLine,
}

/// The mirror-relevant geometry of a form field. Caret placement drifts
/// from the real cursor unless these match the field exactly.
#[derive(Debug, Clone, Copy)]
pub struct FieldGeometry {
    pub kind: FieldKind,
    /// Viewport position of the field's border box.
    pub origin_x: f32,
    pub origin_y: f32,
    /// Width available to text; wrapping happens against this.
    pub content_width: f32,
    pub padding_left: f32,
    pub padding_top: f32,
    pub scroll_left: f32,
    pub scroll_top: f32,
}

/// Measured in place of an empty range so a bare caret still has width.
const CARET_PLACEHOLDER: char = '.';

/// Stands in for spaces in single-line fields, where a styled mirror would
/// otherwise collapse whitespace runs.
const SINGLE_LINE_SPACE: char = '\u{00A0}';

#[derive(Debug, Clone, Copy)]
struct CharPos {
    line: usize,
    x: f32,
    width: f32,
}

pub struct CaretLocator<M> {
    measurer: M,
}

impl<M: TextMeasurer> CaretLocator<M> {
    pub fn new(measurer: M) -> Self {
        Self { measurer }
    }

    /// Computes the viewport bounding box of `value[start..end)` (character
    /// offsets) as rendered inside `field`. An empty range is a caret and
    /// is measured as a one-character placeholder, so the returned width is
    /// always non-zero for it.
    pub fn locate(&self, field: &FieldGeometry, value: &str, start: usize, end: usize) -> Rect {
        let swap_spaces = field.kind == FieldKind::SingleLine;
        let chars: Vec<char> = value
            .chars()
            .map(|ch| {
                if swap_spaces && ch == ' ' {
                    SINGLE_LINE_SPACE
                } else {
                    ch
                }
            })
            .collect();

        let (positions, end_pos) = self.layout(field, &chars);
        let len = chars.len();
        let start = start.min(len);
        let end = end.clamp(start, len);
        let line_height = self.measurer.line_height();

        let (first_line, last_line, min_x, max_x) = if start == end {
            let pos = if start == len {
                end_pos
            } else {
                positions[start]
            };
            let width = self.measurer.char_width(CARET_PLACEHOLDER);
            (pos.line, pos.line, pos.x, pos.x + width)
        } else {
            let mut min_x = f32::MAX;
            let mut max_x = f32::MIN;
            for pos in &positions[start..end] {
                min_x = min_x.min(pos.x);
                max_x = max_x.max(pos.x + pos.width);
            }
            (positions[start].line, positions[end - 1].line, min_x, max_x)
        };

        Rect {
            x: field.origin_x + field.padding_left + min_x - field.scroll_left,
            y: field.origin_y + field.padding_top + first_line as f32 * line_height
                - field.scroll_top,
            width: max_x - min_x,
            height: (last_line - first_line + 1) as f32 * line_height,
        }
    }

    /// Lays out every character as (line, x, width). Multi-line fields wrap
    /// greedily at the content width, breaking at whitespace where possible
    /// and mid-word otherwise; hard newlines always break. The second value
    /// is the position just past the last character.
    fn layout(&self, field: &FieldGeometry, chars: &[char]) -> (Vec<CharPos>, CharPos) {
        let wrap = field.kind == FieldKind::MultiLine;
        let mut positions = Vec::with_capacity(chars.len());
        let mut line = 0usize;
        let mut x = 0.0f32;
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i];
            if ch == '\n' {
                positions.push(CharPos {
                    line,
                    x,
                    width: 0.0,
                });
                line += 1;
                x = 0.0;
                i += 1;
                continue;
            }
            if ch.is_whitespace() {
                // Trailing whitespace hangs past the content width rather
                // than wrapping, as in the real field.
                let width = self.measurer.char_width(ch);
                positions.push(CharPos { line, x, width });
                x += width;
                i += 1;
                continue;
            }

            let mut word_end = i;
            let mut word_width = 0.0;
            while word_end < chars.len() && !chars[word_end].is_whitespace() {
                word_width += self.measurer.char_width(chars[word_end]);
                word_end += 1;
            }
            if wrap && x > 0.0 && x + word_width > field.content_width {
                line += 1;
                x = 0.0;
            }
            for &ch in &chars[i..word_end] {
                let width = self.measurer.char_width(ch);
                if wrap && x > 0.0 && x + width > field.content_width {
                    line += 1;
                    x = 0.0;
                }
                positions.push(CharPos { line, x, width });
                x += width;
            }
            i = word_end;
        }

        (
            positions,
            CharPos {
                line,
                x,
                width: 0.0,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADVANCE: f32 = 8.0;
    const LINE_HEIGHT: f32 = 16.0;

    fn locator() -> CaretLocator<MonospaceMeasurer> {
        CaretLocator::new(MonospaceMeasurer {
            advance: ADVANCE,
            line_height: LINE_HEIGHT,
        })
    }

    fn input() -> FieldGeometry {
        FieldGeometry {
            kind: FieldKind::SingleLine,
            origin_x: 100.0,
            origin_y: 50.0,
            content_width: 160.0,
            padding_left: 4.0,
            padding_top: 2.0,
            scroll_left: 0.0,
            scroll_top: 0.0,
        }
    }

    fn textarea(content_width: f32) -> FieldGeometry {
        FieldGeometry {
            kind: FieldKind::MultiLine,
            content_width,
            ..input()
        }
    }

    #[test]
    fn caret_range_has_nonzero_width() {
        let rect = locator().locate(&input(), "teh cat", 3, 3);
        assert!(rect.width > 0.0);
        assert_eq!(rect.x, 100.0 + 4.0 + 3.0 * ADVANCE);
        assert_eq!(rect.height, LINE_HEIGHT);
    }

    #[test]
    fn caret_in_empty_value_has_nonzero_width() {
        let rect = locator().locate(&input(), "", 0, 0);
        assert!(rect.width > 0.0);
        assert_eq!(rect.x, 104.0);
        assert_eq!(rect.y, 52.0);
    }

    #[test]
    fn caret_at_end_of_value_sits_past_the_last_character() {
        let rect = locator().locate(&input(), "teh", 3, 3);
        assert_eq!(rect.x, 104.0 + 3.0 * ADVANCE);
    }

    #[test]
    fn single_line_range_box_matches_character_extent() {
        let rect = locator().locate(&input(), "teh cat", 4, 7);
        assert_eq!(rect.x, 104.0 + 4.0 * ADVANCE);
        assert_eq!(rect.width, 3.0 * ADVANCE);
        assert_eq!(rect.height, LINE_HEIGHT);
    }

    #[test]
    fn single_line_spaces_keep_their_width() {
        let rect = locator().locate(&input(), "a  b", 0, 4);
        assert_eq!(rect.width, 4.0 * ADVANCE);
    }

    #[test]
    fn wrapped_word_lands_on_the_next_line() {
        // 40px of content fits exactly "hello"; "world" wraps.
        let rect = locator().locate(&textarea(40.0), "hello world", 6, 11);
        assert_eq!(rect.y, 52.0 + LINE_HEIGHT);
        assert_eq!(rect.x, 104.0);
        assert_eq!(rect.width, 5.0 * ADVANCE);
    }

    #[test]
    fn hard_newline_breaks_the_line() {
        let rect = locator().locate(&textarea(160.0), "ab\ncd", 3, 5);
        assert_eq!(rect.y, 52.0 + LINE_HEIGHT);
        assert_eq!(rect.x, 104.0);
        assert_eq!(rect.width, 2.0 * ADVANCE);
    }

    #[test]
    fn range_spanning_a_wrap_unions_both_lines() {
        // Chars 4..8 cover the end of "hello", the hanging space, and the
        // start of the wrapped "world".
        let rect = locator().locate(&textarea(40.0), "hello world", 4, 8);
        assert_eq!(rect.y, 52.0);
        assert_eq!(rect.height, 2.0 * LINE_HEIGHT);
        assert_eq!(rect.x, 104.0);
        assert_eq!(rect.width, 6.0 * ADVANCE);
    }

    #[test]
    fn long_word_breaks_mid_word() {
        let rect = locator().locate(&textarea(40.0), "abcdefgh", 5, 8);
        assert_eq!(rect.y, 52.0 + LINE_HEIGHT);
        assert_eq!(rect.x, 104.0);
    }

    #[test]
    fn scroll_offsets_shift_the_box() {
        let mut field = textarea(160.0);
        field.scroll_top = 10.0;
        field.scroll_left = 6.0;
        let rect = locator().locate(&field, "teh", 0, 3);
        assert_eq!(rect.y, 52.0 - 10.0);
        assert_eq!(rect.x, 104.0 - 6.0);
    }

    #[test]
    fn out_of_range_offsets_are_clamped() {
        let rect = locator().locate(&input(), "teh", 10, 20);
        assert!(rect.width > 0.0);
        assert_eq!(rect.x, 104.0 + 3.0 * ADVANCE);
    }
}
