use crate::suggestion::{validate, Suggestion, SuggestionError};

/// Shown in place of highlights when the service found nothing to fix.
pub const NO_ERRORS_MESSAGE: &str = "No spelling errors found.";

/// An HTML buffer whose only text-insertion operation escapes, so escaping
/// happens exactly once no matter how the markup is assembled. Markup
/// itself comes only from the fixed literals inside these methods.
#[derive(Debug, Default)]
pub struct Html {
    buf: String,
}

impl Html {
    pub fn new() -> Self {
        Self { buf: String::new() }
    }

    /// Appends text, escaping `&`, `<`, `>`, `"` and `'`. Newlines become
    /// `<br>` after escaping, so injected markup can never double-escape.
    pub fn text(&mut self, text: &str) -> &mut Self {
        for ch in text.chars() {
            match ch {
                '&' => self.buf.push_str("&amp;"),
                '<' => self.buf.push_str("&lt;"),
                '>' => self.buf.push_str("&gt;"),
                '"' => self.buf.push_str("&quot;"),
                '\'' => self.buf.push_str("&#039;"),
                '\n' => self.buf.push_str("<br>"),
                _ => self.buf.push(ch),
            }
        }
        self
    }

    /// Appends a highlighted replacement span.
    pub fn highlight(&mut self, text: &str) -> &mut Self {
        self.buf.push_str("<mark class=\"speller-highlight\">");
        self.text(text);
        self.buf.push_str("</mark>");
        self
    }

    /// Appends the "nothing to fix" notice.
    pub fn clean_notice(&mut self, message: &str) -> &mut Self {
        self.buf.push_str("<div class=\"speller-clean\">");
        self.text(message);
        self.buf.push_str("</div>");
        self
    }

    pub fn into_string(self) -> String {
        self.buf
    }
}

/// Renders the checked text with each suggested range replaced by its top
/// candidate, wrapped in a highlight element. The suggestion list is
/// validated first; an unordered or overlapping list is a hard error and
/// the caller should fall back to showing the plain text.
pub fn render_result(text: &str, suggestions: &[Suggestion]) -> Result<String, SuggestionError> {
    validate(text, suggestions)?;

    let mut html = Html::new();

    if suggestions.is_empty() {
        html.clean_notice(NO_ERRORS_MESSAGE);
        return Ok(html.into_string());
    }

    let len = text.chars().count();
    let mut offset = 0;
    for suggestion in suggestions {
        html.text(char_slice(text, offset, suggestion.start));
        html.highlight(&suggestion.candidates[0]);
        offset = suggestion.end;
    }
    html.text(char_slice(text, offset, len));

    Ok(html.into_string())
}

/// Slices by character offsets. Suggestion offsets are character indices,
/// so byte slicing would split multi-byte text.
fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let byte_at = |n: usize| {
        text.char_indices()
            .nth(n)
            .map(|(i, _)| i)
            .unwrap_or(text.len())
    };
    &text[byte_at(start)..byte_at(end)]
}
