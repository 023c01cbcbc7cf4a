use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A correction candidate for a sub-range of the checked text.
///
/// `start` and `end` are character offsets into the original text;
/// `candidates[0]` is the preferred replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub start: usize,
    pub end: usize,
    pub candidates: Vec<String>,
}

/// Response body of the spelling service.
#[derive(Debug, Deserialize)]
pub struct CheckResponse {
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("suggestion {index} has start {start} past its end {end}")]
    InvertedRange {
        index: usize,
        start: usize,
        end: usize,
    },

    #[error("suggestion {index} ends at {end} but the text has {len} characters")]
    OutOfBounds { index: usize, end: usize, len: usize },

    #[error("suggestion {index} starts at {start}, not after the previous start {previous_start}")]
    OutOfOrder {
        index: usize,
        start: usize,
        previous_start: usize,
    },

    #[error("suggestion {index} starts at {start}, inside the previous range ending at {previous_end}")]
    Overlapping {
        index: usize,
        start: usize,
        previous_end: usize,
    },

    #[error("suggestion {index} has no candidates")]
    NoCandidates { index: usize },
}

/// Checks that a suggestion list can be rendered in one left-to-right pass:
/// strictly increasing starts, no overlaps, ranges within the text, and at
/// least one candidate each. A list violating any of these is rejected
/// whole; no repair is attempted.
pub fn validate(text: &str, suggestions: &[Suggestion]) -> Result<(), SuggestionError> {
    let len = text.chars().count();
    let mut previous: Option<&Suggestion> = None;

    for (index, suggestion) in suggestions.iter().enumerate() {
        if suggestion.start > suggestion.end {
            return Err(SuggestionError::InvertedRange {
                index,
                start: suggestion.start,
                end: suggestion.end,
            });
        }
        if suggestion.end > len {
            return Err(SuggestionError::OutOfBounds {
                index,
                end: suggestion.end,
                len,
            });
        }
        if suggestion.candidates.is_empty() {
            return Err(SuggestionError::NoCandidates { index });
        }
        if let Some(prev) = previous {
            if suggestion.start <= prev.start {
                return Err(SuggestionError::OutOfOrder {
                    index,
                    start: suggestion.start,
                    previous_start: prev.start,
                });
            }
            if suggestion.start < prev.end {
                return Err(SuggestionError::Overlapping {
                    index,
                    start: suggestion.start,
                    previous_end: prev.end,
                });
            }
        }
        previous = Some(suggestion);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(start: usize, end: usize, candidate: &str) -> Suggestion {
        Suggestion {
            start,
            end,
            candidates: vec![candidate.to_string()],
        }
    }

    #[test]
    fn empty_list_is_valid() {
        assert!(validate("teh cat", &[]).is_ok());
    }

    #[test]
    fn ordered_disjoint_list_is_valid() {
        let list = [suggestion(0, 3, "the"), suggestion(4, 7, "cap")];
        assert!(validate("teh cat", &list).is_ok());
    }

    #[test]
    fn adjacent_ranges_are_valid() {
        let list = [suggestion(0, 3, "the"), suggestion(3, 4, " ")];
        assert!(validate("teh cat", &list).is_ok());
    }

    #[test]
    fn overlapping_ranges_are_rejected() {
        let list = [suggestion(0, 5, "aaaaa"), suggestion(3, 8, "bbbbb")];
        let err = validate("teh cat x", &list).unwrap_err();
        assert!(matches!(err, SuggestionError::Overlapping { index: 1, .. }));
    }

    #[test]
    fn unordered_starts_are_rejected() {
        let list = [suggestion(4, 7, "cap"), suggestion(0, 3, "the")];
        let err = validate("teh cat", &list).unwrap_err();
        assert!(matches!(err, SuggestionError::OutOfOrder { index: 1, .. }));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let list = [suggestion(3, 1, "x")];
        let err = validate("teh cat", &list).unwrap_err();
        assert!(matches!(err, SuggestionError::InvertedRange { index: 0, .. }));
    }

    #[test]
    fn range_past_the_text_is_rejected() {
        let list = [suggestion(0, 8, "x")];
        let err = validate("teh cat", &list).unwrap_err();
        assert!(matches!(
            err,
            SuggestionError::OutOfBounds {
                index: 0,
                end: 8,
                len: 7
            }
        ));
    }

    #[test]
    fn bounds_use_character_count_not_bytes() {
        // "café" is 4 characters, 5 bytes.
        let list = [suggestion(0, 4, "cafe")];
        assert!(validate("café", &list).is_ok());
    }

    #[test]
    fn candidateless_suggestion_is_rejected() {
        let list = [Suggestion {
            start: 0,
            end: 3,
            candidates: vec![],
        }];
        let err = validate("teh cat", &list).unwrap_err();
        assert!(matches!(err, SuggestionError::NoCandidates { index: 0 }));
    }

    #[test]
    fn response_decodes_from_service_json() {
        let raw = r#"{"suggestions":[{"start":0,"end":3,"candidates":["the","then"]}]}"#;
        let response: CheckResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.suggestions.len(), 1);
        assert_eq!(response.suggestions[0].candidates[0], "the");
    }
}
