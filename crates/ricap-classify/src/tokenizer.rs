//! Statement splitting.
//!
//! The delimiter set is fixed and brittle: it does not cover every
//! punctuation pattern found in real notes. Callers must not rely on it for
//! sentence segmentation beyond what is listed in [`DELIMITERS`].

/// Separators between statements, tried in this order at each position.
pub const DELIMITERS: [&str; 4] = [", ", "; ", ". ", "  "];

/// Single-pass iterator over the statements of a text.
///
/// Empty statements are yielded as-is (e.g. between two adjacent delimiters).
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    rest: Option<&'a str>,
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.rest?;
        match find_delimiter(rest) {
            Some((start, len)) => {
                self.rest = Some(&rest[start + len..]);
                Some(&rest[..start])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

/// Splits `text` on [`DELIMITERS`].
pub fn tokenize(text: &str) -> Tokenizer<'_> {
    Tokenizer { rest: Some(text) }
}

/// Lower-cases a field and splits it into owned statements.
///
/// An absent field yields no statements.
pub fn lowered_statements(field: Option<&str>) -> Vec<String> {
    let Some(text) = field else {
        return Vec::new();
    };
    let lowered = text.to_lowercase();
    tokenize(&lowered).map(str::to_string).collect()
}

// Delimiters are ASCII, so byte offsets always land on char boundaries.
fn find_delimiter(text: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    (0..bytes.len()).find_map(|idx| {
        DELIMITERS
            .iter()
            .find(|delimiter| bytes[idx..].starts_with(delimiter.as_bytes()))
            .map(|delimiter| (idx, delimiter.len()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> Vec<&str> {
        tokenize(text).collect()
    }

    #[test]
    fn splits_on_every_delimiter() {
        assert_eq!(
            split("adhd, anxiety; odd. depression  asd"),
            vec!["adhd", "anxiety", "odd", "depression", "asd"]
        );
    }

    #[test]
    fn keeps_text_without_delimiters_whole() {
        assert_eq!(split("major depressive disorder"), vec!["major depressive disorder"]);
        assert_eq!(split("a,b;c.d"), vec!["a,b;c.d"]);
    }

    #[test]
    fn yields_empty_statements_between_adjacent_delimiters() {
        assert_eq!(split("mood, , anxiety. "), vec!["mood", "", "anxiety", ""]);
        assert_eq!(split(""), vec![""]);
    }

    #[test]
    fn three_spaces_leave_a_leading_space() {
        assert_eq!(split("mood   anxiety"), vec!["mood", " anxiety"]);
    }

    #[test]
    fn handles_multibyte_text() {
        assert_eq!(split("naïve, café"), vec!["naïve", "café"]);
    }

    #[test]
    fn absent_field_has_no_statements() {
        assert!(lowered_statements(None).is_empty());
        assert_eq!(
            lowered_statements(Some("R/O Mood. ADHD")),
            vec!["r/o mood".to_string(), "adhd".to_string()]
        );
    }
}
