use std::num::ParseIntError;

use thiserror::Error;

/// Integer identity of a subject.
pub type Label = u32;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelParseError {
    #[error("directory name {name:?} has no digits after its {prefix_len}-character prefix")]
    MissingDigits { name: String, prefix_len: usize },
    #[error("directory name {name:?} has a digit inside its {prefix_len}-character prefix")]
    DigitInPrefix { name: String, prefix_len: usize },
    #[error("directory name {name:?} has non-digit characters after its prefix")]
    NotDigits { name: String },
    #[error("directory name {name:?} is not valid UTF-8")]
    NotUnicode { name: String },
    #[error("label in directory name {name:?} is out of range: {source}")]
    OutOfRange {
        name: String,
        #[source]
        source: ParseIntError,
    },
}

/// Parses the label out of a subject directory name such as `s41`.
///
/// The first `prefix_len` characters must be non-digits and everything after
/// them must be ASCII digits.
pub fn parse_label(name: &str, prefix_len: usize) -> Result<Label, LabelParseError> {
    let Some((split, _)) = name.char_indices().nth(prefix_len) else {
        return Err(LabelParseError::MissingDigits {
            name: name.to_string(),
            prefix_len,
        });
    };
    let (prefix, digits) = name.split_at(split);

    if prefix.chars().any(|c| c.is_ascii_digit()) {
        return Err(LabelParseError::DigitInPrefix {
            name: name.to_string(),
            prefix_len,
        });
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LabelParseError::NotDigits {
            name: name.to_string(),
        });
    }

    digits
        .parse::<Label>()
        .map_err(|source| LabelParseError::OutOfRange {
            name: name.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::reference("s41", 1, 41)]
    #[case::zero("s0", 1, 0)]
    #[case::leading_zeros("s007", 1, 7)]
    #[case::longer_prefix("subj12", 4, 12)]
    #[case::no_prefix("5", 0, 5)]
    fn test_valid_names(#[case] name: &str, #[case] prefix_len: usize, #[case] expected: Label) {
        assert_eq!(parse_label(name, prefix_len), Ok(expected));
    }

    #[test]
    fn test_word_prefix_rejected() {
        let err = parse_label("face1", 1).unwrap_err();
        assert_eq!(
            err,
            LabelParseError::NotDigits {
                name: "face1".to_string()
            }
        );
    }

    #[rstest]
    #[case::prefix_only("s")]
    #[case::empty("")]
    #[case::single_digit("1")]
    fn test_missing_digits(#[case] name: &str) {
        assert!(matches!(
            parse_label(name, 1),
            Err(LabelParseError::MissingDigits { .. })
        ));
    }

    #[test]
    fn test_digit_prefix_rejected() {
        assert!(matches!(
            parse_label("11", 1),
            Err(LabelParseError::DigitInPrefix { .. })
        ));
    }

    #[rstest]
    #[case::sign("s+1")]
    #[case::negative("s-1")]
    #[case::suffix("s4a")]
    #[case::space("s 4")]
    fn test_non_digit_remainder_rejected(#[case] name: &str) {
        assert!(matches!(
            parse_label(name, 1),
            Err(LabelParseError::NotDigits { .. })
        ));
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(matches!(
            parse_label("s99999999999", 1),
            Err(LabelParseError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_multibyte_prefix_counts_characters() {
        assert_eq!(parse_label("é3", 1), Ok(3));
    }
}
