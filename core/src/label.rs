//! Label, literal and URI syntax.
//!
//! Labels are single-line, non-blank and bounded in length. Literal labels
//! are only bounded, but must be parseable as their datatype.

use std::sync::OnceLock;

use regex_lite::Regex;

use crate::vocab::datatypes;

/// Upper bound on label and literal lengths, in characters.
pub const MAX_LABEL_LENGTH: usize = 8164;

fn single_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\n\r\x00]*$").expect("valid label pattern"))
}

fn integer() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?[0-9]+$").expect("valid integer pattern"))
}

fn decimal() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)$").expect("valid decimal pattern")
    })
}

fn float() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?|[+-]?INF|NaN)$")
            .expect("valid float pattern")
    })
}

fn boolean() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(true|false|1|0)$").expect("valid boolean pattern"))
}

fn absolute_uri() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:[^\s]+$").expect("valid uri pattern")
    })
}

/// Check the generic label syntax: non-blank, single line, no NUL, bounded.
pub fn is_valid_label(label: &str, max_length: usize) -> bool {
    !label.trim().is_empty()
        && label.chars().count() <= max_length
        && single_line().is_match(label)
}

/// Check that a literal label fits the length bound. Literals may be blank.
pub fn is_valid_literal_label(label: &str, max_length: usize) -> bool {
    label.chars().count() <= max_length
}

/// Check that a literal label is a lexical form of its datatype.
///
/// Unknown datatypes accept any label.
pub fn matches_datatype(label: &str, datatype: &str) -> bool {
    match datatype {
        datatypes::XSD_INTEGER => integer().is_match(label),
        datatypes::XSD_DECIMAL => decimal().is_match(label),
        datatypes::XSD_FLOAT => float().is_match(label),
        datatypes::XSD_BOOLEAN => boolean().is_match(label),
        _ => true,
    }
}

/// Check that a URI carries a scheme.
pub fn is_absolute_uri(uri: &str) -> bool {
    absolute_uri().is_match(uri)
}
