//! Text normalization rules.

/// Canonical separator between values of a multi-value cell.
pub const JOINER: &str = "&&&";

/// List delimiter of the source spreadsheets.
const LIST_DELIMITER: &str = ", ";

/// Placeholder that survives character stripping while the joiner is protected.
/// Lowercase ASCII so neither the strip nor the lowercasing step touches it.
const JOINER_PLACEHOLDER: &str = "zqxjoinerzqx";

/// Phrases whose inner comma is part of the value rather than a list delimiter.
const PROTECTED_PHRASES: &[(&str, &str)] = &[
    ("pds , ", "pds و "),
    ("ISO 10002 , ISO 10004", "ISO 10002 و ISO 10004"),
];

/// Visually similar code points folded to the Persian form.
const CHARACTER_FOLDS: &[(char, char)] = &[
    ('ي', 'ی'),
    ('ى', 'ی'),
    ('ك', 'ک'),
    ('\u{200c}', ' '),
    ('\u{200d}', ' '),
];

const ARABIC_COMMA: char = '،';

/// How internal whitespace is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalizeMode {
    /// Keep single spaces between words.
    #[default]
    Text,
    /// Drop every whitespace character; used for course-title columns whose
    /// spacing is inconsistent between sources.
    CourseTitle,
}

impl NormalizeMode {
    pub fn from_remove_spaces(remove_internal_spaces: bool) -> Self {
        if remove_internal_spaces {
            Self::CourseTitle
        } else {
            Self::Text
        }
    }
}

/// Normalizes a possibly missing cell; missing values become the empty string.
pub fn normalize_opt(raw: Option<&str>, mode: NormalizeMode) -> String {
    raw.map(|text| normalize(text, mode)).unwrap_or_default()
}

/// Canonicalizes one cell value.
///
/// Idempotent: normalizing an already normalized value returns it unchanged.
pub fn normalize(raw: &str, mode: NormalizeMode) -> String {
    let mut text = raw.to_string();
    for (phrase, replacement) in PROTECTED_PHRASES {
        if text.contains(phrase) {
            text = text.replace(phrase, replacement);
        }
    }
    text = text.replace(LIST_DELIMITER, JOINER);
    if mode == NormalizeMode::CourseTitle {
        // Zero-width joiners fold to spaces below, so they go here as well.
        text.retain(|ch| !ch.is_whitespace() && !is_zero_width(ch));
    }
    let mut text: String = text.chars().map(fold_character).collect();
    text = text.replace(JOINER, JOINER_PLACEHOLDER);
    text.retain(|ch| ch != ARABIC_COMMA && is_kept_character(ch));
    text.make_ascii_lowercase();
    let text = text.replace(JOINER_PLACEHOLDER, JOINER);
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn fold_character(ch: char) -> char {
    CHARACTER_FOLDS
        .iter()
        .find(|(from, _)| *from == ch)
        .map_or(ch, |(_, to)| *to)
}

fn is_zero_width(ch: char) -> bool {
    matches!(ch, '\u{200c}' | '\u{200d}')
}

fn is_kept_character(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch.is_whitespace() || ('\u{0600}'..='\u{06FF}').contains(&ch)
}

/// True when a normalized cell carries a value.
///
/// Spreadsheet exports render missing numbers as `nan`; those count as absent.
pub fn is_present(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("nan")
}

/// Splits a multi-value cell on the joiner, trimming and skipping blank segments.
pub fn split_values(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(JOINER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
}

/// Joins segments back into a multi-value cell.
pub fn join_values<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments.into_iter().collect::<Vec<_>>().join(JOINER)
}
