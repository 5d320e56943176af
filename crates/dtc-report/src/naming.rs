//! Sheet and file names derived from dealer names.

/// Spreadsheet tabs hold at most this many characters of the sheet name.
pub const SHEET_NAME_MAX_CHARS: usize = 30;

const NAME_SEPARATOR: &str = " - ";

/// Sheet name of a dealer: the text after the last ` - ` when present,
/// otherwise the whole name, truncated to [`SHEET_NAME_MAX_CHARS`].
pub fn sheet_name(dealer_name: &str) -> String {
    let name = dealer_name
        .rsplit_once(NAME_SEPARATOR)
        .map_or(dealer_name, |(_, tail)| tail)
        .trim();
    let name = if name.is_empty() { dealer_name.trim() } else { name };
    name.chars().take(SHEET_NAME_MAX_CHARS).collect()
}

/// File name of a dealer's export, with path-hostile characters replaced.
pub fn export_file_name(dealer_name: &str) -> String {
    let stem: String = sheet_name(dealer_name)
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            ch if ch.is_control() => '_',
            ch => ch,
        })
        .collect();
    let stem = stem.trim();
    if stem.is_empty() {
        "dealer.csv".to_string()
    } else {
        format!("{stem}.csv")
    }
}
