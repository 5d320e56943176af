use serde::{Deserialize, Serialize};

/// Number of leading characters of a dealer name that form its dealer code.
pub const DEALER_CODE_LEN: usize = 4;

/// Returns the dealer code embedded at the start of a dealer name.
///
/// Counts characters rather than bytes, so names shorter than the code length
/// are returned whole.
pub fn dealer_code(dealer_name: &str) -> &str {
    match dealer_name.char_indices().nth(DEALER_CODE_LEN) {
        Some((idx, _)) => &dealer_name[..idx],
        None => dealer_name,
    }
}

/// Authorized vehicle categories of one dealer, derived from the category-flag table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerProfile {
    pub dealer_code: String,
    pub dealer_name: Option<String>,
    /// Category labels in flag-column order.
    pub authorized_categories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dealer_code_counts_characters() {
        assert_eq!(dealer_code("1234 - نمایندگی"), "1234");
        assert_eq!(dealer_code("تهران مرکزی"), "تهرا");
        assert_eq!(dealer_code("ab"), "ab");
        assert_eq!(dealer_code(""), "");
    }
}
