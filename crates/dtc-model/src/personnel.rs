use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Position shown for a person whose record carries no job title at all.
pub const NO_POSITION_PLACEHOLDER: &str = "بدون سمت";

/// One personnel row of the unified roster.
///
/// Several records may share a `personnel_code`: the roster carries one row per
/// passed course, and dual-dealer splitting may duplicate a row across companies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonnelRecord {
    pub personnel_code: String,
    pub full_name: String,
    pub dealer_name: String,
    pub company: String,
    /// Main job title; may hold several joiner-delimited segments.
    pub main_position: String,
    pub alternate_positions: Vec<String>,
    pub passed_courses: BTreeSet<String>,
    /// Columns the analysis does not interpret, keyed by header.
    pub extra: BTreeMap<String, String>,
}

impl PersonnelRecord {
    pub fn new(
        personnel_code: impl Into<String>,
        full_name: impl Into<String>,
        dealer_name: impl Into<String>,
        company: impl Into<String>,
    ) -> Self {
        Self {
            personnel_code: personnel_code.into(),
            full_name: full_name.into(),
            dealer_name: dealer_name.into(),
            company: company.into(),
            main_position: String::new(),
            alternate_positions: Vec::new(),
            passed_courses: BTreeSet::new(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_main_position(mut self, position: impl Into<String>) -> Self {
        self.main_position = position.into();
        self
    }

    pub fn with_alternate_positions<I, S>(mut self, positions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alternate_positions = positions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_passed_course(mut self, course: impl Into<String>) -> Self {
        self.passed_courses.insert(course.into());
        self
    }

    /// Every position the person holds: the main title first, then alternates.
    ///
    /// Blank entries are skipped; duplicates are kept in first-seen order once.
    pub fn positions(&self) -> Vec<&str> {
        let mut positions: Vec<&str> = Vec::new();
        let main = self.main_position.trim();
        if !main.is_empty() {
            positions.push(main);
        }
        for alternate in &self.alternate_positions {
            let alternate = alternate.trim();
            if !alternate.is_empty() && !positions.contains(&alternate) {
                positions.push(alternate);
            }
        }
        positions
    }

    /// Main and alternate position text joined for keyword inspection.
    pub fn combined_position_text(&self) -> String {
        let mut text = self.main_position.clone();
        for alternate in &self.alternate_positions {
            text.push(' ');
            text.push_str(alternate);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_skip_blanks_and_duplicates() {
        let record = PersonnelRecord::new("1", "a", "d", "c")
            .with_main_position(" مکانیک ")
            .with_alternate_positions(["", "مکانیک", "پذیرش"]);
        assert_eq!(record.positions(), vec!["مکانیک", "پذیرش"]);
    }

    #[test]
    fn positions_empty_without_titles() {
        let record = PersonnelRecord::new("1", "a", "d", "c");
        assert!(record.positions().is_empty());
    }
}
