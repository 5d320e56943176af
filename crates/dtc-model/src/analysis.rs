//! Analysis outputs: pass statuses, per-person results, summaries and export rows.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::requirement::{RequirementIndex, RequirementKey, RequirementSource};

/// Which rule decided a criterion's outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PassBasis {
    /// One of the acceptable courses is in the passed set.
    MatchedCourse(String),
    /// The criterion name carries an exemption marker.
    Exempt { marker: String },
    /// The criterion depends on its siblings in the same group.
    Dependent { marker: String },
    /// No course matched and no rule applied.
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionStatus {
    pub passed: bool,
    pub basis: PassBasis,
}

impl CriterionStatus {
    pub fn reason(&self) -> PassReason {
        match (&self.basis, self.passed) {
            (PassBasis::MatchedCourse(course), true) => PassReason::MatchedCourse(course.clone()),
            (PassBasis::Exempt { .. }, true) => PassReason::Exempt,
            (PassBasis::Dependent { .. }, true) => PassReason::Conditional,
            (PassBasis::Dependent { .. }, false) => PassReason::ConditionNotMet,
            (_, true) => PassReason::Completed,
            (_, false) => PassReason::NotPassed,
        }
    }
}

/// Pass/fail outcome of every criterion of a requirement index.
///
/// Serialized as a list of `{ key, status }` entries since the composite key
/// cannot be a JSON object key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<StatusEntry>", from = "Vec<StatusEntry>")]
pub struct PassStatusMap {
    statuses: BTreeMap<RequirementKey, CriterionStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StatusEntry {
    key: RequirementKey,
    status: CriterionStatus,
}

impl From<PassStatusMap> for Vec<StatusEntry> {
    fn from(map: PassStatusMap) -> Self {
        map.statuses
            .into_iter()
            .map(|(key, status)| StatusEntry { key, status })
            .collect()
    }
}

impl From<Vec<StatusEntry>> for PassStatusMap {
    fn from(entries: Vec<StatusEntry>) -> Self {
        Self {
            statuses: entries
                .into_iter()
                .map(|entry| (entry.key, entry.status))
                .collect(),
        }
    }
}

impl PassStatusMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: RequirementKey, status: CriterionStatus) {
        self.statuses.insert(key, status);
    }

    pub fn get(&self, key: &RequirementKey) -> Option<&CriterionStatus> {
        self.statuses.get(key)
    }

    /// Whether a criterion passed; absent criteria count as not passed.
    pub fn is_passed(&self, key: &RequirementKey) -> bool {
        self.statuses.get(key).is_some_and(|status| status.passed)
    }

    pub fn passed_count(&self, source: RequirementSource) -> usize {
        self.statuses
            .iter()
            .filter(|(key, status)| key.source == source && status.passed)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RequirementKey, &CriterionStatus)> {
        self.statuses.iter()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

/// Training analysis of one person in one position at one dealer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub personnel_code: String,
    pub name: String,
    pub position: String,
    pub dealer_name: String,
    /// Passed course titles after course mapping.
    pub passed_courses: BTreeSet<String>,
    pub requirements: RequirementIndex,
    pub statuses: PassStatusMap,
}

impl AnalysisResult {
    pub fn progress(&self, source: RequirementSource) -> Progress {
        let total = self.requirements.criteria_count(source);
        if total == 0 {
            return Progress::NotApplicable;
        }
        Progress::Ratio {
            passed: self.statuses.passed_count(source),
            total,
        }
    }
}

/// Completion of one requirement source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Progress {
    /// No criteria apply; rendered as `-`.
    NotApplicable,
    Ratio { passed: usize, total: usize },
}

impl Progress {
    pub fn percentage(self) -> Option<f64> {
        match self {
            Self::NotApplicable => None,
            Self::Ratio { total: 0, .. } => None,
            Self::Ratio { passed, total } => Some(100.0 * passed as f64 / total as f64),
        }
    }

    /// Whether the value is worth listing: criteria apply and some are passed.
    pub fn is_meaningful(self) -> bool {
        self.percentage().is_some_and(|value| value > 0.0)
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percentage() {
            Some(value) => write!(f, "{value:.1}%"),
            None => f.write_str("-"),
        }
    }
}

impl From<Progress> for String {
    fn from(progress: Progress) -> Self {
        progress.to_string()
    }
}

/// Dealer-level progress of one person-position pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    pub personnel_code: String,
    pub name: String,
    pub position: String,
    pub after_sales: Progress,
    pub sales: Progress,
}

impl SummaryRow {
    pub fn progress(&self, source: RequirementSource) -> Progress {
        match source {
            RequirementSource::AfterSales => self.after_sales,
            RequirementSource::Sales => self.sales,
        }
    }
}

/// One person-position line of a dealer roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub dealer_code: String,
    pub name: String,
    pub position: String,
    pub personnel_code: String,
    /// False when the position has no entry in the position mapping.
    pub selectable: bool,
}

/// Human-readable explanation attached to an export row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum PassReason {
    Exempt,
    Conditional,
    MatchedCourse(String),
    Completed,
    NotPassed,
    ConditionNotMet,
}

impl PassReason {
    pub fn label(&self) -> &str {
        match self {
            Self::Exempt => "گازسوز (معاف)",
            Self::Conditional => "ابزار مخصوص (شرطی)",
            Self::MatchedCourse(course) => course,
            Self::Completed => "تکمیل شده",
            Self::NotPassed => "گذرانده نشده",
            Self::ConditionNotMet => "ابزار مخصوص (سایر معیارها تکمیل نشده)",
        }
    }
}

impl fmt::Display for PassReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One (person, position, criterion) line of a dealer export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub dealer: String,
    pub name: String,
    pub position: String,
    pub criterion: String,
    pub source: RequirementSource,
    pub category: String,
    pub passed: bool,
    pub reason: PassReason,
}

impl ExportRow {
    pub fn pass_label(&self) -> &'static str {
        if self.passed { "بله" } else { "خیر" }
    }
}
