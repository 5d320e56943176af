//! Criterion pass evaluation driven by an ordered marker rule table.
//!
//! Evaluation runs in two phases per (source, category) group. Phase one
//! decides every criterion from course matches and exemption rules. Phase two
//! overrides criteria carrying a dependency marker with the conjunction of
//! their siblings' phase-one results. Phase two never reads its own output, so
//! several dependent criteria in one group do not see each other's overrides.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use dtc_model::{
    CategoryGroup, CriterionStatus, PassBasis, PassStatusMap, RequirementIndex, RequirementKey,
};

/// What a matching marker does to a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleEffect {
    /// The criterion always passes.
    Exempt,
    /// The criterion passes iff every other criterion of its group passed.
    RequireSiblings,
}

/// A marker substring and the effect it triggers on criterion names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionRule {
    pub marker: String,
    pub effect: RuleEffect,
}

impl CriterionRule {
    pub fn new(marker: impl Into<String>, effect: RuleEffect) -> Self {
        Self {
            marker: marker.into(),
            effect,
        }
    }

    pub fn matches(&self, criterion: &str) -> bool {
        !self.marker.is_empty() && criterion.contains(self.marker.as_str())
    }
}

/// Ordered rules; the first matching rule of a given effect wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable {
    rules: Vec<CriterionRule>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new(vec![
            CriterionRule::new("گازسوز", RuleEffect::Exempt),
            CriterionRule::new("ابزار مخصوص", RuleEffect::RequireSiblings),
        ])
    }
}

impl RuleTable {
    pub fn new(rules: Vec<CriterionRule>) -> Self {
        Self { rules }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CriterionRule> {
        self.rules.iter()
    }

    pub fn first_match(&self, criterion: &str, effect: RuleEffect) -> Option<&CriterionRule> {
        self.rules
            .iter()
            .find(|rule| rule.effect == effect && rule.matches(criterion))
    }
}

/// Computes the pass status of every criterion in `index`.
///
/// `passed_courses` must hold standardized course titles.
pub fn evaluate_pass_status(
    index: &RequirementIndex,
    passed_courses: &BTreeSet<String>,
    rules: &RuleTable,
) -> PassStatusMap {
    let mut statuses = PassStatusMap::new();
    for (source, category, group) in index.groups() {
        for (criterion, status) in evaluate_group(group, passed_courses, rules) {
            statuses.insert(RequirementKey::new(source, category, criterion), status);
        }
    }
    statuses
}

fn evaluate_group(
    group: &CategoryGroup,
    passed_courses: &BTreeSet<String>,
    rules: &RuleTable,
) -> BTreeMap<String, CriterionStatus> {
    let base: BTreeMap<&str, CriterionStatus> = group
        .criteria()
        .map(|(criterion, courses)| {
            let status = base_status(criterion, courses, passed_courses, rules);
            (criterion, status)
        })
        .collect();

    base.iter()
        .map(|(&criterion, status)| {
            let status = match rules.first_match(criterion, RuleEffect::RequireSiblings) {
                Some(rule) => {
                    let siblings_passed = base
                        .iter()
                        .filter(|(other, _)| **other != criterion)
                        .all(|(_, other)| other.passed);
                    CriterionStatus {
                        passed: siblings_passed,
                        basis: PassBasis::Dependent {
                            marker: rule.marker.clone(),
                        },
                    }
                }
                None => status.clone(),
            };
            (criterion.to_string(), status)
        })
        .collect()
}

fn base_status(
    criterion: &str,
    courses: &[String],
    passed_courses: &BTreeSet<String>,
    rules: &RuleTable,
) -> CriterionStatus {
    if let Some(rule) = rules.first_match(criterion, RuleEffect::Exempt) {
        return CriterionStatus {
            passed: true,
            basis: PassBasis::Exempt {
                marker: rule.marker.clone(),
            },
        };
    }
    match courses.iter().find(|course| passed_courses.contains(*course)) {
        Some(course) => CriterionStatus {
            passed: true,
            basis: PassBasis::MatchedCourse(course.clone()),
        },
        None => CriterionStatus {
            passed: false,
            basis: PassBasis::NoMatch,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtc_model::{GENERAL_CATEGORY, PassReason, RequirementSource};

    fn index(criteria: &[(&str, &str)]) -> RequirementIndex {
        let mut index = RequirementIndex::new();
        for (criterion, course) in criteria {
            index.push(RequirementSource::AfterSales, GENERAL_CATEGORY, *criterion, *course);
        }
        index
    }

    fn key(criterion: &str) -> RequirementKey {
        RequirementKey::new(RequirementSource::AfterSales, GENERAL_CATEGORY, criterion)
    }

    fn passed(courses: &[&str]) -> BTreeSet<String> {
        courses.iter().map(|course| course.to_string()).collect()
    }

    #[test]
    fn direct_match_records_course() {
        let index = index(&[("ایمنی", "دوره۱"), ("ایمنی", "دوره۲")]);
        let statuses = evaluate_pass_status(&index, &passed(&["دوره۲"]), &RuleTable::default());
        let status = statuses.get(&key("ایمنی")).expect("status");
        assert!(status.passed);
        assert_eq!(status.reason(), PassReason::MatchedCourse("دوره۲".to_string()));
    }

    #[test]
    fn exemption_passes_without_courses() {
        let index = index(&[("خودروهای گازسوز", "دوره۱")]);
        let statuses = evaluate_pass_status(&index, &BTreeSet::new(), &RuleTable::default());
        assert!(statuses.is_passed(&key("خودروهای گازسوز")));
        assert_eq!(
            statuses.get(&key("خودروهای گازسوز")).map(CriterionStatus::reason),
            Some(PassReason::Exempt)
        );
    }

    #[test]
    fn exemption_outranks_matched_course() {
        let index = index(&[("خودروهای گازسوز", "دورهگاز")]);
        let statuses =
            evaluate_pass_status(&index, &passed(&["دورهگاز"]), &RuleTable::default());
        let status = statuses.get(&key("خودروهای گازسوز")).expect("status");
        assert!(status.passed);
        assert_eq!(status.reason(), PassReason::Exempt);
    }

    #[test]
    fn sibling_rule_overrides_exemption() {
        let criterion = "ابزار مخصوص گازسوز";
        let index = index(&[("a", "c1"), (criterion, "c2")]);
        let rules = RuleTable::default();

        let failed = evaluate_pass_status(&index, &BTreeSet::new(), &rules);
        assert!(!failed.is_passed(&key(criterion)));
        assert_eq!(
            failed.get(&key(criterion)).map(CriterionStatus::reason),
            Some(PassReason::ConditionNotMet)
        );

        let met = evaluate_pass_status(&index, &passed(&["c1"]), &rules);
        assert!(met.is_passed(&key(criterion)));
        assert_eq!(
            met.get(&key(criterion)).map(CriterionStatus::reason),
            Some(PassReason::Conditional)
        );
    }

    #[test]
    fn special_tool_follows_siblings() {
        let index = index(&[("a", "c1"), ("b", "c2"), ("ابزار مخصوص", "c3")]);
        let rules = RuleTable::default();

        let all = evaluate_pass_status(&index, &passed(&["c1", "c2"]), &rules);
        assert!(all.is_passed(&key("ابزار مخصوص")));

        let partial = evaluate_pass_status(&index, &passed(&["c1", "c3"]), &rules);
        assert!(!partial.is_passed(&key("ابزار مخصوص")));
        assert_eq!(
            partial.get(&key("ابزار مخصوص")).map(CriterionStatus::reason),
            Some(PassReason::ConditionNotMet)
        );
    }

    #[test]
    fn special_tool_alone_passes() {
        let index = index(&[("ابزار مخصوص", "c3")]);
        let statuses = evaluate_pass_status(&index, &BTreeSet::new(), &RuleTable::default());
        assert!(statuses.is_passed(&key("ابزار مخصوص")));
    }

    #[test]
    fn dependent_criteria_read_phase_one_only() {
        // Each special-tool criterion sees the other's phase-one failure.
        let index = index(&[("a", "c1"), ("ابزار مخصوص ۱", "x"), ("ابزار مخصوص ۲", "y")]);
        let statuses = evaluate_pass_status(&index, &passed(&["c1"]), &RuleTable::default());
        assert!(!statuses.is_passed(&key("ابزار مخصوص ۱")));
        assert!(!statuses.is_passed(&key("ابزار مخصوص ۲")));
    }

    #[test]
    fn groups_are_evaluated_independently() {
        let mut index = index(&[("ابزار مخصوص", "x")]);
        index.push(RequirementSource::AfterSales, "پژو", "a", "c1");
        let statuses = evaluate_pass_status(&index, &BTreeSet::new(), &RuleTable::default());
        assert!(statuses.is_passed(&key("ابزار مخصوص")));
        assert!(!statuses.is_passed(&RequirementKey::new(
            RequirementSource::AfterSales,
            "پژو",
            "a"
        )));
    }

    #[test]
    fn empty_marker_never_matches() {
        let rules = RuleTable::new(vec![CriterionRule::new("", RuleEffect::Exempt)]);
        assert!(rules.first_match("anything", RuleEffect::Exempt).is_none());
    }
}
