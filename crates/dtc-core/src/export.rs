//! Flattening of dealer analyses into one row per criterion.

use dtc_model::{AnalysisResult, ExportRow, PassReason};

use crate::analyzer::TrainingAnalyzer;

impl TrainingAnalyzer<'_> {
    /// Export rows for every mapped (person, position) at a dealer.
    pub fn dealer_export_rows(&self, dealer_name: &str) -> Vec<ExportRow> {
        self.mapped_positions(dealer_name)
            .into_iter()
            .filter_map(|pair| self.analyze(pair.personnel_code, dealer_name, pair.position))
            .flat_map(|result| export_rows(&result))
            .collect()
    }
}

/// One row per criterion of `result`, in requirement key order.
pub fn export_rows(result: &AnalysisResult) -> Vec<ExportRow> {
    result
        .requirements
        .entries()
        .map(|(key, _)| {
            let (passed, reason) = match result.statuses.get(&key) {
                Some(status) => (status.passed, status.reason()),
                None => (false, PassReason::NotPassed),
            };
            ExportRow {
                dealer: result.dealer_name.clone(),
                name: result.name.clone(),
                position: result.position.clone(),
                criterion: key.criterion,
                source: key.source,
                category: key.category,
                passed,
                reason,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::rules::{RuleTable, evaluate_pass_status};
    use dtc_model::{RequirementIndex, RequirementSource, SALES_CATEGORY};

    #[test]
    fn one_row_per_criterion_across_sources() {
        let mut requirements = RequirementIndex::new();
        requirements.push(RequirementSource::AfterSales, "عمومی", "ایمنی", "c1");
        requirements.push(RequirementSource::AfterSales, "عمومی", "ایمنی", "c2");
        requirements.push(RequirementSource::AfterSales, "پژو", "گازسوز", "c3");
        requirements.push(RequirementSource::Sales, SALES_CATEGORY, "فن بیان", "c4");
        let passed: BTreeSet<String> = ["c2".to_string()].into();
        let statuses = evaluate_pass_status(&requirements, &passed, &RuleTable::default());
        let result = AnalysisResult {
            personnel_code: "1".to_string(),
            name: "علی".to_string(),
            position: "مکانیک".to_string(),
            dealer_name: "1234 نمایندگی".to_string(),
            passed_courses: passed,
            requirements,
            statuses,
        };

        let rows = export_rows(&result);
        assert_eq!(rows.len(), 3);
        let reasons: Vec<_> = rows.iter().map(|row| row.reason.clone()).collect();
        assert_eq!(
            reasons,
            vec![
                PassReason::MatchedCourse("c2".to_string()),
                PassReason::Exempt,
                PassReason::NotPassed,
            ]
        );
        assert_eq!(rows[2].source, RequirementSource::Sales);
        assert_eq!(rows[0].pass_label(), "بله");
        assert_eq!(rows[2].pass_label(), "خیر");
    }
}
