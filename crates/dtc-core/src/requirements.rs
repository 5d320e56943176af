//! Resolution of the criteria that apply to one person in one position.

use dtc_model::{
    GENERAL_CATEGORY, RequirementIndex, RequirementRow, RequirementSource, SALES_CATEGORY,
};
use dtc_normalization::is_present;

/// Standardized inputs of a requirement lookup.
#[derive(Debug, Clone, Copy)]
pub struct RequirementQuery<'a> {
    /// Standardized position compared against each row's job post.
    pub position: &'a str,
    /// Standardized vehicle categories the dealer is authorized for.
    /// The general category is always implied.
    pub categories: &'a [String],
}

impl RequirementQuery<'_> {
    fn allows_category(&self, category: &str) -> bool {
        category == GENERAL_CATEGORY || self.categories.iter().any(|allowed| allowed == category)
    }
}

/// Collects the criteria of both sources for `query`.
///
/// `after_sales` and `sales` are the requirement rows of the person's company;
/// `None` means the company has no table for that source. Rows with a blank
/// criterion or course are skipped. Course order follows row order.
pub fn build_requirement_index(
    query: RequirementQuery<'_>,
    after_sales: Option<&[RequirementRow]>,
    sales: Option<&[RequirementRow]>,
) -> RequirementIndex {
    let mut index = RequirementIndex::new();
    for row in after_sales.unwrap_or_default() {
        if !row_applies(row, query.position) {
            continue;
        }
        let category = row.vehicle_or_general();
        if query.allows_category(category) {
            index.push(
                RequirementSource::AfterSales,
                category,
                row.criterion.trim(),
                row.course.trim(),
            );
        }
    }
    for row in sales.unwrap_or_default() {
        if row_applies(row, query.position) {
            index.push(
                RequirementSource::Sales,
                SALES_CATEGORY,
                row.criterion.trim(),
                row.course.trim(),
            );
        }
    }
    index
}

fn row_applies(row: &RequirementRow, position: &str) -> bool {
    is_present(&row.criterion) && is_present(&row.course) && row.job_post.trim() == position
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtc_model::RequirementKey;

    fn after_rows() -> Vec<RequirementRow> {
        vec![
            RequirementRow::new("مکانیک", None, "ایمنی", "دوره۱"),
            RequirementRow::new("مکانیک", Some("پژو"), "موتور", "دوره۲"),
            RequirementRow::new("مکانیک", Some("دنا"), "موتور", "دوره۳"),
            RequirementRow::new("مکانیک", None, "ایمنی", "دوره۴"),
            RequirementRow::new("پذیرش", None, "ارتباط", "دوره۵"),
            RequirementRow::new("مکانیک", None, "", "دوره۶"),
            RequirementRow::new("مکانیک", None, "کیفیت", "nan"),
        ]
    }

    #[test]
    fn filters_by_position_and_category() {
        let categories = vec!["پژو".to_string()];
        let query = RequirementQuery {
            position: "مکانیک",
            categories: &categories,
        };
        let rows = after_rows();
        let index = build_requirement_index(query, Some(&rows), None);

        let general = RequirementKey::new(RequirementSource::AfterSales, GENERAL_CATEGORY, "ایمنی");
        assert_eq!(
            index.courses(&general),
            Some(&["دوره۱".to_string(), "دوره۴".to_string()][..])
        );
        let peugeot = RequirementKey::new(RequirementSource::AfterSales, "پژو", "موتور");
        assert!(index.courses(&peugeot).is_some());
        assert!(index.group(RequirementSource::AfterSales, "دنا").is_none());
        assert_eq!(index.criteria_count(RequirementSource::AfterSales), 2);
        assert_eq!(index.criteria_count(RequirementSource::Sales), 0);
    }

    #[test]
    fn sales_rows_use_fixed_category() {
        let sales = vec![
            RequirementRow::new("مشاور فروش", None, "فن بیان", "دوره۷"),
            RequirementRow::new("مشاور فروش", Some("پژو"), "مذاکره", "دوره۸"),
        ];
        let query = RequirementQuery {
            position: "مشاور فروش",
            categories: &[],
        };
        let index = build_requirement_index(query, None, Some(&sales));
        let group = index
            .group(RequirementSource::Sales, SALES_CATEGORY)
            .expect("sales group");
        assert_eq!(group.len(), 2);
    }

    #[test]
    fn building_twice_is_deterministic() {
        let categories = vec!["پژو".to_string(), "دنا".to_string()];
        let query = RequirementQuery {
            position: "مکانیک",
            categories: &categories,
        };
        let rows = after_rows();
        let first = build_requirement_index(query, Some(&rows), Some(&rows));
        let second = build_requirement_index(query, Some(&rows), Some(&rows));
        assert_eq!(first, second);
        let entries: Vec<_> = first
            .entries()
            .map(|(key, courses)| (key, courses.to_vec()))
            .collect();
        let again: Vec<_> = second
            .entries()
            .map(|(key, courses)| (key, courses.to_vec()))
            .collect();
        assert_eq!(entries, again);
    }
}
