//! Dealer-level progress rollups.

use serde::Serialize;

use dtc_model::{RequirementSource, SummaryRow};

use crate::analyzer::TrainingAnalyzer;

impl TrainingAnalyzer<'_> {
    /// Progress per source for every mapped (person, position) at a dealer,
    /// sorted by name then position.
    pub fn dealer_summary(&self, dealer_name: &str) -> Vec<SummaryRow> {
        let mut rows: Vec<SummaryRow> = self
            .mapped_positions(dealer_name)
            .into_iter()
            .filter_map(|pair| {
                let result = self.analyze(pair.personnel_code, dealer_name, pair.position)?;
                Some(SummaryRow {
                    personnel_code: result.personnel_code.clone(),
                    name: result.name.clone(),
                    position: result.position.clone(),
                    after_sales: result.progress(RequirementSource::AfterSales),
                    sales: result.progress(RequirementSource::Sales),
                })
            })
            .collect();
        rows.sort_by(|a, b| (&a.name, &a.position).cmp(&(&b.name, &b.position)));
        rows
    }

    pub fn dealer_overview(&self, dealer_name: &str) -> DealerOverview {
        DealerOverview::from_rows(dealer_name, &self.dealer_summary(dealer_name))
    }
}

/// Rows of one source with meaningful progress and their mean percentage.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverviewTable {
    pub rows: Vec<SummaryRow>,
    /// Mean percentage of `rows`; zero when there are none.
    pub average: f64,
}

impl OverviewTable {
    fn collect(rows: &[SummaryRow], source: RequirementSource) -> Self {
        let rows: Vec<SummaryRow> = rows
            .iter()
            .filter(|row| row.progress(source).is_meaningful())
            .cloned()
            .collect();
        let percentages: Vec<f64> = rows
            .iter()
            .filter_map(|row| row.progress(source).percentage())
            .collect();
        let average = if percentages.is_empty() {
            0.0
        } else {
            percentages.iter().sum::<f64>() / percentages.len() as f64
        };
        Self { rows, average }
    }
}

/// Summary rows split into a sales table and an after-sales table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealerOverview {
    pub dealer_name: String,
    pub sales: OverviewTable,
    pub after_sales: OverviewTable,
}

impl DealerOverview {
    pub fn from_rows(dealer_name: &str, rows: &[SummaryRow]) -> Self {
        Self {
            dealer_name: dealer_name.to_string(),
            sales: OverviewTable::collect(rows, RequirementSource::Sales),
            after_sales: OverviewTable::collect(rows, RequirementSource::AfterSales),
        }
    }

    pub fn table(&self, source: RequirementSource) -> &OverviewTable {
        match source {
            RequirementSource::AfterSales => &self.after_sales,
            RequirementSource::Sales => &self.sales,
        }
    }
}
