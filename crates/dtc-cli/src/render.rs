//! Terminal tables for command output.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dtc_core::{DealerOverview, MappingVocabulary, OverviewTable};
use dtc_model::{AnalysisResult, Progress, RequirementKey, RequirementSource, RosterEntry};

/// Progress at or above this percentage renders green.
pub const GOOD_PROGRESS: f64 = 80.0;
/// Progress at or above this percentage renders yellow; below it, red.
pub const FAIR_PROGRESS: f64 = 50.0;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_detail_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

/// Colour band of a percentage.
pub fn progress_color(percentage: f64) -> Color {
    if percentage >= GOOD_PROGRESS {
        Color::Green
    } else if percentage >= FAIR_PROGRESS {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Dealer list: name, code and authorized categories.
pub fn dealers_table<'a, I>(dealers: I) -> Table
where
    I: IntoIterator<Item = (&'a str, &'a str, &'a [String])>,
{
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dealer"),
        header_cell("Code"),
        header_cell("Categories"),
    ]);
    apply_table_style(&mut table);
    for (name, code, categories) in dealers {
        let categories = if categories.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(categories.join(", "))
        };
        table.add_row(vec![Cell::new(name), Cell::new(code), categories]);
    }
    table
}

/// Roster entries; positions without a mapping are dimmed.
pub fn roster_table(entries: &[RosterEntry]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Name"),
        header_cell("Position"),
        header_cell("Dealer"),
    ]);
    apply_table_style(&mut table);
    for entry in entries {
        let cells = [
            entry.personnel_code.as_str(),
            entry.name.as_str(),
            entry.position.as_str(),
            entry.dealer_code.as_str(),
        ];
        let row: Vec<Cell> = if entry.selectable {
            cells.into_iter().map(Cell::new).collect()
        } else {
            cells.into_iter().map(dim_cell).collect()
        };
        table.add_row(row);
    }
    table
}

/// One table per source, each followed by its average row.
pub fn overview_tables(overview: &DealerOverview) -> Vec<(RequirementSource, Table)> {
    [RequirementSource::Sales, RequirementSource::AfterSales]
        .into_iter()
        .map(|source| (source, overview_table(overview.table(source), source)))
        .collect()
}

fn overview_table(section: &OverviewTable, source: RequirementSource) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Position"),
        header_cell(source.label()),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for row in &section.rows {
        table.add_row(vec![
            Cell::new(&row.name),
            Cell::new(&row.position),
            progress_cell(row.progress(source)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Average")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell(format!("{} people", section.rows.len())),
        Cell::new(format!("{:.1}%", section.average))
            .fg(progress_color(section.average))
            .add_attribute(Attribute::Bold),
    ]);
    table
}

fn progress_cell(progress: Progress) -> Cell {
    match progress.percentage() {
        Some(value) => Cell::new(progress.to_string()).fg(progress_color(value)),
        None => dim_cell(progress),
    }
}

/// Criteria of one analysis, sorted by source, category and criterion.
///
/// Courses the person passed are highlighted.
pub fn analysis_table(result: &AnalysisResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Category"),
        header_cell("Criterion"),
        header_cell("Passed"),
        header_cell("Courses"),
    ]);
    apply_detail_table_style(&mut table);
    if let Some(column) = table.column_mut(3) {
        column.set_cell_alignment(CellAlignment::Center);
    }
    for (key, courses) in result.requirements.entries() {
        let passed = result.statuses.is_passed(&key);
        let RequirementKey {
            source,
            category,
            criterion,
        } = key;
        let mark = if passed {
            Cell::new("✓").fg(Color::Green)
        } else {
            Cell::new("✗").fg(Color::Red)
        };
        table.add_row(vec![
            Cell::new(source.label()),
            Cell::new(category),
            Cell::new(criterion),
            mark,
            Cell::new(course_list(courses, result)),
        ]);
    }
    table
}

/// Header line and progress summary of one analysis.
pub fn analysis_heading(result: &AnalysisResult) -> String {
    format!(
        "{} ({}) - {} - {}\n{}: {}  {}: {}",
        result.name,
        result.personnel_code,
        result.position,
        result.dealer_name,
        RequirementSource::AfterSales.label(),
        result.progress(RequirementSource::AfterSales),
        RequirementSource::Sales.label(),
        result.progress(RequirementSource::Sales),
    )
}

fn course_list(courses: &[String], result: &AnalysisResult) -> String {
    courses
        .iter()
        .map(|course| {
            if result.passed_courses.contains(course) {
                format!("[{course}]")
            } else {
                course.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Raw values of one mapping kind with their mapping or suggestion.
pub fn vocabulary_table(vocabulary: &MappingVocabulary, unmapped_only: bool) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Raw"),
        header_cell("Mapped"),
        header_cell("Suggestion"),
    ]);
    apply_table_style(&mut table);
    for entry in &vocabulary.entries {
        if unmapped_only && entry.is_mapped() {
            continue;
        }
        let mapped = match &entry.mapped {
            Some(standard) => Cell::new(standard).fg(Color::Green),
            None => dim_cell("-"),
        };
        let suggestion = match &entry.suggestion {
            Some(suggestion) => Cell::new(format!(
                "{} ({:.2})",
                suggestion.candidate, suggestion.score
            ))
            .fg(Color::Yellow),
            None => dim_cell(""),
        };
        table.add_row(vec![Cell::new(&entry.raw), mapped, suggestion]);
    }
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bands() {
        assert_eq!(progress_color(80.0), Color::Green);
        assert_eq!(progress_color(79.9), Color::Yellow);
        assert_eq!(progress_color(50.0), Color::Yellow);
        assert_eq!(progress_color(10.0), Color::Red);
    }

    #[test]
    fn roster_renders_every_entry() {
        let entries = vec![RosterEntry {
            dealer_code: "1234".to_string(),
            name: "علی".to_string(),
            position: "مکانیک".to_string(),
            personnel_code: "7".to_string(),
            selectable: false,
        }];
        let rendered = roster_table(&entries).to_string();
        assert!(rendered.contains("مکانیک"));
        assert!(rendered.contains("1234"));
    }
}
