use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ricap_classify::{ClassificationStats, KeywordTables};
use ricap_model::{ClassificationDomain, DiagnosticType};

use crate::types::ClassifyReport;

pub fn print_summary(report: &ClassifyReport, tables: &KeywordTables) {
    println!("Notes: {}", report.notes_path.display());
    println!("Rows: {}", report.rows);
    if report.dry_run {
        println!("Dry run: no files written");
    }
    for path in &report.outputs {
        println!("Output: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Domain"),
        header_cell("Category"),
        header_cell("Rows"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in hit_rows(&report.stats, tables) {
        table.add_row(vec![
            domain_cell(row.domain),
            Cell::new(&row.category),
            count_cell(row.hits, Color::Green),
        ]);
    }
    println!("{table}");

    let mut reviews = Table::new();
    reviews.set_header(vec![
        header_cell("Diagnosis"),
        header_cell("Present"),
        header_cell("Missing"),
        header_cell("Ambiguous"),
    ]);
    apply_summary_table_style(&mut reviews);
    for index in 1..4 {
        align_column(&mut reviews, index, CellAlignment::Right);
    }
    for diagnostic_type in DiagnosticType::ALL {
        let counts = report.stats.review(diagnostic_type);
        reviews.add_row(vec![
            Cell::new(diagnostic_type.to_string()).add_attribute(Attribute::Bold),
            Cell::new(counts.present),
            count_cell(counts.missing, Color::Red),
            count_cell(counts.ambiguous, Color::Yellow),
        ]);
    }
    println!();
    println!("Main category review:");
    println!("{reviews}");
    println!(
        "Referral fallback ({}): {} of {} rows",
        report.referral_fallback, report.stats.referral_fallbacks, report.rows
    );
}

/// One line of the hit table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitRow {
    pub domain: ClassificationDomain,
    pub category: String,
    pub hits: usize,
}

/// Every table category with its hit count, in table order, including
/// categories that never matched.
///
/// Categories present in the stats but not in a table (the referral fallback)
/// come last in their domain.
pub fn hit_rows(stats: &ClassificationStats, tables: &KeywordTables) -> Vec<HitRow> {
    let mut rows = Vec::new();
    for domain in ClassificationDomain::ALL {
        let table = tables.get(domain);
        for name in table.category_names() {
            rows.push(HitRow {
                domain,
                category: name.to_string(),
                hits: stats.hits(domain, name),
            });
        }
        for (name, hits) in stats.top_categories(domain) {
            if !table.contains(name) {
                rows.push(HitRow {
                    domain,
                    category: name.to_string(),
                    hits,
                });
            }
        }
    }
    rows
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn domain_cell(domain: ClassificationDomain) -> Cell {
    Cell::new(domain.as_str())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
