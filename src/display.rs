//! Terminal rendering of prediction results.

use crate::dataset::Dataset;
use crate::metrics::BatchMetrics;
use crate::single::SinglePrediction;
use crate::types::Verdict;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Render the processed table, showing at most `preview_rows` rows (0 = all).
pub fn dataset_table(dataset: &Dataset, label_column: &str, preview_rows: usize) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(dataset.headers().iter().map(|h| header_cell(h)));

    let label_idx = dataset.column_index(label_column);
    let shown = if preview_rows == 0 {
        dataset.len()
    } else {
        preview_rows.min(dataset.len())
    };

    for row in &dataset.rows()[..shown] {
        table.add_row(row.iter().enumerate().map(|(idx, value)| {
            if Some(idx) == label_idx {
                verdict_cell(value)
            } else {
                Cell::new(value)
            }
        }));
    }
    table
}

/// Render the batch summary
pub fn summary_table(metrics: &BatchMetrics) -> Table {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    table.add_row(vec![Cell::new("Rows read"), Cell::new(metrics.rows_read)]);
    table.add_row(vec![
        Cell::new("Duplicates dropped"),
        Cell::new(metrics.duplicates_dropped),
    ]);
    table.add_row(vec![
        Cell::new("Rows predicted"),
        Cell::new(metrics.rows_predicted),
    ]);
    table.add_row(vec![
        Cell::new("Leave"),
        Cell::new(metrics.leave_count).fg(Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Stay"),
        Cell::new(metrics.stay_count).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Leave rate"),
        Cell::new(format!("{:.1}%", metrics.leave_rate())),
    ]);
    table.add_row(vec![
        Cell::new("Elapsed"),
        Cell::new(format!("{:.2?}", metrics.elapsed())),
    ]);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

/// One-line human verdict for the single prediction mode
pub fn single_message(prediction: &SinglePrediction) -> String {
    prediction.verdict.message().to_string()
}

/// Number of rows `dataset_table` leaves out
pub fn hidden_rows(dataset: &Dataset, preview_rows: usize) -> usize {
    if preview_rows == 0 {
        0
    } else {
        dataset.len().saturating_sub(preview_rows)
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn verdict_cell(value: &str) -> Cell {
    let cell = Cell::new(value);
    if value == Verdict::Leave.as_cell() {
        cell.fg(Color::Red).add_attribute(Attribute::Bold)
    } else {
        cell.fg(Color::Green)
    }
}
