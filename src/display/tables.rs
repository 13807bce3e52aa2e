//! Table output for generation results.

use super::theme::Outcome;
use crate::generate::GenerateReport;
use comfy_table::{
    Attribute, Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
};

/// One row per class: written, ignored or failed
pub fn create_generate_table(report: &GenerateReport) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.apply_modifier(UTF8_ROUND_CORNERS);

    table.set_header(vec![
        Cell::new("Class").add_attribute(Attribute::Bold),
        Cell::new("Status").add_attribute(Attribute::Bold),
        Cell::new("Detail").add_attribute(Attribute::Bold),
    ]);

    for (name, path) in &report.written {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(Outcome::Written.label()).fg(Color::Green),
            Cell::new(path.display()),
        ]);
    }

    for name in &report.ignored {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(Outcome::Ignored.label()).fg(Color::Yellow),
            Cell::new(""),
        ]);
    }

    for (name, error) in &report.failed {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(error.status_code())
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            Cell::new(error),
        ]);
    }

    table.to_string()
}
