use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tabflow_cli::commands::{CheckOutcome, KindInfo};
use tabflow_core::{Operation, RunReport, StepStatus};

pub fn print_run_summary(report: &RunReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Step"),
        header_cell("Operation"),
        header_cell("Status"),
        header_cell("Detail"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    for step in &report.steps {
        let (status, detail) = match &step.status {
            StepStatus::Applied => (
                Cell::new("ok").fg(Color::Green).add_attribute(Attribute::Bold),
                dim_cell("-"),
            ),
            StepStatus::Failed { reason } => (
                Cell::new("failed")
                    .fg(Color::Red)
                    .add_attribute(Attribute::Bold),
                Cell::new(reason).fg(Color::Yellow),
            ),
        };
        table.add_row(vec![
            Cell::new(step.index),
            Cell::new(step.kind.name()).fg(Color::Blue),
            status,
            detail,
        ]);
    }
    eprintln!("{table}");
    eprintln!("{}", report.summary());
}

pub fn print_operations(outcome: &CheckOutcome) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Step"),
        header_cell("Operation"),
        header_cell("Parameters"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, operation) in outcome.pipeline.operations().iter().enumerate() {
        table.add_row(vec![
            Cell::new(index),
            operation_cell(operation),
            Cell::new(operation.describe()),
        ]);
    }
    println!("{table}");
    println!("{} operation(s)", outcome.pipeline.len());
}

pub fn print_plan_issues(outcome: &CheckOutcome) {
    let Some(columns) = &outcome.input_columns else {
        return;
    };
    println!("Input columns: {}", columns.join(", "));
    if outcome.is_clean() {
        println!("Column plan: no issues");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Step"),
        header_cell("Operation"),
        header_cell("Issue"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for issue in &outcome.issues {
        table.add_row(vec![
            Cell::new(issue.step_index),
            Cell::new(issue.kind.name()).fg(Color::Blue),
            Cell::new(&issue.message).fg(Color::Red),
        ]);
    }
    println!("{table}");
}

pub fn print_kinds(kinds: &[KindInfo]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Function"),
        header_cell("Fields"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    for kind in kinds {
        table.add_row(vec![
            Cell::new(kind.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(kind.fields.join(", ")),
            Cell::new(kind.description),
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
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
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn operation_cell(operation: &Operation) -> Cell {
    Cell::new(operation.kind().name())
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
