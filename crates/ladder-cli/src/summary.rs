use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use ladder_cli::commands::{FormatRow, RulesetReport, ValidationReport};
use ladder_validate::{MessageKind, Problem};

pub fn print_formats(rows: &[FormatRow]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Format"),
        header_cell("Kind"),
        header_cell("Gen"),
        header_cell("Team"),
        header_cell("Status"),
        header_cell("Description"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for row in rows {
        let name = if row.kind == "Format" {
            Cell::new(&row.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(&row.name).fg(Color::DarkGrey)
        };
        table.add_row(vec![
            name,
            Cell::new(row.kind),
            Cell::new(row.generation),
            Cell::new(row.team_size),
            status_cell(row.rejected.as_deref()),
            row.description.as_deref().map_or_else(|| dim_cell("-"), Cell::new),
        ]);
    }
    println!("{table}");
}

pub fn print_ruleset(report: &RulesetReport) {
    println!("Format: {}", report.format);

    let mut rules = Table::new();
    rules.set_header(vec![header_cell("#"), header_cell("Rule")]);
    apply_table_style(&mut rules);
    align_column(&mut rules, 0, CellAlignment::Right);
    for (index, rule) in report.rules.iter().enumerate() {
        rules.add_row(vec![dim_cell(index + 1), Cell::new(rule)]);
    }
    println!("{rules}");

    let mut bans = Table::new();
    bans.set_header(vec![header_cell("Kind"), header_cell("Entries")]);
    apply_table_style(&mut bans);
    bans.add_row(vec![Cell::new("Banned").fg(Color::Red), list_cell(&report.bans)]);
    bans.add_row(vec![
        Cell::new("Compound").fg(Color::Red),
        list_cell(&report.complex_bans),
    ]);
    bans.add_row(vec![
        Cell::new("Allowed").fg(Color::Green),
        list_cell(&report.allowed),
    ]);
    println!("{bans}");
}

pub fn print_validation(report: &ValidationReport) {
    println!("Format: {}", report.format);
    println!("Team: {} Pokemon", report.team_size);
    if report.is_legal() {
        println!("Your team is valid for {}.", report.format);
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Rule"),
        header_cell("Problem"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, problem) in report.problems.iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            rule_cell(problem),
            Cell::new(problem.to_string()),
        ]);
    }
    println!("{table}");
    eprintln!(
        "Your team was rejected for {} ({} problems).",
        report.format,
        report.problems.len()
    );
}

pub fn print_announcements(messages: &[(MessageKind, String)]) {
    for (kind, text) in messages {
        match kind {
            MessageKind::Format => println!("{text}"),
            MessageKind::Rule => println!("  {text}"),
            MessageKind::Blocked => eprintln!("{text}"),
        }
    }
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::UpperBoundary(Width::Percentage(40)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(rejected: Option<&str>) -> Cell {
    match rejected {
        None => Cell::new("ok").fg(Color::Green),
        Some(reason) => Cell::new(format!("rejected: {reason}"))
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn rule_cell(problem: &Problem) -> Cell {
    match problem.rule() {
        Some(rule) => Cell::new(rule).fg(Color::Yellow),
        None => dim_cell("-"),
    }
}

fn list_cell(values: &[String]) -> Cell {
    if values.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(values.join(", "))
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
