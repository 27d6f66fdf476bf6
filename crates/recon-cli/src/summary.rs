use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use recon_map::normalize;
use recon_model::{Action, AliasRecord, DecodeResult, SupplierResolution};

use crate::types::ProcessResult;

pub fn print_summary(result: &ProcessResult) {
    let summary = &result.summary;
    println!("Input: {}", result.input.display());
    println!("Output: {}", result.output.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Suggested action"),
        header_cell("Rows"),
        header_cell("Supplier"),
        header_cell("Rows"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    let resolutions = [
        ("Exact", summary.exact, Color::Green),
        ("Resolved", summary.resolved, Color::Blue),
        ("Unresolved", summary.unresolved, Color::Yellow),
    ];
    for (action, (label, count, color)) in Action::ALL.into_iter().zip(resolutions) {
        table.add_row(vec![
            action_cell(action),
            count_cell(summary.action_count(action), action_color(action)),
            Cell::new(label),
            count_cell(count, color),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.rows).add_attribute(Attribute::Bold),
        Cell::new("With brand / type / qty").fg(Color::Cyan),
        Cell::new(format!(
            "{} / {} / {}",
            summary.with_brand, summary.with_kind, summary.with_quantity
        )),
    ]);
    println!("{table}");

    if !summary.unresolved_suppliers.is_empty() {
        println!();
        println!("Unresolved suppliers (candidates for `recon alias add`):");
        for name in &summary.unresolved_suppliers {
            println!("- {name}");
        }
    }
}

pub fn print_decode(text: &str, result: &DecodeResult) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("Comment"), Cell::new(text)]);
    table.add_row(vec![Cell::new("Action"), action_cell(result.action)]);
    table.add_row(vec![Cell::new("Quantity"), optional_cell(result.quantity)]);
    table.add_row(vec![
        Cell::new("Brand"),
        optional_cell(result.brand.as_deref()),
    ]);
    table.add_row(vec![
        Cell::new("Type"),
        optional_cell(result.kind.as_deref()),
    ]);
    println!("{table}");
}

pub fn print_resolution(raw: &str, resolution: &SupplierResolution) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Input"),
        header_cell("Match"),
        header_cell("Final"),
    ]);
    apply_table_style(&mut table);
    let match_cell = match resolution {
        SupplierResolution::Exact(_) => Cell::new("exact").fg(Color::Green),
        SupplierResolution::Resolved(_) => Cell::new("fuzzy").fg(Color::Blue),
        SupplierResolution::Unresolved => Cell::new("none").fg(Color::Yellow),
    };
    table.add_row(vec![
        Cell::new(raw),
        match_cell,
        Cell::new(resolution.final_name(raw)).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_alias_added(record: &AliasRecord) {
    println!(
        "Registered alias: '{}' -> '{}'",
        record.alias, record.canonical
    );
}

pub fn print_aliases(records: &[AliasRecord]) {
    if records.is_empty() {
        println!("No aliases registered yet.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Alias"),
        header_cell("Nombre real"),
        header_cell("Match key"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, record) in records.iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(&record.alias),
            Cell::new(&record.canonical),
            dim_cell(format!(
                "{} -> {}",
                normalize(&record.alias),
                normalize(&record.canonical)
            )),
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
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn action_color(action: Action) -> Color {
    match action {
        Action::Restar => Color::Red,
        Action::Sumar => Color::Green,
        Action::Neutro => Color::DarkGrey,
    }
}

fn action_cell(action: Action) -> Cell {
    Cell::new(action.as_str())
        .fg(action_color(action))
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn optional_cell<T: ToString>(value: Option<T>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
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
