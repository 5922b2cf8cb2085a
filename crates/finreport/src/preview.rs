use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use polars::prelude::{AnyValue, DataFrame, PolarsResult};

/// Renders the enriched report table for the terminal.
pub fn render_table(df: &DataFrame) -> PolarsResult<Table> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(df.get_column_names().iter().map(|name| name.as_str()));

    for idx in 0..df.height() {
        let mut row = Vec::with_capacity(df.width());
        for column in df.get_columns() {
            let text = match column.get(idx)? {
                AnyValue::Null => "n/a".to_string(),
                AnyValue::Float64(value) => format!("{value:.2}"),
                other => other.to_string(),
            };
            row.push(Cell::new(text).set_alignment(CellAlignment::Right));
        }
        table.add_row(row);
    }

    Ok(table)
}
