//! Plain-text and JSON rendering of listings and reports.

use colored::Colorize;
use comfy_table::{Cell, ContentArrangement, Table};
use foodlink::entity::dates::format_date;
use foodlink::{FoodListing, ProviderContact, ReportOutcome, ReportTable};
use serde_json::{json, Value};

/// Bordered text table; column widths follow display width, so wide characters line up
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut table = Table::new();

    table
        .set_content_arrangement(ContentArrangement::Dynamic)
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);

    table.set_header(headers.iter().map(|h| Cell::new(h)));
    for row in rows {
        table.add_row(row.iter().map(Cell::new));
    }

    format!("{}\n", table)
}

pub fn listings(listings: &[FoodListing]) -> String {
    let rows: Vec<Vec<String>> = listings
        .iter()
        .map(|l| {
            vec![
                l.id.to_string(),
                l.name.clone(),
                l.quantity.to_string(),
                format_date(l.expiry_date),
                l.provider_id.to_string(),
                l.provider_type.clone(),
                l.location.clone(),
                l.food_type.clone(),
                l.meal_type.clone(),
            ]
        })
        .collect();
    table(
        &[
            "Food_ID",
            "Food_Name",
            "Quantity",
            "Expiry_Date",
            "Provider_ID",
            "Provider_Type",
            "Location",
            "Food_Type",
            "Meal_Type",
        ],
        &rows,
    )
}

pub fn contacts(contacts: &[ProviderContact]) -> String {
    let rows: Vec<Vec<String>> = contacts
        .iter()
        .map(|c| vec![c.provider_id.to_string(), c.name.clone(), c.contact.clone()])
        .collect();
    table(&["Provider_ID", "Name", "Contact"], &rows)
}

/// Title, table and chart hint of one report
pub fn report(report: &ReportTable) -> String {
    let headers: Vec<&str> = report.columns.iter().map(|c| c.name).collect();
    let rows: Vec<Vec<String>> = report
        .rows
        .iter()
        .map(|row| row.cells().iter().map(ToString::to_string).collect())
        .collect();

    let mut out = format!(
        "{}\n",
        format!("{}. {}", report.id.number(), report.title).bold()
    );
    if rows.is_empty() {
        out.push_str("(no rows)\n");
    } else {
        out.push_str(&table(&headers, &rows));
    }
    if let Some(chart) = report.chart {
        out.push_str(&format!("chart: {} by {}\n", chart.value, chart.category).dimmed().to_string());
    }
    out
}

pub fn outcome_json(outcome: &ReportOutcome) -> Value {
    match &outcome.result {
        Ok(table) => json!({
            "id": outcome.id,
            "title": outcome.id.title(),
            "table": table,
        }),
        Err(e) => json!({
            "id": outcome.id,
            "title": outcome.id.title(),
            "error": e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Terminal columns taken by `line`; CJK ideographs are two wide
    fn display_width(line: &str) -> usize {
        line.chars()
            .map(|c| if ('\u{4E00}'..='\u{9FFF}').contains(&c) { 2 } else { 1 })
            .sum()
    }

    #[test]
    fn test_table_lists_headers_and_cells() {
        let out = table(
            &["Id", "Name"],
            &[
                vec!["1".to_string(), "Bread".to_string()],
                vec!["10".to_string(), "Rice".to_string()],
            ],
        );
        assert!(out.ends_with('\n'));
        let header = out.lines().find(|l| l.contains("Id")).unwrap();
        assert!(header.contains("Name"));
        assert!(out.lines().any(|l| l.contains("1") && l.contains("Bread")));
        assert!(out.lines().any(|l| l.contains("10") && l.contains("Rice")));
    }

    #[test]
    fn test_wide_characters_keep_columns_aligned() {
        let out = table(
            &["Food_Name", "Qty"],
            &[
                vec!["寿司寿司".to_string(), "5".to_string()],
                vec!["Bread".to_string(), "7".to_string()],
            ],
        );
        let lines: Vec<&str> = out.lines().collect();
        let width = display_width(lines[0]);
        assert!(lines.iter().all(|l| display_width(l) == width), "{}", out);

        let sushi = lines.iter().find(|l| l.contains("寿司")).unwrap();
        let bread = lines.iter().find(|l| l.contains("Bread")).unwrap();
        let qty_column = |line: &str| display_width(&line[..line.find(['5', '7']).unwrap()]);
        assert_eq!(qty_column(sushi), qty_column(bread));
    }
}
