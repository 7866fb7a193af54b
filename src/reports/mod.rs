use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use phonscore::api::DatasetReport;
use phonscore::error::PsResult;
use phonscore::scorer::ScoreResult;

fn fmt_percent(p: Option<f64>) -> String {
    p.map_or_else(|| "-".to_string(), |p| format!("{:.2}", p))
}

fn count_cells(s: &ScoreResult) -> Vec<Cell> {
    vec![
        Cell::new(s.target),
        Cell::new(s.actual),
        Cell::new(s.correct).fg(Color::Green),
        Cell::new(s.substituted),
        Cell::new(s.deleted).fg(Color::Red),
        Cell::new(s.epen),
    ]
}

pub fn print_score_report(report: &DatasetReport) {
    println!(
        "\n{} | pattern '{}' | ignore diacritics: {}",
        report.title, report.pattern, report.ignore_diacritics
    );

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("Id").add_attribute(Attribute::Bold),
        Cell::new("Target"),
        Cell::new("Actual"),
        Cell::new("Alignment"),
        Cell::new("# Target"),
        Cell::new("# Actual"),
        Cell::new("Correct").fg(Color::Green),
        Cell::new("Subst"),
        Cell::new("Deleted").fg(Color::Red),
        Cell::new("Epen"),
        Cell::new(&report.column_name).fg(Color::Cyan),
    ]);

    for i in 4..=10 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for row in &report.rows {
        let mut cells = vec![
            Cell::new(&row.id).add_attribute(Attribute::Bold),
            Cell::new(&row.target),
            Cell::new(&row.actual),
            Cell::new(&row.alignment),
        ];
        cells.extend(count_cells(&row.score));
        cells.push(Cell::new(fmt_percent(row.score.percent_correct())).fg(Color::Cyan));
        table.add_row(cells);
    }

    let mut total = vec![
        Cell::new("TOTAL").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(""),
    ];
    total.extend(count_cells(&report.total));
    total.push(
        Cell::new(fmt_percent(report.percent_correct()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    );
    table.add_row(total);

    println!("{}", table);
}

pub fn emit(report: &DatasetReport, json: bool) -> PsResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_score_report(report);
    }
    Ok(())
}
