//! Plain-text rendering of report tables and charts.

use caseload_server_models::{ApiChart, ApiTable};

/// Width of a 100% bar in [`render_chart`].
const BAR_WIDTH: usize = 50;

const AREA_HEADING: &str = "Área";

/// Renders a table with one line per row and aligned columns.
///
/// Counts and the rate are right-aligned; the totals row is separated from
/// the group rows by a rule.
#[must_use]
pub fn render_table(table: &ApiTable) -> String {
    let mut header: Vec<String> = vec![AREA_HEADING.to_string()];
    header.extend(table.columns.iter().cloned());

    let body: Vec<(bool, Vec<String>)> = table
        .rows
        .iter()
        .map(|row| {
            (
                row.is_total,
                vec![
                    row.action_area.clone(),
                    row.label.clone(),
                    row.filed.to_string(),
                    row.closed.to_string(),
                    row.pending.to_string(),
                    format!("{:.2}", row.congestion_rate),
                ],
            )
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for (_, cells) in &body {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &header, &widths);
    push_rule(&mut out, &widths);
    for (is_total, cells) in &body {
        if *is_total {
            push_rule(&mut out, &widths);
        }
        push_line(&mut out, cells, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, width))| {
            let pad = width.saturating_sub(cell.chars().count());
            // first two columns are text, the rest numeric
            if i < 2 {
                format!("{cell}{}", " ".repeat(pad))
            } else {
                format!("{}{cell}", " ".repeat(pad))
            }
        })
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

fn push_rule(out: &mut String, widths: &[usize]) {
    let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(total));
    out.push('\n');
}

/// Renders a horizontal bar chart scaled to the chart's fixed y range.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_chart(chart: &ApiChart) -> String {
    let mut out = format!("{} x {}\n", chart.x_axis_title, chart.y_axis_title);

    if chart.bars.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }

    let label_width = chart
        .bars
        .iter()
        .map(|b| b.label.chars().count())
        .max()
        .unwrap_or(0);
    let [min, max] = chart.y_axis_range;
    let span = (max - min).max(f64::EPSILON);

    for bar in &chart.bars {
        let fraction = ((bar.value - min) / span).clamp(0.0, 1.0);
        let filled = (fraction * BAR_WIDTH as f64).round() as usize;
        let pad = label_width - bar.label.chars().count();
        out.push_str(&format!(
            "{}{} |{}{} {:>6.2}\n",
            bar.label,
            " ".repeat(pad),
            "#".repeat(filled),
            " ".repeat(BAR_WIDTH - filled),
            bar.value
        ));
    }
    out
}
