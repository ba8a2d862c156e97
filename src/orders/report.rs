use std::fmt::Write as _;

use crate::foundation::core::{CalendarDate, Timestamp};
use crate::orders::model::Order;

/// One pickup in the end-of-day report.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    /// Order number.
    pub order_number: String,
    /// Customer display name.
    pub customer_name: String,
    /// Bin the order was collected from.
    pub bin_number: String,
    /// Pickup time.
    pub picked_up_at: Timestamp,
    /// Whether a signature image is stored with the pickup.
    pub signature_attached: bool,
}

/// Pickups completed during one UTC day.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EodReport {
    /// Report day, `YYYY-MM-DD`.
    pub date: String,
    /// Number of rows.
    pub total_pickups: usize,
    /// Pickups ordered by pickup time.
    pub rows: Vec<ReportRow>,
}

impl EodReport {
    /// Collect every order picked up on `date`.
    pub fn build(orders: &[Order], date: CalendarDate) -> Self {
        let mut rows: Vec<ReportRow> = orders
            .iter()
            .filter(|o| !o.is_awaiting())
            .filter_map(|o| {
                let at = o.picked_up_at.filter(|t| t.date() == date)?;
                Some(ReportRow {
                    order_number: o.order_number.clone(),
                    customer_name: o.customer_name.clone(),
                    bin_number: o.bin_number.clone(),
                    picked_up_at: at,
                    signature_attached: o.signature.as_ref().is_some_and(|s| !s.is_empty()),
                })
            })
            .collect();
        rows.sort_by_key(|r| r.picked_up_at);

        Self {
            date: date.to_string(),
            total_pickups: rows.len(),
            rows,
        }
    }

    /// Plain-text table for printing.
    pub fn render_text(&self) -> String {
        const HEADERS: [&str; 5] = ["Order #", "Customer", "Bin", "Picked Up", "Signature"];

        let cells: Vec<[String; 5]> = self
            .rows
            .iter()
            .map(|r| {
                [
                    r.order_number.clone(),
                    r.customer_name.clone(),
                    r.bin_number.clone(),
                    r.picked_up_at.to_string(),
                    if r.signature_attached { "yes" } else { "no" }.to_string(),
                ]
            })
            .collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &cells {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        let _ = writeln!(out, "End of Day Report - {}", self.date);
        let _ = writeln!(out, "Total Pickups: {}", self.total_pickups);
        out.push('\n');
        push_row(&mut out, &HEADERS.map(String::from), &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(rule.join("-+-").as_str());
        out.push('\n');
        if cells.is_empty() {
            out.push_str("(no pickups)\n");
        }
        for row in &cells {
            push_row(&mut out, row, &widths);
        }
        out
    }
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, &w)| format!("{c:<w$}"))
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}

#[cfg(test)]
#[path = "../../tests/unit/orders/report.rs"]
mod tests;
