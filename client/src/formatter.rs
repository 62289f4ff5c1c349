//! Text and JSON rendering for the pages.

use bidding::{Bid, Job};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

/// Maximum column width before truncation
const MAX_COLUMN_WIDTH: usize = 32;

const DATE_FORMAT: &str = "%m/%d/%Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Table,
    Json,
}

/// Which side of the bid the list is shown to. Decides what the Email column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perspective {
    /// Bids on the viewer's jobs, the column shows who bid.
    Buyer,
    /// The viewer's own bids, the column shows who posted the job.
    Bidder,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_bids(&self, bids: &[Bid], perspective: Perspective) -> serde_json::Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(bids),
            OutputFormat::Table => Ok(self.bids_table(bids, perspective)),
        }
    }

    pub fn format_job(&self, job: &Job) -> serde_json::Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(job),
            OutputFormat::Table => Ok(self.job_card(job)),
        }
    }

    fn bids_table(&self, bids: &[Bid], perspective: Perspective) -> String {
        let (heading, unit) = match perspective {
            Perspective::Buyer => ("Bid Requests", "Requests"),
            Perspective::Bidder => ("My Bids", "Bids"),
        };
        let headers = ["ID", "Title", "Email", "Deadline", "Price", "Category", "Status"];
        let rows = bids
            .iter()
            .map(|bid| {
                let email = match perspective {
                    Perspective::Buyer => &bid.email,
                    Perspective::Bidder => &bid.buyer_email,
                };
                vec![
                    bid.id.clone(),
                    bid.title.clone(),
                    email.clone(),
                    format_date(&bid.bid_deadline),
                    bid.price.to_string(),
                    bid.category.clone(),
                    bid.status.to_string(),
                ]
            })
            .collect::<Vec<_>>();
        format!(
            "{}  ({} {})\n{}",
            heading,
            bids.len(),
            unit,
            format_table(&headers, &rows)
        )
    }

    fn job_card(&self, job: &Job) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "Deadline: {}    [{}]\n",
            format_date(&job.deadline),
            job.category.to_uppercase()
        ));
        out.push_str(&format!("{}\n", job.title));
        if !job.description.is_empty() {
            out.push_str(&format!("{}\n", job.description));
        }
        out.push_str("\nBuyer Details:\n");
        out.push_str(&format!("  Name: {}\n", job.buyer.name));
        out.push_str(&format!("  Email: {}\n", job.buyer.email));
        if !job.buyer.photo.is_empty() {
            out.push_str(&format!("  Photo: {}\n", job.buyer.photo));
        }
        out.push_str(&format!("Range: ${} - ${}", job.min_price, job.max_price));
        out
    }
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Truncate a string to max width with ellipsis
fn truncate_value(value: &str, max_width: usize) -> String {
    if value.chars().count() <= max_width {
        value.to_string()
    } else {
        let take = max_width.saturating_sub(3);
        format!("{}...", value.chars().take(take).collect::<String>())
    }
}

fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|v| truncate_value(v, MAX_COLUMN_WIDTH)).collect())
        .collect();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, value) in row.iter().enumerate() {
            widths[i] = widths[i].max(value.chars().count());
        }
    }

    let border = {
        let parts: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
        format!("+{}+", parts.join("+"))
    };
    let mut out = vec![border.clone(), table_line(headers, &widths), border.clone()];
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push(table_line(&cells, &widths));
    }
    if !rows.is_empty() {
        out.push(border);
    }
    out.join("\n")
}

fn table_line(cells: &[&str], widths: &[usize]) -> String {
    let parts: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!(" {}{} ", c, " ".repeat(w - c.chars().count())))
        .collect();
    format!("|{}|", parts.join("|"))
}
