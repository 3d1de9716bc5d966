//! Funding chart aggregation.
//!
//! DESIGN
//! ======
//! The statistics endpoint returns raw awards. The page buckets them by
//! calendar month (years fold together, so a one-year window shows at most
//! twelve bars) and derives the four summary cards locally, so the cards stay
//! consistent with the bars even when the backend omits its own totals.

#[cfg(test)]
#[path = "funding_test.rs"]
mod funding_test;

use crate::net::types::FundingEntry;

pub const MONTHS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

/// Awards that fell in one calendar month.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthlyTotal {
    pub month: &'static str,
    pub total: f64,
    pub count: usize,
}

impl MonthlyTotal {
    /// Bar length as a percentage of `max`, clamped to `0..=100`.
    pub fn share_of(&self, max: f64) -> f64 {
        if max <= 0.0 {
            return 0.0;
        }
        (self.total / max * 100.0).clamp(0.0, 100.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FundingSummary {
    pub total: f64,
    pub average: f64,
    pub largest: f64,
    pub projects: usize,
}

/// Month index (0-based) of a `YYYY-MM-DD...` date, or `None` if malformed.
pub fn month_of(date: &str) -> Option<usize> {
    let month: usize = date.get(5..7)?.parse().ok()?;
    if date.get(4..5) != Some("-") || !(1..=12).contains(&month) {
        return None;
    }
    Some(month - 1)
}

/// Per-month totals in calendar order, skipping months without awards.
/// Entries whose date cannot be read are left out.
pub fn monthly_totals(entries: &[FundingEntry]) -> Vec<MonthlyTotal> {
    let mut buckets = [(0.0_f64, 0_usize); 12];
    for entry in entries {
        match month_of(&entry.date) {
            Some(month) => {
                buckets[month].0 += entry.amount;
                buckets[month].1 += 1;
            }
            None => log::debug!("skipping funding entry with unreadable date {:?}", entry.date),
        }
    }
    MONTHS
        .into_iter()
        .zip(buckets)
        .filter(|(_, (_, count))| *count > 0)
        .map(|(month, (total, count))| MonthlyTotal { month, total, count })
        .collect()
}

/// Largest monthly total, for scaling bars.
pub fn peak(totals: &[MonthlyTotal]) -> f64 {
    totals.iter().map(|m| m.total).fold(0.0, f64::max)
}

/// Totals across every entry. An empty window summarizes to zeros.
pub fn summarize(entries: &[FundingEntry]) -> FundingSummary {
    if entries.is_empty() {
        return FundingSummary::default();
    }
    let total: f64 = entries.iter().map(|e| e.amount).sum();
    let largest = entries.iter().map(|e| e.amount).fold(f64::MIN, f64::max);
    FundingSummary {
        total,
        average: total / entries.len() as f64,
        largest,
        projects: entries.len(),
    }
}

/// Label and display value for each summary card.
pub fn summary_cards(summary: &FundingSummary) -> [(&'static str, String); 4] {
    [
        ("Total Funding", format_usd(summary.total)),
        ("Average Grant", format_usd(summary.average)),
        ("Largest Grant", format_usd(summary.largest)),
        ("Total Projects", summary.projects.to_string()),
    ]
}

/// Whole dollars with thousands separators, e.g. `$12,500`.
pub fn format_usd(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}")
}
