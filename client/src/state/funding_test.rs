use super::*;

fn entry(date: &str, amount: f64) -> FundingEntry {
    FundingEntry { date: date.to_owned(), amount, category: "Tech".to_owned() }
}

// =============================================================
// monthly_totals
// =============================================================

#[test]
fn groups_by_month_in_calendar_order() {
    let entries = [entry("2024-03-10", 100.0), entry("2024-01-02", 50.0), entry("2024-03-28", 25.0)];

    let totals = monthly_totals(&entries);

    assert_eq!(
        totals,
        vec![
            MonthlyTotal { month: "Jan", total: 50.0, count: 1 },
            MonthlyTotal { month: "Mar", total: 125.0, count: 2 },
        ]
    );
}

#[test]
fn same_month_of_different_years_folds_together() {
    let entries = [entry("2023-11-01", 10.0), entry("2024-11-30T08:00:00", 5.0)];
    let totals = monthly_totals(&entries);
    assert_eq!(totals.len(), 1);
    assert_eq!(totals[0].total, 15.0);
}

#[test]
fn unreadable_dates_are_skipped() {
    let entries = [entry("yesterday", 10.0), entry("2024-13-01", 10.0), entry("2024-05-01", 7.0)];
    let totals = monthly_totals(&entries);
    assert_eq!(totals, vec![MonthlyTotal { month: "May", total: 7.0, count: 1 }]);
}

#[test]
fn month_of_reads_two_digit_month() {
    assert_eq!(month_of("2024-12-31"), Some(11));
    assert_eq!(month_of("2024/12/31"), None);
    assert_eq!(month_of("2024-1"), None);
}

#[test]
fn bar_share_is_relative_to_peak() {
    let totals = monthly_totals(&[entry("2024-01-01", 50.0), entry("2024-02-01", 200.0)]);
    let max = peak(&totals);
    assert_eq!(max, 200.0);
    assert_eq!(totals[0].share_of(max), 25.0);
    assert_eq!(totals[1].share_of(max), 100.0);
    assert_eq!(totals[0].share_of(0.0), 0.0);
}

// =============================================================
// summarize
// =============================================================

#[test]
fn summarize_computes_total_average_and_largest() {
    let summary = summarize(&[entry("2024-01-01", 1000.0), entry("2024-02-01", 3000.0)]);
    assert_eq!(summary, FundingSummary { total: 4000.0, average: 2000.0, largest: 3000.0, projects: 2 });
}

#[test]
fn empty_window_summarizes_to_zeros() {
    let summary = summarize(&[]);
    assert_eq!(summary, FundingSummary::default());
    assert_eq!(summary_cards(&summary)[1], ("Average Grant", "$0".to_owned()));
}

#[test]
fn summary_cards_format_amounts() {
    let cards = summary_cards(&FundingSummary { total: 1234567.4, average: 999.5, largest: 50000.0, projects: 3 });
    assert_eq!(cards[0].1, "$1,234,567");
    assert_eq!(cards[1].1, "$1,000");
    assert_eq!(cards[2].1, "$50,000");
    assert_eq!(cards[3], ("Total Projects", "3".to_owned()));
}

#[test]
fn format_usd_handles_small_and_negative_amounts() {
    assert_eq!(format_usd(0.0), "$0");
    assert_eq!(format_usd(999.0), "$999");
    assert_eq!(format_usd(-1500.0), "-$1,500");
}
