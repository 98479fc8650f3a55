use std::fmt::Write;

use crate::core::ProjectionResult;

/// Formats an amount as pounds with thousands separators and two decimals,
/// e.g. `£1,234.56` or `-£72,000.00`.
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0.00" after rounding is shown unsigned.
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}£{grouped}.{cents}")
}

/// Text rendering of one calculator panel: the headline figures followed by
/// the year-by-year table.
pub fn render_report(label: &str, result: &ProjectionResult) -> String {
    let summary = &result.summary;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Results after {} years for {label}:",
        summary.loan_term_years
    );
    let _ = writeln!(
        out,
        "Future Value of House: {}",
        format_currency(summary.final_house_value)
    );
    let _ = writeln!(
        out,
        "Future Value of Investments: {}",
        format_currency(summary.final_investment_value)
    );
    let _ = writeln!(
        out,
        "Total Payment over {} years: {}",
        summary.loan_term_years,
        format_currency(summary.total_payment)
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Graph of results for {label}:");
    let _ = writeln!(
        out,
        "{:>4}  {:>16}  {:>16}",
        "Year", "House Value", "Investment Value"
    );
    for point in &result.series {
        let _ = writeln!(
            out,
            "{:>4}  {:>16}  {:>16}",
            point.year,
            format_currency(point.house_value),
            format_currency(point.investment_value)
        );
    }
    out
}
