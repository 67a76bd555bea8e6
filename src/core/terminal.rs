//! Plain-text rendering of reports for the terminal.

use std::io::{self, Write};

use crate::core::dashboard::MarketReport;
use crate::models::Catalog;

/// One `code<TAB>display name` line per market, in menu order
pub fn write_catalog<W: Write>(out: &mut W, catalog: &Catalog) -> io::Result<()> {
    for market in catalog.markets() {
        writeln!(out, "{}\t{}", market.code, market.display_name)?;
    }
    Ok(())
}

pub fn write_report<W: Write>(out: &mut W, report: &MarketReport) -> io::Result<()> {
    writeln!(
        out,
        "{} ({})",
        report.market.display_name, report.market.code
    )?;
    writeln!(out, "  Price: {}", report.price_text)?;
    writeln!(out, "  Last day: {}", report.change_text)?;
    if let Some(caution) = &report.caution {
        writeln!(out, "  Caution: {}", caution)?;
    }
    if let Some(position_text) = &report.position_text {
        writeln!(out, "  {}", position_text)?;
    }

    match (&report.series, &report.chart) {
        (Some(series), Some(_)) => writeln!(
            out,
            "  {} ({} points)",
            report.granularity.chart_title(),
            series.len()
        ),
        _ => writeln!(out, "  No {} chart available", report.granularity),
    }
}
