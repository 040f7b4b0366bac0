use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::formatting::{format_amount, format_percent};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Alignment, Table, TableColumn};
use crate::core::services::{CategoryBreakdown, ServiceError, SummaryService};
use crate::core::{Clock, SystemClock};
use crate::domain::YearMonth;
use crate::errors::LedgerError;

const BAR_WIDTH: usize = 24;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "chart",
        "Category breakdown for a month",
        "chart [YYYY-MM] [--json]",
        cmd_chart,
    )]
}

fn cmd_chart(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let mut json = false;
    let mut month = None;
    for arg in args {
        if *arg == "--json" {
            json = true;
        } else if month.is_none() {
            month = Some(YearMonth::parse(arg)?);
        } else {
            return Err(CommandError::InvalidArguments(
                "usage: chart [YYYY-MM] [--json]".into(),
            ));
        }
    }
    let month = month.unwrap_or_else(|| YearMonth::of(SystemClock.today()));

    match SummaryService::aggregate_by_month(context.store.list(), month) {
        Ok(breakdown) if json => {
            let series = serde_json::to_string_pretty(&breakdown.chart_series())
                .map_err(|err| LedgerError::InvalidInput(err.to_string()))?;
            println!("{series}");
            Ok(())
        }
        Ok(breakdown) => {
            render_breakdown(context, &breakdown);
            Ok(())
        }
        Err(ServiceError::Ledger(LedgerError::NoData { month })) => {
            if json {
                println!("[]");
            } else {
                io::print_info(format!("No data for {month}."));
            }
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

fn render_breakdown(context: &ShellContext, breakdown: &CategoryBreakdown) {
    output_section(format!("Spending by category, {}", breakdown.month));
    let mut table = Table::new(vec![
        TableColumn::new("Category", Alignment::Left).max_width(20),
        TableColumn::new("Share", Alignment::Left),
        TableColumn::new("%", Alignment::Right),
        TableColumn::new("Total", Alignment::Right),
    ]);
    for share in breakdown.sorted_by_share() {
        table.push_row(vec![
            share.category.clone(),
            bar(share.fraction),
            format_percent(share.fraction),
            format_amount(&context.config, share.total),
        ]);
    }
    println!("{}", table.render());
    io::print_info(format!(
        "{} entries, total {}",
        breakdown.entry_count,
        format_amount(&context.config, breakdown.total)
    ));
}
