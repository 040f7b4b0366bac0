use chrono::NaiveDate;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::core::forms::parse_date;
use crate::core::services::{LedgerQuery, SortOrder};
use crate::domain::{DateRange, PaymentMethod};

const FILTER_USAGE: &str = "filter <start|-> <end|-> | filter clear";
const METHOD_USAGE: &str = "method <code...> | method clear";
const SORT_USAGE: &str = "sort amount <asc|desc> | sort clear";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "filter",
            "Limit the view to an inclusive date range",
            FILTER_USAGE,
            cmd_filter,
        ),
        CommandEntry::new(
            "method",
            "Limit the view to payment methods",
            METHOD_USAGE,
            cmd_method,
        ),
        CommandEntry::new("sort", "Order the view by amount", SORT_USAGE, cmd_sort),
    ]
}

/// Human summary of the active view settings.
pub(crate) fn describe(query: &LedgerQuery) -> String {
    let mut parts = Vec::new();
    if !query.range.is_unbounded() {
        parts.push(format!("dates {}", query.range));
    }
    if !query.payment_methods.is_empty() {
        let labels: Vec<&str> = query
            .payment_methods
            .iter()
            .map(PaymentMethod::label)
            .collect();
        parts.push(format!("paid by {}", labels.join(" or ")));
    }
    if query.sort != SortOrder::None {
        parts.push(format!("amount {}", query.sort));
    }
    if parts.is_empty() {
        "all entries".into()
    } else {
        parts.join("; ")
    }
}

fn parse_bound(raw: &str) -> Result<Option<NaiveDate>, CommandError> {
    if raw == "-" {
        return Ok(None);
    }
    parse_date(raw).map(Some).ok_or_else(|| {
        CommandError::InvalidArguments(format!("`{raw}` is not a date; use YYYY-MM-DD or `-`"))
    })
}

fn report_view(context: &ShellContext) {
    let visible = context.view().len();
    io::print_success(format!(
        "View: {} ({} of {} entries).",
        describe(&context.query),
        visible,
        context.store.len()
    ));
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            io::print_info(format!("Date range: {}", context.query.range));
            Ok(())
        }
        [action] if action.eq_ignore_ascii_case("clear") => {
            context.query.range = DateRange::unbounded();
            report_view(context);
            Ok(())
        }
        [start, end] => {
            context.query.range = DateRange::new(parse_bound(start)?, parse_bound(end)?)?;
            report_view(context);
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(format!(
            "usage: {FILTER_USAGE}"
        ))),
    }
}

fn cmd_method(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            io::print_info(format!("View: {}", describe(&context.query)));
            io::print_info(format!(
                "Known methods: {}",
                context.form.catalog().codes().join(", ")
            ));
            Ok(())
        }
        [action] if action.eq_ignore_ascii_case("clear") => {
            context.query.payment_methods.clear();
            report_view(context);
            Ok(())
        }
        codes => {
            let catalog = context.form.catalog();
            let mut methods = Vec::new();
            for code in codes {
                let method = catalog.resolve(code).ok_or_else(|| {
                    CommandError::InvalidArguments(format!(
                        "unknown payment method `{code}`; expected one of: {}",
                        catalog.codes().join(", ")
                    ))
                })?;
                if !methods.contains(&method) {
                    methods.push(method);
                }
            }
            context.query.payment_methods = methods;
            report_view(context);
            Ok(())
        }
    }
}

fn cmd_sort(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let order = match args {
        [action] if action.eq_ignore_ascii_case("clear") => SortOrder::None,
        [column, direction] if column.eq_ignore_ascii_case("amount") => {
            SortOrder::parse(direction).ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "unknown direction `{direction}`; use asc or desc"
                ))
            })?
        }
        _ => {
            return Err(CommandError::InvalidArguments(format!(
                "usage: {SORT_USAGE}"
            )))
        }
    };
    context.query.sort = order;
    report_view(context);
    Ok(())
}
