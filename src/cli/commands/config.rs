use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Alignment, Table, TableColumn};
use crate::config::Config;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and update display preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_ascii_lowercase()).as_deref() {
        None | Some("show") => {
            show_config(context);
            Ok(())
        }
        Some("set") => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    Config::KEYS.join("|")
                )));
            }
            let key = args[1];
            let value = args[2..].join(" ");
            context.config.set(key, &value)?;
            context.config_changed()?;
            io::print_success(format!("Updated `{key}`."));
            Ok(())
        }
        Some(other) => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{other}`; use `show` or `set`"
        ))),
    }
}

fn show_config(context: &ShellContext) {
    output_section("Configuration");
    let mut table = Table::new(vec![
        TableColumn::new("Key", Alignment::Left),
        TableColumn::new("Value", Alignment::Left).max_width(48),
    ]);
    for (key, value) in context.config.entries() {
        let value = if value.is_empty() { "-".to_string() } else { value };
        table.push_row(vec![key.to_string(), value]);
    }
    println!("{}", table.render());
}

#[cfg(test)]
mod tests {
    use crate::cli::core::{CliMode, ShellContext};

    #[test]
    fn set_updates_session_catalog() {
        let mut context = ShellContext::in_memory(CliMode::Script);
        context
            .process_line("config set payment_methods voucher")
            .unwrap();
        assert_eq!(context.config.payment_methods, vec!["voucher"]);
        context
            .process_line("add date=2024-03-01 category=gifts description=card amount=15 payment=voucher")
            .unwrap();
        assert_eq!(context.store.len(), 1);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut context = ShellContext::in_memory(CliMode::Script);
        assert!(context.process_line("config set theme dark").is_err());
    }
}
