use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Alignment, Table, TableColumn};
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "version",
            "Show build metadata",
            "version [--verbose]",
            cmd_version,
        ),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        )
        .with_aliases(&["?"]),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit).with_aliases(&["quit"]),
    ]
}

fn cmd_version(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    if !matches!(args.first(), Some(&"--verbose" | &"-v")) {
        io::print_info(meta.summary());
        return Ok(());
    }

    output_section(format!("ledger_core {}", meta.version));
    let mut table = Table::new(vec![
        TableColumn::new("Field", Alignment::Left),
        TableColumn::new("Value", Alignment::Left),
    ]);
    for (field, value) in [
        ("commit", format!("{} ({})", meta.git_hash, meta.git_status)),
        ("built", meta.timestamp.to_string()),
        ("target", meta.target.to_string()),
        ("profile", meta.profile.to_string()),
        ("rustc", meta.rustc.to_string()),
    ] {
        table.push_row(vec![field.to_string(), value]);
    }
    println!("{}", table.render());
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(entry) => help::print_command(entry),
            None => context.suggest_command(name),
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
