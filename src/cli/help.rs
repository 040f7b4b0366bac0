use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandGroup, CommandRegistry};

/// One line per command, grouped under section headers.
pub fn overview_lines(registry: &CommandRegistry) -> Vec<String> {
    let width = registry.list().iter().map(|entry| entry.usage.len()).max().unwrap_or(0);
    let mut lines = Vec::new();
    let mut current: Option<CommandGroup> = None;
    for entry in registry.list() {
        if current != Some(entry.group) {
            current = Some(entry.group);
            lines.push(format!("{}:", entry.group.title()));
        }
        lines.push(format!("  {:<width$}  {}", entry.usage, entry.description));
    }
    lines
}

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Available commands");
    for line in overview_lines(registry) {
        println!("{line}");
    }
    io::print_hint("`help <command>` shows aliases; Tab completes command names.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("{} ({})", entry.name, entry.group.title()));
    println!("  {}", entry.description);
    println!("  usage: {}", entry.usage);
    if !entry.aliases.is_empty() {
        println!("  aliases: {}", entry.aliases.join(", "));
    }
}
