use crate::cli::core::{CommandResult, ShellContext};

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

/// Sections of the help listing, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum CommandGroup {
    Entries,
    View,
    Reports,
    Settings,
    System,
}

impl CommandGroup {
    pub fn title(self) -> &'static str {
        match self {
            CommandGroup::Entries => "Entries",
            CommandGroup::View => "View",
            CommandGroup::Reports => "Reports",
            CommandGroup::Settings => "Settings",
            CommandGroup::System => "System",
        }
    }
}

pub struct CommandEntry {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub aliases: &'static [&'static str],
    pub group: CommandGroup,
    pub handler: CommandHandler,
}

impl CommandEntry {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            aliases: &[],
            group: CommandGroup::System,
            handler,
        }
    }

    pub fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }
}

/// Command table kept sorted by group; registration order is kept within a group.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `definitions` under `group`. Names or aliases already claimed are skipped.
    pub fn register_group(&mut self, group: CommandGroup, definitions: Vec<CommandEntry>) {
        for mut entry in definitions {
            let clash = std::iter::once(&entry.name)
                .chain(entry.aliases)
                .any(|name| self.get(name).is_some());
            if clash {
                continue;
            }
            entry.group = group;
            let slot = self
                .entries
                .iter()
                .position(|known| known.group > group)
                .unwrap_or(self.entries.len());
            self.entries.insert(slot, entry);
        }
    }

    /// Looks a command up by name or alias.
    pub fn get(&self, name: &str) -> Option<&CommandEntry> {
        self.entries.iter().find(|entry| entry.answers_to(name))
    }

    pub fn list(&self) -> &[CommandEntry] {
        &self.entries
    }

    /// Canonical names only; aliases are not offered as completions or suggestions.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    pub fn handler(&self, name: &str) -> Option<CommandHandler> {
        self.get(name).map(|entry| entry.handler)
    }
}
