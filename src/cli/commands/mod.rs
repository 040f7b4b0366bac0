pub mod chart;
pub mod config;
pub mod entry;
pub mod system;
pub mod view;

use crate::cli::core::CommandError;
use crate::cli::registry::{CommandGroup, CommandRegistry};
use crate::domain::EntryId;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    registry.register_group(CommandGroup::Entries, entry::definitions());
    registry.register_group(CommandGroup::View, view::definitions());
    registry.register_group(CommandGroup::Reports, chart::definitions());
    registry.register_group(CommandGroup::Settings, config::definitions());
    registry.register_group(CommandGroup::System, system::definitions());
}

pub(crate) fn parse_entry_id(raw: Option<&&str>, usage: &str) -> Result<EntryId, CommandError> {
    let raw = raw.ok_or_else(|| CommandError::InvalidArguments(format!("usage: {usage}")))?;
    raw.parse::<EntryId>()
        .map_err(|_| CommandError::InvalidArguments(format!("`{raw}` is not a valid entry id")))
}
