use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::formatting::{format_amount, format_date};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Alignment, Table, TableColumn};
use crate::core::{FieldKey, SubmitOutcome};
use crate::errors::LedgerError;

use super::{parse_entry_id, view};

const ADD_USAGE: &str =
    "add [date=YYYY-MM-DD] [category=<text>] [description=<text>] [amount=<number>] [payment=<code>]";
const EDIT_USAGE: &str = "edit <id> [field=value ...]";
const DELETE_USAGE: &str = "delete <id>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record a new entry", ADD_USAGE, cmd_add),
        CommandEntry::new("edit", "Edit an existing entry", EDIT_USAGE, cmd_edit),
        CommandEntry::new("delete", "Delete an entry", DELETE_USAGE, cmd_delete)
            .with_aliases(&["rm"]),
        CommandEntry::new("list", "Show entries in the current view", "list", cmd_list)
            .with_aliases(&["ls"]),
    ]
}

fn parse_assignments(args: &[&str]) -> Result<Vec<(FieldKey, String)>, CommandError> {
    args.iter()
        .map(|arg| {
            let (key, value) = arg.split_once('=').ok_or_else(|| {
                CommandError::InvalidArguments(format!("expected field=value, got `{arg}`"))
            })?;
            let field = FieldKey::parse(key).ok_or_else(|| {
                let known: Vec<&str> = FieldKey::ALL.iter().map(|field| field.key()).collect();
                CommandError::InvalidArguments(format!(
                    "unknown field `{key}`; expected one of: {}",
                    known.join(", ")
                ))
            })?;
            Ok((field, value.to_string()))
        })
        .collect()
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let assignments = parse_assignments(args)?;
    let missing: Vec<FieldKey> = FieldKey::ALL
        .into_iter()
        .filter(|field| assignments.iter().all(|(assigned, _)| assigned != field))
        .collect();
    context.form.open_create();
    run_form(context, assignments, missing)
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = parse_entry_id(args.first(), EDIT_USAGE)?;
    let entry = context
        .store
        .get(id)
        .cloned()
        .ok_or(LedgerError::NotFound(id))?;
    let assignments = parse_assignments(&args[1..])?;
    let prompts = if assignments.is_empty() {
        FieldKey::ALL.to_vec()
    } else {
        Vec::new()
    };
    context.form.open_edit(&entry);
    run_form(context, assignments, prompts)
}

/// Fills the open form, prompts when interactive, and submits. The form is
/// always closed afterwards.
fn run_form(
    context: &mut ShellContext,
    assignments: Vec<(FieldKey, String)>,
    prompts: Vec<FieldKey>,
) -> CommandResult {
    let result = fill_and_submit(context, assignments, prompts);
    if context.form.is_open() {
        context.form.cancel();
    }
    let outcome = result?;
    match outcome {
        Some(SubmitOutcome::Created(id)) => io::print_success(format!("Added entry {id}.")),
        Some(SubmitOutcome::Updated(id)) => io::print_success(format!("Updated entry {id}.")),
        None => io::print_info("Entry discarded."),
    }
    Ok(())
}

fn fill_and_submit(
    context: &mut ShellContext,
    assignments: Vec<(FieldKey, String)>,
    prompts: Vec<FieldKey>,
) -> Result<Option<SubmitOutcome>, CommandError> {
    for (field, value) in assignments {
        context.form.set_field(field, value)?;
    }
    if context.is_interactive() {
        for field in prompts {
            prompt_field(context, field)?;
        }
    }

    loop {
        match context.form.submit(&mut context.store) {
            Ok(outcome) => return Ok(Some(outcome)),
            Err(LedgerError::Validation(errors)) if context.is_interactive() => {
                for error in errors.iter() {
                    io::print_warning(format!("{}: {}", error.field.label(), error.message));
                }
                if !io::confirm_action(&context.theme, "Correct these fields?", true)? {
                    return Ok(None);
                }
                for error in errors.iter() {
                    prompt_field(context, error.field)?;
                }
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn prompt_field(context: &mut ShellContext, field: FieldKey) -> CommandResult {
    let current = context.form.fields().get(field).to_string();
    let value = match field {
        FieldKey::PaymentMethod => {
            let methods = context.form.catalog().methods();
            let labels: Vec<String> = methods.iter().map(|method| method.label().to_string()).collect();
            let default = methods
                .iter()
                .position(|method| method.code() == current)
                .unwrap_or(0);
            let choice = io::select_option(&context.theme, field.label(), &labels, default)?;
            methods
                .get(choice)
                .map(|method| method.code().to_string())
                .unwrap_or(current)
        }
        FieldKey::Date => io::prompt_text(&context.theme, "Date (YYYY-MM-DD)", &current)?,
        _ => io::prompt_text(&context.theme, field.label(), &current)?,
    };
    context.form.set_field(field, value)?;
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = parse_entry_id(args.first(), DELETE_USAGE)?;
    if context.is_interactive()
        && context.store.get(id).is_some()
        && !io::confirm_action(&context.theme, &format!("Delete entry {id}?"), false)?
    {
        io::print_info("Operation cancelled.");
        return Ok(());
    }

    match context.store.remove(id) {
        Some(entry) => io::print_success(format!(
            "Deleted entry {id} ({}, {}).",
            entry.category,
            format_amount(&context.config, entry.amount)
        )),
        None => io::print_warning(format!("Entry {id} not found; nothing deleted.")),
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.store.is_empty() {
        io::print_info("No entries recorded yet. Use `add` to create one.");
        return Ok(());
    }

    let entries = context.view();
    if !context.query.is_identity() {
        io::print_info(format!("View: {}", view::describe(&context.query)));
    }
    if entries.is_empty() {
        io::print_info("No entries match the current view.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        TableColumn::new("ID", Alignment::Right),
        TableColumn::new("Date", Alignment::Left),
        TableColumn::new("Category", Alignment::Left).max_width(20),
        TableColumn::new("Description", Alignment::Left).max_width(32),
        TableColumn::new("Amount", Alignment::Right),
        TableColumn::new("Payment", Alignment::Left),
    ]);
    for entry in &entries {
        table.push_row(vec![
            entry.id.to_string(),
            format_date(entry.date),
            entry.category.clone(),
            entry.description.clone(),
            format_amount(&context.config, entry.amount),
            entry.payment_method.label().to_string(),
        ]);
    }
    println!("{}", table.render());

    let total: f64 = entries.iter().map(|entry| entry.amount).sum();
    io::print_info(format!(
        "{} of {} entries, total {}",
        entries.len(),
        context.store.len(),
        format_amount(&context.config, total)
    ));
    Ok(())
}
