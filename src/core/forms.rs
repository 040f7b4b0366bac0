//! Entry form: field validation plus the create/edit lifecycle.
//!
//! Raw field values come from the presentation layer as strings. The
//! controller validates them, normalizes the date, and only then hands a
//! draft to the [`LedgerStore`]. A failed submit keeps the typed values so
//! the user can correct them.

use std::fmt;

use chrono::NaiveDate;
use tracing::{debug, trace};

use crate::core::ledger_store::LedgerStore;
use crate::domain::{EntryDraft, EntryId, LedgerEntry, PaymentMethodCatalog};
use crate::errors::LedgerError;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// Form fields, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Date,
    Category,
    Description,
    Amount,
    PaymentMethod,
}

impl FieldKey {
    pub const ALL: [FieldKey; 5] = [
        FieldKey::Date,
        FieldKey::Category,
        FieldKey::Description,
        FieldKey::Amount,
        FieldKey::PaymentMethod,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FieldKey::Date => "date",
            FieldKey::Category => "category",
            FieldKey::Description => "description",
            FieldKey::Amount => "amount",
            FieldKey::PaymentMethod => "payment",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldKey::Date => "Date",
            FieldKey::Category => "Category",
            FieldKey::Description => "Description",
            FieldKey::Amount => "Amount",
            FieldKey::PaymentMethod => "Payment method",
        }
    }

    /// Accepts the field key plus a few aliases (`method`, `paymentMethod`, `desc`).
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "date" => Some(FieldKey::Date),
            "category" | "cat" => Some(FieldKey::Category),
            "description" | "desc" => Some(FieldKey::Description),
            "amount" => Some(FieldKey::Amount),
            "payment" | "method" | "paymentmethod" | "payment_method" => {
                Some(FieldKey::PaymentMethod)
            }
            _ => None,
        }
    }

    fn missing_message(self) -> &'static str {
        match self {
            FieldKey::Date => "Please select the date",
            FieldKey::Category => "Please input the category",
            FieldKey::Description => "Please input the description",
            FieldKey::Amount => "Please input the amount",
            FieldKey::PaymentMethod => "Please select the payment method",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FieldKey,
    pub message: String,
}

impl FieldError {
    pub fn new(field: FieldKey, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field error found in one submit, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn for_field(&self, field: FieldKey) -> Option<&FieldError> {
        self.errors.iter().find(|error| error.field == field)
    }

    fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    fn sort_by_field(&mut self) {
        self.errors.sort_by_key(|error| {
            FieldKey::ALL
                .iter()
                .position(|field| *field == error.field)
                .unwrap_or(FieldKey::ALL.len())
        });
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw, unvalidated field values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFormInput {
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: String,
    pub payment_method: String,
}

impl EntryFormInput {
    /// Pre-populates the fields from a stored entry.
    pub fn from_entry(entry: &LedgerEntry) -> Self {
        Self {
            date: entry.date_label(),
            category: entry.category.clone(),
            description: entry.description.clone(),
            amount: entry.amount.to_string(),
            payment_method: entry.payment_method.code().to_string(),
        }
    }

    pub fn get(&self, field: FieldKey) -> &str {
        match field {
            FieldKey::Date => &self.date,
            FieldKey::Category => &self.category,
            FieldKey::Description => &self.description,
            FieldKey::Amount => &self.amount,
            FieldKey::PaymentMethod => &self.payment_method,
        }
    }

    pub fn set(&mut self, field: FieldKey, value: impl Into<String>) {
        let value = value.into();
        match field {
            FieldKey::Date => self.date = value,
            FieldKey::Category => self.category = value,
            FieldKey::Description => self.description = value,
            FieldKey::Amount => self.amount = value,
            FieldKey::PaymentMethod => self.payment_method = value,
        }
    }
}

/// Parses a calendar date in one of the accepted layouts.
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
}

fn parse_amount(input: &str) -> Result<f64, &'static str> {
    let value = input
        .trim()
        .parse::<f64>()
        .map_err(|_| "Enter a numeric value")?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err("Amount must be a finite number")
    }
}

/// Trimmed raw value, or `None` after recording a missing-field error.
fn required<'a>(
    input: &'a EntryFormInput,
    field: FieldKey,
    errors: &mut ValidationErrors,
) -> Option<&'a str> {
    let raw = input.get(field).trim();
    if raw.is_empty() {
        errors.push(FieldError::new(field, field.missing_message()));
        None
    } else {
        Some(raw)
    }
}

/// Validates every field and builds a draft with the date normalized.
pub fn validate(
    input: &EntryFormInput,
    catalog: &PaymentMethodCatalog,
) -> Result<EntryDraft, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let date = required(input, FieldKey::Date, &mut errors)
        .map(|raw| parse_date(raw).ok_or("Use YYYY-MM-DD format"));
    let category = required(input, FieldKey::Category, &mut errors);
    let description = required(input, FieldKey::Description, &mut errors);
    let amount = required(input, FieldKey::Amount, &mut errors).map(parse_amount);
    let method = required(input, FieldKey::PaymentMethod, &mut errors).map(|raw| {
        catalog.resolve(raw).ok_or_else(|| {
            format!(
                "Unknown payment method `{raw}`; expected one of: {}",
                catalog.codes().join(", ")
            )
        })
    });

    let date = match date {
        Some(Ok(date)) => Some(date),
        Some(Err(message)) => {
            errors.push(FieldError::new(FieldKey::Date, message));
            None
        }
        None => None,
    };
    let amount = match amount {
        Some(Ok(amount)) => Some(amount),
        Some(Err(message)) => {
            errors.push(FieldError::new(FieldKey::Amount, message));
            None
        }
        None => None,
    };
    let method = match method {
        Some(Ok(method)) => Some(method),
        Some(Err(message)) => {
            errors.push(FieldError::new(FieldKey::PaymentMethod, message));
            None
        }
        None => None,
    };

    match (date, category, description, amount, method) {
        (Some(date), Some(category), Some(description), Some(amount), Some(method)) => {
            Ok(EntryDraft::new(date, category, description, amount, method))
        }
        _ => {
            errors.sort_by_field();
            Err(errors)
        }
    }
}

/// Lifecycle of the entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    Closed,
    OpenForCreate,
    OpenForEdit { id: EntryId },
    /// Transient state while a submit is being checked.
    Validating { target: Option<EntryId> },
}

impl FormState {
    fn reopened(target: Option<EntryId>) -> Self {
        match target {
            Some(id) => FormState::OpenForEdit { id },
            None => FormState::OpenForCreate,
        }
    }
}

/// Result of a successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(EntryId),
    Updated(EntryId),
}

impl SubmitOutcome {
    pub fn id(self) -> EntryId {
        match self {
            SubmitOutcome::Created(id) | SubmitOutcome::Updated(id) => id,
        }
    }
}

/// Drives the create/edit form and commits valid drafts to the store.
#[derive(Debug, Clone)]
pub struct EntryFormController {
    state: FormState,
    fields: EntryFormInput,
    errors: ValidationErrors,
    catalog: PaymentMethodCatalog,
}

impl Default for EntryFormController {
    fn default() -> Self {
        Self::new(PaymentMethodCatalog::default())
    }
}

impl EntryFormController {
    pub fn new(catalog: PaymentMethodCatalog) -> Self {
        Self {
            state: FormState::Closed,
            fields: EntryFormInput::default(),
            errors: ValidationErrors::default(),
            catalog,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(
            self.state,
            FormState::OpenForCreate | FormState::OpenForEdit { .. }
        )
    }

    pub fn fields(&self) -> &EntryFormInput {
        &self.fields
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn catalog(&self) -> &PaymentMethodCatalog {
        &self.catalog
    }

    /// Opens an empty form for a new entry.
    pub fn open_create(&mut self) {
        self.fields = EntryFormInput::default();
        self.errors = ValidationErrors::default();
        self.transition(FormState::OpenForCreate);
    }

    /// Opens the form pre-populated with `entry`; submit keeps its id.
    pub fn open_edit(&mut self, entry: &LedgerEntry) {
        self.fields = EntryFormInput::from_entry(entry);
        self.errors = ValidationErrors::default();
        self.transition(FormState::OpenForEdit { id: entry.id });
    }

    pub fn set_field(
        &mut self,
        field: FieldKey,
        value: impl Into<String>,
    ) -> Result<(), LedgerError> {
        if !self.is_open() {
            return Err(LedgerError::FormClosed);
        }
        self.fields.set(field, value);
        Ok(())
    }

    /// Validates the fields and commits them. On validation failure the form
    /// stays open with the typed values and per-field errors.
    pub fn submit(
        &mut self,
        store: &mut LedgerStore,
    ) -> Result<SubmitOutcome, LedgerError> {
        let target = match self.state {
            FormState::OpenForCreate => None,
            FormState::OpenForEdit { id } => Some(id),
            FormState::Closed | FormState::Validating { .. } => {
                return Err(LedgerError::FormClosed)
            }
        };
        self.transition(FormState::Validating { target });

        let draft = match validate(&self.fields, &self.catalog) {
            Ok(draft) => draft,
            Err(errors) => {
                debug!(failures = errors.len(), "entry form rejected");
                self.errors = errors.clone();
                self.transition(FormState::reopened(target));
                return Err(LedgerError::Validation(errors));
            }
        };

        let outcome = match target {
            None => SubmitOutcome::Created(store.add(draft)),
            Some(id) => {
                if let Err(err) = store.update(id, draft.with_id(id)) {
                    self.transition(FormState::reopened(target));
                    return Err(err);
                }
                SubmitOutcome::Updated(id)
            }
        };
        self.reset();
        Ok(outcome)
    }

    /// Discards the typed values and closes the form.
    pub fn cancel(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.fields = EntryFormInput::default();
        self.errors = ValidationErrors::default();
        self.transition(FormState::Closed);
    }

    fn transition(&mut self, next: FormState) {
        trace!(from = ?self.state, to = ?next, "entry form transition");
        self.state = next;
    }
}
