//! Ledger state, derived views, and entry validation.

pub mod forms;
pub mod ledger_store;
pub mod services;
pub mod time;

pub use forms::{EntryFormController, EntryFormInput, FieldKey, FormState, SubmitOutcome};
pub use ledger_store::LedgerStore;
pub use time::{Clock, SystemClock};
