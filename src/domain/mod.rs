//! Pure domain models for the expense ledger. No I/O.

pub mod common;
pub mod entry;
pub mod payment_method;

pub use common::{DateRange, YearMonth};
pub use entry::{EntryDraft, EntryId, LedgerEntry};
pub use payment_method::{PaymentMethod, PaymentMethodCatalog};
