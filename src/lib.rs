#![doc(test(attr(deny(warnings))))]

//! Ledger Core keeps an in-memory expense ledger and derives the views a
//! presentation layer needs: date-range and payment-method filtered tables,
//! amount ordering, and monthly category breakdowns for pie charts.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod utils;

pub use crate::core::{EntryFormController, LedgerStore};
pub use crate::errors::{LedgerError, Result};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Ledger Core tracing initialized.");
    });
}
