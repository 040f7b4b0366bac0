//! Payment methods accepted by the ledger.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(into = "String", from = "String")]
/// How an entry was paid for. Serialized as its bare code.
///
/// The built-in variants cover the common cases. `Other` carries a code that
/// must be registered in a [`PaymentMethodCatalog`] before the form accepts it.
pub enum PaymentMethod {
    Cash,
    CreditCard,
    Transfer,
    Other(String),
}

impl PaymentMethod {
    pub const BUILT_IN: [PaymentMethod; 3] = [
        PaymentMethod::Cash,
        PaymentMethod::CreditCard,
        PaymentMethod::Transfer,
    ];

    /// Stable machine code, e.g. `creditCard`.
    pub fn code(&self) -> &str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::CreditCard => "creditCard",
            PaymentMethod::Transfer => "transfer",
            PaymentMethod::Other(code) => code,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::CreditCard => "Credit card",
            PaymentMethod::Transfer => "Transfer",
            PaymentMethod::Other(code) => code,
        }
    }

    fn built_in(code: &str) -> Option<Self> {
        match normalize_code(code).as_str() {
            "cash" => Some(PaymentMethod::Cash),
            "creditcard" | "card" => Some(PaymentMethod::CreditCard),
            "transfer" | "banktransfer" => Some(PaymentMethod::Transfer),
            _ => None,
        }
    }
}

impl From<PaymentMethod> for String {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Other(code) => code,
            built_in => built_in.code().to_string(),
        }
    }
}

impl From<String> for PaymentMethod {
    fn from(code: String) -> Self {
        PaymentMethod::built_in(&code).unwrap_or(PaymentMethod::Other(code))
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn normalize_code(code: &str) -> String {
    code.trim()
        .chars()
        .filter(|ch| !matches!(ch, '-' | '_' | ' '))
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// Registry of payment methods the form will accept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentMethodCatalog {
    extra: Vec<String>,
}

impl PaymentMethodCatalog {
    /// Catalog with the built-in methods plus `extra` custom codes.
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self::default();
        for code in extra {
            catalog.register(code);
        }
        catalog
    }

    /// Registers a custom code. Blank codes, built-in aliases, and duplicates are ignored.
    pub fn register(&mut self, code: impl Into<String>) -> bool {
        let code = code.into().trim().to_string();
        if code.is_empty() || PaymentMethod::built_in(&code).is_some() {
            return false;
        }
        let normalized = normalize_code(&code);
        if self.extra.iter().any(|known| normalize_code(known) == normalized) {
            return false;
        }
        self.extra.push(code);
        true
    }

    /// Resolves user input to a payment method, matching codes case-insensitively
    /// and ignoring `-`, `_`, and spaces.
    pub fn resolve(&self, input: &str) -> Option<PaymentMethod> {
        if let Some(method) = PaymentMethod::built_in(input) {
            return Some(method);
        }
        let normalized = normalize_code(input);
        self.extra
            .iter()
            .find(|code| normalize_code(code) == normalized)
            .map(|code| PaymentMethod::Other(code.clone()))
    }

    /// Every accepted method, built-ins first.
    pub fn methods(&self) -> Vec<PaymentMethod> {
        PaymentMethod::BUILT_IN
            .iter()
            .cloned()
            .chain(self.extra.iter().cloned().map(PaymentMethod::Other))
            .collect()
    }

    pub fn codes(&self) -> Vec<String> {
        self.methods()
            .iter()
            .map(|method| method.code().to_string())
            .collect()
    }
}
