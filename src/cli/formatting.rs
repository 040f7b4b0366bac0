//! Display helpers for amounts and dates in the shell.

use chrono::NaiveDate;

use crate::config::Config;

fn symbol_for(code: &str) -> &str {
    match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "AUD" => "A$",
        other => other,
    }
}

/// `(grouping, decimal)` separators for a locale tag.
fn separators_for(locale: &str) -> (char, char) {
    let language = locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match language.as_str() {
        "de" | "es" | "it" | "pt" | "nl" | "id" | "tr" => ('.', ','),
        _ => (',', '.'),
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats `amount` with the configured currency, precision, and locale separators.
pub fn format_amount(config: &Config, amount: f64) -> String {
    let (grouping, decimal) = separators_for(&config.locale);
    let body = format!("{:.*}", config.currency_precision as usize, amount.abs());
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body.as_str(), None),
    };
    let mut number = group_digits(int_part, grouping);
    if let Some(frac) = frac_part {
        number.push(decimal);
        number.push_str(frac);
    }
    let sign = if amount < 0.0 && body.chars().any(|ch| ch != '0' && ch != '.') {
        "-"
    } else {
        ""
    };
    format!("{sign}{}{number}", symbol_for(&config.currency))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_amounts_with_grouping() {
        let config = Config::default();
        assert_eq!(format_amount(&config, 1234567.891), "$1,234,567.89");
        assert_eq!(format_amount(&config, -20.0), "-$20.00");
        assert_eq!(format_amount(&config, -0.001), "$0.00");
    }

    #[test]
    fn honours_locale_and_precision() {
        let config = Config {
            locale: "de-DE".into(),
            currency: "EUR".into(),
            currency_precision: 1,
            ..Config::default()
        };
        assert_eq!(format_amount(&config, 1500.26), "€1.500,3");
        let config = Config {
            currency: "CHF".into(),
            currency_precision: 0,
            ..Config::default()
        };
        assert_eq!(format_amount(&config, 999.0), "CHF999");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(0.25), "25.0%");
    }
}
