use regex::Regex;
use std::sync::LazyLock;

pub type Validator = fn(&str) -> Result<(), String>;

static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d{1,2})?$").expect("amount pattern compiles"));

pub fn required(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err("This field is required".to_string())
    } else {
        Ok(())
    }
}

/// A plain decimal with at most two fraction digits, greater than zero.
pub fn positive_amount(value: &str) -> Result<(), String> {
    let value = value.trim();
    if !AMOUNT_RE.is_match(value) {
        return Err("Enter an amount like 12 or 12.50".to_string());
    }
    match value.parse::<f64>() {
        Ok(amount) if amount > 0.0 => Ok(()),
        _ => Err("Amount must be greater than zero".to_string()),
    }
}

pub fn is_valid(validator: Validator, value: &str) -> bool {
    validator(value).is_ok()
}
