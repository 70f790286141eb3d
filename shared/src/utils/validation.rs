//! Input validation patterns used by request DTOs

use once_cell::sync::Lazy;
use regex::Regex;

/// Usernames are ASCII letters, digits and underscores
pub static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_]+$").unwrap()
});

/// Two-letter country codes, upper case
pub static COUNTRY_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z]{2}$").unwrap()
});
