#![deny(rust_2018_idioms)]

pub mod table;
pub use table::{Cell, Row, Table};

pub mod read;
pub use read::function::{read, read_from};

pub mod merge;
pub use merge::function::merge;

pub mod dates;
pub use dates::function::normalize;

pub mod write;
pub use write::function::{write, write_to};

pub mod config;

pub mod run;
pub use run::function::run;

/// The columns holding the booking date and the value date of a transaction, in sort priority.
pub const DATE_COLUMNS: [&str; 2] = ["Buchungsdatum", "Wertstellung"];

/// Parse a number as written in German bank exports, like `-1.234,56`, into a decimal.
///
/// Thousands separators are optional, but if present every group after the first must have exactly three digits.
/// Integer parts with a leading zero, like `05012024`, are not considered numbers.
pub fn parse_number(
    number: &str,
    thousands_separator: char,
    decimal_separator: char,
) -> Option<rust_decimal::Decimal> {
    fn all_digits(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
    }
    let (negative, number) = match number.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, number),
    };
    let (integer, fraction) = match number.split_once(decimal_separator) {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (number, None),
    };

    let mut groups = integer.split(thousands_separator);
    let first = groups.next()?;
    let mut digits = first.to_owned();
    let mut grouped = false;
    for group in groups {
        if group.len() != 3 || !all_digits(group) {
            return None;
        }
        grouped = true;
        digits.push_str(group);
    }
    if !all_digits(first) || (grouped && first.len() > 3) {
        return None;
    }
    if first.starts_with('0') && (first.len() > 1 || grouped) {
        return None;
    }

    let mut canonical = String::with_capacity(digits.len() + 2);
    if negative {
        canonical.push('-');
    }
    canonical.push_str(&digits);
    if let Some(fraction) = fraction {
        if !all_digits(fraction) {
            return None;
        }
        canonical.push('.');
        canonical.push_str(fraction);
    }
    canonical.parse().ok()
}

/// Print `number` with `decimal_separator` and without thousands separators, keeping its scale.
pub fn format_number(number: &rust_decimal::Decimal, decimal_separator: char) -> String {
    let mut out = number.to_string();
    if decimal_separator != '.' {
        out = out.replace('.', decimal_separator.encode_utf8(&mut [0; 4]));
    }
    out
}
