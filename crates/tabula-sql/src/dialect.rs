//! SQLite spellings of portable expressions.

use std::time::{SystemTime, UNIX_EPOCH};

/// A random integer.
pub fn random() -> &'static str {
    "RANDOM()"
}

/// String concatenation of `fields`.
///
/// ```
/// assert_eq!(tabula_sql::dialect::concat(["first", "' '", "last"]), "first || ' ' || last");
/// ```
pub fn concat<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ret = String::new();

    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            ret.push_str(" || ");
        }
        ret.push_str(field.as_ref());
    }

    ret
}

/// Seconds since the epoch of the date/time expression `expr`.
pub fn unix_timestamp(expr: &str) -> String {
    format!("strftime('%s', {expr})")
}

/// The date and time `secs` seconds after the epoch. Zero means now.
pub fn from_unixtime(secs: u64) -> String {
    let secs = if secs == 0 { now() } else { secs };
    format!("DATETIME({secs}, 'unixepoch')")
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}
