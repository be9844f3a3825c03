//! String literal quoting.
//!
//! Every literal embedded in generated SQL goes through [`quote`]: the text is
//! wrapped in single quotes, backslashes and quotes are doubled, and NUL
//! characters are spliced in with a `char(0)` concatenation so the literal can
//! never be terminated early.

/// What a NUL character is replaced with inside a quoted literal.
pub const NUL_REPLACEMENT: &str = "'||char(0)||'";

/// Escapes `value` for use between single quotes, without adding them.
pub fn escape(value: &str) -> String {
    let mut ret = String::with_capacity(value.len());

    for ch in value.chars() {
        match ch {
            '\\' => ret.push_str("\\\\"),
            '\'' => ret.push_str("''"),
            '\0' => ret.push_str(NUL_REPLACEMENT),
            _ => ret.push(ch),
        }
    }

    ret
}

/// Quotes `value` as a SQL string literal.
///
/// ```
/// assert_eq!(tabula_sql::quote("it's"), "'it''s'");
/// assert_eq!(tabula_sql::quote("a\0b"), "'a'||char(0)||'b'");
/// ```
pub fn quote(value: &str) -> String {
    format!("'{}'", escape(value))
}

/// Reverses [`quote`]. Returns `None` when `literal` is not a literal that
/// `quote` could have produced.
pub fn unquote(literal: &str) -> Option<String> {
    let mut rest = literal.strip_prefix('\'')?.strip_suffix('\'')?;
    let mut ret = String::with_capacity(rest.len());

    while let Some(ch) = rest.chars().next() {
        if let Some(tail) = rest.strip_prefix(NUL_REPLACEMENT) {
            ret.push('\0');
            rest = tail;
            continue;
        }

        match ch {
            '\'' => {
                rest = rest.strip_prefix("''")?;
                ret.push('\'');
            }
            '\\' => {
                rest = rest.strip_prefix("\\\\")?;
                ret.push('\\');
            }
            _ => {
                ret.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
    }

    Some(ret)
}
