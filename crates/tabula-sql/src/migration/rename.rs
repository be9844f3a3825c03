use tabula_core::{Error, Result};

/// Rewrites a `CREATE TABLE` statement read back from the database so it
/// creates `to` instead of `from`. Any `IF NOT EXISTS` clause is dropped and
/// the rest of the statement is kept byte for byte.
pub(super) fn rename_table(ddl: &str, from: &str, to: &str) -> Result<String> {
    let mismatch = || {
        Error::invalid_statement(format!(
            "expected a definition of table `{from}`, got `{}`",
            ddl.trim()
        ))
    };

    let rest = keyword(ddl, "CREATE")
        .and_then(|rest| keyword(rest, "TABLE"))
        .ok_or_else(mismatch)?;

    let rest = keyword(rest, "IF")
        .and_then(|rest| keyword(rest, "NOT"))
        .and_then(|rest| keyword(rest, "EXISTS"))
        .unwrap_or(rest);

    let (name, rest) = table_name(rest).ok_or_else(mismatch)?;

    if name != from {
        return Err(mismatch());
    }

    Ok(format!("CREATE TABLE {to}{rest}"))
}

/// Strips the keyword `word` from the start of `s`, ignoring case and leading
/// whitespace.
fn keyword<'s>(s: &'s str, word: &str) -> Option<&'s str> {
    let s = s.trim_start();
    let head = s.get(..word.len())?;

    if !head.eq_ignore_ascii_case(word) {
        return None;
    }

    let rest = &s[word.len()..];

    match rest.chars().next() {
        Some(ch) if ch.is_alphanumeric() || ch == '_' => None,
        _ => Some(rest),
    }
}

/// Splits a possibly quoted table name off the start of `s`.
fn table_name(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();

    let close = match s.chars().next()? {
        '"' => '"',
        '`' => '`',
        '\'' => '\'',
        '[' => ']',
        _ => {
            let end = s
                .find(|ch: char| ch.is_whitespace() || ch == '(')
                .unwrap_or(s.len());
            return (end > 0).then(|| s.split_at(end));
        }
    };

    let inner = &s[1..];
    let end = inner.find(close)?;
    Some((&inner[..end], &inner[end + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renames() {
        let cases = [
            (
                "CREATE TABLE users (id INTEGER)",
                "CREATE TABLE zzz_temp_users (id INTEGER)",
            ),
            (
                "CREATE TABLE IF NOT EXISTS users (\nid INTEGER\n)",
                "CREATE TABLE zzz_temp_users (\nid INTEGER\n)",
            ),
            (
                "create table \"users\"(id INTEGER)",
                "CREATE TABLE zzz_temp_users(id INTEGER)",
            ),
            (
                "CREATE TABLE [users] (users_id INTEGER)",
                "CREATE TABLE zzz_temp_users (users_id INTEGER)",
            ),
        ];

        for (ddl, expect) in cases {
            assert_eq!(rename_table(ddl, "users", "zzz_temp_users").unwrap(), expect);
        }
    }

    #[test]
    fn only_the_table_name_is_rewritten() {
        let ddl = "CREATE TABLE users (users TEXT, FOREIGN KEY (users) REFERENCES users(id))";
        assert_eq!(
            rename_table(ddl, "users", "shadow").unwrap(),
            "CREATE TABLE shadow (users TEXT, FOREIGN KEY (users) REFERENCES users(id))"
        );
    }

    #[test]
    fn rejects_other_statements() {
        for ddl in [
            "CREATE TABLE accounts (id INTEGER)",
            "CREATE TABLE users_v2 (id INTEGER)",
            "CREATE INDEX users ON t(a)",
            "CREATE TABLEusers (id INTEGER)",
            "",
        ] {
            let err = rename_table(ddl, "users", "shadow").unwrap_err();
            assert!(err.is_invalid_statement(), "{ddl}");
        }
    }
}
