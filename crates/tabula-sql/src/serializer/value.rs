use super::{Formatter, ToSql};

use crate::quote;

/// A string literal, quoted and escaped on output.
pub(super) struct Literal<'a>(pub(super) &'a str);

impl ToSql for Literal<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let quoted = quote::quote(self.0);

        // A literal containing NUL is a concatenation expression, which
        // SQLite only accepts as a default when parenthesized.
        if quoted.contains(quote::NUL_REPLACEMENT) {
            fmt!(f, "(" quoted.as_str() ")");
        } else {
            fmt!(f, quoted.as_str());
        }
    }
}
