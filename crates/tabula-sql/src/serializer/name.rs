use super::{Formatter, ToSql};

use crate::stmt;

impl ToSql for &stmt::Name {
    fn to_sql(self, f: &mut Formatter<'_>) {
        f.dst.push_str(self.as_str());
    }
}
