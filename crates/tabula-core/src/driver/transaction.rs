/// Tracks whether a transaction is open and decides which control statement,
/// if any, must be sent to the database.
///
/// Nested `begin` calls while a transaction is open are no-ops, as are
/// `commit` and `rollback` when none is open. Drivers execute the returned
/// SQL and ignore `None`.
#[derive(Debug, Default)]
pub struct TransactionGuard {
    open: bool,
}

impl TransactionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns `BEGIN` when no transaction is open.
    pub fn begin(&mut self) -> Option<&'static str> {
        if self.open {
            return None;
        }
        self.open = true;
        Some("BEGIN")
    }

    /// Returns `COMMIT` when a transaction is open.
    pub fn commit(&mut self) -> Option<&'static str> {
        self.close("COMMIT")
    }

    /// Returns `ROLLBACK` when a transaction is open.
    pub fn rollback(&mut self) -> Option<&'static str> {
        self.close("ROLLBACK")
    }

    fn close(&mut self, sql: &'static str) -> Option<&'static str> {
        if !self.open {
            return None;
        }
        self.open = false;
        Some(sql)
    }

    /// Restores the guard after the statement it returned failed, so a
    /// failed `BEGIN` does not leave the guard believing a transaction is
    /// open.
    pub fn reset(&mut self, open: bool) {
        self.open = open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_begin_is_a_no_op() {
        let mut guard = TransactionGuard::new();
        assert_eq!(guard.begin(), Some("BEGIN"));
        assert_eq!(guard.begin(), None);
        assert!(guard.is_open());
        assert_eq!(guard.commit(), Some("COMMIT"));
        assert!(!guard.is_open());
    }

    #[test]
    fn close_without_transaction_is_a_no_op() {
        let mut guard = TransactionGuard::new();
        assert_eq!(guard.commit(), None);
        assert_eq!(guard.rollback(), None);

        guard.begin();
        assert_eq!(guard.rollback(), Some("ROLLBACK"));
        assert_eq!(guard.rollback(), None);
    }
}
