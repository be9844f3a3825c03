/// A secondary index declared alongside a table's columns.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Index {
    /// Indexed column names, in index order.
    pub columns: Vec<String>,

    /// Marks the index as a full-text index.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fulltext: bool,

    /// Index method, passed through verbatim (e.g. `BTREE`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub using: Option<String>,
}

impl Index {
    pub fn new<I, S>(columns: I) -> Index
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Index {
            columns: columns.into_iter().map(Into::into).collect(),
            fulltext: false,
            using: None,
        }
    }

    pub fn fulltext(mut self, fulltext: bool) -> Self {
        self.fulltext = fulltext;
        self
    }

    pub fn using(mut self, using: impl Into<String>) -> Self {
        self.using = Some(using.into());
        self
    }
}
