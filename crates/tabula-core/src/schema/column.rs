use super::TypeTag;

/// An engine-independent description of one table column.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Column {
    /// The name of the column in the database.
    pub name: String,

    /// The column kind, with its ancestry.
    pub ty: TypeTag,

    /// Storage width in bytes, for integer kinds. Defaults to 4 when unset.
    pub size: Option<u8>,

    /// Maximum length in characters, for string kinds.
    pub max_length: Option<u64>,

    /// Whether NULL is rejected.
    pub not_null: bool,

    /// Literal default value, quoted when rendered.
    pub default: Option<String>,

    /// Whether a numeric column is unsigned.
    pub unsigned: bool,

    /// True if the column is part of the table's primary key.
    pub primary_key: bool,

    /// True if the column carries its own unique constraint.
    pub unique: bool,

    /// Store character data as a binary blob.
    pub binary: bool,

    /// Name of the referenced table, for relational kinds.
    pub references: Option<String>,

    /// Allowed values of an enumeration, in declaration order.
    pub enum_values: Vec<String>,

    /// Digits of a fixed-point decimal.
    pub digits: Option<Digits>,

    /// Sub-second precision of temporal kinds, in digits.
    pub millis: Option<u8>,
}

/// Digits before and after the decimal point of a fixed-point column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Digits {
    pub before: u8,
    pub after: u8,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: TypeTag) -> Column {
        Column {
            name: name.into(),
            ty,
            size: None,
            max_length: None,
            not_null: false,
            default: None,
            unsigned: false,
            primary_key: false,
            unique: false,
            binary: false,
            references: None,
            enum_values: vec![],
            digits: None,
            millis: None,
        }
    }

    /// Integer width in bytes.
    pub fn size(mut self, bytes: u8) -> Self {
        self.size = Some(bytes);
        self
    }

    pub fn max_length(mut self, max: u64) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn not_null(mut self, not_null: bool) -> Self {
        self.not_null = not_null;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn unsigned(mut self, unsigned: bool) -> Self {
        self.unsigned = unsigned;
        self
    }

    pub fn primary_key(mut self, primary_key: bool) -> Self {
        self.primary_key = primary_key;
        self
    }

    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    pub fn binary(mut self, binary: bool) -> Self {
        self.binary = binary;
        self
    }

    pub fn references(mut self, table: impl Into<String>) -> Self {
        self.references = Some(table.into());
        self
    }

    pub fn enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn digits(mut self, before: u8, after: u8) -> Self {
        self.digits = Some(Digits { before, after });
        self
    }

    pub fn millis(mut self, millis: u8) -> Self {
        self.millis = Some(millis);
        self
    }
}

#[cfg(feature = "serde")]
impl Default for Column {
    fn default() -> Column {
        Column::new("", TypeTag::string())
    }
}
