/// Storage types that appear in `CREATE TABLE` column definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    /// The integer type of a row id alias, `INTEGER`.
    RowId,

    /// A sized integer
    Integer { size: IntegerSize, unsigned: bool },

    /// A floating point number
    Float { unsigned: bool },

    /// Fixed-point decimal, `(precision, scale)` when constrained.
    Numeric(Option<(u32, u32)>),

    /// Fixed-length character data with an optional length
    Char(Option<u64>),

    /// Variable-length character data with an optional maximum length
    VarChar(Option<u64>),

    /// Text with an optional maximum length
    Text(Option<u64>),

    /// Binary data with an optional maximum length
    Blob(Option<u64>),

    Date,

    Time,

    /// Date and time with fractional seconds precision.
    DateTime(u8),

    /// Timestamp with fractional seconds precision.
    Timestamp(u8),
}

/// Integer widths, named after the keyword qualifier each one renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegerSize {
    Tiny,
    Medium,
    Regular,
    Big,
}

impl IntegerSize {
    /// Maps a byte width to an integer size. Only 1, 2, 4 and 8 are valid.
    pub fn from_bytes(bytes: u8) -> Option<IntegerSize> {
        match bytes {
            1 => Some(IntegerSize::Tiny),
            2 => Some(IntegerSize::Medium),
            4 => Some(IntegerSize::Regular),
            8 => Some(IntegerSize::Big),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            IntegerSize::Tiny => "TINYINT",
            IntegerSize::Medium => "MEDIUMINT",
            IntegerSize::Regular => "INT",
            IntegerSize::Big => "BIGINT",
        }
    }
}
