use std::fmt;

/// Identifies a column's concrete kind together with its declared ancestry.
///
/// Kinds specialize more general kinds: an auto-increment key is also an
/// integer, an e-mail address is also a string. `extends` lists the ancestors
/// from the nearest to the root, so [`TypeTag::ancestry`] yields the concrete
/// kind first and the most general kind last. Renderers walk that chain and use
/// the first kind that has a rule.
///
/// ```
/// use tabula_core::schema::TypeTag;
///
/// let email = TypeTag::new("email").extends(&TypeTag::string());
/// assert_eq!(email.ancestry().collect::<Vec<_>>(), ["email", "string"]);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "serde_repr::TypeTagRepr")
)]
pub struct TypeTag {
    name: String,
    extends: Vec<String>,
}

/// Built-in kinds and their ancestors, nearest first.
const BUILTIN: &[(&str, &[&str])] = &[
    (TypeTag::INT, &[]),
    (TypeTag::AUTO_INC, &[TypeTag::INT]),
    (TypeTag::BOOL, &[TypeTag::INT]),
    (TypeTag::FLOAT, &[]),
    (TypeTag::DECIMAL, &[TypeTag::FLOAT]),
    (TypeTag::STRING, &[]),
    (TypeTag::CHAR, &[TypeTag::STRING]),
    (TypeTag::TEXT, &[TypeTag::STRING]),
    (TypeTag::ENUM, &[]),
    (TypeTag::CREATED_AT, &[TypeTag::CHAR, TypeTag::STRING]),
    (TypeTag::DATE, &[]),
    (TypeTag::TIME, &[]),
    (TypeTag::TIMESTAMP, &[]),
    (TypeTag::DATETIME, &[TypeTag::TIMESTAMP]),
    (TypeTag::OBJECT, &[]),
    (TypeTag::OBJECT_SELECT, &[TypeTag::OBJECT]),
    (TypeTag::FILES, &[TypeTag::OBJECT]),
    ("email", &[TypeTag::STRING]),
    ("url", &[TypeTag::STRING]),
    ("token", &[TypeTag::CHAR, TypeTag::STRING]),
];

impl TypeTag {
    pub const INT: &'static str = "int";
    pub const AUTO_INC: &'static str = "auto_inc";
    pub const BOOL: &'static str = "bool";
    pub const FLOAT: &'static str = "float";
    pub const DECIMAL: &'static str = "decimal";
    pub const STRING: &'static str = "string";
    pub const CHAR: &'static str = "char";
    pub const TEXT: &'static str = "text";
    pub const ENUM: &'static str = "enum";
    pub const CREATED_AT: &'static str = "created_at";
    pub const DATE: &'static str = "date";
    pub const TIME: &'static str = "time";
    pub const TIMESTAMP: &'static str = "timestamp";
    pub const DATETIME: &'static str = "datetime";
    pub const OBJECT: &'static str = "object";
    pub const OBJECT_SELECT: &'static str = "object_select";
    pub const FILES: &'static str = "files";

    /// Creates a tag for `name`. Built-in kinds receive their built-in
    /// ancestry; any other name starts without ancestors.
    pub fn new(name: impl Into<String>) -> TypeTag {
        let name = name.into();
        let extends = BUILTIN
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .map(|(_, extends)| extends.iter().map(|s| s.to_string()).collect())
            .unwrap_or_default();

        TypeTag { name, extends }
    }

    /// Declares `parent` (and, transitively, its ancestry) as the ancestry of
    /// this kind, replacing any previous ancestry.
    pub fn extends(mut self, parent: &TypeTag) -> TypeTag {
        self.extends = parent.ancestry().map(str::to_string).collect();
        self
    }

    /// The concrete kind.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The concrete kind followed by its ancestors, most specific first.
    pub fn ancestry(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.name.as_str()).chain(self.extends.iter().map(String::as_str))
    }

    /// Returns `true` if this kind is `name` or specializes it.
    pub fn is_a(&self, name: &str) -> bool {
        self.ancestry().any(|kind| kind == name)
    }

    /// The names of all built-in kinds.
    pub fn builtins() -> impl Iterator<Item = TypeTag> {
        BUILTIN.iter().map(|(name, _)| TypeTag::new(*name))
    }

    pub fn int() -> TypeTag {
        TypeTag::new(Self::INT)
    }

    pub fn auto_inc() -> TypeTag {
        TypeTag::new(Self::AUTO_INC)
    }

    pub fn bool() -> TypeTag {
        TypeTag::new(Self::BOOL)
    }

    pub fn float() -> TypeTag {
        TypeTag::new(Self::FLOAT)
    }

    pub fn decimal() -> TypeTag {
        TypeTag::new(Self::DECIMAL)
    }

    pub fn string() -> TypeTag {
        TypeTag::new(Self::STRING)
    }

    pub fn char() -> TypeTag {
        TypeTag::new(Self::CHAR)
    }

    pub fn text() -> TypeTag {
        TypeTag::new(Self::TEXT)
    }

    pub fn enumeration() -> TypeTag {
        TypeTag::new(Self::ENUM)
    }

    pub fn created_at() -> TypeTag {
        TypeTag::new(Self::CREATED_AT)
    }

    pub fn date() -> TypeTag {
        TypeTag::new(Self::DATE)
    }

    pub fn time() -> TypeTag {
        TypeTag::new(Self::TIME)
    }

    pub fn timestamp() -> TypeTag {
        TypeTag::new(Self::TIMESTAMP)
    }

    pub fn datetime() -> TypeTag {
        TypeTag::new(Self::DATETIME)
    }

    pub fn object() -> TypeTag {
        TypeTag::new(Self::OBJECT)
    }

    pub fn object_select() -> TypeTag {
        TypeTag::new(Self::OBJECT_SELECT)
    }

    pub fn files() -> TypeTag {
        TypeTag::new(Self::FILES)
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        list.entries(self.ancestry());
        list.finish()
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(feature = "serde")]
mod serde_repr {
    use super::TypeTag;

    /// A tag is written either as a bare kind name, or as a table naming the
    /// kind and its ancestors.
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    pub(super) enum TypeTagRepr {
        Name(String),
        Full {
            name: String,
            #[serde(default)]
            extends: Vec<String>,
        },
    }

    impl From<TypeTagRepr> for TypeTag {
        fn from(repr: TypeTagRepr) -> TypeTag {
            match repr {
                TypeTagRepr::Name(name) => TypeTag::new(name),
                TypeTagRepr::Full { name, extends } if extends.is_empty() => TypeTag::new(name),
                TypeTagRepr::Full { name, extends } => TypeTag { name, extends },
            }
        }
    }
}
