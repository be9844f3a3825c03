mod rules;

use crate::render::{ColumnCx, ColumnFragment};

use indexmap::IndexMap;
use std::{fmt, sync::OnceLock};
use tabula_core::{
    schema::{Column, TypeTag},
    Error, Result,
};

/// Renders one column of a given kind.
///
/// Returns `Ok(None)` when the kind has no physical column.
pub type RenderFn = fn(&ColumnCx<'_>, &Column) -> Result<Option<ColumnFragment>>;

/// A rendering rule registered for one column kind.
#[derive(Clone)]
pub struct TypeRule {
    name: String,
    render: RenderFn,
    stored: bool,
}

impl TypeRule {
    pub fn new(name: impl Into<String>, render: RenderFn) -> TypeRule {
        TypeRule {
            name: name.into(),
            render,
            stored: true,
        }
    }

    /// A rule for a kind that never has a column in the database.
    pub fn unstored(name: impl Into<String>, render: RenderFn) -> TypeRule {
        TypeRule {
            stored: false,
            ..TypeRule::new(name, render)
        }
    }

    /// The kind this rule is registered for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether columns of this kind are stored in the table. Known without
    /// rendering, so without resolving references.
    pub fn is_stored(&self) -> bool {
        self.stored
    }

    pub fn render(&self, cx: &ColumnCx<'_>, column: &Column) -> Result<Option<ColumnFragment>> {
        (self.render)(cx, column)
    }
}

impl fmt::Debug for TypeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRule")
            .field("name", &self.name)
            .field("stored", &self.stored)
            .finish()
    }
}

/// Maps column kinds to their rendering rules.
///
/// Lookup walks a column's [`TypeTag::ancestry`] from the concrete kind to the
/// most general one and picks the first kind with a rule, so a specialized
/// kind without its own rule renders exactly like its nearest ancestor.
///
/// ```
/// use tabula_core::schema::{Column, TypeTag};
/// use tabula_sql::Registry;
///
/// let column = Column::new("email", TypeTag::new("email"));
/// let rule = Registry::global().resolve(&column).unwrap();
/// assert_eq!(rule.name(), "string");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    rules: IndexMap<String, TypeRule>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Registry {
        Registry::default()
    }

    /// A registry holding the rules for every built-in kind.
    pub fn builtin() -> Registry {
        let mut registry = Registry::new();
        rules::register(&mut registry);
        registry
    }

    /// The process-wide registry of built-in rules. Built on first use and
    /// never mutated afterwards.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::builtin)
    }

    /// Registers `render` for `kind`, replacing any rule already registered
    /// for it.
    pub fn register(&mut self, kind: impl Into<String>, render: RenderFn) -> &mut Self {
        let kind = kind.into();
        self.rules.insert(kind.clone(), TypeRule::new(kind, render));
        self
    }

    /// Registers `render` for a kind without a physical column, replacing any
    /// rule already registered for it.
    pub fn register_unstored(&mut self, kind: impl Into<String>, render: RenderFn) -> &mut Self {
        let kind = kind.into();
        self.rules
            .insert(kind.clone(), TypeRule::unstored(kind, render));
        self
    }

    /// The rule registered for exactly `kind`, without ancestry fallback.
    pub fn get(&self, kind: &str) -> Option<&TypeRule> {
        self.rules.get(kind)
    }

    /// Rules in registration order.
    pub fn rules(&self) -> impl Iterator<Item = &TypeRule> + '_ {
        self.rules.values()
    }

    /// The most specific rule for `ty`, if any kind in its ancestry has one.
    pub fn lookup(&self, ty: &TypeTag) -> Option<&TypeRule> {
        ty.ancestry().find_map(|kind| self.rules.get(kind))
    }

    /// The most specific rule for the column's kind.
    pub fn resolve(&self, column: &Column) -> Result<&TypeRule> {
        self.lookup(&column.ty)
            .ok_or_else(|| Error::unsupported_column_type(column.ty.name(), &column.name))
    }
}
