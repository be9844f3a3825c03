use crate::{
    registry::Registry,
    stmt::{ColumnDef, CreateTable, Name, TableConstraint},
    Serializer,
};

use tabula_core::{
    schema::{Column, Schema, Table},
    Error, Result,
};

/// Relational columns may point at keys that are themselves relational; this
/// bounds how far such a chain is followed.
const MAX_REFERENCE_DEPTH: usize = 16;

/// What a rule produces for one column: its definition, and the foreign key
/// clause a relational column adds to the owning table.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnFragment {
    pub def: ColumnDef,
    pub foreign_key: Option<TableConstraint>,
}

impl ColumnFragment {
    pub fn new(def: ColumnDef) -> ColumnFragment {
        ColumnFragment {
            def,
            foreign_key: None,
        }
    }

    pub fn foreign_key(mut self, constraint: TableConstraint) -> Self {
        self.foreign_key = Some(constraint);
        self
    }
}

/// Passed to every rule: the renderer, and the table owning the column.
#[derive(Debug, Clone, Copy)]
pub struct ColumnCx<'a> {
    pub renderer: &'a Renderer<'a>,
    pub table: &'a Table,
    depth: usize,
}

impl<'a> ColumnCx<'a> {
    pub fn table_name(&self) -> &'a str {
        &self.table.name
    }

    /// Looks up a table a column of this table refers to. A table may refer to
    /// itself without being part of the schema.
    pub fn referenced_table(&self, name: &str) -> Option<&'a Table> {
        if name == self.table.name {
            Some(self.table)
        } else {
            self.renderer.schema.table(name)
        }
    }

    /// Renders `column` of `table`, one reference deeper than this context.
    pub fn render_referenced(
        &self,
        table: &'a Table,
        column: &Column,
    ) -> Result<Option<ColumnFragment>> {
        if self.depth >= MAX_REFERENCE_DEPTH {
            return Err(Error::invalid_schema(format!(
                "reference chain through `{}.{}` is too deep",
                table.name, column.name
            )));
        }

        self.renderer.fragment_at(table, column, self.depth + 1)
    }
}

/// Renders table descriptors into `CREATE TABLE` statements.
///
/// Rendering is pure: the same descriptor always yields the same statement.
#[derive(Debug, Clone)]
pub struct Renderer<'a> {
    schema: &'a Schema,
    registry: &'a Registry,
    serializer: Serializer,
}

impl<'a> Renderer<'a> {
    /// A renderer using the built-in rules. `schema` resolves the targets of
    /// relational columns.
    pub fn new(schema: &'a Schema) -> Renderer<'a> {
        Renderer::with_registry(schema, Registry::global())
    }

    pub fn with_registry(schema: &'a Schema, registry: &'a Registry) -> Renderer<'a> {
        Renderer {
            schema,
            registry,
            serializer: Serializer::new(),
        }
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub fn serializer(&self) -> &Serializer {
        &self.serializer
    }

    /// Renders one column of `table`. Returns `None` for kinds without a
    /// physical column.
    pub fn column_fragment(&self, table: &Table, column: &Column) -> Result<Option<ColumnFragment>> {
        self.fragment_at(table, column, 0)
    }

    fn fragment_at(
        &self,
        table: &Table,
        column: &Column,
        depth: usize,
    ) -> Result<Option<ColumnFragment>> {
        let rule = self.registry.resolve(column)?;
        let cx = ColumnCx {
            renderer: self,
            table,
            depth,
        };
        rule.render(&cx, column)
    }

    /// The column definition alone, without the foreign key clause.
    pub fn column_def(&self, table: &Table, column: &Column) -> Result<Option<ColumnDef>> {
        Ok(self
            .column_fragment(table, column)?
            .map(|fragment| fragment.def))
    }

    /// Renders one column definition as SQL. Kinds without a physical column
    /// render as the empty string.
    pub fn render_column(&self, table: &Table, column: &Column) -> Result<String> {
        Ok(self
            .column_def(table, column)?
            .map(|def| self.serializer.serialize_column_def(&def))
            .unwrap_or_default())
    }

    /// The columns of `table` that are stored in the database, in declaration
    /// order.
    pub fn physical_columns<'t>(&self, table: &'t Table) -> Result<Vec<&'t Column>> {
        let mut ret = vec![];

        for column in &table.columns {
            if self.column_fragment(table, column)?.is_some() {
                ret.push(column);
            }
        }

        Ok(ret)
    }

    /// The columns of `table` whose kind is stored, decided from the resolved
    /// rules alone. Unlike [`Renderer::physical_columns`], relational columns
    /// are not rendered, so their targets need not be part of the schema.
    pub fn stored_columns<'t>(&self, table: &'t Table) -> Result<Vec<&'t Column>> {
        let mut ret = vec![];

        for column in &table.columns {
            if self.registry.resolve(column)?.is_stored() {
                ret.push(column);
            }
        }

        Ok(ret)
    }

    /// Builds the `CREATE TABLE IF NOT EXISTS` statement for `table`.
    pub fn create_table(&self, table: &Table) -> Result<CreateTable> {
        let mut columns = vec![];
        let mut primary_key = vec![];
        let mut unique = vec![];
        let mut foreign_keys = vec![];

        for column in &table.columns {
            let Some(fragment) = self.column_fragment(table, column)? else {
                continue;
            };

            if column.primary_key && !fragment.def.primary_key {
                primary_key.push(Name::from(&column.name));
            }

            if column.unique {
                unique.push(TableConstraint::Unique(vec![Name::from(&column.name)]));
            }

            foreign_keys.extend(fragment.foreign_key);
            columns.push(fragment.def);
        }

        verify_row_id(table, &columns, &primary_key)?;

        let mut constraints = vec![];

        if !primary_key.is_empty() {
            constraints.push(TableConstraint::PrimaryKey(primary_key));
        }

        constraints.extend(unique);
        constraints.extend(foreign_keys);

        for index in &table.indices {
            constraints.push(TableConstraint::Index {
                columns: index.columns.iter().map(Name::from).collect(),
                fulltext: index.fulltext,
                using: index.using.clone(),
            });
        }

        Ok(CreateTable {
            name: Name::from(&table.name),
            if_not_exists: true,
            columns,
            constraints,
        })
    }

    /// Renders the `CREATE TABLE IF NOT EXISTS` statement for `table` as SQL.
    pub fn render_table(&self, table: &Table) -> Result<String> {
        let stmt = self.create_table(table)?;
        Ok(self.serializer.serialize(&stmt.into()))
    }
}

/// A row id alias is the whole primary key, and a table has at most one.
fn verify_row_id(table: &Table, columns: &[ColumnDef], primary_key: &[Name]) -> Result<()> {
    let mut row_ids = columns.iter().filter(|def| def.auto_increment);

    let Some(row_id) = row_ids.next() else {
        return Ok(());
    };

    if let Some(other) = row_ids.next() {
        return Err(Error::invalid_schema(format!(
            "table `{}` declares more than one auto-increment column (`{}`, `{}`)",
            table.name, row_id.name, other.name
        )));
    }

    if let Some(other) = primary_key.first() {
        return Err(Error::invalid_schema(format!(
            "auto-increment column `{}.{}` cannot share the primary key with `{}`",
            table.name, row_id.name, other
        )));
    }

    Ok(())
}
