//! Shadow-copy-swap table migrations.
//!
//! SQLite cannot change the columns of an existing table in place. A table is
//! migrated by copying its rows into a shadow table, recreating it under the
//! new shape, and copying back the columns both shapes share:
//!
//! 1. an empty shadow left by an earlier run is dropped; a non-empty one is
//!    kept and the run resumes at step 5, unless the live table holds rows
//!    too, in which case nothing is touched and the run fails
//! 2. foreign key enforcement is turned off
//! 3. the shadow table is created from the live table's current definition
//! 4. every live row is copied into the shadow
//! 5. the live table is dropped and recreated under the new shape
//! 6. the shared columns are copied back from the shadow
//! 7. the shadow is dropped
//!
//! Foreign key enforcement is restored at the end, whether the run succeeded
//! or not. When step 3 or 4 fails, the shadow created by that attempt is
//! removed and the live table is untouched. Any later failure leaves the
//! shadow in place as the only copy of the data; running the migration again
//! picks it up.

mod config;
pub use config::MigrationConfig;

mod plan;
pub use plan::{MigrationOutcome, MigrationPlan, MigrationReport};

mod rename;

use crate::{stmt::Statement, Renderer};

use tabula_core::{driver::Connection, schema::Table, Error, Result};
use tracing::{debug, info, warn};

/// Migrates live tables to new descriptors.
#[derive(Debug, Clone)]
pub struct Migrator<'a> {
    renderer: Renderer<'a>,
    config: MigrationConfig,
}

impl<'a> Migrator<'a> {
    pub fn new(renderer: Renderer<'a>) -> Migrator<'a> {
        Migrator {
            renderer,
            config: MigrationConfig::default(),
        }
    }

    /// Set the migration configuration
    pub fn config(mut self, config: MigrationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn renderer(&self) -> &Renderer<'a> {
        &self.renderer
    }

    /// Computes the plan for migrating `previous` to `next`, which must
    /// describe the same table.
    pub fn plan(&self, previous: &Table, next: &Table) -> Result<MigrationPlan> {
        if previous.name != next.name {
            return Err(Error::invalid_schema(format!(
                "cannot migrate table `{}` to a descriptor of table `{}`",
                previous.name, next.name
            )));
        }

        // `previous` may reference tables the schema no longer holds, so its
        // columns are classified without rendering them.
        let next_columns = self.renderer.physical_columns(next)?;
        let common_columns = self
            .renderer
            .stored_columns(previous)?
            .into_iter()
            .filter(|column| next_columns.iter().any(|next| next.name == column.name))
            .map(|column| column.name.clone())
            .collect();

        Ok(MigrationPlan {
            live: previous.name.clone(),
            shadow: self.config.shadow_name(&previous.name),
            common_columns,
        })
    }

    /// Migrates the live table described by `previous` to the shape described
    /// by `next`, keeping the data of every column both share.
    pub fn migrate(
        &self,
        conn: &mut dyn Connection,
        previous: &Table,
        next: &Table,
    ) -> Result<MigrationReport> {
        let plan = self.plan(previous, next)?;

        // Rendering errors surface before the database is touched.
        let create = Statement::from(self.renderer.create_table(next)?);

        let resume = self.prepare_shadow(conn, &plan).map_err(|err| {
            err.context(Error::migration_failed(&plan.live, "drop-stale-shadow"))
        })?;

        let live_definition = if resume {
            None
        } else {
            let definition = conn.table_definition(&plan.live).map_err(|err| {
                err.context(Error::migration_failed(&plan.live, "snapshot-shadow"))
            })?;

            match definition {
                Some(definition) => Some(definition),
                None => {
                    info!("{}: table does not exist, creating it", plan.live);
                    self.execute(conn, &create).map_err(|err| {
                        err.context(Error::migration_failed(&plan.live, "recreate-live"))
                    })?;

                    return Ok(MigrationReport {
                        plan,
                        outcome: MigrationOutcome::Created,
                        restored_rows: 0,
                    });
                }
            }
        };

        let foreign_keys = conn.foreign_keys().map_err(|err| {
            err.context(Error::migration_failed(&plan.live, "disable-foreign-keys"))
        })?;

        if foreign_keys {
            self.execute(conn, &Statement::pragma_foreign_keys(false))
                .map_err(|err| {
                    err.context(Error::migration_failed(&plan.live, "disable-foreign-keys"))
                })?;
        }

        let res = self.swap(conn, &plan, live_definition.as_deref(), &create);

        if foreign_keys {
            let restored = self
                .execute(conn, &Statement::pragma_foreign_keys(true))
                .map_err(|err| {
                    err.context(Error::migration_failed(&plan.live, "restore-foreign-keys"))
                });

            match (&res, restored) {
                (Ok(_), Err(err)) => return Err(err),
                (Err(_), Err(err)) => warn!("{}: {}", plan.live, err),
                _ => {}
            }
        }

        let restored_rows = res?;

        info!(
            "{}: migrated ({} rows restored over {} columns)",
            plan.live,
            restored_rows,
            plan.common_columns.len()
        );

        Ok(MigrationReport {
            outcome: if resume {
                MigrationOutcome::Resumed
            } else {
                MigrationOutcome::Migrated
            },
            plan,
            restored_rows,
        })
    }

    /// Step 1. Returns `true` when a shadow holding rows from an earlier run
    /// was found and the live table is missing or empty. Fails when both hold
    /// rows.
    fn prepare_shadow(&self, conn: &mut dyn Connection, plan: &MigrationPlan) -> Result<bool> {
        if !conn.table_exists(&plan.shadow)? {
            return Ok(false);
        }

        let rows = conn.count_rows(&plan.shadow)?;

        if rows > 0 {
            // The live table may have been rebuilt and written to since the
            // shadow was left behind; restoring would overwrite those rows.
            if conn.table_exists(&plan.live)? {
                let live_rows = conn.count_rows(&plan.live)?;

                if live_rows > 0 {
                    return Err(tabula_core::err!(
                        "table `{}` holds {} rows and shadow table `{}` holds {} rows \
                         from an earlier run; reconcile them and drop `{}` before migrating again",
                        plan.live,
                        live_rows,
                        plan.shadow,
                        rows,
                        plan.shadow
                    ));
                }
            }

            warn!(
                "{}: shadow table {} holds {} rows from an earlier run, resuming from it",
                plan.live, plan.shadow, rows
            );
            return Ok(true);
        }

        debug!("{}: dropping empty shadow table {}", plan.live, plan.shadow);
        self.execute(conn, &Statement::drop_table(&plan.shadow))?;
        Ok(false)
    }

    /// Steps 3 to 7. `live_definition` is `None` when resuming from an
    /// existing shadow.
    fn swap(
        &self,
        conn: &mut dyn Connection,
        plan: &MigrationPlan,
        live_definition: Option<&str>,
        create: &Statement,
    ) -> Result<usize> {
        let live = &plan.live[..];
        let failed = |step: &'static str| {
            move |err: Error| err.context(Error::migration_failed(live, step))
        };

        if let Some(definition) = live_definition {
            info!("{}: copying rows to {}", live, plan.shadow);

            let snapshot = rename::rename_table(definition, live, &plan.shadow)
                .and_then(|ddl| self.execute(conn, &Statement::raw(ddl)))
                .map_err(failed("snapshot-shadow"));

            let copied = snapshot.and_then(|_| {
                self.execute(conn, &Statement::copy_table(live, &plan.shadow))
                    .map_err(failed("copy-to-shadow"))
            });

            if let Err(err) = copied {
                self.discard_shadow(conn, plan);
                return Err(err);
            }
        }

        info!("{}: recreating table", live);

        let drop_live = if live_definition.is_some() {
            Statement::drop_table(live)
        } else {
            Statement::drop_table_if_exists(live)
        };

        self.execute(conn, &drop_live).map_err(failed("recreate-live"))?;
        self.execute(conn, create).map_err(failed("recreate-live"))?;

        let restored_rows = if plan.common_columns.is_empty() {
            warn!("{}: no columns in common, previous rows are discarded", live);
            0
        } else {
            let restore = Statement::copy_columns(&plan.shadow, live, &plan.common_columns);
            self.execute(conn, &restore).map_err(failed("restore-data"))?
        };

        self.execute(conn, &Statement::drop_table(&plan.shadow))
            .map_err(failed("drop-shadow"))?;

        Ok(restored_rows)
    }

    /// Removes the shadow created by a failed snapshot. The live table was not
    /// touched yet, so nothing is lost.
    fn discard_shadow(&self, conn: &mut dyn Connection, plan: &MigrationPlan) {
        if let Err(err) = self.execute(conn, &Statement::drop_table_if_exists(&plan.shadow)) {
            warn!(
                "{}: failed to remove shadow table {}: {}",
                plan.live, plan.shadow, err
            );
        }
    }

    fn execute(&self, conn: &mut dyn Connection, stmt: &Statement) -> Result<usize> {
        let sql = self.renderer.serializer().serialize(stmt);
        debug!("{}", sql);
        conn.execute(&sql)
    }
}
