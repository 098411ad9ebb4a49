//! Application context - dependency injection container

use std::sync::Arc;

use keystone_core::EntityService;
use keystone_domain::{
    Account, Config, Contact, Deal, Email, Lead, Project, ProjectTask, Result, Task,
};
use keystone_infra::{DbManager, SqlRecord, SqliteStore};
use tracing::info;

/// Application context - holds the database and one service per entity
pub struct AppContext {
    pub config: Config,
    pub db: Arc<DbManager>,
    pub leads: EntityService<Lead>,
    pub contacts: EntityService<Contact>,
    pub accounts: EntityService<Account>,
    pub deals: EntityService<Deal>,
    pub emails: EntityService<Email>,
    pub tasks: EntityService<Task>,
    pub projects: EntityService<Project>,
    pub project_tasks: EntityService<ProjectTask>,
}

impl AppContext {
    /// Open the configured database, apply the schema and wire services.
    ///
    /// # Errors
    /// Returns `CrmError::Database` if the pool cannot be created or the
    /// schema cannot be applied.
    pub fn new(config: Config) -> Result<Self> {
        info!(path = %config.database.path, "opening database");
        let db = DbManager::new(&config.database.path, config.database.pool_size)?;
        db.run_migrations()?;
        Ok(Self::with_db(config, Arc::new(db)))
    }

    /// Wire services over an already migrated database.
    pub fn with_db(config: Config, db: Arc<DbManager>) -> Self {
        Self {
            leads: sqlite_service(&db),
            contacts: sqlite_service(&db),
            accounts: sqlite_service(&db),
            deals: sqlite_service(&db),
            emails: sqlite_service(&db),
            tasks: sqlite_service(&db),
            projects: sqlite_service(&db),
            project_tasks: sqlite_service(&db),
            config,
            db,
        }
    }
}

fn sqlite_service<R: SqlRecord>(db: &Arc<DbManager>) -> EntityService<R> {
    EntityService::new(Arc::new(SqliteStore::<R>::new(Arc::clone(db))))
}
