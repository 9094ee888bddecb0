use super::file::TableSnapshot;
use super::{DatasetStore, PersistenceResult};
use crate::CapacityDataset;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::Mutex;

const ROSTER_TABLE: &str = "roster";
const PROJECTS_TABLE: &str = "projects";

/// Stores the two uploaded tables as JSON snapshots in a single SQLite file,
/// one row per table.
pub struct SqliteDatasetStore {
    connection: Mutex<Connection>,
}

impl SqliteDatasetStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS dataset_tables (
                name TEXT PRIMARY KEY,
                table_json TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    fn save_table(
        tx: &rusqlite::Transaction,
        name: &str,
        snapshot: &TableSnapshot,
    ) -> PersistenceResult<()> {
        let json = serde_json::to_string(snapshot)?;
        tx.execute(
            "INSERT INTO dataset_tables (name, table_json) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET table_json = excluded.table_json",
            params![name, json],
        )?;
        Ok(())
    }

    fn load_table(
        connection: &Connection,
        name: &str,
    ) -> PersistenceResult<Option<TableSnapshot>> {
        let mut stmt =
            connection.prepare("SELECT table_json FROM dataset_tables WHERE name = ?1")?;
        let json_opt: Option<String> = stmt
            .query_row(params![name], |row| row.get(0))
            .optional()?;
        match json_opt {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}

impl DatasetStore for SqliteDatasetStore {
    fn save_dataset(&self, dataset: &CapacityDataset) -> PersistenceResult<()> {
        let roster = TableSnapshot::from_dataframe(dataset.roster())?;
        let projects = TableSnapshot::from_dataframe(dataset.projects())?;

        let mut conn = self.connection.lock().expect("sqlite mutex poisoned");
        let tx = conn.transaction()?;
        Self::save_table(&tx, ROSTER_TABLE, &roster)?;
        Self::save_table(&tx, PROJECTS_TABLE, &projects)?;
        tx.commit()?;
        Ok(())
    }

    fn load_dataset(&self) -> PersistenceResult<Option<CapacityDataset>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");

        let Some(roster) = Self::load_table(&conn, ROSTER_TABLE)? else {
            return Ok(None);
        };
        let Some(projects) = Self::load_table(&conn, PROJECTS_TABLE)? else {
            return Ok(None);
        };

        Ok(Some(CapacityDataset::with_tables(
            roster.into_dataframe()?,
            projects.into_dataframe()?,
        )))
    }
}
