use super::{PersistenceError, PersistenceResult};
use crate::dataset::{CapacityDataset, rows_from_table, table_from_rows};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Column-order-preserving snapshot of one string table. This is both the
/// JSON persistence shape and the upload payload for the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableSnapshot {
    pub fn from_dataframe(df: &DataFrame) -> PersistenceResult<Self> {
        let (columns, rows) = rows_from_table(df)?;
        Ok(Self { columns, rows })
    }

    pub fn into_dataframe(self) -> PersistenceResult<DataFrame> {
        for (row_idx, row) in self.rows.iter().enumerate() {
            if row.len() > self.columns.len() {
                return Err(PersistenceError::InvalidData(format!(
                    "row {row_idx} has {} cells but the table has {} columns",
                    row.len(),
                    self.columns.len()
                )));
            }
        }
        Ok(table_from_rows(&self.columns, &self.rows)?)
    }
}

#[derive(Serialize, Deserialize)]
struct DatasetSnapshot {
    roster: TableSnapshot,
    projects: TableSnapshot,
}

impl DatasetSnapshot {
    fn from_dataset(dataset: &CapacityDataset) -> PersistenceResult<Self> {
        Ok(Self {
            roster: TableSnapshot::from_dataframe(dataset.roster())?,
            projects: TableSnapshot::from_dataframe(dataset.projects())?,
        })
    }

    fn into_dataset(self) -> PersistenceResult<CapacityDataset> {
        Ok(CapacityDataset::with_tables(
            self.roster.into_dataframe()?,
            self.projects.into_dataframe()?,
        ))
    }
}

/// Read one CSV file into an all-string DataFrame. The first record is the
/// header row; every cell comes through verbatim, field parsing happens later
/// at record extraction.
pub fn load_table_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<DataFrame> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|field| field.to_string())
        .collect();
    if headers.is_empty() {
        return Err(PersistenceError::InvalidData(
            "CSV file contained no header row".into(),
        ));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }

    Ok(table_from_rows(&headers, &rows)?)
}

pub fn save_table_to_csv<P: AsRef<Path>>(df: &DataFrame, path: P) -> PersistenceResult<()> {
    let (headers, rows) = rows_from_table(df)?;
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(&headers)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Load both input tables from their CSV files.
pub fn load_dataset_from_csv<P: AsRef<Path>, Q: AsRef<Path>>(
    roster_path: P,
    projects_path: Q,
) -> PersistenceResult<CapacityDataset> {
    let roster = load_table_from_csv(roster_path)?;
    let projects = load_table_from_csv(projects_path)?;
    Ok(CapacityDataset::with_tables(roster, projects))
}

pub fn save_dataset_to_csv<P: AsRef<Path>, Q: AsRef<Path>>(
    dataset: &CapacityDataset,
    roster_path: P,
    projects_path: Q,
) -> PersistenceResult<()> {
    save_table_to_csv(dataset.roster(), roster_path)?;
    save_table_to_csv(dataset.projects(), projects_path)?;
    Ok(())
}

pub fn save_dataset_to_json<P: AsRef<Path>>(
    dataset: &CapacityDataset,
    path: P,
) -> PersistenceResult<()> {
    let snapshot = DatasetSnapshot::from_dataset(dataset)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, &snapshot)?;
    Ok(())
}

pub fn load_dataset_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<CapacityDataset> {
    let file = File::open(path)?;
    let snapshot: DatasetSnapshot = serde_json::from_reader(file)?;
    snapshot.into_dataset()
}
