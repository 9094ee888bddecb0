use crate::allocation::ResourceDirectory;
use crate::metrics::{ExecutiveSummary, IndividualCapacity, compute_capacity_metrics};
use crate::record::{self, ProjectRecord, RosterRecord};
use crate::timeline::{Department, project_department_timelines};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Everything the engine derives from one processing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityReport {
    pub executive_summary: ExecutiveSummary,
    pub individual_capacity: Vec<IndividualCapacity>,
    pub departments: Vec<Department>,
}

/// The two uploaded input tables, held as string-typed DataFrames.
///
/// Replacing either table discards all derived data; the report is always
/// recomputed in full from both tables, never patched incrementally.
#[derive(Debug, Clone)]
pub struct CapacityDataset {
    roster: DataFrame,
    projects: DataFrame,
}

impl Default for CapacityDataset {
    fn default() -> Self {
        Self::new()
    }
}

impl CapacityDataset {
    pub fn new() -> Self {
        Self {
            roster: DataFrame::empty_with_schema(&Self::roster_schema()),
            projects: DataFrame::empty_with_schema(&Self::project_schema()),
        }
    }

    pub fn with_tables(roster: DataFrame, projects: DataFrame) -> Self {
        Self { roster, projects }
    }

    fn roster_schema() -> Schema {
        Schema::from_iter(vec![
            Field::new(record::COL_DEPARTMENT.into(), DataType::String),
            Field::new(record::COL_NAME.into(), DataType::String),
        ])
    }

    fn project_schema() -> Schema {
        Schema::from_iter(vec![
            Field::new(record::COL_INITIATIVE.into(), DataType::String),
            Field::new(record::COL_START_DATE.into(), DataType::String),
            Field::new(record::COL_END_QUARTER.into(), DataType::String),
            Field::new(record::COL_DURATION.into(), DataType::String),
            Field::new(record::COL_PROJECT_MANAGER.into(), DataType::String),
            Field::new(record::COL_PM_HOURS.into(), DataType::String),
        ])
    }

    pub fn roster(&self) -> &DataFrame {
        &self.roster
    }

    pub fn projects(&self) -> &DataFrame {
        &self.projects
    }

    pub fn set_roster(&mut self, roster: DataFrame) {
        self.roster = roster;
    }

    pub fn set_projects(&mut self, projects: DataFrame) {
        self.projects = projects;
    }

    pub fn roster_records(&self) -> Vec<RosterRecord> {
        RosterRecord::from_dataframe(&self.roster)
    }

    pub fn project_records(&self) -> Vec<ProjectRecord> {
        ProjectRecord::from_dataframe(&self.projects)
    }

    /// Run the full pipeline: join roster and project rows, compute the
    /// individual metrics and executive summary, and project each
    /// department's utilization across the rolling windows anchored at
    /// `as_of`.
    pub fn report(&self, as_of: NaiveDate) -> CapacityReport {
        let roster = self.roster_records();
        let projects = self.project_records();

        let directory = ResourceDirectory::build(&roster, &projects);
        let metrics = compute_capacity_metrics(&directory);
        let departments = project_department_timelines(&roster, &projects, as_of);

        CapacityReport {
            executive_summary: metrics.executive_summary,
            individual_capacity: metrics.individual_capacity,
            departments,
        }
    }
}

/// Build an all-string DataFrame from a header row plus data rows, the shape
/// the upstream CSV collaborator hands over. Short rows pad with empty cells.
pub fn table_from_rows(headers: &[String], rows: &[Vec<String>]) -> PolarsResult<DataFrame> {
    let columns: Vec<Column> = headers
        .iter()
        .enumerate()
        .map(|(col_idx, header)| {
            let values: Vec<&str> = rows
                .iter()
                .map(|row| row.get(col_idx).map(String::as_str).unwrap_or(""))
                .collect();
            Column::new(header.as_str().into(), values)
        })
        .collect();
    DataFrame::new(columns)
}

/// Inverse of [`table_from_rows`]: recover the header row and string cells,
/// with null cells rendered empty.
pub fn rows_from_table(df: &DataFrame) -> PolarsResult<(Vec<String>, Vec<Vec<String>>)> {
    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let mut rows = vec![Vec::with_capacity(headers.len()); df.height()];
    for column in df.get_columns() {
        let values = column.str()?;
        for (row_idx, value) in values.into_iter().enumerate() {
            rows[row_idx].push(value.unwrap_or("").to_string());
        }
    }
    Ok((headers, rows))
}
