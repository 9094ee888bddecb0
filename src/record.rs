use polars::prelude::*;

/// One row of the team-roster table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRecord {
    pub department: String,
    pub name: String,
}

/// A discovered assignment slot on a project row ("Resource 1", "Resource 2", ...).
///
/// Slots are discovered once per table by column-name pattern, not by a fixed
/// count; the label is the slot column's name and doubles as the role string.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentSlot {
    pub label: String,
    pub resource_name: String,
    pub hours: f64,
}

/// One row of the project-allocation table: a fixed core plus the ordered
/// list of assignment slots present on the row.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRecord {
    pub initiative: String,
    pub planned_start_date: String,
    pub planned_end_quarter: String,
    pub duration_months: f64,
    pub project_manager: String,
    pub project_manager_hours: f64,
    pub assignments: Vec<AssignmentSlot>,
}

pub(crate) const COL_DEPARTMENT: &str = "Department";
pub(crate) const COL_NAME: &str = "Name";
pub(crate) const COL_INITIATIVE: &str = "Initiative";
pub(crate) const COL_START_DATE: &str = "Planned Start Date";
pub(crate) const COL_END_QUARTER: &str = "Planned End Quarter";
pub(crate) const COL_DURATION: &str = "Duration (Mth)";
pub(crate) const COL_PROJECT_MANAGER: &str = "Project Manager";
pub(crate) const COL_PM_HOURS: &str = "Project Manager Hours";

/// Cell lookup that degrades to the empty string when the column is absent,
/// holds a non-string dtype, or the cell is null. Malformed tables must never
/// abort record extraction.
fn cell<'a>(df: &'a DataFrame, column: &str, row_idx: usize) -> &'a str {
    df.column(column)
        .ok()
        .and_then(|col| col.str().ok())
        .and_then(|ca| ca.get(row_idx))
        .unwrap_or("")
}

/// Hours fields parse to 0.0 on failure or absence.
pub(crate) fn parse_hours(input: &str) -> f64 {
    input.trim().parse::<f64>().unwrap_or(0.0)
}

/// Duration fields parse to 1.0 on failure, absence, or zero; a zero duration
/// would turn the per-month spread into a division by zero.
pub(crate) fn parse_duration(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| *v != 0.0)
        .unwrap_or(1.0)
}

impl RosterRecord {
    pub fn new(department: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            name: name.into(),
        }
    }

    pub fn from_dataframe_row(df: &DataFrame, row_idx: usize) -> Self {
        Self {
            department: cell(df, COL_DEPARTMENT, row_idx).trim().to_string(),
            name: cell(df, COL_NAME, row_idx).trim().to_string(),
        }
    }

    pub fn from_dataframe(df: &DataFrame) -> Vec<Self> {
        (0..df.height())
            .map(|idx| Self::from_dataframe_row(df, idx))
            .collect()
    }
}

impl ProjectRecord {
    /// Slot/hours column pairs for a project table, in column order.
    /// A slot column is any column whose name starts with "Resource " and does
    /// not contain "Hours"; its hours column is "<label> Hours".
    pub fn slot_columns(df: &DataFrame) -> Vec<(String, String)> {
        df.get_column_names()
            .iter()
            .map(|name| name.as_str())
            .filter(|name| name.starts_with("Resource ") && !name.contains("Hours"))
            .map(|label| (label.to_string(), format!("{label} Hours")))
            .collect()
    }

    pub fn from_dataframe_row(
        df: &DataFrame,
        row_idx: usize,
        slot_columns: &[(String, String)],
    ) -> Self {
        let assignments = slot_columns
            .iter()
            .map(|(label, hours_column)| AssignmentSlot {
                label: label.clone(),
                resource_name: cell(df, label, row_idx).trim().to_string(),
                hours: parse_hours(cell(df, hours_column, row_idx)),
            })
            .collect();

        Self {
            initiative: cell(df, COL_INITIATIVE, row_idx).trim().to_string(),
            planned_start_date: cell(df, COL_START_DATE, row_idx).to_string(),
            planned_end_quarter: cell(df, COL_END_QUARTER, row_idx).to_string(),
            duration_months: parse_duration(cell(df, COL_DURATION, row_idx)),
            project_manager: cell(df, COL_PROJECT_MANAGER, row_idx).trim().to_string(),
            project_manager_hours: parse_hours(cell(df, COL_PM_HOURS, row_idx)),
            assignments,
        }
    }

    /// Extract every project row; slot columns are discovered once for the
    /// whole table rather than re-scanned per row.
    pub fn from_dataframe(df: &DataFrame) -> Vec<Self> {
        let slot_columns = Self::slot_columns(df);
        (0..df.height())
            .map(|idx| Self::from_dataframe_row(df, idx, &slot_columns))
            .collect()
    }
}
