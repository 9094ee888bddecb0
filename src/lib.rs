pub mod allocation;
pub mod calendar;
pub mod dataset;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod metrics;
pub mod persistence;
pub mod record;
pub mod timeline;

pub use allocation::{ProjectContribution, Resource, ResourceDirectory};
pub use calendar::{Period, parse_end_quarter, parse_start_date, upcoming_months, upcoming_quarters};
pub use dataset::{CapacityDataset, CapacityReport, rows_from_table, table_from_rows};
pub use metrics::{
    ANNUAL_CAPACITY_HOURS, CapacityMetrics, ExecutiveSummary, IndividualCapacity,
    UtilizationStatus, compute_capacity_metrics,
};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqliteDatasetStore;
pub use persistence::{
    DatasetStore, PersistenceError, TableSnapshot, load_dataset_from_csv, load_dataset_from_json,
    load_table_from_csv, save_dataset_to_csv, save_dataset_to_json, save_table_to_csv,
};
pub use record::{AssignmentSlot, ProjectRecord, RosterRecord};
pub use timeline::{
    Department, DepartmentProject, PeriodProjection, ResourceShare, project_department_timelines,
};
