use crate::allocation::{ProjectContribution, Resource, ResourceDirectory};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Working hours in a year after standard time off.
pub const ANNUAL_CAPACITY_HOURS: f64 = 1444.0;

const TOP_N: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UtilizationStatus {
    OverUtilized,
    UnderUtilized,
    Optimal,
}

impl UtilizationStatus {
    /// Thresholds are exclusive on both sides: exactly 80.0 and exactly
    /// 100.0 are optimal.
    pub fn from_utilization(utilization: f64) -> Self {
        if utilization > 100.0 {
            UtilizationStatus::OverUtilized
        } else if utilization < 80.0 {
            UtilizationStatus::UnderUtilized
        } else {
            UtilizationStatus::Optimal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UtilizationStatus::OverUtilized => "over-utilized",
            UtilizationStatus::UnderUtilized => "under-utilized",
            UtilizationStatus::Optimal => "optimal",
        }
    }
}

/// A resource's annual capacity picture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndividualCapacity {
    pub name: String,
    pub department: String,
    pub allocated_hours: f64,
    pub projects: Vec<ProjectContribution>,
    pub annual_capacity: f64,
    pub available_hours: f64,
    pub utilization: f64,
    pub status: UtilizationStatus,
}

impl IndividualCapacity {
    fn from_resource(resource: &Resource) -> Self {
        let available_hours = ANNUAL_CAPACITY_HOURS - resource.allocated_hours;
        let utilization = resource.allocated_hours / ANNUAL_CAPACITY_HOURS * 100.0;
        Self {
            name: resource.name.clone(),
            department: resource.department.clone(),
            allocated_hours: resource.allocated_hours,
            projects: resource.projects.clone(),
            annual_capacity: ANNUAL_CAPACITY_HOURS,
            available_hours,
            utilization,
            status: UtilizationStatus::from_utilization(utilization),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub total_resources: usize,
    pub total_annual_capacity: f64,
    pub total_allocated_hours: f64,
    pub total_available_hours: f64,
    /// NaN when the roster is empty; consumers must guard before display.
    pub overall_utilization: f64,
    pub over_utilized_count: usize,
    pub under_utilized_count: usize,
    pub top_available: Vec<IndividualCapacity>,
    pub top_over_utilized: Vec<IndividualCapacity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityMetrics {
    pub executive_summary: ExecutiveSummary,
    pub individual_capacity: Vec<IndividualCapacity>,
}

/// Compute per-resource capacity records and the executive summary.
pub fn compute_capacity_metrics(directory: &ResourceDirectory) -> CapacityMetrics {
    let individual_capacity: Vec<IndividualCapacity> = directory
        .resources()
        .iter()
        .map(IndividualCapacity::from_resource)
        .collect();

    let total_resources = individual_capacity.len();
    let total_annual_capacity = total_resources as f64 * ANNUAL_CAPACITY_HOURS;
    let total_allocated_hours: f64 = individual_capacity
        .iter()
        .map(|entry| entry.allocated_hours)
        .sum();
    let total_available_hours = total_annual_capacity - total_allocated_hours;
    let overall_utilization = total_allocated_hours / total_annual_capacity * 100.0;

    let over_utilized_count = individual_capacity
        .iter()
        .filter(|entry| entry.status == UtilizationStatus::OverUtilized)
        .count();
    let under_utilized_count = individual_capacity
        .iter()
        .filter(|entry| entry.status == UtilizationStatus::UnderUtilized)
        .count();

    // Stable sorts: ties keep directory order.
    let mut top_available = individual_capacity.clone();
    top_available.sort_by(|a, b| descending(a.available_hours, b.available_hours));
    top_available.truncate(TOP_N);

    let mut top_over_utilized: Vec<IndividualCapacity> = individual_capacity
        .iter()
        .filter(|entry| entry.utilization > 100.0)
        .cloned()
        .collect();
    top_over_utilized.sort_by(|a, b| descending(a.utilization, b.utilization));
    top_over_utilized.truncate(TOP_N);

    CapacityMetrics {
        executive_summary: ExecutiveSummary {
            total_resources,
            total_annual_capacity,
            total_allocated_hours,
            total_available_hours,
            overall_utilization,
            over_utilized_count,
            under_utilized_count,
            top_available,
            top_over_utilized,
        },
        individual_capacity,
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
