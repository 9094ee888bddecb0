use crate::allocation::ROLE_PROJECT_MANAGER;
use crate::calendar::{Period, parse_end_quarter, parse_start_date, upcoming_months, upcoming_quarters};
use crate::metrics::ANNUAL_CAPACITY_HOURS;
use crate::record::{ProjectRecord, RosterRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const PROJECTION_PERIODS: usize = 3;

/// Hours one department member contributes to a department project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceShare {
    pub name: String,
    pub hours: f64,
    pub role: String,
}

/// One distinct initiative touching a department, with hours summed across
/// every department member on it. The dates and duration come from the first
/// contributing row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentProject {
    pub initiative: String,
    pub start_date: String,
    pub end_quarter: String,
    pub duration: f64,
    pub total_hours: f64,
    pub resources: Vec<ResourceShare>,
}

impl DepartmentProject {
    /// Per-period share of the project's hours: the total is spread evenly
    /// across the declared duration. Partial overlap with a period still
    /// credits the full share.
    fn monthly_hours(&self) -> f64 {
        self.total_hours / self.duration
    }

    fn active_in(&self, period: &Period) -> bool {
        let (Some(start), Some(end)) = (
            parse_start_date(&self.start_date),
            parse_end_quarter(&self.end_quarter),
        ) else {
            return false;
        };
        period.overlaps(start, end)
    }
}

/// Utilization of one department over one rolling month or quarter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodProjection {
    pub period: String,
    pub allocated_hours: f64,
    pub capacity: f64,
    pub utilization: f64,
    pub available_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub name: String,
    pub resources: Vec<String>,
    pub resource_count: usize,
    pub total_capacity: f64,
    pub allocated_hours: f64,
    pub utilization: f64,
    pub available_hours: f64,
    pub projects: Vec<DepartmentProject>,
    pub monthly_projections: Vec<PeriodProjection>,
    pub quarterly_projections: Vec<PeriodProjection>,
}

#[derive(Debug, Default)]
struct DepartmentAccumulator {
    name: String,
    resources: Vec<String>,
    total_capacity: f64,
    allocated_hours: f64,
    projects: Vec<DepartmentProject>,
}

impl DepartmentAccumulator {
    fn contribute(&mut self, project: &ProjectRecord, name: &str, hours: f64, role: &str) {
        self.allocated_hours += hours;

        let share = ResourceShare {
            name: name.to_string(),
            hours,
            role: role.to_string(),
        };
        match self
            .projects
            .iter_mut()
            .find(|existing| existing.initiative == project.initiative)
        {
            Some(existing) => {
                existing.total_hours += hours;
                existing.resources.push(share);
            }
            None => self.projects.push(DepartmentProject {
                initiative: project.initiative.clone(),
                start_date: project.planned_start_date.clone(),
                end_quarter: project.planned_end_quarter.clone(),
                duration: project.duration_months,
                total_hours: hours,
                resources: vec![share],
            }),
        }
    }

    fn into_department(self, months: &[Period], quarters: &[Period]) -> Department {
        let monthly_projections =
            project_periods(&self.projects, months, self.total_capacity / 12.0, 1.0);
        let quarterly_projections =
            project_periods(&self.projects, quarters, self.total_capacity / 4.0, 3.0);

        Department {
            resource_count: self.resources.len(),
            utilization: self.allocated_hours / self.total_capacity * 100.0,
            available_hours: self.total_capacity - self.allocated_hours,
            name: self.name,
            resources: self.resources,
            total_capacity: self.total_capacity,
            allocated_hours: self.allocated_hours,
            projects: self.projects,
            monthly_projections,
            quarterly_projections,
        }
    }
}

fn project_periods(
    projects: &[DepartmentProject],
    periods: &[Period],
    capacity: f64,
    months_per_period: f64,
) -> Vec<PeriodProjection> {
    periods
        .iter()
        .map(|period| {
            let allocated_hours: f64 = projects
                .iter()
                .filter(|project| project.active_in(period))
                .map(|project| project.monthly_hours() * months_per_period)
                .sum();
            PeriodProjection {
                period: period.label.clone(),
                allocated_hours,
                capacity,
                utilization: allocated_hours / capacity * 100.0,
                available_hours: capacity - allocated_hours,
            }
        })
        .collect()
}

/// Group the roster by department and project each department's allocation
/// across the next three rolling months and quarters relative to `today`.
///
/// `today` is injected rather than read from an ambient clock so identical
/// inputs always produce identical output.
pub fn project_department_timelines(
    roster: &[RosterRecord],
    projects: &[ProjectRecord],
    today: NaiveDate,
) -> Vec<Department> {
    let mut departments: Vec<DepartmentAccumulator> = Vec::new();
    let mut department_index: HashMap<String, usize> = HashMap::new();
    // First matching roster row wins the name -> department lookup.
    let mut member_department: HashMap<&str, &str> = HashMap::new();

    for member in roster {
        if !member.name.is_empty() {
            member_department
                .entry(member.name.as_str())
                .or_insert(member.department.as_str());
        }
        if member.department.is_empty() || member.name.is_empty() {
            continue;
        }
        let position = *department_index
            .entry(member.department.clone())
            .or_insert_with(|| {
                departments.push(DepartmentAccumulator {
                    name: member.department.clone(),
                    ..DepartmentAccumulator::default()
                });
                departments.len() - 1
            });
        departments[position].resources.push(member.name.clone());
        departments[position].total_capacity += ANNUAL_CAPACITY_HOURS;
    }

    for project in projects {
        let mut attribute = |name: &str, hours: f64, role: &str| {
            let Some(department) = member_department.get(name) else {
                return;
            };
            let Some(&position) = department_index.get(*department) else {
                return;
            };
            departments[position].contribute(project, name, hours, role);
        };

        if !project.project_manager.is_empty() {
            attribute(
                &project.project_manager,
                project.project_manager_hours,
                ROLE_PROJECT_MANAGER,
            );
        }
        for slot in &project.assignments {
            if slot.resource_name.is_empty() || slot.hours <= 0.0 {
                continue;
            }
            attribute(&slot.resource_name, slot.hours, &slot.label);
        }
    }

    let months = upcoming_months(today, PROJECTION_PERIODS);
    let quarters = upcoming_quarters(today, PROJECTION_PERIODS);
    departments
        .into_iter()
        .map(|accumulator| accumulator.into_department(&months, &quarters))
        .collect()
}
