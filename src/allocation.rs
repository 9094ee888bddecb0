use crate::record::{ProjectRecord, RosterRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Hours a resource is committed to on one initiative, in one role.
/// The role is either "Project Manager" or an assignment-slot label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectContribution {
    pub initiative: String,
    pub hours: f64,
    pub role: String,
}

/// A roster member with the hours accumulated against them across every
/// project row that names them as PM or as a slotted assignee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub department: String,
    pub allocated_hours: f64,
    pub projects: Vec<ProjectContribution>,
}

impl Resource {
    fn new(name: String, department: String) -> Self {
        Self {
            name,
            department,
            allocated_hours: 0.0,
            projects: Vec::new(),
        }
    }

    fn contribute(&mut self, initiative: &str, hours: f64, role: &str) {
        self.allocated_hours += hours;
        self.projects.push(ProjectContribution {
            initiative: initiative.to_string(),
            hours,
            role: role.to_string(),
        });
    }
}

/// Insertion-ordered directory of known resources keyed by trimmed name.
///
/// Built once per processing run by folding the roster and project tables;
/// never mutated afterwards and never updated incrementally.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceDirectory {
    resources: Vec<Resource>,
    index: HashMap<String, usize>,
}

pub const ROLE_PROJECT_MANAGER: &str = "Project Manager";

impl ResourceDirectory {
    /// Join roster rows against project rows.
    ///
    /// Roster rows with an empty trimmed name are skipped. A duplicate name
    /// replaces the earlier entry in place (last write wins, original
    /// insertion position kept), matching a keyed-map overwrite.
    ///
    /// Project rows attribute hours only to names present in the roster:
    /// the PM contribution is recorded even at zero hours, slot contributions
    /// only when hours are strictly positive. Unknown names are dropped
    /// silently; the joiner only tracks known resources.
    pub fn build(roster: &[RosterRecord], projects: &[ProjectRecord]) -> Self {
        let mut directory = roster.iter().fold(Self::default(), |mut dir, member| {
            dir.enroll(member);
            dir
        });

        for project in projects {
            directory.attribute(project);
        }
        directory
    }

    fn enroll(&mut self, member: &RosterRecord) {
        if member.name.is_empty() {
            return;
        }
        let fresh = Resource::new(member.name.clone(), member.department.clone());
        match self.index.get(&member.name) {
            Some(&position) => self.resources[position] = fresh,
            None => {
                self.index.insert(member.name.clone(), self.resources.len());
                self.resources.push(fresh);
            }
        }
    }

    fn attribute(&mut self, project: &ProjectRecord) {
        if !project.project_manager.is_empty() {
            if let Some(resource) = self.get_mut(&project.project_manager) {
                resource.contribute(
                    &project.initiative,
                    project.project_manager_hours,
                    ROLE_PROJECT_MANAGER,
                );
            }
        }

        for slot in &project.assignments {
            if slot.resource_name.is_empty() || slot.hours <= 0.0 {
                continue;
            }
            if let Some(resource) = self.get_mut(&slot.resource_name) {
                resource.contribute(&project.initiative, slot.hours, &slot.label);
            }
        }
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Resource> {
        let position = *self.index.get(name)?;
        Some(&mut self.resources[position])
    }

    pub fn get(&self, name: &str) -> Option<&Resource> {
        let position = *self.index.get(name)?;
        Some(&self.resources[position])
    }

    /// Resources in roster insertion order.
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
