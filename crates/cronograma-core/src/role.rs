//! Team roles
//!
//! Activity owners are recorded by job title. The set of titles is closed;
//! anything else is treated as an unknown owner rather than an error.

use serde::{Deserialize, Serialize};

/// Job title of an activity owner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    ProjectDirector,
    MechanicalProcessesDirector,
    ElectronicProcessesDirector,
    ControlSystemsDesigner,
    FinancialDirector,
}

/// System access level derived from a title
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    Coordinator,
    FinancialDirector,
    Member,
}

impl Role {
    /// Legend order
    pub const ALL: [Role; 5] = [
        Role::ProjectDirector,
        Role::MechanicalProcessesDirector,
        Role::ElectronicProcessesDirector,
        Role::ControlSystemsDesigner,
        Role::FinancialDirector,
    ];

    /// Title as stored on activities
    pub fn label(&self) -> &'static str {
        match self {
            Role::ProjectDirector => "Director de Proyecto",
            Role::MechanicalProcessesDirector => "Director de Procesos Mecanicos",
            Role::ElectronicProcessesDirector => "Director de Procesos Electronicos",
            Role::ControlSystemsDesigner => "Diseñador de Sistemas de Control",
            Role::FinancialDirector => "Director Financiero",
        }
    }

    /// Abbreviated title used in the Gantt legend
    pub fn short_label(&self) -> &'static str {
        match self {
            Role::ProjectDirector => "Dir. Proyecto",
            Role::MechanicalProcessesDirector => "Dir. Proc. Mec.",
            Role::ElectronicProcessesDirector => "Dir. Proc. Elec.",
            Role::ControlSystemsDesigner => "Dis. Control",
            Role::FinancialDirector => "Dir. Financiero",
        }
    }

    /// Look up a title, ignoring surrounding whitespace and case
    pub fn from_label(label: &str) -> Option<Role> {
        let label = label.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.label().to_lowercase() == label.to_lowercase())
    }

    pub fn access_level(&self) -> AccessLevel {
        match self {
            Role::FinancialDirector => AccessLevel::FinancialDirector,
            Role::ProjectDirector => AccessLevel::Coordinator,
            _ => AccessLevel::Member,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::from_label(s).ok_or_else(|| format!("unknown role title: {s}"))
    }
}

impl AccessLevel {
    /// Access level for an arbitrary title; unknown titles are members
    pub fn for_title(title: &str) -> AccessLevel {
        Role::from_label(title)
            .map(|role| role.access_level())
            .unwrap_or(AccessLevel::Member)
    }
}
