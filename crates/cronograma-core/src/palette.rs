//! Status and owner color tables
//!
//! Gantt bars of finished activities take the color of their status;
//! unfinished ones take the color of their owner's role. Owners outside the
//! known roles get the fallback color, never an error.

use serde::{Deserialize, Serialize};

use crate::{Activity, Role, StatusCategory};

/// 24-bit RGB color (`0xRRGGBB`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub u32);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xFFFFFF);
    pub const BLACK: Rgb = Rgb(0x000000);

    /// Parse `RRGGBB`, with or without a leading `#`
    pub fn parse(s: &str) -> Option<Rgb> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }
        u32::from_str_radix(hex, 16).ok().map(Rgb)
    }

    /// `RRGGBB`, upper case
    pub fn hex(&self) -> String {
        format!("{:06X}", self.0)
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::parse(&value).ok_or_else(|| format!("invalid color '{value}', expected RRGGBB"))
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.hex()
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.hex())
    }
}

/// Status → color and role → color tables
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub pending: Rgb,
    pub early: Rgb,
    pub on_time: Rgb,
    pub slight_delay: Rgb,
    pub severe_delay: Rgb,
    pub project_director: Rgb,
    pub mechanical_director: Rgb,
    pub electronic_director: Rgb,
    pub control_designer: Rgb,
    pub financial_director: Rgb,
    /// Bar color for owners outside the known roles
    pub unknown_owner: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            pending: Rgb(0xFFC107),
            early: Rgb(0x2196F3),
            on_time: Rgb(0x4CAF50),
            slight_delay: Rgb(0xFF9800),
            severe_delay: Rgb(0xF44336),
            project_director: Rgb(0x2C3E50),
            mechanical_director: Rgb(0xFF69B4),
            electronic_director: Rgb(0x8DB600),
            control_designer: Rgb(0x9B59B6),
            financial_director: Rgb(0xD4AF37),
            unknown_owner: Rgb(0x95A5A6),
        }
    }
}

impl Palette {
    pub fn status_color(&self, status: StatusCategory) -> Rgb {
        match status {
            StatusCategory::Pending => self.pending,
            StatusCategory::Early => self.early,
            StatusCategory::OnTime => self.on_time,
            StatusCategory::SlightDelay => self.slight_delay,
            StatusCategory::SevereDelay => self.severe_delay,
        }
    }

    /// Font color that stays readable on top of `status_color`
    pub fn status_text_color(&self, status: StatusCategory) -> Rgb {
        match status {
            StatusCategory::Early | StatusCategory::SevereDelay => Rgb::WHITE,
            _ => Rgb::BLACK,
        }
    }

    pub fn role_color(&self, role: Role) -> Rgb {
        match role {
            Role::ProjectDirector => self.project_director,
            Role::MechanicalProcessesDirector => self.mechanical_director,
            Role::ElectronicProcessesDirector => self.electronic_director,
            Role::ControlSystemsDesigner => self.control_designer,
            Role::FinancialDirector => self.financial_director,
        }
    }

    /// Color for an owner title; unknown titles get `unknown_owner`
    pub fn owner_color(&self, owner: &str) -> Rgb {
        Role::from_label(owner)
            .map(|role| self.role_color(role))
            .unwrap_or(self.unknown_owner)
    }

    /// Bar color: status color once finished, owner color while pending
    pub fn bar_color(&self, activity: &Activity, status: StatusCategory) -> Rgb {
        if activity.completed {
            self.status_color(status)
        } else {
            self.owner_color(&activity.owner)
        }
    }
}
