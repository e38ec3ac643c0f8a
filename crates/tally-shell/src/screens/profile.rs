//! Profile tab: three independently selectable form fields.
//!
//! Each field is bound to a static ordered option list; picking goes
//! through the shared drawer, and the selection comes back as a
//! [`ProfileEvent`] over the shell's event channel.

use tokio::sync::mpsc;

use crate::drawer::DrawerRequest;

/// Screen-level description shown above the form.
pub const DESCRIPTION: &str =
    "We use this info to tailor categorization and suggest smart rules based on your work.";

pub const ACHIEVEMENT_OPTIONS: [&str; 5] = [
    "Separate personal and business expenses",
    "Track tax deductible expenses",
    "Monitor cash flow and budgeting",
    "Prepare for tax season",
    "Organize receipts digitally",
];

pub const WORK_TYPE_OPTIONS: [&str; 6] = [
    "Freelancer / Independent Contractor",
    "Small Business Owner",
    "Consultant",
    "Real Estate Agent",
    "Sales Representative",
    "Self-Employed Professional",
];

pub const SECTOR_OPTIONS: [&str; 9] = [
    "Real Estate (Agents, Property Management)",
    "Technology / Software",
    "Healthcare / Medical",
    "Marketing / Advertising",
    "Construction / Trades",
    "Retail / E-commerce",
    "Finance / Accounting",
    "Education / Training",
    "Other",
];

/// The three selectable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Achievement,
    WorkType,
    Sector,
}

impl ProfileField {
    /// Picker title, as shown in the drawer header.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Achievement => "What are you hoping to achieve?",
            Self::WorkType => "Who are you, how do you work?",
            Self::Sector => "What sector do you primarily operate in?",
        }
    }

    /// Static ordered option list for the field.
    pub const fn options(self) -> &'static [&'static str] {
        match self {
            Self::Achievement => &ACHIEVEMENT_OPTIONS,
            Self::WorkType => &WORK_TYPE_OPTIONS,
            Self::Sector => &SECTOR_OPTIONS,
        }
    }
}

/// A selection made through the drawer, routed back to the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEvent {
    Selected(ProfileField, String),
}

/// Locally held form state for the Profile tab.
#[derive(Debug, Clone)]
pub struct ProfileScreen {
    achievement: String,
    work_type: String,
    sector: String,
}

impl Default for ProfileScreen {
    fn default() -> Self {
        Self {
            achievement: ACHIEVEMENT_OPTIONS[0].to_string(),
            work_type: WORK_TYPE_OPTIONS[0].to_string(),
            sector: SECTOR_OPTIONS[0].to_string(),
        }
    }
}

impl ProfileScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a field.
    pub fn value(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Achievement => &self.achievement,
            ProfileField::WorkType => &self.work_type,
            ProfileField::Sector => &self.sector,
        }
    }

    /// Build the drawer request for a field; the callback routes the
    /// selection back through `events`.
    pub fn picker_request(
        field: ProfileField,
        events: mpsc::UnboundedSender<ProfileEvent>,
    ) -> DrawerRequest {
        let options = field.options().iter().map(ToString::to_string).collect();
        DrawerRequest::new(field.title(), options, move |value| {
            let _ = events.send(ProfileEvent::Selected(field, value.to_string()));
        })
    }

    /// Apply a routed selection.
    pub fn apply(&mut self, event: ProfileEvent) {
        let ProfileEvent::Selected(field, value) = event;
        match field {
            ProfileField::Achievement => self.achievement = value,
            ProfileField::WorkType => self.work_type = value,
            ProfileField::Sector => self.sector = value,
        }
    }
}
