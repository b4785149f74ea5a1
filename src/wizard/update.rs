use super::form::{Field, FormState};
use super::validation::is_valid_verification_id;
use tracing::info;

pub const VERIFIED_NARRATION: &str = "Aadhaar verified successfully! Welcome back, Priya!";
pub const SCAN_COMPLETE_NARRATION: &str = "Pehchan scan complete! Identity verified successfully!";

/// Fields shown on the update form, in display order
pub const UPDATE_FIELDS: [Field; 6] = [
    Field::Name,
    Field::DateOfBirth,
    Field::Phone,
    Field::Email,
    Field::Address,
    Field::PostalCode,
];

/// Kinds of change a resident can request
pub const UPDATE_OPTIONS: [&str; 8] = [
    "Name",
    "Date of Birth",
    "Gender",
    "Mobile Number",
    "Email Address",
    "Address",
    "Photo",
    "Biometrics",
];

const SCAN_STEP: u8 = 10;

/// The fixed resident record unlocked by verification
pub fn resident_profile() -> FormState {
    FormState::new()
        .with(Field::Name, "Priya Sharma")
        .with(Field::DateOfBirth, "1995-03-15")
        .with(Field::Gender, "Female")
        .with(Field::Phone, "+91 98765 43210")
        .with(Field::Email, "priya.sharma@email.com")
        .with(Field::Address, "123, MG Road, Bangalore, Karnataka")
        .with(Field::PostalCode, "560001")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    #[default]
    Idle,
    Scanning { progress: u8 },
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Submitted,
    NotVerified,
    NothingSelected,
    AlreadySubmitted,
}

/// One update-details session: verify first, then edit and request changes.
#[derive(Debug, Clone, Default)]
pub struct UpdateSession {
    profile: Option<FormState>,
    selected: [bool; UPDATE_OPTIONS.len()],
    scan: ScanState,
    submitted: bool,
}

impl UpdateSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_verified(&self) -> bool {
        self.profile.is_some()
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Unlock the form. Returns the welcome narration on success.
    pub fn verify(&mut self, verification_id: &str) -> Option<&'static str> {
        if !is_valid_verification_id(verification_id) {
            return None;
        }
        if self.profile.is_none() {
            info!("Identity verified, loading resident profile");
            self.profile = Some(resident_profile());
        }
        Some(VERIFIED_NARRATION)
    }

    pub fn profile(&self) -> Option<&FormState> {
        self.profile.as_ref()
    }

    /// Edit a profile field; ignored before verification
    pub fn set_field(&mut self, field: Field, value: &str) {
        if let Some(profile) = self.profile.as_mut() {
            profile.set(field, value);
        }
    }

    pub fn toggle_option(&mut self, idx: usize) {
        if let Some(selected) = self.selected.get_mut(idx) {
            *selected = !*selected;
        }
    }

    pub fn is_option_selected(&self, idx: usize) -> bool {
        self.selected.get(idx).copied().unwrap_or(false)
    }

    pub fn selected_options(&self) -> Vec<&'static str> {
        UPDATE_OPTIONS
            .iter()
            .zip(self.selected)
            .filter_map(|(name, on)| on.then_some(*name))
            .collect()
    }

    pub fn scan(&self) -> ScanState {
        self.scan
    }

    /// Begin (or restart) the face scan at 0%
    pub fn start_scan(&mut self) -> bool {
        if !self.is_verified() || matches!(self.scan, ScanState::Scanning { .. }) {
            return false;
        }
        self.scan = ScanState::Scanning { progress: 0 };
        true
    }

    /// Advance the scan by one step. Returns the narration when it completes.
    pub fn tick_scan(&mut self) -> Option<&'static str> {
        let ScanState::Scanning { progress } = self.scan else {
            return None;
        };
        if progress >= 100 {
            self.scan = ScanState::Complete;
            info!("Face scan complete");
            return Some(SCAN_COMPLETE_NARRATION);
        }
        self.scan = ScanState::Scanning {
            progress: (progress + SCAN_STEP).min(100),
        };
        None
    }

    pub fn submit(&mut self) -> UpdateOutcome {
        if self.submitted {
            return UpdateOutcome::AlreadySubmitted;
        }
        if !self.is_verified() {
            return UpdateOutcome::NotVerified;
        }
        if !self.selected.iter().any(|s| *s) {
            return UpdateOutcome::NothingSelected;
        }
        self.submitted = true;
        info!(options = ?self.selected_options(), "Update request submitted");
        UpdateOutcome::Submitted
    }
}
