//! Enrollment wizard core: form state, field rules and step progression.

mod form;
mod hints;
mod steps;
mod update;
pub mod validation;

pub use form::{Field, FormState};
pub use hints::{name_suggestions, upcoming_festivals, Festival, FESTIVALS};
pub use steps::{EnrollmentStep, StepController};
pub use update::{
    resident_profile, ScanState, UpdateOutcome, UpdateSession, SCAN_COMPLETE_NARRATION,
    UPDATE_FIELDS, UPDATE_OPTIONS, VERIFIED_NARRATION,
};
pub use validation::ValidationResult;

use serde::Deserialize;
use tracing::{debug, info};

pub const PIN_DETECTED_NARRATION: &str = "Great! Valid PIN code detected!";

/// Whether advancing requires the current step's required fields to be valid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdvancePolicy {
    #[default]
    Permissive,
    RequireValidStep,
}

/// Assistant reaction to the latest edit, rendered by the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssistantMood {
    #[default]
    Happy,
    Excited,
    Thinking,
    Celebrating,
}

impl AssistantMood {
    pub fn face(&self) -> &'static str {
        match self {
            AssistantMood::Happy => "(^_^)",
            AssistantMood::Excited => "(^o^)/",
            AssistantMood::Thinking => "(o_o)?",
            AssistantMood::Celebrating => "\\(^O^)/",
        }
    }
}

/// What a field edit produced besides the stored value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldEffect {
    pub mood: AssistantMood,
    pub narration: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepMove {
    Moved,
    /// Already at the end of the range
    Clamped,
    /// Refused by [`AdvancePolicy::RequireValidStep`]
    Blocked(Vec<Field>),
    /// The wizard was submitted; navigation is over
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardPhase {
    #[default]
    Editing,
    Submitted,
}

/// One enrollment session. Dropped when the user leaves the view.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentWizard {
    form: FormState,
    steps: StepController,
    policy: AdvancePolicy,
    mood: AssistantMood,
    phase: WizardPhase,
}

impl EnrollmentWizard {
    pub fn new(policy: AdvancePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn steps(&self) -> &StepController {
        &self.steps
    }

    pub fn policy(&self) -> AdvancePolicy {
        self.policy
    }

    pub fn mood(&self) -> AssistantMood {
        self.mood
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn is_submitted(&self) -> bool {
        self.phase == WizardPhase::Submitted
    }

    pub fn current_step(&self) -> EnrollmentStep {
        EnrollmentStep::from_number(self.steps.current()).unwrap_or(EnrollmentStep::PersonalDetails)
    }

    /// Store a field value. Never rejected; returns the derived reaction.
    pub fn set_field(&mut self, field: Field, value: &str) -> FieldEffect {
        let previous_pin_valid = validation::is_valid_postal_code(self.form.get(Field::PostalCode));
        let stored = self.form.set(field, value);

        let effect = match field {
            Field::Name if !stored.is_empty() => FieldEffect {
                mood: AssistantMood::Excited,
                narration: None,
            },
            Field::PostalCode if validation::is_valid_postal_code(stored) => FieldEffect {
                mood: AssistantMood::Celebrating,
                // Only announce the transition into a complete code
                narration: (!previous_pin_valid).then_some(PIN_DETECTED_NARRATION),
            },
            _ => FieldEffect {
                mood: AssistantMood::Thinking,
                narration: None,
            },
        };
        self.mood = effect.mood;
        effect
    }

    /// Validity of every field on `step`
    pub fn step_validity(&self, step: EnrollmentStep) -> Vec<(Field, ValidationResult)> {
        step.fields()
            .iter()
            .map(|field| (*field, self.form.validity(*field)))
            .collect()
    }

    pub fn advance(&mut self) -> StepMove {
        if self.is_submitted() {
            return StepMove::Finished;
        }
        if !self.steps.can_advance() {
            return StepMove::Clamped;
        }
        if let Some(blocked) = self.gate(self.current_step()) {
            return blocked;
        }
        self.steps.advance();
        debug!(step = self.steps.current(), "enrollment advanced");
        StepMove::Moved
    }

    pub fn retreat(&mut self) -> StepMove {
        if self.is_submitted() {
            return StepMove::Finished;
        }
        if self.steps.retreat() {
            debug!(step = self.steps.current(), "enrollment retreated");
            StepMove::Moved
        } else {
            StepMove::Clamped
        }
    }

    /// Jump to a lower step or to the next one
    pub fn jump_to(&mut self, step: usize) -> StepMove {
        if self.is_submitted() {
            return StepMove::Finished;
        }
        if step == self.steps.current() + 1 {
            return self.advance();
        }
        if self.steps.jump_to(step) {
            StepMove::Moved
        } else {
            StepMove::Clamped
        }
    }

    /// Complete the enrollment. Only available on the last step.
    pub fn submit(&mut self) -> StepMove {
        if self.is_submitted() {
            return StepMove::Finished;
        }
        if !self.steps.is_last() {
            return StepMove::Clamped;
        }
        if self.policy == AdvancePolicy::RequireValidStep {
            let missing: Vec<Field> = EnrollmentStep::ALL
                .iter()
                .flat_map(|step| self.form.invalid_fields(&step.required_fields()))
                .collect();
            if !missing.is_empty() {
                return StepMove::Blocked(missing);
            }
        }
        self.phase = WizardPhase::Submitted;
        self.mood = AssistantMood::Celebrating;
        info!("Enrollment submitted");
        StepMove::Finished
    }

    fn gate(&self, step: EnrollmentStep) -> Option<StepMove> {
        match self.policy {
            AdvancePolicy::Permissive => None,
            AdvancePolicy::RequireValidStep => {
                let invalid = self.form.invalid_fields(&step.required_fields());
                (!invalid.is_empty()).then_some(StepMove::Blocked(invalid))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permissive_policy_advances_with_empty_form() {
        let mut wizard = EnrollmentWizard::new(AdvancePolicy::Permissive);
        assert_eq!(wizard.advance(), StepMove::Moved);
        assert_eq!(wizard.advance(), StepMove::Moved);
        assert_eq!(wizard.advance(), StepMove::Moved);
        assert_eq!(wizard.current_step(), EnrollmentStep::Verification);
        assert_eq!(wizard.advance(), StepMove::Clamped);
    }

    #[test]
    fn strict_policy_blocks_until_required_fields_are_filled() {
        let mut wizard = EnrollmentWizard::new(AdvancePolicy::RequireValidStep);
        assert_eq!(
            wizard.advance(),
            StepMove::Blocked(vec![Field::Name, Field::DateOfBirth, Field::Gender])
        );
        wizard.set_field(Field::Name, "Diya Kumari");
        wizard.set_field(Field::DateOfBirth, "2001-03-14");
        wizard.set_field(Field::Gender, "Female");
        assert_eq!(wizard.advance(), StepMove::Moved);
        assert_eq!(wizard.current_step(), EnrollmentStep::ContactInfo);
    }

    #[test]
    fn strict_policy_ignores_optional_email() {
        let mut wizard = EnrollmentWizard::new(AdvancePolicy::RequireValidStep);
        wizard.set_field(Field::Name, "Diya Kumari");
        wizard.set_field(Field::DateOfBirth, "2001-03-14");
        wizard.set_field(Field::Gender, "Female");
        wizard.advance();
        wizard.set_field(Field::Phone, "+91 90000 00000");
        assert_eq!(wizard.advance(), StepMove::Moved);
    }

    #[test]
    fn retreat_never_blocks() {
        let mut wizard = EnrollmentWizard::new(AdvancePolicy::RequireValidStep);
        assert_eq!(wizard.retreat(), StepMove::Clamped);
        wizard.set_field(Field::Name, "x");
        wizard.set_field(Field::DateOfBirth, "x");
        wizard.set_field(Field::Gender, "Other");
        wizard.advance();
        assert_eq!(wizard.retreat(), StepMove::Moved);
    }

    #[test]
    fn mood_follows_the_last_edit() {
        let mut wizard = EnrollmentWizard::default();
        assert_eq!(wizard.mood(), AssistantMood::Happy);
        assert_eq!(wizard.set_field(Field::Name, "A").mood, AssistantMood::Excited);
        assert_eq!(wizard.set_field(Field::Name, "").mood, AssistantMood::Thinking);
        assert_eq!(wizard.set_field(Field::Phone, "9").mood, AssistantMood::Thinking);
    }

    #[test]
    fn completing_the_pin_code_narrates_once() {
        let mut wizard = EnrollmentWizard::default();
        assert_eq!(wizard.set_field(Field::PostalCode, "56000").narration, None);
        let effect = wizard.set_field(Field::PostalCode, "560001");
        assert_eq!(effect.mood, AssistantMood::Celebrating);
        assert_eq!(effect.narration, Some(PIN_DETECTED_NARRATION));
        // Excess digits are dropped, the code stays the same and valid
        let effect = wizard.set_field(Field::PostalCode, "5600017");
        assert_eq!(effect.narration, None);
        assert_eq!(wizard.form().get(Field::PostalCode), "560001");
    }

    #[test]
    fn submit_only_from_last_step() {
        let mut wizard = EnrollmentWizard::default();
        assert_eq!(wizard.submit(), StepMove::Clamped);
        assert!(!wizard.is_submitted());
        wizard.jump_to(2);
        wizard.jump_to(3);
        wizard.jump_to(4);
        assert_eq!(wizard.submit(), StepMove::Finished);
        assert!(wizard.is_submitted());
        assert_eq!(wizard.retreat(), StepMove::Finished);
        assert_eq!(wizard.steps().current(), 4);
    }

    #[test]
    fn strict_submit_reports_every_missing_field() {
        let mut wizard = EnrollmentWizard::new(AdvancePolicy::Permissive);
        while wizard.advance() == StepMove::Moved {}
        wizard.policy = AdvancePolicy::RequireValidStep;
        match wizard.submit() {
            StepMove::Blocked(missing) => {
                assert_eq!(missing.len(), 6);
                assert!(!missing.contains(&Field::Email));
            }
            other => panic!("expected Blocked, got {other:?}"),
        }
    }

    #[test]
    fn jump_forward_respects_the_gate() {
        let mut wizard = EnrollmentWizard::new(AdvancePolicy::RequireValidStep);
        assert!(matches!(wizard.jump_to(2), StepMove::Blocked(_)));
        assert_eq!(wizard.jump_to(3), StepMove::Clamped);
    }

    #[test]
    fn policy_parses_from_config_strings() {
        #[derive(Deserialize)]
        struct Holder {
            policy: AdvancePolicy,
        }
        let holder: Holder = toml::from_str("policy = \"require-valid-step\"").unwrap();
        assert_eq!(holder.policy, AdvancePolicy::RequireValidStep);
    }
}
