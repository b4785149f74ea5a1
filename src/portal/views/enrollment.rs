use crate::narration::Narrator;
use crate::vim::InputBuffer;
use crate::wizard::{
    name_suggestions, upcoming_festivals, AdvancePolicy, EnrollmentStep, EnrollmentWizard,
    Festival, Field, FieldEffect, StepMove,
};
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub const GENDERS: [&str; 3] = ["Male", "Female", "Other"];

const FESTIVALS_SHOWN: usize = 2;

/// Enrollment wizard plus the text inputs and focus that drive it
pub struct EnrollmentView {
    wizard: EnrollmentWizard,
    inputs: BTreeMap<Field, InputBuffer>,
    focus: usize,
}

impl EnrollmentView {
    pub fn new(policy: AdvancePolicy) -> Self {
        let inputs = Field::ALL
            .into_iter()
            .filter(|field| *field != Field::Gender)
            .map(|field| {
                let input = match field.digit_limit() {
                    Some(max) => InputBuffer::digits(max),
                    None => InputBuffer::new(),
                };
                (field, input)
            })
            .collect();

        Self {
            wizard: EnrollmentWizard::new(policy),
            inputs,
            focus: 0,
        }
    }

    pub fn wizard(&self) -> &EnrollmentWizard {
        &self.wizard
    }

    pub fn step(&self) -> EnrollmentStep {
        self.wizard.current_step()
    }

    pub fn focused_field(&self) -> Option<Field> {
        if self.wizard.is_submitted() {
            return None;
        }
        self.step().fields().get(self.focus).copied()
    }

    pub fn input(&self, field: Field) -> Option<&InputBuffer> {
        self.inputs.get(&field)
    }

    /// Text input under focus; gender is a choice, not text
    pub fn input_mut(&mut self) -> Option<&mut InputBuffer> {
        let field = self.focused_field()?;
        self.inputs.get_mut(&field)
    }

    pub fn focus_next(&mut self) {
        let count = self.step().fields().len();
        if count > 0 {
            self.focus = (self.focus + 1) % count;
        }
    }

    pub fn focus_prev(&mut self) {
        let count = self.step().fields().len();
        if count > 0 {
            self.focus = (self.focus + count - 1) % count;
        }
    }

    /// Push the focused input's text into the form
    pub fn commit_input(&mut self, narrator: &dyn Narrator) {
        let Some(field) = self.focused_field() else {
            return;
        };
        let Some(value) = self.inputs.get(&field).map(|i| i.content().to_string()) else {
            return;
        };
        let effect = self.wizard.set_field(field, &value);
        Self::narrate(effect, narrator);
    }

    /// Set a field directly, keeping its input in sync
    pub fn set_field(&mut self, field: Field, value: &str, narrator: &dyn Narrator) {
        let effect = self.wizard.set_field(field, value);
        if let Some(input) = self.inputs.get_mut(&field) {
            input.set(self.wizard.form().get(field));
        }
        Self::narrate(effect, narrator);
    }

    /// Step through Male / Female / Other when gender has focus
    pub fn cycle_gender(&mut self, forward: bool, narrator: &dyn Narrator) -> bool {
        if self.focused_field() != Some(Field::Gender) {
            return false;
        }
        let current = GENDERS
            .iter()
            .position(|g| *g == self.wizard.form().get(Field::Gender));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => GENDERS.len() - 1,
            (Some(i), true) => (i + 1) % GENDERS.len(),
            (Some(i), false) => (i + GENDERS.len() - 1) % GENDERS.len(),
        };
        self.set_field(Field::Gender, GENDERS[next], narrator);
        true
    }

    pub fn suggestions(&self) -> Vec<&'static str> {
        if self.focused_field() != Some(Field::Name) {
            return Vec::new();
        }
        name_suggestions(self.wizard.form().get(Field::Name))
    }

    /// Replace the name with the first suggestion, if any
    pub fn accept_suggestion(&mut self, narrator: &dyn Narrator) -> Option<&'static str> {
        let pick = self.suggestions().first().copied()?;
        self.set_field(Field::Name, pick, narrator);
        Some(pick)
    }

    pub fn festivals(&self, today: NaiveDate) -> Vec<Festival> {
        upcoming_festivals(today, FESTIVALS_SHOWN)
    }

    pub fn advance(&mut self) -> StepMove {
        let outcome = self.wizard.advance();
        self.refocus(outcome)
    }

    pub fn retreat(&mut self) -> StepMove {
        let outcome = self.wizard.retreat();
        self.refocus(outcome)
    }

    pub fn jump_to(&mut self, step: usize) -> StepMove {
        let outcome = self.wizard.jump_to(step);
        self.refocus(outcome)
    }

    pub fn submit(&mut self) -> StepMove {
        self.wizard.submit()
    }

    fn refocus(&mut self, outcome: StepMove) -> StepMove {
        if outcome == StepMove::Moved {
            self.focus = 0;
        }
        outcome
    }

    fn narrate(effect: FieldEffect, narrator: &dyn Narrator) {
        if let Some(text) = effect.narration {
            narrator.speak(text);
        }
    }
}
