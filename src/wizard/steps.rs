use super::form::Field;

/// Steps of the enrollment wizard, numbered from 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentStep {
    PersonalDetails = 1,
    ContactInfo = 2,
    Address = 3,
    Verification = 4,
}

impl EnrollmentStep {
    pub const ALL: [EnrollmentStep; 4] = [
        EnrollmentStep::PersonalDetails,
        EnrollmentStep::ContactInfo,
        EnrollmentStep::Address,
        EnrollmentStep::Verification,
    ];

    pub fn number(&self) -> usize {
        *self as usize
    }

    pub fn from_number(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn title(&self) -> &'static str {
        match self {
            EnrollmentStep::PersonalDetails => "Personal Details",
            EnrollmentStep::ContactInfo => "Contact Info",
            EnrollmentStep::Address => "Address",
            EnrollmentStep::Verification => "Verification",
        }
    }

    /// Fields edited on this step, in display order
    pub fn fields(&self) -> &'static [Field] {
        match self {
            EnrollmentStep::PersonalDetails => &[Field::Name, Field::DateOfBirth, Field::Gender],
            EnrollmentStep::ContactInfo => &[Field::Phone, Field::Email],
            EnrollmentStep::Address => &[Field::Address, Field::PostalCode],
            EnrollmentStep::Verification => &[],
        }
    }

    pub fn required_fields(&self) -> Vec<Field> {
        self.fields().iter().copied().filter(Field::required).collect()
    }
}

/// Current position in a `[1, last]` step range.
///
/// Moving past either end is clamped: the call is a no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepController {
    current: usize,
    last: usize,
}

impl StepController {
    pub fn new(last: usize) -> Self {
        Self {
            current: 1,
            last: last.max(1),
        }
    }

    pub fn enrollment() -> Self {
        Self::new(EnrollmentStep::ALL.len())
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn last(&self) -> usize {
        self.last
    }

    pub fn is_first(&self) -> bool {
        self.current == 1
    }

    pub fn is_last(&self) -> bool {
        self.current == self.last
    }

    pub fn can_advance(&self) -> bool {
        self.current < self.last
    }

    pub fn can_retreat(&self) -> bool {
        self.current > 1
    }

    /// Returns whether the step changed
    pub fn advance(&mut self) -> bool {
        if self.can_advance() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Returns whether the step changed
    pub fn retreat(&mut self) -> bool {
        if self.can_retreat() {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Move to any lower step, or forward by exactly one
    pub fn jump_to(&mut self, step: usize) -> bool {
        let allowed = (1..self.current).contains(&step)
            || (step == self.current + 1 && step <= self.last);
        if allowed {
            self.current = step;
        }
        allowed
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }
}

impl Default for StepController {
    fn default() -> Self {
        Self::enrollment()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_in_range_for_any_sequence() {
        let mut steps = StepController::enrollment();
        // Deterministic pseudo-random walk over advance/retreat
        let mut seed: u32 = 0x9e37_79b9;
        for _ in 0..1_000 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            if seed % 3 == 0 {
                steps.retreat();
            } else {
                steps.advance();
            }
            assert!((1..=4).contains(&steps.current()));
        }
    }

    #[test]
    fn advance_at_last_step_is_a_no_op() {
        let mut steps = StepController::enrollment();
        while steps.advance() {}
        assert_eq!(steps.current(), 4);
        assert!(!steps.advance());
        assert_eq!(steps.current(), 4);
    }

    #[test]
    fn retreat_at_first_step_is_a_no_op() {
        let mut steps = StepController::enrollment();
        assert!(!steps.retreat());
        assert_eq!(steps.current(), 1);
    }

    #[test]
    fn jumps_back_anywhere_but_forward_by_one() {
        let mut steps = StepController::enrollment();
        assert!(!steps.jump_to(3));
        assert!(steps.jump_to(2));
        assert!(steps.jump_to(3));
        assert!(steps.jump_to(1));
        assert!(!steps.jump_to(1));
        assert!(!steps.jump_to(0));
        assert_eq!(steps.current(), 1);
    }

    #[test]
    fn jump_never_leaves_the_range() {
        let mut steps = StepController::enrollment();
        while steps.advance() {}
        assert!(!steps.jump_to(5));
        assert_eq!(steps.current(), 4);
    }

    #[test]
    fn email_is_not_required_on_contact_step() {
        assert_eq!(EnrollmentStep::ContactInfo.required_fields(), vec![Field::Phone]);
        assert!(EnrollmentStep::Verification.fields().is_empty());
        assert_eq!(EnrollmentStep::from_number(3), Some(EnrollmentStep::Address));
        assert_eq!(EnrollmentStep::from_number(5), None);
    }
}
