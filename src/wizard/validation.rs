//! Field rules. Every rule is a pure function of a single value; there is no
//! cross-field validation.

use super::form::Field;

pub const POSTAL_CODE_LEN: usize = 6;
pub const TRACKING_ID_LEN: usize = 16;
pub const VERIFICATION_ID_LEN: usize = 12;

/// Outcome of checking one field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub reason: Option<&'static str>,
}

impl ValidationResult {
    pub const VALID: Self = Self {
        valid: true,
        reason: None,
    };

    pub fn invalid(reason: &'static str) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
        }
    }

    fn check(valid: bool, reason: &'static str) -> Self {
        if valid { Self::VALID } else { Self::invalid(reason) }
    }
}

/// Masked-input normalization: keep ASCII digits, drop everything past `max_len`.
pub fn digits_only(value: &str, max_len: usize) -> String {
    value
        .chars()
        .filter(char::is_ascii_digit)
        .take(max_len)
        .collect()
}

/// Whitespace-only counts as empty
pub fn is_non_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn is_fixed_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_valid_postal_code(value: &str) -> bool {
    is_fixed_digits(value, POSTAL_CODE_LEN)
}

/// 16-digit enrollment (tracking) identifier
pub fn is_valid_tracking_id(value: &str) -> bool {
    is_fixed_digits(value, TRACKING_ID_LEN)
}

/// 12-digit identifier used to unlock the update flow
pub fn is_valid_verification_id(value: &str) -> bool {
    is_fixed_digits(value, VERIFICATION_ID_LEN)
}

pub fn validate(field: Field, value: &str) -> ValidationResult {
    match field {
        Field::PostalCode => {
            ValidationResult::check(is_valid_postal_code(value), "PIN code must be 6 digits")
        }
        Field::Email => ValidationResult::VALID,
        Field::Name => ValidationResult::check(is_non_empty(value), "Name is required"),
        Field::DateOfBirth => {
            ValidationResult::check(is_non_empty(value), "Date of birth is required")
        }
        Field::Gender => ValidationResult::check(is_non_empty(value), "Gender is required"),
        Field::Phone => ValidationResult::check(is_non_empty(value), "Mobile number is required"),
        Field::Address => ValidationResult::check(is_non_empty(value), "Address is required"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postal_code_validity_tracks_masked_length() {
        let inputs = [
            "", "5", "56000", "560001", "5600012345", "56-00-01", "abc", "PIN 560 001",
            "١٢٣٤٥٦", "12a34b56c78",
        ];
        for raw in inputs {
            let masked = digits_only(raw, POSTAL_CODE_LEN);
            assert_eq!(
                is_valid_postal_code(&masked),
                masked.len() == POSTAL_CODE_LEN,
                "input {raw:?} masked to {masked:?}"
            );
        }
    }

    #[test]
    fn mask_truncates_silently() {
        assert_eq!(digits_only("5600019999", 6), "560001");
        assert_eq!(digits_only("+91 98765 43210", 12), "919876543210");
    }

    #[test]
    fn mask_ignores_non_ascii_digits() {
        assert_eq!(digits_only("१२३", 6), "");
    }

    #[test]
    fn identifier_lengths() {
        assert!(is_valid_tracking_id("1234567890123456"));
        assert!(!is_valid_tracking_id("123456789012345"));
        assert!(!is_valid_tracking_id("12345678901234567"));
        assert!(is_valid_verification_id("123456789012"));
        assert!(!is_valid_verification_id("12345678901a"));
    }

    #[test]
    fn required_fields_reject_blank_values() {
        let result = validate(Field::Address, "   ");
        assert!(!result.valid);
        assert_eq!(result.reason, Some("Address is required"));
        assert!(validate(Field::Name, "Ananya Devi").valid);
    }

    #[test]
    fn email_is_optional() {
        assert!(validate(Field::Email, "").valid);
    }
}
