use super::validation::{self, digits_only, ValidationResult, POSTAL_CODE_LEN};
use crate::error::PortalError;
use std::collections::BTreeMap;
use std::str::FromStr;

/// The fixed set of enrollment form fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    DateOfBirth,
    Gender,
    Phone,
    Email,
    Address,
    PostalCode,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::DateOfBirth,
        Field::Gender,
        Field::Phone,
        Field::Email,
        Field::Address,
        Field::PostalCode,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::DateOfBirth => "dob",
            Field::Gender => "gender",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Address => "address",
            Field::PostalCode => "pincode",
        }
    }

    /// Bilingual label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Full Name | पूरा नाम",
            Field::DateOfBirth => "Date of Birth | जन्म तिथि",
            Field::Gender => "Gender | लिंग",
            Field::Phone => "Mobile Number | मोबाइल नंबर",
            Field::Email => "Email Address | ईमेल पता",
            Field::Address => "Full Address | पूरा पता",
            Field::PostalCode => "PIN Code | पिन कोड",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Field::Name => "Enter your full name",
            Field::DateOfBirth => "YYYY-MM-DD",
            Field::Gender => "Male / Female / Other",
            Field::Phone => "+91 XXXXX XXXXX",
            Field::Email => "your.email@example.com",
            Field::Address => "House/Flat No, Street, Area, City, State",
            Field::PostalCode => "XXXXXX",
        }
    }

    pub fn required(&self) -> bool {
        !matches!(self, Field::Email)
    }

    /// Digit limit for masked fields
    pub fn digit_limit(&self) -> Option<usize> {
        match self {
            Field::PostalCode => Some(POSTAL_CODE_LEN),
            _ => None,
        }
    }
}

impl FromStr for Field {
    type Err = PortalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Field::ALL
            .into_iter()
            .find(|field| field.key() == key)
            .ok_or_else(|| PortalError::UnknownField(s.to_string()))
    }
}

/// Field name to current value.
///
/// Writes are never rejected. Masked fields are normalized on the way in, the
/// same way a masked text input drops characters it does not accept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: BTreeMap<Field, String>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// Store `value` and return what was actually kept
    pub fn set(&mut self, field: Field, value: &str) -> &str {
        let stored = match field.digit_limit() {
            Some(max) => digits_only(value, max),
            None => value.to_string(),
        };
        self.values.insert(field, stored);
        self.get(field)
    }

    pub fn with(mut self, field: Field, value: &str) -> Self {
        self.set(field, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(|v| v.is_empty())
    }

    pub fn validity(&self, field: Field) -> ValidationResult {
        validation::validate(field, self.get(field))
    }

    /// Fields from `fields` that currently fail their rule
    pub fn invalid_fields(&self, fields: &[Field]) -> Vec<Field> {
        fields
            .iter()
            .copied()
            .filter(|field| !self.validity(*field).valid)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }
}
