use std::collections::HashMap;
use std::sync::LazyLock;

/// A named milestone inside a pending record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    pub name: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusDetail {
    Pending {
        estimated_completion: String,
        checkpoints: Vec<Checkpoint>,
    },
    Accepted {
        issued_id: String,
    },
    Rejected {
        reason: String,
        remediation: Vec<String>,
    },
}

/// Processing status of one enrollment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRecord {
    pub title: String,
    pub message: String,
    pub updated_at: String,
    pub detail: StatusDetail,
}

impl StatusRecord {
    pub fn label(&self) -> &'static str {
        match self.detail {
            StatusDetail::Pending { .. } => "In Progress",
            StatusDetail::Accepted { .. } => "Accepted",
            StatusDetail::Rejected { .. } => "Rejected",
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self.detail, StatusDetail::Accepted { .. })
    }

    /// Sentence spoken when this record is displayed
    pub fn narration(&self) -> &'static str {
        match self.detail {
            StatusDetail::Pending { .. } => {
                "Your Aadhaar is being processed. Please wait for completion."
            }
            StatusDetail::Accepted { .. } => {
                "Congratulations! Your Aadhaar has been generated successfully!"
            }
            StatusDetail::Rejected { .. } => {
                "Your enrollment was rejected. Please check the details for next steps."
            }
        }
    }
}

/// Identifiers with a seeded record, in display order, with their labels
pub const SAMPLE_IDS: [(&str, &str); 3] = [
    ("1234567890123456", "In Progress"),
    ("9876543210987654", "Accepted"),
    ("5555666677778888", "Rejected"),
];

fn checkpoint(name: &str, completed: bool) -> Checkpoint {
    Checkpoint {
        name: name.to_string(),
        completed,
    }
}

/// Immutable table behind the mock lookup
pub(crate) static SEEDED: LazyLock<HashMap<&'static str, StatusRecord>> = LazyLock::new(|| {
    HashMap::from([
        (
            "1234567890123456",
            StatusRecord {
                title: "Enrollment In Progress".to_string(),
                message: "Your Aadhaar enrollment is being processed".to_string(),
                updated_at: "2025-01-15 14:30:00".to_string(),
                detail: StatusDetail::Pending {
                    estimated_completion: "2-3 working days".to_string(),
                    checkpoints: vec![
                        checkpoint("Application Received", true),
                        checkpoint("Biometric Verification", true),
                        checkpoint("Document Verification", false),
                        checkpoint("Quality Check", false),
                        checkpoint("Aadhaar Generation", false),
                    ],
                },
            },
        ),
        (
            "9876543210987654",
            StatusRecord {
                title: "Aadhaar Generated Successfully!".to_string(),
                message: "Your Aadhaar has been generated and is ready for download".to_string(),
                updated_at: "2025-01-14 16:45:00".to_string(),
                detail: StatusDetail::Accepted {
                    issued_id: "1234 5678 9012".to_string(),
                },
            },
        ),
        (
            "5555666677778888",
            StatusRecord {
                title: "Enrollment Rejected".to_string(),
                message: "Your enrollment could not be processed due to quality issues".to_string(),
                updated_at: "2025-01-13 11:20:00".to_string(),
                detail: StatusDetail::Rejected {
                    reason: "Biometric quality insufficient".to_string(),
                    remediation: vec![
                        "Visit nearest Aadhaar center for re-enrollment".to_string(),
                        "Ensure clean fingers for fingerprint capture".to_string(),
                        "Carry original documents for verification".to_string(),
                    ],
                },
            },
        ),
    ])
});
