// Clinician feedback on routing decisions
//
// Every routing result can be confirmed or challenged by the clinician.
// Disagreements, and the reasoning behind them, are the interesting data:
// they show where the rule table breaks down. Edge cases capture
// presentations the clinician thinks the table cannot express at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{InputField, InvalidInput};
use crate::patient::{normalize_label, PatientCase};
use crate::router::{Clinic, RoutingDecision};

/// Clinician's verdict on a routing recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The routing is correct
    Agree,
    /// The clinician would route differently
    Disagree,
    /// Complex case, the clinician is not sure either way
    Uncertain,
}

impl Verdict {
    pub fn display_str(&self) -> &'static str {
        match self {
            Verdict::Agree => "Match",
            Verdict::Disagree => "Would route differently",
            Verdict::Uncertain => "Uncertain - complex case",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_str())
    }
}

/// Where the clinician would send the patient
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClinicianJudgment {
    #[serde(rename = "DBP")]
    Dbp,
    #[serde(rename = "CAN")]
    Can,
    #[serde(rename = "PPC")]
    Ppc,
    #[serde(rename = "dual-assessment")]
    DualAssessment,
    #[serde(rename = "triage-call")]
    TriageCall,
}

impl ClinicianJudgment {
    pub const ALL: [ClinicianJudgment; 5] = [
        ClinicianJudgment::Dbp,
        ClinicianJudgment::Can,
        ClinicianJudgment::Ppc,
        ClinicianJudgment::DualAssessment,
        ClinicianJudgment::TriageCall,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            ClinicianJudgment::Dbp => "dbp",
            ClinicianJudgment::Can => "can",
            ClinicianJudgment::Ppc => "ppc",
            ClinicianJudgment::DualAssessment => "dual",
            ClinicianJudgment::TriageCall => "triage",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClinicianJudgment::Dbp => Clinic::Dbp.full_name(),
            ClinicianJudgment::Can => Clinic::Can.full_name(),
            ClinicianJudgment::Ppc => Clinic::Ppc.full_name(),
            ClinicianJudgment::DualAssessment => "Needs dual assessment",
            ClinicianJudgment::TriageCall => "Needs triage call",
        }
    }

    /// The single clinic this judgment names, if any
    pub fn clinic(&self) -> Option<Clinic> {
        match self {
            ClinicianJudgment::Dbp => Some(Clinic::Dbp),
            ClinicianJudgment::Can => Some(Clinic::Can),
            ClinicianJudgment::Ppc => Some(Clinic::Ppc),
            ClinicianJudgment::DualAssessment | ClinicianJudgment::TriageCall => None,
        }
    }
}

impl From<Clinic> for ClinicianJudgment {
    fn from(clinic: Clinic) -> Self {
        match clinic {
            Clinic::Dbp => ClinicianJudgment::Dbp,
            Clinic::Can => ClinicianJudgment::Can,
            Clinic::Ppc => ClinicianJudgment::Ppc,
        }
    }
}

impl fmt::Display for ClinicianJudgment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.clinic() {
            Some(clinic) => f.write_str(clinic.code()),
            None => f.write_str(self.label()),
        }
    }
}

impl FromStr for ClinicianJudgment {
    type Err = InvalidInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_label(s);
        let judgment = match key.as_str() {
            "dbp" => ClinicianJudgment::Dbp,
            "can" => ClinicianJudgment::Can,
            "ppc" => ClinicianJudgment::Ppc,
            "dual" | "dual-assessment" | "needs-dual-assessment" => ClinicianJudgment::DualAssessment,
            "triage" | "triage-call" | "needs-triage-call" => ClinicianJudgment::TriageCall,
            _ => {
                return Err(InvalidInput::UnknownValue {
                    field: InputField::ClinicianJudgment,
                    value: s.trim().to_string(),
                })
            }
        };
        Ok(judgment)
    }
}

fn non_empty(text: impl Into<String>) -> Option<String> {
    let text = text.into();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Clinician feedback on one routing decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    verdict: Verdict,
    judgment: ClinicianJudgment,
    note: Option<String>,
}

impl Feedback {
    /// Confirm the recommended destination
    pub fn agree(decision: &RoutingDecision) -> Self {
        Self {
            verdict: Verdict::Agree,
            judgment: decision.destination.into(),
            note: None,
        }
    }

    /// Record that the clinician would route elsewhere
    pub fn disagree(judgment: ClinicianJudgment) -> Self {
        Self {
            verdict: Verdict::Disagree,
            judgment,
            note: None,
        }
    }

    /// Record an uncertain verdict with the clinician's best guess
    pub fn uncertain(judgment: ClinicianJudgment) -> Self {
        Self {
            verdict: Verdict::Uncertain,
            judgment,
            note: None,
        }
    }

    /// Attach the clinician's reasoning (blank text is ignored)
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = non_empty(note);
        self
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn judgment(&self) -> ClinicianJudgment {
        self.judgment
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn clinician_agreed(&self) -> bool {
        self.verdict == Verdict::Agree
    }
}

/// One entry of the session log
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackRecord {
    /// 1-based position in the session
    pub id: usize,
    pub timestamp: DateTime<Utc>,
    pub case: PatientCase,
    /// Free-text clinical notes entered with the case
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case_notes: Option<String>,
    pub decision: RoutingDecision,
    pub clinician_agreed: bool,
    pub verdict: Verdict,
    pub clinician_judgment: ClinicianJudgment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clinician_note: Option<String>,
}

impl FeedbackRecord {
    pub(crate) fn new(
        id: usize,
        case: PatientCase,
        case_notes: Option<String>,
        decision: RoutingDecision,
        feedback: Feedback,
    ) -> Self {
        // An agreement always points at the recommended clinic
        let clinician_judgment = if feedback.clinician_agreed() {
            decision.destination.into()
        } else {
            feedback.judgment
        };

        Self {
            id,
            timestamp: Utc::now(),
            case,
            case_notes: case_notes.and_then(non_empty),
            clinician_agreed: feedback.clinician_agreed(),
            verdict: feedback.verdict,
            clinician_judgment,
            clinician_note: feedback.note,
            decision,
        }
    }
}

/// A presentation the rule table handles poorly
#[derive(Debug, Clone, Serialize)]
pub struct EdgeCase {
    pub description: String,
    pub challenge: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl EdgeCase {
    /// Create a new edge case; the description is required
    pub fn new(description: impl Into<String>, challenge: impl Into<String>) -> Result<Self, InvalidInput> {
        let description = non_empty(description).ok_or(InvalidInput::Missing {
            field: InputField::EdgeCaseDescription,
        })?;

        Ok(Self {
            description,
            challenge: challenge.into().trim().to_string(),
            decision: None,
            timestamp: Utc::now(),
        })
    }

    /// Add what the clinician decided, and why
    pub fn with_decision(mut self, decision: impl Into<String>) -> Self {
        self.decision = non_empty(decision);
        self
    }

    /// First 50 characters of the description, for listings
    pub fn headline(&self) -> String {
        let mut chars = self.description.chars();
        let head: String = chars.by_ref().take(50).collect();
        if chars.next().is_some() {
            format!("{}...", head)
        } else {
            head
        }
    }
}
