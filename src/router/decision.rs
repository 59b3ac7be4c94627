// Routing decision types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Clinic a referral can be routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Clinic {
    Dbp,
    Can,
    Ppc,
}

impl Clinic {
    pub const ALL: [Clinic; 3] = [Clinic::Dbp, Clinic::Can, Clinic::Ppc];

    pub fn code(&self) -> &'static str {
        match self {
            Clinic::Dbp => "DBP",
            Clinic::Can => "CAN",
            Clinic::Ppc => "PPC",
        }
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            Clinic::Dbp => "Developmental & Behavioral Pediatrics",
            Clinic::Can => "Child & Adolescent Neurology",
            Clinic::Ppc => "Pediatric Psychiatry Clinic",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Clinic::Dbp => "Autism, ADHD, developmental delays in younger children",
            Clinic::Can => "Epilepsy, complex neurological conditions, movement disorders",
            Clinic::Ppc => "Mood disorders, anxiety, behavioral health in older children/adolescents",
        }
    }
}

impl fmt::Display for Clinic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// How strongly the rule table stands behind a decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::Low => "Low",
            Confidence::Medium => "Medium",
            Confidence::High => "High",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of routing one patient case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub destination: Clinic,
    pub confidence: Confidence,
    /// Ordered explanation lines
    pub rationale: Vec<String>,
    /// Name of the rule that matched
    pub rule: String,
}

impl RoutingDecision {
    /// Rationale as a single line of text
    pub fn rationale_text(&self) -> String {
        self.rationale.join(" ")
    }
}
