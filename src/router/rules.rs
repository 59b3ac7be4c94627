// Ordered routing rule table
//
// Rules are evaluated top to bottom and the first match wins. The last rule
// always matches, so every valid case gets a decision.

use super::decision::{Clinic, Confidence, RoutingDecision};
use crate::patient::{Comorbidity, PatientCase, PrimaryConcern};

/// One row of the decision table
pub struct Rule {
    pub name: &'static str,
    pub summary: &'static str,
    pub destination: Clinic,
    pub confidence: Confidence,
    applies: fn(&PatientCase) -> bool,
    rationale: fn(&PatientCase) -> Vec<String>,
}

impl Rule {
    pub fn applies(&self, case: &PatientCase) -> bool {
        (self.applies)(case)
    }

    fn decide(&self, case: &PatientCase) -> RoutingDecision {
        RoutingDecision {
            destination: self.destination,
            confidence: self.confidence,
            rationale: (self.rationale)(case),
            rule: self.name.to_string(),
        }
    }
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn early_focus(case: &PatientCase) -> String {
    format!("Patient age {} suggests early developmental focus", case.age())
}

static RULES: [Rule; 17] = [
    Rule {
        name: "suicidal-ideation",
        summary: "Suicidal ideation present → PPC, whatever the age or concern",
        destination: Clinic::Ppc,
        confidence: Confidence::Medium,
        applies: |case| case.has(Comorbidity::SuicidalIdeation),
        rationale: |_| {
            lines(&[
                "Suicidal ideation reported - psychiatric safety evaluation takes precedence",
                "Other services may follow once safety is addressed",
            ])
        },
    },
    Rule {
        name: "early-childhood-seizures",
        summary: "Age < 5 with seizures → CAN",
        destination: Clinic::Can,
        confidence: Confidence::Medium,
        applies: |case| case.age() < 5 && case.has(Comorbidity::SeizuresEpilepsy),
        rationale: |case| {
            vec![
                early_focus(case),
                "Young child with seizures - may need dual DBP/CAN assessment".to_string(),
            ]
        },
    },
    Rule {
        name: "early-childhood",
        summary: "Age < 5 → DBP",
        destination: Clinic::Dbp,
        confidence: Confidence::High,
        applies: |case| case.age() < 5,
        rationale: |case| vec![early_focus(case)],
    },
    Rule {
        name: "autism-with-mood",
        summary: "Autism, age > 10 with depression, anxiety or suicidal ideation → PPC",
        destination: Clinic::Ppc,
        confidence: Confidence::Medium,
        applies: |case| {
            case.primary_concern() == PrimaryConcern::AutismSpectrum
                && case.age() > 10
                && case.has_any(&Comorbidity::MOOD)
        },
        rationale: |_| {
            lines(&[
                "Older child with autism AND significant mood concerns",
                "May need PPC for psychiatric symptoms, DBP for autism management",
            ])
        },
    },
    Rule {
        name: "autism",
        summary: "Autism → DBP",
        destination: Clinic::Dbp,
        confidence: Confidence::High,
        applies: |case| case.primary_concern() == PrimaryConcern::AutismSpectrum,
        rationale: |_| lines(&["Autism spectrum concerns route to DBP"]),
    },
    Rule {
        name: "adhd-young",
        summary: "ADHD, age < 8 → DBP",
        destination: Clinic::Dbp,
        confidence: Confidence::High,
        applies: |case| case.primary_concern() == PrimaryConcern::AdhdOnly && case.age() < 8,
        rationale: |_| lines(&["Younger child with ADHD - developmental lens preferred"]),
    },
    Rule {
        name: "adhd-with-anxiety",
        summary: "ADHD with school refusal or anxiety → PPC",
        destination: Clinic::Ppc,
        confidence: Confidence::High,
        applies: |case| {
            case.primary_concern() == PrimaryConcern::AdhdOnly
                && case.has_any(&[Comorbidity::SchoolRefusal, Comorbidity::Anxiety])
        },
        rationale: |_| {
            lines(&["ADHD with behavioral/anxiety components suggests psychiatric evaluation"])
        },
    },
    Rule {
        name: "adhd",
        summary: "ADHD → DBP",
        destination: Clinic::Dbp,
        confidence: Confidence::High,
        applies: |case| case.primary_concern() == PrimaryConcern::AdhdOnly,
        rationale: |_| lines(&["Straightforward ADHD in school-age child"]),
    },
    Rule {
        name: "mood-young",
        summary: "Mood or anxiety disorder, age < 10 → PPC",
        destination: Clinic::Ppc,
        confidence: Confidence::Medium,
        applies: |case| case.primary_concern().is_mood_or_anxiety() && case.age() < 10,
        rationale: |_| {
            lines(&[
                "Young child with mood disorder - consider developmental factors",
                "Primary mood/anxiety disorder routes to PPC",
            ])
        },
    },
    Rule {
        name: "mood",
        summary: "Mood or anxiety disorder → PPC",
        destination: Clinic::Ppc,
        confidence: Confidence::High,
        applies: |case| case.primary_concern().is_mood_or_anxiety(),
        rationale: |_| lines(&["Primary mood/anxiety disorder routes to PPC"]),
    },
    Rule {
        name: "seizures-developmental",
        summary: "Seizures with autism or developmental delay → CAN",
        destination: Clinic::Can,
        confidence: Confidence::Medium,
        applies: |case| {
            case.primary_concern() == PrimaryConcern::SeizuresEpilepsy
                && case.has_any(&[Comorbidity::AutismSpectrum, Comorbidity::DevelopmentalDelay])
        },
        rationale: |_| {
            lines(&[
                "Seizures with developmental concerns - complex case",
                "CAN for neurological management, may need DBP consultation",
            ])
        },
    },
    Rule {
        name: "seizures",
        summary: "Seizures → CAN",
        destination: Clinic::Can,
        confidence: Confidence::High,
        applies: |case| case.primary_concern() == PrimaryConcern::SeizuresEpilepsy,
        rationale: |_| lines(&["Primary seizure disorder routes to CAN"]),
    },
    Rule {
        name: "tics-with-adhd",
        summary: "Tics with ADHD, age < 10 → CAN",
        destination: Clinic::Can,
        confidence: Confidence::Medium,
        applies: |case| {
            case.primary_concern() == PrimaryConcern::TicsMovement
                && case.has(Comorbidity::Adhd)
                && case.age() < 10
        },
        rationale: |_| lines(&["Tics with ADHD - could be neurological or developmental"]),
    },
    Rule {
        name: "tics",
        summary: "Tics or movement disorder → CAN",
        destination: Clinic::Can,
        confidence: Confidence::High,
        applies: |case| case.primary_concern() == PrimaryConcern::TicsMovement,
        rationale: |_| lines(&["Movement disorders route to CAN neurology"]),
    },
    Rule {
        name: "behavioral-adolescent",
        summary: "Behavioral problems, age >= 10 → PPC",
        destination: Clinic::Ppc,
        confidence: Confidence::High,
        applies: |case| {
            case.primary_concern() == PrimaryConcern::BehavioralProblems && case.age() >= 10
        },
        rationale: |_| lines(&["Behavioral problems in adolescent suggest psychiatric evaluation"]),
    },
    Rule {
        name: "behavioral-young",
        summary: "Behavioral problems, age < 10 → DBP",
        destination: Clinic::Dbp,
        confidence: Confidence::High,
        applies: |case| case.primary_concern() == PrimaryConcern::BehavioralProblems,
        rationale: |_| lines(&["Behavioral problems in younger child - developmental assessment"]),
    },
    Rule {
        name: "fallback",
        summary: "Anything else → DBP for initial assessment",
        destination: Clinic::Dbp,
        confidence: Confidence::Low,
        applies: |_| true,
        rationale: |_| lines(&["Unclear presentation - defaulting to DBP for initial assessment"]),
    },
];

/// The decision table in precedence order
pub fn rules() -> &'static [Rule] {
    &RULES
}

/// Route a patient case to a clinic
///
/// Pure and deterministic: the same case always produces the same decision.
pub fn route(case: &PatientCase) -> RoutingDecision {
    let fallback = &RULES[RULES.len() - 1];
    let rule = RULES.iter().find(|r| r.applies(case)).unwrap_or(fallback);
    let decision = rule.decide(case);

    tracing::debug!(
        rule = rule.name,
        destination = %decision.destination,
        confidence = %decision.confidence,
        "Routing decision for {}",
        case.summary()
    );

    decision
}
