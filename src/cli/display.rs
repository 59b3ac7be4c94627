// Text rendering for routing results and session data

use crate::feedback::FeedbackRecord;
use crate::patient::PatientCase;
use crate::router::{rules, Confidence, RoutingDecision};
use crate::session::SessionLog;

fn confidence_marker(confidence: Confidence) -> &'static str {
    match confidence {
        Confidence::High => "\x1b[1;32m",
        Confidence::Medium => "\x1b[1;33m",
        Confidence::Low => "\x1b[1;31m",
    }
}

/// Render a routing recommendation
pub fn format_decision(case: &PatientCase, decision: &RoutingDecision) -> String {
    let clinic = decision.destination;
    let mut out = format!(
        "{}\n\n\
        \x1b[1mRecommended:\x1b[0m {} - {}\n  {}\n\
        \x1b[1mConfidence:\x1b[0m {}{}\x1b[0m\n\
        \x1b[1mRule:\x1b[0m {}\n\
        \x1b[1mReasoning:\x1b[0m",
        case.summary(),
        clinic.code(),
        clinic.full_name(),
        clinic.description(),
        confidence_marker(decision.confidence),
        decision.confidence,
        decision.rule,
    );
    for reason in &decision.rationale {
        out.push_str(&format!("\n  • {}", reason));
    }
    out
}

/// Case and decision as one JSON document, for scripted use of `route --json`
pub fn decision_json(case: &PatientCase, decision: &RoutingDecision) -> serde_json::Value {
    serde_json::json!({
        "case": case,
        "decision": decision,
    })
}

/// Render one record, algorithm vs clinician side by side
pub fn format_record(record: &FeedbackRecord) -> String {
    let mut out = format!(
        "Case {}: {}\n  Algorithm: {} ({} confidence, rule {})\n  Clinician: {} [{}]",
        record.id,
        record.case.summary(),
        record.decision.destination,
        record.decision.confidence,
        record.decision.rule,
        record.clinician_judgment,
        record.verdict,
    );
    if let Some(notes) = &record.case_notes {
        out.push_str(&format!("\n  Case notes: {}", notes));
    }
    if let Some(note) = &record.clinician_note {
        out.push_str(&format!("\n  Clinical reasoning: {}", note));
    }
    out
}

/// Render the agreement summary
pub fn format_summary(log: &SessionLog) -> String {
    let summary = log.summary();
    format!(
        "Session {}\n\
        Routing tests: {}\n\
        Edge cases documented: {}\n\
        Algorithm agreement rate: {:.1}% ({}/{} cases)",
        log.id(),
        summary.total_tests,
        log.edge_cases().len(),
        summary.agreement_rate,
        summary.matches,
        summary.total_tests,
    )
}

/// Render the cases where clinical judgment differed
pub fn format_disagreements(log: &SessionLog) -> String {
    let blocks: Vec<String> = log.disagreements().map(format_record).collect();
    if blocks.is_empty() {
        return "No disagreements recorded yet.".to_string();
    }
    blocks.join("\n\n")
}

/// Render collected edge cases
pub fn format_edge_cases(log: &SessionLog) -> String {
    if log.edge_cases().is_empty() {
        return "No edge cases documented yet. Add one with /edge <description> | <challenge>".to_string();
    }

    let mut blocks = Vec::new();
    for (idx, edge) in log.edge_cases().iter().enumerate() {
        let mut block = format!("Edge case {}: {}", idx + 1, edge.headline());
        block.push_str(&format!("\n  Description: {}", edge.description));
        if !edge.challenge.is_empty() {
            block.push_str(&format!("\n  Challenge: {}", edge.challenge));
        }
        if let Some(decision) = &edge.decision {
            block.push_str(&format!("\n  Resolution: {}", decision));
        }
        blocks.push(block);
    }
    blocks.join("\n\n")
}

/// Render the decision table in precedence order
pub fn format_rules() -> String {
    let mut out = String::from("Routing rules (first match wins):");
    for (idx, rule) in rules().iter().enumerate() {
        out.push_str(&format!(
            "\n{:>3}. {:<24} {:<7} {:<6} {}",
            idx + 1,
            rule.name,
            rule.destination.code(),
            rule.confidence.as_str(),
            rule.summary
        ));
    }
    out.push_str(
        "\n\nKnown limitations:\n\
        • Dual diagnoses (e.g., autism + new onset psychosis)\n\
        • Medical complexity (e.g., genetic syndromes)\n\
        • Family preference/history with specific clinics\n\
        • Insurance/access constraints\n\
        • Cases requiring immediate crisis intervention",
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{ClinicianJudgment, EdgeCase, Feedback};
    use crate::patient::{Comorbidity, PrimaryConcern};
    use crate::router::route;

    #[test]
    fn test_format_decision() {
        let case = PatientCase::new(6, PrimaryConcern::SeizuresEpilepsy, [Comorbidity::AutismSpectrum]).unwrap();
        let text = format_decision(&case, &route(&case));

        assert!(text.contains("CAN - Child & Adolescent Neurology"));
        assert!(text.contains("Medium"));
        assert!(text.contains("seizures-developmental"));
        assert!(text.contains("• Seizures with developmental concerns - complex case"));
    }

    #[test]
    fn test_decision_json_shape() {
        let case = PatientCase::new(
            13,
            PrimaryConcern::AutismSpectrum,
            [Comorbidity::Depression, Comorbidity::SuicidalIdeation],
        )
        .unwrap();
        let value = decision_json(&case, &route(&case));

        assert_eq!(value["case"]["age"], 13);
        assert_eq!(value["case"]["primary_concern"], "autism-spectrum");
        let comorbidities = value["case"]["comorbidities"].as_array().unwrap();
        assert_eq!(comorbidities.len(), 2);
        assert!(comorbidities.contains(&serde_json::json!("suicidal-ideation")));

        assert_eq!(value["decision"]["destination"], "PPC");
        assert_eq!(value["decision"]["confidence"], "Medium");
        assert_eq!(value["decision"]["rule"], "suicidal-ideation");
        assert!(!value["decision"]["rationale"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_format_summary_and_disagreements() {
        let mut log = SessionLog::new();
        assert_eq!(format_disagreements(&log), "No disagreements recorded yet.");

        let case = PatientCase::new(5, PrimaryConcern::DevelopmentalDelay, []).unwrap();
        let decision = route(&case);
        log.record(
            case,
            decision,
            Feedback::disagree(ClinicianJudgment::DualAssessment).with_note("Genetic syndrome"),
        );

        assert!(format_summary(&log).contains("0.0% (0/1 cases)"));
        let text = format_disagreements(&log);
        assert!(text.contains("Case 1: Age 5, Developmental Delay"));
        assert!(text.contains("Needs dual assessment"));
        assert!(text.contains("Clinical reasoning: Genetic syndrome"));
    }

    #[test]
    fn test_format_edge_cases() {
        let mut log = SessionLog::new();
        log.add_edge_case(
            EdgeCase::new("Autism with new seizures", "Needs two clinics")
                .unwrap()
                .with_decision("CAN first"),
        );
        let text = format_edge_cases(&log);
        assert!(text.contains("Edge case 1: Autism with new seizures"));
        assert!(text.contains("Resolution: CAN first"));
    }

    #[test]
    fn test_format_rules_lists_every_rule() {
        let text = format_rules();
        for rule in rules() {
            assert!(text.contains(rule.name));
        }
        assert!(text.contains("Known limitations"));
    }
}
