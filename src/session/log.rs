// Append-only session log

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::feedback::{EdgeCase, Feedback, FeedbackRecord, Verdict};
use crate::patient::PatientCase;
use crate::router::RoutingDecision;

use super::export::SessionExport;

/// Agreement statistics for the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SessionSummary {
    pub total_tests: usize,
    pub matches: usize,
    /// Percentage of routing tests the clinician agreed with (0 when empty)
    pub agreement_rate: f64,
}

/// Everything collected during one run of the tool
///
/// Entries can only be appended. Nothing is written to disk unless the log
/// is exported.
#[derive(Debug, Clone)]
pub struct SessionLog {
    id: Uuid,
    started_at: DateTime<Utc>,
    records: Vec<FeedbackRecord>,
    edge_cases: Vec<EdgeCase>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            records: Vec::new(),
            edge_cases: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Append clinician feedback on a routing decision
    pub fn record(&mut self, case: PatientCase, decision: RoutingDecision, feedback: Feedback) -> &FeedbackRecord {
        self.record_with_notes(case, None, decision, feedback)
    }

    /// Append feedback together with the notes entered alongside the case
    pub fn record_with_notes(
        &mut self,
        case: PatientCase,
        case_notes: Option<String>,
        decision: RoutingDecision,
        feedback: Feedback,
    ) -> &FeedbackRecord {
        let id = self.records.len() + 1;
        let record = FeedbackRecord::new(id, case, case_notes, decision, feedback);

        tracing::info!(
            id,
            destination = %record.decision.destination,
            verdict = ?record.verdict,
            "Recorded clinician feedback"
        );

        self.records.push(record);
        &self.records[self.records.len() - 1]
    }

    /// Append an edge case note
    pub fn add_edge_case(&mut self, edge_case: EdgeCase) -> &EdgeCase {
        tracing::info!(count = self.edge_cases.len() + 1, "Recorded edge case");
        self.edge_cases.push(edge_case);
        &self.edge_cases[self.edge_cases.len() - 1]
    }

    /// Number of feedback records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// No feedback records yet; edge cases are not counted, as with `len`
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether any feedback record or edge case has been collected
    pub fn has_data(&self) -> bool {
        !self.records.is_empty() || !self.edge_cases.is_empty()
    }

    pub fn records(&self) -> &[FeedbackRecord] {
        &self.records
    }

    pub fn edge_cases(&self) -> &[EdgeCase] {
        &self.edge_cases
    }

    /// Records where the clinician did not confirm the routing
    pub fn disagreements(&self) -> impl Iterator<Item = &FeedbackRecord> {
        self.records.iter().filter(|r| r.verdict != Verdict::Agree)
    }

    pub fn summary(&self) -> SessionSummary {
        let total_tests = self.records.len();
        let matches = self.records.iter().filter(|r| r.clinician_agreed).count();
        let agreement_rate = if total_tests > 0 {
            matches as f64 / total_tests as f64 * 100.0
        } else {
            0.0
        };

        SessionSummary {
            total_tests,
            matches,
            agreement_rate,
        }
    }

    /// Snapshot of the whole session, ready to serialize
    pub fn export(&self) -> SessionExport<'_> {
        SessionExport {
            session_id: self.id,
            session_started: self.started_at,
            session_timestamp: Utc::now(),
            routing_tests: &self.records,
            edge_cases: &self.edge_cases,
            summary: self.summary(),
        }
    }
}

impl Default for SessionLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::ClinicianJudgment;
    use crate::patient::{Comorbidity, PrimaryConcern};
    use crate::router::{route, Clinic};

    fn routed(age: i64, concern: PrimaryConcern, comorbidities: &[Comorbidity]) -> (PatientCase, RoutingDecision) {
        let case = PatientCase::new(age, concern, comorbidities.iter().copied()).unwrap();
        let decision = route(&case);
        (case, decision)
    }

    #[test]
    fn test_empty_session() {
        let log = SessionLog::new();
        assert!(log.is_empty());
        assert!(!log.has_data());
        assert_eq!(log.len(), 0);

        let summary = log.summary();
        assert_eq!(summary.total_tests, 0);
        assert_eq!(summary.matches, 0);
        assert_eq!(summary.agreement_rate, 0.0);
    }

    #[test]
    fn test_record_assigns_sequential_ids() {
        let mut log = SessionLog::new();

        let (case, decision) = routed(7, PrimaryConcern::AdhdOnly, &[]);
        let feedback = Feedback::agree(&decision);
        assert_eq!(log.record(case, decision, feedback).id, 1);

        let (case, decision) = routed(14, PrimaryConcern::SeizuresEpilepsy, &[]);
        let record = log.record(case, decision, Feedback::disagree(ClinicianJudgment::DualAssessment));
        assert_eq!(record.id, 2);
        assert_eq!(record.decision.destination, Clinic::Can);

        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_summary_and_disagreements() {
        let mut log = SessionLog::new();

        for age in [6, 7, 9] {
            let (case, decision) = routed(age, PrimaryConcern::BehavioralProblems, &[]);
            let feedback = Feedback::agree(&decision);
            log.record(case, decision, feedback);
        }
        let (case, decision) = routed(12, PrimaryConcern::AutismSpectrum, &[Comorbidity::Anxiety]);
        log.record(case, decision, Feedback::uncertain(ClinicianJudgment::Dbp).with_note("Autism first"));

        let summary = log.summary();
        assert_eq!(summary.total_tests, 4);
        assert_eq!(summary.matches, 3);
        assert!((summary.agreement_rate - 75.0).abs() < 1e-9);

        let disagreements: Vec<_> = log.disagreements().collect();
        assert_eq!(disagreements.len(), 1);
        assert_eq!(disagreements[0].id, 4);
        assert_eq!(disagreements[0].clinician_note.as_deref(), Some("Autism first"));
    }

    #[test]
    fn test_edge_cases_are_kept_in_order() {
        let mut log = SessionLog::new();
        log.add_edge_case(EdgeCase::new("First", "").unwrap());
        log.add_edge_case(EdgeCase::new("Second", "Hard").unwrap());

        assert!(log.has_data());
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        let descriptions: Vec<_> = log.edge_cases().iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, vec!["First", "Second"]);
    }
}
