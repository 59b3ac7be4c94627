// Interactive session state: the routing under review plus the session log

use crate::feedback::{Feedback, FeedbackRecord};
use crate::patient::PatientCase;
use crate::router::{route, RoutingDecision};
use crate::session::SessionLog;

/// A routed case waiting for clinician feedback
#[derive(Debug, Clone)]
pub struct PendingRouting {
    pub case: PatientCase,
    pub notes: Option<String>,
    pub decision: RoutingDecision,
}

pub struct Workbench {
    log: SessionLog,
    pending: Option<PendingRouting>,
    /// (records, edge cases) at the time of the last export
    exported: (usize, usize),
}

impl Workbench {
    pub fn new() -> Self {
        Self {
            log: SessionLog::new(),
            pending: None,
            exported: (0, 0),
        }
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut SessionLog {
        &mut self.log
    }

    pub fn pending(&self) -> Option<&PendingRouting> {
        self.pending.as_ref()
    }

    /// Route a case and hold it for feedback, replacing any earlier pending case
    pub fn route(&mut self, case: PatientCase, notes: Option<String>) -> &PendingRouting {
        let decision = route(&case);
        if self.pending.is_some() {
            tracing::debug!("Replacing routed case that received no feedback");
        }
        self.pending.insert(PendingRouting {
            case,
            notes,
            decision,
        })
    }

    /// Record feedback on the pending case
    ///
    /// `make` builds the feedback from the pending decision. Returns `None`
    /// when no case is waiting.
    pub fn submit_feedback<F>(&mut self, make: F) -> Option<&FeedbackRecord>
    where
        F: FnOnce(&RoutingDecision) -> Feedback,
    {
        let pending = self.pending.take()?;
        let feedback = make(&pending.decision);
        Some(
            self.log
                .record_with_notes(pending.case, pending.notes, pending.decision, feedback),
        )
    }

    /// Whether anything was collected since the last export
    pub fn has_unexported(&self) -> bool {
        (self.log.len(), self.log.edge_cases().len()) != self.exported
    }

    pub fn mark_exported(&mut self) {
        self.exported = (self.log.len(), self.log.edge_cases().len());
    }
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{ClinicianJudgment, EdgeCase};
    use crate::patient::PrimaryConcern;
    use crate::router::Clinic;

    #[test]
    fn test_feedback_requires_pending_case() {
        let mut bench = Workbench::new();
        assert!(bench.submit_feedback(Feedback::agree).is_none());
        assert_eq!(bench.log().len(), 0);
    }

    #[test]
    fn test_route_then_feedback_clears_pending() {
        let mut bench = Workbench::new();
        let case = PatientCase::new(14, PrimaryConcern::BehavioralProblems, []).unwrap();

        let pending = bench.route(case, Some("Fights at school".to_string()));
        assert_eq!(pending.decision.destination, Clinic::Ppc);

        let record = bench
            .submit_feedback(|_| Feedback::disagree(ClinicianJudgment::TriageCall))
            .unwrap();
        assert_eq!(record.case_notes.as_deref(), Some("Fights at school"));
        assert!(bench.pending().is_none());
        assert_eq!(bench.log().len(), 1);
    }

    #[test]
    fn test_unexported_tracking() {
        let mut bench = Workbench::new();
        assert!(!bench.has_unexported());

        bench
            .log_mut()
            .add_edge_case(EdgeCase::new("Autism with new psychosis", "").unwrap());
        assert!(bench.has_unexported());

        bench.mark_exported();
        assert!(!bench.has_unexported());
    }
}
