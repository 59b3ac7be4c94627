// Clinic Router - rule-based pediatric clinic routing prototype
// Library exports

pub mod cli;
pub mod config;
pub mod errors;
pub mod feedback;
pub mod patient;
pub mod router;
pub mod session;

pub use errors::InvalidInput;
pub use patient::{Comorbidity, PatientCase, PrimaryConcern};
pub use router::{route, Clinic, Confidence, RoutingDecision};
pub use session::SessionLog;
