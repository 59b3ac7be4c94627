// Router module
// Public interface for routing decisions

mod decision;
mod rules;

pub use decision::{Clinic, Confidence, RoutingDecision};
pub use rules::{route, rules, Rule};
