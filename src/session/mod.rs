// Session module
// In-memory feedback log and its export

mod export;
mod log;

pub use export::{export_file_name, write_export, SessionExport};
pub use log::{SessionLog, SessionSummary};
