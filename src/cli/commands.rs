// Slash command handling

use anyhow::Result;
use std::path::PathBuf;

use crate::config::Config;
use crate::feedback::{ClinicianJudgment, EdgeCase, Feedback};
use crate::patient::{PatientCase, PrimaryConcern};
use crate::session::write_export;

use super::display::{
    format_decision, format_disagreements, format_edge_cases, format_record, format_rules,
    format_summary,
};
use super::workbench::Workbench;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Rules,
    Summary,
    Disagreements,
    Edges,
    Route {
        age: String,
        concern: String,
        comorbidities: Vec<String>,
        notes: Option<String>,
    },
    Agree(Option<String>),
    Disagree {
        judgment: String,
        note: Option<String>,
    },
    Uncertain {
        judgment: String,
        note: Option<String>,
    },
    Edge {
        description: String,
        challenge: String,
        decision: Option<String>,
    },
    Export(Option<PathBuf>),
}

const MAX_CONCERN_WORDS: usize = 4;

fn optional(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Split "<first word> <rest>" for commands taking a judgment plus a note
fn judgment_and_note(rest: &str) -> Option<(String, Option<String>)> {
    let rest = rest.trim();
    let (judgment, note) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
    if judgment.is_empty() {
        return None;
    }
    Some((judgment.to_string(), optional(note)))
}

/// Longest run of words naming a primary concern
///
/// Multi-word labels such as "Autism Spectrum" or "ADHD Only" may be typed
/// as-is; the words after the concern are the comorbidity list. When no
/// prefix is recognized the first word is taken, so the error names it.
fn split_concern<'a>(words: &'a [&'a str]) -> (String, &'a [&'a str]) {
    let longest = words.len().min(MAX_CONCERN_WORDS);
    for take in (1..=longest).rev() {
        let candidate = words[..take].join(" ");
        let candidate = candidate.trim_end_matches(',');
        if candidate.parse::<PrimaryConcern>().is_ok() {
            return (candidate.to_string(), &words[take..]);
        }
    }
    (words[0].trim_end_matches(',').to_string(), &words[1..])
}

fn parse_route(rest: &str) -> Option<Command> {
    let (fields, notes) = match rest.split_once("--") {
        Some((fields, notes)) => (fields, optional(notes)),
        None => (rest, None),
    };

    let words: Vec<&str> = fields.split_whitespace().collect();
    let (age, words) = words.split_first()?;
    if words.is_empty() {
        return None;
    }
    let (concern, listed) = split_concern(words);
    let comorbidities = listed
        .join(" ")
        .split(',')
        .filter_map(optional)
        .collect();

    Some(Command::Route {
        age: age.to_string(),
        concern,
        comorbidities,
        notes,
    })
}

fn parse_edge(rest: &str) -> Option<Command> {
    let mut parts = rest.splitn(3, '|');
    let description = optional(parts.next()?)?;
    let challenge = parts.next().map(|c| c.trim().to_string()).unwrap_or_default();
    let decision = parts.next().and_then(optional);

    Some(Command::Edge {
        description,
        challenge,
        decision,
    })
}

impl Command {
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();

        // Handle simple commands without arguments
        match trimmed {
            "/help" => return Some(Command::Help),
            "/quit" | "/exit" => return Some(Command::Quit),
            "/rules" => return Some(Command::Rules),
            "/summary" => return Some(Command::Summary),
            "/disagreements" => return Some(Command::Disagreements),
            "/edges" => return Some(Command::Edges),
            "/agree" => return Some(Command::Agree(None)),
            "/export" => return Some(Command::Export(None)),
            _ => {}
        }

        let (name, rest) = trimmed.split_once(char::is_whitespace)?;
        match name {
            "/route" => parse_route(rest),
            "/agree" => Some(Command::Agree(optional(rest))),
            "/disagree" => {
                judgment_and_note(rest).map(|(judgment, note)| Command::Disagree { judgment, note })
            }
            "/uncertain" => {
                judgment_and_note(rest).map(|(judgment, note)| Command::Uncertain { judgment, note })
            }
            "/edge" => parse_edge(rest),
            "/export" => Some(Command::Export(optional(rest).map(PathBuf::from))),
            _ => None,
        }
    }
}

pub fn help_text() -> String {
    "Commands:\n\
    \x20 /route <age> <concern> [comorbidity, ...] [-- notes]\n\
    \x20                           Route a patient, e.g. /route 13 autism depression, si\n\
    \x20 /agree [note]             Confirm the last routing\n\
    \x20 /disagree <dest> [note]   Record where you would route instead\n\
    \x20 /uncertain <dest> [note]  Record a complex case and your best guess\n\
    \x20                           dest: dbp | can | ppc | dual | triage\n\
    \x20 /edge <description> | <challenge> [| <decision>]\n\
    \x20                           Document a case the rules handle poorly\n\
    \x20 /summary                  Agreement statistics for this session\n\
    \x20 /disagreements            Cases where clinical judgment differed\n\
    \x20 /edges                    Documented edge cases\n\
    \x20 /rules                    Show the routing rule table\n\
    \x20 /export [dir]             Write the session to a JSON file\n\
    \x20 /help                     Show this help\n\
    \x20 /quit                     Exit (unexported data is discarded)"
        .to_string()
}

const NOTHING_PENDING: &str = "No routing to give feedback on. Route a patient first with /route.";

pub fn handle_command(command: Command, bench: &mut Workbench, config: &Config) -> Result<String> {
    match command {
        Command::Help => Ok(help_text()),
        Command::Quit => Ok("Goodbye!".to_string()),
        Command::Rules => Ok(format_rules()),
        Command::Summary => Ok(format_summary(bench.log())),
        Command::Disagreements => Ok(format_disagreements(bench.log())),
        Command::Edges => Ok(format_edge_cases(bench.log())),
        Command::Route {
            age,
            concern,
            comorbidities,
            notes,
        } => {
            let case = PatientCase::parse(&age, &concern, &comorbidities)?;
            let pending = bench.route(case, notes);
            Ok(format!(
                "{}\n\nDoes this match your clinical judgment? /agree, /disagree <dest>, or /uncertain <dest>",
                format_decision(&pending.case, &pending.decision)
            ))
        }
        Command::Agree(note) => {
            let record = bench.submit_feedback(|decision| {
                Feedback::agree(decision).with_note(note.unwrap_or_default())
            });
            Ok(match record {
                Some(record) => format!("Match confirmed (case {}).", record.id),
                None => NOTHING_PENDING.to_string(),
            })
        }
        Command::Disagree { judgment, note } => {
            let judgment: ClinicianJudgment = judgment.parse()?;
            let record = bench.submit_feedback(|_| {
                Feedback::disagree(judgment).with_note(note.unwrap_or_default())
            });
            Ok(match record {
                Some(record) => format!("Feedback saved.\n\n{}", format_record(record)),
                None => NOTHING_PENDING.to_string(),
            })
        }
        Command::Uncertain { judgment, note } => {
            let judgment: ClinicianJudgment = judgment.parse()?;
            let record = bench.submit_feedback(|_| {
                Feedback::uncertain(judgment).with_note(note.unwrap_or_default())
            });
            Ok(match record {
                Some(record) => format!("Feedback saved.\n\n{}", format_record(record)),
                None => NOTHING_PENDING.to_string(),
            })
        }
        Command::Edge {
            description,
            challenge,
            decision,
        } => {
            let mut edge = EdgeCase::new(description, challenge)?;
            if let Some(decision) = decision {
                edge = edge.with_decision(decision);
            }
            bench.log_mut().add_edge_case(edge);
            Ok(format!("Edge case {} added.", bench.log().edge_cases().len()))
        }
        Command::Export(dir) => {
            if !bench.log().has_data() {
                return Ok("No data collected yet. Route a patient or add an edge case first.".to_string());
            }
            let dir = dir.unwrap_or_else(|| config.export_dir.clone());
            let path = write_export(bench.log(), &dir)?;
            bench.mark_exported();
            Ok(format!("Session exported to {}", path.display()))
        }
    }
}
