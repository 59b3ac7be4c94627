// Interactive REPL

use anyhow::Result;

use crate::config::Config;
use crate::errors::{invalid_input_help, wrap_error_with_suggestion, InvalidInput};

use super::commands::{handle_command, Command};
use super::input::InputHandler;
use super::workbench::Workbench;

const PROMPT: &str = "route> ";

pub struct Repl {
    config: Config,
    bench: Workbench,
    input: InputHandler,
}

impl Repl {
    pub fn new(config: Config) -> Result<Self> {
        let input = InputHandler::new(config.history_path.clone())?;
        Ok(Self {
            config,
            bench: Workbench::new(),
            input,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        println!("Clinic Routing Prototype - session {}", self.bench.log().id());
        println!("Exports go to: {}", self.config.export_dir.display());
        println!("Ready. Type /help for commands.\n");

        while let Some(line) = self.input.read_line(PROMPT)? {
            if line.is_empty() {
                continue;
            }

            let Some(command) = Command::parse(&line) else {
                println!("Unknown command or missing arguments. Type /help for usage.\n");
                continue;
            };

            if command == Command::Quit {
                break;
            }

            match handle_command(command, &mut self.bench, &self.config) {
                Ok(output) => println!("\n{}\n", output),
                Err(e) => eprintln!("\n{}\n", describe_error(&e)),
            }
        }

        if self.bench.has_unexported() {
            println!(
                "Discarding {} routing tests and {} edge cases that were not exported.",
                self.bench.log().len(),
                self.bench.log().edge_cases().len()
            );
        }
        println!("Goodbye!");

        if let Err(e) = self.input.save_history() {
            tracing::warn!(error = %e, "Failed to save input history");
        }

        Ok(())
    }
}

/// Turn a command error into a message for the user
fn describe_error(error: &anyhow::Error) -> String {
    if let Some(invalid) = error.downcast_ref::<InvalidInput>() {
        tracing::warn!(field = %invalid.field(), "Rejected input");
        return invalid_input_help(invalid);
    }
    wrap_error_with_suggestion(
        format!("{:#}", error),
        "Check that the export directory is writable, or pass another one: /export <dir>",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::InputField;

    #[test]
    fn test_describe_invalid_input() {
        let err = anyhow::Error::new(InvalidInput::UnknownValue {
            field: InputField::PrimaryConcern,
            value: "headache".to_string(),
        });
        let msg = describe_error(&err);
        assert!(msg.contains("unknown primary concern 'headache'"));
        assert!(msg.contains("adhd-only"));
    }

    #[test]
    fn test_describe_other_error() {
        let err = anyhow::anyhow!("disk full");
        let msg = describe_error(&err);
        assert!(msg.contains("disk full"));
        assert!(msg.contains("/export <dir>"));
    }
}
