// Readline input handler with history and editing support

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

pub struct InputHandler {
    editor: DefaultEditor,
    history_path: PathBuf,
}

impl InputHandler {
    /// Create new input handler, loading history from `history_path` if present
    pub fn new(history_path: PathBuf) -> Result<Self> {
        let mut editor = DefaultEditor::new()
            .context("Failed to initialize readline editor")?;

        // Load existing history if available
        if history_path.exists() {
            if let Err(e) = editor.load_history(&history_path) {
                tracing::warn!(path = %history_path.display(), error = %e, "Could not load input history");
            }
        }

        Ok(Self {
            editor,
            history_path,
        })
    }

    /// Read a line of input with editing support
    ///
    /// Returns:
    /// - `Ok(Some(line))` - user entered text
    /// - `Ok(None)` - user pressed Ctrl+C or Ctrl+D
    /// - `Err(e)` - I/O or other error
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim().to_string();
                // Blank lines are not worth recalling
                if !line.is_empty() {
                    self.editor.add_history_entry(&line)
                        .context("Failed to add history entry")?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C - leave the session
                Ok(None)
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - leave the session
                Ok(None)
            }
            Err(err) => {
                // Other errors (I/O, terminal)
                Err(err).context("Failed to read input")
            }
        }
    }

    /// Save history to disk
    pub fn save_history(&mut self) -> Result<()> {
        // History may live in a directory that was never created
        if let Some(parent) = self.history_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        self.editor
            .save_history(&self.history_path)
            .with_context(|| format!("Failed to save history to {}", self.history_path.display()))?;

        Ok(())
    }
}
