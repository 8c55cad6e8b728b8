//! User interaction seam.
//!
//! Commands that need a choice or a typed name take a `&mut dyn Interaction`.
//! The binary passes [`ExternalTools`], which shells out to `fzf` and `gum`;
//! tests pass a scripted double.

use crate::error::{JtError, Result};
use std::io::{self, Write};
use std::process::{Command, Stdio};
use tracing::debug;

pub trait Interaction {
    /// Lets the user pick one of `options`. `None` means nothing was picked.
    fn select(&mut self, prompt: &str, options: &[String]) -> Result<Option<String>>;

    /// Asks for free text. An unavailable prompt yields `""`.
    fn prompt(&mut self, placeholder: Option<&str>) -> Result<String>;
}

/// `fzf` for picking, `gum input` for text.
#[derive(Debug, Default)]
pub struct ExternalTools;

impl Interaction for ExternalTools {
    fn select(&mut self, prompt: &str, options: &[String]) -> Result<Option<String>> {
        let mut child = Command::new("fzf")
            .arg("--ansi")
            .arg(format!("--prompt={}", prompt))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => {
                    JtError::Tool("fzf not found. Please install fzf.".to_string())
                }
                _ => JtError::Tool(format!("Failed to spawn fzf: {}", e)),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(options.join("\n").as_bytes())
                .map_err(|e| JtError::Tool(format!("Failed to write to fzf: {}", e)))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| JtError::Tool(format!("Failed to wait for fzf: {}", e)))?;

        if !output.status.success() {
            debug!(status = ?output.status.code(), "fzf returned no selection");
            return Ok(None);
        }
        let picked = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(if picked.is_empty() { None } else { Some(picked) })
    }

    fn prompt(&mut self, placeholder: Option<&str>) -> Result<String> {
        let mut cmd = Command::new("gum");
        cmd.arg("input");
        if let Some(placeholder) = placeholder {
            cmd.arg("--placeholder").arg(placeholder);
        }
        let output = match cmd
            .stdin(Stdio::inherit())
            .stderr(Stdio::inherit())
            .output()
        {
            Ok(output) => output,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("gum not installed, using an empty name");
                return Ok(String::new());
            }
            Err(e) => return Err(JtError::Tool(format!("Failed to run gum: {}", e))),
        };
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[cfg(any(test, feature = "test_utils"))]
pub mod scripted {
    use super::Interaction;
    use crate::error::Result;
    use std::collections::VecDeque;

    /// Replays canned answers and records what was offered.
    #[derive(Debug, Default)]
    pub struct ScriptedInteraction {
        selections: VecDeque<Option<String>>,
        prompts: VecDeque<String>,
        pub offered: Vec<Vec<String>>,
        pub prompted: usize,
    }

    impl ScriptedInteraction {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues a pick. `None` simulates an aborted picker.
        pub fn pick(mut self, choice: Option<&str>) -> Self {
            self.selections.push_back(choice.map(str::to_string));
            self
        }

        pub fn answer(mut self, text: &str) -> Self {
            self.prompts.push_back(text.to_string());
            self
        }
    }

    impl Interaction for ScriptedInteraction {
        fn select(&mut self, _prompt: &str, options: &[String]) -> Result<Option<String>> {
            self.offered.push(options.to_vec());
            Ok(self.selections.pop_front().flatten())
        }

        fn prompt(&mut self, _placeholder: Option<&str>) -> Result<String> {
            self.prompted += 1;
            Ok(self.prompts.pop_front().unwrap_or_default())
        }
    }
}
