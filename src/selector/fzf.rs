//! Selection through an external `fzf`.

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use log::debug;

use super::Selector;
use crate::error::{LauncherError, Result};
use crate::registry::CommandDescriptor;

/// fzf exit code when nothing matched.
const FZF_NO_MATCH: i32 = 1;
/// fzf exit code when the user aborted.
const FZF_INTERRUPTED: i32 = 130;

/// Runs `fzf` with the candidates on its stdin.
#[derive(Debug, Clone)]
pub struct FzfSelector {
    program: PathBuf,
    prompt: String,
    case_sensitive: bool,
}

impl FzfSelector {
    /// Create a selector that runs `program`.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            prompt: "> ".to_string(),
            case_sensitive: false,
        }
    }

    /// Set the prompt shown before the query.
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Match case exactly.
    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Arguments passed to fzf.
    pub fn args(&self, prefilter: Option<&str>) -> Vec<String> {
        let mut args = vec![
            "--delimiter=\t".to_string(),
            "--with-nth=2..".to_string(),
            "--height=40%".to_string(),
            "--reverse".to_string(),
            format!("--prompt={}", self.prompt),
            if self.case_sensitive { "+i" } else { "-i" }.to_string(),
        ];
        if let Some(query) = prefilter.filter(|q| !q.is_empty()) {
            args.push(format!("--query={query}"));
        }
        args
    }

    fn failed(&self, message: impl Into<String>) -> LauncherError {
        LauncherError::SelectorFailed {
            selector: self.program.display().to_string(),
            message: message.into(),
        }
    }
}

impl Selector for FzfSelector {
    fn name(&self) -> &'static str {
        "fzf"
    }

    fn select(
        &mut self,
        commands: &[CommandDescriptor],
        prefilter: Option<&str>,
    ) -> Result<Option<usize>> {
        if !io::stdin().is_terminal() {
            return Err(LauncherError::NoTerminal);
        }

        let args = self.args(prefilter);
        debug!("Running {} {:?}", self.program.display(), args);

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| self.failed(e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            // fzf may exit before reading everything
            match stdin.write_all(candidate_lines(commands).as_bytes()) {
                Err(e) if e.kind() != io::ErrorKind::BrokenPipe => {
                    return Err(self.failed(e.to_string()))
                }
                _ => {}
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| self.failed(e.to_string()))?;

        match output.status.code() {
            Some(0) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                parse_selection(&stdout, commands.len())
                    .map(Some)
                    .ok_or_else(|| self.failed(format!("unexpected output {:?}", stdout.trim_end())))
            }
            Some(FZF_NO_MATCH) | Some(FZF_INTERRUPTED) => Ok(None),
            Some(code) => Err(self.failed(format!("exited with status {code}"))),
            None => Err(self.failed("terminated by a signal")),
        }
    }
}

/// One `index<TAB>name  summary` line per command.
///
/// Only the part after the tab is shown; the index maps the chosen line
/// back to its command.
pub fn candidate_lines(commands: &[CommandDescriptor]) -> String {
    let mut input = String::new();
    for (idx, command) in commands.iter().enumerate() {
        let display = command.to_string().replace(['\t', '\n'], " ");
        input.push_str(&format!("{idx}\t{display}\n"));
    }
    input
}

/// Map fzf's output line back to a command index.
pub fn parse_selection(output: &str, count: usize) -> Option<usize> {
    let line = output.lines().next()?;
    let (idx, _) = line.split_once('\t')?;
    idx.parse::<usize>().ok().filter(|&i| i < count)
}
