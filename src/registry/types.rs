//! Descriptor and snapshot types produced by command discovery.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use glob::Pattern;
use log::{debug, warn};
use serde::{Serialize, Serializer};

/// Signature of an in-process command handler.
///
/// Receives the forwarded arguments and returns the exit code.
pub type BuiltinHandler = fn(&[String]) -> anyhow::Result<i32>;

/// What a descriptor actually runs.
#[derive(Clone)]
pub enum Target {
    /// An external program, optionally with leading arguments
    /// (e.g. `python3 /path/to/tool.py`).
    Program { program: PathBuf, args: Vec<String> },
    /// A handler compiled into the binary.
    Builtin(BuiltinHandler),
}

impl Target {
    /// Target that executes `program` directly.
    pub fn program(program: impl Into<PathBuf>) -> Self {
        Target::Program {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Target that runs `program` with fixed leading arguments.
    pub fn program_with_args(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Target::Program {
            program: program.into(),
            args,
        }
    }

    /// Check if this target runs in-process.
    pub fn is_builtin(&self) -> bool {
        matches!(self, Target::Builtin(_))
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Program { program, args } => f
                .debug_struct("Program")
                .field("program", program)
                .field("args", args)
                .finish(),
            Target::Builtin(_) => f.write_str("Builtin"),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum TargetView {
    Program { command: Vec<String> },
    Builtin,
}

impl Serialize for Target {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let view = match self {
            Target::Program { program, args } => {
                let mut command = Vec::with_capacity(args.len() + 1);
                command.push(program.display().to_string());
                command.extend(args.iter().cloned());
                TargetView::Program { command }
            }
            Target::Builtin(_) => TargetView::Builtin,
        };
        view.serialize(serializer)
    }
}

/// One runnable command.
#[derive(Clone, Serialize)]
pub struct CommandDescriptor {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<String>,
    target: Target,
}

impl CommandDescriptor {
    /// Create a new descriptor without a summary.
    pub fn new(name: impl Into<String>, target: Target) -> Self {
        Self {
            name: name.into(),
            summary: None,
            target,
        }
    }

    /// Create a new descriptor with a summary.
    pub fn with_summary(name: impl Into<String>, target: Target, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: Some(summary.into()),
            target,
        }
    }

    /// Get the command name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the summary line.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    /// Get the target.
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Set the summary.
    pub fn set_summary(&mut self, summary: impl Into<String>) {
        self.summary = Some(summary.into());
    }

    /// The full command line this descriptor would run with `extra` appended.
    ///
    /// Builtins are shown by name, since they have no program on disk.
    pub fn command_line(&self, extra: &[String]) -> Vec<String> {
        let mut line = match &self.target {
            Target::Program { program, args } => {
                let mut line = vec![program.display().to_string()];
                line.extend(args.iter().cloned());
                line
            }
            Target::Builtin(_) => vec![self.name.clone()],
        };
        line.extend(extra.iter().cloned());
        line
    }
}

impl fmt::Debug for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("summary", &self.summary)
            .field("target", &self.target)
            .finish()
    }
}

impl fmt::Display for CommandDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.summary {
            Some(summary) => write!(f, "{}  {}", self.name, summary),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Ordered, name-unique set of descriptors from one discovery pass.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    commands: Vec<CommandDescriptor>,
}

impl Snapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot, keeping the first descriptor seen for each name.
    ///
    /// Descriptors with an empty name are dropped.
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = CommandDescriptor>) -> Self {
        let mut seen = HashSet::new();
        let mut commands = Vec::new();

        for descriptor in descriptors {
            if descriptor.name.is_empty() {
                debug!("Skipping command with an empty name: {descriptor:?}");
                continue;
            }
            if !seen.insert(descriptor.name.clone()) {
                warn!(
                    "Duplicate command '{}' ignored; keeping the first definition",
                    descriptor.name
                );
                continue;
            }
            commands.push(descriptor);
        }

        Self { commands }
    }

    /// Get the number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Get an iterator over the commands.
    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor> {
        self.commands.iter()
    }

    /// Get the commands as a slice.
    pub fn as_slice(&self) -> &[CommandDescriptor] {
        &self.commands
    }

    /// Get a command by exact name.
    pub fn get(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Get command names in snapshot order.
    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name()).collect()
    }

    /// Drop commands whose name matches any of the glob patterns.
    ///
    /// Invalid patterns fall back to an exact name comparison.
    pub fn without_matching(&self, patterns: &[String]) -> Self {
        if patterns.is_empty() {
            return self.clone();
        }

        let compiled: Vec<ExcludePattern> = patterns.iter().map(|p| ExcludePattern::new(p)).collect();

        Self {
            commands: self
                .commands
                .iter()
                .filter(|c| !compiled.iter().any(|p| p.matches(c.name())))
                .cloned()
                .collect(),
        }
    }

    /// Sort commands by name.
    pub fn sort_by_name(&mut self) {
        self.commands.sort_by(|a, b| a.name.cmp(&b.name));
    }
}

impl IntoIterator for Snapshot {
    type Item = CommandDescriptor;
    type IntoIter = std::vec::IntoIter<CommandDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a CommandDescriptor;
    type IntoIter = std::slice::Iter<'a, CommandDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

enum ExcludePattern {
    Glob(Pattern),
    Exact(String),
}

impl ExcludePattern {
    fn new(pattern: &str) -> Self {
        match Pattern::new(pattern) {
            Ok(glob) => ExcludePattern::Glob(glob),
            Err(e) => {
                warn!("Invalid exclude pattern '{pattern}': {e}");
                ExcludePattern::Exact(pattern.to_string())
            }
        }
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            ExcludePattern::Glob(glob) => glob.matches(name),
            ExcludePattern::Exact(exact) => exact == name,
        }
    }
}
