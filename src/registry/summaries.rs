//! One-line summaries for scanned scripts.
//!
//! A summary comes from, in priority order:
//! 1. the `[scripts.summaries]` table in the config
//! 2. the first line of a leading Python docstring
//! 3. the first leading `#` or `//` comment
//!
//! Only the head of each file is inspected. Shebangs and editor or linter
//! directives (`-*- coding -*-`, `shellcheck`, `vim:` ...) are skipped.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Bytes read from the head of a script when looking for a summary.
pub const MAX_SUMMARY_BYTES: u64 = 4096;

/// Lines inspected when looking for a summary.
pub const MAX_SUMMARY_LINES: usize = 20;

const DOCSTRING_QUOTES: [&str; 2] = ["\"\"\"", "'''"];

/// Resolve the summary for a scanned script named `name` at `path`.
pub fn resolve_summary(
    name: &str,
    path: &Path,
    overrides: &HashMap<String, String>,
    read_files: bool,
) -> Option<String> {
    if let Some(summary) = overrides.get(name) {
        return Some(summary.clone());
    }
    if read_files {
        read_summary(path)
    } else {
        None
    }
}

/// Read the head of `path` and extract a summary from it.
///
/// Unreadable files simply have no summary.
pub fn read_summary(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut head = Vec::new();
    file.take(MAX_SUMMARY_BYTES).read_to_end(&mut head).ok()?;

    // Compiled executables are not worth scanning.
    if head.contains(&0) {
        return None;
    }

    extract_summary(&String::from_utf8_lossy(&head))
}

/// Extract a summary line from script source text.
///
/// # Examples
///
/// ```
/// use toolbox::registry::extract_summary;
///
/// let source = "#!/usr/bin/env python3\n\"\"\"Rotate the log files.\"\"\"\nimport os\n";
/// assert_eq!(extract_summary(source).as_deref(), Some("Rotate the log files."));
///
/// let source = "#!/bin/sh\n# Deploy the site\nset -e\n";
/// assert_eq!(extract_summary(source).as_deref(), Some("Deploy the site"));
/// ```
pub fn extract_summary(content: &str) -> Option<String> {
    let mut lines = content.lines().take(MAX_SUMMARY_LINES).enumerate();

    while let Some((index, line)) = lines.next() {
        let trimmed = line.trim();

        if index == 0 && trimmed.starts_with("#!") {
            continue;
        }
        if trimmed.is_empty() || is_directive(trimmed) {
            continue;
        }

        if let Some(quote) = DOCSTRING_QUOTES.iter().find(|q| trimmed.starts_with(**q)) {
            let rest = trimmed[quote.len()..].trim();
            let rest = rest.strip_suffix(quote).unwrap_or(rest).trim();
            if !rest.is_empty() {
                return Some(rest.to_string());
            }

            // Docstring text starts on a later line
            for (_, next) in lines.by_ref() {
                let next = next.trim();
                if next.starts_with(quote) {
                    return None;
                }
                if !next.is_empty() {
                    let text = next.strip_suffix(quote).unwrap_or(next).trim();
                    return (!text.is_empty()).then(|| text.to_string());
                }
            }
            return None;
        }

        match comment_text(trimmed) {
            Some("") => continue,
            Some(text) => return Some(text.to_string()),
            // First line of real code ends the header
            None => return None,
        }
    }

    None
}

/// Strip a `#` or `//` comment marker, returning the comment body.
fn comment_text(line: &str) -> Option<&str> {
    let body = line.strip_prefix("//").or_else(|| line.strip_prefix('#'))?;
    Some(body.trim_start_matches(['#', '/']).trim())
}

fn is_directive(line: &str) -> bool {
    const DIRECTIVES: &[&str] = &[
        "shellcheck",
        "vim:",
        "noqa",
        "type:",
        "frozen_string_literal",
        "@ts-",
        "eslint-",
    ];

    if line.contains("-*-") {
        return true;
    }

    match comment_text(line) {
        Some(body) => DIRECTIVES.iter().any(|d| body.starts_with(d)),
        None => false,
    }
}
