//! Annotation scanner.
//!
//! Each file is read line by line through a small recognizer:
//!
//! - `Seeking`: a `#` or `//` comment containing the marker moves to `Annotated`.
//! - `Annotated`: further comments and unrelated lines keep the state; a line
//!   starting with `output` begins capturing the block.
//! - `Capturing`: lines are collected until the braces opened by the block
//!   balance, then the block is parsed and the recognizer returns to `Seeking`.

mod block;
mod lexer;

use std::{
    fs,
    path::{Path, PathBuf},
};

use lexer::BraceScan;
use walkdir::{DirEntry, WalkDir};

use crate::{AnnotatedDeclaration, Error, Result};

/// Keyword of the blocks that can be exposed.
pub const DECLARATION_KEYWORD: &str = "output";

/// File name suffixes of declaration files.
pub const DECLARATION_SUFFIXES: &[&str] = &[".tf", ".tf.json"];

/// Whether `path` names a declaration file.
pub fn is_declaration_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| DECLARATION_SUFFIXES.iter().any(|s| name.ends_with(s)))
}

/// Finds output blocks preceded by a marker comment.
#[derive(Debug, Clone)]
pub struct Scanner {
    marker: String,
}

impl Scanner {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Scan every declaration file below `root`.
    ///
    /// Entries are visited in lexical order so results are stable across
    /// runs. Hidden directories such as `.terraform` are skipped. Paths in
    /// the returned declarations are relative to `root`.
    pub fn scan_dir(&self, root: &Path) -> Result<Vec<AnnotatedDeclaration>> {
        let mut declarations = Vec::new();
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker {
            let entry = entry?;
            let path = entry.path();
            // Symlinked files count; symlinked directories are not followed.
            let is_file =
                entry.file_type().is_file() || (entry.path_is_symlink() && path.is_file());
            if !is_file || !is_declaration_file(path) {
                continue;
            }

            tracing::debug!(file = %path.display(), "scanning declaration file");
            let source = fs::read_to_string(path).map_err(|source| Error::UnreadableFile {
                path: path.to_path_buf(),
                source,
            })?;
            let relative = path.strip_prefix(root).unwrap_or(path);
            declarations.extend(self.scan_source(relative, &source));
        }

        Ok(declarations)
    }

    /// Scan one file's content.
    pub fn scan_source(&self, file: &Path, source: &str) -> Vec<AnnotatedDeclaration> {
        let mut found = Vec::new();
        let mut state = State::Seeking;
        let mut heredoc: Option<String> = None;

        for (index, raw) in source.lines().enumerate() {
            let line = index + 1;
            let trimmed = raw.trim();
            tracing::trace!(line, state = state.name(), "scan line");

            // Heredoc bodies are text, whatever they look like.
            if let Some(tag) = &heredoc {
                if lexer::closes_heredoc(raw, tag) {
                    heredoc = None;
                }
                if let State::Capturing(capture) = &mut state {
                    capture.append(raw);
                }
                continue;
            }

            let braces = lexer::scan_braces(raw);
            heredoc = braces.heredoc.clone();

            state = match state {
                State::Seeking => {
                    if lexer::is_comment(trimmed) && trimmed.contains(self.marker.as_str()) {
                        State::Annotated
                    } else {
                        State::Seeking
                    }
                }
                State::Annotated => {
                    if lexer::is_comment(trimmed) {
                        State::Annotated
                    } else if lexer::starts_with_keyword(trimmed, DECLARATION_KEYWORD) {
                        self.advance(Capture::start(line, raw, &braces), file, &mut found)
                    } else {
                        State::Annotated
                    }
                }
                State::Capturing(mut capture) => {
                    capture.push(raw, &braces);
                    self.advance(capture, file, &mut found)
                }
            };
        }

        if let State::Capturing(capture) = state {
            tracing::debug!(
                file = %file.display(),
                line = capture.line,
                "annotated block not closed before end of file"
            );
            self.finish(capture, file, &mut found);
        }

        found
    }

    fn advance(
        &self,
        capture: Capture,
        file: &Path,
        found: &mut Vec<AnnotatedDeclaration>,
    ) -> State {
        if capture.is_closed() {
            self.finish(capture, file, found);
            State::Seeking
        } else {
            State::Capturing(capture)
        }
    }

    fn finish(&self, capture: Capture, file: &Path, found: &mut Vec<AnnotatedDeclaration>) {
        match block::parse_block(DECLARATION_KEYWORD, &capture.text) {
            Some(parsed) => {
                tracing::debug!(
                    file = %file.display(),
                    line = capture.line,
                    name = %parsed.name,
                    reference = %parsed.value,
                    "found annotated declaration"
                );
                found.push(AnnotatedDeclaration {
                    file: PathBuf::from(file),
                    line: capture.line,
                    name: parsed.name,
                    reference_expression: parsed.value,
                });
            }
            None => tracing::debug!(
                file = %file.display(),
                line = capture.line,
                "annotated block has no name or value"
            ),
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

#[derive(Debug)]
enum State {
    Seeking,
    Annotated,
    Capturing(Capture),
}

impl State {
    fn name(&self) -> &'static str {
        match self {
            State::Seeking => "seeking",
            State::Annotated => "annotated",
            State::Capturing(_) => "capturing",
        }
    }
}

#[derive(Debug)]
struct Capture {
    line: usize,
    text: String,
    depth: i32,
    opened: bool,
}

impl Capture {
    fn start(line: usize, raw: &str, braces: &BraceScan) -> Self {
        let mut capture = Self {
            line,
            text: String::new(),
            depth: 0,
            opened: false,
        };
        capture.push(raw, braces);
        capture
    }

    fn push(&mut self, raw: &str, braces: &BraceScan) {
        self.append(raw);
        self.depth += braces.delta;
        self.opened |= braces.opened;
    }

    /// Add a line without counting its braces.
    fn append(&mut self, raw: &str) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(raw);
    }

    fn is_closed(&self) -> bool {
        self.opened && self.depth <= 0
    }
}
