// Licensed under the Apache-2.0 license

//! Diagnostic reporting shared by elaboration and code generation.

use std::fmt;
use std::path::PathBuf;
use strum_macros::{Display, EnumString};

#[derive(Clone, Copy, Debug, Display, EnumString, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

/// Where a diagnostic comes from: a source document, a model path, or both.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SourceRef {
    pub file: Option<PathBuf>,
    pub path: Option<String>,
}

impl SourceRef {
    pub fn file(file: impl Into<PathBuf>) -> Self {
        Self {
            file: Some(file.into()),
            path: None,
        }
    }

    pub fn path(path: impl Into<String>) -> Self {
        Self {
            file: None,
            path: Some(path.into()),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, &self.path) {
            (Some(file), Some(path)) => write!(f, "{}: {path}", file.display()),
            (Some(file), None) => write!(f, "{}", file.display()),
            (None, Some(path)) => write!(f, "{path}"),
            (None, None) => Ok(()),
        }
    }
}

/// Receiver for diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, severity: Severity, message: &str, src_ref: Option<&SourceRef>);

    fn debug(&mut self, message: &str) {
        self.report(Severity::Debug, message, None);
    }

    fn info(&mut self, message: &str) {
        self.report(Severity::Info, message, None);
    }

    fn warning(&mut self, message: &str, src_ref: Option<&SourceRef>) {
        self.report(Severity::Warning, message, src_ref);
    }
}

/// Forwards diagnostics to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, severity: Severity, message: &str, src_ref: Option<&SourceRef>) {
        let text = match src_ref {
            Some(src_ref) => format!("{src_ref}: {message}"),
            None => message.to_string(),
        };
        match severity {
            Severity::Debug => log::debug!("{text}"),
            Severity::Info => log::info!("{text}"),
            Severity::Warning => log::warn!("{text}"),
            Severity::Error => log::error!("{text}"),
            Severity::Fatal => log::error!("fatal: {text}"),
        }
    }
}

/// A recorded diagnostic.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub src_ref: Option<SourceRef>,
}

/// Keeps every diagnostic in memory.
#[derive(Clone, Debug, Default)]
pub struct CollectingSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    pub fn messages(&self, severity: Severity) -> Vec<&str> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .map(|d| d.message.as_str())
            .collect()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, severity: Severity, message: &str, src_ref: Option<&SourceRef>) {
        self.diagnostics.push(Diagnostic {
            severity,
            message: message.to_string(),
            src_ref: src_ref.cloned(),
        });
    }
}
