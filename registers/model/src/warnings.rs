// Licensed under the Apache-2.0 license

//! Elaboration warning switches.
//!
//! ```
//! use rtlgen_model::warnings::WarningSet;
//!
//! let mut warnings = WarningSet::none();
//! warnings.apply("all").unwrap();
//! warnings.apply("no-implicit-addr").unwrap();
//! assert!(warnings.missing_reset);
//! assert!(!warnings.implicit_addr);
//! assert!(warnings.implicit_field_pos);
//! ```

use crate::diag::DiagnosticSink;
use crate::error::ModelError;
use std::collections::HashSet;

/// Names accepted by [`WarningSet::apply`], without the `no-` prefix.
pub const WARNING_NAMES: &[&str] = &[
    "all",
    "missing-reset",
    "implicit",
    "implicit-addr",
    "implicit-field-pos",
];

/// Which elaboration warnings are reported.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WarningSet {
    /// Storage field without a reset value.
    pub missing_reset: bool,
    /// Register placed without an explicit offset.
    pub implicit_addr: bool,
    /// Field placed without an explicit bit position.
    pub implicit_field_pos: bool,
}

impl WarningSet {
    /// All warnings disabled.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            missing_reset: true,
            implicit_addr: true,
            implicit_field_pos: true,
        }
    }

    /// Enable a warning by name, or disable it when prefixed with `no-`.
    pub fn apply(&mut self, flag: &str) -> Result<(), ModelError> {
        let (name, enable) = split_flag(flag);
        match name {
            "all" => {
                self.missing_reset = enable;
                self.implicit_addr = enable;
                self.implicit_field_pos = enable;
            }
            "missing-reset" => self.missing_reset = enable,
            "implicit" => {
                self.implicit_addr = enable;
                self.implicit_field_pos = enable;
            }
            "implicit-addr" => self.implicit_addr = enable,
            "implicit-field-pos" => self.implicit_field_pos = enable,
            _ => {
                return Err(ModelError::Argument(format!(
                    "unsupported warning '{flag}'. Expected one of: {}",
                    WARNING_NAMES.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// Apply flags in order. When the same name shows up more than once a
    /// warning is reported and the last occurrence wins.
    pub fn from_flags<S: AsRef<str>>(
        flags: &[S],
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Self, ModelError> {
        let mut warnings = Self::none();
        let mut seen = HashSet::new();
        for flag in flags {
            let flag = flag.as_ref();
            let (name, _) = split_flag(flag);
            if !seen.insert(name.to_string()) {
                sink.warning(
                    &format!("warning '{name}' is set more than once; using '{flag}'"),
                    None,
                );
            }
            warnings.apply(flag)?;
        }
        Ok(warnings)
    }
}

fn split_flag(flag: &str) -> (&str, bool) {
    match flag.strip_prefix("no-") {
        Some(name) => (name, false),
        None => (flag, true),
    }
}
