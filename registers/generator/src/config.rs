// Licensed under the Apache-2.0 license

//! Generation parameters.
//!
//! [`GeneratorConfig`] collects everything the builder and emitter need to
//! know besides the register model itself. It is validated once, when the
//! builder is constructed, so a missing design name is reported before any
//! synthesis runs.
//!
//! # Example
//!
//! ```
//! use rtlgen_generator::config::GeneratorConfig;
//!
//! let config = GeneratorConfig::new()
//!     .design_name("uart_regs")
//!     .header("// generated")
//!     .skip_not_present(true);
//! assert!(config.validate().is_ok());
//! assert_eq!(config.data_width, 32);
//!
//! assert!(GeneratorConfig::new().validate().is_err());
//! ```

use crate::error::{Error, Result};
use crate::synthesis::SynthesisOptions;
use crate::util::is_identifier;

/// Name of the only output dialect shipped with the generator.
pub const DEFAULT_LANGUAGE: &str = "systemverilog";

/// Bus interface used when none is configured.
pub const DEFAULT_INTERFACE: &str = "apb";

/// Data bus width used when none is configured.
pub const DEFAULT_DATA_WIDTH: u32 = 32;

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Target design name; every generated module name derives from it.
    /// Required.
    pub design_name: Option<String>,

    /// Template dialect (default: `systemverilog`).
    pub language: String,

    /// Bus interface name (default: `apb`).
    pub interface_name: String,

    /// Data bus width in bits (default: 32).
    pub data_width: u32,

    /// Leave out fields whose `ispresent` property is false (default: false).
    pub skip_not_present: bool,

    /// Text placed before the generated modules (default: none).
    pub header: Option<String>,

    /// Text placed after the generated modules (default: none).
    pub footer: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            design_name: None,
            language: DEFAULT_LANGUAGE.to_string(),
            interface_name: DEFAULT_INTERFACE.to_string(),
            data_width: DEFAULT_DATA_WIDTH,
            skip_not_present: false,
            header: None,
            footer: None,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn design_name(mut self, name: &str) -> Self {
        self.design_name = Some(name.to_string());
        self
    }

    pub fn language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    pub fn interface(mut self, name: &str) -> Self {
        self.interface_name = name.to_string();
        self
    }

    pub fn data_width(mut self, width: u32) -> Self {
        self.data_width = width;
        self
    }

    pub fn skip_not_present(mut self, skip: bool) -> Self {
        self.skip_not_present = skip;
        self
    }

    pub fn header(mut self, header: &str) -> Self {
        self.header = Some(header.to_string());
        self
    }

    pub fn footer(mut self, footer: &str) -> Self {
        self.footer = Some(footer.to_string());
        self
    }

    /// The design name, or a configuration error when it was never set.
    pub fn require_design_name(&self) -> Result<&str> {
        match self.design_name.as_deref() {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(Error::Configuration(
                "missing required parameter 'design_name'".to_string(),
            )),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let name = self.require_design_name()?;
        if !is_identifier(name) {
            return Err(Error::Configuration(format!(
                "design name '{name}' is not a valid identifier"
            )));
        }
        if !is_identifier(&self.interface_name) {
            return Err(Error::Configuration(format!(
                "interface name '{}' is not a valid identifier",
                self.interface_name
            )));
        }
        if !matches!(self.data_width, 8 | 16 | 32 | 64) {
            return Err(Error::Configuration(format!(
                "unsupported data width {}",
                self.data_width
            )));
        }
        Ok(())
    }

    pub fn synthesis_options(&self) -> SynthesisOptions {
        SynthesisOptions {
            data_width: self.data_width,
            skip_not_present: self.skip_not_present,
        }
    }
}
