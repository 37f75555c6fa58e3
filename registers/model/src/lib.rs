// Licensed under the Apache-2.0 license

//! Elaborated register model consumed by the RTL generator.
//!
//! This crate plays the role of the register-model provider: it loads model
//! documents, elaborates them (resolving addresses and bit positions) and
//! exposes the result as a read-only tree together with a listener-based
//! walker.
//!
//! ## Usage
//!
//! ```no_run
//! use rtlgen_model::{LogSink, ModelLoader, WarningSet};
//!
//! let mut sink = LogSink;
//! let model = ModelLoader::new()
//!     .include_dir("rdl")
//!     .warnings(WarningSet::all())
//!     .load(&["ctrl.json"], &mut sink)
//!     .unwrap();
//! let top = model.require_top(None).unwrap();
//! println!("top: {}", top.name);
//! ```
//!
//! ## Module Organization
//!
//! - [`model`]: The elaborated tree and derived-property accessors
//! - [`walk`]: Depth-first traversal with enter/exit callbacks
//! - [`document`]: Model documents, elaboration and loading
//! - [`warnings`]: Elaboration warning switches
//! - [`diag`]: Diagnostic sink shared with the generator

pub mod diag;
pub mod document;
pub mod model;
pub mod walk;
pub mod warnings;

mod error;

pub use diag::{CollectingSink, Diagnostic, DiagnosticSink, LogSink, Severity, SourceRef};
pub use document::{Elaborator, ModelDocument, ModelLoader};
pub use error::{ModelError, ModelResult};
pub use model::{
    field_width, implements_storage, is_hw_readable, is_hw_writable, is_sw_readable,
    is_sw_writable, AccessType, AddrMap, Component, Field, RegFile, Register, RegisterModel,
};
pub use walk::{walk, BlockNode, FieldNode, ModelListener, RegNode};
pub use warnings::WarningSet;
