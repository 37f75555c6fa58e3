// Licensed under the Apache-2.0 license

//! SystemVerilog register block generator.
//!
//! Turns an elaborated register model into an abstract component tree and
//! renders that tree through a template repository.
//!
//! ## Usage
//!
//! ```
//! use rtlgen_generator::{
//!     ActBuilder, ActEmitter, GeneratorConfig, SynthesisRegistry, SystemVerilogTemplates,
//! };
//! use rtlgen_model::{AccessType, AddrMap, CollectingSink, Component, Field, Register};
//!
//! let root = AddrMap {
//!     name: "ctrl_regs".into(),
//!     offset: 0,
//!     children: vec![Component::Reg(Register {
//!         name: "CTRL".into(),
//!         offset: 0,
//!         width: 32,
//!         fields: vec![Field {
//!             name: "EN".into(),
//!             high: 0,
//!             low: 0,
//!             sw: AccessType::Rw,
//!             hw: AccessType::R,
//!             reset: Some(0),
//!             reset_mask: None,
//!             intr: false,
//!             ispresent: true,
//!             desc: None,
//!         }],
//!         desc: None,
//!     })],
//!     desc: None,
//! };
//!
//! let config = GeneratorConfig::new().design_name(&root.name);
//! let mut sink = CollectingSink::new();
//! let builder = ActBuilder::new(config.clone(), SynthesisRegistry::with_defaults()).unwrap();
//! let tree = builder.build(&root, &mut sink).unwrap();
//!
//! let templates = SystemVerilogTemplates;
//! let mut emitter = ActEmitter::new(&config, &templates).unwrap();
//! let text = emitter.emit(&tree, &mut sink).unwrap();
//! assert!(text.contains("module ctrl_regs_backend ("));
//! ```
//!
//! ## Module Organization
//!
//! - [`context`]: Flattened register/field/interrupt lists
//! - [`synthesis`]: Tools deriving parts of the tree
//! - [`registry`]: Task identifier to tool lookup
//! - [`builder`]: Assembly of the full tree
//! - [`act`]: The component tree
//! - [`emitter`], [`template`], [`templates`]: Rendering

pub mod act;
pub mod builder;
pub mod config;
pub mod context;
pub mod emitter;
pub mod registry;
pub mod synthesis;
pub mod template;
pub mod templates;
pub mod util;

mod error;

pub use act::{Node, NodeKind};
pub use builder::{ActBuilder, ModuleNames};
pub use config::GeneratorConfig;
pub use context::SynthesisContext;
pub use emitter::ActEmitter;
pub use error::{Error, Result};
pub use registry::SynthesisRegistry;
pub use synthesis::{SynthesisOptions, SynthesisTool};
pub use template::{Template, TemplateError, TemplateRepository, TemplateSet, TemplateValues};
pub use templates::SystemVerilogTemplates;
