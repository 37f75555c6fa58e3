// Licensed under the Apache-2.0 license

//! Built-in template dialects.

pub mod systemverilog;

use crate::act::NodeKind;
use crate::config::DEFAULT_LANGUAGE;
use crate::template::{Template, TemplateError, TemplateRepository, TemplateValues};
use std::rc::Rc;
use std::str::FromStr;

type TemplateFn = fn(&TemplateValues) -> Result<String, TemplateError>;

/// The SystemVerilog dialect, one template per node kind.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemVerilogTemplates;

impl SystemVerilogTemplates {
    pub const LANGUAGE: &'static str = DEFAULT_LANGUAGE;

    fn lookup(kind: NodeKind) -> Option<TemplateFn> {
        use systemverilog as sv;
        let template: TemplateFn = match kind {
            NodeKind::Range => sv::range,
            NodeKind::Port => sv::port,
            NodeKind::SignalDeclaration => sv::signal_declaration,
            NodeKind::Assignment => sv::assignment,
            NodeKind::FieldInstance => sv::field_instance,
            NodeKind::FieldBypass => sv::field_bypass,
            NodeKind::InterruptInstance => sv::interrupt_instance,
            NodeKind::LogicalGroup => sv::logical_group,
            NodeKind::SelectDecoder => sv::select_decoder,
            NodeKind::WriteSelectDecoder => sv::write_select_decoder,
            NodeKind::TopModule => sv::top_module,
            NodeKind::BackendModule => sv::backend_module,
            NodeKind::InterfaceModule => sv::interface_module,
            NodeKind::FieldModule => sv::field_module,
            NodeKind::InterruptModule => sv::interrupt_module,
            NodeKind::GenericLayout => sv::generic_layout,
            NodeKind::List => return None,
        };
        Some(template)
    }
}

impl TemplateRepository for SystemVerilogTemplates {
    fn resolve(&self, language: &str, name: &str) -> Result<Rc<dyn Template>, TemplateError> {
        let template = (language == Self::LANGUAGE)
            .then(|| NodeKind::from_str(name).ok())
            .flatten()
            .and_then(Self::lookup);
        match template {
            Some(template) => Ok(Rc::new(template)),
            None => Err(TemplateError::NotFound {
                language: language.to_string(),
                name: name.to_string(),
            }),
        }
    }
}
