// Licensed under the Apache-2.0 license

//! Renders a component tree to text.
//!
//! Leaves render through the template named after their [`NodeKind`].
//! Groups, modules and the layout render their children first and pass the
//! text to their own template. [`Node::List`] has no template: its children
//! are joined with newlines.

use crate::act::{Node, NodeKind, Range};
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::template::{Template, TemplateRepository, TemplateValues};
use rtlgen_model::DiagnosticSink;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::rc::Rc;

pub struct ActEmitter<'r> {
    language: String,
    repository: &'r dyn TemplateRepository,
    common: TemplateValues,
    cache: HashMap<NodeKind, Rc<dyn Template>>,
}

impl<'r> ActEmitter<'r> {
    pub fn new(config: &GeneratorConfig, repository: &'r dyn TemplateRepository) -> Result<Self> {
        let mut common = TemplateValues::new();
        common.insert(
            "module_root_name".into(),
            json!(config.require_design_name()?),
        );
        common.insert("data_width".into(), json!(config.data_width));
        Ok(Self {
            language: config.language.clone(),
            repository,
            common,
            cache: HashMap::new(),
        })
    }

    /// Renders `node` and everything below it.
    pub fn emit(&mut self, node: &Node, sink: &mut dyn DiagnosticSink) -> Result<String> {
        let kind = node.kind();
        sink.debug(&format!("Emitting {kind}"));
        match node {
            Node::Range(range) => {
                let mut values = TemplateValues::new();
                values.insert("high".into(), json!(range.high()));
                values.insert("low".into(), json!(range.low()));
                values.insert("bounds".into(), json!(range.bounds()));
                self.render(kind, values)
            }
            Node::Port(port) => {
                let mut values = TemplateValues::new();
                values.insert("name".into(), json!(port.name()));
                values.insert("direction".into(), json!(port.direction().to_string()));
                values.insert("range".into(), range_text(port.range()));
                self.render(kind, values)
            }
            Node::SignalDeclaration(decl) => {
                let mut values = TemplateValues::new();
                values.insert("name".into(), json!(decl.name()));
                values.insert("kind".into(), json!(decl.kind().to_string()));
                values.insert("range".into(), range_text(decl.range()));
                self.render(kind, values)
            }
            Node::Assignment(assign) => {
                let mut values = TemplateValues::new();
                values.insert("lhs".into(), json!(assign.lhs()));
                values.insert("rhs".into(), json!(assign.rhs()));
                values.insert("lhs_range".into(), range_text(assign.lhs_range()));
                values.insert("rhs_range".into(), range_text(assign.rhs_range()));
                values.insert("continuous".into(), json!(assign.is_continuous()));
                self.render(kind, values)
            }
            Node::FieldInstance(inst) => {
                let mut values = field_values(&inst.register, &inst.field, &inst.range);
                values.insert("reset_mask".into(), json!(inst.reset_mask));
                values.insert("reset_value".into(), json!(inst.reset_value));
                self.render(kind, values)
            }
            Node::FieldBypass(bypass) => {
                let values = field_values(&bypass.register, &bypass.field, &bypass.range);
                self.render(kind, values)
            }
            Node::InterruptInstance(intr) => {
                let mut values = TemplateValues::new();
                values.insert("name".into(), json!(intr.name));
                self.render(kind, values)
            }
            Node::LogicalGroup(group) => {
                let mut content = Vec::new();
                for child in &group.children {
                    content.push(self.emit(child, sink)?);
                }
                let mut values = TemplateValues::new();
                values.insert("level".into(), json!(group.level));
                values.insert("description".into(), json!(group.description));
                values.insert("content".into(), json!(join(content)));
                self.render(kind, values)
            }
            Node::SelectDecoder(decoder) | Node::WriteSelectDecoder(decoder) => {
                let entries: Vec<Value> = decoder
                    .address_map
                    .iter()
                    .map(|(address, signal)| json!({ "address": address, "signal": signal }))
                    .collect();
                let mut values = TemplateValues::new();
                values.insert("address_map".into(), Value::Array(entries));
                self.render(kind, values)
            }
            Node::TopModule(top) => {
                let ports = self.emit_items(&top.hw_ports, sink)?;
                let interrupt_ports = self.emit_items(&top.interrupt_ports, sink)?;
                let mut values = TemplateValues::new();
                values.insert("module_name".into(), json!(top.module_name));
                values.insert("interface_module".into(), json!(top.interface_module));
                values.insert("backend_module".into(), json!(top.backend_module));
                values.insert("hw_ports".into(), json!(ports));
                values.insert("interrupt_ports".into(), json!(interrupt_ports));
                self.render(kind, values)
            }
            Node::BackendModule(backend) => {
                let ports = self.emit_items(&backend.hw_ports, sink)?;
                let interrupt_ports = self.emit_items(&backend.interrupt_ports, sink)?;
                let declarations = self.emit(&backend.signal_declarations, sink)?;
                let instantiation = self.emit(&backend.instantiation, sink)?;
                let decoder = self.emit(&backend.write_select_decoder, sink)?;
                let mut values = TemplateValues::new();
                values.insert("module_name".into(), json!(backend.module_name));
                values.insert("hw_ports".into(), json!(ports));
                values.insert("interrupt_ports".into(), json!(interrupt_ports));
                values.insert("signal_declarations".into(), json!(declarations));
                values.insert("instantiation".into(), json!(instantiation));
                values.insert("write_select_decoder".into(), json!(decoder));
                self.render(kind, values)
            }
            Node::InterfaceModule(iface) => {
                let mut values = TemplateValues::new();
                values.insert("module_name".into(), json!(iface.module_name));
                values.insert("interface".into(), json!(iface.interface));
                self.render(kind, values)
            }
            Node::FieldModule(module) => {
                let mut values = TemplateValues::new();
                values.insert("module_name".into(), json!(module.module_name));
                self.render(kind, values)
            }
            Node::InterruptModule(module) => {
                let mut values = TemplateValues::new();
                values.insert("module_name".into(), json!(module.module_name));
                self.render(kind, values)
            }
            Node::GenericLayout(layout) => {
                let content = self.emit(&layout.content, sink)?;
                let mut values = TemplateValues::new();
                values.insert("header".into(), json!(layout.header));
                values.insert("footer".into(), json!(layout.footer));
                values.insert("content".into(), json!(content));
                self.render(kind, values)
            }
            Node::List(items) => {
                let mut content = Vec::new();
                for item in items {
                    content.push(self.emit(item, sink)?);
                }
                Ok(join(content))
            }
        }
    }

    /// Renders each item of a list separately; any other node is a single
    /// item.
    fn emit_items(&mut self, node: &Node, sink: &mut dyn DiagnosticSink) -> Result<Vec<String>> {
        match node {
            Node::List(items) => {
                let mut rendered = Vec::new();
                for item in items {
                    rendered.extend(self.emit_items(item, sink)?);
                }
                Ok(rendered)
            }
            other => Ok(vec![self.emit(other, sink)?]),
        }
    }

    fn template(&mut self, kind: NodeKind) -> Result<Rc<dyn Template>> {
        if let Some(template) = self.cache.get(&kind) {
            return Ok(template.clone());
        }
        let name = kind.to_string();
        let template = self
            .repository
            .resolve(&self.language, &name)
            .map_err(|source| Error::TemplateResolution {
                key: format!("{}/{name}", self.language),
                source,
            })?;
        self.cache.insert(kind, template.clone());
        Ok(template)
    }

    fn render(&mut self, kind: NodeKind, values: TemplateValues) -> Result<String> {
        let template = self.template(kind)?;
        let mut merged = self.common.clone();
        merged.extend(values);
        template
            .render(&merged)
            .map_err(|source| Error::TemplateRender {
                key: format!("{}/{kind}", self.language),
                source,
            })
    }
}

fn range_text(range: Option<&Range>) -> Value {
    json!(range.map(Range::to_string).unwrap_or_default())
}

fn field_values(register: &str, field: &str, range: &Range) -> TemplateValues {
    let mut values = TemplateValues::new();
    values.insert("register".into(), json!(register));
    values.insert("field".into(), json!(field));
    values.insert("high".into(), json!(range.high()));
    values.insert("low".into(), json!(range.low()));
    values.insert("width".into(), json!(range.width()));
    values.insert("range".into(), json!(range.to_string()));
    values
}

/// Joins rendered parts with newlines, dropping empty ones.
fn join(parts: Vec<String>) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
