// Licensed under the Apache-2.0 license

use super::{SynthesisOptions, SynthesisTool};
use crate::act::{
    Assignment, FieldBypass, FieldInstance, InterruptInstance, LogicalGroup, Node, Range,
};
use crate::context::SynthesisContext;
use crate::error::Result;
use crate::util::{hex_offset, hw_port_name, register_signal};
use rtlgen_model::{field_width, is_hw_writable, DiagnosticSink, Field, SourceRef};

/// Instantiates the fields of every register.
///
/// Storage fields become [`FieldInstance`]s and interrupt flags become
/// [`FieldBypass`]es. Each field is labeled with a level-2 group and the
/// fields of a register with a level-1 group carrying the register offset.
/// Hardware-writable fields also drive their exported port from the
/// register read data.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegisterInstantiation {
    options: SynthesisOptions,
}

impl RegisterInstantiation {
    pub fn new(options: SynthesisOptions) -> Self {
        Self { options }
    }

    fn field_group(&self, reg: &str, field: &Field, sink: &mut dyn DiagnosticSink) -> Result<Node> {
        let range = Range::new(i64::from(field.high), i64::from(field.low));
        let mut children = Vec::new();
        if field.intr {
            sink.debug(&format!("Field bypass: {reg}.{}", field.name));
            children.push(Node::FieldBypass(FieldBypass {
                register: reg.to_string(),
                field: field.name.clone(),
                range,
            }));
        } else {
            sink.debug(&format!("Field instance: {reg}.{}", field.name));
            children.push(Node::FieldInstance(FieldInstance {
                register: reg.to_string(),
                field: field.name.clone(),
                range,
                reset_mask: field.reset_mask.unwrap_or(0),
                reset_value: field.reset.unwrap_or(0),
            }));
        }
        if is_hw_writable(field) {
            let port_range = (field_width(field) > 1).then(|| range.shift_to_zero());
            children.push(Node::Assignment(Assignment::new(
                &hw_port_name(reg, &field.name),
                &register_signal(reg, "data_out"),
                port_range,
                Some(range),
                true,
            )?));
        }
        Ok(Node::LogicalGroup(LogicalGroup {
            level: 2,
            description: format!("Field: {}", field.name),
            children,
        }))
    }
}

impl SynthesisTool for RegisterInstantiation {
    fn synthesize(
        &self,
        context: &SynthesisContext<'_>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Node> {
        let mut groups = Vec::new();
        for reg in context.registers() {
            let name = reg.name();
            if reg.reg.width > self.options.data_width {
                sink.warning(
                    &format!(
                        "register is {} bits wide, the data bus only {}",
                        reg.reg.width, self.options.data_width
                    ),
                    Some(&SourceRef::path(reg.path.as_str())),
                );
            }
            let mut fields = Vec::new();
            for field in &reg.reg.fields {
                if self.options.skip_not_present && !field.ispresent {
                    sink.debug(&format!("Skipping field not present: {name}.{}", field.name));
                    continue;
                }
                fields.push(self.field_group(name, field, sink)?);
            }
            groups.push(Node::LogicalGroup(LogicalGroup {
                level: 1,
                description: format!("Register: {name} (offset +{})", hex_offset(reg.address)),
                children: fields,
            }));
        }
        Ok(Node::List(groups))
    }
}

/// Instantiates one interrupt cell per interrupt flag.
#[derive(Clone, Copy, Debug, Default)]
pub struct InterruptInstantiation;

impl SynthesisTool for InterruptInstantiation {
    fn synthesize(
        &self,
        context: &SynthesisContext<'_>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Node> {
        let mut groups = Vec::new();
        for intr in context.interrupts() {
            let name = intr.name();
            sink.debug(&format!("Interrupt instance: {name}"));
            groups.push(Node::LogicalGroup(LogicalGroup {
                level: 1,
                description: format!("Interrupt: {name}"),
                children: vec![Node::InterruptInstance(InterruptInstance {
                    name: name.to_string(),
                })],
            }));
        }
        Ok(Node::List(groups))
    }
}
