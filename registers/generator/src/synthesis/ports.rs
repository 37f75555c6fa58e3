// Licensed under the Apache-2.0 license

use super::SynthesisTool;
use crate::act::{Node, Port, PortDirection, Range};
use crate::context::SynthesisContext;
use crate::error::Result;
use crate::util::hw_port_name;
use rtlgen_model::{field_width, is_hw_writable, DiagnosticSink};

/// Exports every hardware-writable field as an output port.
///
/// Multi-bit ports carry a range starting at bit zero; single-bit ports
/// have no range.
#[derive(Clone, Copy, Debug, Default)]
pub struct HwPortSynthesis;

impl SynthesisTool for HwPortSynthesis {
    fn synthesize(
        &self,
        context: &SynthesisContext<'_>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Node> {
        let mut ports = Vec::new();
        for node in context.fields() {
            if !is_hw_writable(node.field) {
                continue;
            }
            let name = hw_port_name(&node.parent.name, node.name());
            let range = (field_width(node.field) > 1).then(|| {
                Range::new(i64::from(node.field.high), i64::from(node.field.low)).shift_to_zero()
            });
            sink.debug(&format!("Hardware port: {name}"));
            ports.push(Node::Port(Port::with_direction(
                &name,
                PortDirection::Output,
                range,
            )));
        }
        Ok(Node::List(ports))
    }
}
