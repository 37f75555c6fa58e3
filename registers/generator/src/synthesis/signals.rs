// Licensed under the Apache-2.0 license

use super::SynthesisTool;
use crate::act::{Node, Range, SignalDeclaration, SignalKind};
use crate::context::SynthesisContext;
use crate::error::Result;
use crate::util::{interrupt_signal, register_signal, SELECT_SUFFIX};
use rtlgen_model::DiagnosticSink;

/// Bus-side data wires are always 32 bits wide.
const REGISTER_DATA_RANGE: Range = Range::new(31, 0);

/// Declares the select strobe and the data wires of every register.
#[derive(Clone, Copy, Debug, Default)]
pub struct RegisterSignalSynthesis;

impl SynthesisTool for RegisterSignalSynthesis {
    fn synthesize(
        &self,
        context: &SynthesisContext<'_>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Node> {
        let mut declarations = Vec::new();
        for reg in context.registers() {
            let name = reg.name();
            sink.debug(&format!("Register signals: {name}"));
            declarations.push(SignalDeclaration::with_kind(
                &register_signal(name, SELECT_SUFFIX),
                SignalKind::Logic,
                None,
            ));
            for suffix in ["data_in", "data_out"] {
                declarations.push(SignalDeclaration::with_kind(
                    &register_signal(name, suffix),
                    SignalKind::Wire,
                    Some(REGISTER_DATA_RANGE),
                ));
            }
        }
        Ok(Node::List(
            declarations
                .into_iter()
                .map(Node::SignalDeclaration)
                .collect(),
        ))
    }
}

/// Declares the enable/set/clear/status wires of every interrupt.
#[derive(Clone, Copy, Debug, Default)]
pub struct InterruptSignalSynthesis;

impl SynthesisTool for InterruptSignalSynthesis {
    fn synthesize(
        &self,
        context: &SynthesisContext<'_>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Node> {
        let mut declarations = Vec::new();
        for intr in context.interrupts() {
            let name = intr.name();
            sink.debug(&format!("Interrupt signals: {name}"));
            for suffix in ["enable", "set", "clear", "status"] {
                declarations.push(Node::SignalDeclaration(SignalDeclaration::with_kind(
                    &interrupt_signal(name, suffix),
                    SignalKind::Wire,
                    None,
                )));
            }
        }
        Ok(Node::List(declarations))
    }
}
