// Licensed under the Apache-2.0 license

use super::SynthesisTool;
use crate::act::{Decoder, Node};
use crate::context::SynthesisContext;
use crate::error::Result;
use crate::util::{register_signal, SELECT_SUFFIX};
use rtlgen_model::DiagnosticSink;

const WORD_BYTES: u64 = 4;

/// Maps the word address of every register to its select strobe.
///
/// Byte offsets that are not word aligned truncate to the containing word,
/// so two registers can share an entry address; both entries are kept.
#[derive(Clone, Copy, Debug, Default)]
pub struct WriteSelectDecoderSynthesis;

impl SynthesisTool for WriteSelectDecoderSynthesis {
    fn synthesize(
        &self,
        context: &SynthesisContext<'_>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Node> {
        let mut decoder = Decoder::new();
        for reg in context.registers() {
            let address = reg.address / WORD_BYTES;
            let signal = register_signal(reg.name(), SELECT_SUFFIX);
            sink.debug(&format!("Write select: {address} -> {signal}"));
            decoder.add(address, &signal);
        }
        Ok(Node::WriteSelectDecoder(decoder))
    }
}
