// Licensed under the Apache-2.0 license

//! Synthesis tools.
//!
//! Each tool reads the [`SynthesisContext`] and derives one slice of the
//! component tree. Tools are independent of each other and are looked up by
//! task identifier through the [`SynthesisRegistry`](crate::SynthesisRegistry).
//!
//! | Task                      | Output                                        |
//! |---------------------------|-----------------------------------------------|
//! | `hw_ports`                | one output port per hardware-writable field   |
//! | `register_signals`        | select and data wires of every register       |
//! | `interrupt_signals`       | enable/set/clear/status wires per interrupt   |
//! | `register_instantiation`  | field instances grouped per register          |
//! | `interrupt_instantiation` | interrupt instances                           |
//! | `write_select_decoder`    | word address to select signal map             |

mod decoder;
mod instantiation;
mod ports;
mod signals;

pub use decoder::WriteSelectDecoderSynthesis;
pub use instantiation::{InterruptInstantiation, RegisterInstantiation};
pub use ports::HwPortSynthesis;
pub use signals::{InterruptSignalSynthesis, RegisterSignalSynthesis};

use crate::act::Node;
use crate::context::SynthesisContext;
use crate::error::Result;
use rtlgen_model::DiagnosticSink;

pub const HW_PORTS: &str = "hw_ports";
pub const REGISTER_SIGNALS: &str = "register_signals";
pub const INTERRUPT_SIGNALS: &str = "interrupt_signals";
pub const REGISTER_INSTANTIATION: &str = "register_instantiation";
pub const INTERRUPT_INSTANTIATION: &str = "interrupt_instantiation";
pub const WRITE_SELECT_DECODER: &str = "write_select_decoder";

/// Options shared by every synthesis tool.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SynthesisOptions {
    /// Data bus width in bits.
    pub data_width: u32,
    /// Leave out fields whose `ispresent` property is false.
    pub skip_not_present: bool,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            data_width: 32,
            skip_not_present: false,
        }
    }
}

pub trait SynthesisTool {
    /// Derives a subtree, or a flat [`Node::List`], from the context.
    fn synthesize(
        &self,
        context: &SynthesisContext<'_>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Node>;
}
