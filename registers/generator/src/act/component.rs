// Licensed under the Apache-2.0 license

//! Structural nodes: field and interrupt instances, decoders, modules and
//! the file layout.

use super::signal::Range;
use super::Node;

/// A storage field of a register.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldInstance {
    pub register: String,
    pub field: String,
    /// Bit position inside the register.
    pub range: Range,
    pub reset_mask: u64,
    pub reset_value: u64,
}

/// An interrupt flag routed around the storage and reset logic.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldBypass {
    pub register: String,
    pub field: String,
    pub range: Range,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InterruptInstance {
    pub name: String,
}

/// Labels a group of nodes. Has no effect on the generated logic.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogicalGroup {
    pub level: u32,
    pub description: String,
    pub children: Vec<Node>,
}

/// Word address to select signal mapping, in register order.
///
/// Colliding word addresses are kept; each entry decodes independently.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Decoder {
    pub address_map: Vec<(u64, String)>,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, address: u64, signal: &str) {
        self.address_map.push((address, signal.to_string()));
    }

    pub fn get(&self, address: u64) -> Vec<&str> {
        self.address_map
            .iter()
            .filter(|(a, _)| *a == address)
            .map(|(_, s)| s.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.address_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.address_map.is_empty()
    }
}

/// Top-level module: bus ports plus the exported hardware ports and the
/// interrupt event inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopModule {
    pub module_name: String,
    pub interface_module: String,
    pub backend_module: String,
    pub hw_ports: Box<Node>,
    pub interrupt_ports: Box<Node>,
}

/// Register storage, interrupt logic and address decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendModule {
    pub module_name: String,
    pub hw_ports: Box<Node>,
    pub interrupt_ports: Box<Node>,
    pub signal_declarations: Box<Node>,
    pub instantiation: Box<Node>,
    pub write_select_decoder: Box<Node>,
}

/// Bus protocol adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceModule {
    pub module_name: String,
    pub interface: String,
}

/// Generic storage cell instantiated once per field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldModule {
    pub module_name: String,
}

/// Generic interrupt cell instantiated once per interrupt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterruptModule {
    pub module_name: String,
}

/// Wraps the whole output file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericLayout {
    pub header: Option<String>,
    pub footer: Option<String>,
    pub content: Box<Node>,
}
