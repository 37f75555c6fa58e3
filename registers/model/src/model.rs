// Licensed under the Apache-2.0 license

//! Elaborated register model.
//!
//! The model is a plain owned tree. Every address and bit position has
//! already been resolved by elaboration (see [`crate::document`]), so the
//! consumers only ever read it.
//!
//! ```text
//! RegisterModel
//! └── roots: Vec<AddrMap>
//!     └── children: Vec<Component>
//!         ├── AddrMap   # nested address map
//!         ├── RegFile   # register file
//!         └── Reg       # register
//!             └── fields: Vec<Field>
//! ```
//!
//! Derived properties (readable/writable, storage) are free functions taking
//! the node as an argument rather than methods patched onto the node types.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, EnumVariantNames};

/// SystemRDL access type used for the `sw` and `hw` field properties.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Display,
    EnumString,
    EnumVariantNames,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    #[default]
    Rw,
    R,
    W,
    Rw1,
    W1,
    Na,
}

impl AccessType {
    pub fn is_readable(self) -> bool {
        matches!(self, AccessType::Rw | AccessType::Rw1 | AccessType::R)
    }

    pub fn is_writable(self) -> bool {
        matches!(
            self,
            AccessType::Rw | AccessType::Rw1 | AccessType::W | AccessType::W1
        )
    }
}

/// A bit field within a register.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Field {
    pub name: String,
    /// Most significant bit (inclusive).
    pub high: u32,
    /// Least significant bit (inclusive).
    pub low: u32,
    pub sw: AccessType,
    pub hw: AccessType,
    pub reset: Option<u64>,
    pub reset_mask: Option<u64>,
    /// Set when the field drives an interrupt.
    pub intr: bool,
    pub ispresent: bool,
    pub desc: Option<String>,
}

/// A register and its fields, in declaration order.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Register {
    pub name: String,
    /// Byte offset within the parent.
    pub offset: u64,
    /// Register width in bits (8, 16, 32 or 64).
    pub width: u32,
    pub fields: Vec<Field>,
    pub desc: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegFile {
    pub name: String,
    pub offset: u64,
    pub children: Vec<Component>,
    pub desc: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AddrMap {
    pub name: String,
    pub offset: u64,
    pub children: Vec<Component>,
    pub desc: Option<String>,
}

/// Anything that can be placed inside an address map or register file.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Component {
    AddrMap(AddrMap),
    RegFile(RegFile),
    Reg(Register),
}

impl Component {
    pub fn name(&self) -> &str {
        match self {
            Component::AddrMap(addrmap) => &addrmap.name,
            Component::RegFile(regfile) => &regfile.name,
            Component::Reg(reg) => &reg.name,
        }
    }

    pub fn offset(&self) -> u64 {
        match self {
            Component::AddrMap(addrmap) => addrmap.offset,
            Component::RegFile(regfile) => regfile.offset,
            Component::Reg(reg) => reg.offset,
        }
    }
}

/// The complete elaborated model: every top-level address map that was
/// defined, in definition order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RegisterModel {
    pub roots: Vec<AddrMap>,
}

impl RegisterModel {
    /// Select the top-level address map.
    ///
    /// With an explicit name the matching root is returned; otherwise the
    /// last defined root is used.
    pub fn top(&self, name: Option<&str>) -> Option<&AddrMap> {
        match name {
            Some(name) => self.roots.iter().find(|root| root.name == name),
            None => self.roots.last(),
        }
    }
}

pub fn field_width(field: &Field) -> u32 {
    field.high - field.low + 1
}

pub fn is_sw_readable(field: &Field) -> bool {
    field.sw.is_readable()
}

pub fn is_sw_writable(field: &Field) -> bool {
    field.sw.is_writable()
}

pub fn is_hw_readable(field: &Field) -> bool {
    field.hw.is_readable()
}

pub fn is_hw_writable(field: &Field) -> bool {
    field.hw.is_writable()
}

/// A field needs a flip-flop when software can change it, unless it is an
/// interrupt flag (those are held by the interrupt logic instead).
pub fn implements_storage(field: &Field) -> bool {
    !field.intr && is_sw_writable(field)
}
