// Licensed under the Apache-2.0 license

//! Abstract component tree.
//!
//! The tree is built once from synthesis results, visited once by the
//! emitter and then dropped. Nodes are immutable after construction; the
//! constructors of [`Port`], [`SignalDeclaration`] and [`Assignment`]
//! validate their arguments.

mod component;
mod signal;

pub use component::{
    BackendModule, Decoder, FieldBypass, FieldInstance, FieldModule, GenericLayout,
    InterfaceModule, InterruptInstance, InterruptModule, LogicalGroup, TopModule,
};
pub use signal::{
    range_width, Assignment, Port, PortDirection, Range, SignalDeclaration, SignalKind,
};

use strum_macros::{Display, EnumString};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Range(Range),
    Port(Port),
    SignalDeclaration(SignalDeclaration),
    Assignment(Assignment),
    FieldInstance(FieldInstance),
    FieldBypass(FieldBypass),
    InterruptInstance(InterruptInstance),
    LogicalGroup(LogicalGroup),
    SelectDecoder(Decoder),
    WriteSelectDecoder(Decoder),
    TopModule(TopModule),
    BackendModule(BackendModule),
    InterfaceModule(InterfaceModule),
    FieldModule(FieldModule),
    InterruptModule(InterruptModule),
    GenericLayout(GenericLayout),
    /// Anonymous ordered sequence.
    List(Vec<Node>),
}

/// Variant tag of a [`Node`]. The snake_case text is the template name.
#[derive(Clone, Copy, Debug, Display, EnumString, Eq, PartialEq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind {
    Range,
    Port,
    SignalDeclaration,
    Assignment,
    FieldInstance,
    FieldBypass,
    InterruptInstance,
    LogicalGroup,
    SelectDecoder,
    WriteSelectDecoder,
    TopModule,
    BackendModule,
    InterfaceModule,
    FieldModule,
    InterruptModule,
    GenericLayout,
    List,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Range(_) => NodeKind::Range,
            Node::Port(_) => NodeKind::Port,
            Node::SignalDeclaration(_) => NodeKind::SignalDeclaration,
            Node::Assignment(_) => NodeKind::Assignment,
            Node::FieldInstance(_) => NodeKind::FieldInstance,
            Node::FieldBypass(_) => NodeKind::FieldBypass,
            Node::InterruptInstance(_) => NodeKind::InterruptInstance,
            Node::LogicalGroup(_) => NodeKind::LogicalGroup,
            Node::SelectDecoder(_) => NodeKind::SelectDecoder,
            Node::WriteSelectDecoder(_) => NodeKind::WriteSelectDecoder,
            Node::TopModule(_) => NodeKind::TopModule,
            Node::BackendModule(_) => NodeKind::BackendModule,
            Node::InterfaceModule(_) => NodeKind::InterfaceModule,
            Node::FieldModule(_) => NodeKind::FieldModule,
            Node::InterruptModule(_) => NodeKind::InterruptModule,
            Node::GenericLayout(_) => NodeKind::GenericLayout,
            Node::List(_) => NodeKind::List,
        }
    }

    /// Direct children, in order. Empty for leaves.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::LogicalGroup(group) => group.children.iter().collect(),
            Node::List(items) => items.iter().collect(),
            Node::TopModule(top) => vec![&*top.hw_ports, &*top.interrupt_ports],
            Node::BackendModule(backend) => vec![
                &*backend.hw_ports,
                &*backend.interrupt_ports,
                &*backend.signal_declarations,
                &*backend.instantiation,
                &*backend.write_select_decoder,
            ],
            Node::GenericLayout(layout) => vec![&*layout.content],
            Node::Range(_)
            | Node::Port(_)
            | Node::SignalDeclaration(_)
            | Node::Assignment(_)
            | Node::FieldInstance(_)
            | Node::FieldBypass(_)
            | Node::InterruptInstance(_)
            | Node::SelectDecoder(_)
            | Node::WriteSelectDecoder(_)
            | Node::InterfaceModule(_)
            | Node::FieldModule(_)
            | Node::InterruptModule(_) => Vec::new(),
        }
    }

    /// Depth-first search for every node of the given kind, in order.
    pub fn find_all(&self, kind: NodeKind) -> Vec<&Node> {
        let mut found = Vec::new();
        self.collect(kind, &mut found);
        found
    }

    fn collect<'a>(&'a self, kind: NodeKind, found: &mut Vec<&'a Node>) {
        if self.kind() == kind {
            found.push(self);
        }
        for child in self.children() {
            child.collect(kind, found);
        }
    }
}
