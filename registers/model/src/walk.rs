// Licensed under the Apache-2.0 license

//! Depth-first traversal of an elaborated model.
//!
//! [`walk`] visits every reachable node exactly once, in declaration order,
//! and calls the matching `enter_*`/`exit_*` method of a [`ModelListener`].
//! Nodes are handed out as lightweight views carrying the hierarchical path
//! and the byte address relative to the walked root.

use crate::model::{AddrMap, Component, Field, RegFile, Register};

/// View of an address map or register file during a walk.
#[derive(Clone, Debug)]
pub struct BlockNode<'a> {
    pub path: String,
    pub name: &'a str,
    /// Byte address relative to the walked root.
    pub address: u64,
}

/// View of a register during a walk.
#[derive(Clone, Debug)]
pub struct RegNode<'a> {
    pub path: String,
    /// Byte address relative to the walked root.
    pub address: u64,
    pub reg: &'a Register,
}

impl<'a> RegNode<'a> {
    pub fn name(&self) -> &'a str {
        &self.reg.name
    }
}

/// View of a field during a walk.
#[derive(Clone, Debug)]
pub struct FieldNode<'a> {
    pub path: String,
    /// The register that owns this field.
    pub parent: &'a Register,
    /// Byte address of the owning register relative to the walked root.
    pub address: u64,
    pub field: &'a Field,
}

impl<'a> FieldNode<'a> {
    pub fn name(&self) -> &'a str {
        &self.field.name
    }
}

/// Callbacks invoked by [`walk`]. Every method defaults to doing nothing.
#[allow(unused_variables)]
pub trait ModelListener<'a> {
    fn enter_addrmap(&mut self, node: &BlockNode<'a>) {}
    fn exit_addrmap(&mut self, node: &BlockNode<'a>) {}
    fn enter_regfile(&mut self, node: &BlockNode<'a>) {}
    fn exit_regfile(&mut self, node: &BlockNode<'a>) {}
    fn enter_reg(&mut self, node: &RegNode<'a>) {}
    fn exit_reg(&mut self, node: &RegNode<'a>) {}
    fn enter_field(&mut self, node: &FieldNode<'a>) {}
    fn exit_field(&mut self, node: &FieldNode<'a>) {}
}

/// Walk `root` and everything below it.
///
/// The root's own offset is not added to the addresses handed to the
/// listener, so a register at offset 0x10 directly below the root is
/// reported at address 0x10.
pub fn walk<'a>(root: &'a AddrMap, listener: &mut dyn ModelListener<'a>) {
    let node = BlockNode {
        path: root.name.clone(),
        name: &root.name,
        address: 0,
    };
    listener.enter_addrmap(&node);
    walk_children(&root.children, &node.path, 0, listener);
    listener.exit_addrmap(&node);
}

fn walk_children<'a>(
    children: &'a [Component],
    prefix: &str,
    base: u64,
    listener: &mut dyn ModelListener<'a>,
) {
    for child in children {
        let path = format!("{prefix}.{}", child.name());
        let address = base + child.offset();
        match child {
            Component::AddrMap(addrmap) => {
                let node = BlockNode {
                    path,
                    name: &addrmap.name,
                    address,
                };
                listener.enter_addrmap(&node);
                walk_children(&addrmap.children, &node.path, address, listener);
                listener.exit_addrmap(&node);
            }
            Component::RegFile(regfile) => walk_regfile(regfile, path, address, listener),
            Component::Reg(reg) => walk_reg(reg, path, address, listener),
        }
    }
}

fn walk_regfile<'a>(
    regfile: &'a RegFile,
    path: String,
    address: u64,
    listener: &mut dyn ModelListener<'a>,
) {
    let node = BlockNode {
        path,
        name: &regfile.name,
        address,
    };
    listener.enter_regfile(&node);
    walk_children(&regfile.children, &node.path, address, listener);
    listener.exit_regfile(&node);
}

fn walk_reg<'a>(
    reg: &'a Register,
    path: String,
    address: u64,
    listener: &mut dyn ModelListener<'a>,
) {
    let node = RegNode { path, address, reg };
    listener.enter_reg(&node);
    for field in &reg.fields {
        let field_node = FieldNode {
            path: format!("{}.{}", node.path, field.name),
            parent: reg,
            address,
            field,
        };
        listener.enter_field(&field_node);
        listener.exit_field(&field_node);
    }
    listener.exit_reg(&node);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AccessType;

    fn reg(name: &str, offset: u64, fields: &[&str]) -> Component {
        Component::Reg(Register {
            name: name.into(),
            offset,
            width: 32,
            fields: fields
                .iter()
                .enumerate()
                .map(|(i, f)| Field {
                    name: f.to_string(),
                    high: i as u32,
                    low: i as u32,
                    sw: AccessType::Rw,
                    hw: AccessType::R,
                    reset: None,
                    reset_mask: None,
                    intr: false,
                    ispresent: true,
                    desc: None,
                })
                .collect(),
            desc: None,
        })
    }

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl<'a> ModelListener<'a> for Recorder {
        fn enter_addrmap(&mut self, node: &BlockNode<'a>) {
            self.0.push(format!("+map {}", node.path));
        }
        fn exit_addrmap(&mut self, node: &BlockNode<'a>) {
            self.0.push(format!("-map {}", node.path));
        }
        fn enter_regfile(&mut self, node: &BlockNode<'a>) {
            self.0.push(format!("+rf {} @0x{:x}", node.path, node.address));
        }
        fn enter_reg(&mut self, node: &RegNode<'a>) {
            self.0.push(format!("+reg {} @0x{:x}", node.path, node.address));
        }
        fn enter_field(&mut self, node: &FieldNode<'a>) {
            self.0.push(format!("+field {}", node.path));
        }
    }

    #[test]
    fn test_walk_order_and_addresses() {
        let root = AddrMap {
            name: "top".into(),
            offset: 0x1000,
            children: vec![
                reg("a", 0x0, &["x", "y"]),
                Component::RegFile(RegFile {
                    name: "rf".into(),
                    offset: 0x20,
                    children: vec![reg("b", 0x4, &["z"])],
                    desc: None,
                }),
                reg("c", 0x8, &[]),
            ],
            desc: None,
        };
        let mut recorder = Recorder::default();
        walk(&root, &mut recorder);
        assert_eq!(
            recorder.0,
            vec![
                "+map top",
                "+reg top.a @0x0",
                "+field top.a.x",
                "+field top.a.y",
                "+rf top.rf @0x20",
                "+reg top.rf.b @0x24",
                "+field top.rf.b.z",
                "+reg top.c @0x8",
                "-map top",
            ]
        );
    }
}
