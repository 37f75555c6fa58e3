// Licensed under the Apache-2.0 license

//! Flattened view of a register model.

use rtlgen_model::{walk, AddrMap, FieldNode, ModelListener, RegNode};

/// Registers, fields and interrupt fields of one model, in declaration
/// order. Built by a single walk and never modified afterwards; every
/// synthesis tool reads from the same context, so output ordering follows
/// the model.
#[derive(Debug, Default)]
pub struct SynthesisContext<'a> {
    registers: Vec<RegNode<'a>>,
    fields: Vec<FieldNode<'a>>,
    interrupts: Vec<FieldNode<'a>>,
}

impl<'a> SynthesisContext<'a> {
    pub fn extract(root: &'a AddrMap) -> Self {
        let mut context = Self::default();
        walk(root, &mut context);
        context
    }

    pub fn registers(&self) -> &[RegNode<'a>] {
        &self.registers
    }

    pub fn fields(&self) -> &[FieldNode<'a>] {
        &self.fields
    }

    pub fn interrupts(&self) -> &[FieldNode<'a>] {
        &self.interrupts
    }
}

impl<'a> ModelListener<'a> for SynthesisContext<'a> {
    fn enter_reg(&mut self, node: &RegNode<'a>) {
        self.registers.push(node.clone());
    }

    fn enter_field(&mut self, node: &FieldNode<'a>) {
        self.fields.push(node.clone());
        if node.field.intr {
            self.interrupts.push(node.clone());
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rtlgen_model::{AccessType, Component, Field, RegFile, Register};

    pub fn field(name: &str, high: u32, low: u32) -> Field {
        Field {
            name: name.into(),
            high,
            low,
            sw: AccessType::Rw,
            hw: AccessType::R,
            reset: None,
            reset_mask: None,
            intr: false,
            ispresent: true,
            desc: None,
        }
    }

    pub fn register(name: &str, offset: u64, fields: Vec<Field>) -> Component {
        Component::Reg(Register {
            name: name.into(),
            offset,
            width: 32,
            fields,
            desc: None,
        })
    }

    pub fn addrmap(children: Vec<Component>) -> AddrMap {
        AddrMap {
            name: "top".into(),
            offset: 0,
            children,
            desc: None,
        }
    }

    #[test]
    fn test_extract_order() {
        let irq = Field {
            intr: true,
            ..field("IRQ", 1, 1)
        };
        let root = addrmap(vec![
            register("A", 0x0, vec![field("X", 0, 0), irq]),
            Component::RegFile(RegFile {
                name: "rf".into(),
                offset: 0x10,
                children: vec![register("B", 0x4, vec![field("Y", 7, 0)])],
                desc: None,
            }),
        ]);
        let ctx = SynthesisContext::extract(&root);
        let regs: Vec<_> = ctx.registers().iter().map(|r| (r.name(), r.address)).collect();
        assert_eq!(regs, vec![("A", 0x0), ("B", 0x14)]);
        let fields: Vec<_> = ctx.fields().iter().map(|f| f.name()).collect();
        assert_eq!(fields, vec!["X", "IRQ", "Y"]);
        assert_eq!(ctx.interrupts().len(), 1);
        assert_eq!(ctx.interrupts()[0].parent.name, "A");
    }
}
