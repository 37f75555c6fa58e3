// Licensed under the Apache-2.0 license

//! Assembles the component tree of one design.

use crate::act::{
    BackendModule, FieldModule, GenericLayout, InterfaceModule, InterruptModule, Node, Port,
    PortDirection, TopModule,
};
use crate::config::GeneratorConfig;
use crate::context::SynthesisContext;
use crate::error::Result;
use crate::registry::SynthesisRegistry;
use crate::synthesis::{
    SynthesisOptions, HW_PORTS, INTERRUPT_INSTANTIATION, INTERRUPT_SIGNALS,
    REGISTER_INSTANTIATION, REGISTER_SIGNALS, WRITE_SELECT_DECODER,
};
use crate::util::interrupt_signal;
use rtlgen_model::{AddrMap, DiagnosticSink};

/// Names of the generated modules of a design `<d>`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ModuleNames {
    /// `<d>`
    pub top: String,
    /// `<d>_backend`
    pub backend: String,
    /// `<d>_<interface>_if`
    pub interface: String,
    /// `<d>_field`
    pub field: String,
    /// `<d>_intr`
    pub interrupt: String,
}

impl ModuleNames {
    pub fn new(design: &str, interface: &str) -> Self {
        Self {
            top: design.to_string(),
            backend: format!("{design}_backend"),
            interface: format!("{design}_{interface}_if"),
            field: format!("{design}_field"),
            interrupt: format!("{design}_intr"),
        }
    }
}

pub struct ActBuilder {
    config: GeneratorConfig,
    registry: SynthesisRegistry,
    names: ModuleNames,
    options: SynthesisOptions,
}

impl ActBuilder {
    /// Fails when the configuration is incomplete, before anything is
    /// synthesized.
    pub fn new(config: GeneratorConfig, registry: SynthesisRegistry) -> Result<Self> {
        config.validate()?;
        let names = ModuleNames::new(config.require_design_name()?, &config.interface_name);
        let options = config.synthesis_options();
        Ok(Self {
            config,
            registry,
            names,
            options,
        })
    }

    pub fn module_names(&self) -> &ModuleNames {
        &self.names
    }

    fn run(
        &self,
        task: &str,
        context: &SynthesisContext<'_>,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Node> {
        sink.debug(&format!("Running synthesis task '{task}'"));
        self.registry
            .create(task, &self.options)?
            .synthesize(context, sink)
    }

    /// One `intr_<n>_event` input per interrupt, setting its pending flag.
    fn interrupt_ports(context: &SynthesisContext<'_>, sink: &mut dyn DiagnosticSink) -> Node {
        Node::List(
            context
                .interrupts()
                .iter()
                .map(|intr| {
                    let name = interrupt_signal(intr.name(), "event");
                    sink.debug(&format!("Interrupt port: {name}"));
                    Node::Port(Port::with_direction(&name, PortDirection::Input, None))
                })
                .collect(),
        )
    }

    /// Builds the tree for `root`, wrapped in a [`GenericLayout`].
    pub fn build(&self, root: &AddrMap, sink: &mut dyn DiagnosticSink) -> Result<Node> {
        let context = SynthesisContext::extract(root);
        sink.info(&format!(
            "Extracted {} registers, {} fields, {} interrupts from '{}'",
            context.registers().len(),
            context.fields().len(),
            context.interrupts().len(),
            root.name
        ));

        let hw_ports = self.run(HW_PORTS, &context, sink)?;
        let register_signals = self.run(REGISTER_SIGNALS, &context, sink)?;
        let interrupt_signals = self.run(INTERRUPT_SIGNALS, &context, sink)?;
        let register_instantiation = self.run(REGISTER_INSTANTIATION, &context, sink)?;
        let interrupt_instantiation = self.run(INTERRUPT_INSTANTIATION, &context, sink)?;
        let write_select_decoder = self.run(WRITE_SELECT_DECODER, &context, sink)?;
        let interrupt_ports = Self::interrupt_ports(&context, sink);

        let names = &self.names;
        let backend = Node::BackendModule(BackendModule {
            module_name: names.backend.clone(),
            hw_ports: Box::new(hw_ports.clone()),
            interrupt_ports: Box::new(interrupt_ports.clone()),
            signal_declarations: Box::new(Node::List(vec![register_signals, interrupt_signals])),
            instantiation: Box::new(Node::List(vec![
                register_instantiation,
                interrupt_instantiation,
            ])),
            write_select_decoder: Box::new(write_select_decoder),
        });
        let top = Node::TopModule(TopModule {
            module_name: names.top.clone(),
            interface_module: names.interface.clone(),
            backend_module: names.backend.clone(),
            hw_ports: Box::new(hw_ports),
            interrupt_ports: Box::new(interrupt_ports),
        });
        let interface = Node::InterfaceModule(InterfaceModule {
            module_name: names.interface.clone(),
            interface: self.config.interface_name.clone(),
        });
        let field = Node::FieldModule(FieldModule {
            module_name: names.field.clone(),
        });
        let interrupt = Node::InterruptModule(InterruptModule {
            module_name: names.interrupt.clone(),
        });

        Ok(Node::GenericLayout(GenericLayout {
            header: self.config.header.clone(),
            footer: self.config.footer.clone(),
            content: Box::new(Node::List(vec![top, backend, interface, field, interrupt])),
        }))
    }
}
