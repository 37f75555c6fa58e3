// Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::synthesis::{
    HwPortSynthesis, InterruptInstantiation, InterruptSignalSynthesis, RegisterInstantiation,
    RegisterSignalSynthesis, SynthesisOptions, SynthesisTool, WriteSelectDecoderSynthesis,
    HW_PORTS, INTERRUPT_INSTANTIATION, INTERRUPT_SIGNALS, REGISTER_INSTANTIATION,
    REGISTER_SIGNALS, WRITE_SELECT_DECODER,
};
use std::collections::BTreeMap;

/// Creates a synthesis tool from the shared options.
pub type ToolFactory = Box<dyn Fn(&SynthesisOptions) -> Box<dyn SynthesisTool>>;

/// Task identifier to synthesis tool lookup.
#[derive(Default)]
pub struct SynthesisRegistry {
    factories: BTreeMap<String, ToolFactory>,
}

impl SynthesisRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in tasks.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(HW_PORTS, |_| Box::new(HwPortSynthesis));
        registry.register(REGISTER_SIGNALS, |_| Box::new(RegisterSignalSynthesis));
        registry.register(INTERRUPT_SIGNALS, |_| Box::new(InterruptSignalSynthesis));
        registry.register(REGISTER_INSTANTIATION, |options| {
            Box::new(RegisterInstantiation::new(*options))
        });
        registry.register(INTERRUPT_INSTANTIATION, |_| Box::new(InterruptInstantiation));
        registry.register(WRITE_SELECT_DECODER, |_| Box::new(WriteSelectDecoderSynthesis));
        registry
    }

    /// Adds a task, replacing any factory already registered under `task`.
    pub fn register<F>(&mut self, task: &str, factory: F)
    where
        F: Fn(&SynthesisOptions) -> Box<dyn SynthesisTool> + 'static,
    {
        if self
            .factories
            .insert(task.to_string(), Box::new(factory))
            .is_some()
        {
            log::debug!("replacing synthesis task '{task}'");
        }
    }

    pub fn create(&self, task: &str, options: &SynthesisOptions) -> Result<Box<dyn SynthesisTool>> {
        self.factories
            .get(task)
            .map(|factory| factory(options))
            .ok_or_else(|| Error::UnknownSynthesisTask(task.to_string()))
    }

    pub fn contains(&self, task: &str) -> bool {
        self.factories.contains_key(task)
    }

    /// Registered task identifiers, sorted.
    pub fn tasks(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::act::Node;
    use crate::context::SynthesisContext;
    use rtlgen_model::DiagnosticSink;

    struct Empty;

    impl SynthesisTool for Empty {
        fn synthesize(
            &self,
            _context: &SynthesisContext<'_>,
            _sink: &mut dyn DiagnosticSink,
        ) -> Result<Node> {
            Ok(Node::List(Vec::new()))
        }
    }

    #[test]
    fn test_defaults() {
        let registry = SynthesisRegistry::with_defaults();
        assert_eq!(
            registry.tasks(),
            vec![
                "hw_ports",
                "interrupt_instantiation",
                "interrupt_signals",
                "register_instantiation",
                "register_signals",
                "write_select_decoder",
            ]
        );
        assert!(registry
            .create("hw_ports", &SynthesisOptions::default())
            .is_ok());
    }

    #[test]
    fn test_unknown_task() {
        let registry = SynthesisRegistry::with_defaults();
        let err = registry
            .create("read_mux", &SynthesisOptions::default())
            .err()
            .unwrap();
        assert!(matches!(err, Error::UnknownSynthesisTask(ref t) if t == "read_mux"));
        assert_eq!(err.to_string(), "unknown synthesis task 'read_mux'");
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = SynthesisRegistry::new();
        assert!(!registry.contains("hw_ports"));
        registry.register("hw_ports", |_| Box::new(Empty));
        registry.register("hw_ports", |_| Box::new(Empty));
        assert_eq!(registry.tasks(), vec!["hw_ports"]);
    }
}
