//! Algorithm registry and per-descriptor generators.

use std::collections::BTreeMap;

use crate::{
    AlgorithmDescriptor, CodegenError, FamilyOptions, FunctionFamily, Hygiene, algorithms,
    synthesize_family, synthesize_operations,
};

/// Maps external algorithm names to descriptors.
#[derive(Debug, Default)]
pub struct Registry {
    descriptors: BTreeMap<String, AlgorithmDescriptor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the descriptors shipped with this crate.
    pub fn builtin() -> Result<Self, CodegenError> {
        let mut registry = Self::new();
        for (name, descriptor) in algorithms::builtin()? {
            registry.register(name, descriptor)?;
        }
        Ok(registry)
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        descriptor: AlgorithmDescriptor,
    ) -> Result<(), CodegenError> {
        let name = name.into();
        if self.descriptors.contains_key(&name) {
            return Err(CodegenError::DuplicateAlgorithm { name });
        }
        tracing::debug!(
            algorithm = %name,
            display = descriptor.display_name(),
            hashing = descriptor.supports_hashing(),
            authentication = descriptor.supports_authentication(),
            "registered algorithm"
        );
        self.descriptors.insert(name, descriptor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&AlgorithmDescriptor> {
        self.descriptors.get(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.descriptors.keys().map(String::as_str)
    }

    /// Generator for `name`, or `None` if nothing is registered under it.
    ///
    /// Reporting the miss is left to the caller; [`Emitter`](crate::Emitter)
    /// turns it into a diagnostic.
    pub fn generator(&self, name: &str) -> Option<Generator<'_>> {
        match self.descriptors.get(name) {
            Some(descriptor) => Some(Generator { descriptor }),
            None => {
                tracing::debug!(algorithm = name, "no descriptor registered");
                None
            }
        }
    }
}

/// Runs both generation stages for one descriptor.
#[derive(Debug, Clone, Copy)]
pub struct Generator<'d> {
    descriptor: &'d AlgorithmDescriptor,
}

impl<'d> Generator<'d> {
    pub fn new(descriptor: &'d AlgorithmDescriptor) -> Self {
        Self { descriptor }
    }

    pub fn descriptor(&self) -> &'d AlgorithmDescriptor {
        self.descriptor
    }

    /// Builds the private set and the public family rooted at `base`.
    pub fn generate(
        &self,
        base: &str,
        hygiene: &mut Hygiene,
        options: FamilyOptions,
    ) -> Result<FunctionFamily<'d>, CodegenError> {
        let operations = synthesize_operations(self.descriptor, base, hygiene)?;
        Ok(synthesize_family(operations, hygiene, options))
    }
}
