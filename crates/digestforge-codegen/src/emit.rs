//! Batch emission.
//!
//! An [`Emitter`] runs a list of [`FamilyRequest`]s against a [`Registry`]
//! in one generation pass. Requests that cannot be satisfied (unregistered
//! algorithm, descriptor without capabilities, bad or duplicate base name,
//! a member whose Rust name an earlier family already defines) do not stop
//! the pass: they become [`Diagnostic`]s and the remaining
//! families are still emitted.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use proc_macro2::TokenStream;
use quote::ToTokens;

use crate::{CodegenError, FamilyOptions, FamilyRequest, Hygiene, Registry};

/// Header written above the emitted items.
pub const GENERATED_HEADER: &str = "// @generated by digestforge-codegen. Do not edit.\n";

/// A problem reported to the build operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub algorithm: String,
    pub base_name: String,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "skipped family `{}` ({}): {}",
            self.base_name, self.algorithm, self.message
        )
    }
}

/// What one emitted family contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilySummary {
    pub algorithm: String,
    pub base_name: String,
    pub members: Vec<String>,
}

/// Result of a generation pass.
#[derive(Debug, Default)]
pub struct Emission {
    pub families: Vec<FamilySummary>,
    pub diagnostics: Vec<Diagnostic>,
    tokens: TokenStream,
}

impl Emission {
    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    /// Source text suitable for `include!`.
    pub fn source(&self) -> String {
        format!("{GENERATED_HEADER}{}\n", self.tokens)
    }

    /// Writes [`source`](Self::source) to `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), CodegenError> {
        let source = self.source();
        std::fs::write(path, &source).map_err(|source| CodegenError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            families = self.families.len(),
            diagnostics = self.diagnostics.len(),
            bytes = source.len(),
            "wrote generated families"
        );
        Ok(())
    }
}

/// Runs generation passes against a registry.
#[derive(Debug)]
pub struct Emitter<'r> {
    registry: &'r Registry,
    options: FamilyOptions,
}

impl<'r> Emitter<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            options: FamilyOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FamilyOptions) -> Self {
        self.options = options;
        self
    }

    /// Emits every request that can be satisfied.
    pub fn emit(&self, requests: &[FamilyRequest]) -> Emission {
        let mut hygiene = Hygiene::new();
        let mut emission = Emission::default();
        let mut used = HashSet::new();
        // Rust identifier of every emitted member, mapped to its family.
        let mut defined: HashMap<String, String> = HashMap::new();

        for request in requests {
            let base_name = request.base_name();
            let diagnose = |message: String| {
                let diagnostic = Diagnostic {
                    algorithm: request.algorithm.clone(),
                    base_name: base_name.to_string(),
                    message,
                };
                tracing::warn!(
                    algorithm = %diagnostic.algorithm,
                    base = %diagnostic.base_name,
                    "{}",
                    diagnostic.message
                );
                diagnostic
            };

            if used.contains(base_name) {
                let err = CodegenError::DuplicateFamily {
                    name: base_name.to_string(),
                };
                emission.diagnostics.push(diagnose(err.to_string()));
                continue;
            }

            let Some(generator) = self.registry.generator(&request.algorithm) else {
                emission.diagnostics.push(diagnose(format!(
                    "no algorithm registered under `{}`",
                    request.algorithm
                )));
                continue;
            };

            match generator.generate(base_name, &mut hygiene, self.options) {
                Ok(family) => {
                    let collision = family.members().iter().find_map(|member| {
                        let ident = member.ident().to_string();
                        defined.get(&ident).map(|owner| CodegenError::MemberCollision {
                            name: base_name.to_string(),
                            ident,
                            owner: owner.clone(),
                        })
                    });
                    if let Some(err) = collision {
                        emission.diagnostics.push(diagnose(err.to_string()));
                        continue;
                    }

                    used.insert(base_name.to_string());
                    for member in family.members() {
                        defined.insert(member.ident().to_string(), base_name.to_string());
                    }
                    family.to_tokens(&mut emission.tokens);
                    emission.families.push(FamilySummary {
                        algorithm: request.algorithm.clone(),
                        base_name: base_name.to_string(),
                        members: family
                            .member_names()
                            .into_iter()
                            .map(str::to_string)
                            .collect(),
                    });
                }
                Err(err) => emission.diagnostics.push(diagnose(err.to_string())),
            }
        }

        tracing::info!(
            requested = requests.len(),
            emitted = emission.families.len(),
            skipped = emission.diagnostics.len(),
            fresh_identifiers = hygiene.allocated(),
            "generation pass complete"
        );
        emission
    }
}
