//! # digestforge-codegen: digest function family generator
//!
//! Given an [`AlgorithmDescriptor`] and a base name, this crate emits a
//! uniformly named family of public functions (up to twelve) that compute
//! digests and HMAC codes over byte sequences, text, and files.
//!
//! Generation runs in two stages:
//!
//! 1. [`synthesize_operations`] expands the descriptor's templates into a
//!    private [`OperationSet`], one function per supported input kind
//! 2. [`synthesize_family`] wraps that set in the public [`FunctionFamily`]
//!
//! Both stages are plain data. Lowering to tokens goes through
//! [`quote::ToTokens`], and [`Emitter`] batches whole configurations into a
//! single source file meant for `include!` from a build script.
//!
//! # Architecture
//!
//! ```text
//! digestforge.toml ──► ConfigLoader ──► GeneratorConfig
//!                                            │
//!   Registry ──► Generator ──► OperationSet ──► FunctionFamily
//!                                            │
//!                                 Emitter ──► Emission ──► $OUT_DIR/*.rs
//! ```
//!
//! Generated code calls into `digestforge-runtime` and the algorithm crates
//! by absolute path, so whatever includes it must depend on both.

pub mod algorithms;
mod config;
mod descriptor;
mod emit;
mod error;
mod family;
mod hygiene;
mod operations;
mod registry;

pub use config::{CONFIG_FILE, ConfigLoader, FamilyRequest, GeneratorConfig};
pub use descriptor::{
    AlgorithmDescriptor, AuthenticationBuilder, AuthenticationCapability, Capability,
    HashingBuilder, HashingCapability, KeyedTemplate, Template,
};
pub use emit::{Diagnostic, Emission, Emitter, FamilySummary, GENERATED_HEADER};
pub use error::CodegenError;
pub use family::{
    Encoding, FamilyMember, FamilyOptions, FunctionFamily, Source, canonical_name, rust_ident,
    synthesize_family,
};
pub use hygiene::{Handle, Hygiene, RESERVED_PREFIX};
pub use operations::{InputKind, OperationSet, PrivateOperation, synthesize_operations};
pub use registry::{Generator, Registry};
