//! Private operation set synthesis.
//!
//! The first generation stage turns a descriptor into one private function
//! per supported capability and input kind. Text degenerates to bytes, a
//! file degenerates to a stream opened in a local binding (closed on every
//! exit path when the binding drops), and the absent kind returns `None`
//! without calling any template. Capabilities the descriptor lacks produce
//! no functions at all.
//!
//! The set lowers to a hidden module, `__<base>_ops`, whose functions are
//! visible to the public family emitted next to it and nowhere else.

use std::fmt;

use proc_macro2::{Ident, TokenStream};
use quote::{ToTokens, format_ident, quote};

use crate::hygiene::RESERVED_PREFIX;
use crate::{AlgorithmDescriptor, Capability, CodegenError, Hygiene};

/// Runtime input kinds with a private variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputKind {
    Bytes,
    Text,
    Stream,
    File,
    Absent,
}

impl InputKind {
    pub const ALL: [Self; 5] = [
        Self::Bytes,
        Self::Text,
        Self::Stream,
        Self::File,
        Self::Absent,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bytes => "bytes",
            Self::Text => "text",
            Self::Stream => "stream",
            Self::File => "file",
            Self::Absent => "absent",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generated private function.
#[derive(Debug, Clone)]
pub struct PrivateOperation {
    pub capability: Capability,
    pub kind: InputKind,
    pub ident: Ident,
    item: TokenStream,
}

impl ToTokens for PrivateOperation {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.item.to_tokens(tokens);
    }
}

/// The implementation-private operations for one descriptor.
#[derive(Debug)]
pub struct OperationSet<'d> {
    descriptor: &'d AlgorithmDescriptor,
    base: Ident,
    module: Ident,
    operations: Vec<PrivateOperation>,
}

impl<'d> OperationSet<'d> {
    pub fn descriptor(&self) -> &'d AlgorithmDescriptor {
        self.descriptor
    }

    pub fn base(&self) -> &Ident {
        &self.base
    }

    /// Name of the hidden module the set lowers to.
    pub fn module(&self) -> &Ident {
        &self.module
    }

    pub fn operations(&self) -> &[PrivateOperation] {
        &self.operations
    }

    pub fn operation(&self, capability: Capability, kind: InputKind) -> Option<&PrivateOperation> {
        self.operations
            .iter()
            .find(|op| op.capability == capability && op.kind == kind)
    }

    pub fn supports(&self, capability: Capability) -> bool {
        self.operations.iter().any(|op| op.capability == capability)
    }

    /// Path to an operation from the module the family is emitted into.
    pub(crate) fn path(&self, capability: Capability, kind: InputKind) -> TokenStream {
        let module = &self.module;
        let ident = operation_ident(capability, kind);
        quote!(#module::#ident)
    }
}

impl ToTokens for OperationSet<'_> {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let module = &self.module;
        let operations = &self.operations;
        tokens.extend(quote! {
            #[doc(hidden)]
            mod #module {
                #(#operations)*
            }
        });
    }
}

/// Validates `base` as the identifier root of a family.
pub(crate) fn base_ident(base: &str) -> Result<Ident, CodegenError> {
    let invalid = |reason| CodegenError::InvalidBaseName {
        name: base.to_string(),
        reason,
    };
    if base.starts_with(RESERVED_PREFIX) || base.starts_with("__") {
        return Err(invalid("leading double underscores are reserved for generated names"));
    }
    if base.starts_with("r#") {
        return Err(invalid("raw identifiers are not supported"));
    }
    syn::parse_str::<Ident>(base).map_err(|_| invalid("not a Rust identifier"))
}

fn operation_ident(capability: Capability, kind: InputKind) -> Ident {
    let prefix = match capability {
        Capability::Hashing => "hash",
        Capability::Authentication => "hmac",
    };
    format_ident!("{}_{}", prefix, kind.as_str())
}

/// Builds the private operation set for `descriptor` under `base`.
pub fn synthesize_operations<'d>(
    descriptor: &'d AlgorithmDescriptor,
    base: &str,
    hygiene: &mut Hygiene,
) -> Result<OperationSet<'d>, CodegenError> {
    let base = base_ident(base)?;
    if descriptor.capabilities().is_empty() {
        return Err(CodegenError::NoCapabilities {
            display_name: descriptor.display_name().to_string(),
        });
    }

    let mut operations = Vec::with_capacity(10);
    if let Some(hashing) = descriptor.hashing() {
        for kind in InputKind::ALL {
            let item = hash_operation(hashing, kind, hygiene);
            operations.push(PrivateOperation {
                capability: Capability::Hashing,
                kind,
                ident: operation_ident(Capability::Hashing, kind),
                item,
            });
        }
    }
    if let Some(authentication) = descriptor.authentication() {
        for kind in InputKind::ALL {
            let item = hmac_operation(authentication, kind, hygiene);
            operations.push(PrivateOperation {
                capability: Capability::Authentication,
                kind,
                ident: operation_ident(Capability::Authentication, kind),
                item,
            });
        }
    }

    tracing::debug!(
        algorithm = descriptor.display_name(),
        base = %base,
        operations = operations.len(),
        "synthesized private operations"
    );

    let module = format_ident!("__{}_ops", base);
    Ok(OperationSet {
        descriptor,
        base,
        module,
        operations,
    })
}

fn hash_operation(
    hashing: &crate::HashingCapability,
    kind: InputKind,
    hygiene: &mut Hygiene,
) -> TokenStream {
    let digest = hashing.digest_type();
    let ident = operation_ident(Capability::Hashing, kind);
    match kind {
        InputKind::Bytes => {
            let data = hygiene.fresh("data");
            let body = hashing.expand_bytes(&data);
            quote! {
                pub(super) fn #ident(#data: &[u8]) -> #digest {
                    #body
                }
            }
        }
        InputKind::Text => {
            let text = hygiene.fresh("text");
            let bytes = operation_ident(Capability::Hashing, InputKind::Bytes);
            quote! {
                pub(super) fn #ident(#text: &str) -> #digest {
                    #bytes(#text.as_bytes())
                }
            }
        }
        InputKind::Stream => {
            let stream = hygiene.fresh("stream");
            let body = hashing.expand_stream(&stream);
            quote! {
                pub(super) fn #ident(
                    #stream: &mut ::digestforge_runtime::Stream<'_>,
                ) -> ::std::io::Result<#digest> {
                    ::std::io::Result::Ok(#body)
                }
            }
        }
        InputKind::File => {
            let path = hygiene.fresh("path");
            let settings = hygiene.fresh("settings");
            let file = hygiene.fresh("file");
            let stream = hygiene.fresh("stream");
            let delegate = operation_ident(Capability::Hashing, InputKind::Stream);
            quote! {
                pub(super) fn #ident(
                    #path: &::std::path::Path,
                    #settings: &::digestforge_runtime::ReadSettings,
                ) -> ::std::io::Result<#digest> {
                    let mut #file = ::digestforge_runtime::open_file(#path)?;
                    let mut #stream = ::digestforge_runtime::Stream::new(&mut #file, #settings);
                    #delegate(&mut #stream)
                }
            }
        }
        InputKind::Absent => quote! {
            pub(super) fn #ident() -> ::std::option::Option<#digest> {
                ::std::option::Option::None
            }
        },
    }
}

fn hmac_operation(
    authentication: &crate::AuthenticationCapability,
    kind: InputKind,
    hygiene: &mut Hygiene,
) -> TokenStream {
    let mac = authentication.digest_type();
    let ident = operation_ident(Capability::Authentication, kind);
    match kind {
        InputKind::Bytes => {
            let data = hygiene.fresh("data");
            let (params, normalize, key) = keyed_prelude(hygiene);
            let body = authentication.expand_bytes(&data, &key);
            quote! {
                pub(super) fn #ident(#data: &[u8], #params) -> ::std::io::Result<#mac> {
                    #normalize
                    ::std::io::Result::Ok(#body)
                }
            }
        }
        InputKind::Text => {
            let text = hygiene.fresh("text");
            let key = hygiene.fresh("key");
            let settings = hygiene.fresh("settings");
            let bytes = operation_ident(Capability::Authentication, InputKind::Bytes);
            quote! {
                pub(super) fn #ident(
                    #text: &str,
                    #key: ::digestforge_runtime::ByteSource<'_>,
                    #settings: &::digestforge_runtime::ReadSettings,
                ) -> ::std::io::Result<#mac> {
                    #bytes(#text.as_bytes(), #key, #settings)
                }
            }
        }
        InputKind::Stream => {
            let stream = hygiene.fresh("stream");
            let (params, normalize, key) = keyed_prelude(hygiene);
            let body = authentication.expand_stream(&stream, &key);
            quote! {
                pub(super) fn #ident(
                    #stream: &mut ::digestforge_runtime::Stream<'_>,
                    #params
                ) -> ::std::io::Result<#mac> {
                    #normalize
                    ::std::io::Result::Ok(#body)
                }
            }
        }
        InputKind::File => {
            let path = hygiene.fresh("path");
            let key = hygiene.fresh("key");
            let settings = hygiene.fresh("settings");
            let file = hygiene.fresh("file");
            let stream = hygiene.fresh("stream");
            let delegate = operation_ident(Capability::Authentication, InputKind::Stream);
            quote! {
                pub(super) fn #ident(
                    #path: &::std::path::Path,
                    #key: ::digestforge_runtime::ByteSource<'_>,
                    #settings: &::digestforge_runtime::ReadSettings,
                ) -> ::std::io::Result<#mac> {
                    let mut #file = ::digestforge_runtime::open_file(#path)?;
                    let mut #stream = ::digestforge_runtime::Stream::new(&mut #file, #settings);
                    #delegate(&mut #stream, #key, #settings)
                }
            }
        }
        InputKind::Absent => quote! {
            pub(super) fn #ident() -> ::std::option::Option<#mac> {
                ::std::option::Option::None
            }
        },
    }
}

/// Key and settings parameters plus the statements that normalize the key.
///
/// Returns the handle the keyed template sees, bound to `&[u8]`.
fn keyed_prelude(hygiene: &mut Hygiene) -> (TokenStream, TokenStream, crate::Handle) {
    let source = hygiene.fresh("key_source");
    let settings = hygiene.fresh("settings");
    let owned = hygiene.fresh("key_bytes");
    let key = hygiene.fresh("key");
    let params = quote! {
        #source: ::digestforge_runtime::ByteSource<'_>,
        #settings: &::digestforge_runtime::ReadSettings,
    };
    let normalize = quote! {
        let #owned = #source.normalize(#settings)?;
        let #key: &[u8] = &#owned;
    };
    (params, normalize, key)
}
