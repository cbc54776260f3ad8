//! Algorithm descriptors.
//!
//! A descriptor is everything an implementer supplies to plug an algorithm
//! into the generator: a display name plus an optional hashing capability
//! and an optional authentication capability. Each capability bundles four
//! expression templates and the type of the digest it produces.
//!
//! Templates are closures from [`Handle`]s to token streams. They run once
//! at generation time and must be pure: the same handles always produce the
//! same expression.
//!
//! ```
//! use digestforge_codegen::{AlgorithmDescriptor, HashingCapability};
//! use quote::quote;
//!
//! let md5 = AlgorithmDescriptor::new("MD5").with_hashing(
//!     HashingCapability::builder(quote!(::md5::Digest))
//!         .bytes(|data| quote!(::md5::compute(#data)))
//!         .stream(|stream| quote!({
//!             let mut context = ::md5::Context::new();
//!             #stream.for_each_chunk(|chunk| context.consume(chunk))?;
//!             context.compute()
//!         }))
//!         .to_text(|digest| quote!(::digestforge_runtime::hex::encode(#digest.0)))
//!         .to_bytes(|digest| quote!(#digest.0.to_vec()))
//!         .build()
//!         .unwrap(),
//! );
//! assert!(md5.supports_hashing());
//! assert!(!md5.supports_authentication());
//! ```

use std::fmt;

use proc_macro2::TokenStream;

use crate::{CodegenError, Handle};

/// Template over one handle.
pub type Template = Box<dyn Fn(&Handle) -> TokenStream>;

/// Template over an input handle and a key handle.
pub type KeyedTemplate = Box<dyn Fn(&Handle, &Handle) -> TokenStream>;

/// One of the two independently supportable capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    Hashing,
    Authentication,
}

impl Capability {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hashing => "hashing",
            Self::Authentication => "authentication",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Digest-to-output encoders shared by both capabilities.
pub(crate) struct Encoders {
    pub(crate) digest_type: TokenStream,
    pub(crate) to_text: Template,
    pub(crate) to_bytes: Template,
}

// -----------------------------------------------------------------------------
// Hashing
// -----------------------------------------------------------------------------

/// Unkeyed hashing templates.
///
/// - `bytes(data)`: `data: &[u8]` to the native digest
/// - `stream(stream)`: `stream: &mut Stream<'_>` to the native digest; the
///   expression is evaluated inside a function returning `std::io::Result`,
///   so `?` is available
/// - `to_text(digest)`: native digest to `String`
/// - `to_bytes(digest)`: native digest to `Vec<u8>`
pub struct HashingCapability {
    pub(crate) bytes: Template,
    pub(crate) stream: Template,
    pub(crate) encoders: Encoders,
}

impl HashingCapability {
    /// Starts a capability whose native digest has type `digest_type`.
    pub fn builder(digest_type: TokenStream) -> HashingBuilder {
        HashingBuilder {
            digest_type,
            bytes: None,
            stream: None,
            to_text: None,
            to_bytes: None,
        }
    }

    pub fn digest_type(&self) -> &TokenStream {
        &self.encoders.digest_type
    }

    pub fn expand_bytes(&self, data: &Handle) -> TokenStream {
        (self.bytes)(data)
    }

    pub fn expand_stream(&self, stream: &Handle) -> TokenStream {
        (self.stream)(stream)
    }
}

/// Builder for [`HashingCapability`].
pub struct HashingBuilder {
    digest_type: TokenStream,
    bytes: Option<Template>,
    stream: Option<Template>,
    to_text: Option<Template>,
    to_bytes: Option<Template>,
}

impl HashingBuilder {
    pub fn bytes(mut self, f: impl Fn(&Handle) -> TokenStream + 'static) -> Self {
        self.bytes = Some(Box::new(f));
        self
    }

    pub fn stream(mut self, f: impl Fn(&Handle) -> TokenStream + 'static) -> Self {
        self.stream = Some(Box::new(f));
        self
    }

    pub fn to_text(mut self, f: impl Fn(&Handle) -> TokenStream + 'static) -> Self {
        self.to_text = Some(Box::new(f));
        self
    }

    pub fn to_bytes(mut self, f: impl Fn(&Handle) -> TokenStream + 'static) -> Self {
        self.to_bytes = Some(Box::new(f));
        self
    }

    pub fn build(self) -> Result<HashingCapability, CodegenError> {
        let missing = |template| CodegenError::IncompleteCapability {
            capability: "hashing",
            template,
        };
        Ok(HashingCapability {
            bytes: self.bytes.ok_or_else(|| missing("bytes"))?,
            stream: self.stream.ok_or_else(|| missing("stream"))?,
            encoders: Encoders {
                digest_type: self.digest_type,
                to_text: self.to_text.ok_or_else(|| missing("to_text"))?,
                to_bytes: self.to_bytes.ok_or_else(|| missing("to_bytes"))?,
            },
        })
    }
}

// -----------------------------------------------------------------------------
// Authentication
// -----------------------------------------------------------------------------

/// Keyed authentication templates.
///
/// Same shape as [`HashingCapability`], except `bytes` and `stream` also
/// receive `key: &[u8]`, already normalized. Both keyed templates are
/// evaluated inside a function returning `std::io::Result`, so a key the
/// algorithm rejects can be reported with `?`.
pub struct AuthenticationCapability {
    pub(crate) bytes: KeyedTemplate,
    pub(crate) stream: KeyedTemplate,
    pub(crate) encoders: Encoders,
}

impl AuthenticationCapability {
    /// Starts a capability whose native code has type `mac_type`.
    pub fn builder(mac_type: TokenStream) -> AuthenticationBuilder {
        AuthenticationBuilder {
            mac_type,
            bytes: None,
            stream: None,
            to_text: None,
            to_bytes: None,
        }
    }

    pub fn digest_type(&self) -> &TokenStream {
        &self.encoders.digest_type
    }

    pub fn expand_bytes(&self, data: &Handle, key: &Handle) -> TokenStream {
        (self.bytes)(data, key)
    }

    pub fn expand_stream(&self, stream: &Handle, key: &Handle) -> TokenStream {
        (self.stream)(stream, key)
    }
}

/// Builder for [`AuthenticationCapability`].
pub struct AuthenticationBuilder {
    mac_type: TokenStream,
    bytes: Option<KeyedTemplate>,
    stream: Option<KeyedTemplate>,
    to_text: Option<Template>,
    to_bytes: Option<Template>,
}

impl AuthenticationBuilder {
    pub fn bytes(
        mut self,
        f: impl Fn(&Handle, &Handle) -> TokenStream + 'static,
    ) -> Self {
        self.bytes = Some(Box::new(f));
        self
    }

    pub fn stream(
        mut self,
        f: impl Fn(&Handle, &Handle) -> TokenStream + 'static,
    ) -> Self {
        self.stream = Some(Box::new(f));
        self
    }

    pub fn to_text(mut self, f: impl Fn(&Handle) -> TokenStream + 'static) -> Self {
        self.to_text = Some(Box::new(f));
        self
    }

    pub fn to_bytes(mut self, f: impl Fn(&Handle) -> TokenStream + 'static) -> Self {
        self.to_bytes = Some(Box::new(f));
        self
    }

    pub fn build(self) -> Result<AuthenticationCapability, CodegenError> {
        let missing = |template| CodegenError::IncompleteCapability {
            capability: "authentication",
            template,
        };
        Ok(AuthenticationCapability {
            bytes: self.bytes.ok_or_else(|| missing("bytes"))?,
            stream: self.stream.ok_or_else(|| missing("stream"))?,
            encoders: Encoders {
                digest_type: self.mac_type,
                to_text: self.to_text.ok_or_else(|| missing("to_text"))?,
                to_bytes: self.to_bytes.ok_or_else(|| missing("to_bytes"))?,
            },
        })
    }
}

// -----------------------------------------------------------------------------
// Descriptor
// -----------------------------------------------------------------------------

/// The per-algorithm capability set handed to the generator.
///
/// Immutable once built; the capabilities it reports follow from which
/// template sets were registered.
pub struct AlgorithmDescriptor {
    display_name: String,
    hashing: Option<HashingCapability>,
    authentication: Option<AuthenticationCapability>,
}

impl AlgorithmDescriptor {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            hashing: None,
            authentication: None,
        }
    }

    pub fn with_hashing(mut self, hashing: HashingCapability) -> Self {
        self.hashing = Some(hashing);
        self
    }

    pub fn with_authentication(mut self, authentication: AuthenticationCapability) -> Self {
        self.authentication = Some(authentication);
        self
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn hashing(&self) -> Option<&HashingCapability> {
        self.hashing.as_ref()
    }

    pub fn authentication(&self) -> Option<&AuthenticationCapability> {
        self.authentication.as_ref()
    }

    pub fn supports_hashing(&self) -> bool {
        self.hashing.is_some()
    }

    pub fn supports_authentication(&self) -> bool {
        self.authentication.is_some()
    }

    /// Supported capabilities, hashing first.
    pub fn capabilities(&self) -> Vec<Capability> {
        let mut capabilities = Vec::with_capacity(2);
        if self.supports_hashing() {
            capabilities.push(Capability::Hashing);
        }
        if self.supports_authentication() {
            capabilities.push(Capability::Authentication);
        }
        capabilities
    }

    pub(crate) fn encoders(&self, capability: Capability) -> Option<&Encoders> {
        match capability {
            Capability::Hashing => self.hashing.as_ref().map(|h| &h.encoders),
            Capability::Authentication => self.authentication.as_ref().map(|a| &a.encoders),
        }
    }
}

impl fmt::Debug for AlgorithmDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmDescriptor")
            .field("display_name", &self.display_name)
            .field("hashing", &self.supports_hashing())
            .field("authentication", &self.supports_authentication())
            .finish()
    }
}
