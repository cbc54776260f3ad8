//! Public function family synthesis.
//!
//! The second generation stage wraps a private [`OperationSet`] in the
//! caller-visible surface. Every supported capability contributes six
//! members, one per combination of source (direct, file) and encoding
//! (text, bytes, native):
//!
//! | Canonical name | Rust identifier | Input | Output |
//! |---|---|---|---|
//! | `x` | `x` | bytes or text | hex `String` |
//! | `x-bytes` | `x_bytes` | bytes or text | `Vec<u8>` |
//! | `x-file` | `x_file` | path | hex `String` |
//! | `x-file-bytes` | `x_file_bytes` | path | `Vec<u8>` |
//! | `x*` | `x_raw` | bytes or text | native digest |
//! | `x-file*` | `x_file_raw` | path | native digest |
//!
//! Authentication members insert `-hmac` after the base name and take an
//! extra key argument convertible into a `ByteSource`.

use std::fmt;

use proc_macro2::{Ident, TokenStream};
use quote::{ToTokens, format_ident, quote};

use crate::descriptor::Encoders;
use crate::{Capability, Handle, Hygiene, InputKind, OperationSet};

/// Where the subject of a member comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    Direct,
    File,
}

/// How a member returns the digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Encoding {
    Text,
    Bytes,
    Native,
}

impl Encoding {
    pub const ALL: [Self; 3] = [Self::Text, Self::Bytes, Self::Native];
}

/// Options that shape emitted members without changing their semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyOptions {
    /// Attach doc comments to public members.
    pub docs: bool,
}

impl Default for FamilyOptions {
    fn default() -> Self {
        Self { docs: true }
    }
}

/// One public operation of a family.
#[derive(Debug, Clone)]
pub struct FamilyMember {
    pub capability: Capability,
    pub source: Source,
    pub encoding: Encoding,
    name: String,
    ident: Ident,
    item: TokenStream,
}

impl FamilyMember {
    /// Canonical name, e.g. `sha256-hmac-file*`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rust identifier, e.g. `sha256_hmac_file_raw`.
    pub fn ident(&self) -> &Ident {
        &self.ident
    }
}

impl ToTokens for FamilyMember {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.item.to_tokens(tokens);
    }
}

/// A complete family: the private set plus its public members.
#[derive(Debug)]
pub struct FunctionFamily<'d> {
    operations: OperationSet<'d>,
    members: Vec<FamilyMember>,
}

impl<'d> FunctionFamily<'d> {
    pub fn base(&self) -> &Ident {
        self.operations.base()
    }

    pub fn operations(&self) -> &OperationSet<'d> {
        &self.operations
    }

    pub fn members(&self) -> &[FamilyMember] {
        &self.members
    }

    /// Canonical member names in emission order.
    pub fn member_names(&self) -> Vec<&str> {
        self.members.iter().map(FamilyMember::name).collect()
    }

    pub fn member(&self, name: &str) -> Option<&FamilyMember> {
        self.members.iter().find(|m| m.name == name)
    }
}

impl ToTokens for FunctionFamily<'_> {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.operations.to_tokens(tokens);
        for member in &self.members {
            member.to_tokens(tokens);
        }
    }
}

/// Canonical name for one member of the family rooted at `base`.
pub fn canonical_name(
    base: &str,
    capability: Capability,
    source: Source,
    encoding: Encoding,
) -> String {
    let mut name = base.to_string();
    if capability == Capability::Authentication {
        name.push_str("-hmac");
    }
    if source == Source::File {
        name.push_str("-file");
    }
    match encoding {
        Encoding::Text => {}
        Encoding::Bytes => name.push_str("-bytes"),
        Encoding::Native => name.push('*'),
    }
    name
}

/// Rust identifier for a canonical name: `-` becomes `_`, `*` becomes `_raw`.
pub fn rust_ident(canonical: &str) -> Ident {
    let ident = canonical.replace('-', "_").replace('*', "_raw");
    format_ident!("{}", ident)
}

/// Builds the public family for `operations`.
///
/// The member set is exactly six per capability present in the set; the
/// set itself guarantees at least one capability.
pub fn synthesize_family<'d>(
    operations: OperationSet<'d>,
    hygiene: &mut Hygiene,
    options: FamilyOptions,
) -> FunctionFamily<'d> {
    let base = operations.base().to_string();
    let descriptor = operations.descriptor();
    let mut members = Vec::with_capacity(12);

    for capability in descriptor.capabilities() {
        let Some(encoders) = descriptor.encoders(capability) else {
            continue;
        };
        for source in [Source::Direct, Source::File] {
            for encoding in Encoding::ALL {
                let name = canonical_name(&base, capability, source, encoding);
                let ident = rust_ident(&name);
                let ctx = MemberContext {
                    operations: &operations,
                    encoders,
                    capability,
                    encoding,
                    ident: &ident,
                    doc: options
                        .docs
                        .then(|| doc_for(descriptor.display_name(), capability, source, encoding)),
                };
                let item = match (capability, source) {
                    (Capability::Hashing, Source::Direct) => direct_hash(&ctx, hygiene),
                    (Capability::Hashing, Source::File) => file_hash(&ctx, hygiene),
                    (Capability::Authentication, Source::Direct) => direct_hmac(&ctx, hygiene),
                    (Capability::Authentication, Source::File) => file_hmac(&ctx, hygiene),
                };
                members.push(FamilyMember {
                    capability,
                    source,
                    encoding,
                    name,
                    ident,
                    item,
                });
            }
        }
    }

    tracing::debug!(
        algorithm = descriptor.display_name(),
        base = %base,
        members = members.len(),
        "synthesized function family"
    );

    FunctionFamily {
        operations,
        members,
    }
}

struct MemberContext<'a, 'd> {
    operations: &'a OperationSet<'d>,
    encoders: &'a Encoders,
    capability: Capability,
    encoding: Encoding,
    ident: &'a Ident,
    doc: Option<String>,
}

impl MemberContext<'_, '_> {
    fn output_type(&self) -> TokenStream {
        match self.encoding {
            Encoding::Text => quote!(::std::string::String),
            Encoding::Bytes => quote!(::std::vec::Vec<u8>),
            Encoding::Native => self.encoders.digest_type.clone(),
        }
    }

    fn encode(&self, digest: &Handle) -> TokenStream {
        match self.encoding {
            Encoding::Text => (self.encoders.to_text)(digest),
            Encoding::Bytes => (self.encoders.to_bytes)(digest),
            Encoding::Native => quote!(#digest),
        }
    }

    fn op(&self, kind: InputKind) -> TokenStream {
        self.operations.path(self.capability, kind)
    }

    /// `absent().map(|d| encode(d))` with its own fresh binding.
    fn absent(&self, hygiene: &mut Hygiene) -> TokenStream {
        let absent = self.op(InputKind::Absent);
        let digest = hygiene.fresh("digest");
        let encoded = self.encode(&digest);
        quote!(#absent().map(|#digest| #encoded))
    }

    fn doc_attr(&self) -> TokenStream {
        match &self.doc {
            Some(doc) => quote!(#[doc = #doc]),
            None => TokenStream::new(),
        }
    }
}

fn doc_for(display: &str, capability: Capability, source: Source, encoding: Encoding) -> String {
    let what = match capability {
        Capability::Hashing => format!("{display} digest"),
        Capability::Authentication => format!("HMAC-{display} code"),
    };
    let of = match source {
        Source::Direct => "of a byte sequence or text",
        Source::File => "of a file's contents",
    };
    let how = match encoding {
        Encoding::Text => ", hex encoded",
        Encoding::Bytes => ", as bytes",
        Encoding::Native => ", unencoded",
    };
    let absent = match source {
        Source::Direct => "A `None` input yields `None`.",
        Source::File => "A `None` path yields `None` without touching the filesystem.",
    };
    format!(" {what} {of}{how}.\n\n {absent}")
}

fn direct_hash(ctx: &MemberContext<'_, '_>, hygiene: &mut Hygiene) -> TokenStream {
    let ident = ctx.ident;
    let doc = ctx.doc_attr();
    let out = ctx.output_type();
    let input = hygiene.fresh("input");
    let present = hygiene.fresh("present");
    let bytes = hygiene.fresh("bytes");
    let text = hygiene.fresh("text");
    let digest = hygiene.fresh("digest");
    let encoded = ctx.encode(&digest);
    let hash_bytes = ctx.op(InputKind::Bytes);
    let hash_text = ctx.op(InputKind::Text);
    let absent = ctx.absent(hygiene);

    quote! {
        #doc
        pub fn #ident<I: ::digestforge_runtime::DigestInput>(
            #input: I,
        ) -> <I as ::digestforge_runtime::DigestInput>::Output<#out> {
            ::digestforge_runtime::DigestInput::dispatch(
                #input,
                |#present| {
                    let #digest = match #present {
                        ::digestforge_runtime::Input::Bytes(#bytes) => #hash_bytes(#bytes),
                        ::digestforge_runtime::Input::Text(#text) => #hash_text(#text),
                    };
                    #encoded
                },
                || #absent,
            )
        }
    }
}

fn file_hash(ctx: &MemberContext<'_, '_>, hygiene: &mut Hygiene) -> TokenStream {
    let ident = ctx.ident;
    let doc = ctx.doc_attr();
    let out = ctx.output_type();
    let path = hygiene.fresh("path");
    let settings = hygiene.fresh("settings");
    let present = hygiene.fresh("present");
    let digest = hygiene.fresh("digest");
    let encoded = ctx.encode(&digest);
    let hash_file = ctx.op(InputKind::File);
    let absent = ctx.absent(hygiene);

    quote! {
        #doc
        pub fn #ident<P: ::digestforge_runtime::FileInput>(
            #path: P,
        ) -> ::std::io::Result<<P as ::digestforge_runtime::FileInput>::Output<#out>> {
            let #settings = ::digestforge_runtime::ReadSettings::current();
            ::digestforge_runtime::FileInput::dispatch_path(
                #path,
                |#present| -> ::std::io::Result<#out> {
                    let #digest = #hash_file(#present, &#settings)?;
                    ::std::io::Result::Ok(#encoded)
                },
                || #absent,
            )
        }
    }
}

fn direct_hmac(ctx: &MemberContext<'_, '_>, hygiene: &mut Hygiene) -> TokenStream {
    let ident = ctx.ident;
    let doc = ctx.doc_attr();
    let out = ctx.output_type();
    let input = hygiene.fresh("input");
    let key = hygiene.fresh("key");
    let settings = hygiene.fresh("settings");
    let present = hygiene.fresh("present");
    let bytes = hygiene.fresh("bytes");
    let text = hygiene.fresh("text");
    let mac = hygiene.fresh("mac");
    let encoded = ctx.encode(&mac);
    let hmac_bytes = ctx.op(InputKind::Bytes);
    let hmac_text = ctx.op(InputKind::Text);
    let absent = ctx.absent(hygiene);

    quote! {
        #doc
        pub fn #ident<'k, I, K>(
            #input: I,
            #key: K,
        ) -> ::std::io::Result<<I as ::digestforge_runtime::DigestInput>::Output<#out>>
        where
            I: ::digestforge_runtime::DigestInput,
            K: ::std::convert::Into<::digestforge_runtime::ByteSource<'k>>,
        {
            let #settings = ::digestforge_runtime::ReadSettings::current();
            let #key = ::std::convert::Into::<::digestforge_runtime::ByteSource<'k>>::into(#key);
            ::digestforge_runtime::DigestInput::try_dispatch(
                #input,
                |#present| -> ::std::io::Result<#out> {
                    let #mac = match #present {
                        ::digestforge_runtime::Input::Bytes(#bytes) => {
                            #hmac_bytes(#bytes, #key, &#settings)?
                        }
                        ::digestforge_runtime::Input::Text(#text) => {
                            #hmac_text(#text, #key, &#settings)?
                        }
                    };
                    ::std::io::Result::Ok(#encoded)
                },
                || #absent,
            )
        }
    }
}

fn file_hmac(ctx: &MemberContext<'_, '_>, hygiene: &mut Hygiene) -> TokenStream {
    let ident = ctx.ident;
    let doc = ctx.doc_attr();
    let out = ctx.output_type();
    let path = hygiene.fresh("path");
    let key = hygiene.fresh("key");
    let settings = hygiene.fresh("settings");
    let present = hygiene.fresh("present");
    let mac = hygiene.fresh("mac");
    let encoded = ctx.encode(&mac);
    let hmac_file = ctx.op(InputKind::File);
    let absent = ctx.absent(hygiene);

    quote! {
        #doc
        pub fn #ident<'k, P, K>(
            #path: P,
            #key: K,
        ) -> ::std::io::Result<<P as ::digestforge_runtime::FileInput>::Output<#out>>
        where
            P: ::digestforge_runtime::FileInput,
            K: ::std::convert::Into<::digestforge_runtime::ByteSource<'k>>,
        {
            let #settings = ::digestforge_runtime::ReadSettings::current();
            let #key = ::std::convert::Into::<::digestforge_runtime::ByteSource<'k>>::into(#key);
            ::digestforge_runtime::FileInput::dispatch_path(
                #path,
                |#present| -> ::std::io::Result<#out> {
                    let #mac = #hmac_file(#present, #key, &#settings)?;
                    ::std::io::Result::Ok(#encoded)
                },
                || #absent,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(Capability::Hashing, Source::Direct, Encoding::Text => "md5"; "plain")]
    #[test_case(Capability::Hashing, Source::Direct, Encoding::Bytes => "md5-bytes"; "bytes")]
    #[test_case(Capability::Hashing, Source::File, Encoding::Text => "md5-file"; "file")]
    #[test_case(Capability::Hashing, Source::File, Encoding::Bytes => "md5-file-bytes"; "file bytes")]
    #[test_case(Capability::Hashing, Source::Direct, Encoding::Native => "md5*"; "native")]
    #[test_case(Capability::Hashing, Source::File, Encoding::Native => "md5-file*"; "file native")]
    #[test_case(Capability::Authentication, Source::Direct, Encoding::Text => "md5-hmac"; "hmac")]
    #[test_case(Capability::Authentication, Source::File, Encoding::Bytes => "md5-hmac-file-bytes"; "hmac file bytes")]
    #[test_case(Capability::Authentication, Source::File, Encoding::Native => "md5-hmac-file*"; "hmac file native")]
    fn canonical_names(capability: Capability, source: Source, encoding: Encoding) -> String {
        canonical_name("md5", capability, source, encoding)
    }

    #[test_case("md5" => "md5")]
    #[test_case("md5-file-bytes" => "md5_file_bytes")]
    #[test_case("md5*" => "md5_raw")]
    #[test_case("sha256-hmac-file*" => "sha256_hmac_file_raw")]
    fn rust_idents(canonical: &str) -> String {
        rust_ident(canonical).to_string()
    }

    #[test]
    fn docs_describe_absent_policy() {
        let doc = doc_for("SHA-1", Capability::Authentication, Source::File, Encoding::Bytes);
        assert_eq!(
            doc,
            " HMAC-SHA-1 code of a file's contents, as bytes.\n\n A `None` path yields `None` without touching the filesystem."
        );
    }
}
