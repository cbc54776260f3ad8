//! Builtin descriptors.
//!
//! The emitted code refers to the backing crates by absolute path, so the
//! crate that includes it must depend on `md5`, `sha1`, `sha2`, `hmac`,
//! `blake3`, and `digestforge-runtime`.

use proc_macro2::TokenStream;
use quote::quote;

use crate::{AlgorithmDescriptor, AuthenticationCapability, CodegenError, HashingCapability};

pub(crate) fn builtin() -> Result<Vec<(&'static str, AlgorithmDescriptor)>, CodegenError> {
    Ok(vec![
        ("md5", md5()?),
        ("sha1", rust_crypto("SHA-1", quote!(::sha1::Sha1))?),
        ("sha256", rust_crypto("SHA-256", quote!(::sha2::Sha256))?),
        ("sha512", rust_crypto("SHA-512", quote!(::sha2::Sha512))?),
        ("blake3", blake3()?),
    ])
}

fn hex(digest: impl quote::ToTokens) -> TokenStream {
    quote!(::digestforge_runtime::hex::encode(#digest))
}

/// Hashing only; the `md5` crate has no keyed mode.
pub fn md5() -> Result<AlgorithmDescriptor, CodegenError> {
    let hashing = HashingCapability::builder(quote!(::md5::Digest))
        .bytes(|data| quote!(::md5::compute(#data)))
        .stream(|stream| {
            quote!({
                let mut context = ::md5::Context::new();
                #stream.for_each_chunk(|chunk| context.consume(chunk))?;
                context.compute()
            })
        })
        .to_text(|digest| hex(quote!(#digest.0)))
        .to_bytes(|digest| quote!(#digest.0.to_vec()))
        .build()?;
    Ok(AlgorithmDescriptor::new("MD5").with_hashing(hashing))
}

/// Hashing plus HMAC for any RustCrypto `Digest` implementation.
pub fn rust_crypto(
    display: &str,
    hasher: TokenStream,
) -> Result<AlgorithmDescriptor, CodegenError> {
    let h = hasher.clone();
    let s = hasher.clone();
    let hashing = HashingCapability::builder(quote!(::hmac::digest::Output<#hasher>))
        .bytes(move |data| quote!(<#h as ::hmac::digest::Digest>::digest(#data)))
        .stream(move |stream| {
            quote!({
                let mut hasher = <#s as ::hmac::digest::Digest>::new();
                #stream.for_each_chunk(|chunk| ::hmac::digest::Digest::update(&mut hasher, chunk))?;
                ::hmac::digest::Digest::finalize(hasher)
            })
        })
        .to_text(|digest| hex(quote!(&#digest)))
        .to_bytes(|digest| quote!(#digest.to_vec()))
        .build()?;

    let mac = quote!(::hmac::Hmac<#hasher>);
    let b = mac.clone();
    let s = mac.clone();
    let authentication = AuthenticationCapability::builder(quote!(::hmac::digest::Output<#mac>))
        .bytes(move |data, key| {
            let init = init_mac(&b, key);
            quote!({
                let mut mac = #init;
                ::hmac::Mac::update(&mut mac, #data);
                ::hmac::Mac::finalize(mac).into_bytes()
            })
        })
        .stream(move |stream, key| {
            let init = init_mac(&s, key);
            quote!({
                let mut mac = #init;
                #stream.for_each_chunk(|chunk| ::hmac::Mac::update(&mut mac, chunk))?;
                ::hmac::Mac::finalize(mac).into_bytes()
            })
        })
        .to_text(|mac| hex(quote!(&#mac)))
        .to_bytes(|mac| quote!(#mac.to_vec()))
        .build()?;

    Ok(AlgorithmDescriptor::new(display)
        .with_hashing(hashing)
        .with_authentication(authentication))
}

fn init_mac(mac: &TokenStream, key: &crate::Handle) -> TokenStream {
    quote! {
        <#mac as ::hmac::Mac>::new_from_slice(#key).map_err(|err| {
            ::std::io::Error::new(::std::io::ErrorKind::InvalidInput, err.to_string())
        })?
    }
}

/// Hashing only; BLAKE3's keyed mode needs exactly 32 key bytes, which
/// does not fit a key of arbitrary length.
pub fn blake3() -> Result<AlgorithmDescriptor, CodegenError> {
    let hashing = HashingCapability::builder(quote!(::blake3::Hash))
        .bytes(|data| quote!(::blake3::hash(#data)))
        .stream(|stream| {
            quote!({
                let mut hasher = ::blake3::Hasher::new();
                #stream.for_each_chunk(|chunk| {
                    hasher.update(chunk);
                })?;
                hasher.finalize()
            })
        })
        .to_text(|digest| quote!(#digest.to_hex().to_string()))
        .to_bytes(|digest| quote!(#digest.as_bytes().to_vec()))
        .build()?;
    Ok(AlgorithmDescriptor::new("BLAKE3").with_hashing(hashing))
}
