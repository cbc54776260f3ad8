//! Fresh identifiers for generated bindings.
//!
//! Templates are spliced into larger expressions, so every binding a
//! template can see must be unique. [`Hygiene`] hands out names built from a
//! reserved prefix, a sanitized hint, and a counter that only increases
//! during one generation pass. Base names that start with the reserved
//! prefix are rejected by the synthesizers, so no caller identifier can
//! collide with an allocated one.

use std::fmt;

use proc_macro2::{Ident, Span, TokenStream};
use quote::{ToTokens, format_ident};

/// Prefix reserved for generated bindings.
pub const RESERVED_PREFIX: &str = "__df_";

/// Allocator for generation-time identifiers.
#[derive(Debug, Default)]
pub struct Hygiene {
    next: u64,
}

impl Hygiene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an identifier distinct from every other one this allocator
    /// has produced.
    pub fn fresh(&mut self, hint: &str) -> Handle {
        let n = self.next;
        self.next += 1;
        let hint = sanitize(hint);
        Handle(format_ident!(
            "{}{}_{}",
            RESERVED_PREFIX,
            hint,
            n,
            span = Span::call_site()
        ))
    }

    /// Number of identifiers handed out so far.
    pub fn allocated(&self) -> u64 {
        self.next
    }
}

fn sanitize(hint: &str) -> String {
    let cleaned: String = hint
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "v".to_string()
    } else {
        cleaned
    }
}

/// A symbolic handle for a value that only exists once generated code runs.
///
/// Templates receive handles and splice them with `#handle` inside `quote!`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Handle(Ident);

impl Handle {
    pub fn ident(&self) -> &Ident {
        &self.0
    }
}

impl ToTokens for Handle {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.0.to_tokens(tokens);
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
