//! Hex rendering of digests.
//!
//! Digests are rendered lowercase with a `0x` prefix. Parsing accepts the
//! prefix as optional.

use anyhow::{Context, Result};

use crate::merkle::Element;

/// Renders bytes as `0x`-prefixed lowercase hex.
pub fn to_hex<B: AsRef<[u8]>>(data: B) -> String {
    format!("0x{}", hex::encode(data))
}

/// Parses hex text, with or without `0x`, into an element.
pub fn from_hex<T: Element>(text: &str) -> Result<T> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    let bytes = hex::decode(digits).with_context(|| format!("invalid hex digest {:?}", text))?;
    T::from_slice(&bytes)
}
