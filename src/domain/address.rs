//! Email address splitting.
//!
//! Both functions here are total: any input string yields a result, and
//! malformed addresses degrade to a best-effort split instead of an error.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a recipient signature of the form `"Display Name" <address>`.
static SIGNATURE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*".*"\s*<([^<>]*)>\s*$"#).expect("valid signature regex"));

/// The two halves of an address, `local_part@domain`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressParts<'a> {
    /// Everything before the last `@`.
    pub local_part: &'a str,
    /// Everything after the last `@`; empty if there is no `@`.
    pub domain: &'a str,
}

/// Splits an address on its last `@`.
///
/// Earlier `@` characters stay in the local part, so `a@b@c.com` splits into
/// `a@b` and `c.com`. Input without any `@` is taken whole as the local part.
pub fn parse_address(address: &str) -> AddressParts<'_> {
    match address.rsplit_once('@') {
        Some((local_part, domain)) => AddressParts { local_part, domain },
        None => AddressParts {
            local_part: address,
            domain: "",
        },
    }
}

/// Returns the bare address out of a `"Display Name" <address>` signature.
///
/// Anything that does not have that exact shape is assumed to already be a
/// bare address and comes back unchanged.
pub fn extract_address(signature: &str) -> &str {
    SIGNATURE_RE
        .captures(signature)
        .and_then(|caps| caps.get(1))
        .map_or(signature, |m| m.as_str())
}
