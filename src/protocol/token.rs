//! Token grammar for `MESOS_EXECUTOR_URIS`.
//!
//! ```text
//! URIS    := "" | TOKEN (' ' TOKEN)*
//! TOKEN   := VALUE '+' EXEC EXTRACT
//! VALUE   := non-whitespace+        (may itself contain '+')
//! EXEC    := '0' | '1'
//! EXTRACT := 'N' | 'X'
//! ```

use super::descriptor::ResourceDescriptor;
use crate::error::{FetcherError, Result};
use regex::Regex;
use std::sync::LazyLock;

static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<value>\S+)\+(?P<exec>[01])(?P<extract>[NX])$")
        .expect("token pattern is valid")
});

/// Encode descriptors as space-separated tokens, preserving order.
///
/// Values that are empty or contain whitespace cannot be represented and are
/// rejected.
pub fn encode_tokens(descriptors: &[ResourceDescriptor]) -> Result<String> {
    let tokens = descriptors
        .iter()
        .map(encode_token)
        .collect::<Result<Vec<_>>>()?;
    Ok(tokens.join(" "))
}

fn encode_token(descriptor: &ResourceDescriptor) -> Result<String> {
    if descriptor.value.is_empty() {
        return Err(FetcherError::Configuration(
            "resource descriptor has an empty value".to_string(),
        ));
    }
    if descriptor.value.chars().any(char::is_whitespace) {
        return Err(FetcherError::Configuration(format!(
            "resource descriptor '{}' contains whitespace and cannot be encoded",
            descriptor.value
        )));
    }

    let exec_bit = if descriptor.executable { '1' } else { '0' };
    let extract_letter = if descriptor.should_extract() { 'X' } else { 'N' };
    Ok(format!("{}+{}{}", descriptor.value, exec_bit, extract_letter))
}

/// Decode a `MESOS_EXECUTOR_URIS` value into descriptors.
///
/// An empty string yields no descriptors. Any malformed token (including the
/// empty token produced by doubled spaces) fails the whole value.
pub fn decode_tokens(uris: &str) -> Result<Vec<ResourceDescriptor>> {
    if uris.is_empty() {
        return Ok(Vec::new());
    }
    uris.split(' ').map(decode_token).collect()
}

fn decode_token(token: &str) -> Result<ResourceDescriptor> {
    let captures = TOKEN_PATTERN.captures(token).ok_or_else(|| {
        FetcherError::Configuration(format!(
            "malformed resource token '{}': expected '<uri>+<0|1><N|X>'",
            token
        ))
    })?;

    Ok(ResourceDescriptor {
        value: captures["value"].to_string(),
        executable: &captures["exec"] == "1",
        extract: Some(&captures["extract"] == "X"),
    })
}
