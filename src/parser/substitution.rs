//! `${NAME}` substitution.
//!
//! After tokenization, every token is scanned for `${name}` references.
//! Constants win over environment variables; environment variables are
//! consulted only outside restricted mode; unknown names are left intact.

use std::borrow::Cow;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Za-z0-9._-]+)\}").unwrap());

/// Expand all `${name}` references in `tokens` in place.
pub(crate) fn expand(
    tokens: &mut [String],
    constants: &IndexMap<String, String>,
    restricted: bool,
) {
    for token in tokens.iter_mut() {
        if !token.contains("${") {
            continue;
        }
        let replaced = REFERENCE.replace_all(token, |caps: &Captures| {
            let name = &caps[1];
            if let Some(value) = constants.get(name) {
                value.clone()
            } else if !restricted {
                std::env::var(name).unwrap_or_else(|_| caps[0].to_string())
            } else {
                caps[0].to_string()
            }
        });
        if let Cow::Owned(expanded) = replaced {
            *token = expanded;
        }
    }
}
