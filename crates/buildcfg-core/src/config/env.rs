//! `${NAME}` expansion in path strings

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static ENV_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env reference pattern is valid")
});

/// Replace every `${NAME}` in `input` with its value from `env`, verbatim.
///
/// Returns the name of the first undefined variable as the error.
pub(crate) fn expand(input: &str, env: &BTreeMap<String, String>) -> Result<String, String> {
    let mut missing: Option<String> = None;
    let expanded = ENV_REF.replace_all(input, |caps: &regex::Captures<'_>| {
        let name = &caps[1];
        match env.get(name) {
            Some(value) => value.clone(),
            None => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(name) => Err(name),
        None => Ok(expanded.into_owned()),
    }
}
