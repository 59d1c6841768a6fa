//! Command-line parameter binding
//!
//! `--param Name=value` bindings arrive as raw text; the operation's
//! parameter specs decide how each value is coerced.

use anyhow::{anyhow, bail, Context, Result};
use catalogctl_common::{ParamKind, ParamValue};

/// Split one `Name=value` binding.
pub fn parse_binding(raw: &str) -> Result<(&str, &str)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("invalid parameter binding '{raw}', expected Name=value"))?;
    if name.is_empty() {
        bail!("invalid parameter binding '{raw}', parameter name is empty");
    }
    Ok((name, value))
}

/// Coerce raw text against a declared parameter kind.
///
/// Lists are comma-separated; key/value lists use `key=value` entries,
/// e.g. `--param Tag=Env=prod,Team=platform`.
pub fn coerce(name: &str, kind: ParamKind, raw: &str) -> Result<ParamValue> {
    match kind {
        ParamKind::String => Ok(ParamValue::Str(raw.to_string())),
        ParamKind::Boolean => match raw.to_ascii_lowercase().as_str() {
            "true" => Ok(ParamValue::Bool(true)),
            "false" => Ok(ParamValue::Bool(false)),
            _ => bail!("parameter '{name}' expects true or false, got '{raw}'"),
        },
        ParamKind::Integer => raw
            .parse::<i64>()
            .map(ParamValue::Int)
            .with_context(|| format!("parameter '{name}' expects an integer, got '{raw}'")),
        ParamKind::StringList => Ok(ParamValue::StrList(
            raw.split(',')
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
        )),
        ParamKind::KeyValueList => {
            let mut pairs = Vec::new();
            for entry in raw.split(',').filter(|entry| !entry.trim().is_empty()) {
                let (key, value) = entry.split_once('=').ok_or_else(|| {
                    anyhow!("parameter '{name}' expects key=value entries, got '{entry}'")
                })?;
                pairs.push((key.trim().to_string(), value.trim().to_string()));
            }
            Ok(ParamValue::KeyValues(pairs))
        }
    }
}
