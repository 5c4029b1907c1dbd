//! Structural validation of config documents
//!
//! A document is the `serde_json::Value` tree read from a config file in
//! any supported format. This module checks the semantic type of every
//! known field and builds a [`RawConfig`], instantiating plugins through a
//! [`PluginSource`].

use super::RawConfig;
use crate::plugin::PluginSource;
use crate::{Error, Result};
use buildcfg_fs::NormalizedPath;
use serde_json::{Map, Value};

const TOP_LEVEL_KEYS: [&str; 6] = ["root", "base", "plugins", "resolve", "build", "define"];

impl RawConfig {
    /// Build a raw configuration from a parsed document.
    ///
    /// Accepted shape (all keys optional):
    ///
    /// - `root`, `base`: strings
    /// - `plugins`: sequence of names or `{ name, options }` tables
    /// - `resolve.alias`: table of strings, or sequence of
    ///   `{ find, replacement }` tables
    /// - `resolve.extensions`: sequence of strings
    /// - `build.entryPoints`: table of strings, or sequence of `{ name, path }`
    /// - `build.rollupOptions.input`: a path, a sequence of paths (named by
    ///   file stem) or a table of strings
    /// - `build.outDir`: string
    /// - `define`: table of strings, numbers or booleans
    pub fn from_document(document: &Value, plugins: &dyn PluginSource) -> Result<Self> {
        let top = match document {
            Value::Null => return Ok(Self::new()),
            Value::Object(map) => map,
            other => {
                return Err(Error::shape(
                    "<document>",
                    format!("a table, got {}", type_name(other)),
                ));
            }
        };

        for key in top.keys().filter(|k| !TOP_LEVEL_KEYS.contains(&k.as_str())) {
            tracing::warn!(key = %key, "Ignoring unknown config key");
        }

        let mut raw = Self::new();
        if let Some(root) = present(top, "root") {
            raw = raw.with_root(expect_str(root, "root")?);
        }
        if let Some(base) = present(top, "base") {
            raw = raw.with_base(expect_str(base, "base")?);
        }

        if let Some(list) = present(top, "plugins") {
            for (index, entry) in expect_array(list, "plugins")?.iter().enumerate() {
                let (name, options) = plugin_entry(entry, index)?;
                raw = raw.with_plugin(plugins.instantiate(name, options)?);
            }
        }

        if let Some(resolve) = present(top, "resolve") {
            let resolve = expect_object(resolve, "resolve")?;
            if let Some(alias) = present(resolve, "alias") {
                for (key, path) in mapping(alias, "resolve.alias", "find", "replacement")? {
                    raw = raw.with_alias(key, path);
                }
            }
            if let Some(extensions) = present(resolve, "extensions") {
                for (index, ext) in expect_array(extensions, "resolve.extensions")?
                    .iter()
                    .enumerate()
                {
                    raw = raw.with_extension(expect_str(
                        ext,
                        &format!("resolve.extensions[{index}]"),
                    )?);
                }
            }
        }

        if let Some(build) = present(top, "build") {
            let build = expect_object(build, "build")?;
            if let Some(entries) = present(build, "entryPoints") {
                for (name, path) in mapping(entries, "build.entryPoints", "name", "path")? {
                    raw = raw.with_entry_point(name, path);
                }
            }
            if let Some(rollup) = present(build, "rollupOptions") {
                let rollup = expect_object(rollup, "build.rollupOptions")?;
                if let Some(input) = present(rollup, "input") {
                    for (name, path) in rollup_input(input)? {
                        raw = raw.with_entry_point(name, path);
                    }
                }
            }
            if let Some(out_dir) = present(build, "outDir") {
                raw = raw.with_out_dir(expect_str(out_dir, "build.outDir")?);
            }
        }

        if let Some(define) = present(top, "define") {
            for (key, value) in expect_object(define, "define")? {
                let value = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    other => {
                        return Err(Error::shape(
                            format!("define.{key}"),
                            format!("a string, number or boolean, got {}", type_name(other)),
                        ));
                    }
                };
                raw = raw.with_define(key.clone(), value);
            }
        }

        Ok(raw)
    }
}

fn plugin_entry(entry: &Value, index: usize) -> Result<(&str, &Value)> {
    static NO_OPTIONS: Value = Value::Null;
    let field = format!("plugins[{index}]");
    match entry {
        Value::String(name) => Ok((name.as_str(), &NO_OPTIONS)),
        Value::Object(table) => {
            let name = table
                .get("name")
                .ok_or_else(|| Error::shape(format!("{field}.name"), "a plugin name"))?;
            let name = expect_str(name, &format!("{field}.name"))?;
            Ok((name, table.get("options").unwrap_or(&NO_OPTIONS)))
        }
        other => Err(Error::shape(
            field,
            format!("a plugin name or table, got {}", type_name(other)),
        )),
    }
}

/// Read a string mapping given either as a table or as a sequence of
/// two-key tables. Order and duplicates are preserved.
fn mapping(
    value: &Value,
    field: &str,
    key_name: &str,
    value_name: &str,
) -> Result<Vec<(String, String)>> {
    match value {
        Value::Object(table) => table
            .iter()
            .map(|(key, path)| -> Result<(String, String)> {
                let path = expect_str(path, &format!("{field}.{key}"))?;
                Ok((key.clone(), path.to_string()))
            })
            .collect(),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| -> Result<(String, String)> {
                let item_field = format!("{field}[{index}]");
                let table = expect_object(item, &item_field)?;
                let get = |name: &str| -> Result<String> {
                    let v = table.get(name).ok_or_else(|| {
                        Error::shape(format!("{item_field}.{name}"), "a string")
                    })?;
                    Ok(expect_str(v, &format!("{item_field}.{name}"))?.to_string())
                };
                Ok((get(key_name)?, get(value_name)?))
            })
            .collect(),
        other => Err(Error::shape(
            field,
            format!("a table or a sequence, got {}", type_name(other)),
        )),
    }
}

fn rollup_input(input: &Value) -> Result<Vec<(String, String)>> {
    const FIELD: &str = "build.rollupOptions.input";
    match input {
        Value::String(path) => Ok(vec![(entry_name(path, FIELD)?, path.clone())]),
        Value::Array(paths) => paths
            .iter()
            .enumerate()
            .map(|(index, path)| -> Result<(String, String)> {
                let field = format!("{FIELD}[{index}]");
                let path = expect_str(path, &field)?;
                Ok((entry_name(path, &field)?, path.to_string()))
            })
            .collect(),
        Value::Object(_) => mapping(input, FIELD, "name", "path"),
        other => Err(Error::shape(
            FIELD,
            format!("a path, a sequence or a table, got {}", type_name(other)),
        )),
    }
}

/// Entry name for an unnamed input: its file name without extension.
fn entry_name(path: &str, field: &str) -> Result<String> {
    let normalized = NormalizedPath::new(path);
    let file_name = normalized
        .file_name()
        .filter(|name| *name != "." && *name != "..")
        .ok_or_else(|| Error::shape(field, format!("a file path, got `{path}`")))?;
    let stem = match normalized.extension() {
        Some(ext) => &file_name[..file_name.len() - ext.len() - 1],
        None => file_name,
    };
    Ok(stem.to_string())
}

/// A key explicitly set to null counts as absent.
fn present<'a>(table: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    table.get(key).filter(|value| !value.is_null())
}

fn expect_str<'a>(value: &'a Value, field: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| Error::shape(field, format!("a string, got {}", type_name(value))))
}

fn expect_array<'a>(value: &'a Value, field: &str) -> Result<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| Error::shape(field, format!("a sequence, got {}", type_name(value))))
}

fn expect_object<'a>(value: &'a Value, field: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| Error::shape(field, format!("a table, got {}", type_name(value))))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a table",
    }
}
