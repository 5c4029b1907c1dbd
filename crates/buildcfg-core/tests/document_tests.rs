//! Tests for loading raw configurations from documents and files

use buildcfg_core::{
    ConfigDraft, ConfigLoader, ConfigResolver, Error, Plugin, PluginError, PluginSource, RawConfig,
    ResolveOptions,
};
use serde_json::{Value, json};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

/// A plugin that records the options it was built with as define entries.
struct Recorder {
    name: String,
    options: Value,
}

impl Plugin for Recorder {
    fn name(&self) -> &str {
        &self.name
    }

    fn transform(&self, mut config: ConfigDraft) -> Result<ConfigDraft, PluginError> {
        if let Some(table) = self.options.as_object() {
            for (key, value) in table {
                config.define.insert(key.clone(), value.to_string());
            }
        }
        Ok(config)
    }
}

/// Knows the plugins `vue` and `lxr`.
struct TestSource;

impl PluginSource for TestSource {
    fn instantiate(&self, name: &str, options: &Value) -> buildcfg_core::Result<Arc<dyn Plugin>> {
        match name {
            "vue" | "lxr" => Ok(Arc::new(Recorder {
                name: name.to_string(),
                options: options.clone(),
            })),
            other => Err(Error::UnknownPlugin(other.to_string())),
        }
    }
}

fn parse(document: Value) -> buildcfg_core::Result<RawConfig> {
    RawConfig::from_document(&document, &TestSource)
}

mod shape {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn null_document_is_empty_config() {
        assert!(parse(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn null_keys_count_as_absent() {
        let raw = parse(json!({
            "plugins": null,
            "resolve": { "alias": null, "extensions": null },
            "build": null,
            "define": null,
        }))
        .unwrap();
        assert!(raw.is_empty());
    }

    #[test]
    fn plugins_must_be_a_sequence() {
        let err = parse(json!({ "plugins": "vue" })).unwrap_err();
        match err {
            Error::InvalidShape { field, expected } => {
                assert_eq!(field, "plugins");
                assert!(expected.contains("sequence"), "expected was {}", expected);
            }
            other => panic!("expected InvalidShape, got {:?}", other),
        }
    }

    #[test]
    fn alias_values_must_be_strings() {
        let err = parse(json!({ "resolve": { "alias": { "@": 42 } } })).unwrap_err();
        assert!(matches!(err, Error::InvalidShape { ref field, .. } if field == "resolve.alias.@"));
    }

    #[test]
    fn plugin_table_requires_name() {
        let err = parse(json!({ "plugins": [{ "options": {} }] })).unwrap_err();
        assert!(matches!(err, Error::InvalidShape { ref field, .. } if field == "plugins[0].name"));
    }

    #[test]
    fn unknown_plugin_is_reported() {
        let err = parse(json!({ "plugins": ["react"] })).unwrap_err();
        assert!(matches!(err, Error::UnknownPlugin(ref name) if name == "react"));
    }

    #[test]
    fn define_rejects_nested_values() {
        let err = parse(json!({ "define": { "FLAGS": { "a": 1 } } })).unwrap_err();
        assert!(matches!(err, Error::InvalidShape { ref field, .. } if field == "define.FLAGS"));
    }
}

mod fields {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reads_plugins_in_declared_order() {
        let raw = parse(json!({ "plugins": ["vue", { "name": "lxr", "options": { "id": "r1" } }] }))
            .unwrap();
        assert_eq!(raw.plugin_names(), vec!["vue", "lxr"]);
    }

    #[test]
    fn alias_sequence_form_keeps_duplicates_for_the_resolver() {
        let raw = parse(json!({
            "resolve": { "alias": [
                { "find": "@", "replacement": "./src" },
                { "find": "@", "replacement": "./lib" }
            ] }
        }))
        .unwrap();
        assert_eq!(raw.alias().len(), 2);

        let err = ConfigResolver::new("/proj")
            .with_options(ResolveOptions::new().lazy())
            .resolve(raw)
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { ref key, .. } if key == "@"));
    }

    #[test]
    fn rollup_input_table_becomes_entry_points() {
        let raw = parse(json!({
            "build": { "rollupOptions": { "input": { "app": "./index.html" } } }
        }))
        .unwrap();
        assert_eq!(
            raw.entry_points(),
            [("app".to_string(), "./index.html".to_string())]
        );
    }

    #[test]
    fn rollup_input_paths_are_named_by_stem() {
        let raw = parse(json!({
            "build": { "rollupOptions": { "input": ["./index.html", "admin/panel.html"] } }
        }))
        .unwrap();
        let names: Vec<&str> = raw.entry_points().iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["index", "panel"]);
    }

    #[test]
    fn define_scalars_are_stringified() {
        let raw = parse(json!({ "define": { "DEBUG": false, "LEVEL": 3 } })).unwrap();
        let resolved = ConfigResolver::new("/proj")
            .with_options(ResolveOptions::new().lazy())
            .resolve(raw)
            .unwrap();
        assert_eq!(resolved.define()["DEBUG"], "false");
        assert_eq!(resolved.define()["LEVEL"], "3");
    }
}

mod loader {
    use super::*;
    use pretty_assertions::assert_eq;

    const TOML_CONFIG: &str = r#"
plugins = ["vue", "lxr"]

[resolve.alias]
"@" = "./src"

[build.rollupOptions.input]
app = "./index.html"
"#;

    fn project_with(file: &str, content: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("index.html"), "<!doctype html>").unwrap();
        fs::write(temp.path().join(file), content).unwrap();
        temp
    }

    #[test]
    fn discover_loads_toml_and_anchors_at_file_dir() {
        let temp = project_with("buildcfg.toml", TOML_CONFIG);
        let loaded = ConfigLoader::new(&TestSource).discover(temp.path()).unwrap();

        assert_eq!(loaded.path.file_name(), Some("buildcfg.toml"));
        assert_eq!(loaded.raw.plugin_names(), vec!["vue", "lxr"]);

        let resolved = ConfigResolver::new(loaded.base_dir.clone())
            .resolve(loaded.raw)
            .unwrap();
        assert_eq!(resolved.alias()["@"], loaded.base_dir.join("src"));
        assert_eq!(resolved.entry_points()["app"], loaded.base_dir.join("index.html"));
        assert_eq!(resolved.plugins(), ["vue".to_string(), "lxr".to_string()]);
    }

    #[test]
    fn loads_yaml_config() {
        let temp = project_with(
            "buildcfg.yaml",
            "plugins:\n  - vue\nbuild:\n  entryPoints:\n    app: ./index.html\n",
        );
        let loaded = ConfigLoader::new(&TestSource)
            .load(temp.path().join("buildcfg.yaml"))
            .unwrap();
        assert_eq!(loaded.raw.entry_points().len(), 1);
    }

    #[test]
    fn yaml_tilde_plugins_are_empty() {
        let temp = project_with("buildcfg.yaml", "plugins: ~\nbase: ./\n");
        let loaded = ConfigLoader::new(&TestSource)
            .load(temp.path().join("buildcfg.yaml"))
            .unwrap();
        assert!(loaded.raw.plugin_names().is_empty());
    }

    #[test]
    fn empty_yaml_config_is_empty() {
        let temp = project_with("buildcfg.yml", "");
        let loaded = ConfigLoader::new(&TestSource).discover(temp.path()).unwrap();
        assert!(loaded.raw.is_empty());
    }

    #[test]
    fn duplicate_json_keys_fail_to_load() {
        let temp = project_with(
            "buildcfg.json",
            r#"{ "resolve": { "alias": { "@": "./src", "@": "./lib" } } }"#,
        );
        let err = ConfigLoader::new(&TestSource).discover(temp.path()).unwrap_err();
        assert!(matches!(err, Error::Fs(buildcfg_fs::Error::ConfigParse { .. })));
    }

    #[test]
    fn missing_config_is_reported() {
        let temp = TempDir::new().unwrap();
        let err = ConfigLoader::new(&TestSource).discover(temp.path()).unwrap_err();
        assert!(matches!(err, Error::Fs(buildcfg_fs::Error::ConfigNotFound { .. })));
    }
}
