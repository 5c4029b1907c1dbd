//! End-to-end integration tests for the resolution pipeline
//!
//! These exercise the complete flow: config discovery -> document parsing ->
//! plugin instantiation -> resolution -> serialization.

use buildcfg_core::{
    ConfigDraft, ConfigLoader, ConfigResolver, Error, Plugin, PluginError, ResolveOptions,
};
use buildcfg_fs::{ConfigStore, NormalizedPath};
use buildcfg_plugins::{PluginRegistration, PluginRegistry};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

/// Lay out a report bundle project and write `config` under `file_name`.
fn setup_project(file_name: &str, config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    for dir in ["src", "src/components", "shared"] {
        fs::create_dir_all(temp.path().join(dir)).unwrap();
    }
    fs::write(temp.path().join("index.html"), "<div id=\"app\"></div>").unwrap();
    fs::write(temp.path().join("src/main.ts"), "").unwrap();
    fs::write(temp.path().join(file_name), config).unwrap();
    temp
}

const REPORT_TOML: &str = r#"
plugins = ["vue", { name = "lxr", options = { outDir = "build/report" } }]

[resolve]
alias = { "@" = "./src", "@components" = "./src/components" }
extensions = [".ts", ".js"]

[build.rollupOptions]
input = ["./index.html"]

[define]
__APP_VERSION__ = "1.4.0"
"#;

const REPORT_YAML: &str = r#"
plugins:
  - vue
  - name: lxr
    options:
      outDir: build/report
resolve:
  alias:
    - find: "@"
      replacement: ./src
    - find: "@components"
      replacement: ./src/components
  extensions: [.ts, .js]
build:
  rollupOptions:
    input: ./index.html
define:
  __APP_VERSION__: "1.4.0"
"#;

#[test]
fn report_bundle_resolves_end_to_end() {
    let temp = setup_project("buildcfg.toml", REPORT_TOML);
    let registry = PluginRegistry::with_builtins();

    let loaded = ConfigLoader::new(&registry).discover(temp.path()).unwrap();
    assert_eq!(loaded.raw.plugin_names(), vec!["vue", "lxr"]);

    let resolved = ConfigResolver::new(loaded.base_dir.clone())
        .resolve(loaded.raw)
        .unwrap();

    let root = NormalizedPath::canonical(temp.path()).unwrap();
    assert_eq!(resolved.root(), &root);
    assert_eq!(resolved.base(), "./");
    assert_eq!(resolved.plugins(), ["vue", "lxr"]);
    assert_eq!(resolved.alias()["@"], root.join("src"));
    assert_eq!(resolved.alias()["@components"], root.join("src/components"));
    assert_eq!(resolved.extensions(), [".ts", ".js", ".vue"]);
    assert_eq!(resolved.entry_points()["index"], root.join("index.html"));
    assert_eq!(resolved.out_dir(), Some(&root.join("build/report")));
    assert_eq!(resolved.define()["__APP_VERSION__"], "1.4.0");
    assert_eq!(resolved.define()["__VUE_OPTIONS_API__"], "true");
    assert_eq!(resolved.define()["__VUE_PROD_DEVTOOLS__"], "false");
}

#[test]
fn toml_and_yaml_forms_resolve_identically() {
    let toml_project = setup_project("buildcfg.toml", REPORT_TOML);
    let yaml_project = setup_project("buildcfg.yaml", REPORT_YAML);
    let registry = PluginRegistry::with_builtins();
    let loader = ConfigLoader::new(&registry);

    let resolve_in = |temp: &TempDir| {
        let loaded = loader.discover(temp.path()).unwrap();
        let resolved = ConfigResolver::new(loaded.base_dir.clone())
            .resolve(loaded.raw)
            .unwrap();
        // Roots differ; compare everything relative to them.
        let json = resolved
            .to_json_pretty()
            .unwrap()
            .replace(resolved.root().as_str(), "<root>");
        serde_json::from_str::<Value>(&json).unwrap()
    };

    assert_eq!(resolve_in(&toml_project), resolve_in(&yaml_project));
}

#[test]
fn resolution_is_deterministic() {
    let temp = setup_project("buildcfg.toml", REPORT_TOML);
    let registry = PluginRegistry::with_builtins();
    let loader = ConfigLoader::new(&registry);

    let fingerprint = || {
        let loaded = loader.discover(temp.path()).unwrap();
        ConfigResolver::new(loaded.base_dir.clone())
            .resolve(loaded.raw)
            .unwrap()
            .fingerprint()
            .unwrap()
    };

    let first = fingerprint();
    assert!(first.starts_with("sha256:"));
    assert_eq!(first, fingerprint());
}

#[test]
fn resolved_config_round_trips_through_store() {
    let temp = setup_project("buildcfg.toml", REPORT_TOML);
    let registry = PluginRegistry::with_builtins();
    let loaded = ConfigLoader::new(&registry).discover(temp.path()).unwrap();
    let resolved = ConfigResolver::new(loaded.base_dir.clone())
        .resolve(loaded.raw)
        .unwrap();

    let out = NormalizedPath::new(temp.path().join("resolved.json"));
    let store = ConfigStore::new();
    store.save(&out, &resolved).unwrap();

    let reloaded: Value = store.load(&out).unwrap();
    assert_eq!(reloaded["base"], "./");
    assert_eq!(
        reloaded["build"]["outDir"],
        resolved.out_dir().unwrap().as_str()
    );
}

/// Rewrites every alias target into the shared directory.
struct ShareAliases;

impl Plugin for ShareAliases {
    fn name(&self) -> &str {
        "share-aliases"
    }

    fn transform(&self, mut draft: ConfigDraft) -> Result<ConfigDraft, PluginError> {
        let shared = draft.root.join("shared");
        for target in draft.alias.values_mut() {
            *target = shared.clone();
        }
        Ok(draft)
    }
}

fn share_aliases(_: &Value) -> Result<Arc<dyn Plugin>, PluginError> {
    Ok(Arc::new(ShareAliases))
}

#[test]
fn custom_plugins_join_the_registry() {
    let temp = setup_project(
        "buildcfg.json",
        r#"{ "plugins": ["share-aliases"], "resolve": { "alias": { "@": "./src" } } }"#,
    );
    let mut registry = PluginRegistry::with_builtins();
    registry.register(PluginRegistration::new(
        "share-aliases",
        "Point every alias at ./shared",
        share_aliases,
    ));

    let loaded = ConfigLoader::new(&registry).discover(temp.path()).unwrap();
    let resolved = ConfigResolver::new(loaded.base_dir.clone())
        .resolve(loaded.raw)
        .unwrap();

    assert_eq!(resolved.alias()["@"], resolved.root().join("shared"));
}

#[test]
fn plugin_output_is_checked_eagerly() {
    let temp = setup_project(
        "buildcfg.json",
        r#"{ "plugins": ["share-aliases"], "resolve": { "alias": { "@": "./src" } } }"#,
    );
    fs::remove_dir_all(temp.path().join("shared")).unwrap();
    let mut registry = PluginRegistry::with_builtins();
    registry.register(PluginRegistration::new("share-aliases", "", share_aliases));

    let loaded = ConfigLoader::new(&registry).discover(temp.path()).unwrap();
    let err = ConfigResolver::new(loaded.base_dir.clone())
        .resolve(loaded.raw.clone())
        .unwrap_err();
    assert!(matches!(err, Error::PathResolutionFailure { .. }));
    assert_eq!(err.field(), Some("resolve.alias.@"));

    let lazy = ConfigResolver::new(loaded.base_dir)
        .with_options(ResolveOptions::new().lazy())
        .resolve(loaded.raw)
        .unwrap();
    assert!(lazy.alias()["@"].as_str().ends_with("/shared"));
}

#[test]
fn duplicate_alias_in_sequence_form_is_rejected() {
    let temp = setup_project(
        "buildcfg.yaml",
        "resolve:\n  alias:\n    - { find: \"@\", replacement: ./src }\n    - { find: \"@\", replacement: ./shared }\n",
    );
    let registry = PluginRegistry::with_builtins();
    let loaded = ConfigLoader::new(&registry).discover(temp.path()).unwrap();

    let err = ConfigResolver::new(loaded.base_dir)
        .resolve(loaded.raw)
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateKey { ref key, .. } if key == "@"));
}
