//! Built-in plugins resolved through the registry

use buildcfg_core::{ConfigResolver, Error, PluginSource, RawConfig, ResolveOptions};
use buildcfg_plugins::{BUILTIN_COUNT, PluginRegistry};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn lazy() -> ConfigResolver {
    ConfigResolver::new("/proj").with_options(ResolveOptions::new().lazy())
}

#[test]
fn builtins_are_listed_sorted() {
    let registry = PluginRegistry::with_builtins();
    assert_eq!(registry.len(), BUILTIN_COUNT);
    assert_eq!(registry.list(), vec!["define", "lxr", "vue"]);
}

#[rstest]
#[case("vue")]
#[case("lxr")]
#[case("define")]
fn builtin_instantiates_with_its_name(#[case] name: &str) {
    let plugin = PluginRegistry::with_builtins()
        .instantiate(name, &Value::Null)
        .ok()
        .unwrap();
    assert_eq!(plugin.name(), name);
}

#[test]
fn invalid_options_name_the_plugin() {
    let err = PluginRegistry::with_builtins()
        .instantiate("vue", &json!({ "optionsApi": 1 }))
        .err()
        .unwrap();
    match err {
        Error::PluginOptions { plugin, source } => {
            assert_eq!(plugin, "vue");
            assert!(source.to_string().contains("optionsApi"));
        }
        other => panic!("expected PluginOptions, got {:?}", other),
    }
}

#[test]
fn vue_then_lxr_matches_reference_setup() {
    let registry = PluginRegistry::with_builtins();
    let raw = RawConfig::from_document(
        &json!({
            "plugins": ["vue", "lxr"],
            "resolve": { "alias": { "@": "./src" } },
            "build": { "rollupOptions": { "input": { "app": "./index.html" } } }
        }),
        &registry,
    )
    .unwrap();

    let resolved = lazy().resolve(raw).unwrap();

    assert_eq!(resolved.plugins(), ["vue".to_string(), "lxr".to_string()]);
    assert_eq!(resolved.alias()["@"].as_str(), "/proj/src");
    assert_eq!(resolved.entry_points()["app"].as_str(), "/proj/index.html");
    assert_eq!(resolved.extensions(), [".vue".to_string()]);
    assert_eq!(resolved.define()["__VUE_OPTIONS_API__"], "true");
    assert_eq!(resolved.define()["__VUE_PROD_DEVTOOLS__"], "false");
    assert_eq!(resolved.base(), "./");
    assert_eq!(resolved.out_dir().unwrap().as_str(), "/proj/dist");
}

#[test]
fn vue_keeps_user_defined_flags() {
    let registry = PluginRegistry::with_builtins();
    let raw = RawConfig::from_document(
        &json!({ "plugins": ["vue"], "define": { "__VUE_OPTIONS_API__": false } }),
        &registry,
    )
    .unwrap();
    let resolved = lazy().resolve(raw).unwrap();
    assert_eq!(resolved.define()["__VUE_OPTIONS_API__"], "false");
}

#[test]
fn define_plugin_order_decides_value() {
    let registry = PluginRegistry::with_builtins();
    let raw = RawConfig::from_document(
        &json!({
            "plugins": [{ "name": "define", "options": { "MODE": "plugin" } }],
            "define": { "MODE": "user" }
        }),
        &registry,
    )
    .unwrap();
    let resolved = lazy().resolve(raw).unwrap();
    assert_eq!(resolved.define()["MODE"], "plugin");
}

#[test]
fn lxr_without_entry_points_fails_transform() {
    let registry = PluginRegistry::with_builtins();
    let raw = RawConfig::from_document(&json!({ "plugins": ["lxr"] }), &registry).unwrap();
    let err = lazy().resolve(raw).unwrap_err();
    assert!(matches!(err, Error::PluginTransformFailure { ref plugin, .. } if plugin == "lxr"));
}
