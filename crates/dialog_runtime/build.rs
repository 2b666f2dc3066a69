use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const SCHEMA_VERSION: u32 = 1;
const REQUIRED_THEME_CLASSES: [&str; 9] = [
    "root",
    "main",
    "title",
    "close",
    "closeIcon",
    "content",
    "underlayVisible",
    "enter",
    "exit",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LocaleManifest {
    schema_version: u32,
    locale: String,
    bundles: BTreeMap<String, BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ThemeManifest {
    schema_version: u32,
    name: String,
    classes: BTreeMap<String, String>,
}

fn toml_paths(dir: &Path) -> Vec<PathBuf> {
    println!("cargo:rerun-if-changed={}", dir.display());
    let entries = fs::read_dir(dir)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", dir.display()));
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();
    paths
}

fn read_manifest<T: for<'de> Deserialize<'de>>(path: &Path) -> T {
    println!("cargo:rerun-if-changed={}", path.display());
    let raw = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    toml::from_str(&raw).unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()))
}

fn check_schema(path: &Path, found: u32) {
    if found != SCHEMA_VERSION {
        panic!(
            "catalog schema mismatch in {}: expected {SCHEMA_VERSION} found {found}",
            path.display()
        );
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));

    let mut locales = Vec::<LocaleManifest>::new();
    for path in toml_paths(&crate_root.join("locales")) {
        let manifest: LocaleManifest = read_manifest(&path);
        check_schema(&path, manifest.schema_version);
        let has_close = manifest
            .bundles
            .get("common")
            .is_some_and(|bundle| bundle.contains_key("close"));
        if !has_close {
            panic!("locale {} lacks `common.close`", path.display());
        }
        locales.push(manifest);
    }
    if !locales.iter().any(|manifest| manifest.locale == "en") {
        panic!("locale catalog must include the `en` fallback locale");
    }

    let mut themes = Vec::<ThemeManifest>::new();
    for path in toml_paths(&crate_root.join("themes")) {
        let manifest: ThemeManifest = read_manifest(&path);
        check_schema(&path, manifest.schema_version);
        for class in REQUIRED_THEME_CLASSES {
            if !manifest.classes.contains_key(class) {
                panic!("theme {} lacks class `{class}`", path.display());
            }
        }
        themes.push(manifest);
    }

    locales.sort_by(|a, b| a.locale.cmp(&b.locale));
    themes.sort_by(|a, b| a.name.cmp(&b.name));
    let locales_json = serde_json::to_string_pretty(&locales).expect("serialize locale catalog");
    let themes_json = serde_json::to_string_pretty(&themes).expect("serialize theme catalog");
    let generated = format!(
        "/// Build-time generated locale catalog JSON.\n\
pub const LOCALE_CATALOG_JSON: &str = r##\"{locales_json}\"##;\n\
/// Build-time generated theme catalog JSON.\n\
pub const THEME_CATALOG_JSON: &str = r##\"{themes_json}\"##;\n"
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
