//! Load configuration sources from declarative manifest files.
//!
//! Each top-level table in a manifest is a configuration source. A source
//! may list `imports` (other source names) and declare components whose
//! key/value tables become the descriptor's config map:
//!
//! ```toml
//! [animals]
//! imports = ["roles"]
//!
//! [animals.components.dog]
//! sound = "woof"
//!
//! [roles.components.role]
//! ```
//!
//! Manifest-declared components are value components: their factory
//! produces the config map itself.

use anyhow::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::types::{Catalog, ComponentDescriptor, ConfigSource};

/// One source table in a manifest file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SourceManifest {
    #[serde(default)]
    imports: Vec<String>,
    #[serde(default)]
    components: toml::Table,
}

/// Load configuration sources from manifest files into a catalog.
///
/// Returns the catalog and the source names in declaration order
/// (first file first), so callers can default the root sensibly.
pub fn load_manifests(manifest_files: &[PathBuf]) -> Result<(Catalog, Vec<String>)> {
    let mut catalog = Catalog::new();
    let mut source_order = Vec::new();

    for path in manifest_files {
        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => {}
            Some(_) => return Err(anyhow::anyhow!("Unsupported file type: {}", path.display())),
            None => {
                return Err(anyhow::anyhow!(
                    "File without extension: {}",
                    path.display()
                ));
            }
        }
        for source in parse_manifest_file(path)? {
            source_order.push(source.name.clone());
            catalog.add(source)?;
        }
    }

    Ok((catalog, source_order))
}

fn parse_manifest_file(path: &PathBuf) -> Result<Vec<ConfigSource>> {
    let content = fs::read_to_string(path)?;
    let toml_doc: toml::Value = toml::from_str(&content)?;

    let toml::Value::Table(table) = toml_doc else {
        return Err(anyhow::anyhow!(
            "Manifest file must contain a table at root level"
        ));
    };

    let mut sources = Vec::new();
    for (name, value) in table {
        if value.as_table().is_none() {
            return Err(anyhow::anyhow!("Source '{name}' must be a table"));
        }
        sources.push(parse_source(&name, value)?);
    }
    Ok(sources)
}

fn parse_source(name: &str, value: toml::Value) -> Result<ConfigSource> {
    let manifest: SourceManifest = value
        .try_into()
        .map_err(|e| anyhow::anyhow!("Failed to parse source '{name}': {e}"))?;

    let mut builder = ConfigSource::builder(name);
    for import_name in manifest.imports {
        builder = builder.import(import_name);
    }
    for (component_name, component_value) in manifest.components {
        let toml::Value::Table(config_table) = component_value else {
            return Err(anyhow::anyhow!(
                "Component '{component_name}' in source '{name}' must be a table"
            ));
        };
        let config = convert_toml_table_to_json_map(&config_table)?;
        builder = builder.descriptor(ComponentDescriptor::value(component_name, config));
    }

    Ok(builder.build())
}

fn convert_toml_table_to_json_map(
    table: &toml::map::Map<String, toml::Value>,
) -> Result<HashMap<String, serde_json::Value>> {
    let mut map = HashMap::new();
    for (key, value) in table {
        let json_value = convert_toml_value_to_json(value)?;
        map.insert(key.clone(), json_value);
    }
    Ok(map)
}

fn convert_toml_value_to_json(value: &toml::Value) -> Result<serde_json::Value> {
    match value {
        toml::Value::String(s) => Ok(serde_json::Value::String(s.clone())),
        toml::Value::Integer(i) => Ok(serde_json::Value::Number((*i).into())),
        toml::Value::Float(f) => Ok(serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)),
        toml::Value::Boolean(b) => Ok(serde_json::Value::Bool(*b)),
        toml::Value::Array(arr) => {
            let json_arr: Result<Vec<_>, _> = arr.iter().map(convert_toml_value_to_json).collect();
            Ok(serde_json::Value::Array(json_arr?))
        }
        toml::Value::Table(table) => {
            let json_map = convert_toml_table_to_json_map(table)?;
            let json_obj: serde_json::Map<String, serde_json::Value> =
                json_map.into_iter().collect();
            Ok(serde_json::Value::Object(json_obj))
        }
        toml::Value::Datetime(dt) => Ok(serde_json::Value::String(dt.to_string())),
    }
}
