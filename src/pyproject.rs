use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use crate::error::Result;
use crate::ioutils::{read_if_exists, write_file};
use crate::merge::merge_documents;

pub const PYPROJECT_FILE: &str = "pyproject.toml";

const BUILD_SYSTEM_KEY: &str = "build-system";

/// The `build-system` section written to fresh manifests.
pub fn default_build_system() -> Value {
    json!({
        "requires": ["poetry-core"],
        "build-backend": "poetry.core.masonry.api"
    })
}

pub fn manifest_path(project_dir: &Path) -> PathBuf {
    project_dir.join(PYPROJECT_FILE)
}

/// Reads the manifest as a nested document. A missing file behaves as an
/// empty document.
pub fn read_manifest(project_dir: &Path) -> Result<Value> {
    match read_if_exists(manifest_path(project_dir))? {
        Some(content) => Ok(toml::from_str(&content)?),
        None => Ok(Value::Object(Map::new())),
    }
}

/// The `tool.poetry` table of a manifest document, or an empty table.
pub fn tool_poetry(manifest: &Value) -> Value {
    manifest
        .get("tool")
        .and_then(|tool| tool.get("poetry"))
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()))
}

/// Layers freshly resolved `tool.poetry` values onto the on-disk document.
///
/// Unrelated manifest content survives through the structured merge. The
/// `build-system` section is handled by whole-value override instead: an
/// existing section is kept byte-for-byte and the default is discarded, so
/// a user-customized build backend is never touched.
pub fn merged_manifest(disk: Value, poetry_values: Value) -> Value {
    let resolved = json!({"tool": {"poetry": poetry_values}});
    let mut merged = merge_documents(disk, resolved);

    if let Value::Object(document) = &mut merged {
        if !document.contains_key(BUILD_SYSTEM_KEY) {
            document.insert(BUILD_SYSTEM_KEY.to_string(), default_build_system());
        }
    }
    merged
}

/// Serializes and writes the manifest.
///
/// Null values model the absence of a field and have no TOML counterpart,
/// so they are stripped beforehand.
pub fn write_manifest(project_dir: &Path, manifest: &Value) -> Result<()> {
    let cleaned = strip_nulls(manifest.clone());
    let content = toml::to_string_pretty(&cleaned)?;
    write_file(&content, manifest_path(project_dir))
}

fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(object) => Value::Object(
            object
                .into_iter()
                .filter(|(_, entry)| !entry.is_null())
                .map(|(key, entry)| (key, strip_nulls(entry)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items.into_iter().filter(|item| !item.is_null()).map(strip_nulls).collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_manifest_reads_as_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_manifest(dir.path()).unwrap(), json!({}));
    }

    #[test]
    fn manifest_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = json!({
            "tool": {
                "poetry": {
                    "name": "my_package",
                    "version": "1.0.19",
                    "authors": ["Paul Phoenix <paul.phoenix@tekken.us>"],
                    "dependencies": {"python": "^3.7.0"}
                }
            }
        });
        write_manifest(dir.path(), &manifest).unwrap();
        assert_eq!(read_manifest(dir.path()).unwrap(), manifest);
    }

    #[test]
    fn tool_poetry_of_empty_document_is_empty() {
        assert_eq!(tool_poetry(&json!({})), json!({}));
    }

    #[test]
    fn merged_manifest_keeps_unrelated_content() {
        let disk = json!({
            "tool": {
                "poetry": {
                    "dependencies": {"black": "^2.31.0"}
                },
                "pytest": {"ini_options": {"testpaths": ["tests"]}}
            }
        });
        let merged = merged_manifest(
            disk,
            json!({"name": "pkg", "dependencies": {"python": "^3.10.1"}}),
        );
        assert_eq!(
            merged["tool"]["poetry"],
            json!({
                "dependencies": {"black": "^2.31.0", "python": "^3.10.1"},
                "name": "pkg"
            })
        );
        assert_eq!(merged["tool"]["pytest"], json!({"ini_options": {"testpaths": ["tests"]}}));
    }

    #[test]
    fn merged_manifest_adds_the_build_system_section() {
        let merged = merged_manifest(json!({}), json!({"name": "pkg"}));
        assert_eq!(merged["build-system"], default_build_system());
    }

    #[test]
    fn merged_manifest_leaves_existing_build_system_untouched() {
        // An existing section must not be deep-merged with the default one.
        let disk = json!({"build-system": {"requires": ["setuptools", "wheel"]}});
        let merged = merged_manifest(disk, json!({"name": "pkg"}));
        assert_eq!(
            merged["build-system"],
            json!({"requires": ["setuptools", "wheel"]})
        );
    }

    #[test]
    fn null_values_are_stripped_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = json!({"tool": {"poetry": {"name": "pkg", "repository": null}}});
        write_manifest(dir.path(), &manifest).unwrap();
        assert_eq!(
            read_manifest(dir.path()).unwrap(),
            json!({"tool": {"poetry": {"name": "pkg"}}})
        );
    }
}
