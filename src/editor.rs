use std::path::Path;

use serde_json::{json, Value};

use crate::error::Result;
use crate::ioutils::{read_if_exists, write_file};
use crate::merge::merge_documents;

fn default_extensions() -> Value {
    json!({
        "recommendations": [
            "ms-python.python",
            "ms-python.vscode-pylance",
            "tamasfe.even-better-toml"
        ]
    })
}

fn default_settings() -> Value {
    json!({
        "python.terminal.activateEnvironment": true,
        "python.testing.pytestEnabled": true,
        "python.testing.unittestEnabled": false,
        "editor.formatOnSave": true
    })
}

fn default_poetry_toml() -> Value {
    json!({"virtualenvs": {"in-project": true}})
}

fn default_pytest_section() -> Value {
    json!({"tool": {"pytest": {"ini_options": {"testpaths": ["tests"]}}}})
}

/// Writes the editor configuration files, layering any pre-existing file
/// content over the shipped defaults so user customizations always win and
/// defaults only fill the gaps.
pub fn write_editor_config(project_dir: &Path) -> Result<()> {
    merge_json_file(&project_dir.join(".vscode/extensions.json"), default_extensions())?;
    merge_json_file(&project_dir.join(".vscode/settings.json"), default_settings())?;
    merge_toml_file(&project_dir.join("poetry.toml"), default_poetry_toml())?;
    merge_toml_file(&project_dir.join("pyproject.toml"), default_pytest_section())?;
    Ok(())
}

fn merge_json_file(path: &Path, defaults: Value) -> Result<()> {
    let existing = match read_if_exists(path)? {
        Some(content) => serde_json::from_str(&content)?,
        None => json!({}),
    };
    let merged = merge_documents(defaults, existing);
    log::info!("Writing {}", path.display());
    write_file(&format!("{:#}\n", merged), path)
}

fn merge_toml_file(path: &Path, defaults: Value) -> Result<()> {
    let existing: Value = match read_if_exists(path)? {
        Some(content) => toml::from_str(&content)?,
        None => json!({}),
    };
    let merged = merge_documents(defaults, existing);
    log::info!("Writing {}", path.display());
    write_file(&toml::to_string_pretty(&merged)?, path)
}
