use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::dialoguer::{collect_answers, default_answers};
use crate::editor::write_editor_config;
use crate::error::{Error, Result};
use crate::input::OptionSpec;
use crate::inputs::poetry_inputs;
use crate::install::run_poetry_install;
use crate::providers::SystemAccess;
use crate::pyproject::{merged_manifest, read_manifest, tool_poetry, write_manifest};
use crate::registry::InputRegistry;
use crate::scaffold::write_package_skeleton;

/// Drives the scaffolding lifecycle (initialize → prompt → write →
/// install) around one [`InputRegistry`] instance.
///
/// Phase order fixes value precedence: manifest content on disk merges
/// first as trusted raw values, CLI options merge second and therefore
/// override disk content, and prompting happens last, asking only for
/// fields the earlier merges left unset.
pub struct ProjectGenerator<'a> {
    registry: InputRegistry<'a>,
    project_dir: PathBuf,
}

impl<'a> ProjectGenerator<'a> {
    pub fn new(system: &'a dyn SystemAccess, project_dir: &Path) -> Self {
        Self::with_registry(InputRegistry::new(poetry_inputs(system, project_dir)), project_dir)
    }

    pub fn with_registry(registry: InputRegistry<'a>, project_dir: &Path) -> Self {
        Self { registry, project_dir: project_dir.to_path_buf() }
    }

    pub fn registry(&self) -> &InputRegistry<'a> {
        &self.registry
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn options(&self) -> Vec<OptionSpec> {
        self.registry.options()
    }

    /// Initializing phase: merges the on-disk manifest as raw values, then
    /// the supplied CLI option values on top.
    ///
    /// A rejected option value is reported against its flag name.
    pub fn initialize(&mut self, option_values: &Value) -> Result<()> {
        let manifest = read_manifest(&self.project_dir)?;
        self.registry.merge_raw_values(&tool_poetry(&manifest))?;

        self.registry.merge_options(option_values).map_err(|err| self.option_error(err))
    }

    /// Prompting phase. With `interactive` unset, pending questions are
    /// resolved from their defaults instead of being asked.
    pub fn prompt(&mut self, interactive: bool) -> Result<()> {
        let answers = if interactive {
            collect_answers(&self.registry)?
        } else {
            default_answers(&self.registry)
        };
        self.registry.merge_answers(&Value::Object(answers))
    }

    /// Writing phase: persists the merged manifest, the package skeleton
    /// and the editor configuration.
    pub fn write(&self) -> Result<()> {
        let values = self.registry.values();

        let manifest = read_manifest(&self.project_dir)?;
        write_manifest(&self.project_dir, &merged_manifest(manifest, values.clone()))?;

        let name = values.get("name").and_then(Value::as_str);
        let version = values.get("version").and_then(Value::as_str);
        match (name, version) {
            (Some(name), Some(version)) => {
                write_package_skeleton(&self.project_dir, name, version)?
            }
            _ => log::warn!("Package name or version unresolved, skipping skeleton"),
        }

        write_editor_config(&self.project_dir)
    }

    /// Install phase: bootstraps the workspace through `poetry install`.
    pub fn install(&self) -> Result<()> {
        run_poetry_install(&self.project_dir)
    }

    fn option_error(&self, err: Error) -> Error {
        match err {
            Error::InvalidValue { input, value, reason } => {
                let option = self
                    .registry
                    .option_path_of(&input)
                    .unwrap_or(input.as_str())
                    .to_string();
                Error::InvalidOptionValue { option, value, reason: lower_first(&reason) }
            }
            other => other,
        }
    }
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        // Acronym-leading reasons ("PEP 8 recommends...") keep their casing.
        Some(first) if !chars.clone().next().is_some_and(char::is_uppercase) => {
            first.to_lowercase().chain(chars).collect()
        }
        _ => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::SystemAccess;
    use serde_json::json;

    struct ScriptedSystem;

    impl SystemAccess for ScriptedSystem {
        fn git_user_name(&self) -> Option<String> {
            Some("Jin Kazama".to_string())
        }
        fn git_user_email(&self) -> Option<String> {
            Some("jin.kazama@tekken.jp".to_string())
        }
        fn git_remote_url(&self) -> Option<String> {
            Some("https://github.com/eddy-gordo/git_package".to_string())
        }
        fn python_version(&self) -> Option<String> {
            Some("3.10.2".to_string())
        }
    }

    #[test]
    fn invalid_option_values_name_the_flag() {
        let system = ScriptedSystem;
        let dir = tempfile::tempdir().unwrap();
        let mut generator = ProjectGenerator::new(&system, dir.path());

        let err = generator.initialize(&json!({"package-version": "9.2"})).unwrap_err();
        match err {
            Error::InvalidOptionValue { option, value, reason } => {
                assert_eq!(option, "package-version");
                assert_eq!(value, "9.2");
                assert!(reason.starts_with("not a valid semantic version"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn options_override_disk_content() {
        let system = ScriptedSystem;
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("pyproject.toml"),
            "[tool.poetry]\nversion = \"1.0.19\"\n",
        )
        .unwrap();

        let mut generator = ProjectGenerator::new(&system, dir.path());
        generator.initialize(&json!({"package-version": "2.0.2"})).unwrap();
        assert_eq!(generator.registry().values()["version"], json!("2.0.2"));
    }

    #[test]
    fn lower_first_only_touches_the_first_character() {
        assert_eq!(lower_first("Not a valid URL"), "not a valid URL");
        assert_eq!(lower_first("PEP 8 recommends lowercase"), "PEP 8 recommends lowercase");
        assert_eq!(lower_first(""), "");
    }
}
