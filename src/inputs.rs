use std::path::Path;

use serde_json::{json, Value};

use crate::input::Input;
use crate::licenses::{DEFAULT_LICENSE, KNOWN_LICENSES};
use crate::providers::{canonical_repo_url, SystemAccess};
use crate::validation::{
    validate_author, validate_description, validate_license, validate_poetry_version_range,
    validate_python_package_name, validate_python_package_version, validate_url,
};

/// The inputs backing a poetry manifest, in prompt order.
///
/// Each entry wires a field's projections to its validation rule and its
/// default provider. Defaults are only consulted for fields still unset
/// after the disk and option merges.
pub fn poetry_inputs<'a>(
    system: &'a dyn SystemAccess,
    project_dir: &Path,
) -> Vec<Input<'a>> {
    let dir_name = project_dir
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    vec![
        Input::new("name")
            .description("The name of the Python package.")
            .message("Python package name")
            .validate_str(validate_python_package_name)
            .retrieve_default(move || {
                validate_python_package_name(&dir_name)
                    .is_ok()
                    .then(|| json!(dir_name.clone()))
            }),
        Input::new("version")
            .option_name("package-version")
            .description("The version of the Python package.")
            .message("Python package version")
            .validate_str(validate_python_package_version)
            .retrieve_default(|| Some(json!("0.0.0"))),
        Input::new("description")
            .description("The description of the Python package.")
            .message("Python package description")
            .validate_str(validate_description),
        Input::new("author")
            .path("authors")
            .description("Name and email of the Python package author.")
            .message("Python package author (name <email>)")
            .validate_str(validate_author)
            .transform(|author| json!([author]))
            .retrieve_default(move || {
                let name = system.git_user_name()?;
                let email = system.git_user_email()?;
                Some(json!(format!("{} <{}>", name, email)))
            }),
        Input::new("license")
            .description("The license of the Python package.")
            .message("Python package license")
            .choices(KNOWN_LICENSES.iter().map(|l| l.to_string()).collect())
            .validate_str(validate_license)
            .retrieve_default(|| Some(json!(DEFAULT_LICENSE))),
        Input::new("python")
            .path("dependencies.python")
            .description("The range of Python versions compatible with the package.")
            .message("Python versions compatible with the package")
            .validate_str(validate_poetry_version_range)
            .retrieve_default(move || {
                system.python_version().map(|version| json!(format!("^{}", version)))
            }),
        /*
         * Null is a valid repository value, representing the absence of a
         * URL. Prompts display it as the empty string, and an empty answer
         * is folded back to null by the transform.
         */
        Input::new("repository")
            .description("The URL of the project repository.")
            .message("Project repository URL")
            .validate(|value| match value {
                Value::Null => Ok(()),
                Value::String(url) if url.is_empty() => Ok(()),
                Value::String(url) => validate_url(url),
                _ => Err("Invalid URL".to_string()),
            })
            .transform(|value| match value {
                Value::String(url) if url.is_empty() => Value::Null,
                other => other,
            })
            .retrieve_default(move || {
                system.git_remote_url().and_then(|remote| {
                    canonical_repo_url(&remote).map(Value::from)
                })
            }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::InputRegistry;
    use serde_json::json;

    pub struct ScriptedSystem {
        pub user_name: Option<String>,
        pub user_email: Option<String>,
        pub remote_url: Option<String>,
        pub python: Option<String>,
    }

    impl SystemAccess for ScriptedSystem {
        fn git_user_name(&self) -> Option<String> {
            self.user_name.clone()
        }
        fn git_user_email(&self) -> Option<String> {
            self.user_email.clone()
        }
        fn git_remote_url(&self) -> Option<String> {
            self.remote_url.clone()
        }
        fn python_version(&self) -> Option<String> {
            self.python.clone()
        }
    }

    fn scripted() -> ScriptedSystem {
        ScriptedSystem {
            user_name: Some("Jin Kazama".to_string()),
            user_email: Some("jin.kazama@tekken.jp".to_string()),
            remote_url: Some("git@github.com:eddy-gordo/git_package.git".to_string()),
            python: Some("3.10.2".to_string()),
        }
    }

    fn default_of(inputs: &[Input], name: &str) -> Option<Value> {
        inputs.iter().find(|input| input.name() == name).unwrap().default_value()
    }

    #[test]
    fn registers_the_documented_prompt_order() {
        let system = scripted();
        let registry = InputRegistry::new(poetry_inputs(&system, Path::new("/tmp/my_package")));
        let prompt_names: Vec<String> =
            registry.prompts().into_iter().map(|p| p.name).collect();
        assert_eq!(
            prompt_names,
            ["name", "version", "description", "author", "license", "python", "repository"]
        );
    }

    #[test]
    fn name_default_is_the_project_directory() {
        let system = scripted();
        let inputs = poetry_inputs(&system, Path::new("/home/kazuya/my_package"));
        assert_eq!(default_of(&inputs, "name"), Some(json!("my_package")));
    }

    #[test]
    fn name_default_is_skipped_for_invalid_directory_names() {
        let system = scripted();
        let inputs = poetry_inputs(&system, Path::new("/home/kazuya/My-Package"));
        assert_eq!(default_of(&inputs, "name"), None);
    }

    #[test]
    fn author_default_combines_git_name_and_email() {
        let system = scripted();
        let inputs = poetry_inputs(&system, Path::new("/tmp/pkg"));
        assert_eq!(
            default_of(&inputs, "author"),
            Some(json!("Jin Kazama <jin.kazama@tekken.jp>"))
        );
    }

    #[test]
    fn author_default_requires_both_name_and_email() {
        let mut system = scripted();
        system.user_email = None;
        let inputs = poetry_inputs(&system, Path::new("/tmp/pkg"));
        assert_eq!(default_of(&inputs, "author"), None);
    }

    #[test]
    fn python_default_is_a_caret_range_over_the_interpreter_version() {
        let system = scripted();
        let inputs = poetry_inputs(&system, Path::new("/tmp/pkg"));
        assert_eq!(default_of(&inputs, "python"), Some(json!("^3.10.2")));
    }

    #[test]
    fn repository_default_canonicalizes_ssh_remotes() {
        let system = scripted();
        let inputs = poetry_inputs(&system, Path::new("/tmp/pkg"));
        assert_eq!(
            default_of(&inputs, "repository"),
            Some(json!("https://github.com/eddy-gordo/git_package"))
        );
    }

    #[test]
    fn empty_repository_answer_becomes_null() {
        let system = scripted();
        let mut inputs = poetry_inputs(&system, Path::new("/tmp/pkg"));
        let repository =
            inputs.iter_mut().find(|input| input.name() == "repository").unwrap();
        repository.set_value(json!(""), false).unwrap();
        assert_eq!(repository.value(), Some(&Value::Null));
    }
}
