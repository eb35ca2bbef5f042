use std::path::Path;

use minijinja::{context, Environment};

use crate::error::Result;
use crate::ioutils::write_file;

const INIT_PY_TEMPLATE: &str = "__version__ = \"{{ version }}\"\n";

const TEST_PY_TEMPLATE: &str = "\
import {{ package_name }}


def test_version():
    assert {{ package_name }}.__version__ == \"{{ version }}\"
";

/// Writes the minimal package skeleton:
///
/// ```text
/// <package_name>/__init__.py
/// tests/__init__.py
/// tests/test_<package_name>.py
/// ```
///
/// Files already present are left alone; the skeleton only ever fills gaps.
pub fn write_package_skeleton(
    project_dir: &Path,
    package_name: &str,
    version: &str,
) -> Result<()> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.add_template("init", INIT_PY_TEMPLATE)?;
    env.add_template("test", TEST_PY_TEMPLATE)?;

    let ctx = context! { package_name, version };

    let files = [
        (
            project_dir.join(package_name).join("__init__.py"),
            env.get_template("init")?.render(&ctx)?,
        ),
        (project_dir.join("tests").join("__init__.py"), String::new()),
        (
            project_dir.join("tests").join(format!("test_{}.py", package_name)),
            env.get_template("test")?.render(&ctx)?,
        ),
    ];

    for (path, content) in files {
        if path.exists() {
            log::info!("Skipping existing {}", path.display());
            continue;
        }
        log::info!("Writing {}", path.display());
        write_file(&content, path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_the_skeleton() {
        let dir = tempfile::tempdir().unwrap();
        write_package_skeleton(dir.path(), "my_package", "1.2.3").unwrap();

        let init = std::fs::read_to_string(dir.path().join("my_package/__init__.py")).unwrap();
        assert_eq!(init, "__version__ = \"1.2.3\"\n");

        assert!(dir.path().join("tests/__init__.py").exists());

        let test = std::fs::read_to_string(dir.path().join("tests/test_my_package.py")).unwrap();
        assert!(test.contains("import my_package"));
        assert!(test.contains("my_package.__version__ == \"1.2.3\""));
    }

    #[test]
    fn never_overwrites_existing_files() {
        let dir = tempfile::tempdir().unwrap();
        let init_path = dir.path().join("my_package/__init__.py");
        crate::ioutils::write_file("# hand-written\n", &init_path).unwrap();

        write_package_skeleton(dir.path(), "my_package", "1.2.3").unwrap();
        assert_eq!(std::fs::read_to_string(init_path).unwrap(), "# hand-written\n");
    }
}
