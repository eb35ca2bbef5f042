use std::process::Command;

use regex::Regex;

/// External value sources the input defaults draw from.
///
/// Implementations answer with `None` for anything they cannot determine;
/// absence of a default is never an error. Injected explicitly so tests can
/// substitute a scripted implementation.
pub trait SystemAccess {
    /// `user.name` from the git configuration.
    fn git_user_name(&self) -> Option<String>;

    /// `user.email` from the git configuration.
    fn git_user_email(&self) -> Option<String>;

    /// The `origin` remote URL of the surrounding repository, as configured
    /// (possibly an SSH-style remote string).
    fn git_remote_url(&self) -> Option<String>;

    /// Version of the Python interpreter on the PATH, e.g. `"3.10.2"`.
    fn python_version(&self) -> Option<String>;
}

/// [`SystemAccess`] implementation that shells out to the host's `git` and
/// `python` binaries.
pub struct HostSystem;

impl HostSystem {
    fn capture_stdout(command: &str, args: &[&str]) -> Option<String> {
        let output = match Command::new(command).args(args).output() {
            Ok(output) => output,
            Err(e) => {
                log::debug!("Failed to run {} {}: {}", command, args.join(" "), e);
                return None;
            }
        };
        if !output.status.success() {
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            None
        } else {
            Some(stdout)
        }
    }
}

impl SystemAccess for HostSystem {
    fn git_user_name(&self) -> Option<String> {
        Self::capture_stdout("git", &["config", "user.name"])
    }

    fn git_user_email(&self) -> Option<String> {
        Self::capture_stdout("git", &["config", "user.email"])
    }

    fn git_remote_url(&self) -> Option<String> {
        Self::capture_stdout("git", &["config", "--get", "remote.origin.url"])
    }

    fn python_version(&self) -> Option<String> {
        // Some distributions only ship a `python3` binary.
        ["python", "python3"].iter().find_map(|binary| {
            Self::capture_stdout(binary, &["--version"]).and_then(|out| parse_python_version(&out))
        })
    }
}

/// Extracts the version number from an interpreter's `--version` report
/// (`"Python 3.10.2"` becomes `"3.10.2"`).
pub fn parse_python_version(report: &str) -> Option<String> {
    let version_re = Regex::new(r"Python\s+(\d+\.\d+(?:\.\d+)?)").unwrap();
    version_re.captures(report).map(|captures| captures[1].to_string())
}

/// Resolves a configured git remote into a canonical web URL.
///
/// Remotes already in URL form only get their `.git` suffix stripped;
/// SSH-style `user@host:owner/repo.git` remotes are rewritten to
/// `https://host/owner/repo`.
pub fn canonical_repo_url(remote: &str) -> Option<String> {
    let remote = remote.trim().trim_end_matches(".git");

    if let Ok(parsed) = url::Url::parse(remote) {
        if parsed.has_host() {
            return Some(remote.to_string());
        }
    }

    let ssh_re = Regex::new(r"^(?:[^@\s]+@)?(?P<host>[^:/\s]+):(?P<path>[^\s]+)$").unwrap();
    let captures = ssh_re.captures(remote)?;
    Some(format!("https://{}/{}", &captures["host"], &captures["path"]))
}
