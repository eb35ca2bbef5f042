use regex::Regex;
use semver::{Version, VersionReq};

use crate::licenses::KNOWN_LICENSES;

/// Outcome of a validation rule: `Ok(())` means the value is acceptable,
/// `Err` carries the human-readable rejection reason.
pub type Validation = std::result::Result<(), String>;

/// Prerelease tags PEP 440 allows (sans the trailing number).
pub const VALID_PEP440_PRERELEASE_TAGS: &[&str] = &["a", "b", "rc", "dev"];

pub fn validate_description(description: &str) -> Validation {
    if description.is_empty() {
        return Err("Python package descriptions can't be empty".to_string());
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Validation {
    let email_re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    if !email_re.is_match(email) {
        return Err(format!("\"{}\" is not a valid email address", email));
    }
    Ok(())
}

pub fn validate_license(license: &str) -> Validation {
    if !KNOWN_LICENSES.contains(&license) {
        return Err(format!("License \"{}\" is not supported", license));
    }
    Ok(())
}

pub fn validate_python_package_name(package_name: &str) -> Validation {
    if package_name.is_empty() {
        return Err("Python package names can't be empty".to_string());
    }

    if package_name.to_lowercase() != package_name {
        return Err(
            "PEP 8 recommends all lowercase names for python package names.".to_string()
        );
    }

    if package_name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err("Python package names can't start with a digit.".to_string());
    }

    if package_name.chars().any(|c| !c.is_ascii_alphanumeric() && c != '_') {
        return Err(
            "Python package names can only contain letters, digits or underscores."
                .to_string(),
        );
    }

    Ok(())
}

pub fn validate_python_package_version(package_version: &str) -> Validation {
    if package_version.contains('-') {
        return Err(
            "PEP 440 forbids dashes in version numbers. \
             Omit it before prerelease tags (e.g. 1.0.0a3)."
                .to_string(),
        );
    }

    if Regex::new(r"\D\.\d+$").unwrap().is_match(package_version) {
        return Err(
            "PEP 440 doesn't allow dots before the prerelease number. \
             Omit it (e.g. 1.0.0a3)."
                .to_string(),
        );
    }

    /*
     * PEP 440 prerelease versions look like "1.0.0a3", with no separator
     * before the tag, so strict semver parsing won't do. Split the tag off
     * first and validate the core through semver.
     */
    let loose_re =
        Regex::new(r"^(?P<core>\d+\.\d+\.\d+)(?P<prerelease>[A-Za-z][0-9A-Za-z]*)?$")
            .unwrap();
    let captures = match loose_re.captures(package_version.trim()) {
        Some(captures) => captures,
        None => {
            return Err(
                "Not a valid semantic version. \
                 Use of semantic versioning is encouraged by PEP 440."
                    .to_string(),
            )
        }
    };

    if Version::parse(&captures["core"]).is_err() {
        return Err(
            "Not a valid semantic version. \
             Use of semantic versioning is encouraged by PEP 440."
                .to_string(),
        );
    }

    if let Some(prerelease) = captures.name("prerelease") {
        let tag = prerelease.as_str().trim_end_matches(|c: char| c.is_ascii_digit());
        if !VALID_PEP440_PRERELEASE_TAGS.contains(&tag) {
            return Err(format!(
                "PEP 440 only allows these prerelease tags: {}",
                VALID_PEP440_PRERELEASE_TAGS.join(", ")
            ));
        }
    }

    Ok(())
}

pub fn validate_poetry_version_range(range: &str) -> Validation {
    if Regex::new(r"\s+-\s+").unwrap().is_match(range) {
        return Err("Poetry doesn't support hyphen range syntax".to_string());
    }

    /*
     * Poetry separates AND-ed constraints with commas ("^2.0, <2.5") and
     * OR-ed groups with "||". VersionReq only understands the comma form,
     * so each OR branch is normalized to it before parsing.
     */
    for branch in range.split("||") {
        let comparators: Vec<&str> =
            branch.split([',', ' ']).map(str::trim).filter(|c| !c.is_empty()).collect();
        if comparators.is_empty() {
            return Err("Invalid version range".to_string());
        }
        if VersionReq::parse(&comparators.join(", ")).is_err() {
            return Err("Invalid version range".to_string());
        }
    }

    Ok(())
}

pub fn validate_url(url: &str) -> Validation {
    match url::Url::parse(url) {
        Ok(parsed) if parsed.has_host() => Ok(()),
        _ => Err("Invalid URL".to_string()),
    }
}

/// Validates an `"Author Name <author@email>"` string, checking shape first
/// and the email portion second.
pub fn validate_author(author: &str) -> Validation {
    match split_author(author) {
        Some((_, email)) => {
            validate_email(email).map_err(|_| "Invalid email".to_string())
        }
        None => Err("Invalid author string".to_string()),
    }
}

/// Splits `"Author Name <author@email>"` into its name and email parts.
pub fn split_author(author: &str) -> Option<(&str, &str)> {
    let author_re = Regex::new(r"^(.*\S)\s+<(.*)>$").unwrap();
    let captures = author_re.captures(author.trim())?;
    Some((
        captures.get(1).map(|m| m.as_str())?,
        captures.get(2).map(|m| m.as_str())?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_must_be_non_empty() {
        assert!(validate_description("A package").is_ok());
        assert!(validate_description("").unwrap_err().contains("can't be empty"));
    }

    #[test]
    fn package_name_rejects_empty() {
        assert!(validate_python_package_name("").unwrap_err().contains("empty"));
    }

    #[test]
    fn package_name_rejects_uppercase() {
        let reason = validate_python_package_name("UpperCase").unwrap_err();
        assert!(reason.contains("PEP 8"));
        assert!(reason.contains("lowercase"));
    }

    #[test]
    fn package_name_rejects_leading_digit() {
        assert!(validate_python_package_name("1pkg").unwrap_err().contains("digit"));
    }

    #[test]
    fn package_name_rejects_invalid_characters() {
        let reason = validate_python_package_name("pkg-name").unwrap_err();
        assert!(reason.contains("letters, digits or underscores"));
    }

    #[test]
    fn package_name_accepts_snake_case() {
        assert!(validate_python_package_name("my_package2").is_ok());
    }

    #[test]
    fn package_version_rejects_dash() {
        assert!(validate_python_package_version("1.0.0-a3")
            .unwrap_err()
            .contains("forbids dashes"));
    }

    #[test]
    fn package_version_rejects_dotted_prerelease_number() {
        assert!(validate_python_package_version("1.0.0a.3")
            .unwrap_err()
            .contains("dots before the prerelease number"));
    }

    #[test]
    fn package_version_rejects_incomplete_version() {
        assert!(validate_python_package_version("9.2")
            .unwrap_err()
            .contains("Not a valid semantic version"));
    }

    #[test]
    fn package_version_rejects_unknown_prerelease_tag() {
        assert!(validate_python_package_version("1.0.0post1")
            .unwrap_err()
            .contains("prerelease tags"));
    }

    #[test]
    fn package_version_accepts_releases_and_pep440_prereleases() {
        for version in ["0.0.0", "1.0.19", "1.0.0a3", "2.1.0rc1", "3.0.0dev2"] {
            assert!(
                validate_python_package_version(version).is_ok(),
                "expected {} to be accepted",
                version
            );
        }
    }

    #[test]
    fn version_range_rejects_hyphen_ranges() {
        assert!(validate_poetry_version_range("1.0.0 - 2.0.0")
            .unwrap_err()
            .contains("hyphen range"));
    }

    #[test]
    fn version_range_rejects_garbage() {
        assert_eq!(
            validate_poetry_version_range("not-a-version").unwrap_err(),
            "Invalid version range"
        );
    }

    #[test]
    fn version_range_accepts_poetry_forms() {
        for range in ["^3.10.1", "~3.8", "3.*", ">=3.8, <4.0", ">=3.8,<4.0", "^2.0 || ^3.0", "*"] {
            assert!(
                validate_poetry_version_range(range).is_ok(),
                "expected {} to be accepted",
                range
            );
        }
    }

    #[test]
    fn url_requires_scheme_and_host() {
        assert!(validate_url("https://github.com/owner/repo").is_ok());
        assert!(validate_url("not-a-url").is_err());
        assert!(validate_url("git@github.com:owner/repo.git").is_err());
    }

    #[test]
    fn license_must_be_known() {
        assert!(validate_license("MIT").is_ok());
        assert!(validate_license("OSL-3.0").unwrap_err().contains("not supported"));
    }

    #[test]
    fn author_string_shape_is_checked_before_email() {
        assert!(validate_author("Steve Fox <steve.fox@tekken.uk>").is_ok());
        assert_eq!(validate_author("no-real-author").unwrap_err(), "Invalid author string");
        assert_eq!(validate_author("Steve Fox <not-an-email>").unwrap_err(), "Invalid email");
    }

    #[test]
    fn author_splits_into_name_and_email() {
        assert_eq!(
            split_author("Jin Kazama <jin.kazama@tekken.jp>"),
            Some(("Jin Kazama", "jin.kazama@tekken.jp"))
        );
        assert_eq!(split_author("nobody"), None);
    }

    #[test]
    fn email_validation() {
        assert!(validate_email("jin.kazama@tekken.jp").is_ok());
        assert!(validate_email("not an email").is_err());
    }
}
