/// SPDX identifiers the license input accepts, in prompt display order.
///
/// License text generation is out of scope; the identifier is only written
/// to the manifest's `license` field.
pub const KNOWN_LICENSES: &[&str] = &[
    "Apache-2.0",
    "MIT",
    "MPL-2.0",
    "BSD-2-Clause",
    "BSD-3-Clause",
    "ISC",
    "GPL-3.0",
    "AGPL-3.0",
    "LGPL-3.0",
    "Unlicense",
];

/// Default choice offered by the license prompt.
pub const DEFAULT_LICENSE: &str = "GPL-3.0";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_license_is_known() {
        assert!(KNOWN_LICENSES.contains(&DEFAULT_LICENSE));
    }
}
