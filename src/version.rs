use std::sync::OnceLock;

use regex::Regex;

use crate::error::{CiVersionError, Result};

/// Parsed form of the one-line `git describe --tags --long` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescribeResult {
    /// Nearest tag with any leading `v` stripped
    pub tag: String,
    /// Commit count since that tag, kept verbatim as a string
    pub commits_since_tag: String,
    /// Abbreviated object id with the `g` marker stripped
    pub object_id: String,
}

/// Derived version strings published as CI outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersion {
    pub short_version: String,
    pub long_version: String,
}

impl ResolvedVersion {
    /// Derive the short and long version from a parsed descriptor.
    ///
    /// On feature/PR branches the long version carries the commits-since-tag
    /// counter so every build gets a distinct version; release and
    /// development builds use the bare tag.
    pub fn from_describe(describe: &DescribeResult, is_feature_or_pr: bool) -> Self {
        let short_version = describe.tag.clone();
        let long_version = if is_feature_or_pr {
            format!("{}.{}", describe.tag, describe.commits_since_tag)
        } else {
            describe.tag.clone()
        };

        ResolvedVersion {
            short_version,
            long_version,
        }
    }
}

fn describe_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Greedy tag capture anchors the count and object id on the *last* two
    // hyphen-separated fields, so tags containing hyphens (v1.0-beta) parse
    // correctly instead of shifting field positions.
    RE.get_or_init(|| {
        Regex::new(r"^v?(?P<tag>.+)-(?P<count>\d+)-g(?P<oid>[0-9a-fA-F]+)$")
            .expect("describe regex is valid")
    })
}

/// Parse a descriptor line of the form `<tag>-<count>-g<objectid>`.
///
/// The tag may carry an optional leading `v`, which is stripped.
pub fn parse_describe(line: &str) -> Result<DescribeResult> {
    let trimmed = line.trim();
    let captures = describe_regex().captures(trimmed).ok_or_else(|| {
        CiVersionError::describe(format!(
            "expected '<tag>-<count>-g<objectid>', got '{}'",
            trimmed
        ))
    })?;

    Ok(DescribeResult {
        tag: captures["tag"].to_string(),
        commits_since_tag: captures["count"].to_string(),
        object_id: captures["oid"].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_describe_basic() {
        let result = parse_describe("v1.2.3-5-gabcde").unwrap();
        assert_eq!(result.tag, "1.2.3");
        assert_eq!(result.commits_since_tag, "5");
        assert_eq!(result.object_id, "abcde");
    }

    #[test]
    fn test_parse_describe_without_v_prefix() {
        let result = parse_describe("2.0.0-0-gf").unwrap();
        assert_eq!(result.tag, "2.0.0");
        assert_eq!(result.commits_since_tag, "0");
        assert_eq!(result.object_id, "f");
    }

    #[test]
    fn test_parse_describe_hyphenated_tag() {
        let result = parse_describe("v1.0-beta-5-gabc").unwrap();
        assert_eq!(result.tag, "1.0-beta");
        assert_eq!(result.commits_since_tag, "5");
        assert_eq!(result.object_id, "abc");
    }

    #[test]
    fn test_parse_describe_trims_trailing_newline() {
        let result = parse_describe("v1.2.3-5-gabcde\n").unwrap();
        assert_eq!(result.tag, "1.2.3");
    }

    #[test]
    fn test_parse_describe_rejects_malformed_lines() {
        for line in ["v1.2.3", "v1.2.3-5", "not a descriptor", "", "-5-gab"] {
            let err = parse_describe(line).unwrap_err();
            assert!(
                err.to_string().starts_with("Descriptor parse error"),
                "line: {:?}",
                line
            );
        }
    }

    #[test]
    fn test_long_version_on_feature_branch() {
        let describe = parse_describe("v1.2.3-5-gabcde").unwrap();
        let version = ResolvedVersion::from_describe(&describe, true);
        assert_eq!(version.short_version, "1.2.3");
        assert_eq!(version.long_version, "1.2.3.5");
    }

    #[test]
    fn test_long_version_on_release_branch() {
        let describe = parse_describe("v1.2.3-5-gabcde").unwrap();
        let version = ResolvedVersion::from_describe(&describe, false);
        assert_eq!(version.short_version, "1.2.3");
        assert_eq!(version.long_version, "1.2.3");
    }
}
