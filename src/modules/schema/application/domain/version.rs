use semver::Version;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Version every document is migrated to by default.
pub const CURRENT_SCHEMA_VERSION: &str = "1.0.0";

/// Version assumed for documents with no recognizable structure.
pub const BASELINE_SCHEMA_VERSION: &str = "0.1.0";

/// How two schema version strings are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionOrdering {
    /// `major.minor.patch` compared numerically. Strings that are not semver
    /// fall back to plain string comparison.
    #[default]
    Semantic,
    /// Plain string comparison. `"0.10.0"` sorts before `"0.9.0"`.
    Lexicographic,
}

impl VersionOrdering {
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            VersionOrdering::Lexicographic => a.cmp(b),
            VersionOrdering::Semantic => match (Version::parse(a), Version::parse(b)) {
                (Ok(va), Ok(vb)) => va.cmp(&vb),
                _ => a.cmp(b),
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VersionOrdering::Semantic => "semantic",
            VersionOrdering::Lexicographic => "lexicographic",
        }
    }
}

impl fmt::Display for VersionOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VersionOrdering {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "semantic" | "semver" => Ok(VersionOrdering::Semantic),
            "lexicographic" | "string" => Ok(VersionOrdering::Lexicographic),
            other => Err(format!(
                "expected 'semantic' or 'lexicographic', got '{}'",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semantic_compares_numerically() {
        let ord = VersionOrdering::Semantic;
        assert_eq!(ord.compare("0.10.0", "0.9.0"), Ordering::Greater);
        assert_eq!(ord.compare("1.0.0", "1.0.0"), Ordering::Equal);
        assert_eq!(ord.compare("0.2.0", "1.0.0"), Ordering::Less);
    }

    #[test]
    fn lexicographic_compares_strings() {
        let ord = VersionOrdering::Lexicographic;
        assert_eq!(ord.compare("0.10.0", "0.9.0"), Ordering::Less);
    }

    #[test]
    fn semantic_falls_back_for_non_semver() {
        let ord = VersionOrdering::Semantic;
        assert_eq!(ord.compare("v2", "v10"), Ordering::Greater);
    }

    #[test]
    fn parses_setting_names() {
        assert_eq!("Semantic".parse::<VersionOrdering>(), Ok(VersionOrdering::Semantic));
        assert_eq!("lexicographic".parse::<VersionOrdering>(), Ok(VersionOrdering::Lexicographic));
        assert!("numeric".parse::<VersionOrdering>().is_err());
    }
}
