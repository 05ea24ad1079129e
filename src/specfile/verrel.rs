//! Package name-version-release as reported by `fedpkg verrel`.

use std::fmt;

/// Result of the `verrel` query for one branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verrel {
    /// Name-version-release, e.g. `python-foo-1.2-3.fc40`
    Known(String),
    /// The query failed; steps needing the value cannot be planned
    Unavailable,
}

impl Verrel {
    /// Parse `fedpkg verrel` output: the last non-empty line
    pub fn parse(output: &str) -> Self {
        output
            .lines()
            .map(str::trim)
            .rfind(|line| !line.is_empty())
            .map(|line| Verrel::Known(line.to_string()))
            .unwrap_or(Verrel::Unavailable)
    }

    /// The value, if known
    pub fn as_known(&self) -> Option<&str> {
        match self {
            Verrel::Known(value) => Some(value),
            Verrel::Unavailable => None,
        }
    }
}

impl fmt::Display for Verrel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verrel::Known(value) => f.write_str(value),
            Verrel::Unavailable => f.write_str("<unavailable>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_takes_last_line() {
        let out = "Downloading sources...\npython-foo-1.2-3.fc40\n\n";
        assert_eq!(Verrel::parse(out).as_known(), Some("python-foo-1.2-3.fc40"));
    }

    #[test]
    fn test_parse_empty_is_unavailable() {
        assert_eq!(Verrel::parse("  \n"), Verrel::Unavailable);
        assert_eq!(Verrel::Unavailable.to_string(), "<unavailable>");
    }
}
