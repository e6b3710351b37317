//! Module specifier classification.
//!
//! Both resolution engines parse requests through this type, so the two
//! can never disagree on whether a request is a relative path or a
//! package lookup.

use camino::Utf8PathBuf;

use crate::error::{RbenchError, RbenchResult};

/// A parsed module request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Specifier {
    /// Request relative to the importing directory (starts with `./` or `../`)
    Relative(Utf8PathBuf),

    /// Absolute filesystem path
    Absolute(Utf8PathBuf),

    /// Bare package request, optionally with a subpath into the package
    Package {
        /// Package name, including the scope for scoped packages
        /// (e.g. "lodash" or "@types/node")
        name: String,
        /// Path inside the package directory, if the request had one
        /// (e.g. "util" in "gamma/util")
        subpath: Option<Utf8PathBuf>,
    },
}

impl Specifier {
    /// Parse a raw request string into its specifier form
    pub fn parse(request: &str) -> RbenchResult<Self> {
        if request.is_empty() {
            return Err(RbenchError::invalid_specifier(request, "specifier is empty"));
        }

        if request.starts_with('/') {
            return Ok(Self::Absolute(Utf8PathBuf::from(request)));
        }

        if request == "."
            || request == ".."
            || request.starts_with("./")
            || request.starts_with("../")
        {
            return Ok(Self::Relative(Utf8PathBuf::from(request)));
        }

        if let Some(scoped) = request.strip_prefix('@') {
            return Self::parse_scoped(request, scoped);
        }

        // Bare package name, possibly with a subpath: "name" or "name/sub/path"
        let (name, rest) = match request.split_once('/') {
            Some((name, rest)) => (name, Some(rest)),
            None => (request, None),
        };

        Ok(Self::Package {
            name: name.to_string(),
            subpath: non_empty_subpath(rest),
        })
    }

    /// Parse "@scope/name" or "@scope/name/sub/path"
    fn parse_scoped(request: &str, scoped: &str) -> RbenchResult<Self> {
        let (scope, rest) = scoped.split_once('/').ok_or_else(|| {
            RbenchError::invalid_specifier(request, "scoped package is missing a name segment")
        })?;

        if scope.is_empty() {
            return Err(RbenchError::invalid_specifier(request, "package scope is empty"));
        }

        let (name, subpath) = match rest.split_once('/') {
            Some((name, subpath)) => (name, Some(subpath)),
            None => (rest, None),
        };

        if name.is_empty() {
            return Err(RbenchError::invalid_specifier(
                request,
                "scoped package name is empty",
            ));
        }

        Ok(Self::Package {
            name: format!("@{}/{}", scope, name),
            subpath: non_empty_subpath(subpath),
        })
    }

    /// Whether this request names a package rather than a path
    pub fn is_package(&self) -> bool {
        matches!(self, Self::Package { .. })
    }
}

fn non_empty_subpath(rest: Option<&str>) -> Option<Utf8PathBuf> {
    rest.filter(|s| !s.is_empty()).map(Utf8PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_relative() {
        assert_eq!(
            Specifier::parse("./entry.js").unwrap(),
            Specifier::Relative(Utf8PathBuf::from("./entry.js"))
        );
        assert_eq!(
            Specifier::parse("../lib/math").unwrap(),
            Specifier::Relative(Utf8PathBuf::from("../lib/math"))
        );
        assert_eq!(
            Specifier::parse(".").unwrap(),
            Specifier::Relative(Utf8PathBuf::from("."))
        );
    }

    #[test]
    fn test_parse_absolute() {
        assert_eq!(
            Specifier::parse("/opt/app/entry.js").unwrap(),
            Specifier::Absolute(Utf8PathBuf::from("/opt/app/entry.js"))
        );
    }

    #[test]
    fn test_parse_bare_package() {
        assert_eq!(
            Specifier::parse("alpha").unwrap(),
            Specifier::Package {
                name: "alpha".to_string(),
                subpath: None,
            }
        );
    }

    #[test]
    fn test_parse_package_subpath() {
        assert_eq!(
            Specifier::parse("gamma/util").unwrap(),
            Specifier::Package {
                name: "gamma".to_string(),
                subpath: Some(Utf8PathBuf::from("util")),
            }
        );
        assert_eq!(
            Specifier::parse("gamma/deep/util.js").unwrap(),
            Specifier::Package {
                name: "gamma".to_string(),
                subpath: Some(Utf8PathBuf::from("deep/util.js")),
            }
        );
    }

    #[test]
    fn test_parse_scoped_package() {
        assert_eq!(
            Specifier::parse("@scope/beta").unwrap(),
            Specifier::Package {
                name: "@scope/beta".to_string(),
                subpath: None,
            }
        );
        assert_eq!(
            Specifier::parse("@scope/beta/extras").unwrap(),
            Specifier::Package {
                name: "@scope/beta".to_string(),
                subpath: Some(Utf8PathBuf::from("extras")),
            }
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!(Specifier::parse("").is_err());
        assert!(Specifier::parse("@scope").is_err());
        assert!(Specifier::parse("@/name").is_err());
        assert!(Specifier::parse("@scope/").is_err());
    }

    #[test]
    fn test_trailing_slash_has_no_subpath() {
        assert_eq!(
            Specifier::parse("alpha/").unwrap(),
            Specifier::Package {
                name: "alpha".to_string(),
                subpath: None,
            }
        );
    }
}
