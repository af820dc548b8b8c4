// src/version.rs

//! Dotted version parsing and ordering
//!
//! ncurses tools report versions such as `6.4.20230520`. Comparison is
//! lexicographic over the numeric components, so the ordering matches
//! comparing components as integers left to right.

use crate::error::{Error, Result};
use std::fmt;

/// An ordered sequence of numeric version components
///
/// Ordering is inherited from `Vec<u64>`: components are compared left to
/// right, and a sequence that is a strict prefix of another compares less
/// than it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionKey(Vec<u64>);

impl VersionKey {
    /// Parse a dotted version string of the form `N(.N)*`
    pub fn parse(s: &str) -> Result<Self> {
        let components = s
            .split('.')
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|_| Error::InvalidVersion(s.to_string()))
            })
            .collect::<Result<Vec<u64>>>()?;
        Ok(Self(components))
    }

    pub fn components(&self) -> &[u64] {
        &self.0
    }
}

impl fmt::Display for VersionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut components = self.0.iter();
        if let Some(first) = components.next() {
            write!(f, "{first}")?;
        }
        for component in components {
            write!(f, ".{component}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let key = VersionKey::parse("6.4.20230520").unwrap();
        assert_eq!(key.components(), &[6, 4, 20230520]);
    }

    #[test]
    fn test_parse_single_component() {
        let key = VersionKey::parse("7").unwrap();
        assert_eq!(key.components(), &[7]);
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!(VersionKey::parse("6.4a").is_err());
        assert!(VersionKey::parse("").is_err());
        assert!(VersionKey::parse("6..4").is_err());
    }

    #[test]
    fn test_equal_length_ordering_is_integer_wise() {
        let older = VersionKey::parse("6.2").unwrap();
        let newer = VersionKey::parse("6.10").unwrap();
        assert!(newer > older); // 10 > 2 numerically, not lexically

        let a = VersionKey::parse("6.2").unwrap();
        let b = VersionKey::parse("5.9").unwrap();
        assert!(a > b);
    }

    #[test]
    fn test_prefix_compares_less() {
        let short = VersionKey::parse("6.2").unwrap();
        let long = VersionKey::parse("6.2.0").unwrap();
        assert!(short < long);
    }

    #[test]
    fn test_leading_component_dominates() {
        let a = VersionKey::parse("6.2").unwrap();
        let b = VersionKey::parse("6.1.9").unwrap();
        assert!(a > b);
    }

    #[test]
    fn test_display_round_trip() {
        let key = VersionKey::parse("6.4.20230520").unwrap();
        assert_eq!(key.to_string(), "6.4.20230520");
    }
}
