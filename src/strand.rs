//! Strand orientation for genomic features.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;

/// Strand orientation of a genomic feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Strand {
    #[serde(rename = "+")]
    Forward,
    #[serde(rename = "-")]
    Reverse,
}

impl Strand {
    #[must_use]
    pub fn is_reverse(self) -> bool {
        self == Self::Reverse
    }
}

impl FromStr for Strand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Self::Forward),
            "-" => Ok(Self::Reverse),
            _ => Err(Error::Parse(format!("invalid strand: '{s}'"))),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => write!(f, "+"),
            Self::Reverse => write!(f, "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_symbols() {
        assert_eq!("+".parse::<Strand>().unwrap(), Strand::Forward);
        assert_eq!("-".parse::<Strand>().unwrap(), Strand::Reverse);
        assert!(".".parse::<Strand>().is_err());
    }

    #[test]
    fn display_matches_parse() {
        for strand in [Strand::Forward, Strand::Reverse] {
            assert_eq!(strand.to_string().parse::<Strand>().unwrap(), strand);
        }
    }

    #[test]
    fn is_reverse() {
        assert!(!Strand::Forward.is_reverse());
        assert!(Strand::Reverse.is_reverse());
    }

    #[test]
    fn deserialize_from_json() {
        let strands: Vec<Strand> = serde_json::from_str(r#"["+", "-"]"#).unwrap();
        assert_eq!(strands, vec![Strand::Forward, Strand::Reverse]);
    }
}
