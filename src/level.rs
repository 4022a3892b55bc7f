use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Severity of a log record, from most to least important.
///
/// The ordinal values are part of the public contract: a smaller ordinal
/// means a more important record. Admission is always decided through
/// [`Severity::admits`], which compares ranks explicitly rather than relying
/// on a derived ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Severity {
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Verbose = 5,
}

impl Severity {
    /// All severities, most important first.
    pub const ALL: [Severity; 5] = [
        Severity::Error,
        Severity::Warn,
        Severity::Info,
        Severity::Debug,
        Severity::Verbose,
    ];

    /// Rank of this severity (`Error = 1` .. `Verbose = 5`).
    #[inline(always)]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Returns true if a logger whose minimum level is `self` admits a record
    /// of severity `record`.
    ///
    /// A record is admitted iff its rank is less than or equal to the
    /// threshold rank, so `Error` passes every threshold and `Verbose` only
    /// passes the most permissive one.
    #[inline(always)]
    pub const fn admits(self, record: Severity) -> bool {
        record.ordinal() <= self.ordinal()
    }

    /// The fixed five byte tag written in front of each record payload.
    pub const fn tag(self) -> &'static [u8; 5] {
        match self {
            Severity::Error => b"[E]: ",
            Severity::Warn => b"[W]: ",
            Severity::Info => b"[I]: ",
            Severity::Debug => b"[D]: ",
            Severity::Verbose => b"[V]: ",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warn => "warn",
            Severity::Info => "info",
            Severity::Debug => "debug",
            Severity::Verbose => "verbose",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for Severity {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        match value {
            1 => Ok(Severity::Error),
            2 => Ok(Severity::Warn),
            3 => Ok(Severity::Info),
            4 => Ok(Severity::Debug),
            5 => Ok(Severity::Verbose),
            _ => Err(Error::InvalidInput("severity ordinal must be in 1..=5")),
        }
    }
}

impl FromStr for Severity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" | "e" => Ok(Severity::Error),
            "warn" | "warning" | "w" => Ok(Severity::Warn),
            "info" | "i" => Ok(Severity::Info),
            "debug" | "d" => Ok(Severity::Debug),
            "verbose" | "v" => Ok(Severity::Verbose),
            _ => Err(Error::InvalidInput("unknown severity name")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinals_match_contract() {
        let ordinals: Vec<u8> = Severity::ALL.iter().map(|s| s.ordinal()).collect();
        assert_eq!(ordinals, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_admission_with_info_threshold() {
        let threshold = Severity::Info;
        assert!(threshold.admits(Severity::Error));
        assert!(threshold.admits(Severity::Warn));
        assert!(threshold.admits(Severity::Info));
        assert!(!threshold.admits(Severity::Debug));
        assert!(!threshold.admits(Severity::Verbose));
    }

    #[test]
    fn test_error_passes_every_threshold() {
        for threshold in Severity::ALL {
            assert!(threshold.admits(Severity::Error), "{} should admit error", threshold);
        }
        assert!(!Severity::Debug.admits(Severity::Verbose));
        assert!(Severity::Verbose.admits(Severity::Verbose));
    }

    #[test]
    fn test_tags_are_five_bytes() {
        for severity in Severity::ALL {
            let tag = severity.tag();
            assert_eq!(tag.len(), 5);
            assert_eq!(&tag[3..], b": ");
        }
        assert_eq!(Severity::Debug.tag(), b"[D]: ");
    }

    #[test]
    fn test_parse_names_and_ordinals() {
        assert_eq!("WARNING".parse::<Severity>().unwrap(), Severity::Warn);
        assert_eq!(" verbose ".parse::<Severity>().unwrap(), Severity::Verbose);
        assert!("loud".parse::<Severity>().is_err());

        assert_eq!(Severity::try_from(3).unwrap(), Severity::Info);
        assert!(Severity::try_from(0).is_err());
        assert!(Severity::try_from(6).is_err());
    }
}
