//! Argos location quality
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("non supported quality code \"{0}\"")]
    UnsupportedCode(String),
    #[error("invalid quality \"{0}\"")]
    InvalidQuality(String),
    #[error("quality {0} is out of the 0..=3 range")]
    OutOfRange(u8),
}

/// Argos location class.
/// Lower is better: 0 is the most accurate class, 3 the least.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u8);

impl Quality {
    /// Worst location class we support
    pub const MAX: u8 = 3;

    /// Builds a [Quality] from an ordinal in 0..=3
    pub fn new(ordinal: u8) -> Result<Self, Error> {
        if ordinal > Self::MAX {
            Err(Error::OutOfRange(ordinal))
        } else {
            Ok(Self(ordinal))
        }
    }

    /// Returns ordinal value
    pub fn ordinal(&self) -> u8 {
        self.0
    }
}

impl std::str::FromStr for Quality {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let c = s.trim();
        match c {
            // Argos classes without a usable location
            "A" | "B" | "G" | "Z" => Err(Error::UnsupportedCode(c.to_string())),
            _ => {
                let ordinal = c
                    .parse::<u8>()
                    .map_err(|_| Error::InvalidQuality(c.to_string()))?;
                Self::new(ordinal)
            },
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Quality> for u8 {
    fn from(q: Quality) -> u8 {
        q.0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::str::FromStr;
    #[test]
    fn parsing() {
        for (desc, expected) in [("0", 0), ("1", 1), (" 2 ", 2), ("3", 3)] {
            let q = Quality::from_str(desc).unwrap();
            assert_eq!(q.ordinal(), expected);
        }
        for code in ["A", "B", "G", "Z"] {
            assert_eq!(
                Quality::from_str(code),
                Err(Error::UnsupportedCode(code.to_string()))
            );
        }
        assert_eq!(Quality::from_str("4"), Err(Error::OutOfRange(4)));
        assert!(Quality::from_str("").is_err());
        assert!(Quality::from_str("-1").is_err());
    }
    #[test]
    fn ordering() {
        let best = Quality::new(0).unwrap();
        let worst = Quality::new(3).unwrap();
        assert!(best < worst);
        assert_eq!(worst.to_string(), "3");
    }
}
