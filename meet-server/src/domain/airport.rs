//! Airport code types.

use std::fmt;

/// Error returned when parsing an invalid IATA code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid IATA code: {reason}")]
pub struct InvalidIata {
    reason: &'static str,
}

/// A valid 3-letter IATA airport code.
///
/// IATA location codes are always 3 uppercase ASCII letters. This type
/// guarantees that any `Iata` value is valid by construction.
///
/// # Examples
///
/// ```
/// use meet_server::domain::Iata;
///
/// let lhr = Iata::parse("LHR").unwrap();
/// assert_eq!(lhr.as_str(), "LHR");
///
/// // Lowercase is rejected
/// assert!(Iata::parse("lhr").is_err());
///
/// // Wrong length is rejected
/// assert!(Iata::parse("LH").is_err());
/// assert!(Iata::parse("LHRX").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Iata([u8; 3]);

impl Iata {
    /// Parse an IATA code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidIata> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidIata {
                reason: "must be exactly 3 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() {
                return Err(InvalidIata {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }

        Ok(Iata([bytes[0], bytes[1], bytes[2]]))
    }

    /// Parse an IATA code leniently: surrounding whitespace is trimmed and
    /// lowercase letters are accepted.
    ///
    /// Useful at the web boundary, where user input arrives in mixed case.
    ///
    /// ```
    /// use meet_server::domain::Iata;
    ///
    /// assert_eq!(Iata::parse_normalized(" jfk ").unwrap().as_str(), "JFK");
    /// ```
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidIata> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store valid ASCII uppercase letters
        std::str::from_utf8(&self.0).unwrap()
    }
}

impl fmt::Debug for Iata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Iata({})", self.as_str())
    }
}

impl fmt::Display for Iata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
