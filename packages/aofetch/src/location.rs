//! Location parsing: `"<processId>/<route...>"` into a validated target.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Required length of a process identifier, in characters.
pub const PROCESS_ID_LENGTH: usize = 43;

/// The addressable identity of a remote process.
///
/// Opaque beyond its length; no further format is checked at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(String);

impl ProcessId {
    /// Validates the 43-character precondition, failing fast with
    /// [`Error::InvalidProcessId`] otherwise.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let length = s.chars().count();
        if length != PROCESS_ID_LENGTH {
            return Err(Error::InvalidProcessId { length });
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProcessId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A parsed call target: process id plus normalized route.
///
/// The route always begins with a single `/`. An empty remainder normalizes
/// to `"/"` (the remote process dispatches on route string equality, so the
/// empty string would never match), and redundant leading slashes collapse
/// to one. Interior slashes are preserved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
    pub process: ProcessId,
    pub route: String,
}

impl Location {
    /// Splits `"<processId>/<route...>"` at the first `/`.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let (pid, remainder) = match s.split_once('/') {
            Some((pid, remainder)) => (pid, remainder),
            None => (s, ""),
        };

        Ok(Self {
            process: ProcessId::parse(pid)?,
            route: normalize_route(remainder),
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.process, self.route)
    }
}

impl std::str::FromStr for Location {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn normalize_route(remainder: &str) -> String {
    format!("/{}", remainder.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PID: &str = "3GxCscS3FWn6MQ4RfCxHdIOknPXwX3_99XNUmDvtGYw";

    #[test]
    fn splits_process_and_route() {
        let location = Location::parse(&format!("{}/name/1", PID)).unwrap();
        assert_eq!(location.process.as_str(), PID);
        assert_eq!(location.route, "/name/1");
    }

    #[test]
    fn bare_process_id_routes_to_root() {
        let location = Location::parse(PID).unwrap();
        assert_eq!(location.route, "/");

        let trailing = Location::parse(&format!("{}/", PID)).unwrap();
        assert_eq!(trailing.route, "/");
    }

    #[test]
    fn redundant_leading_slashes_collapse() {
        let location = Location::parse(&format!("{}///name", PID)).unwrap();
        assert_eq!(location.route, "/name");
    }

    #[test]
    fn interior_slashes_are_preserved() {
        let location = Location::parse(&format!("{}/a/b//c", PID)).unwrap();
        assert_eq!(location.route, "/a/b//c");
    }

    #[test]
    fn short_process_id_is_rejected() {
        let err = Location::parse("tooshort/name").unwrap_err();
        assert!(matches!(err, Error::InvalidProcessId { length: 8 }));
    }

    #[test]
    fn long_process_id_is_rejected() {
        let pid = "x".repeat(44);
        let err = Location::parse(&pid).unwrap_err();
        assert!(matches!(err, Error::InvalidProcessId { length: 44 }));
    }

    #[test]
    fn length_is_counted_in_characters() {
        // 43 characters, more than 43 bytes.
        let pid: String = "é".repeat(43);
        assert!(ProcessId::parse(&pid).is_ok());
    }

    #[test]
    fn display_round_trips() {
        let text = format!("{}/name", PID);
        let location = Location::parse(&text).unwrap();
        assert_eq!(location.to_string(), text);
    }
}
