use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A macOS release, compared numerically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MacosVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

/// Release names accepted in place of a version number.
const RELEASES: &[(&str, u32)] = &[
    ("big_sur", 11),
    ("monterey", 12),
    ("ventura", 13),
    ("sonoma", 14),
    ("sequoia", 15),
    ("tahoe", 26),
];

impl MacosVersion {
    pub const MONTEREY: Self = Self::new(12, 0, 0);
    /// First release that ships the modern login-item utility.
    pub const SONOMA: Self = Self::new(14, 0, 0);

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    /// Marketing name of the major release, if known.
    pub fn codename(&self) -> Option<&'static str> {
        RELEASES
            .iter()
            .find(|&&(_, major)| major == self.major)
            .map(|&(name, _)| name)
    }
}

impl fmt::Display for MacosVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.patch != 0 {
            write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
        } else {
            write!(f, "{}.{}", self.major, self.minor)
        }
    }
}

impl FromStr for MacosVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let key = s.to_ascii_lowercase().replace([' ', '-'], "_");
        if let Some(&(_, major)) = RELEASES.iter().find(|&&(name, _)| name == key) {
            return Ok(Self::new(major, 0, 0));
        }

        let mut parts = s.split('.');
        let mut next = |required: bool| -> Result<u32, String> {
            match parts.next() {
                Some(p) => p
                    .parse::<u32>()
                    .map_err(|_| format!("Invalid macOS version: {s}")),
                None if required => Err(format!("Invalid macOS version: {s}")),
                None => Ok(0),
            }
        };
        let major = next(true)?;
        let minor = next(false)?;
        let patch = next(false)?;
        if parts.next().is_some() {
            return Err(format!("Invalid macOS version: {s}"));
        }
        Ok(Self::new(major, minor, patch))
    }
}

impl TryFrom<String> for MacosVersion {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MacosVersion> for String {
    fn from(v: MacosVersion) -> Self {
        v.codename()
            .filter(|_| v.minor == 0 && v.patch == 0)
            .map_or_else(|| v.to_string(), str::to_string)
    }
}
