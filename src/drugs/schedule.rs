use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use time::Time;

/// Current wire/storage format version of [`Schedule`].
const SCHEDULE_VERSION: u32 = 1;

fn default_version() -> u32 {
    SCHEDULE_VERSION
}

/// Intake schedule: an ordered list of times of day, versioned so the stored
/// representation can evolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default = "default_version")]
    pub version: u32,
    pub times: Vec<DoseTime>,
}

/// A single time of day, "HH:MM" on the wire, validated on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoseTime(pub Time);

impl DoseTime {
    fn parse(s: &str) -> Option<Self> {
        let (h, m) = s.split_once(':')?;
        if h.len() != 2 || m.len() != 2 {
            return None;
        }
        if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }
        let hour = h.parse::<u8>().ok()?;
        let minute = m.parse::<u8>().ok()?;
        Time::from_hms(hour, minute, 0).ok().map(DoseTime)
    }
}

impl fmt::Display for DoseTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0.hour(), self.0.minute())
    }
}

impl Serialize for DoseTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DoseTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        DoseTime::parse(&s).ok_or_else(|| {
            de::Error::custom(format!("invalid time of day {s:?}, expected \"HH:MM\""))
        })
    }
}
