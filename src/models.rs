use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_CHARGE: u8 = 0;
pub const MAX_CHARGE: u8 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub author: String,
    pub subject: Option<String>,
    pub text: String,
    pub charge: u8,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Message {
    pub fn is_locked(&self) -> bool {
        self.charge > MIN_CHARGE
    }
}

/// Clamps a signed charge value into `[MIN_CHARGE, MAX_CHARGE]`.
pub fn clamp_charge(charge: i64) -> u8 {
    charge.clamp(i64::from(MIN_CHARGE), i64::from(MAX_CHARGE)) as u8
}

/// Wire format for timestamps: ISO-8601 with second precision, `Z` suffix.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

    pub fn format(value: &DateTime<Utc>) -> String {
        value.format(FORMAT).to_string()
    }

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}
