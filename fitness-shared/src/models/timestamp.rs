use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use yew::{Html, ToHtml, html};

const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A point in time as reported by the activity service.
///
/// The backend emits zone-less local date-times (`2025-03-08T14:30:00.123`);
/// RFC 3339 values with an offset are accepted as well and normalised to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub NaiveDateTime);

impl Timestamp {
    /// Parses either wire representation.
    ///
    /// # Errors
    /// Returns the underlying [`chrono::ParseError`] when neither format matches.
    pub fn parse(value: &str) -> Result<Self, chrono::ParseError> {
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(value) {
            return Ok(Self(with_offset.naive_utc()));
        }
        NaiveDateTime::parse_from_str(value, WIRE_FORMAT).map(Self)
    }

    /// Calendar date, e.g. `Mar 8, 2025`.
    #[must_use]
    pub fn date_label(&self) -> String {
        self.0.format("%b %-d, %Y").to_string()
    }

    /// Wall-clock time, e.g. `02:30 PM`.
    #[must_use]
    pub fn time_label(&self) -> String {
        self.0.format("%I:%M %p").to_string()
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.format(WIRE_FORMAT).to_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl ToHtml for Timestamp {
    fn to_html(&self) -> Html {
        html! { self.date_label() }
    }
}
