//! Defines [`ContentRecord`], the metadata for one authored item as supplied by
//! a [`crate::source::ContentSource`], and the [`Date`] type used to order
//! posts.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The kind of an authored item. Only posts take part in ordering, linking,
/// pagination and taxonomy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Post,
    Page,
}

/// One authored item. Bodies are never carried here; the record holds only
/// what is needed to decide which pages exist.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ContentRecord {
    /// The source location of the item, e.g. `pages/blog/hello/index.md`.
    /// Unique across all records.
    pub storage_path: String,

    #[serde(rename = "type")]
    pub kind: ContentType,

    /// Required for posts.
    #[serde(default)]
    pub date: Option<Date>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub categories: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl ContentRecord {
    /// Creates a post record with no title and no terms.
    pub fn post(storage_path: impl Into<String>, date: Date) -> ContentRecord {
        ContentRecord {
            storage_path: storage_path.into(),
            kind: ContentType::Post,
            date: Some(date),
            title: None,
            categories: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Creates a standalone page record.
    pub fn page(storage_path: impl Into<String>) -> ContentRecord {
        ContentRecord {
            storage_path: storage_path.into(),
            kind: ContentType::Page,
            date: None,
            title: None,
            categories: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> ContentRecord {
        self.title = Some(title.into());
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> ContentRecord
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> ContentRecord
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// A post timestamp. Accepts RFC 3339 timestamps, timestamps without an offset
/// (`2019-03-01T12:00:00`, taken to be UTC) and bare `YYYY-MM-DD` dates, which
/// are taken to be midnight UTC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date(pub DateTime<FixedOffset>);

impl Date {
    /// Midnight UTC on the given calendar day. Returns `None` for dates that
    /// don't exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Date> {
        NaiveDate::from_ymd_opt(year, month, day).map(Date::from_naive_date)
    }

    fn from_naive_date(date: NaiveDate) -> Date {
        Date::from_naive_datetime(date.and_time(NaiveTime::MIN))
    }

    fn from_naive_datetime(datetime: NaiveDateTime) -> Date {
        Date(datetime.and_utc().fixed_offset())
    }
}

impl std::str::FromStr for Date {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rfc_err = match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => return Ok(Date(dt)),
            Err(e) => e,
        };
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(datetime) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Date::from_naive_datetime(datetime));
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date::from_naive_date)
            .map_err(|_| rfc_err)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<Date>()
            .map_err(|e| D::Error::custom(format!("invalid date `{}`: {}", s, e)))
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
