use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_default_from_null;

/// A catalog entry as returned by `GET /Books` and `GET /Book`.
///
/// Missing or null text fields deserialize to empty strings, and an
/// unreadable publish date to `None`, so that contract checks can report
/// them instead of failing the whole payload.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Book {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub isbn: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub title: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub sub_title: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub author: String,
    #[serde(rename = "publish_date", deserialize_with = "deserialize_publish_date")]
    pub publish_date: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub publisher: String,
    pub pages: Option<u32>,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub description: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub website: String,
}

/// Accepts RFC 3339, a date-time without offset (read as UTC) or a bare
/// date. Anything else becomes `None`.
fn deserialize_publish_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(serde_json::Value::as_str).and_then(parse_publish_date))
}

fn parse_publish_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

impl Book {
    /// Names of the fields that would make this entry an incomplete
    /// catalog listing: blank text, missing or zero page count, or no
    /// publish date.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let text_fields = [
            ("isbn", &self.isbn),
            ("title", &self.title),
            ("subTitle", &self.sub_title),
            ("author", &self.author),
            ("publisher", &self.publisher),
            ("description", &self.description),
            ("website", &self.website),
        ];
        let mut missing: Vec<&'static str> = text_fields
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect();
        if !matches!(self.pages, Some(pages) if pages > 0) {
            missing.push("pages");
        }
        if self.publish_date.is_none() {
            missing.push("publish_date");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Body of `GET /Books`, in server order.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct BookList {
    #[serde(default)]
    pub books: Vec<Book>,
}

impl BookList {
    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Book> {
        self.books.iter()
    }
}

impl IntoIterator for BookList {
    type Item = Book;
    type IntoIter = std::vec::IntoIter<Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.books.into_iter()
    }
}
