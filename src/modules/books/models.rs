use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use time::OffsetDateTime;

/// Keys owned by the service; clients can never set them.
pub const RESERVED_FIELDS: &[&str] = &["id", "finished", "insertedAt", "updatedAt"];

/// A stored book record.
///
/// Typed fields cover what the service reasons about; anything else the
/// client sent is kept in `extra` and written back inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier, assigned at creation
    pub id: String,
    /// Title of the book
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default)]
    pub page_count: u32,
    #[serde(default)]
    pub read_page: u32,
    /// True iff `read_page == page_count`
    #[serde(default)]
    pub finished: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub inserted_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Book {
    /// Build a new record from a validated payload.
    pub fn create(id: String, payload: BookPayload, now: OffsetDateTime) -> Self {
        let page_count = payload.page_count.unwrap_or_default();
        let read_page = payload.read_page.unwrap_or_default();

        Self {
            id,
            name: payload.name.flatten().unwrap_or_default(),
            publisher: payload.publisher.flatten(),
            page_count,
            read_page,
            finished: page_count == read_page,
            inserted_at: now,
            updated_at: now,
            extra: payload.extra,
        }
    }

    /// Shallow-merge a payload over this record.
    ///
    /// `id` and `inserted_at` never change; `finished` and `updated_at` are recomputed.
    /// An explicit `null` publisher clears it.
    pub fn apply(&mut self, payload: BookPayload, now: OffsetDateTime) {
        if let Some(name) = payload.name {
            self.name = name.unwrap_or_default();
        }
        if let Some(publisher) = payload.publisher {
            self.publisher = publisher;
        }
        if let Some(page_count) = payload.page_count {
            self.page_count = page_count;
        }
        if let Some(read_page) = payload.read_page {
            self.read_page = read_page;
        }
        self.extra.extend(payload.extra);

        self.finished = self.page_count == self.read_page;
        self.updated_at = now;
    }

    pub fn summary(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            publisher: self.publisher.clone(),
        }
    }
}

/// Request body accepted by create and update.
///
/// `name` and `publisher` tell an absent key (`None`) apart from an explicit
/// `null` (`Some(None)`). The counters have no `null` form and reject it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub publisher: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub page_count: Option<u32>,
    #[serde(default, deserialize_with = "present")]
    pub read_page: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BookPayload {
    /// Drop client-supplied values for service-owned keys.
    pub fn without_reserved(mut self) -> Self {
        self.extra
            .retain(|key, _| !RESERVED_FIELDS.contains(&key.as_str()));
        self
    }

    /// The name the payload sets, if it sets a non-null one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_ref().and_then(Option::as_deref)
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Reduced projection returned by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BooksData {
    pub books: Vec<BookSummary>,
}

#[derive(Debug, Serialize)]
pub struct BookData {
    pub book: Book,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookIdData {
    pub book_id: String,
}
