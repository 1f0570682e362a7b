use std::{fmt, str::FromStr};

use bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Duration, OffsetDateTime};

/// Identity of a book: the document's native ObjectId, exposed as 24 hex chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(ObjectId);

impl BookId {
    /// Generate a fresh identity.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for BookId {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

/// Returned when a path parameter is not a valid [`BookId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid book id '{0}': expected a 24-character hex identifier")]
pub struct InvalidBookId(pub String);

impl FromStr for BookId {
    type Err = InvalidBookId;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(value)
            .map(Self)
            .map_err(|_| InvalidBookId(value.to_string()))
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for BookId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Domain model for the Books module, in its wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier for the book
    pub id: BookId,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Publication date as supplied by the client; not validated
    pub published_at: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Book {
    /// A new book stamped with `now` for both timestamps.
    pub fn new(request: CreateBook, now: OffsetDateTime) -> Self {
        Self {
            id: BookId::generate(),
            title: request.title,
            author: request.author,
            published_at: request.published_at,
            created_at: now,
            updated_at: now,
        }
    }

    /// Copy of this book with a new title and a refreshed `updated_at`.
    pub fn retitled(&self, title: String, now: OffsetDateTime) -> Self {
        Self {
            title,
            updated_at: next_update_stamp(self.updated_at, now),
            ..self.clone()
        }
    }
}

/// `updated_at` for a mutation happening at `now`.
///
/// Always strictly after `previous`, even when the clock has not advanced by
/// a full millisecond (the stored precision) or has gone backwards.
pub fn next_update_stamp(previous: OffsetDateTime, now: OffsetDateTime) -> OffsetDateTime {
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

/// Request model for creating a new book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBook {
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Publication date, free-form
    pub published_at: String,
}

/// Request model for updating a book. Only the title is mutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBookTitle {
    pub title: String,
}

/// `GET /books` response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct BookList {
    pub data: Vec<Book>,
}

/// Response body for mutations that return a book.
#[derive(Debug, Serialize, Deserialize)]
pub struct BookEnvelope {
    pub message: String,
    pub data: Book,
}

/// Response body for mutations without a payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Persisted shape of a book in the `books` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub author: String,
    pub published_at: String,
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl From<BookDocument> for Book {
    fn from(document: BookDocument) -> Self {
        Self {
            id: BookId(document.id),
            title: document.title,
            author: document.author,
            published_at: document.published_at,
            created_at: document.created_at.to_time_0_3(),
            updated_at: document.updated_at.to_time_0_3(),
        }
    }
}

impl From<&Book> for BookDocument {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.as_object_id(),
            title: book.title.clone(),
            author: book.author.clone(),
            published_at: book.published_at.clone(),
            created_at: bson::DateTime::from_time_0_3(book.created_at),
            updated_at: bson::DateTime::from_time_0_3(book.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    fn dune() -> CreateBook {
        CreateBook {
            title: "Dune".into(),
            author: "Herbert".into(),
            published_at: "1965".into(),
        }
    }

    #[test]
    fn book_id_accepts_only_object_id_hex() {
        let id: BookId = "65a1f0c2e4b0a1b2c3d4e5f6".parse().unwrap();
        assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");

        assert!("42".parse::<BookId>().is_err());
        assert!("not-an-id".parse::<BookId>().is_err());
        assert!("65a1f0c2e4b0a1b2c3d4e5fz".parse::<BookId>().is_err());
    }

    #[test]
    fn new_book_has_equal_timestamps() {
        let now = datetime!(2024-03-01 12:00:00.123 UTC);
        let book = Book::new(dune(), now);

        assert_eq!(book.created_at, now);
        assert_eq!(book.updated_at, now);
        assert_ne!(Book::new(dune(), now).id, book.id);
    }

    #[test]
    fn retitled_only_changes_title_and_stamp() {
        let created = datetime!(2024-03-01 12:00:00 UTC);
        let book = Book::new(dune(), created);

        let later = datetime!(2024-03-02 08:30:00 UTC);
        let updated = book.retitled("Dune Messiah".into(), later);

        assert_eq!(updated.id, book.id);
        assert_eq!(updated.title, "Dune Messiah");
        assert_eq!(updated.author, book.author);
        assert_eq!(updated.published_at, book.published_at);
        assert_eq!(updated.created_at, created);
        assert_eq!(updated.updated_at, later);
    }

    #[test]
    fn update_stamp_is_strictly_later_when_clock_stalls() {
        let previous = datetime!(2024-03-01 12:00:00.500 UTC);

        assert_eq!(
            next_update_stamp(previous, previous),
            datetime!(2024-03-01 12:00:00.501 UTC)
        );
        assert_eq!(
            next_update_stamp(previous, datetime!(2024-03-01 11:59:59 UTC)),
            datetime!(2024-03-01 12:00:00.501 UTC)
        );
    }

    #[test]
    fn wire_shape_uses_hex_id_and_rfc3339() {
        let book = Book {
            id: "65a1f0c2e4b0a1b2c3d4e5f6".parse().unwrap(),
            title: "Dune".into(),
            author: "Herbert".into(),
            published_at: "1965".into(),
            created_at: datetime!(2024-03-01 12:00:00 UTC),
            updated_at: datetime!(2024-03-01 12:00:00 UTC),
        };

        assert_eq!(
            serde_json::to_value(&book).unwrap(),
            json!({
                "id": "65a1f0c2e4b0a1b2c3d4e5f6",
                "title": "Dune",
                "author": "Herbert",
                "published_at": "1965",
                "created_at": "2024-03-01T12:00:00Z",
                "updated_at": "2024-03-01T12:00:00Z"
            })
        );
    }

    #[test]
    fn document_conversion_keeps_millisecond_timestamps() {
        let book = Book::new(dune(), datetime!(2024-03-01 12:00:00.250 UTC));
        let document = BookDocument::from(&book);

        assert_eq!(document.id, book.id.as_object_id());
        assert_eq!(
            document.created_at.timestamp_millis(),
            book.created_at.unix_timestamp() * 1000 + 250
        );
        assert_eq!(Book::from(document), book);
    }

    #[test]
    fn create_request_requires_every_field() {
        let missing = serde_json::from_value::<CreateBook>(json!({"title": "Dune"}));
        assert!(missing.is_err());

        let wrong_type = serde_json::from_value::<UpdateBookTitle>(json!({"title": 7}));
        assert!(wrong_type.is_err());
    }
}
