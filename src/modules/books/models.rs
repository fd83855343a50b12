use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// A book record held by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Server-generated identifier, never changes
    pub id: String,
    pub name: String,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: u32,
    pub read_page: u32,
    /// `read_page == page_count` as of the last create or update
    pub finished: bool,
    pub reading: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub inserted_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Book {
    /// Build a new record stamped with `at` for both timestamps
    pub fn new(id: String, input: BookInput, at: OffsetDateTime) -> Self {
        let finished = input.is_finished();
        Self {
            id,
            name: input.name,
            year: input.year,
            author: input.author,
            summary: input.summary,
            publisher: input.publisher,
            page_count: input.page_count,
            read_page: input.read_page,
            finished,
            reading: input.reading,
            inserted_at: at,
            updated_at: at,
        }
    }

    /// Replace every mutable field with `input`.
    ///
    /// `updated_at` always moves forward, even if the clock reads the same
    /// instant as the previous write.
    pub fn apply(&mut self, input: BookInput, at: OffsetDateTime) {
        self.finished = input.is_finished();
        self.name = input.name;
        self.year = input.year;
        self.author = input.author;
        self.summary = input.summary;
        self.publisher = input.publisher;
        self.page_count = input.page_count;
        self.read_page = input.read_page;
        self.reading = input.reading;
        self.updated_at = at.max(self.updated_at + Duration::nanoseconds(1));
    }

    pub fn to_summary(&self) -> BookSummary {
        BookSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            publisher: self.publisher.clone(),
        }
    }
}

/// Projection returned by the list endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: String,
    pub name: String,
    pub publisher: String,
}

/// Validated create/update payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookInput {
    pub name: String,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: u32,
    pub read_page: u32,
    pub reading: bool,
}

impl BookInput {
    pub fn is_finished(&self) -> bool {
        self.read_page == self.page_count
    }
}

/// Filter applied by the list operation; `None` fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    pub reading: Option<bool>,
    pub finished: Option<bool>,
    /// Case-insensitive substring of the book name
    pub name: Option<String>,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        if self.reading.is_some_and(|reading| book.reading != reading) {
            return false;
        }
        if self.finished.is_some_and(|finished| book.finished != finished) {
            return false;
        }
        match &self.name {
            Some(needle) => book
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::input;
    use super::*;

    fn book(name: &str, page_count: u32, read_page: u32, reading: bool) -> Book {
        Book::new(
            "book-1".to_string(),
            input(name, page_count, read_page, reading),
            OffsetDateTime::now_utc(),
        )
    }

    #[test]
    fn finished_is_derived_from_pages() {
        assert!(book("Laskar Pelangi", 100, 100, false).finished);
        assert!(!book("Laskar Pelangi", 100, 25, true).finished);
    }

    #[test]
    fn apply_recomputes_finished_and_keeps_identity() {
        let mut record = book("Laskar Pelangi", 100, 25, true);
        let inserted_at = record.inserted_at;

        record.apply(input("Sang Pemimpi", 300, 300, false), inserted_at);

        assert_eq!(record.id, "book-1");
        assert_eq!(record.name, "Sang Pemimpi");
        assert!(record.finished);
        assert_eq!(record.inserted_at, inserted_at);
        assert!(record.updated_at > inserted_at);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(book("Laskar Pelangi", 100, 25, true)).unwrap();

        assert_eq!(value["pageCount"], 100);
        assert_eq!(value["readPage"], 25);
        assert!(value["insertedAt"].as_str().unwrap().ends_with('Z'));
        assert!(value.get("page_count").is_none());
    }

    #[test]
    fn filter_combines_conditions() {
        let record = book("Laskar Pelangi", 100, 25, true);

        assert!(BookFilter::default().matches(&record));
        assert!(BookFilter {
            name: Some("pelangi".to_string()),
            reading: Some(true),
            ..Default::default()
        }
        .matches(&record));
        assert!(!BookFilter {
            name: Some("pelangi".to_string()),
            finished: Some(true),
            ..Default::default()
        }
        .matches(&record));
        assert!(!BookFilter {
            name: Some("pemimpi".to_string()),
            ..Default::default()
        }
        .matches(&record));
    }
}
