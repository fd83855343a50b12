//! Client-facing text (Indonesian) for every catalog outcome, keyed by
//! operation and error kind.

use super::error::CatalogError;
use super::schema::{BookField, FieldType};

/// Catalog operation a message is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Add,
    List,
    Show,
    Update,
    Delete,
}

impl Action {
    /// Leading clause of validation failures
    fn failure_prefix(self) -> &'static str {
        match self {
            Action::Add => "Gagal menambahkan buku",
            Action::Update => "Gagal memperbarui buku",
            Action::List | Action::Show => "Gagal menampilkan buku",
            Action::Delete => "Gagal menghapus buku",
        }
    }

    pub fn success(self) -> &'static str {
        match self {
            Action::Add => "Buku berhasil ditambahkan",
            Action::Update => "Buku berhasil diperbarui",
            Action::Delete => "Buku berhasil dihapus",
            Action::List | Action::Show => "Buku berhasil ditampilkan",
        }
    }

    fn not_found(self) -> &'static str {
        match self {
            Action::Update => "Gagal memperbarui buku. Id tidak ditemukan",
            Action::Delete => "Buku gagal dihapus. Id tidak ditemukan",
            Action::Add | Action::List | Action::Show => "Buku tidak ditemukan",
        }
    }

    /// Generic text for unclassified failures
    fn internal(self) -> &'static str {
        match self {
            Action::Add => "Buku gagal ditambahkan",
            Action::List | Action::Show => "Buku gagal ditampilkan",
            Action::Update => "Buku gagal diperbarui",
            Action::Delete => "Buku gagal dihapus",
        }
    }
}

fn field_label(field: BookField) -> &'static str {
    match field {
        BookField::Name => "nama",
        BookField::Year => "tahun",
        BookField::Author => "penulis",
        BookField::Summary => "ringkasan",
        BookField::Publisher => "penerbit",
        BookField::PageCount => "jumlah halaman",
        BookField::ReadPage => "halaman dibaca",
        BookField::Reading => "status membaca",
    }
}

fn type_label(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Text => "teks",
        FieldType::Integer => "bilangan bulat",
        FieldType::NonNegativeInteger => "bilangan bulat non-negatif",
        FieldType::Boolean => "boolean",
    }
}

/// Render the client-facing message for `error` raised during `action`
pub fn describe(action: Action, error: &CatalogError) -> String {
    let prefix = action.failure_prefix();
    match error {
        CatalogError::MissingField(field) => {
            format!("{}. Mohon isi {} buku", prefix, field_label(*field))
        }
        CatalogError::TypeMismatch { field, expected } => format!(
            "{}. {} buku harus berupa {}",
            prefix,
            field_label(*field),
            type_label(*expected)
        ),
        CatalogError::InvalidRange { .. } => format!(
            "{}. readPage tidak boleh lebih besar dari pageCount",
            prefix
        ),
        CatalogError::InvalidPayload(_) => {
            format!("{}. Data buku harus berupa objek JSON", prefix)
        }
        CatalogError::InvalidQuery { param, .. } => {
            format!("{}. Nilai parameter {} tidak valid", prefix, param)
        }
        CatalogError::MalformedQuery(_) => format!("{}. Parameter query tidak valid", prefix),
        CatalogError::NotFound(_) => action.not_found().to_string(),
        CatalogError::Internal(_) => action.internal().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_uses_localized_label() {
        let error = CatalogError::MissingField(BookField::Name);

        assert_eq!(
            describe(Action::Add, &error),
            "Gagal menambahkan buku. Mohon isi nama buku"
        );
        assert_eq!(
            describe(Action::Update, &error),
            "Gagal memperbarui buku. Mohon isi nama buku"
        );
    }

    #[test]
    fn range_and_type_messages_use_localized_labels() {
        let range = CatalogError::InvalidRange {
            read_page: 101,
            page_count: 100,
        };
        assert_eq!(
            describe(Action::Add, &range),
            "Gagal menambahkan buku. readPage tidak boleh lebih besar dari pageCount"
        );

        let mismatch = CatalogError::TypeMismatch {
            field: BookField::Year,
            expected: FieldType::Integer,
        };
        assert_eq!(
            describe(Action::Update, &mismatch),
            "Gagal memperbarui buku. tahun buku harus berupa bilangan bulat"
        );
    }

    #[test]
    fn malformed_query_is_reported_without_raw_text() {
        let error = CatalogError::MalformedQuery("duplicate field `name`".to_string());

        assert_eq!(
            describe(Action::List, &error),
            "Gagal menampilkan buku. Parameter query tidak valid"
        );
    }

    #[test]
    fn not_found_depends_on_action() {
        let error = CatalogError::NotFound("x".to_string());

        assert_eq!(describe(Action::Show, &error), "Buku tidak ditemukan");
        assert_eq!(
            describe(Action::Update, &error),
            "Gagal memperbarui buku. Id tidak ditemukan"
        );
        assert_eq!(
            describe(Action::Delete, &error),
            "Buku gagal dihapus. Id tidak ditemukan"
        );
    }

    #[test]
    fn internal_message_is_generic() {
        let error = CatalogError::Internal(anyhow::anyhow!("disk on fire"));
        let message = describe(Action::Add, &error);

        assert_eq!(message, "Buku gagal ditambahkan");
        assert!(!message.contains("disk"));
    }
}
