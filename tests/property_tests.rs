//! Property-based tests using proptest
//!
//! These tests generate many random inputs to check properties that
//! should hold for every upload and every policy lookup.

use proptest::prelude::*;
use std::io::Cursor;
use std::path::PathBuf;
use tempfile::TempDir;
use tokio::runtime::Runtime;

use cover_vault::application::dto::CreateQuoteRequest;
use cover_vault::application::validation::validate_quote_request;
use cover_vault::domain::entities::Item;
use cover_vault::domain::value_objects::{ExtensionTable, SignatureTable, UploadPolicy};
use cover_vault::infrastructure::storage::{BoundedRead, SecureFileStore};
use cover_vault::ports::{CoverStore, UploadErrorKind};

const CEILING: u64 = 512;

/// Accepted payloads: one of the built-in signatures plus arbitrary bytes
fn accepted_payload() -> impl Strategy<Value = (Vec<u8>, &'static str)> {
    let magic = prop_oneof![
        Just((b"\xff\xd8\xff".to_vec(), ".jpg")),
        Just((b"\x89PNG\r\n\x1a\n".to_vec(), ".png")),
        Just((b"%PDF".to_vec(), ".pdf")),
    ];
    (magic, prop::collection::vec(any::<u8>(), 0..256)).prop_map(|((mut data, ext), rest)| {
        data.extend(rest);
        (data, ext)
    })
}

/// Payloads that start with none of the built-in signatures
fn rejected_payload() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256)
        .prop_filter("must not match a signature", |data| {
            SignatureTable::builtin().sniff(data).is_none()
        })
}

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

fn store_in_temp() -> (TempDir, PathBuf, SecureFileStore) {
    let temp = TempDir::new().unwrap();
    let root = temp.path().canonicalize().unwrap();
    let policy = UploadPolicy::default().with_max_size(CEILING).unwrap();
    let store = SecureFileStore::new(root.clone(), policy);
    (temp, root, store)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_oversize_is_always_rejected(extra in 1usize..1024, fill in any::<u8>()) {
        let (_temp, root, store) = store_in_temp();
        let mut data = b"%PDF".to_vec();
        data.resize(CEILING as usize + extra, fill);

        let err = runtime()
            .block_on(store.store(Box::pin(Cursor::new(data))))
            .unwrap_err();

        prop_assert_eq!(err.kind(), UploadErrorKind::FileTooLarge);
        prop_assert_eq!(std::fs::read_dir(&root).unwrap().count(), 0);
    }

    #[test]
    fn prop_unknown_signatures_are_rejected(data in rejected_payload()) {
        let (_temp, root, store) = store_in_temp();

        let err = runtime()
            .block_on(store.store(Box::pin(Cursor::new(data))))
            .unwrap_err();

        prop_assert_eq!(err.kind(), UploadErrorKind::InvalidFileType);
        prop_assert_eq!(std::fs::read_dir(&root).unwrap().count(), 0);
    }

    #[test]
    fn prop_accepted_files_are_children_with_table_extension((data, ext) in accepted_payload()) {
        let (_temp, root, store) = store_in_temp();

        let stored = runtime()
            .block_on(store.store(Box::pin(Cursor::new(data.clone()))))
            .unwrap();

        prop_assert_eq!(stored.extension(), ext);
        prop_assert!(stored.file_name().ends_with(ext));
        prop_assert_eq!(stored.path().parent(), Some(root.as_path()));
        prop_assert_eq!(std::fs::read(stored.path()).unwrap(), data);
    }

    #[test]
    fn prop_bounded_read_never_exceeds_limit(len in 0usize..2048, limit in 1u64..1024) {
        let data = vec![7u8; len];
        let result = runtime().block_on(BoundedRead::read_to_limit(
            Box::pin(Cursor::new(data)),
            limit,
        ));

        if len as u64 > limit {
            prop_assert_eq!(result.unwrap_err().kind(), UploadErrorKind::FileTooLarge);
        } else {
            prop_assert_eq!(result.unwrap().len(), len);
        }
    }

    #[test]
    fn prop_unknown_types_fall_back_to_bin(content_type in "[a-z]{1,10}/[a-z0-9.+-]{1,20}") {
        let table = ExtensionTable::builtin();
        let ext = table.extension_for(&content_type);

        prop_assert!(ext.starts_with('.'));
        prop_assert!(!ext.contains('/'));
        if !["image/jpeg", "image/png", "application/pdf"].contains(&content_type.as_str()) {
            prop_assert_eq!(ext, ".bin");
        }
    }

    #[test]
    fn prop_item_names_respect_length(name in "\\PC{0,150}") {
        let chars = name.chars().count();
        let valid = !name.trim().is_empty() && chars <= 100;
        prop_assert_eq!(Item::validate_name(&name).is_ok(), valid);
    }

    #[test]
    fn prop_quotes_are_trimmed(
        text in "[a-zA-Z ]{0,20}",
        author in "[a-zA-Z]{1,20}",
        book in "[a-zA-Z]{1,20}",
    ) {
        let request = CreateQuoteRequest {
            text: format!("  {}  ", text),
            author: author.clone(),
            book,
        };

        match validate_quote_request(request) {
            Ok(quote) => {
                prop_assert_eq!(quote.text(), text.trim());
                prop_assert_eq!(quote.author(), author.as_str());
            }
            Err(_) => prop_assert!(text.trim().is_empty()),
        }
    }
}
