use once_cell::sync::Lazy;

use crate::domain::errors::DomainError;

/// Magic-number prefixes that identify one accepted content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSignature {
    content_type: String,
    magic: Vec<Vec<u8>>,
}

impl ContentSignature {
    pub fn new(content_type: impl Into<String>, magic: Vec<Vec<u8>>) -> Result<Self, DomainError> {
        let content_type = content_type.into();

        if content_type.trim().is_empty() {
            return Err(DomainError::InvalidSignature {
                content_type,
                reason: "content type cannot be empty".to_string(),
            });
        }

        if magic.is_empty() {
            return Err(DomainError::InvalidSignature {
                content_type,
                reason: "at least one magic prefix is required".to_string(),
            });
        }

        // An empty prefix would match every input
        if magic.iter().any(|prefix| prefix.is_empty()) {
            return Err(DomainError::InvalidSignature {
                content_type,
                reason: "magic prefixes cannot be empty".to_string(),
            });
        }

        Ok(Self {
            content_type,
            magic,
        })
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn magic(&self) -> &[Vec<u8>] {
        &self.magic
    }

    /// True when `data` starts with any of the magic prefixes
    pub fn matches(&self, data: &[u8]) -> bool {
        self.magic.iter().any(|prefix| data.starts_with(prefix))
    }
}

static BUILTIN_SIGNATURES: Lazy<SignatureTable> = Lazy::new(|| SignatureTable {
    entries: vec![
        ContentSignature {
            content_type: "image/jpeg".to_string(),
            magic: vec![vec![0xFF, 0xD8, 0xFF]],
        },
        ContentSignature {
            content_type: "image/png".to_string(),
            magic: vec![b"\x89PNG\r\n\x1a\n".to_vec()],
        },
        ContentSignature {
            content_type: "application/pdf".to_string(),
            magic: vec![b"%PDF".to_vec()],
        },
    ],
});

/// Ordered table of accepted content types. Sniffing walks the table in
/// order and the first matching entry wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureTable {
    entries: Vec<ContentSignature>,
}

impl SignatureTable {
    pub fn new(entries: Vec<ContentSignature>) -> Result<Self, DomainError> {
        if entries.is_empty() {
            return Err(DomainError::InvalidSignature {
                content_type: String::new(),
                reason: "signature table cannot be empty".to_string(),
            });
        }

        for (i, entry) in entries.iter().enumerate() {
            if entries[..i]
                .iter()
                .any(|earlier| earlier.content_type == entry.content_type)
            {
                return Err(DomainError::InvalidSignature {
                    content_type: entry.content_type.clone(),
                    reason: "duplicate content type".to_string(),
                });
            }
        }

        Ok(Self { entries })
    }

    /// JPEG, PNG and PDF
    pub fn builtin() -> Self {
        BUILTIN_SIGNATURES.clone()
    }

    pub fn entries(&self) -> &[ContentSignature] {
        &self.entries
    }

    /// Detect the content type from the leading bytes of `data`
    pub fn sniff(&self, data: &[u8]) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.matches(data))
            .map(ContentSignature::content_type)
    }
}

impl Default for SignatureTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sniffs_known_types() {
        let table = SignatureTable::builtin();

        assert_eq!(table.sniff(b"\xff\xd8\xff\xe0rest"), Some("image/jpeg"));
        assert_eq!(table.sniff(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"), Some("image/png"));
        assert_eq!(table.sniff(b"%PDF-1.7\n"), Some("application/pdf"));
    }

    #[test]
    fn test_sniff_rejects_unknown_and_short_input() {
        let table = SignatureTable::builtin();

        assert_eq!(table.sniff(b"fake content"), None);
        assert_eq!(table.sniff(b""), None);
        // Truncated PNG header
        assert_eq!(table.sniff(b"\x89PNG"), None);
        // Signature must be at the start, not anywhere in the data
        assert_eq!(table.sniff(b"xx%PDF"), None);
    }

    #[test]
    fn test_sniff_first_match_wins() {
        let table = SignatureTable::new(vec![
            ContentSignature::new("application/x-first", vec![b"AB".to_vec()]).unwrap(),
            ContentSignature::new("application/x-second", vec![b"ABC".to_vec()]).unwrap(),
        ])
        .unwrap();

        assert_eq!(table.sniff(b"ABCD"), Some("application/x-first"));
    }

    #[test]
    fn test_signature_with_multiple_prefixes() {
        let sig = ContentSignature::new(
            "image/gif",
            vec![b"GIF87a".to_vec(), b"GIF89a".to_vec()],
        )
        .unwrap();

        assert!(sig.matches(b"GIF87a..."));
        assert!(sig.matches(b"GIF89a..."));
        assert!(!sig.matches(b"GIF90a..."));
    }

    #[test]
    fn test_signature_rejects_empty_prefix() {
        let err = ContentSignature::new("image/png", vec![Vec::new()]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidSignature { .. }));

        let err = ContentSignature::new("image/png", Vec::new()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidSignature { .. }));

        let err = ContentSignature::new(" ", vec![b"x".to_vec()]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidSignature { .. }));
    }

    #[test]
    fn test_table_rejects_duplicates_and_empty() {
        let sig = ContentSignature::new("image/png", vec![b"PNG".to_vec()]).unwrap();
        let err = SignatureTable::new(vec![sig.clone(), sig]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidSignature { .. }));

        assert!(SignatureTable::new(Vec::new()).is_err());
    }
}
