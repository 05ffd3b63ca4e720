//! Document content extraction
//!
//! Supplies the text context a scan hands to the verdict service. No OCR
//! pipeline exists yet; the simulated source stands in for one.

use crate::model::Document;

/// Source of extracted document text
pub trait ContextSource: Send + Sync {
    fn context_for(&self, document: &Document) -> String;
}

const VALID_LICENSE_TEXT: &str = "This document confirms the mining rights for Copper Ridge in region Katanga. Valid until 2025.";
const SUSPICIOUS_LETTER_TEXT: &str =
    "Bank Comfort Letter. Expiry date mismatch detected in metadata. Account holder mismatch.";

/// Canned extraction results for the demo documents.
///
/// Bank comfort letters (`bcl` in the file name) come back with mismatch
/// markers, everything else reads as a valid license.
#[derive(Debug, Clone, Default)]
pub struct SimulatedContextSource;

impl ContextSource for SimulatedContextSource {
    fn context_for(&self, document: &Document) -> String {
        if document.file_name.contains("bcl") {
            SUSPICIOUS_LETTER_TEXT.to_string()
        } else {
            VALID_LICENSE_TEXT.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bank_letter_is_suspicious() {
        let doc = Document::pending("doc2", "Global Tech", "Proof of Funds", "bcl_bank_letter.pdf");
        let context = SimulatedContextSource.context_for(&doc);
        assert!(context.contains("mismatch"));
    }

    #[test]
    fn test_license_is_valid() {
        let doc = Document::pending("doc1", "Copper Ridge", "Mining License", "license_scan_2024.pdf");
        let context = SimulatedContextSource.context_for(&doc);
        assert!(context.ends_with("Valid until 2025."));
        assert!(!context.contains("mismatch"));
    }
}
