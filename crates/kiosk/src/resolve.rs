//! Turning a decoded frame into a catalogued title.

use crate::error::{ErrorKind, Result};
use crate::scan::ScannedCode;
use stacks_catalog::{Book, BookCache};
use stacks_metadata::error::ErrorKind as MetadataErrorKind;
use stacks_metadata::{MetadataProvider, is_valid_isbn, normalize, to_isbn13};
use tracing::instrument;

/// Whether a resolution came from the cache or cost a provider round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveEffort {
    Cached,
    Fetched,
}

/// A scanned code resolved to its catalogued title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub book: Book,
    /// `"<title> - <authors>"`, or the raw ISBN when metadata is absent.
    pub display_name: String,
    pub effort: ResolveEffort,
}

/// Resolve a scanned code to a canonical book record.
///
/// The provider is consulted only for codes never seen before: known aliases
/// and cached records short-circuit, and a syntactically valid barcode is
/// canonicalized to ISBN-13 locally before the cache is consulted, so the
/// same title scanned in ISBN-10 and ISBN-13 forms shares one record and one
/// fetch. On a successful fetch the provider's ISBN-13 is authoritative; the
/// scanned form is registered as an alias when it differs (QR payloads,
/// ISBN-10 barcodes), so re-scanning the same label never costs another
/// round-trip.
///
/// Fails with `InvalidCode` for payloads that are not resolvable ISBNs —
/// barcodes that fail the syntactic gate locally, anything else by provider
/// verdict. Callers treat those as frame noise.
#[instrument(skip_all, fields(payload = %code.payload, symbology = ?code.symbology))]
pub fn resolve(cache: &mut BookCache, provider: &dyn MetadataProvider, code: &ScannedCode) -> Result<Resolution> {
    // Barcode payloads get separators stripped; QR payloads are opaque and
    // must stay byte-exact, they are the alias key.
    let scanned = if code.is_qr() { code.payload.clone() } else { normalize(&code.payload) };
    let canonical = match cache.lookup_alias(&scanned) {
        Some(target) => target.to_string(),
        None if code.is_qr() => scanned.clone(),
        None => {
            // Frame-noise gate: a barcode must look like an ISBN before it
            // earns a cache key or a provider round-trip. QR payloads only
            // the provider can judge.
            if !is_valid_isbn(&scanned) {
                exn::bail!(ErrorKind::InvalidCode(code.payload.clone()));
            }
            to_isbn13(&scanned).unwrap_or_else(|| scanned.clone())
        },
    };

    if let Some(book) = cache.lookup(&canonical) {
        if book.has_metadata() {
            tracing::trace!(isbn = %book.isbn, "Resolved from cache");
            return Ok(Resolution {
                display_name: book.display_name(),
                book: book.clone(),
                effort: ResolveEffort::Cached,
            });
        }
    }

    let meta = match provider.fetch(&canonical) {
        Ok(meta) => meta,
        Err(err) => {
            return Err(if matches!(&*err, MetadataErrorKind::NotFound(_)) {
                err.raise(ErrorKind::InvalidCode(code.payload.clone()))
            } else {
                ErrorKind::provider(err)
            });
        },
    };

    let authoritative = meta.isbn13.clone();
    if scanned != authoritative {
        cache.store_alias(scanned, authoritative.clone()).map_err(ErrorKind::catalog)?;
    }
    // The title may already be catalogued under its authoritative ISBN via a
    // different encoding; reuse it rather than double-registering.
    let book = match cache.lookup(&authoritative) {
        Some(existing) if existing.has_metadata() => existing.clone(),
        _ => {
            let book = Book::from(meta);
            cache.store(book.clone()).map_err(ErrorKind::catalog)?;
            book
        },
    };
    Ok(Resolution {
        display_name: book.display_name(),
        book,
        effort: ResolveEffort::Fetched,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use stacks_metadata::{BookMeta, MockProvider};

    const ISBN: &str = "9780134190440";

    fn stroustrup() -> BookMeta {
        BookMeta::new(ISBN, "The C++ Programming Language", ["Bjarne Stroustrup"])
    }

    #[test]
    fn test_first_scan_fetches_and_caches() {
        let mut cache = BookCache::in_memory();
        let provider = MockProvider::default().with_meta(stroustrup());

        let resolution = resolve(&mut cache, &provider, &ScannedCode::barcode(ISBN)).unwrap();
        assert_eq!(resolution.display_name, "The C++ Programming Language - Bjarne Stroustrup");
        assert_eq!(resolution.effort, ResolveEffort::Fetched);
        assert_eq!(provider.fetch_count(ISBN), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_second_scan_is_a_cache_hit() {
        let mut cache = BookCache::in_memory();
        let provider = MockProvider::default().with_meta(stroustrup());

        resolve(&mut cache, &provider, &ScannedCode::barcode(ISBN)).unwrap();
        let again = resolve(&mut cache, &provider, &ScannedCode::barcode(ISBN)).unwrap();
        assert_eq!(again.effort, ResolveEffort::Cached);
        // Exactly one provider call over both scans.
        assert_eq!(provider.total_fetches(), 1);
    }

    #[rstest]
    #[case(true)] // QR first, then barcode
    #[case(false)] // barcode first, then QR
    fn test_qr_and_barcode_yield_one_record(#[case] qr_first: bool) {
        let mut cache = BookCache::in_memory();
        let provider = MockProvider::default().with_meta(stroustrup()).with_code("QR-ABC", stroustrup());

        let mut codes = vec![ScannedCode::qr("QR-ABC"), ScannedCode::barcode(ISBN)];
        if !qr_first {
            codes.reverse();
        }
        for code in &codes {
            let resolution = resolve(&mut cache, &provider, code).unwrap();
            assert_eq!(resolution.book.isbn, ISBN);
        }
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.lookup_alias("QR-ABC"), Some(ISBN));
    }

    #[test]
    fn test_qr_against_already_cached_title_reuses_record() {
        let mut cache = BookCache::in_memory();
        let provider = MockProvider::default().with_meta(stroustrup()).with_code("QR-ABC", stroustrup());

        resolve(&mut cache, &provider, &ScannedCode::barcode(ISBN)).unwrap();
        let via_qr = resolve(&mut cache, &provider, &ScannedCode::qr("QR-ABC")).unwrap();

        assert_eq!(via_qr.display_name, "The C++ Programming Language - Bjarne Stroustrup");
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.lookup_alias("QR-ABC"), Some(ISBN));
    }

    #[test]
    fn test_repeat_qr_scan_uses_alias_not_provider() {
        let mut cache = BookCache::in_memory();
        let provider = MockProvider::default().with_code("QR-ABC", stroustrup());

        resolve(&mut cache, &provider, &ScannedCode::qr("QR-ABC")).unwrap();
        let again = resolve(&mut cache, &provider, &ScannedCode::qr("QR-ABC")).unwrap();
        assert_eq!(again.effort, ResolveEffort::Cached);
        assert_eq!(provider.total_fetches(), 1);
    }

    #[test]
    fn test_isbn10_barcode_canonicalized_before_fetch() {
        let meta = BookMeta::new("9780306406157", "Document Identification", ["Anon"]);
        let mut cache = BookCache::in_memory();
        // The provider only knows the canonical ISBN-13 form.
        let provider = MockProvider::default().with_meta(meta);

        resolve(&mut cache, &provider, &ScannedCode::barcode("0-306-40615-2")).unwrap();
        assert_eq!(provider.fetch_count("9780306406157"), 1);
        assert_eq!(provider.fetch_count("0306406152"), 0);

        // The next scan of the same sticker resolves without the provider.
        let again = resolve(&mut cache, &provider, &ScannedCode::barcode("0306406152")).unwrap();
        assert_eq!(again.effort, ResolveEffort::Cached);
        assert_eq!(provider.total_fetches(), 1);
    }

    #[rstest]
    #[case("0306406152", "9780306406157")] // ISBN-10 first
    #[case("9780306406157", "0306406152")] // ISBN-13 first
    fn test_isbn10_and_isbn13_forms_share_one_record(#[case] first: &str, #[case] second: &str) {
        let meta = BookMeta::new("9780306406157", "Document Identification", ["Anon"]);
        let mut cache = BookCache::in_memory();
        let provider = MockProvider::default().with_meta(meta);

        for payload in [first, second] {
            let resolution = resolve(&mut cache, &provider, &ScannedCode::barcode(payload)).unwrap();
            assert_eq!(resolution.book.isbn, "9780306406157");
        }
        assert_eq!(cache.len(), 1);
        assert_eq!(provider.total_fetches(), 1);
    }

    #[rstest]
    #[case("not an isbn")]
    #[case("9780134190441")] // bad check digit
    #[case("")]
    fn test_noise_barcodes_rejected_without_provider_call(#[case] payload: &str) {
        let mut cache = BookCache::in_memory();
        let provider = MockProvider::default();

        let err = resolve(&mut cache, &provider, &ScannedCode::barcode(payload)).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidCode(_)));
        assert_eq!(provider.total_fetches(), 0);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_non_book_qr_payload_rejected_by_provider() {
        let mut cache = BookCache::in_memory();
        let provider = MockProvider::default();

        let err = resolve(&mut cache, &provider, &ScannedCode::qr("https://example.com")).unwrap_err();
        assert!(matches!(&*err, ErrorKind::InvalidCode(_)));
        assert_eq!(provider.fetch_count("https://example.com"), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_provider_outage_is_retryable() {
        let mut cache = BookCache::in_memory();
        let provider = MockProvider::unavailable();

        let err = resolve(&mut cache, &provider, &ScannedCode::barcode(ISBN)).unwrap_err();
        assert!(matches!(&*err, ErrorKind::Provider));
        assert!(err.is_retryable());
        // Nothing was cached; the next scan retries cleanly.
        assert!(cache.is_empty());
    }

    #[test]
    fn test_metadata_absent_record_completed_by_fetch() {
        let mut cache = BookCache::in_memory();
        cache.store(Book::bare(ISBN)).unwrap();
        let provider = MockProvider::default().with_meta(stroustrup());

        let resolution = resolve(&mut cache, &provider, &ScannedCode::barcode(ISBN)).unwrap();
        assert_eq!(resolution.effort, ResolveEffort::Fetched);
        assert!(cache.lookup(ISBN).unwrap().has_metadata());
        assert_eq!(cache.len(), 1);
    }
}
