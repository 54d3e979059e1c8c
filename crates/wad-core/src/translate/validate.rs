use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::error::TranslationError;
use crate::swagger::{ApiDeclaration, ResourceListing};

/// Check that the listing announces exactly as many declarations as were supplied.
///
/// Only cardinality is compared; the paths themselves are not matched.
pub fn validate(
    listing: &ResourceListing,
    declarations: &IndexMap<String, ApiDeclaration>,
) -> Result<(), TranslationError> {
    match listing.apis.len().cmp(&declarations.len()) {
        Ordering::Less => Err(TranslationError::file(
            "One of your API declarations is not mapped in your resource listing",
        )),
        Ordering::Greater => Err(TranslationError::file(
            "Some API declarations are missing",
        )),
        Ordering::Equal => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslationErrorKind;
    use crate::swagger::ResourceDeclaration;

    fn listing(paths: &[&str]) -> ResourceListing {
        ResourceListing {
            apis: paths
                .iter()
                .map(|p| ResourceDeclaration {
                    path: p.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn declarations(names: &[&str]) -> IndexMap<String, ApiDeclaration> {
        names
            .iter()
            .map(|n| (n.to_string(), ApiDeclaration::default()))
            .collect()
    }

    #[test]
    fn test_equal_counts_pass() {
        assert!(validate(&listing(&["/pets"]), &declarations(&["pets"])).is_ok());
        assert!(validate(&listing(&[]), &declarations(&[])).is_ok());
    }

    #[test]
    fn test_paths_are_not_compared() {
        assert!(validate(&listing(&["/pets"]), &declarations(&["stores"])).is_ok());
    }

    #[test]
    fn test_unmapped_declaration() {
        let err = validate(&listing(&["/pets"]), &declarations(&["pets", "stores"])).unwrap_err();
        assert_eq!(err.kind, TranslationErrorKind::File);
        assert!(err.message.contains("not mapped"));
    }

    #[test]
    fn test_missing_declaration() {
        let err = validate(&listing(&["/pets", "/stores"]), &declarations(&["pets"])).unwrap_err();
        assert_eq!(err.kind, TranslationErrorKind::File);
        assert_eq!(err.message, "Some API declarations are missing");
    }
}
