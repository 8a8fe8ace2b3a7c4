//! Spoken-form resolution and presentation phrasing.
//!
//! The canonical form is resolved upstream (speech slot resolution); this
//! module only looks it up. It never searches fuzzily on its own. Edit
//! distance decides how much of the spoken/canonical mismatch to surface.

use crate::graph::source::TermSource;
use crate::store::StoreResult;
use crate::term::TermId;

/// Levenshtein distance over Unicode scalar values, unit cost for insert,
/// delete and substitute. Case-sensitive.
///
/// Exact row-by-row dynamic programming; memory is one row of the shorter
/// string.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (long, short) = if a.len() >= b.len() { (&a, &b) } else { (&b, &a) };

    if short.is_empty() {
        return long.len();
    }

    let mut previous: Vec<usize> = (0..=short.len()).collect();
    let mut current: Vec<usize> = vec![0; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        current[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let insertion = previous[j + 1] + 1;
            let deletion = current[j] + 1;
            let substitution = previous[j] + usize::from(lc != sc);
            current[j + 1] = insertion.min(deletion).min(substitution);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[short.len()]
}

/// Render the phrase naming a term in an answer.
///
/// Trivial variation (distance ≤ 1: plurals, a hyphen) is hidden behind the
/// preferred form. Larger divergence, such as an abbreviation, is disclosed:
/// `"<spoken> (typically known as <preferred>)"`.
pub fn presentation_phrase(spoken: &str, preferred: &str) -> String {
    if spoken != preferred && levenshtein(spoken, preferred) > 1 {
        format!("{spoken} (typically known as {preferred})")
    } else {
        preferred.to_string()
    }
}

/// Outcome of resolving a spoken form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(TermId),
    /// The upstream resolver supplied no canonical form.
    NoCanonicalForm,
    /// The canonical form is not a registered synonym.
    UnknownSurface { canonical: String },
}

/// Turns (spoken, externally resolved) pairs into term ids.
pub struct TermResolver<'a> {
    source: &'a dyn TermSource,
}

impl<'a> TermResolver<'a> {
    pub fn new(source: &'a dyn TermSource) -> Self {
        Self { source }
    }

    /// Look up the externally resolved form in the synonym keyspace.
    /// `spoken` is only used for logging.
    pub fn resolve_spoken(&self, spoken: &str, resolved: Option<&str>) -> StoreResult<Resolution> {
        let Some(canonical) = resolved.filter(|r| !r.trim().is_empty()) else {
            tracing::info!(spoken, "upstream resolver supplied no canonical form");
            return Ok(Resolution::NoCanonicalForm);
        };

        match self.source.lookup_surface(canonical)? {
            Some(id) => {
                tracing::debug!(spoken, canonical, term = %id, "resolved spoken form");
                Ok(Resolution::Resolved(id))
            }
            None => {
                tracing::warn!(
                    spoken,
                    canonical,
                    "resolved form has no synonym binding; upstream slot values may be stale"
                );
                Ok(Resolution::UnknownSurface {
                    canonical: canonical.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{IngestSession, Vocabulary};
    use crate::ontology::{ConceptRecord, build};

    #[test]
    fn classic_distances() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("statistic", "statistics"), 1);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", ""), 0);
    }

    #[test]
    fn distance_is_case_sensitive() {
        assert_eq!(levenshtein("ANOVA", "anova"), 5);
    }

    #[test]
    fn distance_counts_chars_not_bytes() {
        assert_eq!(levenshtein("café", "cafe"), 1);
        assert_eq!(levenshtein("", "ñü"), 2);
    }

    #[test]
    fn distance_properties_over_samples() {
        let samples = [
            "", "a", "ab", "abc", "kitten", "sitting", "regression", "regresion",
            "anova", "analysis of variance", "t-test", "t test",
        ];
        for a in samples {
            assert_eq!(levenshtein(a, a), 0);
            assert_eq!(levenshtein("", a), a.chars().count());
            for b in samples {
                let ab = levenshtein(a, b);
                assert_eq!(ab, levenshtein(b, a), "symmetry for {a:?}/{b:?}");
                for c in samples {
                    assert!(
                        levenshtein(a, c) <= ab + levenshtein(b, c),
                        "triangle inequality for {a:?}/{b:?}/{c:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn phrase_identical_is_bare() {
        for x in ["", "sampling", "Mixed Methods"] {
            assert_eq!(presentation_phrase(x, x), x);
        }
    }

    #[test]
    fn phrase_discloses_large_divergence() {
        assert_eq!(
            presentation_phrase("kitten", "sitting"),
            "kitten (typically known as sitting)"
        );
        assert_eq!(
            presentation_phrase("anova", "analysis of variance"),
            "anova (typically known as analysis of variance)"
        );
    }

    #[test]
    fn phrase_hides_trivial_variation() {
        assert_eq!(presentation_phrase("statistic", "statistics"), "statistics");
        assert_eq!(presentation_phrase("t-test", "t test"), "t test");
    }

    fn vocabulary() -> Vocabulary {
        let record = ConceptRecord {
            id: Some("urn:anova".into()),
            pref_labels: vec!["analysis of variance".into()],
            alt_labels: vec!["ANOVA".into()],
            definitions: vec!["Comparing group means.".into()],
            ..Default::default()
        };
        let mut session = IngestSession::new(true);
        session.ingest(build(vec![record]).unwrap()).unwrap();
        session.finish()
    }

    #[test]
    fn resolves_via_canonical_form() {
        let vocab = vocabulary();
        let resolver = TermResolver::new(&vocab);
        assert_eq!(
            resolver.resolve_spoken("a nova", Some("anova")).unwrap(),
            Resolution::Resolved(TermId::new("urn:anova"))
        );
    }

    #[test]
    fn no_canonical_form_means_unresolved() {
        let vocab = vocabulary();
        let resolver = TermResolver::new(&vocab);
        // No independent search even when the spoken form is a known synonym.
        assert_eq!(
            resolver.resolve_spoken("anova", None).unwrap(),
            Resolution::NoCanonicalForm
        );
        assert_eq!(
            resolver.resolve_spoken("anova", Some("  ")).unwrap(),
            Resolution::NoCanonicalForm
        );
    }

    #[test]
    fn unknown_canonical_form() {
        let vocab = vocabulary();
        let resolver = TermResolver::new(&vocab);
        assert_eq!(
            resolver.resolve_spoken("manova", Some("manova")).unwrap(),
            Resolution::UnknownSurface {
                canonical: "manova".into()
            }
        );
    }
}
