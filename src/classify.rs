//! Edge classification.
//!
//! Two pure decisions are made for every candidate pair `(a, b)`:
//!
//! - `admits`: whether the pair gets an edge at all in the current mode;
//! - `classify`: which `Relationship` payload the edge carries.
//!
//! Annotation is gated by an exclusive-or between "the pair is a declared
//! relation" and "indirect-expansion mode is on". With both false or both
//! true the edge stays `Simple` even when interests are shared.

use crate::dataset::Dataset;
use crate::model::{InterestSet, Relationship, UserId};

/// Payload for the edge `a → b`.
///
/// `Indirect(shared)` iff `shared` is non-empty and exactly one of
/// `declared_direct` / `expand_indirect` holds; `Simple` otherwise.
pub fn classify(
    _a: UserId,
    _b: UserId,
    declared_direct: bool,
    shared: &InterestSet,
    expand_indirect: bool,
) -> Relationship {
    if !shared.is_empty() && (declared_direct ^ expand_indirect) {
        Relationship::Indirect(shared.clone())
    } else {
        Relationship::Simple
    }
}

/// Whether a candidate pair receives an edge.
///
/// Outside expansion mode only declared relations are linked. In
/// indirect-expansion mode only undeclared pairs that share at least one
/// interest are linked.
pub fn admits(declared_direct: bool, shared: &InterestSet, expand_indirect: bool) -> bool {
    if expand_indirect {
        !declared_direct && !shared.is_empty()
    } else {
        declared_direct
    }
}

/// Everything the builders need to know about one candidate pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub from: UserId,
    pub to: UserId,
    pub declared: bool,
    pub shared: InterestSet,
}

impl Candidate {
    pub fn resolve(dataset: &Dataset, from: UserId, to: UserId) -> Self {
        Self {
            from,
            to,
            declared: dataset.is_declared(from, to),
            shared: dataset.shared_interests(from, to),
        }
    }

    /// The payload for this pair, or `None` when the pair is not admitted.
    pub fn relationship(&self, expand_indirect: bool) -> Option<Relationship> {
        admits(self.declared, &self.shared, expand_indirect)
            .then(|| classify(self.from, self.to, self.declared, &self.shared, expand_indirect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InterestId;

    fn set(ids: &[u32]) -> InterestSet {
        ids.iter().map(|&i| InterestId(i)).collect()
    }

    #[test]
    fn test_declared_with_shared_is_indirect() {
        let shared = set(&[1, 4]);
        let rel = classify(UserId(1), UserId(2), true, &shared, false);
        assert_eq!(rel, Relationship::Indirect(shared));
    }

    #[test]
    fn test_declared_without_shared_is_simple() {
        let rel = classify(UserId(1), UserId(2), true, &set(&[]), false);
        assert_eq!(rel, Relationship::Simple);
    }

    #[test]
    fn test_xor_gate() {
        let shared = set(&[3]);
        assert_eq!(classify(UserId(1), UserId(2), false, &shared, false), Relationship::Simple);
        assert_eq!(classify(UserId(1), UserId(2), true, &shared, true), Relationship::Simple);
        assert_eq!(
            classify(UserId(1), UserId(2), false, &shared, true),
            Relationship::Indirect(shared.clone())
        );
    }

    #[test]
    fn test_admission() {
        let shared = set(&[3]);
        let none = set(&[]);

        assert!(admits(true, &none, false));
        assert!(admits(true, &shared, false));
        assert!(!admits(false, &shared, false));

        assert!(admits(false, &shared, true));
        assert!(!admits(false, &none, true));
        assert!(!admits(true, &shared, true));
    }

    #[test]
    fn test_candidate_resolution() {
        let dataset = Dataset::new()
            .with_user(UserId(1), "a")
            .with_user(UserId(2), "b")
            .with_relation(UserId(1), UserId(2))
            .with_interest(
                crate::model::Interest::new(InterestId(9), "go").with_members([UserId(1), UserId(2)]),
            );

        let forward = Candidate::resolve(&dataset, UserId(1), UserId(2));
        assert!(forward.declared);
        assert_eq!(forward.relationship(false), Some(Relationship::Indirect(set(&[9]))));
        assert_eq!(forward.relationship(true), None);

        let backward = Candidate::resolve(&dataset, UserId(2), UserId(1));
        assert!(!backward.declared);
        assert_eq!(backward.relationship(false), None);
        assert_eq!(backward.relationship(true), Some(Relationship::Indirect(set(&[9]))));
    }
}
