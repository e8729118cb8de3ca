//! Candidate synthesis with uniqueness validation

use perceiver_dom::{DocumentPort, ElementRef};
use tracing::debug;

use crate::errors::LocatorError;
use crate::strategies::proposals;
use crate::types::{LocatorCandidate, LocatorPolicyView, LocatorStrategy};

/// Produces ordered locator candidates for an element.
///
/// Every emitted candidate resolves to exactly the input element at the time of
/// synthesis. An empty result means the locator is unknown; callers keep going.
#[derive(Debug, Clone, Default)]
pub struct LocatorSynthesizer {
    policy: LocatorPolicyView,
}

impl LocatorSynthesizer {
    pub fn new(policy: LocatorPolicyView) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &LocatorPolicyView {
        &self.policy
    }

    /// Candidate selector strings, highest confidence first.
    pub fn synthesize<D>(&self, doc: &D, element: ElementRef) -> Vec<String>
    where
        D: DocumentPort + ?Sized,
    {
        self.synthesize_detailed(doc, element)
            .into_iter()
            .map(|candidate| candidate.selector)
            .collect()
    }

    /// Same as [`Self::synthesize`] but keeps the producing strategy.
    pub fn synthesize_detailed<D>(&self, doc: &D, element: ElementRef) -> Vec<LocatorCandidate>
    where
        D: DocumentPort + ?Sized,
    {
        let bound = self.policy.bound();
        let mut accepted: Vec<LocatorCandidate> = Vec::new();

        for strategy in LocatorStrategy::attribute_chain() {
            if accepted.len() >= bound {
                break;
            }
            if let Some(candidate) = self.attempt(doc, element, strategy, &accepted) {
                accepted.push(candidate);
            }
        }

        if accepted.is_empty() {
            if let Some(candidate) =
                self.attempt(doc, element, LocatorStrategy::StructuralPath, &accepted)
            {
                accepted.push(candidate);
            }
        }

        if accepted.is_empty() {
            debug!(%element, "no locator candidate survived validation");
        }
        accepted
    }

    fn attempt<D>(
        &self,
        doc: &D,
        element: ElementRef,
        strategy: LocatorStrategy,
        accepted: &[LocatorCandidate],
    ) -> Option<LocatorCandidate>
    where
        D: DocumentPort + ?Sized,
    {
        for selector in proposals(strategy, doc, element, &self.policy) {
            if accepted.iter().any(|c| c.selector == selector) {
                continue;
            }
            match validate(doc, element, &selector) {
                Ok(()) => {
                    debug!(strategy = strategy.name(), %selector, "accepted locator candidate");
                    return Some(LocatorCandidate { selector, strategy });
                }
                Err(err) => {
                    debug!(
                        strategy = strategy.name(),
                        kind = err.kind(),
                        "rejected locator candidate: {}",
                        err
                    );
                }
            }
        }
        None
    }
}

/// Check that `selector` resolves to exactly `element`.
pub fn validate<D>(doc: &D, element: ElementRef, selector: &str) -> Result<(), LocatorError>
where
    D: DocumentPort + ?Sized,
{
    let matches = doc
        .query_all(selector)
        .map_err(|source| LocatorError::Malformed {
            selector: selector.to_string(),
            source,
        })?;
    match matches.as_slice() {
        [only] if *only == element => Ok(()),
        [] | [_] => Err(LocatorError::Stale(selector.to_string())),
        many => Err(LocatorError::NotUnique {
            selector: selector.to_string(),
            matches: many.len(),
        }),
    }
}
