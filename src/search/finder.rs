use std::cmp::Ordering;
use std::time::Duration;

use tracing::{debug, warn};

use crate::automator::automator::Automator;
use crate::automator::deadline::Deadline;
use crate::automator::error::{Action, SmartError};
use crate::driver::driver::{Driver, ElementId, Rect};
use crate::driver::element_type::ElementType;
use crate::driver::error::DriverError;
use crate::driver::query::{Attribute, ElementQuery, Locator, TextMatch};
use crate::matching::fingerprint::fingerprint;
use crate::matching::score::score;

/// A candidate that survived the fuzzy threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedElement {
    pub element: ElementId,
    pub fingerprint: String,
    pub score: f64,
}

impl<D: Driver> Automator<D> {
    /// Locate the element best matching `query`, retrying until `timeout`.
    ///
    /// Each iteration escalates through three strategies: a per-type
    /// predicate query (first type in `types` with a hit wins), one untyped
    /// class-chain query, and a fuzzy-ranked scan of every element of the
    /// listed types. `None` uses the configured default type filter.
    pub fn find_by_text(
        &mut self,
        query: &str,
        types: Option<&[ElementType]>,
        timeout: Duration,
    ) -> Result<ElementId, SmartError> {
        self.find_accepting(query, types, timeout, |_, _| Some(()))
            .map(|(element, ())| element)
    }

    /// Like [`find_by_text`](Self::find_by_text), but only returns elements
    /// whose rectangle can be read, together with that rectangle.
    pub fn find_locatable(
        &mut self,
        query: &str,
        types: Option<&[ElementType]>,
        timeout: Duration,
    ) -> Result<(ElementId, Rect), SmartError> {
        self.find_accepting(query, types, timeout, |driver, element| driver.rect(element).ok())
    }

    /// Wait until an element matching `query` appears.
    pub fn wait_for_text(&mut self, query: &str, timeout: Duration) -> Result<ElementId, SmartError> {
        self.find_by_text(query, None, timeout)
    }

    /// Fingerprint and score `elements` against `query`, keeping those above
    /// the fuzzy threshold, best first. Equal scores keep input order.
    pub fn rank_candidates(&mut self, query: &str, elements: Vec<ElementId>) -> Vec<RankedElement> {
        let threshold = self.config().matching.fuzzy_threshold;
        let mut ranked: Vec<RankedElement> = elements
            .into_iter()
            .filter_map(|element| {
                let fingerprint = fingerprint(self.driver_mut(), &element);
                let score = score(query, &fingerprint);
                (score > threshold).then_some(RankedElement {
                    element,
                    fingerprint,
                    score,
                })
            })
            .collect();
        ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        ranked
    }

    fn type_filter(&self, types: Option<&[ElementType]>) -> Vec<ElementType> {
        let requested = types.unwrap_or(self.config().matching.default_types.as_slice());
        let mut unique: Vec<ElementType> = Vec::with_capacity(requested.len());
        for t in requested {
            if !unique.contains(t) {
                unique.push(*t);
            }
        }
        unique
    }

    fn find_accepting<T, F>(
        &mut self,
        query: &str,
        types: Option<&[ElementType]>,
        timeout: Duration,
        mut accept: F,
    ) -> Result<(ElementId, T), SmartError>
    where
        F: FnMut(&mut D, &ElementId) -> Option<T>,
    {
        let types = self.type_filter(types);
        let poll = self.config().timing.poll_interval();
        let deadline = Deadline::after(timeout);
        let mut last_error: Option<DriverError> = None;

        loop {
            if let Some(found) = self.resolve_once(query, &types, &mut accept, &mut last_error) {
                return Ok(found);
            }
            if !deadline.pause(poll) {
                break;
            }
        }

        warn!(query, ?timeout, "no element matched before the deadline");
        Err(SmartError::not_found(Action::Locate, query, last_error.as_ref()))
    }

    /// One pass of the three strategies.
    fn resolve_once<T, F>(
        &mut self,
        query: &str,
        types: &[ElementType],
        accept: &mut F,
        last_error: &mut Option<DriverError>,
    ) -> Option<(ElementId, T)>
    where
        F: FnMut(&mut D, &ElementId) -> Option<T>,
    {
        let text = TextMatch::contains(query, &Attribute::ALL);

        // Exact predicate, one type at a time
        for t in types {
            let locator = Locator::predicate(ElementQuery::of_type(*t).with_text(text.clone()));
            let hits = self.find_all_lenient(&locator, last_error);
            if let Some(found) = self.first_accepted(hits, accept) {
                debug!(query, element_type = %t, "matched by predicate");
                return Some(found);
            }
        }

        // Broad structural query, any type
        let locator = Locator::class_chain(ElementQuery::any().with_text(text));
        let hits = self.find_all_lenient(&locator, last_error);
        if let Some(found) = self.first_accepted(hits, accept) {
            debug!(query, "matched by class chain");
            return Some(found);
        }

        // Fuzzy scan over everything of the listed types
        let mut pool = Vec::new();
        for t in types {
            let locator = Locator::class_chain(ElementQuery::of_type(*t));
            pool.extend(self.find_all_lenient(&locator, last_error));
        }
        let ranked = self.rank_candidates(query, pool);
        for candidate in ranked {
            if let Some(value) = accept(self.driver_mut(), &candidate.element) {
                debug!(query, score = candidate.score, fingerprint = %candidate.fingerprint, "matched by fuzzy scan");
                return Some((candidate.element, value));
            }
        }
        None
    }

    fn first_accepted<T, F>(&mut self, hits: Vec<ElementId>, accept: &mut F) -> Option<(ElementId, T)>
    where
        F: FnMut(&mut D, &ElementId) -> Option<T>,
    {
        for element in hits {
            if let Some(value) = accept(self.driver_mut(), &element) {
                return Some((element, value));
            }
        }
        None
    }
}
