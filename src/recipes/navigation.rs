use std::time::Duration;

use tracing::debug;

use crate::automator::automator::Automator;
use crate::automator::deadline::Deadline;
use crate::driver::driver::{Driver, ElementId};
use crate::driver::element_type::ElementType;
use crate::driver::gesture::Gesture;
use crate::driver::query::{ElementQuery, Locator};
use crate::matching::fingerprint::fingerprint;
use crate::matching::score::score;

impl<D: Driver> Automator<D> {
    /// Select the tab-bar button whose text best matches `label`.
    ///
    /// The best candidate must reach the tab threshold. Returns false if no
    /// tab could be tapped before `timeout`.
    pub fn click_tab_by_label(&mut self, label: &str, timeout: Duration) -> bool {
        let threshold = self.config().matching.tab_threshold;
        let poll = self.config().timing.recipe_poll_interval();
        let deadline = Deadline::after(timeout);
        let tabs = Locator::class_chain(ElementQuery::of_type(ElementType::Button).within(ElementType::TabBar));

        loop {
            match self.driver_mut().find_elements(&tabs) {
                Ok(buttons) => match self.best_scoring(label, buttons) {
                    Some((best, best_score)) if best_score >= threshold => match self.click_or_tap(&best) {
                        Ok(()) => return true,
                        Err(e) => debug!(label, error = %e, "tab tap failed"),
                    },
                    _ => {}
                },
                Err(e) => debug!(label, error = %e, "tab bar query failed"),
            }
            if !deadline.pause(poll) {
                return false;
            }
        }
    }

    /// Tap `offset` points above the center of the element matching `text`
    /// (clamped to the top of the screen). Useful for icons whose caption is
    /// the only addressable element.
    pub fn tap_above_text(&mut self, text: &str, offset: f64, timeout: Duration) -> bool {
        let rect = match self.find_locatable(text, None, timeout) {
            Ok((_, rect)) => rect,
            Err(e) => {
                debug!(text, error = %e, "anchor text not found");
                return false;
            }
        };
        let (x, _) = rect.center();
        let y = (rect.y - offset).max(0.0);

        let tap = Gesture::Tap { x, y };
        if tap.perform(self.driver_mut()).is_ok() {
            return true;
        }
        let press = Gesture::Drag {
            from: (x, y),
            to: (x, y),
            duration_secs: self.config().timing.tap_drag_duration_secs,
        };
        match press.perform(self.driver_mut()) {
            Ok(()) => true,
            Err(e) => {
                debug!(text, error = %e, "tap above text failed");
                false
            }
        }
    }

    /// Click the first cell on screen, typically the first photo of a picker.
    pub fn select_first_photo(&mut self) -> bool {
        let first_cell = Locator::class_chain(ElementQuery::of_type(ElementType::Cell).nth(1));
        let result = self
            .driver_mut()
            .find_element(&first_cell)
            .and_then(|cell| self.driver_mut().click(&cell));
        match result {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, "no photo selected");
                false
            }
        }
    }

    /// Highest-scoring element for `query`; the first one wins on ties.
    fn best_scoring(&mut self, query: &str, elements: Vec<ElementId>) -> Option<(ElementId, f64)> {
        let mut best: Option<(ElementId, f64)> = None;
        for element in elements {
            let s = score(query, &fingerprint(self.driver_mut(), &element));
            if best.as_ref().is_none_or(|(_, b)| s > *b) {
                best = Some((element, s));
            }
        }
        best
    }
}
