use std::time::Duration;

use tracing::{debug, info};

use crate::automator::automator::Automator;
use crate::automator::error::{Action, SmartError};
use crate::driver::driver::{Driver, ElementId};
use crate::driver::element_type::ElementType;
use crate::driver::error::DriverError;
use crate::driver::query::{Attribute, ElementQuery, Locator, TextMatch};
use crate::interact::geometry::nearest_index;

/// Ways of turning a resolved element into a tap, tried in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickStrategy {
    /// The driver's own click on the resolved element
    Native,
    /// Re-resolve a button with the same caption; click it or tap its center
    MatchingButton,
    /// Synthesized tap at the resolved element's center
    CenterTap,
    /// Button whose center is nearest the resolved element's center
    NearestButton,
}

impl ClickStrategy {
    pub const CHAIN: [ClickStrategy; 4] = [
        ClickStrategy::Native,
        ClickStrategy::MatchingButton,
        ClickStrategy::CenterTap,
        ClickStrategy::NearestButton,
    ];
}

impl<D: Driver> Automator<D> {
    /// Locate an element by text and tap it.
    ///
    /// Returns the element that actually received the tap, which is the
    /// resolved element unless a button fallback was used.
    pub fn click_by_text(&mut self, query: &str, timeout: Duration) -> Result<ElementId, SmartError> {
        let target = self.find_by_text(query, None, timeout)?;
        let mut last_error = None;

        for strategy in ClickStrategy::CHAIN {
            match self.attempt_click(strategy, query, &target) {
                Ok(clicked) => {
                    if strategy != ClickStrategy::Native {
                        info!(query, ?strategy, element = %clicked, "tapped via fallback");
                    }
                    return Ok(clicked);
                }
                Err(e) => {
                    debug!(query, ?strategy, error = %e, "click strategy failed");
                    last_error = Some(e);
                }
            }
        }

        Err(SmartError::not_found(Action::Tap, query, last_error.as_ref()))
    }

    /// Try each text in turn; the first successful click wins.
    pub fn click_any_by_text<S: AsRef<str>>(
        &mut self,
        texts: &[S],
        timeout_per_try: Duration,
    ) -> Result<ElementId, SmartError> {
        let mut last_error = None;
        for text in texts {
            match self.click_by_text(text.as_ref(), timeout_per_try) {
                Ok(element) => return Ok(element),
                Err(e) => last_error = Some(e),
            }
        }
        Err(last_error.unwrap_or_else(|| {
            let joined = texts.iter().map(|t| t.as_ref()).collect::<Vec<_>>().join(", ");
            SmartError::not_found(Action::Tap, &joined, None)
        }))
    }

    fn attempt_click(
        &mut self,
        strategy: ClickStrategy,
        query: &str,
        target: &ElementId,
    ) -> Result<ElementId, DriverError> {
        match strategy {
            ClickStrategy::Native => {
                self.driver_mut().click(target)?;
                Ok(target.clone())
            }
            ClickStrategy::MatchingButton => {
                let locator = Locator::predicate(
                    ElementQuery::of_type(ElementType::Button)
                        .with_text(TextMatch::contains(query, &Attribute::CAPTION)),
                );
                let button = self.driver_mut().find_element(&locator)?;
                self.click_or_tap(&button)?;
                Ok(button)
            }
            ClickStrategy::CenterTap => {
                self.tap_center(target)?;
                Ok(target.clone())
            }
            ClickStrategy::NearestButton => {
                let target_rect = self.driver_mut().rect(target)?;
                let buttons = self
                    .driver_mut()
                    .find_elements(&Locator::class_chain(ElementQuery::of_type(ElementType::Button)))?;

                let mut located = Vec::with_capacity(buttons.len());
                for button in buttons {
                    // Buttons that cannot be measured are not candidates
                    if let Ok(rect) = self.driver_mut().rect(&button) {
                        located.push((button, rect));
                    }
                }
                let rects: Vec<_> = located.iter().map(|(_, r)| *r).collect();
                let index = nearest_index(&target_rect, &rects)
                    .ok_or_else(|| DriverError::NoSuchElement("no measurable button on screen".into()))?;

                let nearest = located.swap_remove(index).0;
                self.click_or_tap(&nearest)?;
                Ok(nearest)
            }
        }
    }
}
