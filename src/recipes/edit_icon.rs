use std::time::Duration;

use tracing::{debug, info};

use crate::automator::automator::Automator;
use crate::automator::deadline::Deadline;
use crate::automator::error::{Action, SmartError};
use crate::driver::driver::{Driver, ElementId};
use crate::driver::element_type::ElementType;
use crate::driver::error::DriverError;
use crate::driver::query::{Attribute, ElementQuery, Locator, TextMatch};

const EDIT_ICON_QUERY: &str = "Edit/Pencil icon";

impl<D: Driver> Automator<D> {
    /// Find and tap an edit affordance.
    ///
    /// Per round: buttons captioned with an edit keyword (predicate), then
    /// any element whose name or label carries an edit hint, then any element
    /// whose value carries a value hint (class chain), then the topmost image
    /// on screen, which is usually the avatar of an editable profile.
    ///
    /// On timeout the error keeps the first failure of the final round.
    pub fn click_edit_icon(&mut self, timeout: Duration) -> Result<ElementId, SmartError> {
        let poll = self.config().timing.recipe_poll_interval();
        let keywords = self.config().edit_icon.keywords.clone();
        let hints = self.config().edit_icon.hints.clone();
        let value_hints = self.config().edit_icon.value_hints.clone();
        let deadline = Deadline::after(timeout);

        loop {
            let mut round_error: Option<DriverError> = None;

            for keyword in &keywords {
                let locator = Locator::predicate(
                    ElementQuery::of_type(ElementType::Button).with_text(TextMatch::contains(keyword, &Attribute::ALL)),
                );
                match self.tap_first(&locator) {
                    Ok(element) => {
                        info!(keyword = %keyword, element = %element, "tapped edit button");
                        return Ok(element);
                    }
                    Err(e) => {
                        round_error.get_or_insert(e);
                    }
                }
            }

            let hint_steps: [(&[String], &[Attribute]); 2] =
                [(&hints, &Attribute::CAPTION), (&value_hints, &[Attribute::Value])];
            for (needles, attributes) in hint_steps {
                if needles.is_empty() {
                    continue;
                }
                let locator = Locator::class_chain(ElementQuery::any().with_text(TextMatch::any_of(needles, attributes)));
                match self.tap_first(&locator) {
                    Ok(element) => {
                        info!(element = %element, "tapped element hinting at edit");
                        return Ok(element);
                    }
                    Err(e) => {
                        round_error.get_or_insert(e);
                    }
                }
            }

            match self.tap_topmost_image() {
                Ok(element) => {
                    info!(element = %element, "tapped topmost image as edit target");
                    return Ok(element);
                }
                Err(e) => {
                    round_error.get_or_insert(e);
                }
            }

            if !deadline.pause(poll) {
                return Err(SmartError::not_found(Action::EditIcon, EDIT_ICON_QUERY, round_error.as_ref()));
            }
        }
    }

    fn tap_first(&mut self, locator: &Locator) -> Result<ElementId, DriverError> {
        let element = self.driver_mut().find_element(locator)?;
        self.click_or_tap(&element)?;
        Ok(element)
    }

    fn tap_topmost_image(&mut self) -> Result<ElementId, DriverError> {
        let images = self
            .driver_mut()
            .find_elements(&Locator::class_chain(ElementQuery::of_type(ElementType::Image)))?;

        let mut topmost: Option<(ElementId, f64)> = None;
        for image in images {
            match self.driver_mut().rect(&image) {
                Ok(rect) => {
                    if topmost.as_ref().is_none_or(|(_, y)| rect.y < *y) {
                        topmost = Some((image, rect.y));
                    }
                }
                Err(e) => debug!(element = %image, error = %e, "image rect unreadable"),
            }
        }

        let (image, _) = topmost.ok_or_else(|| DriverError::NoSuchElement("no image on screen".into()))?;
        self.click_or_tap(&image)?;
        Ok(image)
    }
}
