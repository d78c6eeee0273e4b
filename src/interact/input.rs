use std::cmp::Ordering;
use std::time::Duration;

use tracing::{debug, info};

use crate::automator::automator::Automator;
use crate::automator::error::{Action, SmartError};
use crate::driver::driver::{Driver, ElementId, Rect};
use crate::driver::element_type::ElementType;
use crate::driver::error::DriverError;
use crate::driver::query::{ElementQuery, Locator};
use crate::interact::geometry::label_input_cost;
use crate::matching::fingerprint::fingerprint;
use crate::matching::score::score;

impl<D: Driver> Automator<D> {
    /// Type `value` into the input field that belongs to the label `label`.
    ///
    /// The field is chosen by layout relative to the label (below and
    /// horizontally overlapping is preferred), then by how well its own text
    /// matches the label, then any text field at all.
    pub fn enter_text_by_label(
        &mut self,
        label: &str,
        value: &str,
        timeout: Duration,
    ) -> Result<ElementId, SmartError> {
        let (_, label_rect) = self.find_locatable(label, None, timeout)?;
        let field = self.choose_input(label, &label_rect)?;

        if let Err(e) = self.click_or_tap(&field) {
            return Err(SmartError::not_found(Action::EnterText, label, Some(&e)));
        }
        if let Err(e) = self.driver_mut().clear(&field) {
            debug!(element = %field, error = %e, "clear not supported, typing over");
        }
        if let Err(e) = self.driver_mut().send_keys(&field, value) {
            return Err(SmartError::not_found(Action::EnterText, label, Some(&e)));
        }

        info!(label, element = %field, "entered text");
        Ok(field)
    }

    fn choose_input(&mut self, label: &str, label_rect: &Rect) -> Result<ElementId, SmartError> {
        let mut query_error: Option<DriverError> = None;
        let mut inputs = Vec::new();
        for t in ElementType::INPUT_TYPES {
            let locator = Locator::class_chain(ElementQuery::of_type(t));
            inputs.extend(self.find_all_lenient(&locator, &mut query_error));
        }

        if let Some(field) = self.nearest_by_layout(label_rect, &inputs) {
            return Ok(field);
        }

        if let Some(field) = self.best_by_text(label, &inputs) {
            debug!(label, element = %field, "no measurable input, chose by text");
            return Ok(field);
        }

        let any_text_field = Locator::class_chain(ElementQuery::of_type(ElementType::TextField));
        self.driver_mut()
            .find_element(&any_text_field)
            .map_err(|e| SmartError::not_found(Action::EnterText, label, Some(&e)))
    }

    /// Lowest label-to-input cost among inputs whose rectangle is readable;
    /// the first one wins on ties.
    fn nearest_by_layout(&mut self, label_rect: &Rect, inputs: &[ElementId]) -> Option<ElementId> {
        let layout = self.config().layout.clone();
        let mut best: Option<(&ElementId, f64)> = None;
        for input in inputs {
            let rect = match self.driver_mut().rect(input) {
                Ok(rect) => rect,
                Err(e) => {
                    debug!(element = %input, error = %e, "input rect unreadable");
                    continue;
                }
            };
            let cost = label_input_cost(label_rect, &rect, &layout);
            if best.is_none_or(|(_, c)| cost < c) {
                best = Some((input, cost));
            }
        }
        best.map(|(input, _)| input.clone())
    }

    /// Highest fuzzy score of the input's own text against the label; the
    /// first one wins on ties.
    fn best_by_text(&mut self, label: &str, inputs: &[ElementId]) -> Option<ElementId> {
        let mut scored: Vec<(f64, &ElementId)> = inputs
            .iter()
            .map(|input| (score(label, &fingerprint(self.driver_mut(), input)), input))
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        scored.first().map(|(_, input)| (*input).clone())
    }
}
