use tracing::debug;

use crate::automator::settings::SmartConfig;
use crate::driver::driver::{Driver, ElementId, Rect};
use crate::driver::error::DriverError;
use crate::driver::gesture::Gesture;
use crate::driver::query::Locator;

/// Text-driven find and act helpers over one driver session.
///
/// Operations run to completion on the calling thread, polling the driver
/// and sleeping between attempts. The session is borrowed mutably for the
/// whole operation, so calls on one session are serialized.
pub struct Automator<D: Driver> {
    driver: D,
    config: SmartConfig,
}

impl<D: Driver> Automator<D> {
    pub fn new(driver: D) -> Self {
        Self::with_config(driver, SmartConfig::default())
    }

    pub fn with_config(driver: D, config: SmartConfig) -> Self {
        Automator { driver, config }
    }

    pub fn config(&self) -> &SmartConfig {
        &self.config
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn into_inner(self) -> D {
        self.driver
    }

    // ------------------------------------------------------------------------
    // Primitives shared by the strategies
    // ------------------------------------------------------------------------

    /// Single synthesized tap at the center of the element's rectangle.
    pub fn tap_center(&mut self, element: &ElementId) -> Result<Rect, DriverError> {
        let rect = self.driver.rect(element)?;
        let (x, y) = rect.center();
        Gesture::Tap { x, y }.perform(&mut self.driver)?;
        Ok(rect)
    }

    /// Native click, falling back to a center tap.
    pub fn click_or_tap(&mut self, element: &ElementId) -> Result<(), DriverError> {
        match self.driver.click(element) {
            Ok(()) => Ok(()),
            Err(e) => {
                debug!(element = %element, error = %e, "native click failed, tapping center");
                self.tap_center(element).map(|_| ())
            }
        }
    }

    /// `find_elements` with the failure logged and treated as no hits.
    pub(crate) fn find_all_lenient(&mut self, locator: &Locator, last_error: &mut Option<DriverError>) -> Vec<ElementId> {
        match self.driver.find_elements(locator) {
            Ok(found) => found,
            Err(e) => {
                debug!(query = %locator.expression(), error = %e, "query failed");
                *last_error = Some(e);
                Vec::new()
            }
        }
    }
}
