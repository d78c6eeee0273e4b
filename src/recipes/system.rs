use tracing::debug;

use crate::automator::automator::Automator;
use crate::driver::driver::Driver;

impl<D: Driver> Automator<D> {
    /// Accept (`positive`) or dismiss the system alert on screen. Returns
    /// false when there is none.
    pub fn tap_system_alert(&mut self, positive: bool) -> bool {
        let result = if positive {
            self.driver_mut().accept_alert()
        } else {
            self.driver_mut().dismiss_alert()
        };
        match result {
            Ok(()) => true,
            Err(e) => {
                debug!(positive, error = %e, "no alert handled");
                false
            }
        }
    }
}
