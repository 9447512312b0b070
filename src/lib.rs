#![doc(test(attr(deny(warnings))))]

//! Car-hire booking core: trip validation, the three-step booking state
//! machine, per-trip vehicle pricing and confirmation rendering, plus a thin
//! command shell that drives them.

pub mod booking;
pub mod catalog;
pub mod cli;
pub mod clock;
pub mod config;
pub mod confirmation;
pub mod currency;
pub mod errors;
pub mod pricing;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("carhire booking tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
