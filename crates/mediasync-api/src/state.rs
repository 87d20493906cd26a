//! Application state shared across handlers.

use std::sync::Arc;

use mediasync_core::Config;

use crate::dispatch::Dispatcher;

pub struct AppState {
    pub config: Arc<Config>,
    pub dispatcher: Dispatcher,
}
