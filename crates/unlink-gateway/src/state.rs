use std::sync::Arc;

use unlink_core::Registry;

#[derive(Clone)]
pub struct AppState {
    registry: Arc<dyn Registry>,
}

impl AppState {
    pub fn new(registry: Arc<dyn Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &dyn Registry {
        self.registry.as_ref()
    }
}
