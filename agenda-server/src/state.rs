use agenda_core::EventStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    // The store wraps a reference-counted driver handle, so cloning the
    // state per request shares one connection pool
    store: EventStore,
}

impl AppState {
    pub fn new(store: EventStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }
}
