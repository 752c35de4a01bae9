use hermes_pooling::engine::SharedPoolingEngine;

pub struct AppState {
    pub engine: SharedPoolingEngine,
}
