use std::sync::Arc;

use wikivid_core::{ArtifactStore, Pipeline};

pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub store: Arc<dyn ArtifactStore>,
}

impl AppState {
    /// Serve videos from the same store the pipeline writes to.
    pub fn new(pipeline: Pipeline) -> Self {
        let store = Arc::clone(pipeline.store());
        Self {
            pipeline: Arc::new(pipeline),
            store,
        }
    }
}
