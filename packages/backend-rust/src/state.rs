use std::sync::Arc;
use std::time::{Instant, SystemTime};

use birdbrain_algo::BktParams;

use crate::catalog::ExerciseCatalog;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    started_at: Instant,
    started_at_system: SystemTime,
    catalog: Arc<ExerciseCatalog>,
    session: Arc<SessionStore>,
}

impl AppState {
    /// Seeds a session covering every skill referenced by the catalog
    pub fn new(catalog: ExerciseCatalog, params: BktParams) -> Self {
        let session = SessionStore::new(&catalog.skills(), params);
        Self::with_session(catalog, session)
    }

    pub fn with_session(catalog: ExerciseCatalog, session: SessionStore) -> Self {
        Self {
            started_at: Instant::now(),
            started_at_system: SystemTime::now(),
            catalog: Arc::new(catalog),
            session: Arc::new(session),
        }
    }

    pub fn catalog(&self) -> &ExerciseCatalog {
        &self.catalog
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    pub fn started_at_system(&self) -> SystemTime {
        self.started_at_system
    }
}
