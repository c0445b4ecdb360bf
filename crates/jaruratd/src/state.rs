//! Daemon state shared across request handlers.

use std::sync::Arc;
use std::time::Instant;

use jarurat_shared::{
    CareError, JsonStore, SupportRecord, VolunteerRecord, SUPPORT_FILE, VOLUNTEER_FILE,
};
use tracing::info;

use crate::config::Config;
use crate::reconciler::Reconciler;
use crate::triage::{Classifier, KeywordSets};

pub struct AppState {
    pub config: Config,
    pub classifier: Classifier,
    pub reconciler: Reconciler,
    pub support: JsonStore<SupportRecord>,
    pub volunteers: JsonStore<VolunteerRecord>,
    pub started_at: Instant,
}

impl AppState {
    /// State with the provider described by `config.ai`
    pub fn from_config(config: Config) -> Result<Self, CareError> {
        let reconciler = Reconciler::from_config(&config.ai);
        Self::with_reconciler(config, reconciler)
    }

    /// State with an explicit reconciler (tests inject scripted providers)
    pub fn with_reconciler(config: Config, reconciler: Reconciler) -> Result<Self, CareError> {
        let data_dir = &config.server.data_dir;
        let support = JsonStore::open(data_dir.join(SUPPORT_FILE))?;
        let volunteers = JsonStore::open(data_dir.join(VOLUNTEER_FILE))?;
        info!(
            "Stores: {}, {}",
            support.path().display(),
            volunteers.path().display()
        );
        let classifier = Classifier::new(KeywordSets::from(&config.triage));

        Ok(Self {
            config,
            classifier,
            reconciler,
            support,
            volunteers,
            started_at: Instant::now(),
        })
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

/// Thread-safe shared state handle
pub type SharedState = Arc<AppState>;
