//! Application context - dependency injection container

use std::path::PathBuf;
use std::sync::Arc;

use adops_core::{
    GeoUpdater, PixelUpdater, PollPolicy, ReportOrchestrator, RetryingMutator, SessionService,
    TargetingResolver,
};
use adops_domain::{Config, Result};
use adops_infra::{AdPlatformClient, FsArtifactStore};

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub sessions: SessionService,
    pub resolver: TargetingResolver,
    pub geo: GeoUpdater,
    pub pixels: PixelUpdater,
    client: Arc<AdPlatformClient>,
}

impl AppContext {
    /// Wire the platform client and core services from `config`.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let client = Arc::new(AdPlatformClient::from_config(&config.api)?);
        let mutator = RetryingMutator::from_settings(&config.retry)?;

        Ok(Self {
            sessions: SessionService::new(client.clone()),
            resolver: TargetingResolver::new(client.clone()),
            geo: GeoUpdater::new(client.clone(), mutator.clone()),
            pixels: PixelUpdater::new(client.clone(), mutator),
            client,
            config,
        })
    }

    /// Report orchestrator writing into `output_dir`, or the configured
    /// directory when `None`.
    pub fn report_orchestrator(&self, output_dir: Option<PathBuf>) -> ReportOrchestrator {
        let dir = output_dir.unwrap_or_else(|| PathBuf::from(&self.config.report.output_dir));
        ReportOrchestrator::new(self.client.clone(), Arc::new(FsArtifactStore::new(dir)))
            .with_poll_policy(PollPolicy::from(&self.config.report))
            .with_file_prefix(self.config.report.file_prefix.clone())
    }
}
