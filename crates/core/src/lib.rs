//! # AdOps Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for the remote platform and artifact storage
//! - Resource resolvers and the retrying mutator
//! - Geo targeting and conversion pixel updaters
//! - The report orchestrator
//!
//! ## Architecture Principles
//! - Only depends on `adops-common` and `adops-domain`
//! - No HTTP or filesystem code
//! - All external dependencies via traits
//! - Every operation takes the caller's [`Session`](adops_domain::Session)
//!   explicitly; nothing here stores it

pub mod campaign;
pub mod mutation;
pub mod report;
pub mod session;

pub use campaign::ports::CampaignApi;
pub use campaign::{GeoUpdater, PixelUpdater, TargetingResolver};
pub use mutation::RetryingMutator;
pub use report::ports::{ArtifactStore, ReportApi};
pub use report::{PollEnd, PollOutcome, PollPolicy, ReportOrchestrator};
pub use session::ports::Authenticator;
pub use session::SessionService;
