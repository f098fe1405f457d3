//! Domain types and models

pub mod batch;
pub mod pixel;
pub mod report;
pub mod session;
pub mod targeting;

pub use batch::{BatchReport, ItemOutcome};
pub use pixel::{activate_pixel, Pixel, PixelChange, PixelState};
pub use report::{
    artifact_file_name, artifact_file_name_now, ReportArtifact, ReportFormat, ReportRequest,
    ReportState, ReportStatus, ReportWindow,
};
pub use session::{Credentials, Session};
pub use targeting::{filter_cities_by_country, City, CityTarget, CityTargetList};

/// Remote identifier of a line item.
pub type LineItemId = u64;
/// Remote identifier of an insertion order.
pub type InsertionOrderId = u64;
/// Remote identifier of a targeting profile.
pub type ProfileId = u64;
/// Remote identifier of an advertiser.
pub type AdvertiserId = u64;
/// Remote identifier of a conversion pixel.
pub type PixelId = u64;
