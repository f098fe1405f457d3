//! Campaign targeting: resolvers plus the geo and pixel updaters

pub mod geo;
pub mod pixel;
pub mod ports;
pub mod resolvers;

pub use geo::GeoUpdater;
pub use pixel::PixelUpdater;
pub use resolvers::TargetingResolver;
