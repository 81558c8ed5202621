//! Multi-altitude flux scans of extensive air showers
//!
//! Gathers per-viewing-angle Cherenkov photon counts from simulation `npz`
//! outputs and X-ray synchrotron band fluxes from precomputed tables, for
//! balloon altitudes of 10, 20 and 30km, either above or below the Earth
//! limb, and assembles them into plot-ready flux vs. viewing angle curves.

pub mod error;
pub mod geometry;
#[cfg(feature = "plot")]
pub mod plot;
pub mod scan;
pub mod series;
pub mod shower;
pub mod xray;

pub use error::Error;
pub use geometry::EARTH_RADIUS_KM;
pub use scan::{Altitude, AltitudeDataset, Scan, View, BELOW_LIMB_BOUNDARY_DEG};
pub use series::{assemble, Curve, EmergenceCurve, Figure, FluxSeries, Marker};
pub use shower::{AngleSample, LoadReport, Region, ShowerLoader};
pub use xray::{FluxRecord, FluxTable};
