use std::{
    fmt,
    path::{Path, PathBuf},
};

use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Below-limb viewing region upper bound [deg]
pub const BELOW_LIMB_BOUNDARY_DEG: f64 = 100.;

/// Observation altitude of the instrument
#[derive(EnumIter, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Altitude {
    Ten,
    Twenty,
    Thirty,
}
impl Altitude {
    pub fn km(&self) -> f64 {
        match self {
            Altitude::Ten => 10f64,
            Altitude::Twenty => 20f64,
            Altitude::Thirty => 30f64,
        }
    }
    /// Viewing angle at which the line of sight is tangent to the Earth surface [deg]
    pub fn optical_axis(&self) -> f64 {
        match self {
            Altitude::Ten => 86.79122,
            Altitude::Twenty => 85.467693,
            Altitude::Thirty => 84.453558,
        }
    }
    pub fn to_pretty_string(&self) -> String {
        format!("{} km", self.km())
    }
}
impl From<Altitude> for f64 {
    fn from(altitude: Altitude) -> Self {
        altitude.km()
    }
}
impl From<&Altitude> for f64 {
    fn from(altitude: &Altitude) -> Self {
        altitude.km()
    }
}
impl fmt::Display for Altitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Altitude::Ten => write!(f, "10km"),
            Altitude::Twenty => write!(f, "20km"),
            Altitude::Thirty => write!(f, "30km"),
        }
    }
}

/// Viewing geometry with respect to the Earth limb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Above,
    Below,
}
impl View {
    /// Key of the X-ray flux table for the given altitude, e.g. "above_30km"
    pub fn table_key(&self, altitude: Altitude) -> String {
        format!("{}_{}", self, altitude)
    }
}
impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::Above => write!(f, "above"),
            View::Below => write!(f, "below"),
        }
    }
}

/// One altitude worth of per-angle Cherenkov simulation outputs
#[derive(Debug, Clone)]
pub struct AltitudeDataset {
    pub altitude: Altitude,
    pub folder: PathBuf,
    pub optical_axis: f64,
}
impl AltitudeDataset {
    pub fn new<P: AsRef<Path>>(altitude: Altitude, folder: P) -> Self {
        Self {
            altitude,
            folder: folder.as_ref().to_path_buf(),
            optical_axis: altitude.optical_axis(),
        }
    }
}

/// A complete flux scan configuration: one dataset per altitude plus the
/// X-ray flux table store, all tied to a single viewing geometry
#[derive(Debug, Clone)]
pub struct Scan {
    pub view: View,
    pub store: PathBuf,
    pub datasets: Vec<AltitudeDataset>,
    /// Altitude whose transformed Cherenkov series backs the emergence
    /// probability overlay (below-limb view only); defaults to the last
    /// configured dataset
    pub emergence_backing: Option<Altitude>,
}
impl Scan {
    pub fn new<P: AsRef<Path>>(view: View, store: P) -> Self {
        Self {
            view,
            store: store.as_ref().to_path_buf(),
            datasets: Vec::new(),
            emergence_backing: None,
        }
    }
    pub fn dataset<P: AsRef<Path>>(mut self, altitude: Altitude, folder: P) -> Self {
        self.datasets.push(AltitudeDataset::new(altitude, folder));
        self
    }
    pub fn emergence_backing(self, altitude: Altitude) -> Self {
        Self {
            emergence_backing: Some(altitude),
            ..self
        }
    }
    /// All three altitudes following the conventional repository layout:
    /// `<root>/<view>_<altitude>_npz`
    pub fn from_repo<P: AsRef<Path>, Q: AsRef<Path>>(view: View, root: P, store: Q) -> Self {
        Altitude::iter().fold(Self::new(view, store), |scan, altitude| {
            let folder = root
                .as_ref()
                .join(format!("{}_{}_npz", view, altitude));
            scan.dataset(altitude, folder)
        })
    }
    /// The altitude backing the emergence probability overlay
    pub fn backing_altitude(&self) -> Option<Altitude> {
        self.emergence_backing
            .or_else(|| self.datasets.last().map(|dataset| dataset.altitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_keys() {
        assert_eq!(View::Above.table_key(Altitude::Thirty), "above_30km");
        assert_eq!(View::Below.table_key(Altitude::Ten), "below_10km");
    }

    #[test]
    fn repo_layout() {
        let scan = Scan::from_repo(View::Below, "data", "data/xray");
        assert_eq!(scan.datasets.len(), 3);
        assert_eq!(
            scan.datasets[0].folder,
            Path::new("data").join("below_10km_npz")
        );
        assert_eq!(scan.backing_altitude(), Some(Altitude::Thirty));
    }

    #[test]
    fn explicit_backing() {
        let scan =
            Scan::from_repo(View::Below, "data", "data/xray").emergence_backing(Altitude::Ten);
        assert_eq!(scan.backing_altitude(), Some(Altitude::Ten));
    }
}
