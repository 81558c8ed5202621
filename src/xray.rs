use std::{fs::File, io, ops::Deref, path::Path};

use serde::Deserialize;

use crate::series::FluxSeries;

#[derive(Debug, thiserror::Error)]
pub enum FluxTableError {
    #[error("cannot open flux table {1:?}")]
    Io(#[source] io::Error, std::path::PathBuf),
    #[error("flux table {1:?}")]
    Csv(#[source] csv::Error, String),
    #[error("non-positive footprint area {area} m^2 at theta {theta_deg} deg")]
    Area { theta_deg: f64, area: f64 },
}
type Result<T> = std::result::Result<T, FluxTableError>;

/// One row of a precomputed X-ray synchrotron flux table
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct FluxRecord {
    pub theta_deg: f64,
    pub band0_rx: f64,
    pub band1_rx: f64,
    pub band2_rx: f64,
    pub area0_m2: f64,
}
impl FluxRecord {
    /// Total photon flux per unit area over the three sensor bands
    pub fn total_flux(&self) -> Result<f64> {
        if self.area0_m2 <= 0. {
            return Err(FluxTableError::Area {
                theta_deg: self.theta_deg,
                area: self.area0_m2,
            });
        }
        Ok((self.band0_rx + self.band1_rx + self.band2_rx) / self.area0_m2)
    }
}

/// An X-ray flux table for one altitude-and-view key, rows in the
/// angle order the table producer wrote them
#[derive(Debug)]
pub struct FluxTable(Vec<FluxRecord>);
impl Deref for FluxTable {
    type Target = Vec<FluxRecord>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl FluxTable {
    /// Load the table stored under `key` (e.g. "above_30km") in the keyed
    /// csv store; a missing table or column is fatal
    pub fn load<P: AsRef<Path>>(store: P, key: &str) -> Result<Self> {
        let path = store.as_ref().join(key).with_extension("csv");
        let file = File::open(&path).map_err(|e| FluxTableError::Io(e, path.clone()))?;
        Self::from_csv(file, key)
    }
    pub fn from_csv<R: io::Read>(reader: R, key: &str) -> Result<Self> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut rows = Vec::new();
        for result in rdr.deserialize() {
            rows.push(result.map_err(|e| FluxTableError::Csv(e, key.to_string()))?);
        }
        Ok(Self(rows))
    }
    /// Per-row total flux against the table's own angle column
    pub fn overall_flux(&self) -> Result<FluxSeries> {
        self.iter()
            .map(|record| record.total_flux().map(|flux| (record.theta_deg, flux)))
            .collect()
    }
}
