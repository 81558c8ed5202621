use std::{
    io,
    path::{Path, PathBuf},
};

use glob::glob;
use itertools::Itertools;
use npyz::npz::NpzArchive;
use regex::Regex;

#[derive(Debug, thiserror::Error)]
pub enum ShowerError {
    #[error("no viewing angle in file name {0:?}")]
    Parse(String),
    #[error("bad `dist_counts` payload in {1:?}: {0}")]
    Payload(String, PathBuf),
    #[error("cannot read {1:?}")]
    Io(#[source] io::Error, PathBuf),
    #[error("{0:?} is not a dataset folder")]
    Folder(PathBuf),
    #[error("invalid npz glob pattern")]
    Pattern(#[from] glob::PatternError),
    #[error("invalid angle suffix regex")]
    Regex(#[from] regex::Error),
}
type Result<T> = std::result::Result<T, ShowerError>;

/// Cherenkov photon count at a single viewing (or shower incidence) angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSample {
    pub angle_deg: f64,
    pub count: f64,
}

/// Angular region a sample must fall in to enter a series
#[derive(Debug, Clone, Copy)]
pub enum Region {
    /// Strictly greater than the optical-axis (limb) angle [deg]
    AboveAxis(f64),
    /// Strictly less than the below-limb boundary [deg]
    BelowBoundary(f64),
}
impl Region {
    pub fn contains(&self, angle_deg: f64) -> bool {
        match self {
            Region::AboveAxis(axis) => angle_deg > *axis,
            Region::BelowBoundary(boundary) => angle_deg < *boundary,
        }
    }
}

/// Reconstruct the viewing angle encoded in the two trailing
/// underscore-delimited segments of a file stem, e.g. "output_86_25" -> 86.25
pub fn viewing_angle(stem: &str) -> Result<f64> {
    let re = Regex::new(r"(\d+)_(\d+)$")?;
    let capts = re
        .captures(stem)
        .ok_or_else(|| ShowerError::Parse(stem.to_string()))?;
    format!("{}.{}", &capts[1], &capts[2])
        .parse()
        .map_err(|_| ShowerError::Parse(stem.to_string()))
}

/// Samples that made it into a series along with the per-file faults that
/// were skipped on the way
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Surviving samples, sorted by angle ascending
    pub samples: Vec<AngleSample>,
    pub skipped: Vec<(PathBuf, ShowerError)>,
}
impl LoadReport {
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
    /// Returns the angle vector and the count vector
    pub fn unzip(&self) -> (Vec<f64>, Vec<f64>) {
        self.samples.iter().map(|s| (s.angle_deg, s.count)).unzip()
    }
}

/// Per-angle `npz` dataset loader for one altitude
pub struct ShowerLoader {
    folder: PathBuf,
    region: Region,
}
impl ShowerLoader {
    pub fn new<P: AsRef<Path>>(folder: P) -> Self {
        Self {
            folder: folder.as_ref().to_path_buf(),
            region: Region::AboveAxis(f64::NEG_INFINITY),
        }
    }
    pub fn region(self, region: Region) -> Self {
        Self { region, ..self }
    }
    /// Enumerates the folder's `npz` files in name order, extracts one
    /// [AngleSample] per file and keeps the ones inside the region, sorted
    /// by angle ascending
    ///
    /// A file with an unparsable name or a missing/empty `dist_counts`
    /// array is logged, counted in the report and skipped; an unreachable
    /// folder aborts the load
    pub fn load(&self) -> Result<LoadReport> {
        if !self.folder.is_dir() {
            return Err(ShowerError::Folder(self.folder.clone()));
        }
        let pattern = self.folder.join("*.npz");
        let paths: Vec<PathBuf> = glob(pattern.to_str().unwrap())?
            .filter_map(std::result::Result::ok)
            .sorted()
            .collect();
        log::info!("{:?}: {} npz files", self.folder, paths.len());
        let mut report = LoadReport::default();
        for path in paths {
            match Self::sample(&path) {
                Ok(sample) if self.region.contains(sample.angle_deg) => {
                    report.samples.push(sample)
                }
                Ok(_) => (),
                Err(e) => {
                    log::warn!("skipping {:?}: {}", path, e);
                    report.skipped.push((path, e));
                }
            }
        }
        // stable, so equal angles keep name order
        report
            .samples
            .sort_by(|a, b| a.angle_deg.total_cmp(&b.angle_deg));
        Ok(report)
    }
    fn sample(path: &Path) -> Result<AngleSample> {
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .ok_or_else(|| ShowerError::Parse(format!("{:?}", path)))?;
        let angle_deg = viewing_angle(stem)?;
        let mut npz =
            NpzArchive::open(path).map_err(|e| ShowerError::Io(e, path.to_path_buf()))?;
        let counts: Vec<f64> = npz
            .by_name("dist_counts")
            .map_err(|e| ShowerError::Io(e, path.to_path_buf()))?
            .ok_or_else(|| {
                ShowerError::Payload("no `dist_counts` array".to_string(), path.to_path_buf())
            })?
            .into_vec()
            .map_err(|e| ShowerError::Io(e, path.to_path_buf()))?;
        let count = *counts.first().ok_or_else(|| {
            ShowerError::Payload("`dist_counts` is empty".to_string(), path.to_path_buf())
        })?;
        Ok(AngleSample { angle_deg, count })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_from_name() {
        assert_eq!(viewing_angle("output_86_25").unwrap(), 86.25);
        assert_eq!(viewing_angle("sim_90_00").unwrap(), 90.0);
        assert_eq!(viewing_angle("below_sim_5_75").unwrap(), 5.75);
    }

    #[test]
    fn angle_from_bad_name() {
        assert!(matches!(
            viewing_angle("sim_calib"),
            Err(ShowerError::Parse(_))
        ));
        assert!(matches!(viewing_angle("90"), Err(ShowerError::Parse(_))));
        assert!(matches!(
            viewing_angle("sim_86_25b"),
            Err(ShowerError::Parse(_))
        ));
    }

    #[test]
    fn above_limb_scenario() {
        let report = ShowerLoader::new("data/above_10km_npz")
            .region(Region::AboveAxis(86.79122))
            .load()
            .unwrap();
        assert_eq!(
            report.samples,
            vec![
                AngleSample {
                    angle_deg: 87.5,
                    count: 5.0
                },
                AngleSample {
                    angle_deg: 90.0,
                    count: 2.0
                },
            ]
        );
        // one unparsable name, one missing array, one empty array
        assert_eq!(report.skipped.len(), 3);
    }

    #[test]
    fn below_limb_sorted() {
        let report = ShowerLoader::new("data/below_10km_npz")
            .region(Region::BelowBoundary(100.))
            .load()
            .unwrap();
        assert!(!report.is_empty());
        let (angles, _) = report.unzip();
        assert!(angles.windows(2).all(|w| w[0] < w[1]));
        assert!(angles.iter().all(|&a| a < 100.));
    }

    #[test]
    fn missing_folder_is_fatal() {
        let result = ShowerLoader::new("data/no_such_npz").load();
        assert!(matches!(result, Err(ShowerError::Folder(_))));
    }
}
