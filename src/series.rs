use std::ops::Deref;

use crate::{
    error::Error,
    geometry::to_observer_frame,
    scan::{Altitude, Scan, View, BELOW_LIMB_BOUNDARY_DEG},
    shower::{Region, ShowerLoader},
    xray::FluxTable,
};

/// Ordered sequence of (angle [deg], flux) pairs
pub type FluxSeries = Vec<(f64, f64)>;

/// A labeled plot-ready curve tied to one altitude
#[derive(Debug, Clone)]
pub struct Curve {
    pub label: String,
    pub altitude: Altitude,
    pub points: FluxSeries,
}

/// Vertical limb-angle marker for one altitude
#[derive(Debug, Clone)]
pub struct Marker {
    pub label: String,
    pub altitude: Altitude,
    pub angle_deg: f64,
}

/// Shower emergence probabilities, indexed by position along the
/// below-limb angle scan rather than by angle value
pub struct EmergenceCurve(Vec<f64>);
impl Deref for EmergenceCurve {
    type Target = Vec<f64>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl Default for EmergenceCurve {
    fn default() -> Self {
        Self(EMERGENCE_PROBABILITY.to_vec())
    }
}
impl From<Vec<f64>> for EmergenceCurve {
    fn from(probabilities: Vec<f64>) -> Self {
        Self(probabilities)
    }
}
impl EmergenceCurve {
    /// Pair the probabilities with the backing series' angle axis by
    /// position, cutting to the shorter of the two
    ///
    /// The horizontal placement is only meaningful as long as the upstream
    /// angle scan matches the grid the probabilities were computed on
    pub fn overlay(&self, backing: &Curve) -> Curve {
        Curve {
            label: "Emergence probability".to_string(),
            altitude: backing.altitude,
            points: backing
                .points
                .iter()
                .map(|&(angle_deg, _)| angle_deg)
                .zip(self.0.iter().copied())
                .collect(),
        }
    }
}

/// Everything one figure needs, in data form: the plotting layer is a sink
#[derive(Debug, Default)]
pub struct Figure {
    pub cherenkov: Vec<Curve>,
    pub xray: Vec<Curve>,
    pub markers: Vec<Marker>,
    pub emergence: Option<Curve>,
}
impl Figure {
    pub fn summary(&self) {
        println!("FIGURE:");
        for curve in self.cherenkov.iter().chain(self.xray.iter()) {
            let (theta_min, theta_max) = curve
                .points
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &(t, _)| {
                    (min.min(t), max.max(t))
                });
            println!(
                " - {:32}: {:4} points, theta [{:7.3}-{:7.3}] deg",
                curve.label,
                curve.points.len(),
                theta_min,
                theta_max
            );
        }
        for marker in &self.markers {
            println!(" - {:32}: theta {:7.3} deg", marker.label, marker.angle_deg);
        }
        if let Some(curve) = &self.emergence {
            println!(
                " - {:32}: {:4} points, backed by {}",
                curve.label,
                curve.points.len(),
                curve.altitude.to_pretty_string()
            );
        }
    }
}

/// Run the whole pipeline for one figure: per altitude, load and filter the
/// Cherenkov samples (rewriting the angle axis to the observer frame in the
/// below-limb view), aggregate the X-ray table, place the limb marker; in
/// the below-limb view overlay the emergence probabilities on the backing
/// altitude's transformed series
///
/// Altitudes are independent; nothing is merged or interpolated across them
pub fn assemble(scan: &Scan) -> Result<Figure, Error> {
    let mut figure = Figure::default();
    for dataset in &scan.datasets {
        let region = match scan.view {
            View::Above => Region::AboveAxis(dataset.optical_axis),
            View::Below => Region::BelowBoundary(BELOW_LIMB_BOUNDARY_DEG),
        };
        let report = ShowerLoader::new(&dataset.folder).region(region).load()?;
        log::info!(
            "{}: {} samples, {} skipped",
            dataset.altitude,
            report.len(),
            report.skipped.len()
        );
        let mut samples = report.samples;
        if let View::Below = scan.view {
            to_observer_frame(&mut samples, dataset.altitude.km());
        }
        if !samples.is_empty() {
            figure.cherenkov.push(Curve {
                label: format!(
                    "Cherenkov emission {}",
                    dataset.altitude.to_pretty_string()
                ),
                altitude: dataset.altitude,
                points: samples.iter().map(|s| (s.angle_deg, s.count)).collect(),
            });
        }
        figure.markers.push(Marker {
            label: format!(
                "Limb-viewing angle {}",
                dataset.altitude.to_pretty_string()
            ),
            altitude: dataset.altitude,
            angle_deg: dataset.optical_axis,
        });
        let table = FluxTable::load(&scan.store, &scan.view.table_key(dataset.altitude))?;
        figure.xray.push(Curve {
            label: format!("X-ray emission {}", dataset.altitude.to_pretty_string()),
            altitude: dataset.altitude,
            points: table.overall_flux()?,
        });
    }
    if let View::Below = scan.view {
        match scan
            .backing_altitude()
            .and_then(|altitude| figure.cherenkov.iter().find(|c| c.altitude == altitude))
        {
            Some(backing) => figure.emergence = Some(EmergenceCurve::default().overlay(backing)),
            None => log::warn!("no backing series for the emergence probability overlay"),
        }
    }
    Ok(figure)
}

/// Precomputed shower emergence probabilities along the below-limb scan
pub const EMERGENCE_PROBABILITY: [f64; 57] = [
    2.02169133e-03,
    1.80986219e-03,
    1.64989844e-03,
    1.23674768e-03,
    1.02298836e-03,
    8.38838978e-04,
    6.50581475e-04,
    5.07186554e-04,
    3.92577600e-04,
    3.18449487e-04,
    2.45138649e-04,
    1.98058350e-04,
    1.69064517e-04,
    1.45671753e-04,
    1.16596352e-04,
    1.03982740e-04,
    8.69033411e-05,
    7.52353981e-05,
    6.46191114e-05,
    5.49691906e-05,
    4.71997205e-05,
    3.99570455e-05,
    3.66770393e-05,
    3.02926141e-05,
    2.56558095e-05,
    2.20945082e-05,
    1.90275537e-05,
    1.66590946e-05,
    1.46538173e-05,
    1.28899179e-05,
    1.11854525e-05,
    9.68366193e-06,
    8.38350604e-06,
    7.59581015e-06,
    6.90704198e-06,
    6.28072949e-06,
    6.00000000e-06,
    5.00000000e-06,
    4.00000000e-06,
    3.00000000e-06,
    0.,
    0.,
    0.,
    0.,
    0.,
    0.,
    0.,
    0.,
    0.,
    0.,
    0.,
    0.,
    0.,
    0.,
    0.,
    0.,
    0.,
];

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::geometry::apparent_viewing_angle;

    #[test]
    fn above_limb_figure() {
        let scan = Scan::new(View::Above, "data/xray").dataset(Altitude::Ten, "data/above_10km_npz");
        let figure = assemble(&scan).unwrap();
        assert_eq!(figure.cherenkov.len(), 1);
        assert_eq!(
            figure.cherenkov[0].points,
            vec![(87.5, 5.0), (90.0, 2.0)]
        );
        assert_eq!(figure.cherenkov[0].label, "Cherenkov emission 10 km");
        assert_eq!(figure.markers.len(), 1);
        assert_abs_diff_eq!(figure.markers[0].angle_deg, 86.79122);
        assert_eq!(figure.xray.len(), 1);
        assert!(figure.emergence.is_none());
    }

    #[test]
    fn below_limb_figure() {
        let scan = Scan::new(View::Below, "data/xray").dataset(Altitude::Ten, "data/below_10km_npz");
        let figure = assemble(&scan).unwrap();
        let cherenkov = &figure.cherenkov[0];
        // incidence-ascending in, viewing-angle-descending out
        assert!(cherenkov
            .points
            .windows(2)
            .all(|w| w[0].0 > w[1].0));
        assert_abs_diff_eq!(
            cherenkov.points[0].0,
            apparent_viewing_angle(30., 10.),
            epsilon = 1e-9
        );
        let emergence = figure.emergence.expect("emergence overlay");
        assert_eq!(emergence.altitude, Altitude::Ten);
        // positional truncation to the backing series length
        assert_eq!(emergence.points.len(), cherenkov.points.len());
        assert_eq!(emergence.points[0].1, EMERGENCE_PROBABILITY[0]);
        assert_eq!(emergence.points[0].0, cherenkov.points[0].0);
    }

    #[test]
    fn backing_altitude_is_explicit() {
        let scan = Scan::new(View::Below, "data/xray")
            .dataset(Altitude::Ten, "data/below_10km_npz")
            .dataset(Altitude::Twenty, "data/below_20km_npz")
            .emergence_backing(Altitude::Ten);
        let figure = assemble(&scan).unwrap();
        assert_eq!(figure.emergence.unwrap().altitude, Altitude::Ten);
    }

    #[test]
    fn overlay_cuts_to_the_shorter() {
        let backing = Curve {
            label: "backing".to_string(),
            altitude: Altitude::Thirty,
            points: (0..3).map(|k| (f64::from(k), 1.)).collect(),
        };
        let overlay = EmergenceCurve::from(vec![0.5, 0.25]).overlay(&backing);
        assert_eq!(overlay.points, vec![(0., 0.5), (1., 0.25)]);
    }
}
