//! Spherical-Earth limb viewing geometry

use crate::shower::AngleSample;

/// Earth radius [km]
pub const EARTH_RADIUS_KM: f64 = 6378.;

/// Observer-frame viewing angle [deg] of a ray that crosses the shower
/// frame at `incidence_deg` for an instrument at `altitude_km`
///
/// `sin(theta_view) = R/(R+h) cos(theta_inc)`; the sine is clamped to
/// [-1, 1] so the arcsine stays defined for any real input angle
pub fn apparent_viewing_angle(incidence_deg: f64, altitude_km: f64) -> f64 {
    let value = (EARTH_RADIUS_KM / (EARTH_RADIUS_KM + altitude_km))
        * incidence_deg.to_radians().cos();
    value.clamp(-1., 1.).asin().to_degrees()
}

/// Viewing angle tangent to the Earth surface [deg] at `altitude_km`
pub fn limb_viewing_angle(altitude_km: f64) -> f64 {
    (EARTH_RADIUS_KM / (EARTH_RADIUS_KM + altitude_km))
        .asin()
        .to_degrees()
}

/// Rewrite each sample's shower-frame incidence angle as the observer-frame
/// viewing angle, counts untouched
///
/// The mapping is monotone decreasing over the below-limb domain, so an
/// incidence-ascending slice comes out viewing-angle-descending; the order
/// is left as is
pub fn to_observer_frame(samples: &mut [AngleSample], altitude_km: f64) {
    samples
        .iter_mut()
        .for_each(|sample| sample.angle_deg = apparent_viewing_angle(sample.angle_deg, altitude_km));
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::scan::Altitude;

    #[test]
    fn nadir_ray_meets_the_limb() {
        // 6378/6388 = 0.998434.., asin -> 86.79 deg
        assert_abs_diff_eq!(apparent_viewing_angle(0., 10.), 86.79122, epsilon = 0.01);
    }

    #[test]
    fn limb_matches_the_configured_axes() {
        for altitude in [Altitude::Ten, Altitude::Twenty, Altitude::Thirty] {
            assert_abs_diff_eq!(
                limb_viewing_angle(altitude.km()),
                altitude.optical_axis(),
                epsilon = 0.01
            );
        }
    }

    #[test]
    fn arcsine_always_defined() {
        for incidence in (-360..=720).map(f64::from) {
            assert!(apparent_viewing_angle(incidence, 10.).is_finite());
        }
    }

    #[test]
    fn clamp_is_idempotent() {
        for x in [-3.5f64, -1., -0.2, 0., 0.99, 1., 42.] {
            let once: f64 = x.clamp(-1., 1.);
            assert_eq!(once.clamp(-1., 1.), once);
            assert!(once.asin().is_finite());
        }
    }

    #[test]
    fn monotone_decreasing_over_the_scan() {
        let mut samples: Vec<_> = (0..100)
            .map(|k| AngleSample {
                angle_deg: f64::from(k),
                count: 1.,
            })
            .collect();
        to_observer_frame(&mut samples, 10.);
        assert!(samples
            .windows(2)
            .all(|w| w[0].angle_deg > w[1].angle_deg));
    }
}
