//! Figure rendering, the presentation end of the pipeline

use std::path::Path;

use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::{
    scan::{Altitude, View},
    series::{Curve, Figure},
};

fn color(altitude: Altitude) -> RGBColor {
    let c = colorous::CATEGORY10[altitude as usize];
    RGBColor(c.r, c.g, c.b)
}

fn positive(curve: &Curve) -> impl Iterator<Item = (f64, f64)> + '_ {
    // log axis, nonpositive values cannot be placed
    curve.points.iter().copied().filter(|&(_, y)| y > 0.)
}

/// Render one figure to an SVG file: Cherenkov counts and X-ray fluxes on a
/// log flux axis, limb markers, and in the below-limb view the emergence
/// probabilities on a secondary log axis
pub fn render<P: AsRef<Path>>(figure: &Figure, view: View, path: P) {
    let (x_range, y_max) = match view {
        View::Above => (84f64..140f64, 1e8),
        View::Below => (40f64..88f64, 1e9),
    };
    let plot = SVGBackend::new(&path, (900, 600)).into_drawing_area();
    plot.fill(&WHITE).unwrap();

    let mut chart = ChartBuilder::on(&plot)
        .set_label_area_size(LabelAreaPosition::Left, 60)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .set_label_area_size(LabelAreaPosition::Right, 60)
        .margin(10)
        .build_cartesian_2d(x_range.clone(), (1e-1..y_max).log_scale())
        .unwrap()
        .set_secondary_coord(x_range, (1e-7f64..1e-2f64).log_scale());
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Viewing angle [deg]")
        .y_desc("Flux [photons/m^2]")
        .draw()
        .unwrap();

    for curve in &figure.cherenkov {
        let rgb = color(curve.altitude);
        chart
            .draw_series(LineSeries::new(positive(curve), rgb.stroke_width(3)))
            .unwrap()
            .label(&curve.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &rgb));
    }
    for curve in &figure.xray {
        let rgb = color(curve.altitude);
        chart
            .draw_series(DashedLineSeries::new(
                positive(curve),
                8,
                4,
                rgb.stroke_width(2),
            ))
            .unwrap()
            .label(&curve.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &rgb));
    }
    for marker in &figure.markers {
        let rgb = color(marker.altitude);
        chart
            .draw_series(DashedLineSeries::new(
                vec![(marker.angle_deg, 1e-1), (marker.angle_deg, y_max)],
                2,
                4,
                rgb.stroke_width(2),
            ))
            .unwrap()
            .label(&marker.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &rgb));
    }
    if let Some(curve) = &figure.emergence {
        let rgb = RGBColor(128, 128, 128);
        chart
            .draw_secondary_series(LineSeries::new(positive(curve), rgb.stroke_width(3)))
            .unwrap()
            .label(&curve.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &rgb));
        chart
            .configure_secondary_axes()
            .y_desc("Emergence probability")
            .y_label_formatter(&|p: &f64| format!("1e{}", p.log10().round() as i32))
            .draw()
            .unwrap();
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .position(SeriesLabelPosition::UpperRight)
        .draw()
        .unwrap();
    plot.present().unwrap();
}
