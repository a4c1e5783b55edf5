//! Static two-panel figure: a histogram of `feature_1` next to a
//! `feature_1` vs `feature_2` scatter coloured by target.
//!
//! Rendering needs the `plots` feature; binning is always available.

use std::path::Path;

use crate::data::model::SampleFrame;
use crate::error::DemoError;

/// Figure size in pixels (10×4 inches at 150 dpi).
pub const FIGURE_SIZE: (u32, u32) = (1500, 600);
pub const HISTOGRAM_BINS: usize = 20;

// ---------------------------------------------------------------------------
// Histogram binning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: u32,
}

/// Split `[min, max]` into `bins` equal-width bins. Every bin is half-open
/// except the last, which also takes the maximum. A constant input gets a
/// unit-wide range centred on the value.
pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        min -= 0.5;
        max += 0.5;
    }
    let width = (max - min) / bins as f64;

    let mut counts = vec![0u32; bins];
    for v in finite {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| Bin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Padded axis range covering `values`.
fn axis_range(values: &[f64]) -> std::ops::Range<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return 0.0..1.0;
    }
    let pad = ((max - min) * 0.05).max(0.5);
    (min - pad)..(max + pad)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Render the figure and write it as a PNG at `path`.
#[cfg(feature = "plots")]
pub fn render_demo_plots(frame: &SampleFrame, path: &Path) -> Result<(), DemoError> {
    use plotters::prelude::*;

    use crate::color::{histogram_fill, target_color, Rgb};
    use crate::data::model::Feature;

    fn rgb(c: Rgb) -> RGBColor {
        RGBColor(c.0, c.1, c.2)
    }
    fn plot_err<E: std::fmt::Display>(e: E) -> DemoError {
        DemoError::Plot(e.to_string())
    }

    if frame.is_empty() {
        return Err(DemoError::Plot("no rows to plot".to_string()));
    }

    let (width, height) = FIGURE_SIZE;
    let mut buffer = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, FIGURE_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(plot_err)?;
        let (left, right) = root.split_horizontally(width / 2);

        // ---- Left: feature_1 histogram ----
        let feature_1 = frame.column_values(Feature::One);
        let bins = histogram(&feature_1, HISTOGRAM_BINS);
        let x_start = bins.first().map(|b| b.start).unwrap_or(0.0);
        let x_end = bins.last().map(|b| b.end).unwrap_or(1.0);
        let y_max = bins.iter().map(|b| b.count).max().unwrap_or(0) + 1;

        let mut hist = ChartBuilder::on(&left)
            .caption("Feature 1 Distribution", ("sans-serif", 26))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(x_start..x_end, 0u32..y_max)
            .map_err(plot_err)?;
        hist.configure_mesh()
            .x_desc("Value")
            .y_desc("Frequency")
            .draw()
            .map_err(plot_err)?;
        let fill = rgb(histogram_fill()).mix(0.7).filled();
        hist.draw_series(
            bins.iter()
                .map(|b| Rectangle::new([(b.start, 0), (b.end, b.count)], fill)),
        )
        .map_err(plot_err)?;

        // ---- Right: feature_1 vs feature_2 scatter ----
        let feature_2 = frame.column_values(Feature::Two);
        let mut scatter = ChartBuilder::on(&right)
            .caption("Feature 1 vs Feature 2", ("sans-serif", 26))
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(55)
            .build_cartesian_2d(axis_range(&feature_1), axis_range(&feature_2))
            .map_err(plot_err)?;
        scatter
            .configure_mesh()
            .x_desc("Feature 1")
            .y_desc("Feature 2")
            .draw()
            .map_err(plot_err)?;
        scatter
            .draw_series(frame.records.iter().map(|r| {
                let color = rgb(target_color(r.target)).mix(0.6).filled();
                Circle::new((r.feature_1, r.feature_2), 5, color)
            }))
            .map_err(plot_err)?;

        root.present().map_err(plot_err)?;
    }

    let figure = image::RgbImage::from_raw(width, height, buffer)
        .ok_or_else(|| DemoError::Plot("pixel buffer has the wrong size".to_string()))?;
    figure.save(path).map_err(plot_err)?;
    log::info!("wrote {}x{} figure to {}", width, height, path.display());
    Ok(())
}

#[cfg(not(feature = "plots"))]
pub fn render_demo_plots(_frame: &SampleFrame, _path: &Path) -> Result<(), DemoError> {
    Err(DemoError::FeatureDisabled("plots"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_cover_every_value() {
        let values: Vec<f64> = (0..100).map(|i| i as f64 / 10.0).collect();
        let bins = histogram(&values, HISTOGRAM_BINS);
        assert_eq!(bins.len(), 20);
        assert_eq!(bins.iter().map(|b| b.count).sum::<u32>(), 100);
        assert_eq!(bins[0].start, 0.0);
        assert!((bins[19].end - 9.9).abs() < 1e-9);
    }

    #[test]
    fn maximum_lands_in_last_bin() {
        let bins = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);
        let counts: Vec<u32> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 2]);
    }

    #[test]
    fn constant_and_empty_inputs() {
        let bins = histogram(&[2.0, 2.0, 2.0], 5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<u32>(), 3);
        assert!((bins[0].start - 1.5).abs() < 1e-12);
        assert!(histogram(&[], 5).is_empty());
        assert!(histogram(&[f64::NAN], 5).is_empty());
    }

    #[test]
    fn axis_range_pads_the_data() {
        let range = axis_range(&[0.0, 10.0]);
        assert!(range.start < 0.0 && range.end > 10.0);
        assert_eq!(axis_range(&[]), 0.0..1.0);
    }

    #[cfg(feature = "plots")]
    #[test]
    fn renders_a_full_size_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo_plots.png");
        let frame = crate::data::generate::generate_frame(100, 42);

        render_demo_plots(&frame, &path).unwrap();

        let figure = image::open(&path).unwrap();
        assert_eq!((figure.width(), figure.height()), FIGURE_SIZE);
    }

    #[cfg(not(feature = "plots"))]
    #[test]
    fn rendering_reports_the_missing_feature() {
        let err = render_demo_plots(&SampleFrame::default(), Path::new("unused.png")).unwrap_err();
        assert!(matches!(err, DemoError::FeatureDisabled("plots")));
    }
}
