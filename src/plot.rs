// src/plot.rs
use crate::config::{Config, OUTPUT_FILE_NAME};
use crate::error::{Error, Result};
use crate::table::Series;
use once_cell::sync::OnceCell;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

static SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Largest magnitude drawn on the y axis; the padded range stays below `f64::MAX`.
const AXIS_LIMIT: f64 = f64::MAX * 0.4;

/// Whether a font has been registered for axis text. Decided once per process.
static FONT_READY: OnceCell<bool> = OnceCell::new();

#[derive(Debug, Clone, PartialEq)]
pub struct PlotOptions {
    pub width: u32,
    pub height: u32,
    pub font: Option<PathBuf>,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for PlotOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            width: cfg.plot_width,
            height: cfg.plot_height,
            font: cfg.font.clone(),
        }
    }
}

/// Line-plot `series` into `output_dir/visualized_data.png`.
///
/// An absent or empty series writes nothing and returns `Ok(None)`.
pub fn render(series: Option<&Series>, output_dir: &Path) -> Result<Option<PathBuf>> {
    render_with(series, output_dir, &PlotOptions::default())
}

pub fn render_with(
    series: Option<&Series>,
    output_dir: &Path,
    opts: &PlotOptions,
) -> Result<Option<PathBuf>> {
    let Some(series) = series.filter(|s| !s.is_empty()) else {
        debug!("nothing to plot");
        return Ok(None);
    };

    let path = output_dir.join(OUTPUT_FILE_NAME);
    let fail = |message: String| Error::Render {
        path: path.clone(),
        message,
    };

    fs::create_dir_all(output_dir)
        .map_err(|e| fail(format!("creating {}: {}", output_dir.display(), e)))?;
    let labelled = ensure_font(opts.font.as_deref());
    draw(series, &path, opts, labelled).map_err(|e| fail(format!("{:#}", e)))?;

    info!(path = %path.display(), points = series.len(), "wrote plot");
    Ok(Some(path))
}

fn draw(series: &Series, path: &Path, opts: &PlotOptions, labelled: bool) -> anyhow::Result<()> {
    let root = BitMapBackend::new(path, (opts.width, opts.height)).into_drawing_area();
    root.fill(&WHITE)?;

    let (x_range, y_range) = axis_ranges(&series.values);
    let label_area = if labelled { 50 } else { 0 };
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(label_area)
        .y_label_area_size(label_area + if labelled { 20 } else { 0 })
        .build_cartesian_2d(x_range, y_range)?;

    {
        let mut mesh = chart.configure_mesh();
        if labelled {
            mesh.x_desc("Index").y_desc(series.name.as_str());
        } else {
            mesh.x_labels(0).y_labels(0);
        }
        mesh.draw()?;
    }

    chart.draw_series(LineSeries::new(
        series
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, axis_value(*v))),
        &BLUE,
    ))?;

    root.present()?;
    Ok(())
}

fn axis_ranges(values: &[f64]) -> (Range<f64>, Range<f64>) {
    let x_max = if values.len() > 1 {
        (values.len() - 1) as f64
    } else {
        1.0
    };

    let (lo, hi) = values
        .iter()
        .map(|v| axis_value(*v))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    // bounded by AXIS_LIMIT, so neither the span nor the padding overflows
    let span = hi - lo;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        lo.abs().max(1.0) * 0.05
    };

    (0.0..x_max, (lo - pad)..(hi + pad))
}

/// Keep plotted values where the backend's coordinate maths stays finite.
fn axis_value(v: f64) -> f64 {
    v.clamp(-AXIS_LIMIT, AXIS_LIMIT)
}

/// Register a sans-serif font for axis text, trying `configured` first and
/// then common system locations.
fn ensure_font(configured: Option<&Path>) -> bool {
    *FONT_READY.get_or_init(|| {
        let candidates = configured
            .map(Path::to_path_buf)
            .into_iter()
            .chain(SYSTEM_FONTS.iter().map(PathBuf::from));

        for candidate in candidates {
            let Ok(bytes) = fs::read(&candidate) else {
                continue;
            };
            // plotters keeps registered fonts for the whole process
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            if register_font("sans-serif", FontStyle::Normal, bytes).is_ok() {
                debug!(font = %candidate.display(), "registered plot font");
                return true;
            }
        }

        warn!("no usable font found, plot axes are drawn without text");
        false
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

    fn small() -> PlotOptions {
        PlotOptions {
            width: 320,
            height: 240,
            font: None,
        }
    }

    #[test]
    fn absent_series_writes_nothing() -> Result<()> {
        let dir = tempdir()?;
        assert_eq!(render_with(None, dir.path(), &small())?, None);
        assert!(!dir.path().join(OUTPUT_FILE_NAME).exists());
        Ok(())
    }

    #[test]
    fn empty_series_writes_nothing() -> Result<()> {
        let dir = tempdir()?;
        let out = dir.path().join("plots");
        let empty = Series::new("Mark", vec![]);

        assert_eq!(render_with(Some(&empty), &out, &small())?, None);
        assert!(!out.join(OUTPUT_FILE_NAME).exists());
        assert!(!out.exists());
        Ok(())
    }

    #[test]
    fn writes_one_png() -> Result<()> {
        let dir = tempdir()?;
        let out = dir.path().join("plots");
        let series = Series::new("Mark", vec![1.46, 1.485, 1.84]);

        let written = render_with(Some(&series), &out, &small())?;
        let expected = out.join(OUTPUT_FILE_NAME);
        assert_eq!(written.as_deref(), Some(expected.as_path()));

        let bytes = fs::read(&expected)?;
        assert!(bytes.starts_with(PNG_MAGIC));
        assert_eq!(fs::read_dir(&out)?.count(), 1);
        Ok(())
    }

    #[test]
    fn overwrites_existing_file() -> Result<()> {
        let dir = tempdir()?;
        let target = dir.path().join(OUTPUT_FILE_NAME);
        fs::write(&target, b"stale")?;

        let series = Series::new("Value", vec![3.0]);
        render_with(Some(&series), dir.path(), &small())?;
        assert!(fs::read(&target)?.starts_with(PNG_MAGIC));
        Ok(())
    }

    #[test]
    fn ranges_cover_values() {
        let (x, y) = axis_ranges(&[2.0, 4.0, 3.0]);
        assert_eq!(x, 0.0..2.0);
        assert!(y.start < 2.0 && y.end > 4.0);

        let (x, y) = axis_ranges(&[5.0]);
        assert_eq!(x, 0.0..1.0);
        assert_eq!(y, 4.75..5.25);

        let (_, y) = axis_ranges(&[0.0, 0.0]);
        assert_eq!(y, -0.05..0.05);
    }

    #[test]
    fn extreme_values_give_finite_ranges() {
        let (_, y) = axis_ranges(&[1.7e308, -1.7e308]);
        assert!(y.start.is_finite() && y.end.is_finite());
        assert!((y.end - y.start).is_finite());
        assert!(y.start < y.end);

        let (_, y) = axis_ranges(&[1e308, 1e308]);
        assert!(y.start < y.end);
        assert!((y.end - y.start).is_finite());

        let (_, y) = axis_ranges(&[1e300, 1e300]);
        assert!(y.start < 1e300 && y.end > 1e300);
    }

    #[test]
    fn extreme_values_still_render() -> Result<()> {
        let dir = tempdir()?;
        let series = Series::new("Mark", vec![1.7e308, -1.7e308]);

        let written = render_with(Some(&series), dir.path(), &small())?;
        assert_eq!(written, Some(dir.path().join(OUTPUT_FILE_NAME)));
        Ok(())
    }

    #[test]
    fn render_uses_default_options() -> Result<()> {
        let dir = tempdir()?;
        assert_eq!(render(None, dir.path())?, None);
        assert!(!dir.path().join(OUTPUT_FILE_NAME).exists());

        let series = Series::new("Height", vec![1.46, 1.485, 1.84]);
        let written = render(Some(&series), dir.path())?;
        let expected = dir.path().join(OUTPUT_FILE_NAME);
        assert_eq!(written.as_deref(), Some(expected.as_path()));
        assert!(fs::read(&expected)?.starts_with(PNG_MAGIC));
        Ok(())
    }
}
