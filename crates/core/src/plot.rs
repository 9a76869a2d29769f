//! Comparison chart rendering.
//!
//! Overlays the computed non-dimensionalized edge series on the published
//! dam-break curves and writes one SVG image. Axes are linear and fixed to
//! the ranges the literature plots use, `t* in [0, 3.5]` and
//! `z* in [1, 4]`, so runs are directly comparable.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{BenchError, BenchResult};
use crate::snapshot;

const X_RANGE: (f64, f64) = (0.0, 3.5);
const Z_RANGE: (f64, f64) = (1.0, 4.0);

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 720.0;
const MARGIN_LEFT: f64 = 72.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 24.0;
const MARGIN_BOTTOM: f64 = 60.0;

const X_MAJOR_STEP: f64 = 0.5;
const Z_MAJOR_STEP: f64 = 0.5;
const X_MINOR_STEP: f64 = 0.1;
const Z_MINOR_STEP: f64 = 0.1;

/// How one curve is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveStyle {
    /// Experimental points, circle markers
    Circles,
    /// Experimental points, square markers
    Squares,
    /// Dashed reference line
    Dashed,
    /// Solid reference line
    Solid,
    /// Heavy line for the computed series
    Heavy,
}

/// One labelled series on the chart.
#[derive(Debug, Clone)]
pub struct Curve {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub style: CurveStyle,
    pub color: String,
}

/// Literature tables overlaid on every comparison plot: file name, legend
/// label, style, color.
pub const REFERENCE_TABLES: [(&str, &str, CurveStyle, &str); 5] = [
    (
        "martin_moyce_1952_1125.csv",
        "Exp: Martin & Moyce (1952), 1.125in",
        CurveStyle::Circles,
        "#1f77b4",
    ),
    (
        "martin_moyce_1952_225.csv",
        "Exp: Martin & Moyce (1952), 2.25in",
        CurveStyle::Circles,
        "#ff7f0e",
    ),
    (
        "koshizuka_etal_1995.csv",
        "Exp: Koshizuka et al. (1995)",
        CurveStyle::Squares,
        "#2ca02c",
    ),
    (
        "hirt_nichols_1981.csv",
        "SOLA-VOF: Hirt & Nichols (1981)",
        CurveStyle::Dashed,
        "#9467bd",
    ),
    (
        "koshizuka_oka_1996.csv",
        "MPS: Koshizuka & Oka (1996)",
        CurveStyle::Solid,
        "#8c564b",
    ),
];

/// Load the fixed literature curves from `dir`. The tables are static
/// fixtures, consumed read-only.
pub fn load_reference_curves(dir: &Path) -> BenchResult<Vec<Curve>> {
    REFERENCE_TABLES
        .iter()
        .map(|(file, label, style, color)| {
            let points = snapshot::read_reference_table(&dir.join(file))?;
            Ok(Curve {
                label: (*label).to_string(),
                points,
                style: *style,
                color: (*color).to_string(),
            })
        })
        .collect()
}

/// The comparison chart.
#[derive(Debug, Clone, Default)]
pub struct EdgePlot {
    curves: Vec<Curve>,
}

impl EdgePlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_curve(&mut self, curve: Curve) {
        self.curves.push(curve);
    }

    pub fn curves(&self) -> &[Curve] {
        &self.curves
    }

    /// Render the chart to one SVG file.
    pub fn render(&self, path: &Path) -> BenchResult<()> {
        let file = File::create(path).map_err(|e| BenchError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        self.write_svg(&mut writer).map_err(|e| BenchError::io(path, e))
    }

    fn write_svg<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let map_x = |t: f64| MARGIN_LEFT + (t - X_RANGE.0) / (X_RANGE.1 - X_RANGE.0) * plot_w;
        let map_z = |z: f64| MARGIN_TOP + (1.0 - (z - Z_RANGE.0) / (Z_RANGE.1 - Z_RANGE.0)) * plot_h;

        writeln!(
            w,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" viewBox=\"0 0 {WIDTH} {HEIGHT}\">"
        )?;
        writeln!(w, "<rect width=\"{WIDTH}\" height=\"{HEIGHT}\" fill=\"white\"/>")?;

        // Minor grid, dashed gray
        for t in steps(X_RANGE, X_MINOR_STEP) {
            writeln!(
                w,
                "<line x1=\"{0:.2}\" y1=\"{1:.2}\" x2=\"{0:.2}\" y2=\"{2:.2}\" stroke=\"gray\" stroke-width=\"0.5\" stroke-dasharray=\"2 3\"/>",
                map_x(t),
                MARGIN_TOP,
                MARGIN_TOP + plot_h
            )?;
        }
        for z in steps(Z_RANGE, Z_MINOR_STEP) {
            writeln!(
                w,
                "<line x1=\"{1:.2}\" y1=\"{0:.2}\" x2=\"{2:.2}\" y2=\"{0:.2}\" stroke=\"gray\" stroke-width=\"0.5\" stroke-dasharray=\"2 3\"/>",
                map_z(z),
                MARGIN_LEFT,
                MARGIN_LEFT + plot_w
            )?;
        }
        // Major grid, solid
        for t in steps(X_RANGE, X_MAJOR_STEP) {
            writeln!(
                w,
                "<line x1=\"{0:.2}\" y1=\"{1:.2}\" x2=\"{0:.2}\" y2=\"{2:.2}\" stroke=\"black\" stroke-width=\"0.5\"/>",
                map_x(t),
                MARGIN_TOP,
                MARGIN_TOP + plot_h
            )?;
            writeln!(
                w,
                "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"sans-serif\" font-size=\"13\" text-anchor=\"middle\">{t:.1}</text>",
                map_x(t),
                MARGIN_TOP + plot_h + 20.0
            )?;
        }
        for z in steps(Z_RANGE, Z_MAJOR_STEP) {
            writeln!(
                w,
                "<line x1=\"{1:.2}\" y1=\"{0:.2}\" x2=\"{2:.2}\" y2=\"{0:.2}\" stroke=\"black\" stroke-width=\"0.5\"/>",
                map_z(z),
                MARGIN_LEFT,
                MARGIN_LEFT + plot_w
            )?;
            writeln!(
                w,
                "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"sans-serif\" font-size=\"13\" text-anchor=\"end\">{z:.1}</text>",
                MARGIN_LEFT - 8.0,
                map_z(z) + 4.0
            )?;
        }

        // Axis labels
        writeln!(
            w,
            "<text x=\"{:.2}\" y=\"{:.2}\" font-family=\"sans-serif\" font-size=\"16\" text-anchor=\"middle\">t\u{2009}\u{221a}(2g/L)</text>",
            MARGIN_LEFT + plot_w / 2.0,
            HEIGHT - 14.0
        )?;
        writeln!(
            w,
            "<text x=\"20\" y=\"{0:.2}\" font-family=\"sans-serif\" font-size=\"16\" text-anchor=\"middle\" transform=\"rotate(-90 20 {0:.2})\">Z / L</text>",
            MARGIN_TOP + plot_h / 2.0
        )?;

        // Data, clipped to the plot area
        writeln!(
            w,
            "<clipPath id=\"plot-area\"><rect x=\"{MARGIN_LEFT}\" y=\"{MARGIN_TOP}\" width=\"{plot_w}\" height=\"{plot_h}\"/></clipPath>"
        )?;
        writeln!(w, "<g clip-path=\"url(#plot-area)\">")?;
        for curve in &self.curves {
            match curve.style {
                CurveStyle::Circles => {
                    for &(t, z) in &curve.points {
                        writeln!(
                            w,
                            "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"4\" fill=\"{}\"/>",
                            map_x(t),
                            map_z(z),
                            curve.color
                        )?;
                    }
                }
                CurveStyle::Squares => {
                    for &(t, z) in &curve.points {
                        writeln!(
                            w,
                            "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"7\" height=\"7\" fill=\"{}\"/>",
                            map_x(t) - 3.5,
                            map_z(z) - 3.5,
                            curve.color
                        )?;
                    }
                }
                CurveStyle::Dashed | CurveStyle::Solid | CurveStyle::Heavy => {
                    let points: String = curve
                        .points
                        .iter()
                        .map(|&(t, z)| format!("{:.2},{:.2} ", map_x(t), map_z(z)))
                        .collect();
                    let stroke_width = if curve.style == CurveStyle::Heavy { 3.0 } else { 1.5 };
                    let dash = if curve.style == CurveStyle::Dashed {
                        " stroke-dasharray=\"8 5\""
                    } else {
                        ""
                    };
                    writeln!(
                        w,
                        "<polyline points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{stroke_width}\"{dash}/>",
                        points.trim_end(),
                        curve.color
                    )?;
                }
            }
        }
        writeln!(w, "</g>")?;

        // Frame on top of the grid
        writeln!(
            w,
            "<rect x=\"{MARGIN_LEFT}\" y=\"{MARGIN_TOP}\" width=\"{plot_w}\" height=\"{plot_h}\" fill=\"none\" stroke=\"black\"/>"
        )?;

        self.write_legend(w)?;
        writeln!(w, "</svg>")?;
        w.flush()
    }

    fn write_legend<W: Write>(&self, w: &mut W) -> io::Result<()> {
        let x = MARGIN_LEFT + 14.0;
        let y = MARGIN_TOP + 14.0;
        let row = 20.0;
        let height = row * self.curves.len() as f64 + 12.0;
        writeln!(
            w,
            "<rect x=\"{x}\" y=\"{y}\" width=\"320\" height=\"{height}\" fill=\"white\" stroke=\"gray\"/>"
        )?;
        for (index, curve) in self.curves.iter().enumerate() {
            let cy = y + 16.0 + row * index as f64;
            match curve.style {
                CurveStyle::Circles => writeln!(
                    w,
                    "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"4\" fill=\"{}\"/>",
                    x + 16.0,
                    cy - 4.0,
                    curve.color
                )?,
                CurveStyle::Squares => writeln!(
                    w,
                    "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"7\" height=\"7\" fill=\"{}\"/>",
                    x + 12.5,
                    cy - 7.5,
                    curve.color
                )?,
                _ => {
                    let stroke_width = if curve.style == CurveStyle::Heavy { 3.0 } else { 1.5 };
                    let dash = if curve.style == CurveStyle::Dashed {
                        " stroke-dasharray=\"8 5\""
                    } else {
                        ""
                    };
                    writeln!(
                        w,
                        "<line x1=\"{:.2}\" y1=\"{1:.2}\" x2=\"{2:.2}\" y2=\"{1:.2}\" stroke=\"{3}\" stroke-width=\"{stroke_width}\"{dash}/>",
                        x + 8.0,
                        cy - 4.0,
                        x + 26.0,
                        curve.color
                    )?;
                }
            }
            writeln!(
                w,
                "<text x=\"{:.2}\" y=\"{cy:.2}\" font-family=\"sans-serif\" font-size=\"13\">{}</text>",
                x + 34.0,
                escape(&curve.label)
            )?;
        }
        Ok(())
    }
}

/// Tick positions across `range`, endpoints included.
fn steps(range: (f64, f64), step: f64) -> Vec<f64> {
    let count = ((range.1 - range.0) / step).round() as usize;
    (0..=count).map(|i| range.0 + i as f64 * step).collect()
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn svg(plot: &EdgePlot) -> String {
        let mut out = Vec::new();
        plot.write_svg(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn curve(style: CurveStyle) -> Curve {
        Curve {
            label: "Martin & Moyce".to_string(),
            points: vec![(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)],
            style,
            color: "red".to_string(),
        }
    }

    #[test]
    fn test_svg_contains_series_and_legend() {
        let mut plot = EdgePlot::new();
        plot.add_curve(curve(CurveStyle::Heavy));
        let text = svg(&plot);
        assert!(text.starts_with("<svg"));
        assert!(text.ends_with("</svg>\n"));
        assert!(text.contains("<polyline"));
        // Labels are XML-escaped
        assert!(text.contains("Martin &amp; Moyce"));
        assert!(!text.contains("Martin & Moyce<"));
    }

    #[test]
    fn test_marker_styles_render_markers() {
        let mut plot = EdgePlot::new();
        plot.add_curve(curve(CurveStyle::Circles));
        plot.add_curve(curve(CurveStyle::Squares));
        let text = svg(&plot);
        assert!(text.contains("<circle"));
        assert!(text.contains("<rect"));
        assert!(!text.contains("<polyline"));
    }

    #[test]
    fn test_dashed_style() {
        let mut plot = EdgePlot::new();
        plot.add_curve(curve(CurveStyle::Dashed));
        assert!(svg(&plot).contains("stroke-dasharray"));
    }

    #[test]
    fn test_steps_cover_axis() {
        let ticks = steps(X_RANGE, X_MAJOR_STEP);
        assert_eq!(ticks.len(), 8);
        assert_eq!(ticks[0], 0.0);
        assert_eq!(*ticks.last().unwrap(), 3.5);
    }
}
