//! Plain-text rendering: bar charts, line charts and level diagrams.
//!
//! Everything here returns a `String`; nothing draws to a global canvas.

use std::fmt::Write as _;

use qsweep_hal::Counts;

/// Glyph used for bars.
const BAR: char = '█';

/// One series of a line chart.
#[derive(Debug, Clone)]
pub struct Series<'a> {
    pub label: &'a str,
    pub marker: char,
    pub points: Vec<(f64, f64)>,
}

/// Horizontal bar per outcome, bitstrings in ascending order.
pub fn histogram(counts: &Counts, width: usize) -> String {
    let max = counts.iter().map(|(_, &c)| c).max().unwrap_or(0);
    let key_width = counts.key_width().unwrap_or(1);
    let mut out = String::new();
    for (bitstring, &count) in counts.sorted_by_key() {
        let _ = writeln!(
            out,
            "{bitstring:>key_width$} │{:<width$} {count}",
            bar(count, max, width)
        );
    }
    out
}

/// Two distributions on a shared key axis, one row per outcome and series.
pub fn paired_histogram(
    (label_a, a): (&str, &Counts),
    (label_b, b): (&str, &Counts),
    width: usize,
) -> String {
    let mut keys: Vec<&String> = a.iter().chain(b.iter()).map(|(k, _)| k).collect();
    keys.sort();
    keys.dedup();

    let max = a.iter().chain(b.iter()).map(|(_, &c)| c).max().unwrap_or(0);
    let key_width = keys.iter().map(|k| k.len()).max().unwrap_or(1);
    let label_width = label_a.len().max(label_b.len());

    let mut out = String::new();
    for key in keys {
        for (label, counts) in [(label_a, a), (label_b, b)] {
            let count = counts.get(key);
            let _ = writeln!(
                out,
                "{key:>key_width$} {label:<label_width$} │{:<width$} {count}",
                bar(count, max, width)
            );
        }
    }
    out
}

/// Labelled horizontal bars for values in `[0, 1]`.
pub fn probability_bars(rows: &[(String, f64)], width: usize) -> String {
    let label_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for (label, p) in rows {
        let filled = (p.clamp(0.0, 1.0) * width as f64).round() as usize;
        let _ = writeln!(
            out,
            "{label:>label_width$} │{:<width$} {p:.4}",
            BAR.to_string().repeat(filled)
        );
    }
    out
}

/// ASCII line chart of one or more series over a shared x axis.
///
/// Data points use the series marker and segments between them are drawn
/// with `·`. Where two series share a cell the later one wins.
pub fn line_chart(series: &[Series<'_>], width: usize, height: usize, y_label: &str) -> String {
    let points = series.iter().flat_map(|s| s.points.iter());
    let (mut x_min, mut x_max, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY, 0.0_f64);
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_max = y_max.max(y);
    }
    if !x_min.is_finite() || width < 2 || height < 2 {
        return String::from("(no data)\n");
    }
    if y_max <= 0.0 {
        y_max = 1.0;
    }
    let x_span = (x_max - x_min).max(f64::MIN_POSITIVE);

    let col = |x: f64| (((x - x_min) / x_span) * (width - 1) as f64).round() as usize;
    let row = |y: f64| {
        let r = ((y / y_max) * (height - 1) as f64).round() as usize;
        (height - 1) - r.min(height - 1)
    };

    let mut grid = vec![vec![' '; width]; height];
    for s in series {
        for pair in s.points.windows(2) {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            let (c0, c1) = (col(x0), col(x1));
            for c in c0.min(c1)..=c0.max(c1) {
                let t = if c1 == c0 {
                    0.0
                } else {
                    (c as f64 - c0 as f64) / (c1 as f64 - c0 as f64)
                };
                grid[row(y0 + t * (y1 - y0))][c] = '·';
            }
        }
    }
    for s in series {
        for &(x, y) in &s.points {
            grid[row(y)][col(x)] = s.marker;
        }
    }

    let top = format!("{y_max:.4}");
    let bottom = format!("{:.4}", 0.0);
    let axis_width = top.len().max(bottom.len());

    let mut out = String::new();
    let _ = writeln!(out, "{y_label}");
    for (r, line) in grid.iter().enumerate() {
        let tick = match r {
            0 => top.as_str(),
            r if r == height - 1 => bottom.as_str(),
            _ => "",
        };
        let body: String = line.iter().collect();
        let _ = writeln!(out, "{tick:>axis_width$} ┤{}", body.trim_end());
    }
    let _ = writeln!(out, "{:>axis_width$} └{}", "", "─".repeat(width));
    let left = format!("{x_min}");
    let right = format!("{x_max}");
    let gap = width.saturating_sub(left.len() + right.len());
    let _ = writeln!(out, "{:>axis_width$}  {left}{}{right}", "", " ".repeat(gap));

    let legend: Vec<String> = series
        .iter()
        .map(|s| format!("{} {}", s.marker, s.label))
        .collect();
    let _ = writeln!(out, "{:>axis_width$}  {}", "", legend.join("   "));
    out
}

/// Energy-level diagram, highest level on top.
///
/// Levels closer than the row resolution share a row.
pub fn level_diagram(levels: &[(String, f64)], unit: &str) -> String {
    let mut sorted: Vec<&(String, f64)> = levels.iter().collect();
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1));

    let label_width = sorted.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for (i, (label, energy)) in sorted.iter().enumerate() {
        let _ = writeln!(out, "  {energy:>12.6} {unit} ────────── {label:<label_width$}");
        if let Some((_, next)) = sorted.get(i + 1) {
            // Vertical gap proportional to the spacing, capped for readability.
            let gap = ((energy - next) * 4.0).round().clamp(0.0, 6.0) as usize;
            for _ in 0..gap {
                let _ = writeln!(out, "  {:>12} {:width$} │", "", "", width = unit.len());
            }
        }
    }
    out
}

fn bar(count: u64, max: u64, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let filled = ((count as f64 / max as f64) * width as f64).round() as usize;
    BAR.to_string().repeat(filled)
}
