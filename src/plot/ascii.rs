//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed points: `o`
//! - true relationship `y = 2x + 1`: `-` line
//! - residual histogram: `#` bars

use crate::domain::{LinearDataset, true_line};
use crate::error::AppError;
use crate::math::histogram;

/// Render the scatter plot of a linear dataset with the true line underneath.
pub fn render_scatter(dataset: &LinearDataset, width: usize, height: usize) -> String {
    let (x_min, x_max) = x_range(dataset).unwrap_or((0.0, 10.0));
    let line = sample_line(x_min, x_max, width.max(2));
    render_plot(dataset, &line, x_min, x_max, width, height)
}

/// Render a horizontal-bar histogram of the residual column.
pub fn render_residual_histogram(
    dataset: &LinearDataset,
    bins: usize,
    bar_width: usize,
) -> Result<String, AppError> {
    let bins = histogram(&dataset.residuals(), bins)?;
    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    let bar_width = bar_width.max(1);

    let mut out = String::new();
    out.push_str(&format!(
        "Residuals: [{:.3}, {:.3}] | bins={} | max={max_count}\n",
        bins[0].lo,
        bins[bins.len() - 1].hi,
        bins.len(),
    ));
    for b in &bins {
        let len = (b.count as f64 / max_count as f64 * bar_width as f64).round() as usize;
        let line = format!("{:>9.3} | {}", b.lo, "#".repeat(len));
        out.push_str(line.trim_end());
        out.push('\n');
    }
    Ok(out)
}

fn render_plot(
    dataset: &LinearDataset,
    line: &[(f64, f64)],
    x_min: f64,
    x_max: f64,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = y_range(dataset, line).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Line first so points overlay it.
    draw_polyline(&mut grid, line, x_min, x_max, y_min, y_max);

    for r in &dataset.records {
        let x = map_x(r.x, x_min, x_max, width);
        let y = map_y(r.y, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.2}, {y_max:.2}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn x_range(dataset: &LinearDataset) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for r in &dataset.records {
        min_x = min_x.min(r.x);
        max_x = max_x.max(r.x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn sample_line(x_min: f64, x_max: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    (0..n)
        .map(|i| {
            let u = i as f64 / (n as f64 - 1.0);
            let x = x_min + u * (x_max - x_min);
            (x, true_line(x))
        })
        .collect()
}

fn y_range(dataset: &LinearDataset, line: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    for r in &dataset.records {
        min_y = min_y.min(r.y);
        max_y = max_y.max(r.y);
    }
    for &(_, y) in line {
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_polyline(
    grid: &mut [Vec<char>],
    points: &[(f64, f64)],
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) {
    if points.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in points {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, '-');
        } else {
            grid[row][col] = '-';
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
