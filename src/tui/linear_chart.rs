//! Plotters-powered scatter chart widget for Ratatui.
//!
//! Plotters output is rendered into the Ratatui buffer through
//! `plotters-ratatui-backend`, which gives axis and mesh rendering for free.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A render-only chart description.
///
/// All series and bounds are computed outside the render call, so `render()`
/// only draws.
pub struct LinearChart<'a> {
    /// Observed `(x, y)` points.
    pub points: &'a [(f64, f64)],
    /// The true relationship `y = 2x + 1`.
    pub true_line: &'a [(f64, f64)],
    /// The least-squares line fitted to `points`.
    pub fit_line: &'a [(f64, f64)],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl Widget for LinearChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to lay out a tiny chart; show a hint instead.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite())
            || x1 <= x0
            || y1 <= y0
        {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Mesh lines are clutter at terminal resolution; axes are enough.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let true_color = RGBColor(255, 0, 0);
            let fit_color = RGBColor(0, 255, 255);
            let point_color = RGBColor(100, 149, 237);

            chart.draw_series(LineSeries::new(self.true_line.iter().copied(), &true_color))?;
            chart.draw_series(LineSeries::new(self.fit_line.iter().copied(), &fit_color))?;

            // `Circle` radii are mis-scaled by the Ratatui backend; pixels stay dots.
            chart.draw_series(
                self.points
                    .iter()
                    .map(|&(x, y)| Pixel::new((x, y), point_color)),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(v: f64) -> String {
        format!("{v:.1}")
    }

    #[test]
    fn tiny_area_renders_hint() {
        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);
        let chart = LinearChart {
            points: &[(1.0, 3.0)],
            true_line: &[(0.0, 1.0), (10.0, 21.0)],
            fit_line: &[(0.0, 1.0), (10.0, 21.0)],
            x_bounds: [0.0, 10.0],
            y_bounds: [0.0, 22.0],
            x_label: "x",
            y_label: "y",
            fmt_x: fmt,
            fmt_y: fmt,
        };
        chart.render(area, &mut buf);
        assert_eq!(buf[(0, 0)].symbol(), "C");
    }
}
