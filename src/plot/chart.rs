//! PNG chart of response-time distributions by channel.
//!
//! The image is a fixed 512×512 px (an 8 in figure at 64 DPI). Each channel
//! gets a box (quartiles), whiskers (1.5 × IQR), a median bar, and a red mean
//! marker. The chart draws shapes only: no text, so Plotters needs no font
//! backend.

use std::path::Path;

use plotters::prelude::*;

use crate::domain::{Channel, SupportDataset, SupportSummary};
use crate::error::AppError;
use crate::math::{BoxStats, box_stats};

pub const FIGURE_INCHES: u32 = 8;
pub const DPI: u32 = 64;
pub const CHART_SIZE_PX: (u32, u32) = (FIGURE_INCHES * DPI, FIGURE_INCHES * DPI);

const PALETTE: [RGBColor; 4] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
];
const GRID_COLOR: RGBColor = RGBColor(0xdd, 0xdd, 0xdd);
const GRID_LINES: usize = 6;
const BOX_HALF_WIDTH: f64 = 0.3;

/// Box geometry and mean of one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelBox {
    pub channel: Channel,
    pub stats: BoxStats,
    pub mean: f64,
}

/// Box geometry for every channel present in `summary`, in its order.
pub fn channel_boxes(
    dataset: &SupportDataset,
    summary: &SupportSummary,
) -> Result<Vec<ChannelBox>, AppError> {
    summary
        .channels
        .iter()
        .map(|s| {
            Ok(ChannelBox {
                channel: s.channel,
                stats: box_stats(&dataset.response_times(s.channel))?,
                mean: s.mean,
            })
        })
        .collect()
}

/// Render the channel chart to a PNG file.
pub fn write_channel_chart(
    path: &Path,
    dataset: &SupportDataset,
    summary: &SupportSummary,
) -> Result<(), AppError> {
    let boxes = channel_boxes(dataset, summary)?;
    if boxes.is_empty() {
        return Err(AppError::insufficient("channel chart", "no channel data"));
    }
    draw(path, &boxes)
        .map_err(|e| AppError::Render(format!("Failed to draw chart '{}': {e}", path.display())))
}

fn draw(path: &Path, boxes: &[ChannelBox]) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, CHART_SIZE_PX).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = boxes
        .iter()
        .map(|b| b.stats.upper_whisker.max(b.mean))
        .fold(0.0_f64, f64::max)
        * 1.05;
    let x_max = boxes.len() as f64 - 0.5;

    let mut chart = ChartBuilder::on(&root)
        .margin(24)
        .build_cartesian_2d(-0.5_f64..x_max, 0.0_f64..y_max)?;

    for i in 0..=GRID_LINES {
        let y = y_max * i as f64 / GRID_LINES as f64;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(-0.5, y), (x_max, y)],
            GRID_COLOR.stroke_width(1),
        )))?;
    }

    for (i, b) in boxes.iter().enumerate() {
        let x = i as f64;
        let color = PALETTE[i % PALETTE.len()];
        let s = &b.stats;

        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x, s.lower_whisker), (x, s.upper_whisker)],
            BLACK.stroke_width(2),
        )))?;
        chart.draw_series([
            Rectangle::new(
                [(x - BOX_HALF_WIDTH, s.q1), (x + BOX_HALF_WIDTH, s.q3)],
                color.mix(0.8).filled(),
            ),
            Rectangle::new(
                [(x - BOX_HALF_WIDTH, s.q1), (x + BOX_HALF_WIDTH, s.q3)],
                BLACK.stroke_width(1),
            ),
        ])?;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x - BOX_HALF_WIDTH, s.median), (x + BOX_HALF_WIDTH, s.median)],
            WHITE.stroke_width(2),
        )))?;
        chart.draw_series([
            Circle::new((x, b.mean), 6, RED.filled()),
            Circle::new((x, b.mean), 6, WHITE.stroke_width(2)),
        ])?;
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_support;
    use crate::domain::SupportConfig;

    #[test]
    fn figure_size_is_512_square() {
        assert_eq!(CHART_SIZE_PX, (512, 512));
    }

    #[test]
    fn boxes_follow_summary_order() {
        let run = run_support(&SupportConfig::new(200), 42).unwrap();
        let boxes = channel_boxes(&run.dataset, &run.summary).unwrap();
        let order: Vec<Channel> = boxes.iter().map(|b| b.channel).collect();
        assert_eq!(order, Channel::ALL.to_vec());
        for b in &boxes {
            assert!(b.stats.lower_whisker <= b.stats.q1);
            assert!(b.stats.q1 <= b.stats.median);
            assert!(b.stats.median <= b.stats.q3);
            assert!(b.stats.q3 <= b.stats.upper_whisker);
        }
    }

    #[test]
    fn png_has_fixed_dimensions() {
        let run = run_support(&SupportConfig::default(), 42).unwrap();
        let path = std::env::temp_dir().join("synth_dash_chart.png");
        write_channel_chart(&path, &run.dataset, &run.summary).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        // IHDR width and height, big-endian, right after the chunk header.
        let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
        let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
        assert_eq!((width, height), (512, 512));
        let _ = std::fs::remove_file(&path);
    }
}
