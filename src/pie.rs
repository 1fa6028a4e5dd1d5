use crate::error::{PieError, Result};
use crate::model::ContributionSet;
use console::{Color, Style};

/// Fixed palette cycled by record index. No global state; the renderer
/// indexes into it with `i % PALETTE.len()`.
pub const PALETTE: [Color; 6] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
];

const MARKER: char = '*';

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub include_total: bool,
    pub include_key: bool,
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_total: true,
            include_key: true,
            color: true,
        }
    }
}

/// Draw an ASCII pie chart of the contribution set.
///
/// The grid spans `2 * radius - 1` rows of `4 * radius + 1` characters;
/// the x axis is doubled so the chart looks round in a terminal, where
/// character cells are roughly twice as tall as wide. A legend with the
/// line total and the per-author key follows, subject to `opts`.
pub fn render(set: &ContributionSet, radius: u32, opts: RenderOptions) -> Result<String> {
    let total = set.total();
    if total == 0 {
        return Err(PieError::InvalidInput(
            "total line count is zero, cannot draw a pie chart".to_string(),
        ));
    }

    let splits = create_splits(set, total);
    let r = i64::from(radius);
    let r_squared = (r * r) as f64;

    let mut output = String::from("\n");
    // y skips the extreme rows so the circle has no hanging single cell
    for y in (-r + 1)..r {
        for x in (-2 * r)..=(2 * r) {
            let xf = x as f64 / 2.0;
            let yf = y as f64;
            if xf * xf + yf * yf <= r_squared {
                let index = slice_index(angle_of(xf, yf), &splits);
                output.push_str(&paint(&MARKER.to_string(), index, opts.color));
            } else {
                output.push(' ');
            }
        }
        output.push('\n');
    }
    output.push('\n');

    if opts.include_total {
        output.push_str(&format!("Total Number of Lines: {total}\n"));
    }
    if opts.include_key {
        for (i, record) in set.records().iter().enumerate() {
            let percentage = record.lines as f64 / total as f64 * 100.0;
            output.push_str(&format!(
                "\t{}: {} lines ({percentage:.2}%)\n",
                paint(&record.author, i, opts.color),
                record.lines,
            ));
        }
    }

    Ok(output)
}

/// Cumulative angle boundaries, one per record, ending at exactly 360.
///
/// The last split is clamped so floating-point rounding cannot leave a
/// gap just below 360 degrees.
fn create_splits(set: &ContributionSet, total: u64) -> Vec<f64> {
    let mut splits = Vec::with_capacity(set.len());
    let mut running = 0u64;
    for record in set.records() {
        running += record.lines;
        splits.push(running as f64 / total as f64 * 360.0);
    }
    if let Some(last) = splits.last_mut() {
        *last = 360.0;
    }
    splits
}

/// Polar angle of a grid point in degrees, normalized to `[0, 360)`.
fn angle_of(x: f64, y: f64) -> f64 {
    let angle = y.atan2(x).to_degrees();
    if angle < 0.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// Index of the record owning `angle`: the first split strictly greater
/// than it. An angle on a boundary belongs to the next record. Angles
/// are normalized below 360 and the final split is clamped to 360, so
/// the fallback to the last record only covers numerical edge cases.
fn slice_index(angle: f64, splits: &[f64]) -> usize {
    splits
        .iter()
        .position(|&split| angle < split)
        .unwrap_or_else(|| splits.len().saturating_sub(1))
}

fn paint(text: &str, index: usize, color: bool) -> String {
    if color {
        Style::new()
            .fg(PALETTE[index % PALETTE.len()])
            .force_styling(true)
            .apply_to(text)
            .to_string()
    } else {
        text.to_string()
    }
}
