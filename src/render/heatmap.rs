use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};
use tracing::debug;

use super::error::RenderError;
use super::font::{draw_text, draw_text_vertical, is_drawable, text_height, text_width};
use crate::metrics::ConfusionMatrix;

const TEXT_SCALE: u32 = 2;
const MIN_CELL: u32 = 90;
const PAD: u32 = 20;
const GAP: u32 = 12;
const COLORBAR_WIDTH: u32 = 20;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([0, 0, 0]);
const LIGHT_INK: Rgb<u8> = Rgb([255, 255, 255]);

/// Sequential light-to-dark blue ramp.
const BLUES: [[u8; 3]; 9] = [
    [247, 251, 255],
    [222, 235, 247],
    [198, 219, 239],
    [158, 202, 225],
    [107, 174, 214],
    [66, 146, 198],
    [33, 113, 181],
    [8, 81, 156],
    [8, 48, 107],
];

/// Maps `t` in `[0, 1]` onto the blue ramp.
pub fn blues(t: f64) -> Rgb<u8> {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let pos = t * (BLUES.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(BLUES.len() - 1);
    let frac = pos - lo as f64;
    let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * frac).round() as u8;
    Rgb([
        mix(BLUES[lo][0], BLUES[hi][0]),
        mix(BLUES[lo][1], BLUES[hi][1]),
        mix(BLUES[lo][2], BLUES[hi][2]),
    ])
}

/// Axis tick text for class `index`.
///
/// Labels the bitmap font cannot draw, such as non-ASCII class names, are shown
/// as their class index instead.
pub fn tick_label(label: &str, index: usize) -> Cow<'_, str> {
    if is_drawable(label) {
        Cow::Borrowed(label)
    } else {
        Cow::Owned(index.to_string())
    }
}

/// Pixel geometry of a rendered heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatmapLayout {
    pub n: u32,
    pub cell: u32,
    pub grid_x: u32,
    pub grid_y: u32,
    pub width: u32,
    pub height: u32,
}

impl HeatmapLayout {
    pub fn for_matrix(matrix: &ConfusionMatrix, title: &str) -> Self {
        let n = matrix.labels().len() as u32;
        let line = text_height(TEXT_SCALE);
        let widest_label = matrix
            .labels()
            .iter()
            .enumerate()
            .map(|(idx, l)| text_width(&tick_label(l, idx), TEXT_SCALE))
            .max()
            .unwrap_or(0);

        let cell = MIN_CELL.max(widest_label + GAP);
        let grid_x = PAD + line + GAP + widest_label + GAP;
        let grid_y = PAD + line + PAD;
        let grid = n * cell;

        let right = GAP + COLORBAR_WIDTH + PAD;
        let width = (grid_x + grid + right).max(PAD * 2 + text_width(title, TEXT_SCALE));
        let height = grid_y + grid + GAP + line + GAP + line + PAD;

        Self {
            n,
            cell,
            grid_x,
            grid_y,
            width,
            height,
        }
    }

    /// Top-left pixel of the cell for `(actual, predicted)`.
    pub fn cell_origin(&self, row: usize, col: usize) -> (u32, u32) {
        (
            self.grid_x + col as u32 * self.cell,
            self.grid_y + row as u32 * self.cell,
        )
    }

    pub fn cell_center(&self, row: usize, col: usize) -> (u32, u32) {
        let (x, y) = self.cell_origin(row, col);
        (x + self.cell / 2, y + self.cell / 2)
    }

    fn grid_size(&self) -> u32 {
        self.n * self.cell
    }
}

/// Draws an annotated heatmap of `matrix`, actual labels down the side and
/// predicted labels along the bottom.
pub fn render_confusion_matrix(
    matrix: &ConfusionMatrix,
    title: &str,
) -> Result<RgbImage, RenderError> {
    if matrix.labels().is_empty() {
        return Err(RenderError::EmptyMatrix);
    }

    let layout = HeatmapLayout::for_matrix(matrix, title);
    let mut img = RgbImage::from_pixel(layout.width, layout.height, BACKGROUND);
    let max = matrix.max_count().max(1) as f64;
    let line = text_height(TEXT_SCALE);

    let title_x = (layout.width.saturating_sub(text_width(title, TEXT_SCALE))) / 2;
    draw_text(&mut img, title, title_x.into(), PAD.into(), TEXT_SCALE, INK);

    for (row, counts) in matrix.counts().iter().enumerate() {
        for (col, &count) in counts.iter().enumerate() {
            let t = count as f64 / max;
            let (x0, y0) = layout.cell_origin(row, col);
            fill_rect(&mut img, x0, y0, layout.cell, layout.cell, blues(t));

            let label = count.to_string();
            let (cx, cy) = layout.cell_center(row, col);
            let ink = if t > 0.5 { LIGHT_INK } else { INK };
            draw_text(
                &mut img,
                &label,
                i64::from(cx) - i64::from(text_width(&label, TEXT_SCALE) / 2),
                i64::from(cy) - i64::from(line / 2),
                TEXT_SCALE,
                ink,
            );
        }
    }

    let grid = layout.grid_size();
    for (idx, label) in matrix.labels().iter().enumerate() {
        let label = tick_label(label, idx);
        let (cx, cy) = layout.cell_center(idx, idx);
        let label_width = text_width(&label, TEXT_SCALE);

        // Predicted tick under each column.
        draw_text(
            &mut img,
            &label,
            i64::from(cx) - i64::from(label_width / 2),
            i64::from(layout.grid_y + grid + GAP),
            TEXT_SCALE,
            INK,
        );
        // Actual tick left of each row.
        draw_text(
            &mut img,
            &label,
            i64::from(layout.grid_x - GAP - label_width),
            i64::from(cy) - i64::from(line / 2),
            TEXT_SCALE,
            INK,
        );
    }

    let x_label = "Predicted";
    draw_text(
        &mut img,
        x_label,
        i64::from(layout.grid_x + grid / 2) - i64::from(text_width(x_label, TEXT_SCALE) / 2),
        i64::from(layout.grid_y + grid + GAP + line + GAP),
        TEXT_SCALE,
        INK,
    );
    let y_label = "Actual";
    draw_text_vertical(
        &mut img,
        y_label,
        i64::from(PAD),
        i64::from(layout.grid_y + grid / 2) - i64::from(text_width(y_label, TEXT_SCALE) / 2),
        TEXT_SCALE,
        INK,
    );

    // Colour bar, darkest at the top.
    let bar_x = layout.grid_x + grid + GAP;
    for dy in 0..grid {
        let t = 1.0 - f64::from(dy) / f64::from(grid.saturating_sub(1).max(1));
        fill_rect(&mut img, bar_x, layout.grid_y + dy, COLORBAR_WIDTH, 1, blues(t));
    }

    Ok(img)
}

/// Renders `matrix` and writes it to `path` as PNG.
pub fn write_confusion_matrix_png(
    matrix: &ConfusionMatrix,
    title: &str,
    path: &Path,
) -> Result<(), RenderError> {
    let img = render_confusion_matrix(matrix, title)?;

    let file = File::create(path).map_err(|source| RenderError::CreateFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    PngEncoder::new(&mut writer)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
        .map_err(|source| RenderError::EncodeFailed {
            path: path.to_path_buf(),
            source,
        })?;
    writer.flush().map_err(|source| RenderError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "Wrote confusion matrix heatmap"
    );
    Ok(())
}

fn fill_rect(img: &mut RgbImage, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
    let x_end = (x + w).min(img.width());
    let y_end = (y + h).min(img.height());
    for py in y..y_end {
        for px in x..x_end {
            img.put_pixel(px, py, color);
        }
    }
}
