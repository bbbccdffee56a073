/*!
Tiling grid geometry.

Pure functions that turn a window count and a `GridPlacement` into target
frames. Frames tile the screen bounds exactly (no gutter), are emitted
row-major from the top-left, and the top row is the visually topmost one
(coordinates grow downwards).

The UI's preview glyphs for the discrete counts (4/8/12) are rendered by
`render_preview` from the same `grid_dimensions` derivation, so the icons
always match what `compute_frames` produces.
*/

#![allow(clippy::cast_precision_loss)]

use crate::types::Bounds;

/// Window counts offered as discrete choices in the UI.
pub const PRESET_COUNTS: [usize; 3] = [4, 8, 12];

/// Vertical placement of a single-row band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowBand {
  /// Top third of the screen.
  Upper,
  /// Vertically centred third.
  Middle,
  /// Bottom third.
  Lower,
  /// No band: lay windows out in a full grid.
  #[default]
  None,
}

/// Grid configuration chosen in the UI. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPlacement {
  /// Number of windows the user asked to arrange.
  pub total_count: usize,
  /// Single-row band, or `None` for a full grid.
  pub row_band: RowBand,
  /// Rows added on top of the base row count (grid mode only).
  pub extra_rows: usize,
}

impl GridPlacement {
  /// Plain grid for `total_count` windows.
  pub const fn grid(total_count: usize) -> Self {
    Self {
      total_count,
      row_band: RowBand::None,
      extra_rows: 0,
    }
  }

  /// Single band for `total_count` windows.
  pub const fn band(total_count: usize, row_band: RowBand) -> Self {
    Self {
      total_count,
      row_band,
      extra_rows: 0,
    }
  }

  /// Add `extra_rows` rows to the base grid.
  #[must_use]
  pub const fn with_extra_rows(mut self, extra_rows: usize) -> Self {
    self.extra_rows = extra_rows;
    self
  }
}

/// Row/column counts of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDimensions {
  /// Rows, including any extra rows.
  pub rows: usize,
  /// Columns needed to fit every window.
  pub columns: usize,
}

/// Base rows for the preset counts; `ceil(sqrt(n))` otherwise.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn base_rows(window_count: usize) -> usize {
  match window_count {
    4 | 8 => 2,
    12 => 3,
    n => {
      // Float estimate, then corrected so rows is the exact ceil(sqrt(n)).
      let mut rows = (n as f64).sqrt() as usize;
      while rows > 0 && (rows - 1).saturating_mul(rows - 1) >= n {
        rows -= 1;
      }
      while rows.saturating_mul(rows) < n {
        rows += 1;
      }
      rows
    }
  }
}

/// Derive rows and columns for `window_count` windows.
pub fn grid_dimensions(window_count: usize, placement: &GridPlacement) -> GridDimensions {
  if window_count == 0 {
    return GridDimensions {
      rows: 0,
      columns: 0,
    };
  }
  if placement.row_band != RowBand::None {
    return GridDimensions {
      rows: 1,
      columns: window_count,
    };
  }
  let rows = base_rows(window_count).saturating_add(placement.extra_rows);
  let columns = window_count.div_ceil(rows).max(1);
  GridDimensions { rows, columns }
}

/// Compute target frames for `window_count` windows on `screen`.
///
/// Returns at most `window_count` frames, ordered left-to-right then
/// top-to-bottom.
pub fn compute_frames(
  window_count: usize,
  screen: Bounds,
  placement: &GridPlacement,
) -> Vec<Bounds> {
  first_frames(window_count, window_count, screen, placement)
}

/// The first `emit` frames of the layout for `window_count` windows.
fn first_frames(
  window_count: usize,
  emit: usize,
  screen: Bounds,
  placement: &GridPlacement,
) -> Vec<Bounds> {
  let emit = emit.min(window_count);
  let dims = grid_dimensions(window_count, placement);
  if dims.rows == 0 || dims.columns == 0 {
    return Vec::new();
  }

  let band_offset = match placement.row_band {
    RowBand::Upper => Some(0.0),
    RowBand::Middle => Some(screen.h / 3.0),
    RowBand::Lower => Some(screen.h * 2.0 / 3.0),
    RowBand::None => None,
  };

  if let Some(offset) = band_offset {
    let width = screen.w / window_count as f64;
    let height = screen.h / 3.0;
    return (0..emit)
      .map(|column| {
        Bounds::new(
          screen.x + column as f64 * width,
          screen.y + offset,
          width,
          height,
        )
      })
      .collect();
  }

  let width = screen.w / dims.columns as f64;
  let height = screen.h / dims.rows as f64;
  (0..emit)
    .map(|index| {
      let row = index / dims.columns;
      let column = index % dims.columns;
      Bounds::new(
        screen.x + column as f64 * width,
        screen.y + row as f64 * height,
        width,
        height,
      )
    })
    .collect()
}

/// Frames to apply to `captured` windows: the layout for the configured total,
/// truncated to `min(captured, total)`.
pub fn frames_for_captured(
  captured: usize,
  screen: Bounds,
  placement: &GridPlacement,
) -> Vec<Bounds> {
  first_frames(placement.total_count, captured, screen, placement)
}

/// 8-bit alpha mask of a grid preview glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewBitmap {
  /// Width in pixels.
  pub width: usize,
  /// Height in pixels.
  pub height: usize,
  /// Row-major, top row first; 255 = filled, 0 = empty.
  pub pixels: Vec<u8>,
}

impl PreviewBitmap {
  /// Alpha at `(x, y)`, `None` outside the bitmap.
  pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
    if x >= self.width || y >= self.height {
      return None;
    }
    self.pixels.get(y * self.width + x).copied()
  }
}

/// Render the preview glyph for `count` windows: one filled rectangle per
/// cell, separated by a one-pixel gap.
pub fn render_preview(count: usize, width: usize, height: usize) -> PreviewBitmap {
  let mut pixels = vec![0u8; width * height];
  let dims = grid_dimensions(count, &GridPlacement::grid(count));

  if dims.rows > 0 && dims.columns > 0 {
    for index in 0..count {
      let row = index / dims.columns;
      let column = index % dims.columns;
      let x0 = column * width / dims.columns + 1;
      let x1 = ((column + 1) * width / dims.columns).saturating_sub(1);
      let y0 = row * height / dims.rows + 1;
      let y1 = ((row + 1) * height / dims.rows).saturating_sub(1);
      for y in y0..y1 {
        for x in x0..x1 {
          if let Some(pixel) = pixels.get_mut(y * width + x) {
            *pixel = u8::MAX;
          }
        }
      }
    }
  }

  PreviewBitmap {
    width,
    height,
    pixels,
  }
}
