//! Print sheet composition.
//!
//! Tiles whole copies of the final photo across a fixed-size sheet: as many
//! columns and rows as fit completely, placed row-major from the top-left
//! corner at exact multiples of the photo size. Tiles are never rotated,
//! scaled or cropped; the leftover margin keeps the background color.
//!
//! A photo larger than the sheet in either dimension yields a valid sheet
//! with zero tiles. Callers can detect it with [`PrintSheet::is_degenerate`].

use serde::Serialize;
use tracing::{debug, warn};

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::transform::FinalPhoto;

/// Default sheet width: 6 in at 300 DPI.
pub const SHEET_WIDTH: u32 = 1800;
/// Default sheet height: 4 in at 300 DPI.
pub const SHEET_HEIGHT: u32 = 1200;
/// Background fill.
pub const SHEET_BACKGROUND: [u8; 3] = [255, 255, 255];

/// Top-left corner of one tile on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TilePlacement {
    pub x: u32,
    pub y: u32,
}

/// Tile grid for one photo size on one sheet size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetLayout {
    pub columns: u32,
    pub rows: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub sheet_width: u32,
    pub sheet_height: u32,
}

impl SheetLayout {
    pub fn tile_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Tile positions in row-major order.
    pub fn placements(&self) -> impl Iterator<Item = TilePlacement> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |col| TilePlacement {
                x: col * self.tile_width,
                y: row * self.tile_height,
            })
        })
    }
}

/// Compute the tile grid. Pure: depends only on the four dimensions.
///
/// Columns and rows are counted per axis; a photo that does not fit along
/// one axis leaves that count at zero, so `tile_count()` is zero. A zero tile
/// dimension produces zero tiles.
pub fn layout(tile_width: u32, tile_height: u32, sheet_width: u32, sheet_height: u32) -> SheetLayout {
    let fit = |sheet: u32, tile: u32| sheet.checked_div(tile).unwrap_or(0);
    SheetLayout {
        columns: fit(sheet_width, tile_width),
        rows: fit(sheet_height, tile_height),
        tile_width,
        tile_height,
        sheet_width,
        sheet_height,
    }
}

/// A composed sheet. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintSheet {
    buffer: PixelBuffer,
    layout: SheetLayout,
}

impl PrintSheet {
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }

    pub fn layout(&self) -> &SheetLayout {
        &self.layout
    }

    /// True when no tile fits on the sheet.
    pub fn is_degenerate(&self) -> bool {
        self.layout.tile_count() == 0
    }
}

/// Compose `photo` onto a white `sheet_width` x `sheet_height` sheet.
pub fn compose(photo: &FinalPhoto, sheet_width: u32, sheet_height: u32) -> PrintSheet {
    compose_with_background(photo, sheet_width, sheet_height, SHEET_BACKGROUND)
}

/// Compose `photo` onto a sheet pre-filled with `background`.
pub fn compose_with_background(
    photo: &FinalPhoto,
    sheet_width: u32,
    sheet_height: u32,
    background: [u8; 3],
) -> PrintSheet {
    let tile = photo.buffer();
    let layout = layout(tile.width, tile.height, sheet_width, sheet_height);
    let mut buffer = PixelBuffer::filled(sheet_width, sheet_height, background);

    if layout.tile_count() == 0 {
        warn!(
            photo_width = tile.width,
            photo_height = tile.height,
            sheet_width,
            sheet_height,
            "photo does not fit on print sheet; sheet has no tiles"
        );
        return PrintSheet { buffer, layout };
    }

    let sheet_stride = buffer.stride();
    let row_len = tile.stride();
    for placement in layout.placements() {
        for ty in 0..tile.height {
            let src = ty as usize * row_len;
            let dst = (placement.y + ty) as usize * sheet_stride + placement.x as usize * CHANNELS;
            buffer.pixels[dst..dst + row_len].copy_from_slice(&tile.pixels[src..src + row_len]);
        }
    }

    debug!(
        columns = layout.columns,
        rows = layout.rows,
        "composed print sheet"
    );
    PrintSheet { buffer, layout }
}
