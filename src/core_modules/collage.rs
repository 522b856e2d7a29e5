// THEORY:
// The collage assembler tiles six equally sized pictures into one picture
// three tiles wide and two tiles high. It knows nothing about filters: which
// filter lands in which tile is decided by the order of the input array.
//
// Placement is a fixed table of (column, row) tile positions. The bottom row
// is deliberately not in reading order: tile 3 sits in the middle and tile 4
// on the left.
//
// All six tiles are checked against tile 0 before anything is allocated, so
// a mismatch never produces a half-filled collage.

use crate::core_modules::picture::Picture;
use crate::error::{Error, Result};

pub const COLLAGE_COLUMNS: usize = 3;
pub const COLLAGE_ROWS: usize = 2;
pub const COLLAGE_TILES: usize = COLLAGE_COLUMNS * COLLAGE_ROWS;

/// (column, row) of each tile, in input order.
pub const TILE_OFFSETS: [(usize, usize); COLLAGE_TILES] =
    [(0, 0), (1, 0), (2, 0), (1, 1), (0, 1), (2, 1)];

/// Copies every pixel of `source` into `destination`, with the source's
/// (0, 0) landing on (start_x, start_y).
pub fn copy_to(source: &Picture, destination: &mut Picture, start_x: usize, start_y: usize) -> Result<()> {
    let (width, height) = source.dimensions();
    if start_x + width > destination.width() || start_y + height > destination.height() {
        return Err(Error::OutOfBounds {
            x: start_x + width - 1,
            y: start_y + height - 1,
            width: destination.width(),
            height: destination.height(),
        });
    }

    let destination_width = destination.width();
    let colors = destination.colors_mut();
    for y in 0..height {
        let start = (start_y + y) * destination_width + start_x;
        colors[start..start + width].copy_from_slice(source.row(y)?);
    }
    Ok(())
}

/// Tiles six pictures of identical size into a `3w`x`2h` collage.
pub fn assemble_collage(tiles: &[Picture; COLLAGE_TILES]) -> Result<Picture> {
    let expected = tiles[0].dimensions();
    for (index, tile) in tiles.iter().enumerate().skip(1) {
        if tile.dimensions() != expected {
            return Err(Error::DimensionMismatch {
                index,
                expected,
                actual: tile.dimensions(),
            });
        }
    }

    let (width, height) = expected;
    let mut collage = Picture::new(width * COLLAGE_COLUMNS, height * COLLAGE_ROWS)?;
    for (tile, (column, row)) in tiles.iter().zip(TILE_OFFSETS) {
        copy_to(tile, &mut collage, column * width, row * height)?;
    }
    Ok(collage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::color::color::Color;
    use pretty_assertions::assert_eq;

    fn tiles(width: usize, height: usize) -> [Picture; COLLAGE_TILES] {
        std::array::from_fn(|index| {
            let mut tile = Picture::filled(width, height, Color::gray(index as u8 * 40)).unwrap();
            tile.set(0, 0, Color::from_rgb(index as u8, 200, 100)).unwrap();
            tile
        })
    }

    #[test]
    fn six_two_by_two_tiles_make_six_by_four() {
        let inputs = tiles(2, 2);
        let collage = assemble_collage(&inputs).unwrap();
        assert_eq!(collage.dimensions(), (6, 4));
        assert_eq!(collage.get(0, 0).unwrap(), inputs[0].get(0, 0).unwrap());
        assert_eq!(collage.get(4, 0).unwrap(), inputs[2].get(0, 0).unwrap());
    }

    #[test]
    fn tiles_land_on_fixed_offsets() {
        let (w, h) = (3, 2);
        let inputs = tiles(w, h);
        let collage = assemble_collage(&inputs).unwrap();
        let expected_origins = [(0, 0), (w, 0), (2 * w, 0), (w, h), (0, h), (2 * w, h)];
        for (tile, (ox, oy)) in inputs.iter().zip(expected_origins) {
            for pixel in tile {
                assert_eq!(
                    collage.get(ox + pixel.x(), oy + pixel.y()).unwrap(),
                    pixel.color()
                );
            }
        }
    }

    #[test]
    fn mismatched_tile_is_rejected() {
        let mut inputs = tiles(2, 2);
        inputs[4] = Picture::new(2, 3).unwrap();
        assert!(matches!(
            assemble_collage(&inputs),
            Err(Error::DimensionMismatch {
                index: 4,
                expected: (2, 2),
                actual: (2, 3)
            })
        ));
    }

    #[test]
    fn copy_to_rejects_overflowing_offset() {
        let source = Picture::new(2, 2).unwrap();
        let mut destination = Picture::new(3, 3).unwrap();
        let before = destination.copy();
        assert!(matches!(
            copy_to(&source, &mut destination, 2, 0),
            Err(Error::OutOfBounds { .. })
        ));
        assert_eq!(destination, before);
    }

    #[test]
    fn copy_to_places_source_at_offset() {
        let source = Picture::filled(2, 1, Color::gray(9)).unwrap();
        let mut destination = Picture::new(4, 3).unwrap();
        copy_to(&source, &mut destination, 1, 2).unwrap();
        assert_eq!(destination.get(1, 2).unwrap(), Color::gray(9));
        assert_eq!(destination.get(2, 2).unwrap(), Color::gray(9));
        assert_eq!(destination.get(0, 2).unwrap(), Color::gray(0));
        assert_eq!(destination.get(3, 2).unwrap(), Color::gray(0));
    }
}
