//! First-fit decreasing-height shelf packing.
//!
//! Glyphs are sorted by descending height and placed left to right into rows ("shelves"). Each
//! shelf is as tall as the tallest glyph remaining when it was opened. To fill a shelf, the
//! remaining glyphs are scanned in order and the first one that still fits is taken.

use glyphpack_geometry::{CanvasBounds, PointPx};

use crate::{AtlasError, Glyph, Placement, Result};

/// Canvas dimensions and the padding between glyphs, rows and the canvas border.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PackConfig {
    pub width: u32,
    pub height: u32,
    pub gap: u32,
}

impl PackConfig {
    pub fn new(width: u32, height: u32, gap: u32) -> Self {
        Self { width, height, gap }
    }

    pub fn bounds(&self) -> CanvasBounds {
        CanvasBounds::new(self.width, self.height)
    }

    /// Checks that placements are representable in the file and that the gap border leaves
    /// pixels to place glyphs on.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_CANVAS_SIDE {
                return Err(AtlasError::InvalidConfig(format!(
                    "canvas {field} {value} is not within 1..={MAX_CANVAS_SIDE}"
                )));
            }
        }
        if self.bounds().inner(self.gap).is_empty() {
            return Err(AtlasError::InvalidConfig(format!(
                "a gap of {} leaves no room inside a {}x{} canvas",
                self.gap, self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Placements are stored as `i16`.
pub const MAX_CANVAS_SIDE: u32 = i16::MAX as u32;

/// `start + len + gap`, `None` on overflow.
fn end_of(start: u32, len: u32, gap: u32) -> Option<u32> {
    start.checked_add(len)?.checked_add(gap)
}

/// A horizontal band of the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Top of the row.
    pub y: u32,
    /// Height of the first and tallest glyph of the row.
    pub height: u32,
    /// Horizontal position where the next glyph would go.
    pub cursor_x: u32,
    /// The glyphs of this row from left to right.
    pub glyphs: Vec<Glyph>,
}

impl Row {
    fn open(y: u32, height: u32, gap: u32) -> Self {
        Self {
            y,
            height,
            cursor_x: gap,
            glyphs: Vec::new(),
        }
    }
}

/// The result of packing: rows of placed glyphs and the glyphs without pixels.
#[derive(Debug)]
pub struct PackedGlyphs {
    pub rows: Vec<Row>,
    /// Glyphs without pixels, in input order. They are never placed.
    pub unplaced: Vec<Glyph>,
}

impl PackedGlyphs {
    /// All glyphs in packed order: row by row from left to right, followed by the unplaced ones.
    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> {
        self.rows
            .iter()
            .flat_map(|row| row.glyphs.iter())
            .chain(self.unplaced.iter())
    }

    pub fn len(&self) -> usize {
        self.rows.iter().map(|row| row.glyphs.len()).sum::<usize>() + self.unplaced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
pub struct ShelfPacker {
    config: PackConfig,
}

impl ShelfPacker {
    pub fn new(config: PackConfig) -> Self {
        Self { config }
    }

    /// Places every glyph with pixels into the canvas.
    ///
    /// Fails with [`AtlasError::CapacityExceeded`] if the glyphs don't fit. Nothing is returned
    /// in that case, a partial atlas is never produced.
    pub fn pack(&self, glyphs: Vec<Glyph>) -> Result<PackedGlyphs> {
        self.config.validate()?;
        let PackConfig { width, height, gap } = self.config;
        let total = glyphs.len();

        let (mut visible, mut unplaced): (Vec<Glyph>, Vec<Glyph>) =
            glyphs.into_iter().partition(Glyph::is_visible);
        for glyph in &mut unplaced {
            glyph.placement = Placement::Unplaced;
        }

        // Stable, so glyphs of the same height keep their input order.
        visible.sort_by(|a, b| b.metrics.height.cmp(&a.metrics.height));

        // Row index and position of each glyph in `visible`, `None` while it waits.
        let mut positions: Vec<Option<(usize, PointPx)>> = vec![None; visible.len()];
        let mut remaining = visible.len();
        // Index of the first (and therefore tallest) waiting glyph.
        let mut first_waiting = 0;
        let mut rows: Vec<Row> = Vec::new();

        let capacity_exceeded = |remaining: usize| AtlasError::CapacityExceeded {
            unplaced: remaining,
            total,
            width,
            height,
        };

        if let Some(first) = visible.first() {
            let tallest = first.metrics.height;
            if !end_of(gap, tallest, gap).is_some_and(|bottom| bottom <= height) {
                return Err(capacity_exceeded(remaining));
            }
            rows.push(Row::open(gap, tallest, gap));
        }

        while remaining > 0 {
            let tallest = visible[first_waiting].metrics.height;
            let current = rows.len() - 1;
            let row = &mut rows[current];

            let fitting = (first_waiting..visible.len()).find(|&index| {
                positions[index].is_none()
                    && end_of(row.cursor_x, visible[index].metrics.width, gap)
                        .is_some_and(|right| right < width)
            });

            match fitting {
                Some(index) => {
                    positions[index] = Some((current, PointPx::new(row.cursor_x, row.y)));
                    row.cursor_x += visible[index].metrics.width + gap;
                    remaining -= 1;
                    while first_waiting < visible.len() && positions[first_waiting].is_some() {
                        first_waiting += 1;
                    }
                }
                None => {
                    // Not even a fresh row can take the next glyph.
                    if row.cursor_x == gap {
                        return Err(capacity_exceeded(remaining));
                    }
                    let next_y = end_of(row.y, row.height, gap).filter(|&next_y| {
                        end_of(next_y, tallest, gap).is_some_and(|bottom| bottom <= height)
                    });
                    let Some(next_y) = next_y else {
                        return Err(capacity_exceeded(remaining));
                    };
                    rows.push(Row::open(next_y, tallest, gap));
                }
            }
        }

        for (mut glyph, position) in visible.into_iter().zip(positions) {
            if let Some((row, position)) = position {
                glyph.placement = Placement::Placed(position);
                rows[row].glyphs.push(glyph);
            }
        }

        for row in &mut rows {
            row.glyphs
                .sort_by_key(|glyph| glyph.placement.position().map(|p| p.x));
        }

        log::debug!(
            "Packed {} glyphs into {} rows ({} without pixels)",
            total - unplaced.len(),
            rows.len(),
            unplaced.len()
        );

        Ok(PackedGlyphs { rows, unplaced })
    }
}

#[cfg(test)]
mod tests {
    use glyphpack_geometry::{Contains, PointPx};
    use itertools::Itertools;

    use super::*;
    use crate::testing::box_glyph;

    fn pack(width: u32, height: u32, gap: u32, glyphs: Vec<Glyph>) -> Result<PackedGlyphs> {
        ShelfPacker::new(PackConfig::new(width, height, gap)).pack(glyphs)
    }

    fn position(packed: &PackedGlyphs, character: char) -> Placement {
        packed
            .glyphs()
            .find(|g| g.character == character)
            .map(|g| g.placement)
            .unwrap()
    }

    fn placed(x: u32, y: u32) -> Placement {
        Placement::Placed(PointPx::new(x, y))
    }

    #[test]
    fn equal_heights_share_the_first_row() {
        let packed = pack(32, 32, 1, vec![box_glyph('A', 10, 12), box_glyph('B', 8, 12)]).unwrap();

        assert_eq!(packed.rows.len(), 1);
        assert_eq!(packed.rows[0].y, 1);
        assert_eq!(packed.rows[0].height, 12);
        assert_eq!(position(&packed, 'A'), placed(1, 1));
        assert_eq!(position(&packed, 'B'), placed(12, 1));
    }

    #[test]
    fn too_wide_glyph_exceeds_capacity() {
        let result = pack(32, 32, 1, vec![box_glyph('W', 40, 10)]);
        match result {
            Err(AtlasError::CapacityExceeded {
                unplaced, total, ..
            }) => {
                assert_eq!(unplaced, 1);
                assert_eq!(total, 1);
            }
            other => panic!("Expected CapacityExceeded, got {other:?}"),
        }
    }

    #[test]
    fn too_tall_glyph_exceeds_capacity() {
        let result = pack(32, 32, 1, vec![box_glyph('T', 4, 31)]);
        assert!(matches!(
            result,
            Err(AtlasError::CapacityExceeded { unplaced: 1, .. })
        ));
    }

    #[test]
    fn reports_the_number_of_glyphs_that_did_not_fit() {
        // Two glyphs per row, two rows.
        let glyphs = (0..6).map(|i| box_glyph((b'a' + i) as char, 10, 10)).collect();
        let result = pack(24, 24, 1, glyphs);
        assert!(matches!(
            result,
            Err(AtlasError::CapacityExceeded {
                unplaced: 2,
                total: 6,
                width: 24,
                height: 24
            })
        ));
    }

    #[test]
    fn glyph_that_fills_the_row_exactly_does_not_fit() {
        // 1 + 30 + 1 == 32 is not less than the width.
        let result = pack(32, 32, 1, vec![box_glyph('X', 30, 4)]);
        assert!(result.is_err());
        assert!(pack(32, 32, 1, vec![box_glyph('X', 29, 4)]).is_ok());
    }

    #[test]
    fn glyph_that_reaches_the_bottom_border_fits() {
        // 1 + 30 + 1 == 32 may equal the height.
        let packed = pack(32, 32, 1, vec![box_glyph('Y', 4, 30)]).unwrap();
        assert_eq!(position(&packed, 'Y'), placed(1, 1));
        assert!(matches!(
            pack(32, 32, 1, vec![box_glyph('Y', 4, 31)]),
            Err(AtlasError::CapacityExceeded { unplaced: 1, .. })
        ));
    }

    #[test]
    fn later_row_may_end_at_the_bottom_border() {
        // One glyph per row at y = 1, 12 and 23. The last row ends at 23 + 8 + 1 == 32.
        let glyphs = |last_height| {
            vec![
                box_glyph('a', 10, 10),
                box_glyph('b', 10, 10),
                box_glyph('c', 10, last_height),
            ]
        };
        let packed = pack(16, 32, 1, glyphs(8)).unwrap();
        assert_eq!(position(&packed, 'c'), placed(1, 23));

        assert!(matches!(
            pack(16, 32, 1, glyphs(9)),
            Err(AtlasError::CapacityExceeded { unplaced: 1, .. })
        ));
    }

    #[test]
    fn huge_gap_is_rejected_instead_of_overflowing() {
        let result = pack(256, 256, 1 << 31, vec![box_glyph('g', 4, 4)]);
        assert!(matches!(result, Err(AtlasError::InvalidConfig(_))));
        assert!(matches!(
            pack(256, 256, u32::MAX, Vec::new()),
            Err(AtlasError::InvalidConfig(_))
        ));
    }

    #[test]
    fn gap_must_leave_room_inside_the_canvas() {
        assert!(pack(8, 8, 4, Vec::new()).is_err());
        assert!(pack(8, 8, 3, Vec::new()).is_ok());
    }

    #[test]
    fn canvas_sides_must_fit_placements() {
        assert!(matches!(
            pack(MAX_CANVAS_SIDE + 1, 16, 1, Vec::new()),
            Err(AtlasError::InvalidConfig(_))
        ));
        assert!(matches!(
            pack(16, 0, 0, Vec::new()),
            Err(AtlasError::InvalidConfig(_))
        ));
        assert!(pack(MAX_CANVAS_SIDE, 16, 1, Vec::new()).is_ok());
    }

    #[test]
    fn end_of_reports_overflow() {
        assert_eq!(end_of(1, 2, 3), Some(6));
        assert_eq!(end_of(u32::MAX - 1, 1, 1), None);
    }

    #[test]
    fn glyphs_are_sorted_by_descending_height() {
        let packed = pack(
            64,
            64,
            1,
            vec![
                box_glyph('s', 5, 4),
                box_glyph('t', 5, 9),
                box_glyph('m', 5, 6),
            ],
        )
        .unwrap();

        let order: String = packed.glyphs().map(|g| g.character).collect();
        assert_eq!(order, "tms");
        assert_eq!(packed.rows[0].height, 9);
    }

    #[test]
    fn first_fit_prefers_earlier_glyphs() {
        // After 'a', glyphs up to 7 pixels wide still fit: 'b' doesn't, 'c' and 'd' do, and 'c'
        // is taken first even though 'd' would fill the row better.
        let packed = pack(
            20,
            40,
            1,
            vec![
                box_glyph('a', 9, 10),
                box_glyph('b', 12, 9),
                box_glyph('c', 3, 8),
                box_glyph('d', 7, 7),
            ],
        )
        .unwrap();

        assert_eq!(position(&packed, 'a'), placed(1, 1));
        assert_eq!(position(&packed, 'c'), placed(11, 1));
        assert_eq!(position(&packed, 'b'), placed(1, 12));
        assert_eq!(position(&packed, 'd'), placed(1, 22));

        let first_row: String = packed.rows[0].glyphs.iter().map(|g| g.character).collect();
        assert_eq!(first_row, "ac");
        // Each row is as tall as the tallest glyph remaining when it was opened.
        let heights: Vec<u32> = packed.rows.iter().map(|row| row.height).collect();
        assert_eq!(heights, [10, 9, 7]);
    }

    #[test]
    fn zero_area_glyphs_are_kept_but_never_placed() {
        let packed = pack(
            32,
            32,
            1,
            vec![
                box_glyph(' ', 0, 0),
                box_glyph('a', 4, 4),
                box_glyph('_', 5, 0),
            ],
        )
        .unwrap();

        assert_eq!(packed.len(), 3);
        assert_eq!(packed.rows.len(), 1);
        assert_eq!(packed.rows[0].height, 4);
        assert_eq!(position(&packed, ' '), Placement::Unplaced);
        assert_eq!(position(&packed, '_'), Placement::Unplaced);
        // Unplaced glyphs follow the placed ones in their input order.
        let order: String = packed.glyphs().map(|g| g.character).collect();
        assert_eq!(order, "a _");
    }

    #[test]
    fn only_zero_area_glyphs_need_no_rows() {
        let packed = pack(8, 8, 1, vec![box_glyph(' ', 0, 0)]).unwrap();
        assert!(packed.rows.is_empty());
        assert_eq!(packed.len(), 1);
    }

    #[test]
    fn placed_glyphs_are_disjoint_and_inside_the_border() {
        let config = PackConfig::new(64, 64, 2);
        let glyphs = (0..40u32)
            .map(|i| {
                let character = char::from_u32(0x41 + i).unwrap();
                box_glyph(character, 1 + (i * 7) % 11, 1 + (i * 5) % 9)
            })
            .collect();
        let packed = ShelfPacker::new(config).pack(glyphs).unwrap();

        let inner = config.bounds().inner(config.gap);
        let boxes: Vec<_> = packed.glyphs().filter_map(Glyph::bounds).collect();
        assert_eq!(boxes.len(), 40);

        for bx in &boxes {
            assert!(config.bounds().contains(*bx));
            assert!(inner.contains_box(bx), "{bx:?} touches the border");
        }
        for (a, b) in boxes.iter().tuple_combinations() {
            assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
        }
    }

    #[test]
    fn rows_are_separated_by_the_gap() {
        let packed = pack(
            16,
            64,
            3,
            vec![
                box_glyph('a', 8, 10),
                box_glyph('b', 8, 6),
                box_glyph('c', 8, 5),
            ],
        )
        .unwrap();

        let ys: Vec<u32> = packed.rows.iter().map(|row| row.y).collect();
        assert_eq!(ys, [3, 16, 25]);
        for (upper, lower) in packed.rows.iter().tuple_windows() {
            assert_eq!(lower.y, upper.y + upper.height + 3);
        }
    }
}
