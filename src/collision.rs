use core::fmt;

use crate::frame::Frame;

/// Per-cell occupancy flags, index-aligned with the frame they came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollisionMask {
    pub(crate) width: usize,
    pub(crate) rows: Vec<Vec<bool>>,
}

impl CollisionMask {
    /// Derives the mask from a frame. Only blank cells are passable;
    /// filler cells collide.
    pub fn derive(frame: &Frame) -> Self {
        Self {
            width: frame.width(),
            rows: frame
                .rows()
                .map(|row| row.iter().map(|cell| cell.occupied()).collect())
                .collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the cell is occupied; out of bounds is passable.
    pub fn get(&self, row: usize, column: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .unwrap_or(false)
    }

    /// Iterates over rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.iter().filter(|&&solid| solid).count())
            .sum()
    }

    /// Rows as `0`/`1` values.
    pub fn to_bits(&self) -> Vec<Vec<u8>> {
        self.rows
            .iter()
            .map(|r| r.iter().map(|&solid| u8::from(solid)).collect())
            .collect()
    }
}

/// One line of `0`/`1` digits per row.
impl fmt::Display for CollisionMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.rows {
            let line: String = row.iter().map(|&solid| if solid { '1' } else { '0' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
