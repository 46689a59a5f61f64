use core::fmt;

use crate::{
    chars::{check_char, Cell},
    config::Config,
    error::{Error, Malformed, Result},
};

/// Rectangular grid of classified cells, borders already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub(crate) width: usize,
    pub(crate) rows: Vec<Vec<Cell>>,
}

impl Frame {
    /// Extracts a frame from a block of bordered art lines.
    ///
    /// Blank lines before the first and after the last art line are
    /// ignored, as is whitespace around each line, so the block can be
    /// written as an indented string literal.
    pub fn extract(block: &str, config: &Config) -> Result<Self> {
        let lines: Vec<&str> = block.lines().collect();
        let start = match lines.iter().position(|l| !l.trim().is_empty()) {
            Some(start) => start,
            None => return Err(Malformed::Empty.into()),
        };
        let end = lines
            .iter()
            .rposition(|l| !l.trim().is_empty())
            .unwrap_or(start);

        let mut width: usize = 0;
        let mut rows: Vec<Vec<Cell>> = Vec::with_capacity(end - start + 1);
        for (r, line) in lines[start..=end].iter().enumerate() {
            let row = Self::read_row(r, line, config)?;
            if r == 0 {
                if row.is_empty() {
                    return Err(Malformed::ZeroWidth.into());
                }
                width = row.len();
            } else if row.len() != width {
                return Err(Malformed::WidthMismatch {
                    row: r,
                    expected: width,
                    found: row.len(),
                }
                .into());
            }
            rows.push(row);
        }
        Ok(Self { width, rows })
    }

    fn read_row(r: usize, line: &str, config: &Config) -> Result<Vec<Cell>> {
        let inner = line
            .trim()
            .strip_prefix(config.border)
            .and_then(|l| l.strip_suffix(config.border))
            .ok_or(Malformed::MissingBorder { row: r })?;
        let mut row: Vec<Cell> = Vec::new();
        for (c, ch) in inner.chars().enumerate() {
            match check_char(ch) {
                Some(ch) => row.push(Cell::classify(ch, config.filler)),
                None => {
                    return Err(Error::DisallowedChar {
                        row: r,
                        column: c,
                        code: ch.into(),
                    })
                }
            }
        }
        Ok(row)
    }
}

impl Frame {
    /// Returns the width of the frame in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height of the frame in rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Returns the cells of one row.
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        self.rows.get(row).map(|r| r.as_slice())
    }

    /// Iterates over rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Gets the cell at the specified row and column.
    pub fn get(&self, row: usize, column: usize) -> Option<Cell> {
        self.rows.get(row).and_then(|r| r.get(column)).copied()
    }
}

/// Displays the frame as written in the source, without borders.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.rows {
            let line: String = row.iter().map(|c| c.raw()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
