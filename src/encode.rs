use core::fmt;

use crate::{
    chars::{Cell, SPACE},
    config::DirectiveTemplate,
    error::{Error, Result},
};

/// A piece of an encoded row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Move the cursor forward over `n` blank cells (`n >= 1`).
    Skip(usize),
    /// Draw one occupied cell.
    Cell(Cell),
}

impl Segment {
    /// Number of screen cells the segment covers.
    pub fn width(&self) -> usize {
        match self {
            Segment::Skip(n) => *n,
            Segment::Cell(_) => 1,
        }
    }
}

/// One frame row with blank runs folded into cursor skips.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct EncodedLine {
    pub(crate) segments: Vec<Segment>,
}

/// Folds every run of blank cells in `row` into a single skip.
pub fn encode_row(row: &[Cell]) -> EncodedLine {
    let mut segments = Vec::new();
    let mut blanks: usize = 0;
    for &cell in row {
        if cell == Cell::Blank {
            blanks += 1;
            continue;
        }
        if blanks > 0 {
            segments.push(Segment::Skip(blanks));
            blanks = 0;
        }
        segments.push(Segment::Cell(cell));
    }
    if blanks > 0 {
        segments.push(Segment::Skip(blanks));
    }
    EncodedLine { segments }
}

/// Row as plain text, filler drawn as space.
pub fn plain_row(row: &[Cell]) -> String {
    row.iter().map(|c| c.visible()).collect()
}

impl EncodedLine {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of screen cells the line covers.
    pub fn width(&self) -> usize {
        self.segments.iter().map(|s| s.width()).sum()
    }

    /// Sum of all skip counts.
    pub fn skipped(&self) -> usize {
        self.segments
            .iter()
            .map(|s| match s {
                Segment::Skip(n) => *n,
                Segment::Cell(_) => 0,
            })
            .sum()
    }

    /// Checks that the line covers exactly `width` cells.
    pub fn verify(&self, row: usize, width: usize) -> Result<()> {
        let found = self.width();
        if found != width {
            return Err(Error::EncodingInvariant {
                row,
                expected: width,
                found,
            });
        }
        Ok(())
    }

    /// Expands skips back to spaces; filler stays as written.
    pub fn expand(&self) -> String {
        let mut out = String::with_capacity(self.width());
        for segment in &self.segments {
            match segment {
                Segment::Skip(n) => out.extend(std::iter::repeat(SPACE).take(*n)),
                Segment::Cell(cell) => out.push(cell.raw()),
            }
        }
        out
    }

    /// Renders skips with `directive`, keeping filler characters as written.
    pub fn render_raw(&self, directive: &DirectiveTemplate) -> String {
        self.render_with(directive, Cell::raw)
    }

    /// Renders skips with `directive`, drawing filler as space.
    pub fn render(&self, directive: &DirectiveTemplate) -> String {
        self.render_with(directive, Cell::visible)
    }

    fn render_with(&self, directive: &DirectiveTemplate, draw: fn(&Cell) -> char) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Skip(n) => directive.render_into(*n, &mut out),
                Segment::Cell(cell) => out.push(draw(cell)),
            }
        }
        out
    }
}

/// Displays the line with the default ANSI cursor directive.
impl fmt::Display for EncodedLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(&DirectiveTemplate::default()))
    }
}

/// Expands a line rendered with the ANSI cursor-forward directive back into
/// exactly `width` cells.
///
/// `ESC [ n C` becomes `n` spaces (missing `n` means 1, an `n` too large
/// for `usize` fills the rest of the row). Other CSI
/// sequences and bare escapes are dropped. Cells past `width` are cut off
/// and a short line is padded with spaces.
pub fn decode_directives(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut col: usize = 0;
    let mut iter = line.chars().peekable();

    while let Some(ch) = iter.next() {
        if ch == '\x1b' {
            if iter.peek() != Some(&'[') {
                continue;
            }
            iter.next(); // consume '['

            // parameters run until the final byte in '@'..='~'
            let mut params = String::new();
            let mut fin: Option<char> = None;
            for c in iter.by_ref() {
                if ('@'..='~').contains(&c) {
                    fin = Some(c);
                    break;
                }
                params.push(c);
            }
            if fin == Some('C') {
                let n = match params.parse::<usize>() {
                    Ok(n) => n,
                    // too large for usize; clamped below like any long skip
                    Err(_) if !params.is_empty() && params.bytes().all(|b| b.is_ascii_digit()) => {
                        usize::MAX
                    }
                    Err(_) => 1,
                };
                let n = n.min(width - col);
                out.extend(std::iter::repeat(SPACE).take(n));
                col += n;
            }
            continue;
        }
        if col < width {
            out.push(ch);
            col += 1;
        }
    }
    out.extend(std::iter::repeat(SPACE).take(width - col));
    out
}
