use std::fmt::Display;

/// Space character.
pub const SPACE: char = ' ';

/// Classification of a single sprite cell.
///
/// A filler cell occupies space for collision purposes but is drawn as
/// a blank, so it must never be folded into a cursor skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Passable, drawn as nothing.
    Blank,
    /// Occupied, drawn as a space.
    Filler(char),
    /// Occupied, drawn as the glyph.
    Glyph(char),
}

impl Cell {
    /// Classifies an already normalized character.
    pub fn classify(ch: char, filler: char) -> Self {
        if ch == SPACE {
            Cell::Blank
        } else if ch == filler {
            Cell::Filler(ch)
        } else {
            Cell::Glyph(ch)
        }
    }

    /// Returns true for every cell except `Blank`.
    pub fn occupied(&self) -> bool {
        *self != Cell::Blank
    }

    /// Character as written in the source art.
    pub fn raw(&self) -> char {
        match self {
            Cell::Blank => SPACE,
            Cell::Filler(ch) | Cell::Glyph(ch) => *ch,
        }
    }

    /// Character as it should appear on screen.
    pub fn visible(&self) -> char {
        match self {
            Cell::Blank | Cell::Filler(_) => SPACE,
            Cell::Glyph(ch) => *ch,
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Blank
    }
}

/// Formats Cell as its source character.
impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw())
    }
}

impl From<Cell> for char {
    fn from(cell: Cell) -> char {
        cell.raw()
    }
}

/// Checks whether a character is allowed in sprite art.
/// Returns `Some(ch)` if allowed (with some whitespace normalized to space),
/// or `None` if the character should be rejected.
pub fn check_char(ch: char) -> Option<char> {
    let cp = ch as u32;

    if ch == SPACE {
        return Some(SPACE);
    }

    // TAB U+0009
    if cp == 0x0009 {
        return Some(SPACE);
    }
    // Unicode "Space Separator" (Zs) set:
    // U+00A0, U+1680, U+2000..U+200A, U+202F, U+205F, U+3000
    if cp == 0x00A0
        || cp == 0x1680
        || (0x2000..=0x200A).contains(&cp)
        || cp == 0x202F
        || cp == 0x205F
        || cp == 0x3000
    {
        return Some(SPACE);
    }

    // C0 controls, DEL and C1 controls; ESC in particular would
    // collide with the cursor directives
    if (0x0000..=0x001F).contains(&cp) || (0x007F..=0x009F).contains(&cp) {
        return None;
    }
    // Zero-width / joiner: U+200B..U+200F, U+FEFF, U+FE00..U+FE0F
    if (0x200B..=0x200F).contains(&cp) || cp == 0xFEFF || (0xFE00..=0xFE0F).contains(&cp) {
        return None;
    }
    // Bidirectional control codes: U+202A..U+202E, U+2066..U+2069
    if (0x202A..=0x202E).contains(&cp) || (0x2066..=0x2069).contains(&cp) {
        return None;
    }

    Some(ch)
}

/// Parses a string slice containing exactly one character.
pub(crate) fn single_char(s: &str) -> crate::Result<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(crate::Error::StrToCharConversion(s.chars().count())),
    }
}
