use core::fmt;
use std::fmt::Write;
use std::str::FromStr;

use crate::collision::CollisionMask;
use crate::config::{Config, DirectiveTemplate};
use crate::encode::{encode_row, plain_row, EncodedLine};
use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::helpers::{c_quote, json_quote};

/// Identifier used for a lone sprite in C++ output when none is given.
pub const DEFAULT_CPP_NAME: &str = "spriteAssetName";

/// Whether `name` can name a C++ variable: an ASCII letter or `_`, then
/// letters, digits and `_`.
pub fn is_cpp_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        }
        _ => false,
    }
}

/// A compiled sprite: dimensions, collision mask and both renderings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub(crate) frame: Frame,
    pub(crate) collision: CollisionMask,
    pub(crate) encoded: Vec<EncodedLine>,
    pub(crate) plain: Vec<String>,
    pub(crate) directive: DirectiveTemplate,
}

impl Asset {
    /// Compiles a block of bordered art lines.
    pub fn compile(block: &str, config: &Config) -> Result<Self> {
        config.validate()?;
        let frame = Frame::extract(block, config)?;
        Self::from_frame(frame, &config.directive)
    }

    /// Builds an asset from an already extracted frame.
    pub fn from_frame(frame: Frame, directive: &DirectiveTemplate) -> Result<Self> {
        let collision = CollisionMask::derive(&frame);
        let mut encoded = Vec::with_capacity(frame.height());
        let mut plain = Vec::with_capacity(frame.height());
        for (r, row) in frame.rows().enumerate() {
            let line = encode_row(row);
            line.verify(r, frame.width())?;
            log::trace!(
                "row {}: {} segments, {} cells skipped",
                r,
                line.segments().len(),
                line.skipped()
            );
            encoded.push(line);
            plain.push(plain_row(row));
        }
        log::debug!(
            "compiled {}x{} sprite, {} occupied cells",
            frame.width(),
            frame.height(),
            collision.occupied()
        );
        Ok(Self {
            frame,
            collision,
            encoded,
            plain,
            directive: directive.clone(),
        })
    }

    /// Returns the height of the sprite in rows.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Returns the width of the sprite in columns.
    pub fn width(&self) -> usize {
        self.frame.width()
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn collision(&self) -> &CollisionMask {
        &self.collision
    }

    pub fn encoded(&self) -> &[EncodedLine] {
        &self.encoded
    }

    /// Rows with filler drawn as space, no cursor directives.
    pub fn plain(&self) -> &[String] {
        &self.plain
    }

    pub fn directive(&self) -> &DirectiveTemplate {
        &self.directive
    }

    /// Cursor-advance rows as they should be emitted, filler drawn as space.
    pub fn ansi_lines(&self) -> Vec<String> {
        self.encoded
            .iter()
            .map(|l| l.render(&self.directive))
            .collect()
    }

    /// Cursor-advance rows with filler characters kept as written.
    pub fn raw_ansi_lines(&self) -> Vec<String> {
        self.encoded
            .iter()
            .map(|l| l.render_raw(&self.directive))
            .collect()
    }
}

/// Output syntax for a compiled asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// C++ `SpriteAsset` aggregate initializer.
    #[default]
    Cpp,
    Json,
    /// Plain rows only.
    Plain,
}

impl FromStr for Format {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cpp" | "c++" => Ok(Format::Cpp),
            "json" => Ok(Format::Json),
            "plain" | "text" => Ok(Format::Plain),
            other => Err(Error::Config(format!("unknown output format '{}'", other))),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Format::Cpp => write!(f, "cpp"),
            Format::Json => write!(f, "json"),
            Format::Plain => write!(f, "plain"),
        }
    }
}

// Emission
impl Asset {
    /// Serializes the asset in the given format. `name` is only used by C++.
    pub fn emit(&self, format: Format, name: &str) -> String {
        match format {
            Format::Cpp => self.to_cpp(name),
            Format::Json => self.to_json(),
            Format::Plain => self.to_string(),
        }
    }

    /// Converts the asset to a C++ `SpriteAsset` definition.
    pub fn to_cpp(&self, name: &str) -> String {
        let mut cpp = format!(
            "static SpriteAsset {}{{\n    {},\n    {},\n",
            name,
            self.height(),
            self.width()
        );

        cpp += "    {  // collision matrix\n";
        for row in self.collision.to_bits() {
            let cells: Vec<String> = row.iter().map(|b| b.to_string()).collect();
            let _ = writeln!(cpp, "        {{{}}},", cells.join(", "));
        }
        cpp += "    },\n";

        for lines in [self.ansi_lines(), self.plain.clone()] {
            cpp += "    {\n        // clang-format off\n";
            for line in lines {
                let _ = writeln!(cpp, "      {},", c_quote(&line));
            }
            cpp += "        // clang-format on\n    },\n";
        }
        cpp += "};\n";
        cpp
    }

    /// Converts the asset to a json document.
    pub fn to_json(&self) -> String {
        let mut json = String::new();
        self.write_json(&mut json, "");
        json.push('\n');
        json
    }

    /// Writes the json object, every line after the first prefixed by `indent`.
    pub(crate) fn write_json(&self, json: &mut String, indent: &str) {
        json.push_str("{\n");
        let _ = writeln!(json, "{}  \"height\": {},", indent, self.height());
        let _ = writeln!(json, "{}  \"width\": {},", indent, self.width());

        let _ = writeln!(json, "{}  \"collision\": [", indent);
        let bits = self.collision.to_bits();
        for (i, row) in bits.iter().enumerate() {
            let cells: Vec<String> = row.iter().map(|b| b.to_string()).collect();
            let sep = if i + 1 < bits.len() { "," } else { "" };
            let _ = writeln!(json, "{}    [{}]{}", indent, cells.join(", "), sep);
        }
        let _ = writeln!(json, "{}  ],", indent);

        write_json_lines(json, indent, "ansi", &self.ansi_lines(), true);
        write_json_lines(json, indent, "plain", &self.plain, false);
        let _ = write!(json, "{}}}", indent);
    }
}

fn write_json_lines(json: &mut String, indent: &str, key: &str, lines: &[String], more: bool) {
    let _ = writeln!(json, "{}  \"{}\": [", indent, key);
    for (i, line) in lines.iter().enumerate() {
        let sep = if i + 1 < lines.len() { "," } else { "" };
        let _ = writeln!(json, "{}    {}{}", indent, json_quote(line), sep);
    }
    let _ = writeln!(json, "{}  ]{}", indent, if more { "," } else { "" });
}

/// Displays the plain rows, one per line.
impl fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.plain {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl FromStr for Asset {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::compile(s, &Config::default())
    }
}
