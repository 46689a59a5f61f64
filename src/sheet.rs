use core::fmt;
use ordermap::OrderMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::Path;

use crate::asset::{is_cpp_identifier, Asset, Format};
use crate::config::Config;
use crate::error::{Error, Result};

/// Named sprites compiled from one file, kept in file order.
///
/// Names become C++ identifiers, so they must start with a letter or `_`
/// and hold only ASCII letters, digits and `_`.
///
/// ```text
/// ;; comment lines are allowed between sprites
/// @cactus
/// " | "
/// "-+-"
///
/// @bird
/// "\v/"
/// ```
#[derive(Debug, Default, Clone)]
pub struct Sheet {
    pub(crate) sprites: OrderMap<String, Asset>,
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sprite. Names must be unique.
    pub fn insert(&mut self, name: &str, asset: Asset) -> Result<()> {
        if self.sprites.contains_key(name) {
            return Err(Error::BlockDup(name.into()));
        }
        self.sprites.insert(name.into(), asset);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Asset> {
        self.sprites.get(name)
    }

    /// Returns the number of sprites.
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Sprite names in file order.
    pub fn names(&self) -> Vec<String> {
        self.sprites.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Asset)> {
        self.sprites.iter()
    }
}

// Reading
impl Sheet {
    /// Reads a sheet from a file.
    pub fn from_file<P: AsRef<Path>>(path: P, config: &Config) -> Result<Self> {
        Self::from_reader(File::open(path)?, config)
    }

    /// Reads a sheet from any reader.
    pub fn from_reader<R: Read>(r: R, config: &Config) -> Result<Self> {
        let mut lines = BufReader::new(r).lines();
        Self::from_lines(&mut lines, config)
    }

    /// Parses a sheet held in memory.
    pub fn parse(s: &str, config: &Config) -> Result<Self> {
        Self::from_reader(Cursor::new(s.as_bytes()), config)
    }

    /// Reads a sheet from an iterator of lines.
    pub fn from_lines<R: Read>(
        lines: &mut io::Lines<BufReader<R>>,
        config: &Config,
    ) -> Result<Self> {
        config.validate()?;
        let mut sheet = Self::new();
        while let Some(name) = next_block(lines)? {
            if sheet.sprites.contains_key(&name) {
                return Err(Error::BlockDup(name));
            }
            let block = read_block(lines)?;
            log::debug!("compiling sprite {}", name);
            let asset = Asset::compile(&block, config).map_err(|err| Error::Sprite {
                name: name.clone(),
                source: Box::new(err),
            })?;
            sheet.sprites.insert(name, asset);
        }
        log::debug!("sheet holds {} sprites", sheet.len());
        Ok(sheet)
    }
}

// Emission
impl Sheet {
    /// Serializes every sprite in the given format.
    pub fn emit(&self, format: Format) -> String {
        match format {
            Format::Cpp => self.to_cpp(),
            Format::Json => self.to_json(),
            Format::Plain => self.to_string(),
        }
    }

    /// One C++ `SpriteAsset` definition per sprite, named after it.
    pub fn to_cpp(&self) -> String {
        let defs: Vec<String> = self
            .sprites
            .iter()
            .map(|(name, asset)| asset.to_cpp(name))
            .collect();
        defs.join("\n")
    }

    /// A json object mapping sprite names to assets.
    pub fn to_json(&self) -> String {
        if self.sprites.is_empty() {
            return "{}\n".into();
        }
        let mut json = String::from("{\n");
        for (i, (name, asset)) in self.sprites.iter().enumerate() {
            json += &format!("  {}: ", crate::helpers::json_quote(name));
            asset.write_json(&mut json, "  ");
            if i + 1 < self.sprites.len() {
                json += ",\n";
            } else {
                json += "\n";
            }
        }
        json += "}\n";
        json
    }
}

/// Writes every sprite as a titled block of plain rows.
impl fmt::Display for Sheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (name, asset)) in self.sprites.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "@{}", name)?;
            write!(f, "{}", asset)?;
        }
        Ok(())
    }
}

/// Skips blank and `;;` comment lines, then reads a `@name` title.
pub(crate) fn next_block<R: Read>(lines: &mut io::Lines<BufReader<R>>) -> Result<Option<String>> {
    for line in lines {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with(";;") {
            continue;
        }
        return match line.strip_prefix('@').map(str::trim) {
            Some(name) if is_cpp_identifier(name) => Ok(Some(name.into())),
            _ => Err(Error::BlockExpected(line.into())),
        };
    }
    Ok(None)
}

/// Collects art lines up to the next blank line or end of input.
pub(crate) fn read_block<R: Read>(lines: &mut io::Lines<BufReader<R>>) -> Result<String> {
    let mut block = String::new();
    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }
        block += &line;
        block += "\n";
    }
    Ok(block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Malformed;
    use pretty_assertions::assert_eq;

    const SHEET: &str = r#"
;; obstacles
@cactus
" | "
"-+-"

@bird
"\v/"
"#;

    #[test]
    fn keeps_file_order() {
        let sheet = Sheet::parse(SHEET, &Config::default()).unwrap();
        assert_eq!(sheet.names(), vec!["cactus", "bird"]);
        assert_eq!(sheet.len(), 2);
        let cactus = sheet.get("cactus").unwrap();
        assert_eq!((cactus.height(), cactus.width()), (2, 3));
        assert_eq!(sheet.get("bird").unwrap().plain(), &["\\v/"]);
    }

    #[test]
    fn duplicate_title() {
        let err = Sheet::parse("@a\n\"x\"\n\n@a\n\"y\"\n", &Config::default()).unwrap_err();
        assert!(matches!(err, Error::BlockDup(name) if name == "a"));
    }

    #[test]
    fn art_before_title() {
        let err = Sheet::parse("\"x\"\n", &Config::default()).unwrap_err();
        assert!(matches!(err, Error::BlockExpected(line) if line == "\"x\""));
    }

    #[test]
    fn empty_title() {
        assert!(matches!(
            Sheet::parse("@ \n\"x\"\n", &Config::default()),
            Err(Error::BlockExpected(_))
        ));
    }

    #[test]
    fn title_must_be_identifier() {
        for title in ["@my sprite", "@1up", "@dash-name"] {
            let text = format!("{}\n\"x\"\n", title);
            match Sheet::parse(&text, &Config::default()) {
                Err(Error::BlockExpected(line)) => assert_eq!(line, title),
                other => panic!("{}: {:?}", title, other),
            }
        }
        let sheet = Sheet::parse("@_tmp2\n\"x\"\n", &Config::default()).unwrap();
        assert!(sheet.to_cpp().starts_with("static SpriteAsset _tmp2{"));
    }

    #[test]
    fn error_names_sprite() {
        let err = Sheet::parse("@ok\n\"x\"\n\n@bad\n\"ab\"\n\"a\"\n", &Config::default())
            .unwrap_err();
        match &err {
            Error::Sprite { name, source } => {
                assert_eq!(name, "bad");
                assert!(matches!(
                    **source,
                    Error::MalformedFrame(Malformed::WidthMismatch { row: 1, .. })
                ));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(err.row(), Some(1));
    }

    #[test]
    fn title_without_art() {
        assert!(matches!(
            Sheet::parse("@void\n\n", &Config::default()),
            Err(Error::Sprite { .. })
        ));
    }

    #[test]
    fn empty_input() {
        let sheet = Sheet::parse("\n;; nothing here\n", &Config::default()).unwrap();
        assert!(sheet.is_empty());
        assert_eq!(sheet.to_json(), "{}\n");
    }

    #[test]
    fn insert_rejects_duplicates() {
        let mut sheet = Sheet::new();
        let asset: Asset = "\"#\"".parse().unwrap();
        sheet.insert("dot", asset.clone()).unwrap();
        assert!(matches!(sheet.insert("dot", asset), Err(Error::BlockDup(_))));
    }

    #[test]
    fn plain_output() {
        let sheet = Sheet::parse(SHEET, &Config::default()).unwrap();
        assert_eq!(sheet.to_string(), "@cactus\n | \n-+-\n\n@bird\n\\v/\n");
        assert_eq!(sheet.emit(Format::Plain), sheet.to_string());
    }

    #[test]
    fn json_output() {
        let sheet = Sheet::parse("@a\n\"x\"\n\n@b\n\" \"\n", &Config::default()).unwrap();
        let expected = concat!(
            "{\n",
            "  \"a\": {\n",
            "    \"height\": 1,\n",
            "    \"width\": 1,\n",
            "    \"collision\": [\n",
            "      [1]\n",
            "    ],\n",
            "    \"ansi\": [\n",
            "      \"x\"\n",
            "    ],\n",
            "    \"plain\": [\n",
            "      \"x\"\n",
            "    ]\n",
            "  },\n",
            "  \"b\": {\n",
            "    \"height\": 1,\n",
            "    \"width\": 1,\n",
            "    \"collision\": [\n",
            "      [0]\n",
            "    ],\n",
            "    \"ansi\": [\n",
            "      \"\\u001b[1C\"\n",
            "    ],\n",
            "    \"plain\": [\n",
            "      \" \"\n",
            "    ]\n",
            "  }\n",
            "}\n",
        );
        assert_eq!(sheet.to_json(), expected);
    }

    #[test]
    fn cpp_output_names_each_sprite() {
        let sheet = Sheet::parse(SHEET, &Config::default()).unwrap();
        let cpp = sheet.to_cpp();
        assert!(cpp.starts_with("static SpriteAsset cactus{\n"));
        assert!(cpp.contains("\nstatic SpriteAsset bird{\n"));
    }
}
