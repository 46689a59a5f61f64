use core::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::chars::{check_char, single_char, SPACE};
use crate::error::{Error, Result};

/// Placeholder replaced by the skip count in a directive template.
pub const PLACEHOLDER: &str = "{n}";

/// Format of a "move the cursor N cells forward" directive.
///
/// Stored pre-split around the single `{n}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirectiveTemplate {
    prefix: String,
    suffix: String,
}

impl DirectiveTemplate {
    /// Renders the directive for a skip of `n` cells.
    pub fn render(&self, n: usize) -> String {
        format!("{}{}{}", self.prefix, n, self.suffix)
    }

    /// Appends the directive for a skip of `n` cells to `out`.
    pub fn render_into(&self, n: usize, out: &mut String) {
        out.push_str(&self.prefix);
        out.push_str(&n.to_string());
        out.push_str(&self.suffix);
    }

    /// True for the ANSI "cursor forward" form that `decode_directives` understands.
    pub fn is_ansi(&self) -> bool {
        *self == Self::default()
    }
}

/// ANSI CSI "cursor forward": `ESC [ n C`.
impl Default for DirectiveTemplate {
    fn default() -> Self {
        Self {
            prefix: "\x1b[".into(),
            suffix: "C".into(),
        }
    }
}

impl FromStr for DirectiveTemplate {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(PLACEHOLDER) {
            Some((prefix, suffix)) if !suffix.contains(PLACEHOLDER) => Ok(Self {
                prefix: prefix.into(),
                suffix: suffix.into(),
            }),
            _ => Err(Error::Config(format!(
                "directive template '{}' must contain exactly one {} placeholder, found {}",
                s.escape_default(),
                PLACEHOLDER,
                s.matches(PLACEHOLDER).count()
            ))),
        }
    }
}

impl fmt::Display for DirectiveTemplate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}{}", self.prefix, PLACEHOLDER, self.suffix)
    }
}

/// Options recognized by the compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Character stripped from both ends of every art line.
    pub border: char,
    /// Character marking a cell that collides but renders blank.
    pub filler: char,
    /// How a run of blank cells is written in the cursor-advance form.
    pub directive: DirectiveTemplate,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            border: '"',
            filler: '$',
            directive: DirectiveTemplate::default(),
        }
    }
}

/// On-disk shape of the config; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    border: Option<String>,
    filler: Option<String>,
    directive: Option<String>,
}

impl Config {
    /// Checks that border and filler can be told apart from art content.
    pub fn validate(&self) -> Result<()> {
        if self.border.is_whitespace() {
            return Err(Error::Config(format!(
                "border {:?} must not be whitespace",
                self.border
            )));
        }
        if self.filler == SPACE {
            return Err(Error::Config("filler must not be a space".into()));
        }
        if check_char(self.filler) != Some(self.filler) {
            return Err(Error::Config(format!(
                "filler {:?} is blank or disallowed in art",
                self.filler
            )));
        }
        if self.border == self.filler {
            return Err(Error::Config(format!(
                "border and filler are both {:?}",
                self.border
            )));
        }
        Ok(())
    }

    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml(s: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(s)?;
        let mut config = Self::default();
        if let Some(border) = file.border {
            config.border = single_char(&border)?;
        }
        if let Some(filler) = file.filler {
            config.filler = single_char(&filler)?;
        }
        if let Some(directive) = file.directive {
            config.directive = directive.parse()?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        log::debug!("loaded config from {}", path.display());
        Self::from_toml(&content)
    }
}

impl FromStr for Config {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_toml(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_directive_is_cursor_forward() {
        let t = DirectiveTemplate::default();
        assert_eq!(t.render(6), "\x1b[6C");
        assert_eq!(t.to_string(), "\x1b[{n}C");
        assert!(t.is_ansi());
    }

    #[test]
    fn custom_template() {
        let t: DirectiveTemplate = "<skip {n}>".parse().unwrap();
        assert_eq!(t.render(12), "<skip 12>");
        let mut out = String::from("a");
        t.render_into(2, &mut out);
        assert_eq!(out, "a<skip 2>");
        assert!(!t.is_ansi());
    }

    #[test]
    fn template_needs_one_placeholder() {
        assert!(matches!(
            "no placeholder".parse::<DirectiveTemplate>(),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            "{n}{n}".parse::<DirectiveTemplate>(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn toml_overrides() {
        let config = Config::from_toml(
            "border = \"|\"\nfiller = \"#\"\ndirective = \"\\u001b[{n}C\"\n",
        )
        .unwrap();
        assert_eq!(config.border, '|');
        assert_eq!(config.filler, '#');
        assert!(config.directive.is_ansi());
    }

    #[test]
    fn toml_rejects_long_filler() {
        assert!(matches!(
            Config::from_toml("filler = \"$$\""),
            Err(Error::StrToCharConversion(2))
        ));
    }

    #[test]
    fn toml_rejects_unknown_key() {
        assert!(matches!(
            Config::from_toml("colour = \"red\""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn validate_conflicts() {
        let mut config = Config::default();
        config.border = ' ';
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.filler = ' ';
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.filler = '"';
        assert!(config.validate().is_err());

        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn filler_must_survive_normalization() {
        for filler in ['\t', '\u{a0}', '\u{3000}', '\u{1}', '\u{200b}'] {
            let mut config = Config::default();
            config.filler = filler;
            assert!(
                matches!(config.validate(), Err(Error::Config(_))),
                "{:?}",
                filler
            );
        }
        assert!(matches!(
            Config::from_toml("filler = \"\\u00a0\""),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_toml("filler = \"\\t\""),
            Err(Error::Config(_))
        ));
        assert_eq!(Config::from_toml("filler = \"#\"").unwrap().filler, '#');
    }
}
