use pretty_assertions::assert_eq;
use spritec::{decode_directives, Asset, Config, Error, Format, Malformed, Segment, Sheet};

const DINO: &str = r#"
"                        "
"                        "
"_              ,------_ "
"||__    ___   ,| O  ___|"
" |_ '--'   '--'    '__  "
"   |          ,-'-----' "
"    |_________/         "
"      |_] || '--        "
"          |_]           "
"#;

fn dino() -> Asset {
    Asset::compile(DINO, &Config::default()).unwrap()
}

#[test]
fn dino_dimensions() {
    let asset = dino();
    assert_eq!(asset.height(), 9);
    assert_eq!(asset.width(), 24);
    assert_eq!(asset.collision().height(), 9);
    for row in asset.collision().rows() {
        assert_eq!(row.len(), 24);
    }
    assert_eq!(asset.collision().occupied(), 68);
}

#[test]
fn dino_cursor_lines() {
    let asset = dino();
    assert_eq!(
        asset.ansi_lines(),
        vec![
            "\x1b[24C",
            "\x1b[24C",
            "_\x1b[14C,------_\x1b[1C",
            "||__\x1b[4C___\x1b[3C,|\x1b[1CO\x1b[2C___|",
            "\x1b[1C|_\x1b[1C'--'\x1b[3C'--'\x1b[4C'__\x1b[2C",
            "\x1b[3C|\x1b[10C,-'-----'\x1b[1C",
            "\x1b[4C|_________/\x1b[9C",
            "\x1b[6C|_]\x1b[1C||\x1b[1C'--\x1b[8C",
            "\x1b[10C|_]\x1b[11C",
        ]
    );
}

#[test]
fn dino_round_trip() {
    let asset = dino();
    for (r, line) in asset.ansi_lines().iter().enumerate() {
        assert_eq!(&decode_directives(line, asset.width()), &asset.plain()[r]);
    }
    for (r, encoded) in asset.encoded().iter().enumerate() {
        let literals = encoded
            .segments()
            .iter()
            .filter(|s| matches!(s, Segment::Cell(_)))
            .count();
        assert_eq!(encoded.skipped() + literals, asset.width(), "row {}", r);
    }
}

#[test]
fn dino_collision_follows_blanks() {
    let asset = dino();
    for (r, line) in asset.plain().iter().enumerate() {
        for (c, ch) in line.chars().enumerate() {
            assert_eq!(asset.collision().get(r, c), ch != ' ', "({}, {})", r, c);
        }
    }
}

#[test]
fn filler_keeps_eye_socket_solid() {
    let asset = Asset::compile("\"(O$)\"\n\" $$ \"", &Config::default()).unwrap();
    assert_eq!(
        asset.collision().to_bits(),
        vec![vec![1, 1, 1, 1], vec![0, 1, 1, 0]]
    );
    assert_eq!(asset.plain(), &["(O )", "    "]);
    assert_eq!(asset.ansi_lines(), vec!["(O )", "\x1b[1C  \x1b[1C"]);
    assert_eq!(asset.raw_ansi_lines(), vec!["(O$)", "\x1b[1C$$\x1b[1C"]);
}

#[test]
fn cpp_emission_of_dino() {
    let cpp = dino().emit(Format::Cpp, "TREX_ASSET");
    assert!(cpp.starts_with("static SpriteAsset TREX_ASSET{\n    9,\n    24,\n"));
    assert!(cpp.contains(
        "        {0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0},\n"
    ));
    assert!(cpp.contains("      \"\\x1b[10C|_]\\x1b[11C\",\n"));
    assert!(cpp.contains("      \"          |_]           \",\n"));
    assert!(cpp.ends_with("        // clang-format on\n    },\n};\n"));
}

#[test]
fn custom_config_from_toml() {
    let config = Config::from_toml("border = \"|\"\nfiller = \"#\"\ndirective = \"<{n}>\"\n").unwrap();
    let asset = Asset::compile("|a  #|\n|  b |", &config).unwrap();
    assert_eq!(asset.ansi_lines(), vec!["a<2> ", "<2>b<1>"]);
    assert_eq!(asset.collision().to_bits(), vec![vec![1, 0, 0, 1], vec![0, 0, 1, 0]]);
}

#[test]
fn malformed_second_row() {
    let err = Asset::compile("\"abc\"\n\"ab\"\n", &Config::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::MalformedFrame(Malformed::WidthMismatch {
            row: 1,
            expected: 3,
            found: 2
        })
    ));
}

#[test]
fn files_on_disk() {
    let dir = tempfile::tempdir().unwrap();

    let config_path = dir.path().join("sprites.toml");
    std::fs::write(&config_path, "filler = \"%\"\n").unwrap();
    let config = Config::from_file(&config_path).unwrap();
    assert_eq!(config.filler, '%');

    let sheet_path = dir.path().join("sprites.txt");
    std::fs::write(&sheet_path, format!("@dino\n{}\n\n@dot\n\"%\"\n", DINO.trim())).unwrap();
    let sheet = Sheet::from_file(&sheet_path, &config).unwrap();
    assert_eq!(sheet.names(), vec!["dino", "dot"]);
    assert_eq!(sheet.get("dino").unwrap(), &dino());
    assert_eq!(sheet.get("dot").unwrap().collision().to_bits(), vec![vec![1]]);

    assert!(matches!(
        Sheet::from_file(dir.path().join("missing.txt"), &config),
        Err(Error::Io(_))
    ));
}
