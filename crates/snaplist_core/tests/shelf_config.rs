use snaplist_core::{NoteParser, Shelf, ShelfConfigError, ShelfTable};
use std::error::Error;
use std::fs;
use tempfile::TempDir;

const CONFIG: &str = r#"{
  "shelves": [
    { "shelf": "read", "name": "Library", "icon": "📚", "aliases": ["Book", "zine"] },
    { "shelf": "buy", "aliases": ["wishlist"] }
  ]
}"#;

#[test]
fn json_config_drives_parsing() {
    let table = ShelfTable::from_json(CONFIG).unwrap();
    let parser = NoteParser::new(&table);

    let note = parser.parse("zine: Cometbus #punk");
    assert_eq!(note.category, Shelf::Read);
    assert_eq!(note.title, "Cometbus");

    assert_eq!(parser.parse("wishlist: kayak").category, Shelf::Buy);
    // Shelf keys are only aliases when the config lists them.
    let note = parser.parse("watch: Dune");
    assert_eq!(note.category, Shelf::Other);
    assert_eq!(note.title, "watch: Dune");
}

#[test]
fn json_config_keeps_display_metadata() {
    let table = ShelfTable::from_json(CONFIG).unwrap();

    let read = table.get(Shelf::Read);
    assert_eq!(read.name, "Library");
    assert_eq!(read.icon, "📚");
    assert_eq!(read.aliases, vec!["book", "zine"]);

    let buy = table.get(Shelf::Buy);
    assert_eq!(buy.name, Shelf::Buy.default_name());
    assert_eq!(buy.icon, Shelf::Buy.default_icon());

    let watch = table.get(Shelf::Watch);
    assert_eq!(watch.name, Shelf::Watch.default_name());
    assert!(watch.aliases.is_empty());

    let order: Vec<Shelf> = table.shelves().iter().map(|def| def.shelf).collect();
    assert_eq!(order, Shelf::ALL.to_vec());
}

#[test]
fn config_file_is_loaded_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shelves.json");
    fs::write(&path, CONFIG).unwrap();

    let table = ShelfTable::from_json_file(&path).unwrap();
    assert_eq!(table.lookup_alias("zine"), Some(Shelf::Read));
}

#[test]
fn missing_config_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.json");

    let err = ShelfTable::from_json_file(&path).unwrap_err();
    assert!(matches!(err, ShelfConfigError::Io { .. }));
    assert!(err.to_string().contains("absent.json"));
    assert!(err.source().is_some());
}

#[test]
fn malformed_config_is_rejected() {
    let err = ShelfTable::from_json("{ not json").unwrap_err();
    assert!(matches!(err, ShelfConfigError::Parse(_)));

    let err = ShelfTable::from_json(r#"{"shelves":[{"shelf":"snack"}]}"#).unwrap_err();
    assert!(matches!(err, ShelfConfigError::Parse(_)));

    let err = ShelfTable::from_json(r#"{"shelves":[],"extra":true}"#).unwrap_err();
    assert!(matches!(err, ShelfConfigError::Parse(_)));
}

#[test]
fn conflicting_aliases_are_rejected() {
    let err = ShelfTable::from_json(
        r#"{"shelves":[
            {"shelf":"watch","aliases":["show"]},
            {"shelf":"do","aliases":["SHOW"]}
        ]}"#,
    )
    .unwrap_err();
    match err {
        ShelfConfigError::DuplicateAlias {
            alias,
            first,
            second,
        } => {
            assert_eq!(alias, "show");
            assert_eq!(first, Shelf::Watch);
            assert_eq!(second, Shelf::Do);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_alias_shapes_are_rejected() {
    let err = ShelfTable::from_json(r#"{"shelves":[{"shelf":"eat","aliases":["  "]}]}"#)
        .unwrap_err();
    assert!(matches!(err, ShelfConfigError::EmptyAlias(Shelf::Eat)));

    let err = ShelfTable::from_json(r#"{"shelves":[{"shelf":"eat","aliases":["a:b"]}]}"#)
        .unwrap_err();
    assert!(matches!(err, ShelfConfigError::InvalidAlias { .. }));

    let err = ShelfTable::from_json(r#"{"shelves":[{"shelf":"other","aliases":["misc"]}]}"#)
        .unwrap_err();
    assert!(matches!(err, ShelfConfigError::AliasOnFallback(_)));

    let err =
        ShelfTable::from_json(r#"{"shelves":[{"shelf":"eat"},{"shelf":"eat"}]}"#).unwrap_err();
    assert!(matches!(err, ShelfConfigError::DuplicateShelf(Shelf::Eat)));
}

#[test]
fn builtin_table_matches_default_parser() {
    let table = ShelfTable::default();
    assert_eq!(&table, ShelfTable::builtin());
    assert_eq!(
        NoteParser::new(&table).parse("films: Heat"),
        NoteParser::default().parse("films: Heat")
    );
}
