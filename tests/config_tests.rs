use sift::select::MatchMode;
use sift::{initialize, Config, Result, SiftError};
use std::io::Write;

#[test]
fn loads_config_from_toml_file() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    writeln!(file, "page_size = 25")?;
    writeln!(file, "type_ahead_min_chars = 2")?;
    writeln!(file, "match_mode = \"fuzzy\"")?;
    writeln!(file, "trace_level = \"sift=debug\"")?;

    let config = Config::from_file(file.path())?;
    assert_eq!(config.page_size.get(), 25);
    assert_eq!(config.type_ahead_min_chars, 2);
    assert_eq!(config.multi_select_min_chars, 0);
    assert_eq!(config.match_mode, MatchMode::Fuzzy);
    assert_eq!(config.trace_level.as_deref(), Some("sift=debug"));
    Ok(())
}

#[test]
fn empty_file_gives_defaults() -> Result<()> {
    let file = tempfile::NamedTempFile::new()?;
    assert_eq!(Config::from_file(file.path())?, Config::default());
    Ok(())
}

#[test]
fn zero_page_size_in_file_is_rejected() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("sift.toml");
    std::fs::write(&path, "page_size = 0\n")?;

    assert!(matches!(Config::from_file(&path), Err(SiftError::InvalidPageSize(0))));
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    assert!(matches!(
        Config::from_file(dir.path().join("absent.toml")),
        Err(SiftError::Io(_))
    ));
    Ok(())
}

#[test]
fn configured_engines_honour_page_size() -> Result<()> {
    let config = Config::from_toml_str("page_size = 2")?;
    let engines = initialize(&config);
    let engine = engines.query_builder::<u32>().build()?;

    let items: Vec<u32> = (1..=5).collect();
    let view = engine.view(&items, &sift::QueryState::default());
    assert_eq!(view.total_pages, 3);
    assert_eq!(view.items, vec![&1, &2]);
    Ok(())
}
