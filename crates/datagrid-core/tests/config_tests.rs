use datagrid_core::config::{CountMode, DatabaseConfig, GridConfig, MAX_PAGE_SIZE};

#[test]
fn test_database_config_serialization() {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 10,
        min_connections: 1,
    };

    let serialized = serde_json::to_string(&config).unwrap();
    assert!(serialized.contains("sqlite::memory:"));

    let deserialized: DatabaseConfig = serde_json::from_str(&serialized).unwrap();
    assert_eq!(deserialized.url, config.url);
    assert_eq!(deserialized.max_connections, 10);
    assert_eq!(deserialized.min_connections, 1);
}

#[test]
fn test_grid_config_default() {
    let config = GridConfig::default();

    assert_eq!(config.default_page_size, 10);
    assert_eq!(config.max_page_size, 100);
    assert_eq!(config.count_mode, CountMode::Accurate);
}

#[test]
fn test_clamp_page_size() {
    let config = GridConfig::default();

    assert_eq!(config.clamp_page_size(25), 25);
    assert_eq!(config.clamp_page_size(100), 100);
    assert_eq!(config.clamp_page_size(5000), 100);
    assert_eq!(config.clamp_page_size(0), 0);
    assert_eq!(config.clamp_page_size(-1), 0);

    let config = GridConfig {
        max_page_size: 20,
        ..GridConfig::default()
    };
    assert_eq!(config.clamp_page_size(50), 20);
}

#[test]
fn test_configured_maximum_cannot_exceed_hard_cap() {
    let config = GridConfig {
        max_page_size: 500,
        ..GridConfig::default()
    };

    assert_eq!(config.page_size_limit(), MAX_PAGE_SIZE);
    assert_eq!(config.clamp_page_size(1000), 100);
    assert_eq!(config.clamp_page_size(250), 100);
}

#[test]
fn test_count_mode_parsing() {
    assert_eq!("accurate".parse::<CountMode>(), Ok(CountMode::Accurate));
    assert_eq!("LEGACY".parse::<CountMode>(), Ok(CountMode::Legacy));
    assert!("both".parse::<CountMode>().is_err());
    assert_eq!(CountMode::Legacy.to_string(), "legacy");
}

#[test]
fn test_grid_config_count_mode_defaults_when_missing() {
    let config: GridConfig =
        serde_json::from_str(r#"{"default_page_size":10,"max_page_size":50}"#).unwrap();

    assert_eq!(config.max_page_size, 50);
    assert_eq!(config.count_mode, CountMode::Accurate);
}
