use ledger_core::config::{Config, ConfigManager};
use ledger_core::core::services::SortOrder;
use tempfile::TempDir;

#[test]
fn missing_file_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
    assert!(!manager.path().exists());
    assert_eq!(manager.load().unwrap(), Config::default());
}

#[test]
fn save_then_load_keeps_preferences() {
    let temp = TempDir::new().unwrap();
    let manager = ConfigManager::with_base_dir(temp.path().join("nested")).unwrap();

    let mut config = Config::default();
    config.set("currency", "gbp").unwrap();
    config.set("default_sort", "asc").unwrap();
    config.set("payment_methods", "voucher,crypto").unwrap();
    manager.save(&config).unwrap();

    let loaded = manager.load().unwrap();
    assert_eq!(loaded.currency, "GBP");
    assert_eq!(loaded.default_sort, SortOrder::Ascending);
    assert_eq!(loaded.catalog().codes().len(), 5);

    let leftovers: Vec<_> = std::fs::read_dir(temp.path().join("nested"))
        .unwrap()
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(leftovers, vec!["config.json".to_string()]);
}

#[test]
fn corrupt_file_is_reported() {
    let temp = TempDir::new().unwrap();
    let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
    std::fs::write(manager.path(), "{ not json").unwrap();
    assert!(manager.load().is_err());
}
