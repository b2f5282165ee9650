use gestion_stock::{
    config::{Config, ConfigManager},
    AmountSpeller, MonetaryAmount,
};
use tempfile::tempdir;

#[test]
fn default_config_matches_invoice_template() {
    let cfg = Config::default();
    let speller = AmountSpeller::from_config(&cfg);
    let amount = MonetaryAmount::from_parts(5, 0).unwrap();
    assert_eq!(speller.spell(amount).as_str(), "*** cinq Da et zéro centimes.");
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    assert_eq!(manager.load().unwrap(), Config::default());

    let mut cfg = Config::default();
    cfg.set("currency", "DZD").unwrap();
    cfg.set("stamp-cap", "1500").unwrap();
    manager.save(&cfg).expect("save config");

    let loaded = manager.load().expect("load config");
    assert_eq!(loaded, cfg);
    assert!(manager.config_path().ends_with("config/config.json"));
    assert!(!manager.config_path().with_extension("json.tmp").exists());
}

#[test]
fn corrupt_config_is_reported() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    std::fs::write(manager.config_path(), "{ not json").unwrap();
    assert!(manager.load().is_err());
}
