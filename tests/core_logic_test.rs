use pattern_gallery::PatternError;
use pattern_gallery::core::config::GalleryConfig;
use pattern_gallery::core::engine::DemoEngine;
use pattern_gallery::core::narrator::MemoryNarrator;
use pattern_gallery::patterns::abstract_factory::{Environment, UserService, resolve_data_access};
use pattern_gallery::patterns::adapter::{
    StockDataAdapter, StockDataClient, StockMarketApp, ThirdPartyStockAnalyzer,
};
use pattern_gallery::patterns::builder::{HouseBuilder, HouseDirector, LuxuryHouseBuilder};
use pattern_gallery::patterns::factory_method::AuthRegistry;
use pattern_gallery::patterns::prototype::{Document, DocumentManager, Prototype, Template};
use pattern_gallery::patterns::singleton::{Counter, is_same_instance};
use tempfile::TempDir;

fn setup_gallery() -> (TempDir, pattern_gallery::core::config::ConfigManager) {
    let dir = tempfile::tempdir().unwrap();
    let manager =
        pattern_gallery::core::config::ConfigManager::new_at(dir.path().to_path_buf()).unwrap();
    manager.initialize().unwrap();
    (dir, manager)
}

#[test]
fn test_core_workflow() {
    let (_td, mut config_manager) = setup_gallery();

    // 1. Trim the config down to two demos
    for name in ["abstract-factory", "factory-method", "prototype", "singleton", "template-method"]
    {
        config_manager.disable_demo(name).unwrap();
    }

    // 2. Run what is left through a captured narrator
    let mut engine = DemoEngine::new(&config_manager).unwrap();
    assert_eq!(engine.config().demos, vec!["adapter", "builder"]);

    let mut engine = DemoEngine::with_narrator(
        engine.config().clone(),
        Box::new(MemoryNarrator::new()),
    );
    engine.run_enabled().unwrap();

    // 3. Unknown names fail instead of being skipped
    assert!(engine.run_named("observer").is_err());
}

#[test]
fn test_xml_stock_feed_reaches_the_app() {
    let app = StockMarketApp::new(StockDataAdapter::new(ThirdPartyStockAnalyzer::new()));
    let xml =
        "<symbol>AAPL</symbol><price>150.25</price><volume>1000000</volume><change>2.5</change>";

    let json = app.client().xml_to_json(xml).unwrap();
    let symbol = json["symbol"].as_str().unwrap();
    assert_eq!(symbol, "AAPL");
    assert_eq!(app.client().get_stock_price(symbol), 150.25);

    let analysis = app.client().analyze_xml_stock_data(xml).unwrap();
    assert_eq!(analysis.analysis, "Stock AAPL is up by 2.5%");
    assert!(app.display_stock_info("AAPL").contains(&"Price: $150.25".to_string()));
}

#[test]
fn test_unregistered_auth_platform_is_unknown_variant() {
    let mut registry = AuthRegistry::with_defaults();

    match registry.get_auth_factory("Kakao") {
        Err(PatternError::UnknownVariant { name, .. }) => assert_eq!(name, "Kakao"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("Kakao resolved before registration"),
    }

    registry.register_kakao();
    let receipt = registry
        .get_auth_factory("Kakao")
        .unwrap()
        .signup("joe@kakao.com", "123");
    assert_eq!(receipt.platform, "Kakao");
}

#[test]
fn test_builder_starts_fresh_after_result() {
    let mut builder = LuxuryHouseBuilder::new();
    builder.build_walls();
    builder.build_swimming_pool();
    let first = builder.get_result();
    assert!(!first.swimming_pool.is_empty());

    let second = builder.get_result();
    assert!(second.walls.is_empty());
    assert!(second.swimming_pool.is_empty());

    let mut director = HouseDirector::new(Box::new(LuxuryHouseBuilder::new()));
    let custom = director.build_custom_house(false, true, false);
    assert!(custom.garage.is_empty());
    assert!(!custom.swimming_pool.is_empty());
}

#[test]
fn test_prototype_copies_are_independent() {
    let manager = DocumentManager::new();

    let Some(Template::Document(mut copy)) = manager.create_from_template("blank") else {
        panic!("blank template missing");
    };
    copy.set_title("Edited");

    let Some(Template::Document(fresh)) = manager.create_from_template("blank") else {
        panic!("blank template missing");
    };
    assert_eq!(fresh.title(), "New document");
    assert!(manager.create_from_template("invoice").is_none());

    let original = Document::new("Original", "body", "Kim");
    assert_eq!(original.clone_prototype(), original);
}

#[test]
fn test_singleton_handles_share_state() {
    let a = Counter::instance();
    let b = Counter::instance();
    assert!(is_same_instance(a, b));

    let value = a.increment();
    assert_eq!(b.value(), value);
}

#[test]
fn test_environment_picks_data_access_family() {
    for (environment, family) in [
        (Environment::Production, "PostgreSQL"),
        (Environment::Development, "MongoDB"),
    ] {
        let factory = resolve_data_access(&environment.database().to_string()).unwrap();
        let load = UserService::new(factory.as_ref()).load_user("user_123");
        assert_eq!(load.summary, format!("User data loaded via {family}."));
    }

    assert!(resolve_data_access("oracle").is_err());
    assert_eq!(
        GalleryConfig::default().global_settings.environment,
        Environment::Production
    );
}
