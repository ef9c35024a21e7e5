#[cfg(not(feature = "integration"))]
#[test]
fn integration_tests_disabled() {
    // Enable with: cargo test --features integration (needs a running storage API)
}

#[cfg(feature = "integration")]
mod integration {
    use std::time::Duration;

    use depot_explorer::config::ExplorerConfig;
    use depot_explorer::data::inventory::Applied;
    use depot_explorer::data::Inventory;
    use depot_explorer::{HttpStorage, StorageBackend};

    #[test]
    fn http_backend_fetches_warehouse_and_boxes() {
        let config = ExplorerConfig::from_env();
        let mut channel = HttpStorage::new(config.storage.clone()).spawn();
        let mut inventory = Inventory::default();

        channel.refresh();
        for _ in 0..2 {
            let event = channel
                .recv_timeout(Duration::from_secs(10))
                .expect("expected a response from the storage API");
            assert_eq!(inventory.apply(event), Applied::Changed);
        }

        let warehouse = inventory.warehouse().unwrap();
        assert_eq!(warehouse.id, config.storage.warehouse_id);
        assert!(warehouse.slot_count() > 0);
    }
}
