use agrokurs_ap::logging;

// One logger per process, so everything lives in a single test
#[test]
fn host_logger_carries_log_records() {
    assert!(!log::log_enabled!(log::Level::Error));

    logging::init_with_filter("info").unwrap();

    assert!(log::log_enabled!(log::Level::Error));
    assert!(log::log_enabled!(log::Level::Info));
    assert!(!log::log_enabled!(log::Level::Trace));

    // A second backend cannot replace the first
    assert!(logging::init_with_filter("debug").is_err());
}
