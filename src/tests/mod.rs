
mod asyoutypeformatter_tests;
mod phonenumberutil_tests;

static LOG_INIT: std::sync::Once = std::sync::Once::new();

/// Both test modules share one logger registration; `log` only accepts a
/// single global logger per process.
fn init_test_logging() {
    LOG_INIT.call_once(|| {
        colog::default_builder()
            .filter_level(log::LevelFilter::Trace)
            .init()
    });
}
