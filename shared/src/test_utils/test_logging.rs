use env_logger::Env;

/// Initializes env_logger for tests. Safe to call from every test; only the
/// first call takes effect.
pub fn init_test_logging() {
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or("debug"))
        .is_test(true)
        .try_init();
}
