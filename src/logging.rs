/// Install the global `env_logger`.
///
/// Status lines go to stdout through plain `println!`/`writeln!`; this only
/// governs diagnostics on stderr. `RUST_LOG` overrides the `warn` default.
pub fn init() {
    let result = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .format_module_path(false)
        .try_init();

    if result.is_err() {
        log::debug!("logger already initialised");
    }
}
