//! Logging setup a host embeds once at process start. The core itself
//! never calls this implicitly — no module-level init, no global logger
//! singleton.

/// Installs a `tracing-subscriber` formatter honoring `RUST_LOG`,
/// defaulting to `info` for this crate's components when unset.
pub fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "penin=info,penin_evolution=info".into());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).try_init();
}
