use log::LevelFilter;
use pretty_env_logger::env_logger::Target;

/// Initialises the global logger; `RUST_LOG` still overrides the level.
pub fn init_logger(verbose: bool, target: Target) {
    pretty_env_logger::env_logger::builder()
        .filter_level(if verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .parse_default_env()
        .format_timestamp(None)
        .target(target)
        .init();
}
