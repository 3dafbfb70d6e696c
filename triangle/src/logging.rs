use env_logger::Env;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Installs `env_logger` for the binaries. `RUST_LOG` takes precedence over
/// `default_filter`. Only the first call installs a logger.
pub fn init_logging(default_filter: &str) {
    let installed = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .try_init()
        .is_ok();

    if installed {
        log::debug!("logging initialized with default filter `{default_filter}`");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_ignored() {
        init_logging(DEFAULT_FILTER);
        init_logging("trace");

        log::info!("still logging");
    }
}
