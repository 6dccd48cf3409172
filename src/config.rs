use clap::Parser;

/// Interactive in-memory auction registry
#[derive(Parser, Debug, Clone)]
#[command(name = "auction-registry", version, about)]
pub struct Config {
    /// tracing filter directive, e.g. `debug` or `auction_registry=trace`
    #[arg(long, env = "AUCTION_LOG", default_value = "warn")]
    pub log_filter: String,

    /// Print item status as JSON instead of the plain report
    #[arg(long, env = "AUCTION_JSON", default_value_t = false)]
    pub json: bool,

    /// Skip the start-up banner
    #[arg(long, env = "AUCTION_NO_BANNER", default_value_t = false)]
    pub no_banner: bool,
}
