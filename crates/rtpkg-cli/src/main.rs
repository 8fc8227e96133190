use clap::{Parser, Subcommand};
use rtpkg::{
    commands::{
        config::{self, ConfigAction},
        declare::{self, DeclareCommand},
        inspect,
    },
    GlobalOpts,
};
use rtpkg_logger as logger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rtpkg")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Runtime package declaration tool",
    long_about = "rtpkg resolves a runtime's version and description from its source tree and renders the package metadata for the packaging system."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble the package metadata and render it
    Declare(DeclareCommand),
    /// Print the resolved package version
    Version,
    /// Print the long description verbatim
    Describe,
    /// List the importable packages
    Packages,
    /// Configure rtpkg
    #[command(subcommand_required = true, arg_required_else_help = true)]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn init_tracing() {
    let default_filter = format!(
        "rtpkg={level},rtpkg_manifest={level}",
        level = logger::verbosity_to_tracing_level()
    );
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_with_verbosity(cli.global.verbosity_level()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    init_tracing();

    let result = match cli.command {
        Commands::Declare(cmd) => declare::handle_declare(cmd, &cli.global),
        Commands::Version => inspect::handle_version(&cli.global),
        Commands::Describe => inspect::handle_describe(&cli.global),
        Commands::Packages => inspect::handle_packages(&cli.global),
        Commands::Config { action } => config::handle_config(action, &cli.global),
    };

    if let Err(e) = result {
        logger::error(&format!("{:#}", e));
        if cli.global.verbosity_level() > 0 {
            logger::show_log_path();
        }
        std::process::exit(1);
    }
}
