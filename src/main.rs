use gradle_dep_graph::adapters::outbound::console::StderrProgressReporter;
use gradle_dep_graph::adapters::outbound::filesystem::FileSystemReader;
use gradle_dep_graph::adapters::outbound::network::{
    CachingCoordinateResolver, MavenCentralResolver,
};
use gradle_dep_graph::application::dto::GraphRequest;
use gradle_dep_graph::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use gradle_dep_graph::application::use_cases::BuildDepGraphUseCase;
use gradle_dep_graph::cli::{Args, MergedOptions};
use gradle_dep_graph::config::{discover_config, load_config_from_path, ConfigFile};
use gradle_dep_graph::shared::error::ExitCode;
use gradle_dep_graph::shared::Result;
use std::io::IsTerminal;
use std::path::Path;
use std::process;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const LOG_ENV_VAR: &str = "GRADLE_DEP_GRAPH_LOG";

fn main() {
    // clap exits with code 2 on invalid arguments
    let args = Args::parse_args();
    init_tracing(args.verbose);

    let exit_code = match run(args) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            ExitCode::ApplicationError
        }
    };

    process::exit(exit_code.as_i32());
}

/// Diagnostics go to stderr. `GRADLE_DEP_GRAPH_LOG` takes a tracing filter
/// directive and overrides `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "gradle_dep_graph=debug,warn"
        } else {
            "warn"
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    let options = MergedOptions::merge(args, config)?;
    tracing::debug!(?options, "effective options");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(generate(options))
}

fn load_config(args: &Args) -> Result<Option<ConfigFile>> {
    match &args.config {
        Some(path) => load_config_from_path(path).map(Some),
        None => {
            let dir = args.input.parent().unwrap_or_else(|| Path::new(""));
            discover_config(dir)
        }
    }
}

async fn generate(options: MergedOptions) -> Result<()> {
    // Create adapters (Dependency Injection)
    let flat_map_reader = FileSystemReader::new();
    let coordinate_reader = FileSystemReader::new();
    let resolver = CachingCoordinateResolver::new(MavenCentralResolver::new()?);
    let progress_reporter = StderrProgressReporter::new();

    let use_case = BuildDepGraphUseCase::new(
        flat_map_reader,
        coordinate_reader,
        resolver,
        progress_reporter,
    )
    .with_package_manager(options.package_manager.clone())
    .with_max_concurrency(options.max_concurrency);

    let request = GraphRequest::new(options.input.clone(), options.root_name.clone())
        .with_root_version(options.root_version.clone())
        .with_coordinate_map(options.coordinates.clone())
        .with_hash_index(options.hashes.clone());

    let response = use_case.execute(request).await?;

    eprintln!("{}", FormatterFactory::progress_message(options.format));

    let colored = options.output.is_none() && std::io::stdout().is_terminal();
    let formatter = FormatterFactory::create_with_color(options.format, colored);
    let formatted_output = formatter.format(&response.dep_graph, &response.metadata)?;

    let presenter = PresenterFactory::create(PresenterType::from_output(options.output));
    presenter.present(&formatted_output)?;

    Ok(())
}
