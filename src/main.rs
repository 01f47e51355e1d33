use clap::{Parser, Subcommand};
use nvim_bindgen::{
    DEFAULT_OLDEST_SUPPORTED_API_LEVEL, DocumentWriter, FileWriter, GenerateError, GenerateStats,
    MetadataFile, MetadataSource, NvimProcess, Options, Pipeline, StdoutWriter,
};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "nvim-bindgen")]
#[command(about = "Generate typed .NET bindings from Neovim's API metadata")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the C# client from `nvim --api-info`
    Generate {
        /// Path of the generated .cs file
        #[arg(required_unless_present = "stdout")]
        output: Option<PathBuf>,

        /// Print to stdout instead of writing a file
        #[arg(long)]
        stdout: bool,

        /// Read a stored api-info document (.json or msgpack) instead of running nvim
        #[arg(long, value_name = "FILE")]
        api_info: Option<PathBuf>,

        /// nvim executable to query
        #[arg(long, value_name = "PROGRAM", env = "NVIM_BIN", default_value = "nvim")]
        nvim: PathBuf,

        /// Namespace of the generated code
        #[arg(long, default_value = "NvimClient.API")]
        namespace: String,

        /// Name of the generated partial client class
        #[arg(long, default_value = "NvimAPI")]
        class_name: String,

        /// Skip entries deprecated before this API level
        #[arg(long, value_name = "LEVEL", default_value_t = DEFAULT_OLDEST_SUPPORTED_API_LEVEL)]
        oldest_api_level: u64,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            output,
            stdout,
            api_info,
            nvim,
            namespace,
            class_name,
            oldest_api_level,
        } => {
            let options = Options {
                namespace,
                class_name,
                oldest_supported_api_level: oldest_api_level,
                ..Options::default()
            };
            let source: Box<dyn MetadataSource> = match api_info {
                Some(path) => Box::new(MetadataFile::new(path)),
                None => Box::new(NvimProcess::new(nvim)),
            };

            let start = Instant::now();
            let result = match (stdout, output) {
                (false, Some(path)) => {
                    let mut writer = FileWriter::new(&path);
                    generate(options, source.as_ref(), &mut writer)
                        .map(|stats| (stats, Some(path)))
                }
                _ => generate(options, source.as_ref(), &mut StdoutWriter)
                    .map(|stats| (stats, None)),
            };

            match result {
                Ok((stats, path)) => {
                    if let Some(path) = path {
                        print_generated(&path.display().to_string());
                    }
                    print_summary(&stats, start.elapsed());
                }
                Err(err) => {
                    print_error(&err);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn generate(
    options: Options,
    source: &dyn MetadataSource,
    writer: &mut dyn DocumentWriter,
) -> Result<GenerateStats, GenerateError> {
    Pipeline::new(options)
        .run(source, writer)
        .map(|result| result.stats)
}

fn print_error(err: &GenerateError) {
    if io::stderr().is_terminal() {
        eprint!("{}", err.render_color());
    } else {
        eprint!("{}", err.render());
    }
}

fn print_generated(path: &str) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("  \x1b[32m✓\x1b[0m {}", path);
    } else {
        eprintln!("  ✓ {}", path);
    }
}

fn print_summary(stats: &GenerateStats, elapsed: Duration) {
    let is_tty = io::stderr().is_terminal();
    let time_str = format_duration(elapsed);
    let summary = format!(
        "Generated {} functions, {} methods on {} handle types and {} events in {}",
        stats.functions, stats.methods, stats.wrappers, stats.events, time_str
    );

    if is_tty {
        eprintln!("\n\x1b[1m✨ {}\x1b[0m", summary);
    } else {
        eprintln!("\n✨ {}", summary);
    }
}

fn format_duration(d: Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}μs", micros)
    } else if micros < 1_000_000 {
        format!("{:.1}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}
