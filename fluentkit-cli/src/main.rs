use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

/// Converts a Fluent resource into a Rust source file that registers it
/// with fluentkit's static loader during application startup.
#[derive(Parser, Debug)]
#[command(name = "ftlembed", author, version, about)]
struct Args {
    /// The .ftl resource to embed
    input: PathBuf,

    /// Where to write the generated Rust source
    #[arg(required_unless_present = "debug")]
    output: Option<PathBuf>,

    /// Locale to register under (default: the input's parent directory
    /// stem, e.g. `locales/en-GB/app.ftl` registers as `en-GB`)
    #[arg(long)]
    locale: Option<String>,

    /// Print the canonical form of the parsed resource instead of
    /// generating code
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    let result = if args.debug {
        fluentkit_cli::inspect(&args.input).map(|rendered| print!("{}", rendered))
    } else if let Some(output) = &args.output {
        fluentkit_cli::generate(&args.input, output, args.locale.as_deref())
    } else {
        // clap rejects this combination before we get here.
        eprintln!("ftlembed: an output path is required unless --debug is given");
        return ExitCode::FAILURE;
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("ftlembed: {}", error);
            ExitCode::FAILURE
        }
    }
}
