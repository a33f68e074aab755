use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use sheet_tl::cli::commands::{providers, translate};
use sheet_tl::cli::{Args, Command};
use sheet_tl::config::{ConfigError, ResolveOptions};
use sheet_tl::error::ValidationError;
use sheet_tl::output::{self, OutputConfig};
use sheet_tl::ui::{Style, handle_prompt_cancellation};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    output::init(OutputConfig::from_flags(
        args.quiet,
        args.no_color,
        args.verbose,
    ));

    if let Err(err) = run(args).await {
        eprintln!("{} {err:#}", Style::error("Error:"));
        std::process::exit(exit_code_for(&err));
    }
}

async fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Command::Providers { ref provider }) => {
            providers::print_providers(provider.as_deref())?;
        }
        None => {
            let context = args.context_answer();
            let (Some(sheet), Some(range)) = (args.sheet, args.range) else {
                Args::command()
                    .error(
                        ErrorKind::MissingRequiredArgument,
                        "a sheet and --range <RANGE> are required to translate",
                    )
                    .exit();
            };

            let options = translate::TranslateOptions {
                sheet,
                range,
                context,
                resolve: ResolveOptions {
                    provider: args.provider,
                    model: args.model,
                    delay_ms: args.delay_ms,
                    source_cell: args.source_cell,
                    target_cell: args.target_cell,
                },
            };
            handle_prompt_cancellation(translate::run_translate(options).await)?;
        }
    }

    Ok(())
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<ValidationError>().is_some() {
        exitcode::DATAERR
    } else if err.downcast_ref::<ConfigError>().is_some() {
        exitcode::CONFIG
    } else {
        1
    }
}
