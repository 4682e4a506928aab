//! oasform CLI entrypoint
//! Parses command-line arguments and drives a generation session.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use oasform::{
    application::{Evaluation, OutputService, SelectionRequest, Session, SessionInput},
    core::{Config, Prompt, Step},
    infrastructure::{
        openapi::{EXAMPLE_SPEC, SpecSource},
        output::FileSystemOutputService,
    },
};
use std::path::PathBuf;
use std::process::ExitCode;

// External imports (alphabetized)
use anyhow::Context;
use clap::{Args, Parser};
use dialoguer::{Confirm, MultiSelect};
use tokio::io::AsyncReadExt;
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

const SAFETY_NOTE: &str = "\
⚠️ Safety Note!

In general do NOT run random code from the internet on your machine.
The app generated from the example documentation is safe.
Apps generated from other sources may not be.
Models are discovered by parsing the generated code, never by importing it; \
importing Python code will run the whole module!";

/// Exit status when the pipeline is waiting for different input
const EXIT_AWAITING_INPUT: u8 = 2;

#[derive(Parser)]
#[command(name = "oasform")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file (defaults to <config dir>/oasform/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate models, a Streamlit form app, and a zip archive of both
    Generate {
        #[command(flatten)]
        source: SourceArgs,
        /// Model to use as a form input, as `module.Class` (repeatable)
        #[arg(long = "select", value_name = "MODEL")]
        select: Vec<String>,
        /// Pick form models from a terminal multi-select
        #[arg(long, conflicts_with = "select")]
        interactive: bool,
        /// Archive path (defaults to generated_code.zip)
        #[arg(long, conflicts_with = "unpack")]
        output: Option<PathBuf>,
        /// Write the files into a directory instead of a zip archive
        #[arg(long, value_name = "DIR")]
        unpack: Option<PathBuf>,
        /// Print the raw specification before the generated code
        #[arg(long)]
        show_spec: bool,
        /// Print every generated model module before the app
        #[arg(long)]
        show_code: bool,
        /// Model generator program (defaults to datamodel-codegen)
        #[arg(long)]
        generator: Option<String>,
    },
    /// List the models discovered in a specification
    Models {
        #[command(flatten)]
        source: SourceArgs,
        /// Model generator program (defaults to datamodel-codegen)
        #[arg(long)]
        generator: Option<String>,
    },
    /// Print the bundled example specification
    Example,
}

/// Where the OpenAPI specification comes from
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Use the bundled example specification
    #[arg(long)]
    example: bool,
    /// JSON or YAML specification file
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
    /// Specification text
    #[arg(long)]
    text: Option<String>,
    /// Read specification text from standard input
    #[arg(long)]
    stdin: bool,
    /// HTTP(S) URL serving the specification
    #[arg(long)]
    url: Option<String>,
}

impl SourceArgs {
    async fn into_source(self) -> anyhow::Result<SpecSource> {
        if self.stdin {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("Failed to read specification from stdin")?;
            return Ok(SpecSource::Text(text));
        }

        Ok(match (self.file, self.text, self.url) {
            (Some(path), _, _) => SpecSource::Upload(Some(path)),
            (_, Some(text), _) => SpecSource::Text(text),
            (_, _, Some(url)) => SpecSource::Url(url),
            _ => SpecSource::Example,
        })
    }
}

/// How a command finished
enum Outcome {
    Done,
    AwaitingInput(Prompt),
}

macro_rules! ready_or_halt {
    ($step:expr) => {
        match $step {
            Step::Ready(value) => value,
            Step::AwaitingInput(prompt) => return Ok(Outcome::AwaitingInput(prompt)),
        }
    };
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only generated code
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(Outcome::Done) => ExitCode::SUCCESS,
        Ok(Outcome::AwaitingInput(prompt)) => {
            warn!(%prompt, "Waiting for input");
            eprintln!("{prompt}");
            ExitCode::from(EXIT_AWAITING_INPUT)
        }
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<Outcome> {
    match cli.command {
        Commands::Example => {
            print!("{EXAMPLE_SPEC}");
            Ok(Outcome::Done)
        }
        Commands::Models { source, generator } => {
            let config = load_config(cli.config, generator).await?;
            list_models(&config, source).await
        }
        Commands::Generate {
            source,
            select,
            interactive,
            output,
            unpack,
            show_spec,
            show_code,
            generator,
        } => {
            let config = load_config(cli.config, generator).await?;
            generate(
                &config,
                GenerateParams {
                    source,
                    select,
                    interactive,
                    output,
                    unpack,
                    show_spec,
                    show_code,
                },
            )
            .await
        }
    }
}

/// Defaults, then the configuration file, then command-line overrides
async fn load_config(path: Option<PathBuf>, generator: Option<String>) -> anyhow::Result<Config> {
    let mut config = Config::load(path.as_deref())
        .await
        .context("Failed to load configuration")?;
    if let Some(program) = generator {
        config.generator.program = program;
    }
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    config.generator.resolve_program(&cwd);
    Ok(config)
}

/// Print the `module.Class` pairs a specification yields
async fn list_models(config: &Config, source: SourceArgs) -> anyhow::Result<Outcome> {
    let mut session = Session::from_config(config).context("Failed to start session")?;
    let source = source.into_source().await?;

    let raw = ready_or_halt!(session.acquire(&source).await?);
    let modules = ready_or_halt!(session.modules(&raw).await?);
    for module in &modules {
        for class in &module.classes {
            println!("{}.{}", module.name, class);
        }
    }
    Ok(Outcome::Done)
}

/// Options of `oasform generate`
struct GenerateParams {
    source: SourceArgs,
    select: Vec<String>,
    interactive: bool,
    output: Option<PathBuf>,
    unpack: Option<PathBuf>,
    show_spec: bool,
    show_code: bool,
}

async fn generate(config: &Config, params: GenerateParams) -> anyhow::Result<Outcome> {
    let mut session = Session::from_config(config).context("Failed to start session")?;
    let mut input = SessionInput {
        source: params.source.into_source().await?,
        selection: if params.select.is_empty() {
            SelectionRequest::Default
        } else {
            SelectionRequest::Named(params.select)
        },
    };
    info!(source = %input.source, "Generating form application");

    let mut evaluation = ready_or_halt!(session.evaluate(&input).await?);
    eprintln!("Generated {} module files", evaluation.modules.len());

    if params.show_spec {
        println!("{}", evaluation.raw.as_str());
    }
    if params.show_code {
        for module in &evaluation.modules {
            println!("# Generated module: {}", module.import_path());
            println!("{}", module.code);
        }
    }

    if params.interactive && evaluation.available.len() > 1 {
        loop {
            input.selection = SelectionRequest::Indices(select_interactively(&evaluation).await?);
            match session.evaluate(&input).await? {
                Step::Ready(next) => evaluation = next,
                Step::AwaitingInput(prompt @ Prompt::EmptySelection) => {
                    eprintln!("{prompt}");
                    continue;
                }
                Step::AwaitingInput(prompt) => return Ok(Outcome::AwaitingInput(prompt)),
            }

            eprintln!("{}", evaluation.app_code);
            if !confirm("Select different models?").await? {
                break;
            }
        }
    }

    print!("{}", evaluation.app_code);
    write_output(config, &evaluation, params.output, params.unpack).await?;

    let stats = session.stats();
    info!(
        module_cache_hits = stats.modules.hits,
        application_cache_hits = stats.applications.hits,
        "Session finished"
    );
    Ok(Outcome::Done)
}

/// Terminal multi-select over the available models, current selection pre-checked
async fn select_interactively(evaluation: &Evaluation) -> anyhow::Result<Vec<usize>> {
    let labels: Vec<String> = evaluation.available.iter().map(ToString::to_string).collect();
    let defaults: Vec<bool> = evaluation
        .available
        .iter()
        .map(|model| evaluation.selection.models().contains(model))
        .collect();

    tokio::task::spawn_blocking(move || {
        MultiSelect::new()
            .with_prompt("Select Models that will be Form Inputs")
            .items(&labels)
            .defaults(&defaults)
            .interact()
    })
    .await
    .context("Selection prompt panicked")?
    .context("Failed to read model selection")
}

async fn confirm(prompt: &'static str) -> anyhow::Result<bool> {
    tokio::task::spawn_blocking(move || Confirm::new().with_prompt(prompt).default(false).interact())
        .await
        .context("Confirmation prompt panicked")?
        .context("Failed to read confirmation")
}

async fn write_output(
    config: &Config,
    evaluation: &Evaluation,
    output: Option<PathBuf>,
    unpack: Option<PathBuf>,
) -> anyhow::Result<()> {
    let service = FileSystemOutputService::new();

    match unpack {
        Some(dir) => {
            service
                .write_artifacts(&evaluation.artifacts, &dir)
                .await
                .with_context(|| format!("Failed to unpack into {}", dir.display()))?;
            eprintln!("Wrote generated code to {}", dir.display());
            eprintln!(
                "Run the code with `streamlit run {}`",
                config.output.app_file
            );
        }
        None => {
            let path = output.unwrap_or_else(|| PathBuf::from(&config.output.archive_name));
            service
                .write_archive(&evaluation.archive, &path)
                .await
                .with_context(|| format!("Failed to write archive {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
            eprintln!(
                "Unzip, and run the code with `streamlit run {}`",
                config.output.app_file
            );
        }
    }

    eprintln!("{SAFETY_NOTE}");
    Ok(())
}
