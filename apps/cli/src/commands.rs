//! CLI command definitions, routing, and tracing setup.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use url::Url;

use careerguide_commands::Command as UserCommand;
use careerguide_core::{AskOutcome, FailurePolicy, ProgressReporter};
use careerguide_llm::{GeminiClient, GeminiConfig};
use careerguide_scrape::{SectionFilter, build_client, fetch_details, list_careers};
use careerguide_shared::{
    AppConfig, CareerSummary, DetailSection, init_config, load_config, load_config_from,
    resolve_api_key,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// CareerGuide — a career assistant over the TechGuide.sh catalog.
#[derive(Parser)]
#[command(
    name = "careerguide",
    version,
    about = "Explore TechGuide.sh careers, get Gemini-powered summaries, and ask questions.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file path (defaults to ~/.careerguide/careerguide.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// List the careers currently advertised on the site.
    Careers,

    /// Print the filtered detail sections of one career.
    Details {
        /// Career name (matched case-insensitively against the listing).
        career: String,
    },

    /// Build the full site context block across every listed career.
    Context {
        /// Abort on the first failing career instead of skipping it.
        #[arg(long)]
        abort_on_error: bool,

        /// Write the rendered context to a file instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Generate a Gemini summary of one career.
    Summary {
        /// Career name (matched case-insensitively against the listing).
        career: String,
    },

    /// Ask one question (or run one @command) about a career.
    Ask {
        /// Career name (matched case-insensitively against the listing).
        career: String,

        /// Question text, or a command such as "@agenda ... amanhã às 10h".
        question: String,
    },

    /// Interactive question loop about one career.
    Chat {
        /// Career name (matched case-insensitively against the listing).
        career: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "careerguide=info",
        1 => "careerguide=debug",
        _ => "careerguide=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    match cli.command {
        Command::Careers => cmd_careers(&config).await,
        Command::Details { career } => cmd_details(&config, &career).await,
        Command::Context {
            abort_on_error,
            out,
        } => cmd_context(&config, abort_on_error, out.as_deref()).await,
        Command::Summary { career } => cmd_summary(&config, &career).await,
        Command::Ask { career, question } => cmd_ask(&config, &career, &question).await,
        Command::Chat { career } => cmd_chat(&config, &career).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(&config),
        },
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn base_url(config: &AppConfig) -> Result<Url> {
    Url::parse(&config.defaults.base_url)
        .map_err(|e| eyre!("invalid base_url '{}': {e}", config.defaults.base_url))
}

fn gemini_client(config: &AppConfig) -> Result<GeminiClient> {
    let api_key = resolve_api_key(config)?;
    Ok(GeminiClient::new(GeminiConfig::from_settings(
        &config.gemini,
        api_key,
    ))?)
}

/// Resolve a career argument against the live listing, case-insensitively.
async fn resolve_career(
    client: &reqwest::Client,
    base: &Url,
    name: &str,
) -> Result<CareerSummary> {
    let careers = list_careers(client, base).await?;

    careers
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
        .cloned()
        .ok_or_else(|| {
            let available = careers
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            eyre!("career '{name}' not found. Available: {available}")
        })
}

fn print_sections(sections: &[DetailSection]) {
    for section in sections {
        match section {
            DetailSection::Heading { text } => println!("{text}"),
            DetailSection::List { items } => {
                for item in items {
                    println!("  - {item}");
                }
            }
        }
    }
}

/// Render a typed `@` command for the user. Side-effecting integrations
/// (calendar, spreadsheet) are external; nothing is created here.
fn print_command(command: &UserCommand) {
    match command {
        UserCommand::Calendar(event) => {
            println!("@agenda command recognized:");
            println!("  Title: {}", event.title);
            println!("  Start: {}", event.start.format("%Y-%m-%d %H:%M"));
            println!("  End:   {}", event.end.format("%Y-%m-%d %H:%M"));
            println!("Calendar creation is handled by the external integration; nothing was created.");
        }
        UserCommand::Sheet { name } => {
            println!("@sheet command recognized:");
            println!("  Spreadsheet name: {name}");
            println!("Spreadsheet creation is handled by the external integration; nothing was created.");
        }
        UserCommand::Unrecognized { prefix } => {
            println!("Command '@{prefix}' is not supported. Try @agenda or @sheet.");
        }
        UserCommand::Question { .. } => {}
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_careers(config: &AppConfig) -> Result<()> {
    let client = build_client(config.defaults.timeout_secs)?;
    let base = base_url(config)?;
    let careers = list_careers(&client, &base).await?;

    if careers.is_empty() {
        println!("No careers found at {base}");
        return Ok(());
    }

    for career in &careers {
        println!("{}  ({})", career.name, career.url);
    }
    println!();
    println!("{} careers listed", careers.len());

    Ok(())
}

async fn cmd_details(config: &AppConfig, career_name: &str) -> Result<()> {
    let client = build_client(config.defaults.timeout_secs)?;
    let base = base_url(config)?;
    let filter = SectionFilter::new(&config.filters)?;

    let career = resolve_career(&client, &base, career_name).await?;
    let url = Url::parse(&career.url)?;
    let sections = fetch_details(&client, &url, &filter).await?;

    println!("{}", career.name);
    println!("{}", career.url);
    println!();
    print_sections(&sections);

    Ok(())
}

async fn cmd_context(
    config: &AppConfig,
    abort_on_error: bool,
    out: Option<&std::path::Path>,
) -> Result<()> {
    let client = build_client(config.defaults.timeout_secs)?;
    let base = base_url(config)?;
    let filter = SectionFilter::new(&config.filters)?;
    let policy = if abort_on_error {
        FailurePolicy::Abort
    } else {
        FailurePolicy::SkipAndContinue
    };

    info!(%base, ?policy, "building full site context");

    let reporter = CliProgress::new();
    let context =
        careerguide_core::build_context(&client, &base, &filter, policy, &reporter).await?;
    reporter.finish();

    let rendered = context.render();
    match out {
        Some(path) => {
            std::fs::write(path, &rendered)
                .map_err(|e| eyre!("cannot write {}: {e}", path.display()))?;
            println!("Context written to {}", path.display());
        }
        None => println!("{rendered}"),
    }

    if !context.failures.is_empty() {
        println!();
        println!("{} career(s) skipped:", context.failures.len());
        for failure in &context.failures {
            println!("  {}: {}", failure.career.name, failure.error);
        }
    }

    Ok(())
}

async fn cmd_summary(config: &AppConfig, career_name: &str) -> Result<()> {
    let client = build_client(config.defaults.timeout_secs)?;
    let base = base_url(config)?;
    let filter = SectionFilter::new(&config.filters)?;
    let llm = gemini_client(config)?;

    let career = resolve_career(&client, &base, career_name).await?;
    let summary =
        careerguide_core::summarize_career(&client, &llm, &filter, &career).await?;

    println!("Summary: {}", career.name);
    println!();
    println!("{summary}");

    Ok(())
}

async fn cmd_ask(config: &AppConfig, career_name: &str, question: &str) -> Result<()> {
    let client = build_client(config.defaults.timeout_secs)?;
    let base = base_url(config)?;
    let filter = SectionFilter::new(&config.filters)?;
    let llm = gemini_client(config)?;

    let career = resolve_career(&client, &base, career_name).await?;
    let outcome = careerguide_core::ask_about_career(
        &client,
        &llm,
        &filter,
        &career,
        question,
        Local::now().date_naive(),
    )
    .await?;

    match outcome {
        AskOutcome::Answer(answer) => println!("{answer}"),
        AskOutcome::Command(command) => print_command(&command),
    }

    Ok(())
}

async fn cmd_chat(config: &AppConfig, career_name: &str) -> Result<()> {
    let client = build_client(config.defaults.timeout_secs)?;
    let base = base_url(config)?;
    let filter = SectionFilter::new(&config.filters)?;
    let llm = gemini_client(config)?;

    let career = resolve_career(&client, &base, career_name).await?;

    println!("Chatting about: {}", career.name);
    println!("Model: {}", llm.model());
    println!("Ask a question, use @agenda / @sheet, or type 'exit' to leave.");
    println!();

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    loop {
        print!("> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("sair") {
            break;
        }

        let outcome = careerguide_core::ask_about_career(
            &client,
            &llm,
            &filter,
            &career,
            input,
            Local::now().date_naive(),
        )
        .await;

        match outcome {
            Ok(AskOutcome::Answer(answer)) => {
                println!("{answer}");
                println!();
            }
            Ok(AskOutcome::Command(command)) => {
                print_command(&command);
                println!();
            }
            Err(e) => {
                println!("error: {e}");
                println!();
            }
        }
    }

    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config written to {}", path.display());
    Ok(())
}

fn cmd_config_show(config: &AppConfig) -> Result<()> {
    let rendered = toml::to_string_pretty(config)?;
    println!("{rendered}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// Aggregation progress using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn career_fetched(&self, name: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Fetching [{current}/{total}] {name}"));
    }
}
