use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt::Display;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use precision_scout::companies::{
    self, find_company, industries, Company, CompanyQuery, SortKey,
};
use precision_scout::config::{self, Config};
use precision_scout::enrichment::{self, EnrichmentPayload, EnrichmentResult};
use precision_scout::error::WorkspaceError;
use precision_scout::output;
use precision_scout::signals::evaluate_with_breakdown;
use precision_scout::thesis::{FundThesis, StageFilter, ThesisTag};
use precision_scout::workspace::{self, WorkspaceState};

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_STORAGE: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Args, Debug, Clone)]
struct FilterArgs {
    /// Free-text search over name, industry, description, location, website, stage and tags
    #[arg(short, long, default_value = "")]
    q: String,

    /// Funding stage ("Any", "Pre-Seed", "Seed", "Series A", "Series B+", "Bootstrapped")
    #[arg(long, default_value = "Any")]
    stage: StageFilter,

    /// Exact industry ("All" matches every industry)
    #[arg(long)]
    industry: Option<String>,

    /// Comma-separated thesis tags; companies must carry all of them
    #[arg(long, value_delimiter = ',')]
    tags: Vec<ThesisTag>,
}

impl FilterArgs {
    fn to_query(&self, sort: SortKey, page: usize) -> CompanyQuery {
        CompanyQuery {
            q: self.q.clone(),
            stage: self.stage,
            industry: self.industry.clone(),
            tags: self.tags.clone(),
            sort,
            page,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Tsv,
}

#[derive(Subcommand, Debug)]
enum ListCommands {
    /// Show all lists and their members
    Ls,
    /// Create an empty list
    Create { name: String },
    /// Delete a list
    Rm { id: String },
    /// Add a company to a list, or remove it if already a member
    Toggle { list: String, company: String },
}

#[derive(Subcommand, Debug)]
enum SearchCommands {
    /// Show all saved searches
    Ls,
    /// Save the given filters under a name
    Save {
        name: String,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Delete a saved search
    Rm { id: String },
    /// Run a saved search
    Run {
        id: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
}

/// Commands that run against the loaded config, universe and workspace.
#[derive(Subcommand, Debug)]
enum SessionCommands {
    /// Score an enrichment payload (JSON) against the fund thesis
    Score {
        /// Payload file; reads stdin when omitted or "-"
        path: Option<PathBuf>,

        /// Company the payload belongs to; the result is cached for it
        #[arg(long)]
        company: Option<String>,

        /// Page the payload was scraped from, used when it lists no sources
        #[arg(long)]
        url: Option<String>,

        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Browse the company universe
    Companies {
        #[command(flatten)]
        filters: FilterArgs,

        /// Sort key: name, stage or location
        #[arg(long, default_value = "name")]
        sort: SortKey,

        #[arg(long, default_value_t = 1)]
        page: usize,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// List the industries present in the company universe
    Industries,
    /// Show a company with its cached enrichment, note and lists
    Show { id: String },
    /// Open a company's website in the browser
    Open { id: String },
    /// Add a company by name and website
    AddCompany {
        name: String,
        website: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Set the note for a company (empty text removes it)
    Note { id: String, text: String },
    /// Manage company lists
    Lists {
        #[command(subcommand)]
        command: ListCommands,
    },
    /// Manage saved searches
    Searches {
        #[command(subcommand)]
        command: SearchCommands,
    },
    /// Drop the cached enrichment of a company
    Forget { id: String },
    /// Print the fund thesis in effect
    Thesis,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a config file
    Init {
        /// Write the built-in defaults without prompting
        #[arg(long)]
        defaults: bool,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    #[command(flatten)]
    Session(SessionCommands),
}

#[derive(Parser, Debug)]
#[command(name = "scout")]
#[command(about = "Deal-sourcing CLI: browse companies and score them against a fund thesis", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/precision-scout/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// A failure to report on stderr before exiting with `code`.
struct Failure {
    code: i32,
    message: String,
}

fn fail(code: i32, message: impl Display) -> Failure {
    Failure {
        code,
        message: message.to_string(),
    }
}

fn input_error(e: impl Display) -> Failure {
    fail(EXIT_INPUT, e)
}

fn storage_error(e: anyhow::Error) -> Failure {
    fail(EXIT_STORAGE, format!("Storage error: {:#}", e))
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "precision_scout=debug,scout=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Everything a command needs after startup.
struct Session {
    verbose: bool,
    use_colors: bool,
    config: Config,
    thesis: FundThesis,
    companies: Vec<Company>,
    workspace: WorkspaceState,
    workspace_path: PathBuf,
}

impl Session {
    fn start(verbose: bool, config_path: Option<PathBuf>) -> Result<Self, Failure> {
        let config = config::load_config(config_path)
            .map_err(|e| fail(EXIT_CONFIG, format!("Config error: {:#}", e)))?;

        if let Err(errors) = config.validate() {
            let mut message = String::from("Config errors:");
            for error in errors {
                message.push_str(&format!("\n  - {}", error));
            }
            return Err(fail(EXIT_CONFIG, message));
        }

        let base = companies::load_universe(config.companies_file.as_deref())
            .map_err(|e| fail(EXIT_CONFIG, format!("Config error: {:#}", e)))?;

        let workspace_path = workspace::get_workspace_path().map_err(storage_error)?;
        let workspace = workspace::load_workspace(&workspace_path).map_err(storage_error)?;

        let companies = companies::merge_custom(base, &workspace.custom_companies);
        let thesis = config.effective_thesis();
        debug!(
            thesis = %thesis.id,
            companies = companies.len(),
            lists = workspace.lists.len(),
            "session ready"
        );

        Ok(Self {
            verbose,
            use_colors: output::should_use_colors(),
            config,
            thesis,
            companies,
            workspace,
            workspace_path,
        })
    }

    fn company(&self, id: &str) -> Result<&Company, Failure> {
        find_company(&self.companies, id)
            .ok_or_else(|| input_error(WorkspaceError::CompanyNotFound(id.to_string())))
    }

    fn save(&self) -> Result<(), Failure> {
        workspace::save_workspace(&self.workspace_path, &self.workspace).map_err(storage_error)
    }

    fn print_page(&self, query: &CompanyQuery) {
        let page = query.run(&self.companies, self.config.page_size);
        println!("{}", output::format_company_table(&page, self.use_colors));
        println!();
        println!("{}", output::format_page_footer(&page));
    }
}

/// Read the payload from `path`, or stdin when no path or "-" is given.
fn read_payload(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read payload from {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read payload from stdin")?;
            Ok(buf)
        }
    }
}

/// URL to record as the payload's source: `--url` if given, else the
/// website of the `--company` target.
fn source_url(url: Option<String>, company: Option<&Company>) -> Option<String> {
    url.or_else(|| company.map(precision_scout::browser::company_url))
}

fn score(
    session: &Session,
    path: Option<PathBuf>,
    company: Option<String>,
    url: Option<String>,
    json: bool,
) -> Result<(), Failure> {
    let raw = read_payload(path.as_deref()).map_err(|e| input_error(format!("{:#}", e)))?;
    let mut payload = EnrichmentPayload::from_json(&raw).map_err(|e| input_error(format!("{:#}", e)))?;

    let target = company.as_deref().map(|id| session.company(id)).transpose()?;
    match source_url(url, target) {
        Some(ref u) => payload.ensure_sources(u, Utc::now()),
        None if payload.sources.is_empty() => {
            warn!("payload lists no sources; pass --url or --company to record one")
        }
        None => {}
    }

    let report = evaluate_with_breakdown(&payload, &session.thesis);
    let result = EnrichmentResult::new(payload, report.output);

    if let Some(company) = target {
        enrichment::write_enrichment(&enrichment::get_cache_path(), &company.id, &result)
            .map_err(storage_error)?;
    }

    if json {
        let text = serde_json::to_string_pretty(&result)
            .map_err(|e| fail(EXIT_FAILURE, format!("Failed to serialize result: {}", e)))?;
        println!("{}", text);
    } else {
        let breakdown = session.verbose.then_some(&report.breakdown);
        println!(
            "{}",
            output::format_signal_report(&result, breakdown, session.use_colors)
        );
    }
    Ok(())
}

fn show(session: &Session, id: &str) -> Result<(), Failure> {
    let company = session.company(id)?;
    println!("{}", output::format_company_detail(company, session.use_colors));

    if let Some(note) = session.workspace.note(&company.id) {
        println!("  Note: {}", note);
    }

    let lists = session.workspace.lists_containing(&company.id);
    if !lists.is_empty() {
        let names = lists.iter().map(|l| l.name.as_str()).collect::<Vec<_>>();
        println!("  Lists: {}", names.join(", "));
    }

    let cached = enrichment::read_enrichment(&enrichment::get_cache_path(), &company.id);

    let items = enrichment::timeline(company, cached.as_ref(), Utc::now());
    if !items.is_empty() {
        println!();
        println!("{}", output::format_timeline(&items, session.use_colors));
    }

    println!();
    match cached {
        Some(result) => println!(
            "{}",
            output::format_signal_report(&result, None, session.use_colors)
        ),
        None => println!(
            "Not enriched yet. Score a payload with `scout score --company {}`.",
            company.id
        ),
    }
    Ok(())
}

fn lists(session: &mut Session, command: ListCommands) -> Result<(), Failure> {
    match command {
        ListCommands::Ls => {
            println!(
                "{}",
                output::format_lists(&session.workspace.lists, &session.companies, session.use_colors)
            );
        }
        ListCommands::Create { name } => {
            let list = session.workspace.create_list(&name).map_err(input_error)?;
            let message = format!("Created list \"{}\" ({})", list.name, list.id);
            session.save()?;
            println!("{}", message);
        }
        ListCommands::Rm { id } => {
            let list = session.workspace.remove_list(&id).map_err(input_error)?;
            session.save()?;
            println!("Removed list \"{}\"", list.name);
        }
        ListCommands::Toggle { list, company } => {
            let company_name = session.company(&company)?.name.clone();
            let added = session
                .workspace
                .toggle_membership(&list, &company)
                .map_err(input_error)?;
            session.save()?;
            let list_name = session
                .workspace
                .list(&list)
                .map(|l| l.name.as_str())
                .unwrap_or(list.as_str());
            if added {
                println!("Added {} to \"{}\"", company_name, list_name);
            } else {
                println!("Removed {} from \"{}\"", company_name, list_name);
            }
        }
    }
    Ok(())
}

fn searches(session: &mut Session, command: SearchCommands) -> Result<(), Failure> {
    match command {
        SearchCommands::Ls => {
            println!(
                "{}",
                output::format_saved_searches(&session.workspace.saved_searches, session.use_colors)
            );
        }
        SearchCommands::Save { name, filters } => {
            let query = filters.to_query(SortKey::default(), 1);
            let search = session
                .workspace
                .save_search(&name, &query)
                .map_err(input_error)?;
            let message = format!("Saved search \"{}\" ({})", search.name, search.id);
            session.save()?;
            println!("{}", message);
        }
        SearchCommands::Rm { id } => {
            let search = session.workspace.remove_search(&id).map_err(input_error)?;
            session.save()?;
            println!("Removed saved search \"{}\"", search.name);
        }
        SearchCommands::Run { id, page } => {
            let query = session
                .workspace
                .saved_search(&id)
                .ok_or_else(|| input_error(WorkspaceError::SearchNotFound(id.clone())))?
                .to_query(page);
            session.print_page(&query);
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), Failure> {
    let config_path = cli.config.map(PathBuf::from);

    let command = match cli.command {
        Commands::Init { defaults, force } => {
            return config::init::run_init_wizard(config_path, defaults, force)
                .map_err(|e| fail(EXIT_CONFIG, format!("Init failed: {:#}", e)));
        }
        Commands::Session(command) => command,
    };

    let mut session = Session::start(cli.verbose, config_path)?;

    match command {
        SessionCommands::Score {
            path,
            company,
            url,
            json,
        } => score(&session, path, company, url, json)?,
        SessionCommands::Companies {
            filters,
            sort,
            page,
            format,
        } => {
            let query = filters.to_query(sort, page);
            match format {
                OutputFormat::Table => session.print_page(&query),
                OutputFormat::Tsv => {
                    let page = query.run(&session.companies, session.config.page_size);
                    let tsv = output::format_company_tsv(&page.items);
                    if !tsv.is_empty() {
                        println!("{}", tsv);
                    }
                }
            }
        }
        SessionCommands::Industries => {
            for industry in industries(&session.companies) {
                println!("{}", industry);
            }
        }
        SessionCommands::Show { id } => show(&session, &id)?,
        SessionCommands::Open { id } => {
            let company = session.company(&id)?;
            let url = precision_scout::browser::open_company(company)
                .map_err(|e| fail(EXIT_FAILURE, format!("Failed to open browser: {:#}", e)))?;
            println!("Opening {} in browser: {}", company.name, url);
        }
        SessionCommands::AddCompany {
            name,
            website,
            description,
        } => {
            let company = session
                .workspace
                .add_custom_company(&name, &website, description.as_deref())
                .map_err(input_error)?;
            let message = format!("Added {} as {}", company.name, company.id);
            session.save()?;
            println!("{}", message);
        }
        SessionCommands::Note { id, text } => {
            let company_id = session.company(&id)?.id.clone();
            session.workspace.set_note(&company_id, &text);
            session.save()?;
            if text.trim().is_empty() {
                println!("Removed note for {}", company_id);
            } else {
                println!("Saved note for {}", company_id);
            }
        }
        SessionCommands::Lists { command } => lists(&mut session, command)?,
        SessionCommands::Searches { command } => searches(&mut session, command)?,
        SessionCommands::Forget { id } => {
            enrichment::remove_enrichment(&enrichment::get_cache_path(), &id)
                .map_err(storage_error)?;
            println!("Forgot cached enrichment for {}", id);
        }
        SessionCommands::Thesis => println!("{}", output::format_thesis(&session.thesis)),
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let start_time = Instant::now();

    if let Err(failure) = run(cli) {
        eprintln!("{}", failure.message);
        std::process::exit(failure.code);
    }

    debug!(elapsed = ?start_time.elapsed(), "done");
    std::process::exit(EXIT_SUCCESS);
}
