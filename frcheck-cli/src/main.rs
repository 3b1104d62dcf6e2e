use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::Path;

// Import from frcheck-core
use frcheck_core::{DocumentChecker, GrammarMode, QaError, QaReport, ScanConfig};

// Import CLI utilities
use frcheck_cli::config_locator::{load_config, locate_config};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

impl OutputFormat {
    fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Table => "table",
        }
    }

    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Table => "txt",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GrammarModeArg {
    PerParagraph,
    WholeDocument,
}

impl From<GrammarModeArg> for GrammarMode {
    fn from(arg: GrammarModeArg) -> Self {
        match arg {
            GrammarModeArg::PerParagraph => GrammarMode::PerParagraph,
            GrammarModeArg::WholeDocument => GrammarMode::WholeDocument,
        }
    }
}

#[derive(Parser)]
#[command(name = "frcheck")]
#[command(about = "Check a translated document against French-Canadian typography conventions")]
struct Args {
    /// Document to check (.docx or .txt)
    #[arg(short, long, required_unless_present = "show_configs")]
    input: Option<String>,

    /// Page number of the first paragraph
    #[arg(short, long, default_value_t = 1)]
    page_offset: u32,

    /// Path to custom config file (YAML format)
    #[arg(short, long)]
    config: Option<String>,

    /// Output file path (if not specified, auto-generated based on input)
    #[arg(short, long)]
    output: Option<String>,

    /// Output format: json or table
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Json)]
    output_format: OutputFormat,

    /// Also send the text to the grammar service
    #[arg(long)]
    grammar: bool,

    /// Base URL of a LanguageTool-compatible grammar service
    #[arg(long)]
    grammar_url: Option<String>,

    /// Language variant sent to the grammar service (e.g. fr-CA)
    #[arg(long)]
    language: Option<String>,

    /// How text is submitted to the grammar service
    #[arg(long, value_enum)]
    grammar_mode: Option<GrammarModeArg>,

    /// Show available config options and exit
    #[arg(long)]
    show_configs: bool,

    /// Print timings for each step
    #[arg(long)]
    profile: bool,

    /// Log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    println!("🦀 frcheck - French-Canadian typography QA");

    if args.show_configs {
        show_help();
        return Ok(());
    }

    let Some(input) = args.input.as_deref() else {
        eprintln!("❌ Missing --input");
        std::process::exit(2);
    };

    if let Err(e) = run(&args, input) {
        eprintln!("❌ Processing failed: {e:#}");
        if e.downcast_ref::<QaError>().is_some_and(QaError::is_retryable) {
            eprintln!("   The grammar service may be busy; try again or run without --grammar.");
        }
        std::process::exit(1);
    }

    Ok(())
}

fn run(args: &Args, input: &str) -> Result<()> {
    let source = locate_config(args.config.as_deref());
    let mut config = load_config(&source)?;
    println!("📋 {}", source.describe());
    tracing::debug!(?source, "config resolved");

    apply_overrides(&mut config, args);

    let checker = DocumentChecker::new(config);
    match checker.grammar_mode() {
        Some(mode) => println!(
            "🔎 Grammar service: {} [{}, {:?}]",
            checker.config().grammar.endpoint,
            checker.config().grammar.language,
            mode
        ),
        None => println!("🔎 Grammar service: off"),
    }

    println!("📄 Processing: {} (starting at page {})", input, args.page_offset);
    let log = checker.check_file_with_profiling(Path::new(input), args.page_offset, args.profile)?;

    println!("✅ Scan complete");
    println!("📊 Issues found: {}", log.len());
    for (category, count) in log.counts_by_category() {
        println!("   - {category}: {count}");
    }

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(input, args.output_format));

    let report = QaReport::new(input, args.page_offset, checker.grammar_mode(), log);
    report.save_with_format(&output_path, args.output_format.as_str())?;
    println!("💾 Report saved to: {}", output_path);

    Ok(())
}

/// CLI flags win over values from the config file.
fn apply_overrides(config: &mut ScanConfig, args: &Args) {
    if args.grammar {
        config.grammar.enabled = true;
    }
    if let Some(url) = &args.grammar_url {
        config.grammar.endpoint = url.clone();
    }
    if let Some(language) = &args.language {
        config.grammar.language = language.clone();
    }
    if let Some(mode) = args.grammar_mode {
        config.grammar.mode = mode.into();
    }
}

fn default_output_path(input: &str, format: OutputFormat) -> String {
    let input_name = Path::new(input)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    format!("{input_name}_qa_report.{}", format.extension())
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn show_help() {
    println!("\n📋 Available Configuration Options:");
    println!("  --input <path>           Document to check (.docx or .txt)");
    println!("  --page-offset <n>        Page number of the first paragraph (default: 1)");
    println!("  --config <path>          Load custom config file");
    println!("  --output <path>          Output file path (auto-generated if not specified)");
    println!("  --output-format <fmt>    Output format: json or table");
    println!("  --grammar                Also check grammar with a LanguageTool server");
    println!("  --grammar-url <url>      Grammar server base URL (default: https://api.languagetool.org)");
    println!("  --language <tag>         Grammar language variant (default: fr-CA)");
    println!("  --grammar-mode <mode>    per-paragraph (default) or whole-document");
    println!("  --profile                Print step timings");

    println!("\n🔍 Checks (in report order within a line):");
    println!("  Apostrophe         - straight ' instead of curved ’");
    println!("  NonBreakingSpace   - colon without a non-breaking space before it");
    println!("  PhoneFormat        - phone numbers typed with regular hyphens or spaces");
    println!("  GrammarAgreement   - configured exact-phrase agreement rules");
    println!("  GuillemetSpacing   - « or » glued to a letter");

    println!("\n📄 Output Formats:");
    println!("  json   - Report metadata plus every issue (default)");
    println!("  table  - Page | Line | Issue Category | Note | Context");

    if let Some(path) = frcheck_cli::config_locator::user_config_path() {
        println!("\n📁 User config (used when --config is not given):");
        println!("  {}", path.display());
    }
    println!("  Example: ./configs/fr-ca-default.yaml");

    println!("\n📝 Usage Examples:");
    println!("  frcheck -i traduction.docx -p 5");
    println!("  frcheck -i traduction.docx -f table -o rapport.txt");
    println!("  frcheck -i traduction.docx --grammar --grammar-url http://localhost:8081");
}
