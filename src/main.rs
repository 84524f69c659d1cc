use std::process::ExitCode;
use std::sync::Arc;

use abstract_keywords::cli::{Cli, Commands, CrawlArgs, ExplainArgs, ExtractArgs};
use abstract_keywords::config::{self, AppConfig};
use abstract_keywords::pipeline::{TokenVerdict, VerdictRecorder};
use abstract_keywords::policy::ValidationEngine;
use abstract_keywords::{
    crawl, io, BatchRunner, Document, KeywordError, KeywordPipeline, LexiconService, TokenFilter,
};
use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, fmt};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(determine_log_level(cli.verbose));

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn determine_log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

fn init_tracing(level: LevelFilter) {
    let subscriber = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("Tracing subscriber already set; skipping re-initialization.");
    }
}

fn run(cli: Cli) -> Result<ExitCode, KeywordError> {
    let cfg = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Crawl(args) => run_crawl(args),
        Commands::Extract(args) => run_extract(&cfg, args),
        Commands::Explain(args) => run_explain(&cfg, args),
        Commands::CheckPolicy => run_check_policy(&cfg),
    }
}

fn build_pipeline(cfg: &AppConfig) -> Result<KeywordPipeline<LexiconService>, KeywordError> {
    let policy = cfg.policy.compile()?;
    tracing::debug!(
        alphabet = policy.alphabet_len(),
        forbidden = ?policy.forbidden_categories(),
        stoplist = ?policy.stopwords().sorted(),
        "compiled filter policy"
    );
    let service = LexiconService::load(&cfg.model.path, cfg.model.max_tokens)?;
    Ok(KeywordPipeline::new(
        Arc::new(service),
        TokenFilter::new(policy),
    ))
}

fn run_crawl(args: CrawlArgs) -> Result<ExitCode, KeywordError> {
    let report = crawl::crawl_directory(&args.articles_dir, args.limit)?;
    io::write_articles(&args.output, &report.articles)?;
    println!(
        "collected {} articles into {} (scanned {}, skipped {})",
        report.articles.len(),
        args.output.display(),
        report.scanned,
        report.skipped
    );
    Ok(ExitCode::SUCCESS)
}

fn run_extract(cfg: &AppConfig, args: ExtractArgs) -> Result<ExitCode, KeywordError> {
    let pipeline = build_pipeline(cfg)?;
    let documents = io::read_articles(&args.input)?;

    let runner = BatchRunner::new(pipeline).with_parallel(cfg.batch.parallel && !args.sequential);
    let outcome = runner.run(&documents);
    io::write_keywords(&args.output, &outcome.results)?;

    let summary = &outcome.summary;
    println!(
        "wrote {} rows to {} (processed {}, skipped {}, empty {})",
        outcome.results.len(),
        args.output.display(),
        summary.processed,
        summary.skipped,
        summary.empty
    );
    for id in &summary.skipped_ids {
        println!("  skipped: {id}");
    }
    Ok(ExitCode::SUCCESS)
}

fn run_explain(cfg: &AppConfig, args: ExplainArgs) -> Result<ExitCode, KeywordError> {
    let pipeline = build_pipeline(cfg)?;
    let mut recorder = VerdictRecorder::new();
    let result = pipeline.extract_observed(&Document::new("input", args.text), &mut recorder)?;

    for (token, verdict) in recorder.entries() {
        let verdict = match verdict {
            TokenVerdict::Kept { lemma } => format!("kept -> {lemma}"),
            TokenVerdict::Rejected { rule } => format!("rejected by {rule}"),
        };
        println!("{}\t{}\t{}", token.surface, token.category_label(), verdict);
    }
    println!("lemmas: {}", result.lemmas.join(","));
    Ok(ExitCode::SUCCESS)
}

fn run_check_policy(cfg: &AppConfig) -> Result<ExitCode, KeywordError> {
    let report = ValidationEngine::with_defaults().validate(&cfg.policy);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(if report.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
