use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use transfill::{
    OpenAiTranslator, RunConfig, TaskStatus,
    translate::{DEFAULT_ENDPOINT, DEFAULT_MODEL},
};

/// Translates missing Android string resources for every configured locale.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Project root containing the app/ module
    #[arg(default_value = ".")]
    project_dir: PathBuf,

    /// Bearer credential for the chat-completion endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Model identifier sent with every request
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Chat-completion endpoint URL
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// The source-of-truth locale
    #[arg(long, default_value = "en")]
    base_locale: String,

    /// Resource directory, when it is not app/src/main/res
    #[arg(long)]
    res_dir: Option<PathBuf>,

    /// Build-configuration file, when it is not app/build.gradle.kts
    #[arg(long)]
    build_config: Option<PathBuf>,

    /// Log task-level progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match execute(args).await {
        Ok(clean) => {
            if clean {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "transfill=debug" } else { "transfill=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Returns `Ok(true)` when every task succeeded, `Ok(false)` when some
/// (file, locale) pairs failed and a retry makes sense.
async fn execute(args: Args) -> anyhow::Result<bool> {
    let mut config = RunConfig::new(&args.project_dir).with_base_locale(&args.base_locale);
    if let Some(res_dir) = &args.res_dir {
        config = config.with_res_dir(res_dir);
    }
    if let Some(build_config) = &args.build_config {
        config = config.with_build_config(build_config);
    }

    let translator = OpenAiTranslator::new(&args.api_key, &args.model, &args.endpoint)
        .context("failed to build translation client")?;

    let report = transfill::run(&config, Arc::new(translator))
        .await
        .context("translation run failed")?;

    if report.outcomes.is_empty() {
        println!("Nothing to do: no target locales or resource files discovered");
        return Ok(true);
    }

    for outcome in &report.outcomes {
        match &outcome.status {
            TaskStatus::Translated { units } => {
                println!("{} [{}]: translated {} entries", outcome.file, outcome.locale, units);
            }
            TaskStatus::UpToDate => {
                println!("{} [{}]: up to date", outcome.file, outcome.locale);
            }
            TaskStatus::Failed { error } => {
                println!("{} [{}]: FAILED: {}", outcome.file, outcome.locale, error);
            }
        }
    }

    if report.has_failures() {
        let failed = report.failures().count();
        println!("{} of {} tasks failed; re-run to retry them", failed, report.outcomes.len());
        Ok(false)
    } else {
        println!("✅ Translation run complete");
        Ok(true)
    }
}
