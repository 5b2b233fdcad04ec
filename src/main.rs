use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use pagekit::{FormScope, PageDocument, PageSession, RecordingHost, RenderConfig, RenderedPage};

#[derive(Parser)]
#[command(name = "pagekit", version, about = "Render data-driven landing pages")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a page document
    Render {
        document: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
        /// Preview the post-submission view
        #[arg(long)]
        thank_you: bool,
        /// Click the button of this section against a recording host and
        /// log the resulting effects (repeatable)
        #[arg(long, value_name = "SECTION_ID")]
        dispatch: Vec<String>,
    },
    /// Fill in and submit a form, then render the resulting view
    Submit {
        document: PathBuf,
        /// Field value as id=value (repeatable)
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
        /// Submit the form section with this id instead of the fallback form
        #[arg(long)]
        section: Option<String>,
        /// Simulated submission latency
        #[arg(long, default_value_t = pagekit::DEFAULT_SUBMIT_LATENCY_MS)]
        latency_ms: u64,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,
    /// Write to a file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Fallback font family
    #[arg(long)]
    font: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Standalone HTML document
    Html,
    /// JSON render tree
    Json,
}

fn parse_field(s: &str) -> std::result::Result<(String, String), String> {
    let (id, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected id=value, got '{}'", s))?;
    Ok((id.to_string(), value.to_string()))
}

fn load(path: &Path) -> Result<PageDocument> {
    PageDocument::from_path(path).with_context(|| format!("failed to load {}", path.display()))
}

fn config_for(output: &OutputArgs) -> Result<RenderConfig> {
    let mut config = RenderConfig::default();
    if let Some(font) = &output.font {
        config.default_font_family = font.clone();
    }
    config.validate()?;
    Ok(config)
}

fn emit(page: &RenderedPage, title: &str, output: &OutputArgs) -> Result<()> {
    let body = match output.format {
        Format::Html => page.to_document_html(title),
        Format::Json => serde_json::to_string_pretty(page)?,
    };
    match &output.out {
        Some(path) => {
            std::fs::write(path, body).with_context(|| format!("failed to write {}", path.display()))?;
            info!("wrote {:?} view to {} ({})", page.view, path.display(), page.fingerprint());
        }
        None => println!("{}", body),
    }
    Ok(())
}

/// Rendered sections are addressable as `#<type>`, so those are the only
/// selectors the recording host resolves.
fn dispatch_clicks(session: &PageSession, section_ids: &[String]) {
    let selectors = session
        .document()
        .sections
        .iter()
        .map(|s| format!("#{}", s.body.kind_tag()));
    let host = RecordingHost::with_elements(selectors);
    for id in section_ids {
        session.click_button(id, &host);
    }
    let effects = host.effects();
    if effects.is_empty() {
        info!("dispatch produced no effects");
    }
    for effect in effects {
        info!("dispatch: {:?}", effect);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Command::Render {
            document,
            output,
            thank_you,
            dispatch,
        } => {
            let doc = load(&document)?;
            let title = doc.headline.clone().unwrap_or_default();
            let mut session = PageSession::new(doc, config_for(&output)?);
            if !dispatch.is_empty() {
                dispatch_clicks(&session, &dispatch);
            }
            if thank_you {
                match session.form_scopes().into_iter().next() {
                    Some(scope) => {
                        session.begin_submit(&scope);
                        session.finish_submit(&scope, &Ok(()));
                    }
                    None => log::warn!("page has no form; --thank-you ignored"),
                }
            }
            emit(&session.render(), &title, &output)
        }
        Command::Submit {
            document,
            fields,
            section,
            latency_ms,
            output,
        } => {
            let doc = load(&document)?;
            let title = doc.headline.clone().unwrap_or_default();
            let mut config = config_for(&output)?;
            config.submit_latency_ms = latency_ms;

            let mut session = PageSession::new(doc, config);
            let scope = section.map(FormScope::Section).unwrap_or(FormScope::Fallback);
            if !session.renders(&scope) {
                bail!(
                    "{} does not render {:?}; form scopes on this page: {:?}",
                    document.display(),
                    scope,
                    session.form_scopes()
                );
            }
            let sink = session.config().log_sink();
            for (id, value) in fields {
                session.set_field(&scope, id, value);
            }
            if let Err(e) = session.submit(&scope, &sink).await {
                // the failure is rendered inline; still emit the page
                log::warn!("{}", e);
            }
            emit(&session.render(), &title, &output)
        }
    }
}
