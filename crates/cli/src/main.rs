use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use callsight_core::client::{self, HttpReportClient};
use callsight_core::domain::report::{GenerationRequest, SectionId};
use callsight_core::render::render_report;
use callsight_core::session::{LifecycleState, ReportSession};

#[derive(Debug, Parser)]
#[command(name = "callsight")]
struct Args {
    /// Ticker symbol, e.g. GOOG.
    ticker: String,

    /// Fiscal quarter identifier (YYYY_Qn), e.g. 2025_Q3.
    #[arg(long)]
    quarter: String,

    /// Previous quarter to compare against (optional).
    #[arg(long)]
    prev_quarter: Option<String>,

    /// Section to render expanded, beyond the default summary. Repeatable;
    /// "all" expands everything.
    #[arg(long)]
    expand: Vec<String>,

    /// Print the raw report payload as JSON instead of the rendered view.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = callsight_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    let request = GenerationRequest::new(&args.ticker, &args.quarter, args.prev_quarter.as_deref());
    if request.compares_same_quarter() {
        tracing::warn!(
            quarter = %request.quarter,
            "previous quarter equals the current quarter; comparison will be trivial"
        );
    }

    let client = HttpReportClient::from_settings(&settings)?;
    let mut session = ReportSession::new();

    // The catalog fetch and the report submission are independent calls;
    // neither blocks the other, and a dead catalog endpoint only costs the
    // quarter sanity check below.
    let (catalog, _) = tokio::join!(
        client::load_quarter_catalog(&client),
        session.submit(&client, &request),
    );

    if !catalog.is_empty() && !catalog.contains(&request.quarter) {
        tracing::warn!(
            quarter = %request.quarter,
            known_quarters = catalog.len(),
            "requested quarter is not in the document catalog"
        );
    }

    match session.state() {
        LifecycleState::Success(_) => {}
        LifecycleState::Failure(message) => {
            let err = anyhow::anyhow!("{message}");
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %err, "report generation failed");
            return Err(err);
        }
        LifecycleState::Idle | LifecycleState::Loading => {
            anyhow::bail!("report submission did not complete");
        }
    }

    apply_expansions(&mut session, &args.expand)?;

    // Borrow the report only after the mutable session calls above.
    let report = session
        .report()
        .context("session in success state without a report")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", render_report(report, session.disclosure()));
    }

    Ok(())
}

fn apply_expansions(session: &mut ReportSession, flags: &[String]) -> anyhow::Result<()> {
    for flag in flags {
        if flag.eq_ignore_ascii_case("all") {
            session.expand_all_sections();
            continue;
        }
        let section = SectionId::parse(flag).with_context(|| {
            let known: Vec<&str> = SectionId::ALL.iter().map(|s| s.key()).collect();
            format!(
                "unknown section {flag:?}; expected \"all\" or one of: {}",
                known.join(", ")
            )
        })?;
        session.expand_section(section);
    }
    Ok(())
}

fn init_sentry(settings: &callsight_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
