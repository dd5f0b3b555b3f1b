use anyhow::{Context, Result};
use healthexport::{config::Config, hours_to_string, HealthExport, Lookup};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    // ─── 2) configure ────────────────────────────────────────────────
    let cfg = Config::from_args_or_env()?;
    info!(path = %cfg.export_path.display(), "startup");

    // ─── 3) load the export ──────────────────────────────────────────
    let export = HealthExport::load(&cfg.export_path)
        .with_context(|| format!("loading {}", cfg.export_path.display()))?;

    // ─── 4) derived views ────────────────────────────────────────────
    match export.age() {
        Lookup::Found(age) => info!(years = age.years, birthday = age.is_birthday, "age"),
        Lookup::Missing(reason) => warn!(%reason, "age unavailable"),
    }

    let workouts = export.workouts().context("building workout view")?;
    let activity = export.activity().context("building activity view")?;
    info!(
        workouts = workouts.num_rows(),
        activity_days = activity.num_rows(),
        "views built"
    );

    let usage = export.usage().context("computing usage")?;
    info!(
        first_use = %usage.first_use,
        exercise = %hours_to_string(usage.total_hours),
        "usage"
    );
    println!("{}", serde_json::to_string_pretty(&usage)?);

    info!("all done");
    Ok(())
}
