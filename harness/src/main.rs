use regrush_harness::config::Config;
use regrush_harness::fixtures::load_fixtures;
use regrush_harness::runner::{Runner, SpikeScenario};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "regrush=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = Config::from_env();
    info!(
        "Loaded configuration: target={}, users={}",
        config.target_url, config.users
    );

    // Load fixtures produced by the offline generator
    let fixtures = Arc::new(load_fixtures(
        &config.fixtures.students_path,
        &config.fixtures.courses_path,
    )?);
    if fixtures.remaining_students() < config.users {
        info!(
            students = fixtures.remaining_students(),
            users = config.users,
            "fewer students than virtual users; late sessions will end at claim time"
        );
    }

    // Drive the spike scenario
    let runner = Runner::new(config.users, config.ramp_delay);
    let scenario = SpikeScenario::new(config, fixtures);
    let summary = runner.execute(scenario).await?;

    println!("{}", summary.report());

    if summary.completed == 0 {
        anyhow::bail!("no virtual user completed its enrollment plan");
    }
    Ok(())
}
