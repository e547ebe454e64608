use positivity::Positivity;
use positivity_demos::common::load_store;
use tracing_subscriber::fmt::format::FmtSpan;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,positivity=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .try_init();

    let store = load_store()?;
    let result = Positivity::default().run(&store)?;
    tracing::info!(selected = result.provenance().len(), "done");
    Ok(())
}
