use std::fs;

use positivity::MultiRegionTimeseries;
use positivity_demos::common::output_dir;
use positivity_mock::fixtures;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Persist a snapshot, reload it, and merge the computed series back in
    let path = output_dir().join("positivity-input-snapshot.json");
    fs::write(&path, serde_json::to_string(&fixtures::us_states()?)?)?;
    let store: MultiRegionTimeseries = serde_json::from_str(&fs::read_to_string(&path)?)?;

    let (_, output) = positivity::run(&store)?.into_parts();
    let merged = store.join(output)?;
    println!(
        "merged store: {} regions, {} fields, {} observations",
        merged.regions().count(),
        merged.fields().len(),
        merged.observation_count()
    );
    Ok(())
}
