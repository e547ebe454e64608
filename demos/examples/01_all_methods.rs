use positivity_demos::common::{load_store, output_dir};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store()?;
    let result = positivity::run(&store)?;

    println!("Selected methods:");
    for (region, method) in result.provenance().iter() {
        println!("  {region:>4}  {method}");
    }
    for (region, reason) in result.selection().unselected() {
        println!("  {region:>4}  (none: {reason:?})");
    }

    let summary = result.summary();
    println!(
        "{} regions, {} candidate series, {} selected",
        summary.regions, summary.candidates, summary.selected
    );

    let path = output_dir().join("test-positivity-all-methods.csv");
    result.write(&path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
