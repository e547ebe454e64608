use positivity::{FieldId, Method, MethodRegistry, Positivity, RegionId};
use positivity_mock::fixtures;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (store, _) = fixtures::two_method_scenario()?;

    // Prefer positive tests over confirmed cases, the reverse of the fixture order
    let methods = MethodRegistry::new(vec![
        Method::new("pos_over_tests", FieldId::new("pos_cum"), FieldId::new("tests_cum")),
        Method::new("cases_over_tests", FieldId::new("cases_cum"), FieldId::new("tests_cum")),
    ])?;
    let engine = Positivity::builder()
        .methods(methods)
        .diff_days(7)
        .recent_days(14)
        .build()?;
    let result = engine.run(&store)?;

    for region in ["A", "B"] {
        let id = RegionId::new(region);
        let method = result.provenance().get(&id).unwrap_or("-");
        let latest = result
            .selection()
            .get(&id)
            .and_then(|s| s.series().iter().rev().find_map(|v| *v));
        println!("{region}: {method} latest={latest:?}");
    }
    Ok(())
}
