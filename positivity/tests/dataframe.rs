#![cfg(feature = "dataframe")]

use positivity_mock::fixtures;

#[test]
fn candidates_to_dataframe_smoke() {
    let store = fixtures::us_states().unwrap();
    let result = positivity::run(&store).unwrap();
    let df = result.candidates().to_dataframe().unwrap();
    assert_eq!(df.height(), result.candidates().len());
    assert_eq!(df.width(), 2 + fixtures::US_STATES_DAYS);
    assert!(df.column("location_id").is_ok());
    assert!(df.column("2020-03-01").is_ok());
}
