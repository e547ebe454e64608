use chrono::NaiveDate;
use positivity_core::{DateAxis, last_present, window_slice};

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 7, day).unwrap()
}

#[test]
fn trailing_window_ends_at_axis_end() {
    let axis = DateAxis::new(d(1), d(20)).unwrap();
    let w = axis.trailing(14).unwrap();
    assert_eq!((w.start(), w.end(), w.len()), (d(7), d(20), 14));
}

#[test]
fn trailing_window_is_clipped_to_axis_start() {
    let axis = DateAxis::new(d(1), d(5)).unwrap();
    let w = axis.trailing(14).unwrap();
    assert_eq!(w, axis);
    assert!(axis.trailing(0).is_none());
}

#[test]
fn index_and_date_are_inverse() {
    let axis = DateAxis::new(d(3), d(12)).unwrap();
    for (i, date) in axis.dates().enumerate() {
        assert_eq!(axis.index_of(date), Some(i));
        assert_eq!(axis.date_at(i), Some(date));
    }
    assert_eq!(axis.index_of(d(2)), None);
    assert_eq!(axis.date_at(10), None);
}

#[test]
fn window_slice_selects_overlap() {
    let axis = DateAxis::new(d(1), d(6)).unwrap();
    let row = [Some(1.0), None, Some(3.0), None, Some(5.0), None];
    let window = DateAxis::new(d(4), d(30)).unwrap();
    let cells = window_slice(&row, &axis, &window).unwrap();
    assert_eq!(cells, &[None, Some(5.0), None]);
    assert_eq!(last_present(cells), Some(1));

    let disjoint = DateAxis::new(d(10), d(11)).unwrap();
    assert!(window_slice(&row, &axis, &disjoint).is_none());
}

#[test]
fn deserialized_axis_rejects_reversed_bounds() {
    let ok: DateAxis = serde_json::from_str(r#"{"start":"2020-07-03","end":"2020-07-12"}"#).unwrap();
    assert_eq!(ok, DateAxis::new(d(3), d(12)).unwrap());
    assert_eq!(serde_json::to_string(&ok).unwrap(), r#"{"start":"2020-07-03","end":"2020-07-12"}"#);

    let err = serde_json::from_str::<DateAxis>(r#"{"start":"2020-07-12","end":"2020-07-03"}"#)
        .unwrap_err();
    assert!(err.to_string().contains("after end"), "{err}");
}
