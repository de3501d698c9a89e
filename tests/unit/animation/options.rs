use super::*;
use crate::animation::ease::Ease;

#[test]
fn defaults() {
    let o = AnimOptions::default();
    assert_eq!(o.duration, Timing::Millis(1000.0));
    assert_eq!(o.delay, 0.0);
    assert!((o.ease.apply(0.5) - Ease::InOut.apply(0.5)).abs() < 1e-12);
}

#[test]
fn json_accepts_unit_strings_and_short_codes() {
    let o = AnimOptions::from_json(r#"{"duration":"2s","ease":">","delay":"0.5s"}"#).unwrap();
    assert_eq!(o.duration, Timing::Millis(2000.0));
    assert_eq!(o.delay, 500.0);
    assert!((o.ease.apply(1.0) - 1.0).abs() < 1e-12);

    let o = AnimOptions::from_json(r#"{"duration":"="}"#).unwrap();
    assert_eq!(o.duration, Timing::Untimed);
    assert_eq!(AnimOptions::from_json("{}").unwrap().duration, Timing::default());
}

#[test]
fn json_errors_are_reported() {
    let err = AnimOptions::from_json(r#"{"duration":-5}"#).unwrap_err();
    assert!(matches!(err, MorphError::Validation(_)));
    let err = AnimOptions::from_json(r#"{"speed":1}"#).unwrap_err();
    assert!(matches!(err, MorphError::Serde(_)));
    assert!(AnimOptions::from_json(r#"{"duration":"fast"}"#).is_err());
}

#[test]
fn loop_from_json() {
    assert_eq!(serde_json::from_str::<Loop>("true").unwrap(), Loop::Forever);
    assert_eq!(serde_json::from_str::<Loop>("3").unwrap(), Loop::Times(3));
    assert_eq!(Loop::from(0), Loop::Forever);
}

#[test]
fn builder_style() {
    let o = AnimOptions::new(250.0).ease(Ease::Linear).delay(100.0);
    assert_eq!(o.duration, Timing::Millis(250.0));
    assert_eq!(o.delay, 100.0);
    assert!(o.validate().is_ok());
    assert!(AnimOptions::new(f64::NAN).validate().is_err());
}
