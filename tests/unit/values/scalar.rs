use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn raw_numbers_are_sanitized() {
    assert_eq!(Scalar::new(f64::NAN).value, 0.0);
    assert_eq!(Scalar::new(f64::INFINITY).value, SCALAR_LIMIT);
    assert_eq!(Scalar::new(f64::NEG_INFINITY).value, -SCALAR_LIMIT);
    assert_eq!(Scalar::new(12.5).unit, Unit::None);
}

#[test]
fn parses_units_and_normalizes_storage() {
    let p = Scalar::parse("50%");
    assert!(close(p.value, 0.5));
    assert_eq!(p.unit, Unit::Percent);

    let s = Scalar::parse("2s");
    assert!(close(s.value, 2000.0));
    assert_eq!(s.unit, Unit::Seconds);

    let px = Scalar::parse("-12.5px");
    assert!(close(px.value, -12.5));
    assert_eq!(px.unit, Unit::Other("px".to_owned()));

    let bare = Scalar::parse("42");
    assert_eq!(bare.unit, Unit::None);
    assert!(close(bare.value, 42.0));
}

#[test]
fn unparseable_input_falls_back_to_zero() {
    for input in ["", "abc", "12pxx", "1e3", "-"] {
        let s = Scalar::parse(input);
        assert_eq!(s.value, 0.0, "{input}");
        assert_eq!(s.unit, Unit::None, "{input}");
    }
    assert!("abc".parse::<Scalar>().is_err());
}

#[test]
fn display_restores_wire_format() {
    assert_eq!(Scalar::parse("50%").to_string(), "50%");
    assert_eq!(Scalar::parse("1.5s").to_string(), "1.5s");
    assert_eq!(Scalar::parse("10px").to_string(), "10px");
    assert_eq!(Scalar::new(3.0).to_string(), "3");
    assert_eq!(Scalar::parse("33.3333333333%").to_string(), "33.333333%");
}

#[test]
fn arithmetic_keeps_left_unit() {
    let s = Scalar::parse("10px").plus("5%").times(2.0);
    assert_eq!(s.unit, Unit::Other("px".to_owned()));
    assert!(close(s.value, 20.1));

    let d = Scalar::new(9.0).minus(3.0).divide(2.0);
    assert!(close(d.value, 3.0));
}

#[test]
fn to_relabels_without_conversion() {
    let s = Scalar::new(0.5).to(Unit::Percent);
    assert_eq!(s.to_string(), "50%");
}

#[test]
fn morph_endpoints_and_midpoint() {
    let m = Scalar::parse("10px").morph("30px");
    assert!(m.has_destination());
    assert_eq!(m.at(0.0).value, 10.0);
    assert_eq!(m.at(1.0).value, 30.0);
    let mid = m.at(0.5);
    assert!(close(mid.value, 20.0));
    assert_eq!(mid.unit, Unit::Other("px".to_owned()));
    assert!(!mid.has_destination());
}

#[test]
fn morph_result_takes_destination_unit() {
    let m = Scalar::new(0.0).morph("1s");
    let at = m.at(0.25);
    assert_eq!(at.unit, Unit::Seconds);
    assert!(close(at.value, 250.0));
}

#[test]
fn at_without_destination_is_identity() {
    let s = Scalar::parse("7em");
    assert_eq!(s.at(0.3), s);
}

#[test]
fn serde_accepts_numbers_and_strings() {
    let a: Scalar = serde_json::from_str("250").unwrap();
    assert_eq!(a.value, 250.0);
    let b: Scalar = serde_json::from_str("\"0.5s\"").unwrap();
    assert_eq!(b.value, 500.0);
    assert_eq!(serde_json::to_string(&b).unwrap(), "\"0.5s\"");
}
