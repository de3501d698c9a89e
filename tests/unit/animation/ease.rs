use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-12
}

#[test]
fn presets_hit_both_ends() {
    for e in [Ease::InOut, Ease::Out, Ease::In, Ease::Linear] {
        assert!(approx(e.apply(0.0), 0.0), "{e:?}");
        assert!(approx(e.apply(1.0), 1.0), "{e:?}");
    }
}

#[test]
fn preset_shapes() {
    assert!(approx(Ease::InOut.apply(0.5), 0.5));
    assert!(Ease::Out.apply(0.25) > 0.25);
    assert!(Ease::In.apply(0.25) < 0.25);
    assert!(approx(Ease::Linear.apply(0.3), 0.3));
}

#[test]
fn short_codes_deserialize() {
    let e: Ease = serde_json::from_str("\"<>\"").unwrap();
    assert_eq!(e, Ease::InOut);
    let e: Easing = serde_json::from_str("\"-\"").unwrap();
    assert!(approx(e.apply(0.7), 0.7));
    assert!(serde_json::from_str::<Ease>("\"bounce\"").is_err());
}

#[test]
fn custom_curve_is_called() {
    let e = Easing::custom(|t| t * t);
    assert!(approx(e.apply(0.5), 0.25));
    assert_eq!(format!("{e:?}"), "Custom(..)");
}
