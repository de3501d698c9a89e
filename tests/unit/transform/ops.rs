use super::*;
use crate::foundation::core::Point;

fn bbox() -> BBox {
    BBox::new(10.0, 20.0, 100.0, 50.0)
}

#[test]
fn rotation_defaults_to_bbox_center() {
    let m = TransformOp::rotate(180.0).apply(&AffineTransform::IDENTITY, bbox);
    let c = m.apply(Point::new(60.0, 45.0));
    assert!((c.x - 60.0).abs() < 1e-9 && (c.y - 45.0).abs() < 1e-9);
}

#[test]
fn scale_defaults_to_bbox_origin() {
    let m = TransformOp::uniform_scale(2.0).apply(&AffineTransform::IDENTITY, bbox);
    assert_eq!(m.apply(Point::new(10.0, 20.0)), Point::new(10.0, 20.0));
    assert_eq!(m.apply(Point::new(20.0, 30.0)), Point::new(30.0, 40.0));
}

#[test]
fn explicit_pivot_skips_measurement() {
    let op = TransformOp::Rotate {
        degrees: 90.0,
        cx: Some(0.0),
        cy: Some(0.0),
    };
    let m = op.apply(&AffineTransform::IDENTITY, || panic!("bbox not needed"));
    assert!((m.b - 1.0).abs() < 1e-12);
}

#[test]
fn ops_compose_on_the_base() {
    let base = AffineTransform::IDENTITY.translate(5.0, 5.0);
    let m = TransformOp::Translate { x: 1.0, y: 2.0 }.apply(&base, bbox);
    assert_eq!(m.apply(Point::ORIGIN), Point::new(6.0, 7.0));
    let flipped = TransformOp::Flip { axis: Axis::X }.apply(&AffineTransform::IDENTITY, bbox);
    assert_eq!(flipped.a, -1.0);
}

#[test]
fn deserializes_tagged_ops() {
    let op: TransformOp =
        serde_json::from_str(r#"{"op":"rotate","degrees":45}"#).unwrap();
    assert_eq!(op, TransformOp::rotate(45.0));
    let op: TransformOp =
        serde_json::from_str(r#"{"op":"matrix","matrix":"1,0,0,1,3,4"}"#).unwrap();
    assert_eq!(op, TransformOp::from(AffineTransform::IDENTITY.translate(3.0, 4.0)));
}
