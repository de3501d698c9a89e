use super::*;

#[test]
fn default_measure_bounds_points() {
    let b = KurboBounds.points_bbox(&[Point::new(5.0, -1.0), Point::new(-3.0, 4.0)]);
    assert_eq!(b, BBox::new(-3.0, -1.0, 8.0, 5.0));
    assert_eq!(KurboBounds.points_bbox(&[]), BBox::default());
}

#[test]
fn morph_coerces_path_destination_to_points() {
    let src = Geometry::Points(PointArray::parse("0,0 10,0"));
    let dst = Geometry::Path(PathArray::parse("M0 10 L10 10"));
    let m = src.morph(dst);
    assert!(matches!(m, Geometry::Points(_)));
    assert_eq!(m.at(0.5).to_string(), "0,5 10,5");
}

#[test]
fn morph_coerces_points_destination_to_path() {
    let src = Geometry::Path(PathArray::parse("M0 0 L10 0"));
    let m = src.morph(Geometry::Points(PointArray::parse("0,20 20,20")));
    assert_eq!(m.at(1.0).to_string(), "M0 20 L20 20 ");
}

#[test]
fn settled_destination_removes_padding() {
    let src = Geometry::Points(PointArray::parse("0,0 1,1 2,2 3,3"));
    let m = src.morph(Geometry::Points(PointArray::parse("5,5 6,6")));
    let settled = m.settled_destination().unwrap();
    assert_eq!(settled.to_string(), "5,5 6,6");
    assert!(Geometry::Points(PointArray::default())
        .settled_destination()
        .is_none());
}

#[test]
fn settled_destination_keeps_requested_repeats() {
    let closed = Geometry::Points(PointArray::parse("0,0 10,0 10,10 0,0"))
        .morph(Geometry::Points(PointArray::parse("0,0 20,0 20,20 0,0")));
    assert_eq!(
        closed.settled_destination().unwrap().to_string(),
        "0,0 20,0 20,20 0,0"
    );

    let path = Geometry::Path(PathArray::parse("M0 0 L10 0 L10 0 L5 5"))
        .morph(Geometry::Path(PathArray::parse("M0 0 L20 0 L20 0")));
    assert_eq!(
        path.settled_destination().unwrap().to_string(),
        "M0 0 L20 0 L20 0 "
    );
}

#[test]
fn move_and_size_dispatch_to_the_variant() {
    let mut g = Geometry::Path(PathArray::parse("M10 10 L20 20"));
    g.move_to(0.0, 0.0, &KurboBounds);
    g.size(5.0, 5.0, &KurboBounds);
    assert_eq!(g.to_string(), "M0 0 L5 5 ");
    assert_eq!(g.bbox(&KurboBounds), BBox::new(0.0, 0.0, 5.0, 5.0));
}
