use super::*;

#[test]
fn ids_are_unique_per_registry() {
    let mut reg = Registry::new();
    let a = reg.rect(10.0, 10.0);
    let b = reg.circle(4.0);
    assert_ne!(a, b);
    assert_eq!(reg.len(), 2);
    assert!(reg.remove(a));
    assert!(!reg.contains(a));
    assert_eq!(reg.kind(b), Some(NodeKind::Circle));
}

#[test]
fn rect_position_and_size() {
    let mut reg = Registry::new();
    let id = reg.rect(100.0, 50.0);
    reg.set(id, &Property::X, 10.0.into());
    reg.set(id, &Property::Cy, 100.0.into());
    assert_eq!(reg.bbox(id), BBox::new(10.0, 75.0, 100.0, 50.0));
    reg.set(id, &Property::Width, 20.0.into());
    assert_eq!(reg.get(id, &Property::Cx), Some(PropValue::Number(20.0)));
}

#[test]
fn circle_moves_through_its_center() {
    let mut reg = Registry::new();
    let id = reg.circle(20.0);
    reg.set(id, &Property::X, 5.0.into());
    assert_eq!(reg.get(id, &Property::attr("cx")), Some(PropValue::Number(15.0)));
    reg.set(id, &Property::Width, 40.0.into());
    assert_eq!(reg.bbox(id).width, 40.0);
}

#[test]
fn polyline_moves_and_sizes_its_points() {
    let mut reg = Registry::new();
    let id = reg.polyline("10,10 20,30");
    reg.set(id, &Property::X, 0.0.into());
    reg.set(id, &Property::Y, 0.0.into());
    assert_eq!(
        reg.get(id, &Property::Plot).map(|v| v.to_string()),
        Some("0,0 10,20".to_owned())
    );
    reg.set(id, &Property::Width, 20.0.into());
    assert_eq!(reg.bbox(id), BBox::new(0.0, 0.0, 20.0, 20.0));
}

#[test]
fn geometry_attributes_route_to_plot() {
    let mut reg = Registry::new();
    let path = reg.path("M0 0 L10 10");
    reg.set(path, &Property::attr("d"), "m5 5 l1 1".into());
    assert_eq!(
        reg.get(path, &Property::attr("d")).map(|v| v.to_string()),
        Some("M5 5 L6 6 ".to_owned())
    );

    let poly = reg.polygon("0,0 1,1");
    reg.set(poly, &Property::Plot, PathArray::parse("M3 3 L4 4").into());
    assert_eq!(
        reg.get(poly, &Property::attr("points")).map(|v| v.to_string()),
        Some("3,3 4,4".to_owned())
    );
}

#[test]
fn unset_attributes_fall_back_to_defaults() {
    let mut reg = Registry::new();
    let id = reg.rect(1.0, 1.0);
    assert_eq!(reg.get(id, &Property::attr("stroke-linecap")), Some("butt".into()));
    assert_eq!(reg.get(id, &Property::attr("data-x")), None);
    assert_eq!(reg.get(id, &Property::style("fill")), None);
}

#[test]
fn transform_and_viewbox_accessors() {
    let mut reg = Registry::new();
    let id = reg.svg(100.0, 100.0);
    reg.set(id, &Property::attr("transform"), "1,0,0,1,5,5".into());
    assert_eq!(
        reg.get(id, &Property::Transform),
        Some(PropValue::Transform(AffineTransform::IDENTITY.translate(5.0, 5.0)))
    );
    assert_eq!(reg.get(id, &Property::ViewBox), None);
    reg.set(id, &Property::ViewBox, ViewBox::new(0.0, 0.0, 50.0, 50.0).into());
    assert_eq!(
        reg.get(id, &Property::attr("viewBox")).map(|v| v.to_string()),
        Some("0 0 50 50".to_owned())
    );
}

#[test]
fn unknown_targets_are_ignored() {
    let mut reg = Registry::new();
    reg.set(TargetId(99), &Property::X, 1.0.into());
    assert_eq!(reg.get(TargetId(99), &Property::X), None);
    assert_eq!(reg.bbox(TargetId(99)), BBox::default());
}
