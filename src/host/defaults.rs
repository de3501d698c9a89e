use crate::host::value::PropValue;
use crate::values::color::Color;

/// Value an attribute has when it was never set.
pub fn attr_default(name: &str) -> Option<PropValue> {
    let v = match name {
        "fill-opacity" | "stroke-opacity" | "opacity" | "stop-opacity" => PropValue::Number(1.0),
        "stroke-width" | "x" | "y" | "cx" | "cy" | "width" | "height" | "r" | "rx" | "ry"
        | "offset" => PropValue::Number(0.0),
        "stroke-linejoin" => PropValue::from("miter"),
        "stroke-linecap" => PropValue::from("butt"),
        "fill" | "stroke" | "stop-color" => PropValue::Color(Color::BLACK),
        "font-size" => PropValue::Number(16.0),
        "font-family" => PropValue::from("Helvetica, Arial, sans-serif"),
        "text-anchor" => PropValue::from("start"),
        _ => return None,
    };
    Some(v)
}
