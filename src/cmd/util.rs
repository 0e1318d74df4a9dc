use serde::Serialize;
use xtoken::token::TokenValue;

/// Print `value` as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize>(value: &T) {
	match serde_json::to_string_pretty(value) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: failed to encode json: {err}"),
	}
}

/// Render a schema hash the way it is usually written.
pub(crate) fn hash_hex(hash: u16) -> String {
	format!("0x{hash:04X}")
}

/// JSON shape of one decoded payload.
pub(crate) fn value_json(value: &TokenValue) -> serde_json::Value {
	use serde_json::json;

	match value {
		TokenValue::Comment(text) => json!(text),
		TokenValue::Section => serde_json::Value::Null,
		TokenValue::Short(value) => json!(value),
		TokenValue::UShort(value) => json!(value),
		TokenValue::UInt(value) => json!(value),
		TokenValue::Int(value) => json!(value),
		TokenValue::Float(value) => json!(value),
		TokenValue::Vector2(value) => json!(value),
		TokenValue::Vector3(value) | TokenValue::Vector316Bit(value) => json!(value),
		TokenValue::Vector4(value) | TokenValue::Vector48Bit(value) => json!(value),
		TokenValue::BoneWeight(weight) => json!({ "bone": weight.bone, "weight": weight.weight }),
		TokenValue::UvSet(uvs) => json!(uvs),
		TokenValue::UShortString(item) => json!({ "value": item.value, "text": item.text }),
		TokenValue::UShortStringX3(item) => json!({ "value": item.value, "texts": item.texts }),
		TokenValue::BoneInfo(info) => json!({ "index": info.index, "parent": info.parent, "name": info.name }),
		TokenValue::Tri(tri) | TokenValue::Tri16(tri) => json!({ "object": tri.object, "material": tri.material }),
	}
}
