//! 宽松文档归一化
//!
//! 旧系统的文档没有固定 schema，同一字段存在多种历史命名
//! （snake_case、缩写、别名）。持久层本身是强类型的；本模块只在
//! 输入边界使用 — 导入旧数据或接收宽松的客户端载荷时，先把
//! 文档归一成 canonical camelCase 形态，再反序列化为固定结构。
//!
//! 规则（按序应用）：
//! 1. 固定别名表：canonical 字段缺失时，取第一个存在的别名填充
//! 2. 其余 snake_case 键：camelCase 键缺失时合成一份
//! 3. 身份字段统一为字符串 `id`；剥离内部簿记字段（`_id`、`__v`、`_rev`）
//!
//! 归一化是幂等的，并且从不覆盖已存在的 canonical 字段。

use serde_json::Value;

/// canonical 字段 → 按优先级排列的历史别名
const FIELD_ALIASES: &[(&str, &[&str])] = &[
    ("clientName", &["client_name", "client", "name"]),
    ("eventDate", &["event_date", "date"]),
    ("eventType", &["event_type", "function_type"]),
    ("guestCount", &["guest_count", "guests", "no_of_guests"]),
    ("pricePerPlate", &["price_per_plate", "plate_price", "price"]),
    ("specialRequests", &["special_requests", "requests", "notes"]),
    ("contactEmail", &["contact_email", "email"]),
    ("contactPhone", &["contact_phone", "phone", "mobile"]),
    ("totalAmount", &["total_amount", "total"]),
    ("advanceAmount", &["advance_amount", "advance"]),
    ("imageUrl", &["image_url", "img", "image"]),
    ("dietType", &["diet_type", "food_type"]),
    ("dietaryTags", &["dietary_tags", "tags"]),
];

/// 内部簿记字段，永不进入 canonical 形态
const INTERNAL_FIELDS: &[&str] = &["_id", "__v", "_rev"];

/// Normalize a loosely-typed document into its canonical camelCase shape.
///
/// `Value::Null` passes through unchanged (propagates "not found" cleanly);
/// non-object values pass through untouched.
pub fn normalize(raw: Value) -> Value {
    let Value::Object(mut doc) = raw else {
        return raw;
    };

    // 1. Identity: prefer an existing string `id`; otherwise derive one
    //    from the legacy `_id` before it is stripped.
    if !matches!(doc.get("id"), Some(Value::String(_))) {
        if let Some(id) = doc.get("id").and_then(identity_string) {
            doc.insert("id".into(), Value::String(id));
        } else if let Some(id) = doc.get("_id").and_then(identity_string) {
            doc.insert("id".into(), Value::String(id));
        }
    }
    for field in INTERNAL_FIELDS {
        doc.remove(*field);
    }

    // 2. Fixed alias table — fill canonical from the first alias present,
    //    only when the canonical key itself is absent.
    for (canonical, aliases) in FIELD_ALIASES {
        if doc.contains_key(*canonical) {
            continue;
        }
        if let Some(alias) = aliases.iter().find(|a| doc.contains_key(**a)) {
            let value = doc.get(*alias).cloned().unwrap_or(Value::Null);
            doc.insert((*canonical).into(), value);
        }
    }

    // 3. Remaining snake_case keys — synthesize the camelCase key if unset.
    let snake_keys: Vec<String> = doc
        .keys()
        .filter(|k| k.contains('_') && !k.starts_with('_'))
        .cloned()
        .collect();
    for key in snake_keys {
        let camel = snake_to_camel(&key);
        if camel != key && !doc.contains_key(&camel) {
            let value = doc.get(&key).cloned().unwrap_or(Value::Null);
            doc.insert(camel, value);
        }
    }

    Value::Object(doc)
}

/// 旧身份字段的各种形态 → 字符串
fn identity_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        // Mongo extended JSON: {"$oid": "..."}
        Value::Object(obj) => obj.get("$oid").and_then(Value::as_str).map(String::from),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn snake_to_camel(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = false;
    for c in s.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_passes_through() {
        assert_eq!(normalize(Value::Null), Value::Null);
    }

    #[test]
    fn fills_canonical_from_first_alias() {
        let doc = json!({"client_name": "Asha", "guests": 50});
        let out = normalize(doc);
        assert_eq!(out["clientName"], "Asha");
        assert_eq!(out["guestCount"], 50);
    }

    #[test]
    fn alias_priority_order_is_respected() {
        // client_name outranks the bare `name` alias
        let doc = json!({"name": "wrong", "client_name": "right"});
        let out = normalize(doc);
        assert_eq!(out["clientName"], "right");
    }

    #[test]
    fn never_overwrites_present_canonical_field() {
        let doc = json!({"clientName": "Asha", "client_name": "stale"});
        let out = normalize(doc);
        assert_eq!(out["clientName"], "Asha");
    }

    #[test]
    fn synthesizes_camel_case_for_unlisted_snake_keys() {
        let doc = json!({"brand_color": "#8b0000"});
        let out = normalize(doc);
        assert_eq!(out["brandColor"], "#8b0000");
        // the original key is kept; only a camelCase view is added
        assert_eq!(out["brand_color"], "#8b0000");
    }

    #[test]
    fn maps_legacy_identity_and_strips_bookkeeping() {
        let doc = json!({"_id": {"$oid": "64abc"}, "__v": 3, "client_name": "Asha"});
        let out = normalize(doc);
        assert_eq!(out["id"], "64abc");
        assert!(out.get("_id").is_none());
        assert!(out.get("__v").is_none());
    }

    #[test]
    fn is_idempotent() {
        let doc = json!({
            "_id": "64abc",
            "client_name": "Asha",
            "guests": 50,
            "brand_color": "#8b0000"
        });
        let once = normalize(doc);
        let twice = normalize(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn already_canonical_object_is_a_noop() {
        let doc = json!({"id": "booking:1", "clientName": "Asha", "guestCount": 50});
        assert_eq!(normalize(doc.clone()), doc);
    }
}
