use serde_json::Value;

/// Masks card data and credentials in webhook payloads before they are logged.
pub fn sanitize_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut sanitized = serde_json::Map::new();
            for (key, val) in map {
                let sanitized_val = if is_sensitive_field(key) {
                    mask_value(val)
                } else {
                    sanitize_json(val)
                };
                sanitized.insert(key.clone(), sanitized_val);
            }
            Value::Object(sanitized)
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sanitize_json).collect()),
        _ => value.clone(),
    }
}

fn is_sensitive_field(key: &str) -> bool {
    matches!(
        key.to_lowercase().as_str(),
        "number"
            | "cvv"
            | "card_token"
            | "cardtoken"
            | "token"
            | "document"
            | "password"
            | "secret"
            | "api_key"
            | "authorization"
    )
}

fn mask_value(value: &Value) -> Value {
    match value {
        Value::String(s) if s.chars().count() > 8 => {
            let chars: Vec<char> = s.chars().collect();
            let start: String = chars[..4].iter().collect();
            let end: String = chars[chars.len() - 4..].iter().collect();
            Value::String(format!("{start}****{end}"))
        }
        _ => Value::String("****".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn masks_card_number() {
        let input = json!({
            "number": "4000000000000010",
            "amount": 15990
        });

        let sanitized = sanitize_json(&input);

        assert_eq!(sanitized["number"], "4000****0010");
        assert_eq!(sanitized["amount"], 15990);
    }

    #[test]
    fn masks_nested_fields() {
        let input = json!({
            "data": {
                "customer": { "document": "12345678909", "name": "Tony Stark" },
                "charges": [{ "last_transaction": { "card": { "cvv": "123" } } }]
            }
        });

        let sanitized = sanitize_json(&input);

        assert_eq!(sanitized["data"]["customer"]["document"], "1234****8909");
        assert_eq!(sanitized["data"]["customer"]["name"], "Tony Stark");
        assert_eq!(
            sanitized["data"]["charges"][0]["last_transaction"]["card"]["cvv"],
            "****"
        );
    }
}
