use serde::de::DeserializeOwned;

/// Parses `raw` as JSON, returning `default` when it does not deserialize.
pub fn parse_json_or<T: DeserializeOwned>(raw: &str, default: T) -> T {
    match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "failed to parse JSON, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_or_valid() {
        let parsed: Vec<u32> = parse_json_or("[1,2,3]", vec![]);
        assert_eq!(parsed, vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_json_or_fallback() {
        let parsed: Vec<u32> = parse_json_or("[1,2,", vec![7]);
        assert_eq!(parsed, vec![7]);

        let parsed: Vec<u32> = parse_json_or(r#"{"a":1}"#, vec![]);
        assert!(parsed.is_empty());
    }
}
