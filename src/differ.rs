use crate::lang_map::LangMap;

/// 找出目标语言中缺失的键
///
/// 返回 `base` 中键不在 `target` 里的条目，值取自 `base`，顺序与 `base` 一致。
/// `target` 的值不参与比较：键存在即视为已翻译。
pub fn missing_keys(base: &LangMap, target: &LangMap) -> LangMap {
    base.iter()
        .filter(|(key, _)| !target.contains_key(key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang_map::to_pretty_json;
    use serde_json::json;

    fn map(value: serde_json::Value) -> LangMap {
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_missing_keys_basic() {
        let base = map(json!({"a": "1", "b": "2", "c": "3"}));
        let target = map(json!({"a": "один", "c": "три"}));

        let diff = missing_keys(&base, &target);
        assert_eq!(diff, map(json!({"b": "2"})));
    }

    #[test]
    fn test_values_come_from_base() {
        let base = map(json!({"a": "1", "b": "2"}));
        let target = map(json!({"a": "9"}));

        let diff = missing_keys(&base, &target);
        assert_eq!(diff.get("b"), Some(&json!("2")));
        assert!(!diff.contains_key("a"));
    }

    #[test]
    fn test_empty_target_returns_base() {
        let base = map(json!({"z": "last", "a": "first"}));
        assert_eq!(missing_keys(&base, &LangMap::new()), base);
    }

    #[test]
    fn test_empty_base_returns_empty() {
        let target = map(json!({"a": "1"}));
        assert!(missing_keys(&LangMap::new(), &target).is_empty());
    }

    #[test]
    fn test_same_keys_different_values_is_empty() {
        let base = map(json!({"a": "1"}));
        let target = map(json!({"a": "9"}));
        assert!(missing_keys(&base, &target).is_empty());
    }

    #[test]
    fn test_extra_target_keys_are_ignored() {
        let base = map(json!({"a": "1"}));
        let target = map(json!({"a": "1", "stale.key": "old"}));
        assert!(missing_keys(&base, &target).is_empty());
    }

    #[test]
    fn test_order_follows_base_and_serialization_is_stable() {
        let base = map(json!({"k3": "c", "k1": "a", "k2": "b", "k0": "z"}));
        let target = map(json!({"k1": "x"}));

        let first = missing_keys(&base, &target);
        let keys: Vec<&str> = first.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["k3", "k2", "k0"]);

        let second = missing_keys(&base, &target);
        assert_eq!(to_pretty_json(&first).unwrap(), to_pretty_json(&second).unwrap());
    }
}
