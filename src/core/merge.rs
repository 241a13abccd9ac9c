//! Deep merge of configuration maps.

use crate::ConfigMap;
use config::{Value, ValueKind};

/// Merge `incoming` into `base`, key by key.
///
/// Where both sides hold a table the tables are merged recursively; anywhere
/// else the incoming value replaces the existing one. Keys only present in
/// `base` are left untouched.
///
/// # Examples
///
/// ```rust
/// use hiss::core::deep_merge;
/// use hiss::resource::materialize;
///
/// let mut base = materialize("yaml", "snake: {sound: hiss, foot: 0}").unwrap();
/// deep_merge(&mut base, materialize("yaml", "snake: {foot: 1}").unwrap());
///
/// let snake = base["snake"].clone().into_table().unwrap();
/// assert_eq!(snake["sound"].clone().into_string().unwrap(), "hiss");
/// assert_eq!(snake["foot"].clone().into_int().unwrap(), 1);
/// ```
pub fn deep_merge(base: &mut ConfigMap, incoming: ConfigMap) {
    for (key, value) in incoming {
        match base.get_mut(&key) {
            Some(existing) => merge_value(existing, value),
            None => {
                base.insert(key, value);
            }
        }
    }
}

fn merge_value(existing: &mut Value, incoming: Value) {
    if let ValueKind::Table(table) = &mut existing.kind {
        if matches!(incoming.kind, ValueKind::Table(_)) {
            if let ValueKind::Table(overlay) = incoming.kind {
                deep_merge(table, overlay);
            }
            return;
        }
    }
    *existing = incoming;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::materialize;

    fn yaml(text: &str) -> ConfigMap {
        materialize("yaml", text).unwrap()
    }

    fn lookup(map: &ConfigMap, path: &[&str]) -> Option<Value> {
        let (last, parents) = path.split_last()?;
        let mut current = map.clone();
        for key in parents {
            current = current.get(*key)?.clone().into_table().ok()?;
        }
        current.get(*last).cloned()
    }

    #[test]
    fn test_disjoint_keys_are_combined() {
        let mut base = yaml("snake: {sound: hiss}");
        deep_merge(&mut base, yaml("cat: {sound: meow}"));
        assert!(base.contains_key("snake"));
        assert!(base.contains_key("cat"));
    }

    #[test]
    fn test_nested_siblings_survive() {
        let mut base = yaml("snake: {sound: hiss, foot: 0}");
        deep_merge(&mut base, yaml("snake: {foot: 0}\ncat: {sound: meow, foot: 4}"));

        let sound = lookup(&base, &["snake", "sound"]).unwrap();
        assert_eq!(sound.into_string().unwrap(), "hiss");
        let foot = lookup(&base, &["cat", "foot"]).unwrap();
        assert_eq!(foot.into_int().unwrap(), 4);
    }

    #[test]
    fn test_later_scalar_wins() {
        let mut base = yaml("dog: {sound: woof}");
        deep_merge(&mut base, yaml("dog: {sound: bark}"));
        let sound = lookup(&base, &["dog", "sound"]).unwrap();
        assert_eq!(sound.into_string().unwrap(), "bark");
    }

    #[test]
    fn test_scalar_replaces_table_and_back() {
        let mut base = yaml("dog: {sound: woof}");
        deep_merge(&mut base, yaml("dog: none"));
        assert_eq!(lookup(&base, &["dog"]).unwrap().into_string().unwrap(), "none");

        deep_merge(&mut base, yaml("dog: {foot: 4}"));
        assert_eq!(lookup(&base, &["dog", "foot"]).unwrap().into_int().unwrap(), 4);
        assert!(lookup(&base, &["dog", "sound"]).is_none());
    }

    #[test]
    fn test_arrays_are_replaced_not_appended() {
        let mut base = yaml("prey: [mouse, frog]");
        deep_merge(&mut base, yaml("prey: [bird]"));
        let prey = lookup(&base, &["prey"]).unwrap().into_array().unwrap();
        assert_eq!(prey.len(), 1);
    }

    #[test]
    fn test_empty_incoming_is_noop() {
        let mut base = yaml("snake: {sound: hiss}");
        let before = base.clone();
        deep_merge(&mut base, ConfigMap::new());
        assert_eq!(base, before);
    }
}
