use crate::model::{split_key, KeyPath, Location, TreeMap, TreeValue};

/// Outcome of resolving a path for a write or a delete.
#[derive(Debug)]
pub enum Resolution<'a> {
    /// The container exists; `key` may or may not be present in it.
    Slot {
        container: &'a mut TreeValue,
        key: String,
    },
    /// Some intermediate segment does not exist.
    Absent,
    /// Populating stopped at an array the segment cannot index or reach.
    Blocked { at: KeyPath },
}

/// Array indices follow the canonical decimal form, so `"01"` or `"+1"` never
/// address an element.
pub fn parse_index(segment: &str) -> Option<usize> {
    let canonical = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));
    if canonical {
        segment.parse().ok()
    } else {
        None
    }
}

pub fn child<'a>(value: &'a TreeValue, segment: &str) -> Option<&'a TreeValue> {
    match value {
        TreeValue::Object(map) => map.get(segment),
        TreeValue::Array(items) => parse_index(segment).and_then(|idx| items.get(idx)),
        _ => None,
    }
}

pub fn child_mut<'a>(value: &'a mut TreeValue, segment: &str) -> Option<&'a mut TreeValue> {
    match value {
        TreeValue::Object(map) => map.get_mut(segment),
        TreeValue::Array(items) => parse_index(segment).and_then(move |idx| items.get_mut(idx)),
        _ => None,
    }
}

pub fn get_path<'a>(root: &'a TreeValue, dotted: &str) -> Option<&'a TreeValue> {
    let mut current = root;
    for segment in split_key(dotted) {
        current = child(current, segment)?;
    }
    Some(current)
}

pub fn get_path_mut<'a>(root: &'a mut TreeValue, dotted: &str) -> Option<&'a mut TreeValue> {
    let mut current = root;
    for segment in split_key(dotted) {
        current = child_mut(current, segment)?;
    }
    Some(current)
}

fn is_container(value: &TreeValue) -> bool {
    matches!(value, TreeValue::Object(_) | TreeValue::Array(_))
}

fn ensure_container(value: &mut TreeValue) {
    if !is_container(value) {
        *value = TreeValue::Object(TreeMap::new());
    }
}

/// Furthest past the end of an array a write may land; the gap is padded
/// with null.
pub const MAX_ARRAY_PADDING: usize = 1024;

fn reachable_index(items: &[TreeValue], segment: &str) -> Option<usize> {
    let idx = parse_index(segment)?;
    (idx <= items.len().saturating_add(MAX_ARRAY_PADDING)).then_some(idx)
}

/// The element `segment` addresses, padding the array with null when the
/// index lies within [`MAX_ARRAY_PADDING`] of its end.
pub fn array_slot<'a>(items: &'a mut Vec<TreeValue>, segment: &str) -> Option<&'a mut TreeValue> {
    let idx = reachable_index(items, segment)?;
    if idx >= items.len() {
        items.resize(idx.checked_add(1)?, TreeValue::Null);
    }
    items.get_mut(idx)
}

/// First prefix of `segments` a write cannot pass through, checked before
/// anything is mutated.
fn first_blocked(root: &TreeValue, segments: &[&str]) -> Option<KeyPath> {
    let mut current = root;
    for (depth, segment) in segments.iter().enumerate() {
        let next = match current {
            TreeValue::Object(map) => map.get(*segment),
            TreeValue::Array(items) => match reachable_index(items, segment) {
                Some(idx) => items.get(idx),
                None => return Some(KeyPath(segments[..=depth].join("."))),
            },
            _ => None,
        };
        current = next?;
    }
    None
}

/// Makes every segment exist as a container, creating empty mappings for
/// missing, null or scalar positions. Arrays are descended by index and padded
/// up to [`MAX_ARRAY_PADDING`] past their end. The tree is left untouched when
/// the path is blocked.
pub fn populate(root: &mut TreeValue, segments: &[&str]) -> Result<(), KeyPath> {
    if let Some(at) = first_blocked(root, segments) {
        return Err(at);
    }

    let mut current = root;
    for (depth, segment) in segments.iter().enumerate() {
        ensure_container(current);
        let next = match current {
            TreeValue::Object(map) => Some(
                map.entry(segment.to_string())
                    .or_insert_with(|| TreeValue::Object(TreeMap::new())),
            ),
            TreeValue::Array(items) => array_slot(items, segment),
            _ => None,
        };
        current = match next {
            Some(value) => value,
            None => return Err(KeyPath(segments[..=depth].join("."))),
        };
    }
    ensure_container(current);
    Ok(())
}

pub fn resolve_for_mutation<'a>(
    root: &'a mut TreeValue,
    path: &KeyPath,
    populate_missing: bool,
) -> Resolution<'a> {
    let Some(Location { container, key }) = path.location() else {
        return Resolution::Absent;
    };

    if populate_missing {
        let segments: Vec<&str> = container.segments().collect();
        if let Err(at) = populate(root, &segments) {
            return Resolution::Blocked { at };
        }
    }

    match get_path_mut(root, &container.0) {
        Some(container) => Resolution::Slot { container, key },
        None => Resolution::Absent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_nested_objects_and_array_indices() {
        let tree = json!({"a": {"b": [10, {"c": "deep"}]}});
        assert_eq!(get_path(&tree, "a.b.0"), Some(&json!(10)));
        assert_eq!(get_path(&tree, "a.b.1.c"), Some(&json!("deep")));
        assert_eq!(get_path(&tree, ""), Some(&tree));
    }

    #[test]
    fn missing_or_invalid_paths_read_as_absent() {
        let tree = json!({"a": {"b": null, "n": 5, "list": [1, 2]}});
        assert!(get_path(&tree, "x").is_none());
        assert!(get_path(&tree, "a.b.c").is_none());
        assert!(get_path(&tree, "a.n.c").is_none());
        assert!(get_path(&tree, "a.list.2").is_none());
        assert!(get_path(&tree, "a.list.first").is_none());
        assert!(get_path(&tree, "a.list.01").is_none());
    }

    #[test]
    fn present_null_is_not_absent() {
        let tree = json!({"a": null});
        assert_eq!(get_path(&tree, "a"), Some(&TreeValue::Null));
    }

    #[test]
    fn index_parsing_is_canonical() {
        assert_eq!(parse_index("0"), Some(0));
        assert_eq!(parse_index("12"), Some(12));
        assert_eq!(parse_index("007"), None);
        assert_eq!(parse_index("+1"), None);
        assert_eq!(parse_index("-1"), None);
        assert_eq!(parse_index(""), None);
    }

    #[test]
    fn single_segment_resolves_to_root() {
        let mut tree = json!({"a": 1});
        match resolve_for_mutation(&mut tree, &KeyPath::from("a"), false) {
            Resolution::Slot { container, key } => {
                assert_eq!(key, "a");
                assert_eq!(container, &json!({"a": 1}));
            }
            other => panic!("unexpected resolution: {other:?}"),
        }
    }

    #[test]
    fn populate_creates_intermediate_mappings() {
        let mut tree = json!({});
        match resolve_for_mutation(&mut tree, &KeyPath::from("a.b.c"), true) {
            Resolution::Slot { container, key } => {
                assert_eq!(key, "c");
                assert_eq!(container, &json!({}));
            }
            other => panic!("unexpected resolution: {other:?}"),
        }
        assert_eq!(tree, json!({"a": {"b": {}}}));
    }

    #[test]
    fn populate_replaces_scalars_and_descends_arrays() {
        let mut tree = json!({"a": 5, "list": [{"x": 1}]});
        populate(&mut tree, &["a", "b"]).unwrap();
        populate(&mut tree, &["list", "0", "y"]).unwrap();
        assert_eq!(tree, json!({"a": {"b": {}}, "list": [{"x": 1, "y": {}}]}));
    }

    #[test]
    fn populate_blocks_on_unindexable_array() {
        let mut tree = json!({"list": [1]});
        let err = populate(&mut tree, &["list", "name"]).unwrap_err();
        assert_eq!(err, KeyPath::from("list.name"));
        assert_eq!(tree, json!({"list": [1]}));
    }

    #[test]
    fn populate_pads_arrays_up_to_missing_index() {
        let mut tree = json!({"list": [1, 2]});
        populate(&mut tree, &["list", "3"]).unwrap();
        assert_eq!(tree, json!({"list": [1, 2, null, {}]}));
    }

    #[test]
    fn populate_blocks_far_indices_without_touching_tree() {
        let mut tree = json!({"list": [1, 2]});
        let err = populate(&mut tree, &["list", "18446744073709551615", "x"]).unwrap_err();
        assert_eq!(err, KeyPath::from("list.18446744073709551615"));

        let far = (2 + MAX_ARRAY_PADDING + 1).to_string();
        assert!(populate(&mut tree, &["list", far.as_str()]).is_err());
        assert_eq!(tree, json!({"list": [1, 2]}));
    }

    #[test]
    fn array_slot_is_bounded() {
        let mut items = vec![json!(1)];
        assert!(array_slot(&mut items, "18446744073709551615").is_none());
        assert!(array_slot(&mut items, &(1 + MAX_ARRAY_PADDING + 1).to_string()).is_none());
        assert_eq!(items, vec![json!(1)]);

        *array_slot(&mut items, "2").unwrap() = json!(3);
        assert_eq!(items, vec![json!(1), json!(null), json!(3)]);
    }

    #[test]
    fn without_populate_missing_container_is_absent() {
        let mut tree = json!({"a": {}});
        assert!(matches!(
            resolve_for_mutation(&mut tree, &KeyPath::from("x.y"), false),
            Resolution::Absent
        ));
        assert_eq!(tree, json!({"a": {}}));
    }
}
