use crate::model::{TreeMap, TreeValue};

/// Merges `source` into `target` in place.
///
/// Mapping over mapping recurses key by key; any other pairing (arrays,
/// scalars, null, mixed kinds) replaces `target` with `source` wholesale.
/// Arrays are never merged element-wise.
pub fn deep_merge(target: &mut TreeValue, source: TreeValue) {
    match (target, source) {
        (TreeValue::Object(dst), TreeValue::Object(src)) => merge_object(dst, src),
        (target, source) => *target = source,
    }
}

pub fn merge_object(dst: &mut TreeMap, src: TreeMap) {
    for (key, value) in src {
        match (dst.get_mut(&key), value) {
            (Some(TreeValue::Object(dst_obj)), TreeValue::Object(src_obj)) => {
                merge_object(dst_obj, src_obj);
            }
            (_, v) => {
                dst.insert(key, v);
            }
        }
    }
}
