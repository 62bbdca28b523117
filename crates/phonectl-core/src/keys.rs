// Pure function-key table transforms. No I/O here.

use phonectl_api::FunctionKey;

/// Rewrite a function-key table by exact display-name substitution.
///
/// For each key whose display name equals `original` exactly
/// (case-sensitive, no trimming), the output at that index is a fresh key
/// carrying only the replacement display name -- a full overwrite, not a
/// field-level patch. Every other index is a fully blank key, which the
/// device's per-index merge treats as "no change". The input is never
/// mutated; the returned indices are ascending.
pub fn replace_display_name(
    keys: &[FunctionKey],
    original: &str,
    replacement: &str,
) -> (Vec<FunctionKey>, Vec<usize>) {
    let mut changed = Vec::new();
    let rewritten = keys
        .iter()
        .enumerate()
        .map(|(index, key)| {
            if key.display_name.value == original {
                changed.push(index);
                FunctionKey::named(replacement)
            } else {
                FunctionKey::default()
            }
        })
        .collect();
    (rewritten, changed)
}

/// Remove the contiguous run of empty keys from the tail of a downloaded
/// key list. Empty keys in the middle or at the head stay where they are.
/// Idempotent.
pub fn purge_trailing(keys: &[FunctionKey]) -> Vec<FunctionKey> {
    let keep = keys
        .iter()
        .rposition(|key| !key.is_empty())
        .map_or(0, |index| index + 1);
    keys.get(..keep).unwrap_or_default().to_vec()
}
