use crate::tag::TypeTag;

/// Separator between a field name and its type suffix.
pub const SUFFIX_DELIMITER: &str = "__";

/// Append the `__<tag>` suffix to `key`.
///
/// Keys that already end in the same suffix are returned unchanged. When
/// the key has a different non-empty trailing segment after the last
/// `__`, that segment is dropped and replaced with `tag`; everything
/// before the last `__` stays as the base. A plain name that happens to
/// contain `__` (say `user__id`) therefore loses its last segment.
pub fn decorate(key: &str, tag: TypeTag) -> String {
    let tag = tag.as_str();

    match key.rsplit_once(SUFFIX_DELIMITER) {
        Some((_, suffix)) if suffix == tag => key.to_string(),
        Some((base, suffix)) if !suffix.is_empty() => format!("{base}{SUFFIX_DELIMITER}{tag}"),
        _ => format!("{key}{SUFFIX_DELIMITER}{tag}"),
    }
}
