use crate::extract::ExpressionMap;

/// Merges a user-declared expression map with a schema-derived default map.
///
/// A pure function: neither input is mutated and a new map is returned. For
/// every logical name present in both maps, `dest`'s expression wins; names
/// present only in `src` are filled in from it. This first-writer-wins rule
/// is the opposite of the loader's last-write-wins on colliding keys on
/// purpose: `dest` holds explicit user configuration, which must take
/// precedence over generated defaults.
pub fn merge_expression_maps(dest: &ExpressionMap, src: &ExpressionMap) -> ExpressionMap {
    if src.is_empty() {
        return dest.clone();
    }
    if dest.is_empty() {
        return src.clone();
    }

    let mut merged = dest.clone();
    for (name, expression) in src {
        merged
            .entry(name.clone())
            .or_insert_with(|| expression.clone());
    }

    merged
}
