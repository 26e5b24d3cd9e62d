//! Free-text normalisation shared by the entity modules.

/// Trim `value`, returning `None` when nothing is left.
pub(crate) fn normalise_optional(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_owned())
    })
}
