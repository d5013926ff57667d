//! Placeholder substitution for templated option strings.

/// Replace every `{{key}}` occurrence in `template` with `lookup(key)`.
///
/// Keys that `lookup` does not know stay in the output verbatim, braces
/// included — an unresolvable placeholder is not an error. A key may not
/// contain braces; malformed placeholders pass through unchanged. The
/// function is idempotent on strings with no remaining placeholders.
pub fn expand<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        // `find` returns char-boundary offsets, so these slices always exist.
        let (Some(head), Some(after)) = (rest.get(..start), rest.get(start + 2..)) else {
            break;
        };
        let Some(end) = after.find("}}") else {
            break;
        };
        let Some(key) = after.get(..end) else {
            break;
        };

        out.push_str(head);

        // Not a well-formed placeholder: emit the opening braces and keep
        // scanning right after them, so a nested `{{inner}}` still resolves.
        if key.is_empty() || key.contains('{') || key.contains('}') {
            out.push_str("{{");
            rest = after;
            continue;
        }

        match lookup(key) {
            Some(value) => out.push_str(&value),
            None => {
                out.push_str("{{");
                out.push_str(key);
                out.push_str("}}");
            }
        }

        rest = after.get(end + 2..).unwrap_or("");
    }

    out.push_str(rest);
    out
}
