//! Node-label filter expressions.
//!
//! A filter is a single regular expression, in the downstream consumer's
//! syntax, selecting which nodes from a provider satisfy a group's
//! membership.

/// Builds a node-matching expression from inclusion and exclusion keywords.
///
/// The include keywords are alternated with `|` so a node label matches if
/// it contains any of them. When exclusion keywords are present the
/// expression is wrapped in a negative lookahead: a label matches the final
/// filter iff it matches at least one include keyword and none of the
/// exclude keywords.
///
/// `include` must be non-empty; callers validate keyword sets before
/// reaching the builder.
///
/// # Examples
///
/// ```
/// use clash_gen::compose::build_filter;
///
/// let keywords = vec!["HK".to_string(), "Hong Kong".to_string()];
/// assert_eq!(build_filter(&keywords, &[]), "HK|Hong Kong");
///
/// let exclude = vec!["TEST".to_string()];
/// assert_eq!(build_filter(&keywords, &exclude), "(?!.*(TEST)).*(HK|Hong Kong)");
/// ```
#[must_use]
pub fn build_filter(include: &[String], exclude: &[String]) -> String {
    debug_assert!(!include.is_empty(), "include keywords must be non-empty");

    let include_pattern = include.join("|");
    if exclude.is_empty() {
        include_pattern
    } else {
        let exclude_pattern = exclude.join("|");
        format!("(?!.*({exclude_pattern})).*({include_pattern})")
    }
}
