pub mod attendance;
pub mod reference;

/// `?, ?, ?` list for an `IN (...)` clause with `n` bound values.
pub(crate) fn in_placeholders(n: usize) -> String {
    std::iter::repeat("?").take(n).collect::<Vec<_>>().join(", ")
}
