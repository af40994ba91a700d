/// Rewrites a leading `http://` to `https://`.
///
/// Everything after the scheme (host, port, path, query) is kept as is and no
/// validation happens here. Targets without the `http://` prefix pass through
/// untouched and fail later at the solver if they are unusable.
pub fn to_https(target: &str) -> String {
    match target.strip_prefix("http://") {
        Some(rest) => format!("https://{}", rest),
        None => target.to_string(),
    }
}
