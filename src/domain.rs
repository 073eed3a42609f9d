/// Strips a single root dot, so `"example.com."` and `"example.com"` compare
/// equal. Any further trailing dots are left alone.
pub fn strip_root(domain: &str) -> &str {
    domain.strip_suffix('.').unwrap_or(domain)
}

/// Returns the last `labels` dot-separated components of `domain` after
/// stripping the root dot. When the domain has fewer labels the whole stripped
/// string comes back.
pub fn label_suffix(domain: &str, labels: usize) -> &str {
    let domain = strip_root(domain);
    if labels == 0 {
        return "";
    }

    // Walk back from the end instead of splitting and re-joining
    match domain.rmatch_indices('.').nth(labels - 1) {
        Some((dot, _)) => &domain[dot + 1..],
        None => domain,
    }
}
