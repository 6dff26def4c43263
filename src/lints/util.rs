//! DNS name helpers shared by the lints.

/// Labels of a DNS name, with a single trailing root dot ignored.
pub fn dns_labels(name: &str) -> Vec<&str> {
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() {
        return Vec::new();
    }
    name.split('.').collect()
}

/// The label directly left of the top-level label (`example` in
/// `www.example.com`), if the name has at least two labels.
pub fn second_level_label(name: &str) -> Option<&str> {
    let labels = dns_labels(name);
    if labels.len() < 2 {
        return None;
    }
    labels.get(labels.len() - 2).copied()
}

/// Labels left of the second-level label (`a.b` in `a.b.example.com`).
/// A leading wildcard label is not included.
pub fn third_level_labels(name: &str) -> Vec<&str> {
    let labels = dns_labels(name);
    if labels.len() < 3 {
        return Vec::new();
    }
    labels
        .iter()
        .take(labels.len() - 2)
        .enumerate()
        .filter(|(i, label)| !(*i == 0 && **label == "*"))
        .map(|(_, label)| *label)
        .collect()
}

/// Dotted-quad or IPv6 literal, which the DNS-name lints leave alone.
pub fn is_ip_literal(name: &str) -> bool {
    name.parse::<std::net::IpAddr>().is_ok()
}
