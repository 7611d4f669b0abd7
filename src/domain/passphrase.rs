/// Canonical form used both when a passphrase is enrolled and when a later
/// transcript is compared against it: lowercase, whitespace runs collapsed
/// to single spaces, no leading or trailing whitespace.
pub fn normalize_passphrase(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
