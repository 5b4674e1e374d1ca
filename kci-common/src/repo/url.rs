//! Git remote URL normalization.
//!
//! The dashboard indexes trees by their public https URL, so every remote
//! form (scp-like, ssh://, git://, http(s) with credentials) is reduced to
//! `https://host[:port]/path`.

/// Default port of a URL scheme, if it has a well-known one.
fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "https" => Some(443),
        "http" => Some(80),
        "ssh" | "git+ssh" | "ssh+git" => Some(22),
        "git" => Some(9418),
        _ => None,
    }
}

/// Split `host[:port]` (with optional `[v6]` brackets) into host and port.
fn split_host_port(authority: &str) -> (&str, Option<u16>) {
    if let Some(rest) = authority.strip_prefix('[')
        && let Some(end) = rest.find(']')
    {
        let host = &authority[..end + 2];
        let port = rest[end + 1..]
            .strip_prefix(':')
            .and_then(|p| p.parse::<u16>().ok());
        return (host, port);
    }

    match authority.rsplit_once(':') {
        Some((host, port)) if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) => {
            (host, port.parse::<u16>().ok())
        }
        Some((host, "")) => (host, None),
        _ => (authority, None),
    }
}

/// Rebuild `https://host[:port]path`, dropping `port` when it equals the
/// default of `scheme` or of https.
fn assemble(scheme: &str, host: &str, port: Option<u16>, path: &str) -> String {
    let mut url = format!("https://{}", host.to_ascii_lowercase());
    if let Some(port) = port
        && Some(port) != default_port(scheme)
        && port != 443
    {
        url.push_str(&format!(":{port}"));
    }
    if !path.is_empty() && !path.starts_with('/') {
        url.push('/');
    }
    url.push_str(path);
    url
}

/// Normalize a git remote URL to a credential-free https form.
///
/// Local paths and other unrecognized forms are returned trimmed but
/// otherwise unchanged.
pub fn normalize_git_url(raw: &str) -> String {
    let raw = raw.trim();

    if let Some((scheme, rest)) = raw.split_once("://") {
        let scheme = scheme.to_ascii_lowercase();
        if scheme == "file" {
            return raw.to_string();
        }
        let (authority, path) = match rest.find('/') {
            Some(idx) => rest.split_at(idx),
            None => (rest, ""),
        };
        let authority = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
        let (host, port) = split_host_port(authority);
        return assemble(&scheme, host, port, path);
    }

    // scp-like syntax: [user@]host:path. A ':' after the first '/' means a
    // local path instead.
    if let Some(colon) = raw.find(':') {
        let slash = raw.find('/').unwrap_or(usize::MAX);
        if colon < slash {
            let (authority, path) = (&raw[..colon], &raw[colon + 1..]);
            let host = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
            if !host.is_empty() {
                return assemble("ssh", host, None, path);
            }
        }
    }

    raw.to_string()
}
