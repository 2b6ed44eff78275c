use url::Url;

const ABSOLUTE_SCHEMES: &[&str] = &["http", "https", "ftp", "ftps"];

/// Builds the export URL for a listing link.
///
/// Absolute links and links without a (non-blank) base pass through
/// unchanged. Otherwise one trailing slash is stripped from the base and the
/// link is appended, inserting `/` unless the link already starts with one.
/// The concatenation is textual: no normalization or percent-encoding.
pub fn resolve_full_url(href: &str, base_url: Option<&str>) -> String {
    let Some(base) = base_url.map(str::trim).filter(|base| !base.is_empty()) else {
        return href.to_string();
    };
    if is_absolute(href) {
        return href.to_string();
    }
    let base = base.strip_suffix('/').unwrap_or(base);
    if href.starts_with('/') {
        format!("{base}{href}")
    } else {
        format!("{base}/{href}")
    }
}

/// True when `href` parses as a URL with a download scheme.
pub fn is_absolute(href: &str) -> bool {
    Url::parse(href)
        .map(|url| ABSOLUTE_SCHEMES.contains(&url.scheme()))
        .unwrap_or(false)
}
