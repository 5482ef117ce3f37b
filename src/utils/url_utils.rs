//! URL normalization and domain scoping.
//!
//! Every URL that enters the frontier goes through [`normalize_url`], and
//! every dedup or visited check compares the normalized form.

use url::Url;

use crate::crawl_engine::CrawlError;

/// Canonicalize a URL for dedup and scoping.
///
/// Strips the query string and fragment. Scheme, host and path are kept as
/// the parser reports them, so path case and a trailing slash survive.
/// Relative URLs are rejected; resolve them with [`resolve_href`] first.
///
/// # Errors
///
/// Returns [`CrawlError::InvalidUrl`] when the input does not parse as an
/// absolute URL. Callers drop that URL and keep crawling.
///
/// # Examples
///
/// ```
/// use kodegen_tools_brandcheck::utils::normalize_url;
///
/// let normalized = normalize_url("https://example.com/About/?q=1#team").unwrap();
/// assert_eq!(normalized, "https://example.com/About/");
/// ```
pub fn normalize_url(url: &str) -> Result<String, CrawlError> {
    let mut parsed = Url::parse(url.trim()).map_err(|e| CrawlError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    parsed.set_query(None);
    parsed.set_fragment(None);
    Ok(parsed.into())
}

/// Host component of a URL, if it has one.
#[must_use]
pub fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
}

/// True iff the URL's host equals `domain` exactly.
///
/// No subdomain wildcarding and no scheme check. Unparsable URLs are out of
/// scope.
#[must_use]
pub fn in_scope(url: &str, domain: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.host_str() == Some(domain),
        Err(_) => false,
    }
}

/// Resolve a raw `href` attribute against the page it was found on.
///
/// Absolute hrefs are returned as parsed; relative ones are joined onto
/// `base`. Only http and https results are kept, which drops `mailto:`,
/// `javascript:` and `tel:` links.
pub fn resolve_href(base: &str, href: &str) -> Result<String, CrawlError> {
    let invalid = |reason: String| CrawlError::InvalidUrl {
        url: href.to_string(),
        reason,
    };

    let resolved = match Url::parse(href) {
        Ok(absolute) => absolute,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(base)
            .and_then(|base| base.join(href))
            .map_err(|e| invalid(e.to_string()))?,
        Err(e) => return Err(invalid(e.to_string())),
    };

    if !matches!(resolved.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", resolved.scheme())));
    }

    Ok(resolved.into())
}
