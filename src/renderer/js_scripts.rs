//! JavaScript evaluated in the page to read rendered content

/// Visible text of the document, as the user would see it.
///
/// `innerText` applies CSS visibility and inserts line breaks between block
/// elements, which the fuzzy strategy relies on.
pub const VISIBLE_TEXT_SCRIPT: &str = r"
    (() => {
        const body = document.body;
        if (!body) {
            return '';
        }
        return body.innerText || '';
    })()
";

/// Raw `href` attribute of every anchor, in document order.
///
/// The attribute is returned as written; resolution against the page URL
/// happens on the Rust side.
pub const LINKS_SCRIPT: &str = r"
    (() => {
        return Array.from(document.querySelectorAll('a[href]'))
            .map(a => a.getAttribute('href'))
            .filter(href => typeof href === 'string');
    })()
";

/// Document readiness check used while waiting for the page to settle
pub const READY_STATE_SCRIPT: &str = r"
    (() => ({
        readyState: document.readyState,
        bodyExists: document.body !== null
    }))()
";
