pub mod constants;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{host_of, in_scope, normalize_url, resolve_href};
