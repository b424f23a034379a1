//! App-name placeholder substitution in instruction HTML.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use std::borrow::Cow;

/// Name used when the caller does not supply one.
pub const DEFAULT_APP_NAME: &str = "your app";

/// Matches `[[Yy]our app]` with the optional backslash escaping the dataset
/// carries from its Markdown source, e.g. `\[[Yy]our app\]`.
static APP_NAME_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\?\[\[Yy\]our app\\?\]").unwrap());

/// Replace every app-name placeholder in `html` with `app_name`.
///
/// Borrows `html` unchanged when it holds no placeholder.
pub fn substitute_app_name<'a>(html: &'a str, app_name: &str) -> Cow<'a, str> {
    APP_NAME_PLACEHOLDER.replace_all(html, NoExpand(app_name))
}

/// Substitute into an optional fragment.
///
/// Absent and empty fragments both come back as `None`.
pub fn substitute_optional(html: Option<&str>, app_name: &str) -> Option<String> {
    html.filter(|h| !h.is_empty())
        .map(|h| substitute_app_name(h, app_name).into_owned())
}
