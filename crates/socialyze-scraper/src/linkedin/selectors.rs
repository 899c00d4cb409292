/// CSS selectors used against LinkedIn's public profile page.
///
/// These are best-effort defaults observed on the logged-out profile page.
/// They are configuration, not a contract: override them when LinkedIn's
/// markup drifts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedInSelectors {
    /// Close button of the sign-in overlay, located by accessibility label.
    pub dismiss_button: String,
    pub name: String,
    pub headline: String,
    pub about: String,
}

impl Default for LinkedInSelectors {
    fn default() -> Self {
        Self {
            dismiss_button: r#"button[aria-label="Dismiss"]"#.to_string(),
            name: "h1".to_string(),
            headline: "div.text-body-medium.break-words".to_string(),
            about: r#"div.display-flex.ph5.pv3 > div.display-flex.full-width > div > div > span[aria-hidden="true"]"#
                .to_string(),
        }
    }
}
