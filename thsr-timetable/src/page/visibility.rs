//! Element visibility from inline styles.
//!
//! The timetable page toggles its pagination control and loading indicator
//! through inline `style` attributes. An element is treated as hidden when
//! its inline style declares `visibility: hidden` or `display: none`.
//! Property names and values are compared case-insensitively and surrounding
//! whitespace is ignored, so `visibility:hidden` and `DISPLAY: None ;` both
//! count. A missing or empty style attribute means visible. Styles applied
//! through stylesheets are not considered.

/// Whether an element is shown according to its inline style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    /// Judge visibility from the raw `style` attribute value.
    pub fn from_style(style: Option<&str>) -> Self {
        let hidden = style
            .into_iter()
            .flat_map(|s| s.split(';'))
            .filter_map(|decl| decl.split_once(':'))
            .any(|(property, value)| {
                let property = property.trim();
                let value = strip_important(value.trim());
                (property.eq_ignore_ascii_case("visibility") && value.eq_ignore_ascii_case("hidden"))
                    || (property.eq_ignore_ascii_case("display")
                        && value.eq_ignore_ascii_case("none"))
            });

        if hidden {
            Visibility::Hidden
        } else {
            Visibility::Visible
        }
    }

    pub fn is_hidden(self) -> bool {
        self == Visibility::Hidden
    }
}

fn strip_important(value: &str) -> &str {
    value
        .strip_suffix("!important")
        .map(str::trim_end)
        .unwrap_or(value)
}
