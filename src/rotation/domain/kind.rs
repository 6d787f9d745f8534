//! Supported rotations.

use std::fmt;

/// The duty a rotation hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationKind {
    /// Weekly support vanguard duty.
    SupportVanguard,
    /// Weekly show-and-tell presentation.
    ShowAndTell,
}

impl RotationKind {
    /// Returns the rotation name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SupportVanguard => "support-vanguard",
            Self::ShowAndTell => "show-and-tell",
        }
    }

    /// Returns the default summary template.
    #[must_use]
    pub const fn default_summary_template(self) -> &'static str {
        match self {
            Self::SupportVanguard => {
                "Support Vanguard for {{ sprint_name }} week {{ week }} ({{ start_date }})"
            }
            Self::ShowAndTell => {
                "Show and Tell for {{ sprint_name }} week {{ week }} ({{ start_date }})"
            }
        }
    }

    /// Returns the default description template.
    #[must_use]
    pub const fn default_description_template(self) -> &'static str {
        match self {
            Self::SupportVanguard => concat!(
                "Provide support Vanguard for the week from {{ start_date }}.\n\n",
                "See https://discourse.maas.io/t/the-support-vanguard/4658 for more details."
            ),
            Self::ShowAndTell => concat!(
                "It is your turn for a show and tell in the week from {{ start_date }}.\n\n",
                "See https://discourse.maas.io/t/show-and-tell/4620 for more details.\n\n",
                "Please add a comment to this issue whether you have a topic you would like ",
                "to present in public or not."
            ),
        }
    }
}

impl fmt::Display for RotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
