use crate::domain::model::ObjectLabel;
use std::fmt;

/// Case-sensitive substring a label must contain to count as a hot dog.
pub const HOT_DOG_LABEL: &str = "Hot dog";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// `matched` is the index of the first label containing [`HOT_DOG_LABEL`].
    HotDog { matched: usize },
    NotHotDog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerPlacement {
    Top,
    Bottom,
}

impl Verdict {
    pub fn is_hot_dog(&self) -> bool {
        matches!(self, Self::HotDog { .. })
    }

    pub fn banner_text(&self) -> &'static str {
        match self {
            Self::HotDog { .. } => "Hot Dog",
            Self::NotHotDog => "Not Hot Dog",
        }
    }

    pub fn placement(&self) -> BannerPlacement {
        match self {
            Self::HotDog { .. } => BannerPlacement::Top,
            Self::NotHotDog => BannerPlacement::Bottom,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.banner_text())
    }
}

/// Scans from the first label and stops at the first hot dog match.
pub fn classify(labels: &[ObjectLabel]) -> Verdict {
    labels
        .iter()
        .position(|label| label.description().contains(HOT_DOG_LABEL))
        .map_or(Verdict::NotHotDog, |matched| Verdict::HotDog { matched })
}
