//! Display metadata tables - one mapping per enumerated field.
//!
//! Hosts look badges up here instead of deciding colors inline, so every
//! page renders the same status the same way.

use crate::models::{OrderStatus, ProductStatus, Role, WallPostKind};

/// Visual tone of a badge; the host maps it to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tone {
    /// Green
    Success,
    /// Amber
    Warning,
    /// Red
    Danger,
    /// Blue
    Info,
    /// Grey
    Neutral,
    /// Purple
    Accent,
}

impl Tone {
    /// Short name a text host can print.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Info => "info",
            Self::Neutral => "neutral",
            Self::Accent => "accent",
        }
    }
}

/// Label plus tone for a status chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    /// Text shown in the chip
    pub label: &'static str,
    /// Tone of the chip
    pub tone: Tone,
}

impl Badge {
    const fn new(label: &'static str, tone: Tone) -> Self {
        Self { label, tone }
    }
}

/// Something with a fixed badge.
pub trait HasBadge {
    /// The badge for this value.
    fn badge(&self) -> Badge;
}

impl HasBadge for ProductStatus {
    fn badge(&self) -> Badge {
        match self {
            Self::Active => Badge::new(self.label(), Tone::Success),
            Self::LowStock => Badge::new(self.label(), Tone::Warning),
            Self::OutOfStock => Badge::new(self.label(), Tone::Danger),
        }
    }
}

impl HasBadge for OrderStatus {
    fn badge(&self) -> Badge {
        let tone = match self {
            Self::Pending => Tone::Warning,
            Self::Processing => Tone::Info,
            Self::Shipped => Tone::Accent,
            Self::Delivered => Tone::Success,
            Self::Cancelled => Tone::Danger,
        };
        Badge::new(self.label(), tone)
    }
}

impl HasBadge for WallPostKind {
    fn badge(&self) -> Badge {
        match self {
            Self::Announcement => Badge::new("Announcement", Tone::Danger),
            Self::Update => Badge::new("Update", Tone::Info),
            Self::News => Badge::new("News", Tone::Success),
            Self::Celebration => Badge::new("Celebration", Tone::Accent),
        }
    }
}

impl HasBadge for Role {
    fn badge(&self) -> Badge {
        if self.is_active {
            Badge::new(Self::ACTIVE_LABEL, Tone::Success)
        } else {
            Badge::new(Self::INACTIVE_LABEL, Tone::Neutral)
        }
    }
}
