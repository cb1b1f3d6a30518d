//! Habit color palette.
//!
//! # Responsibility
//! - Map color tags stored on habits to their display hex values.
//!
//! # Invariants
//! - Unknown tags resolve to `FALLBACK_COLOR`, never an error.
//! - Tag-to-value mapping is static; persisted data only carries the tag.

/// Display value used for tags not present in the palette.
pub const FALLBACK_COLOR: &str = "#6b7280";

/// Tag pre-selected when the user has not picked a color.
pub const DEFAULT_TAG: &str = "blue";

const PALETTE: &[(&str, &str)] = &[
    ("blue", "#3b82f6"),
    ("red", "#ef4444"),
    ("green", "#10b981"),
    ("purple", "#8b5cf6"),
    ("orange", "#f97316"),
    ("pink", "#ec4899"),
    ("yellow", "#eab308"),
    ("teal", "#14b8a6"),
    ("indigo", "#6366f1"),
    ("coral", "#ff6b6b"),
    ("emerald", "#059669"),
    ("rose", "#f43f5e"),
    ("sky", "#0ea5e9"),
    ("lime", "#84cc16"),
    ("violet", "#7c3aed"),
    ("amber", "#f59e0b"),
    ("cyan", "#06b6d4"),
    ("slate", "#64748b"),
    ("mint", "#6ee7b7"),
];

/// Resolves a color tag to its display hex value.
pub fn color_value(tag: &str) -> &'static str {
    PALETTE
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, value)| *value)
        .unwrap_or(FALLBACK_COLOR)
}

/// Returns whether the tag belongs to the palette.
pub fn is_known(tag: &str) -> bool {
    PALETTE.iter().any(|(name, _)| *name == tag)
}

/// Lists all palette tags in display order.
pub fn known_tags() -> impl Iterator<Item = &'static str> {
    PALETTE.iter().map(|(name, _)| *name)
}
