use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,
    BackgroundGlow,
    Surface,
    Border,

    TextPrimary,
    TextSecondary,
    TextMuted,
    Caret,

    // Accents, used by decorative icons and particles
    AccentIndigo,
    AccentPurple,
    AccentBlue,
    AccentPink,
    AccentTeal,
    AccentAmber,
    Particle,

    // Call to action
    CtaFill,
    CtaHover,
    CtaText,

    // Tooltip
    TooltipBackground,
    TooltipBorder,
    TooltipTitle,
    TooltipText,

    // Navigation bar
    NavBackground,
    NavBorder,
    NavText,
    NavTextHover,
    BadgeFill,
    BadgeText,
    DiscordFill,
    NotificationDot,
    SearchFill,

    // Profile menu
    MenuBackground,
    MenuBorder,
    MenuItemHover,

    ScrollIndicator,
}

impl ThemeToken {
    /// Accent tokens in the order icons cycle through them.
    pub const ACCENTS: [ThemeToken; 6] = [
        ThemeToken::AccentIndigo,
        ThemeToken::AccentPurple,
        ThemeToken::AccentBlue,
        ThemeToken::AccentPink,
        ThemeToken::AccentTeal,
        ThemeToken::AccentAmber,
    ];
}
