use dimli_protocol::ThemeToken;

/// Resolved RGBA color for egui rendering.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ResolvedColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }
}

pub fn resolve(token: ThemeToken, mode: ThemeMode) -> egui::Color32 {
    match mode {
        ThemeMode::Dark => resolve_dark(token),
        ThemeMode::Light => resolve_light(token),
    }
    .to_color32()
}

/// `color` with its alpha multiplied by `opacity`.
pub fn fade(color: egui::Color32, opacity: f32) -> egui::Color32 {
    color.gamma_multiply(opacity.clamp(0.0, 1.0))
}

fn resolve_dark(token: ThemeToken) -> ResolvedColor {
    // Catppuccin Mocha palette
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(0x11, 0x11, 0x1b), // Crust
        BackgroundGlow => ResolvedColor::rgba(0xb4, 0xbe, 0xfe, 24), // Lavender
        Surface => ResolvedColor::rgb(0x18, 0x18, 0x25),    // Mantle
        Border => ResolvedColor::rgb(0x31, 0x32, 0x44),     // Surface0

        TextPrimary => ResolvedColor::rgb(0xcd, 0xd6, 0xf4), // Text
        TextSecondary => ResolvedColor::rgb(0xba, 0xc2, 0xde), // Subtext1
        TextMuted => ResolvedColor::rgb(0xa6, 0xad, 0xc8),   // Subtext0
        Caret => ResolvedColor::rgb(0xb4, 0xbe, 0xfe),       // Lavender

        AccentIndigo => ResolvedColor::rgb(0xb4, 0xbe, 0xfe), // Lavender
        AccentPurple => ResolvedColor::rgb(0xcb, 0xa6, 0xf7), // Mauve
        AccentBlue => ResolvedColor::rgb(0x89, 0xb4, 0xfa),   // Blue
        AccentPink => ResolvedColor::rgb(0xf5, 0xc2, 0xe7),   // Pink
        AccentTeal => ResolvedColor::rgb(0x94, 0xe2, 0xd5),   // Teal
        AccentAmber => ResolvedColor::rgb(0xfa, 0xb3, 0x87),  // Peach
        Particle => ResolvedColor::rgba(0xb4, 0xbe, 0xfe, 90),

        CtaFill => ResolvedColor::rgb(0x89, 0xb4, 0xfa),
        CtaHover => ResolvedColor::rgb(0xb4, 0xbe, 0xfe),
        CtaText => ResolvedColor::rgb(0x1e, 0x1e, 0x2e), // Base

        TooltipBackground => ResolvedColor::rgb(0x1e, 0x1e, 0x2e), // Base
        TooltipBorder => ResolvedColor::rgb(0x45, 0x47, 0x5a),     // Surface1
        TooltipTitle => ResolvedColor::rgb(0xcd, 0xd6, 0xf4),
        TooltipText => ResolvedColor::rgb(0xa6, 0xad, 0xc8),

        NavBackground => ResolvedColor::rgba(0x18, 0x18, 0x25, 235),
        NavBorder => ResolvedColor::rgb(0x31, 0x32, 0x44),
        NavText => ResolvedColor::rgb(0xba, 0xc2, 0xde),
        NavTextHover => ResolvedColor::rgb(0xcd, 0xd6, 0xf4),
        BadgeFill => ResolvedColor::rgb(0xcb, 0xa6, 0xf7),
        BadgeText => ResolvedColor::rgb(0x11, 0x11, 0x1b),
        DiscordFill => ResolvedColor::rgb(0x58, 0x65, 0xf2),
        NotificationDot => ResolvedColor::rgb(0xf3, 0x8b, 0xa8), // Red
        SearchFill => ResolvedColor::rgb(0x1e, 0x1e, 0x2e),

        MenuBackground => ResolvedColor::rgb(0x1e, 0x1e, 0x2e),
        MenuBorder => ResolvedColor::rgb(0x45, 0x47, 0x5a),
        MenuItemHover => ResolvedColor::rgba(0xcd, 0xd6, 0xf4, 15),

        ScrollIndicator => ResolvedColor::rgb(0x6c, 0x70, 0x86), // Overlay0
    }
}

fn resolve_light(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(255, 255, 255),
        BackgroundGlow => ResolvedColor::rgba(99, 102, 241, 18),
        Surface => ResolvedColor::rgb(245, 245, 248),
        Border => ResolvedColor::rgb(210, 210, 220),

        TextPrimary => ResolvedColor::rgb(20, 20, 30),
        TextSecondary => ResolvedColor::rgb(80, 80, 100),
        TextMuted => ResolvedColor::rgb(100, 100, 110),
        Caret => ResolvedColor::rgb(79, 70, 229),

        AccentIndigo => ResolvedColor::rgb(79, 70, 229),
        AccentPurple => ResolvedColor::rgb(147, 51, 234),
        AccentBlue => ResolvedColor::rgb(37, 99, 235),
        AccentPink => ResolvedColor::rgb(219, 39, 119),
        AccentTeal => ResolvedColor::rgb(13, 148, 136),
        AccentAmber => ResolvedColor::rgb(217, 119, 6),
        Particle => ResolvedColor::rgba(79, 70, 229, 60),

        CtaFill => ResolvedColor::rgb(50, 110, 220),
        CtaHover => ResolvedColor::rgb(40, 80, 180),
        CtaText => ResolvedColor::rgb(255, 255, 255),

        TooltipBackground => ResolvedColor::rgb(255, 255, 255),
        TooltipBorder => ResolvedColor::rgb(210, 210, 220),
        TooltipTitle => ResolvedColor::rgb(20, 20, 30),
        TooltipText => ResolvedColor::rgb(80, 80, 100),

        NavBackground => ResolvedColor::rgba(248, 248, 250, 235),
        NavBorder => ResolvedColor::rgb(225, 225, 232),
        NavText => ResolvedColor::rgb(60, 60, 70),
        NavTextHover => ResolvedColor::rgb(20, 20, 30),
        BadgeFill => ResolvedColor::rgb(147, 51, 234),
        BadgeText => ResolvedColor::rgb(255, 255, 255),
        DiscordFill => ResolvedColor::rgb(88, 101, 242),
        NotificationDot => ResolvedColor::rgb(211, 47, 47),
        SearchFill => ResolvedColor::rgb(240, 240, 245),

        MenuBackground => ResolvedColor::rgb(255, 255, 255),
        MenuBorder => ResolvedColor::rgb(210, 210, 220),
        MenuItemHover => ResolvedColor::rgba(0, 0, 0, 10),

        ScrollIndicator => ResolvedColor::rgb(120, 120, 135),
    }
}

/// Catppuccin Mocha dark visuals for the debug overlay.
pub fn dimli_dark_visuals() -> egui::Visuals {
    let mut v = egui::Visuals::dark();
    v.panel_fill = egui::Color32::from_rgb(0x11, 0x11, 0x1b);
    v.window_fill = egui::Color32::from_rgb(0x1e, 0x1e, 0x2e);
    v.extreme_bg_color = egui::Color32::from_rgb(0x11, 0x11, 0x1b);
    v.widgets.inactive.bg_fill = egui::Color32::from_rgb(0x45, 0x47, 0x5a);
    v.widgets.hovered.bg_fill = egui::Color32::from_rgb(0x58, 0x5b, 0x70);
    v.widgets.active.bg_fill = egui::Color32::from_rgb(0x89, 0xb4, 0xfa);
    v.window_corner_radius = egui::CornerRadius::same(6);
    v.hyperlink_color = egui::Color32::from_rgb(0x89, 0xb4, 0xfa);
    v
}

/// Light visuals for the debug overlay.
pub fn dimli_light_visuals() -> egui::Visuals {
    let mut v = egui::Visuals::light();
    v.panel_fill = egui::Color32::from_rgb(255, 255, 255);
    v.window_fill = egui::Color32::from_rgb(255, 255, 255);
    v.widgets.inactive.bg_fill = egui::Color32::from_rgb(230, 230, 235);
    v.widgets.hovered.bg_fill = egui::Color32::from_rgb(220, 220, 228);
    v.widgets.active.bg_fill = egui::Color32::from_rgb(50, 110, 220);
    v.window_corner_radius = egui::CornerRadius::same(6);
    v.hyperlink_color = egui::Color32::from_rgb(50, 110, 220);
    v
}

pub fn visuals(mode: ThemeMode) -> egui::Visuals {
    match mode {
        ThemeMode::Dark => dimli_dark_visuals(),
        ThemeMode::Light => dimli_light_visuals(),
    }
}
