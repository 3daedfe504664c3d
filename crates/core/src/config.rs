//! Static configuration for the landing page: copy, timings, parallax
//! factors, tooltip thresholds, the decorative icon list and navigation.
//!
//! Every section is optional in TOML; missing sections and fields fall back
//! to the built-in landing content.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dimli_protocol::{NormalizedPos, ThemeToken};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("icon `{id}` is positioned outside 0..=100% ({x}, {y})")]
    IconOutOfBounds { id: String, x: f64, y: f64 },
    #[error("duplicate icon id `{0}`")]
    DuplicateIcon(String),
    #[error("{name} must be within 0.0..=1.0, got {value}")]
    FactorOutOfRange { name: &'static str, value: f64 },
    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),
    #[error("tooltip thresholds must satisfy 0 <= left <= right <= 100 and 0 <= top <= 100")]
    Thresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroConfig {
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub typing: TypingConfig,
    #[serde(default)]
    pub parallax: ParallaxConfig,
    #[serde(default)]
    pub tooltip: TooltipConfig,
    #[serde(default = "default_icons")]
    pub icons: Vec<DecorativeIcon>,
    #[serde(default)]
    pub particles: ParticleConfig,
    #[serde(default)]
    pub nav: NavConfig,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            content: ContentConfig::default(),
            typing: TypingConfig::default(),
            parallax: ParallaxConfig::default(),
            tooltip: TooltipConfig::default(),
            icons: default_icons(),
            particles: ParticleConfig::default(),
            nav: NavConfig::default(),
        }
    }
}

impl HeroConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            icons = config.icons.len(),
            "loaded hero config"
        );
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.typing.title_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("typing.title_interval_ms"));
        }
        if self.typing.subtitle_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval("typing.subtitle_interval_ms"));
        }
        if self.typing.caret_period_ms == 0 {
            return Err(ConfigError::ZeroInterval("typing.caret_period_ms"));
        }

        check_factor("parallax.damping", self.parallax.damping)?;
        check_factor("parallax.shrink", self.parallax.shrink)?;
        if !self.parallax.center().is_in_bounds() {
            return Err(ConfigError::IconOutOfBounds {
                id: "parallax.center".into(),
                x: self.parallax.center_x,
                y: self.parallax.center_y,
            });
        }

        let t = &self.tooltip;
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        if !(in_range(t.top_threshold)
            && in_range(t.left_threshold)
            && in_range(t.right_threshold)
            && t.left_threshold <= t.right_threshold)
        {
            return Err(ConfigError::Thresholds);
        }

        let mut seen = HashSet::new();
        for icon in &self.icons {
            if !icon.position().is_in_bounds() {
                return Err(ConfigError::IconOutOfBounds {
                    id: icon.id.clone(),
                    x: icon.x,
                    y: icon.y,
                });
            }
            if !seen.insert(icon.id.as_str()) {
                return Err(ConfigError::DuplicateIcon(icon.id.clone()));
            }
        }
        Ok(())
    }
}

fn check_factor(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::FactorOutOfRange { name, value })
    }
}

/// Display copy for the hero and page metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_subtitle")]
    pub subtitle: String,
    #[serde(default = "default_cta_label")]
    pub cta_label: String,
    #[serde(default = "default_cta_href")]
    pub cta_href: String,
    #[serde(default = "default_page_title")]
    pub page_title: String,
    #[serde(default = "default_page_description")]
    pub page_description: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            subtitle: default_subtitle(),
            cta_label: default_cta_label(),
            cta_href: default_cta_href(),
            page_title: default_page_title(),
            page_description: default_page_description(),
        }
    }
}

/// Typewriter timings, all in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypingConfig {
    /// Delay between mount and the first title character.
    #[serde(default = "default_start_delay_ms")]
    pub start_delay_ms: u64,
    #[serde(default = "default_title_interval_ms")]
    pub title_interval_ms: u64,
    /// Pause between the completed title and the first subtitle character.
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
    #[serde(default = "default_subtitle_interval_ms")]
    pub subtitle_interval_ms: u64,
    /// Full on/off cycle of the caret.
    #[serde(default = "default_caret_period_ms")]
    pub caret_period_ms: u64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: default_start_delay_ms(),
            title_interval_ms: default_title_interval_ms(),
            pause_ms: default_pause_ms(),
            subtitle_interval_ms: default_subtitle_interval_ms(),
            caret_period_ms: default_caret_period_ms(),
        }
    }
}

impl TypingConfig {
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    pub fn title_interval(&self) -> Duration {
        Duration::from_millis(self.title_interval_ms)
    }

    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }

    pub fn subtitle_interval(&self) -> Duration {
        Duration::from_millis(self.subtitle_interval_ms)
    }

    pub fn caret_period(&self) -> Duration {
        Duration::from_millis(self.caret_period_ms)
    }
}

/// Scroll-linked parallax of the decorative icons.
///
/// `adjusted = origin + (center - origin) * progress * damping` and
/// `scale = 1 - progress * shrink`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallaxConfig {
    #[serde(default = "default_center")]
    pub center_x: f64,
    #[serde(default = "default_center")]
    pub center_y: f64,
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_shrink")]
    pub shrink: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            center_x: default_center(),
            center_y: default_center(),
            damping: default_damping(),
            shrink: default_shrink(),
        }
    }
}

impl ParallaxConfig {
    pub fn center(&self) -> NormalizedPos {
        NormalizedPos::new(self.center_x, self.center_y)
    }
}

/// Tooltip edge-avoidance thresholds (percent of the section) and styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipConfig {
    /// Icons above this y% get their tooltip below them.
    #[serde(default = "default_edge_threshold")]
    pub top_threshold: f64,
    /// Icons left of this x% get a left-flush tooltip.
    #[serde(default = "default_edge_threshold")]
    pub left_threshold: f64,
    /// Icons right of this x% get a right-flush tooltip.
    #[serde(default = "default_right_threshold")]
    pub right_threshold: f64,
    /// Gap between icon and tooltip, in logical px.
    #[serde(default = "default_tooltip_offset")]
    pub offset: f64,
    #[serde(default = "default_fade_ms")]
    pub fade_ms: u64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            top_threshold: default_edge_threshold(),
            left_threshold: default_edge_threshold(),
            right_threshold: default_right_threshold(),
            offset: default_tooltip_offset(),
            fade_ms: default_fade_ms(),
        }
    }
}

impl TooltipConfig {
    pub fn fade(&self) -> Duration {
        Duration::from_millis(self.fade_ms)
    }
}

/// A floating icon in the hero backdrop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecorativeIcon {
    pub id: String,
    /// Horizontal position, percent of the section width.
    pub x: f64,
    /// Vertical position, percent of the section height.
    pub y: f64,
    #[serde(default)]
    pub display_delay_ms: u64,
    pub title: String,
    pub description: String,
    #[serde(default = "default_glyph")]
    pub glyph: String,
    #[serde(default = "default_accent")]
    pub accent: ThemeToken,
}

impl DecorativeIcon {
    pub fn position(&self) -> NormalizedPos {
        NormalizedPos::new(self.x, self.y)
    }

    pub fn display_delay(&self) -> Duration {
        Duration::from_millis(self.display_delay_ms)
    }
}

/// Ambient particles drifting behind the copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleConfig {
    #[serde(default = "default_particle_count")]
    pub count: usize,
    /// Particle diameter in logical px.
    #[serde(default = "default_particle_size")]
    pub size: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: default_particle_count(),
            size: default_particle_size(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    pub href: String,
    /// Draw a divider above this entry.
    #[serde(default)]
    pub separator_before: bool,
}

/// Sticky navigation bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavConfig {
    #[serde(default = "default_brand")]
    pub brand: String,
    #[serde(default = "default_badge")]
    pub badge: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_links")]
    pub links: Vec<NavLink>,
    #[serde(default = "default_search_placeholder")]
    pub search_placeholder: String,
    #[serde(default = "default_discord_url")]
    pub discord_url: String,
    #[serde(default = "default_menu")]
    pub menu: Vec<MenuItem>,
    /// Bar height in logical px.
    #[serde(default = "default_nav_height")]
    pub height: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            brand: default_brand(),
            badge: default_badge(),
            version: default_version(),
            links: default_links(),
            search_placeholder: default_search_placeholder(),
            discord_url: default_discord_url(),
            menu: default_menu(),
            height: default_nav_height(),
        }
    }
}

// Default value functions

fn default_title() -> String {
    "Discover, Buy, and Sell\nDigital Products".into()
}

fn default_subtitle() -> String {
    "Your one-stop digital platform for 3D models and digital creations.\nJoin our community of creators and collectors today.".into()
}

fn default_cta_label() -> String {
    "Explore all products".into()
}

fn default_cta_href() -> String {
    "/products".into()
}

fn default_page_title() -> String {
    "3DIMLI - Your One-Stop Digital Platform for 3D Models".into()
}

fn default_page_description() -> String {
    "Join our community of creators and collectors today".into()
}

fn default_start_delay_ms() -> u64 {
    800
}

fn default_title_interval_ms() -> u64 {
    100
}

fn default_pause_ms() -> u64 {
    500
}

fn default_subtitle_interval_ms() -> u64 {
    50
}

fn default_caret_period_ms() -> u64 {
    1000
}

fn default_center() -> f64 {
    50.0
}

fn default_damping() -> f64 {
    0.8
}

fn default_shrink() -> f64 {
    0.3
}

fn default_edge_threshold() -> f64 {
    30.0
}

fn default_right_threshold() -> f64 {
    70.0
}

fn default_tooltip_offset() -> f64 {
    12.0
}

fn default_fade_ms() -> u64 {
    200
}

fn default_glyph() -> String {
    "◆".into()
}

fn default_accent() -> ThemeToken {
    ThemeToken::AccentIndigo
}

fn default_particle_count() -> usize {
    6
}

fn default_particle_size() -> f64 {
    8.0
}

fn default_brand() -> String {
    "3DIMLI".into()
}

fn default_badge() -> String {
    "BETA".into()
}

fn default_version() -> String {
    "2.0.0".into()
}

fn default_search_placeholder() -> String {
    "Search...".into()
}

fn default_discord_url() -> String {
    "https://discord.com/invite/d48csuWe46".into()
}

fn default_nav_height() -> f64 {
    64.0
}

fn link(label: &str, href: &str) -> NavLink {
    NavLink {
        label: label.into(),
        href: href.into(),
    }
}

fn default_links() -> Vec<NavLink> {
    vec![
        link("Home", "/"),
        link("Discover", "/discover"),
        link("Features", "/features"),
        link("Pricing", "/pricing"),
    ]
}

fn default_menu() -> Vec<MenuItem> {
    let item = |label: &str, href: &str, separator_before| MenuItem {
        label: label.into(),
        href: href.into(),
        separator_before,
    };
    vec![
        item("My Profile", "/profile", false),
        item("Settings", "/settings", false),
        item("My Orders", "/orders", false),
        item("Logout", "/logout", true),
    ]
}

fn default_icons() -> Vec<DecorativeIcon> {
    let icon = |id: &str, x, y, delay, title: &str, description: &str, glyph: &str, accent| {
        DecorativeIcon {
            id: id.into(),
            x,
            y,
            display_delay_ms: delay,
            title: title.into(),
            description: description.into(),
            glyph: glyph.into(),
            accent,
        }
    };
    vec![
        icon(
            "models",
            12.0,
            18.0,
            200,
            "3D Models",
            "Thousands of ready-to-use meshes for games, film and print.",
            "◆",
            ThemeToken::AccentIndigo,
        ),
        icon(
            "textures",
            84.0,
            16.0,
            400,
            "Textures & Materials",
            "PBR materials and seamless textures for any render engine.",
            "▦",
            ThemeToken::AccentPurple,
        ),
        icon(
            "animations",
            8.0,
            62.0,
            600,
            "Animations",
            "Rigged characters and motion-capture clips.",
            "▶",
            ThemeToken::AccentBlue,
        ),
        icon(
            "printing",
            90.0,
            66.0,
            800,
            "3D Printing",
            "Print-ready STL files checked for manifold geometry.",
            "▲",
            ThemeToken::AccentPink,
        ),
        icon(
            "game-assets",
            52.0,
            10.0,
            1000,
            "Game Assets",
            "Low-poly kits, props and environments for your next game.",
            "●",
            ThemeToken::AccentTeal,
        ),
        icon(
            "creators",
            64.0,
            84.0,
            1200,
            "Creators",
            "Sell your work and keep the majority of every sale.",
            "★",
            ThemeToken::AccentAmber,
        ),
    ]
}
