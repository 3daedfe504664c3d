use dimli_protocol::{HitTarget, Point, Rect, RenderCommand, TextAlign, ThemeToken, Viewport};

use crate::config::NavConfig;
use crate::nav::{NavAction, ProfileMenu};

use super::estimate_text_width;

/// Below this width the links and search box are hidden.
pub const COMPACT_WIDTH: f64 = 900.0;

const EDGE_PADDING: f64 = 24.0;
const BRAND_SIZE: f64 = 20.0;
const SMALL_TEXT: f64 = 12.0;
const LINK_TEXT: f64 = 14.0;
const LINK_GAP: f64 = 32.0;
const BUTTON_SIZE: f64 = 36.0;
const BUTTON_GAP: f64 = 8.0;
const SEARCH_WIDTH: f64 = 220.0;
const MENU_WIDTH: f64 = 192.0;
const MENU_ROW: f64 = 40.0;
const MENU_PADDING: f64 = 4.0;

/// Rects of the interactive parts of the bar.
#[derive(Debug, Clone, PartialEq)]
pub struct NavLayout {
    pub bar: Rect,
    pub links: Vec<Rect>,
    /// Indexed like [`NavAction::ALL`]. Hidden actions have no rect.
    pub actions: Vec<Option<Rect>>,
    pub profile: Rect,
    pub menu: Rect,
    pub menu_rows: Vec<Rect>,
}

impl NavLayout {
    pub fn compute(config: &NavConfig, viewport: &Viewport) -> Self {
        let bar = Rect::new(viewport.x, viewport.y, viewport.width, config.height);
        let compact = viewport.width < COMPACT_WIDTH;
        let mid_y = bar.center().y;
        let button = |right: f64| Rect::new(right - BUTTON_SIZE, mid_y - BUTTON_SIZE / 2.0, BUTTON_SIZE, BUTTON_SIZE);

        let mut right = bar.right() - EDGE_PADDING;
        let profile = button(right);
        right = profile.x - BUTTON_GAP;

        // Right to left: cart, notifications, upload, discord, search.
        let mut actions = vec![None; NavAction::ALL.len()];
        for (index, action) in NavAction::ALL.iter().enumerate().rev() {
            let rect = match action {
                NavAction::Search if compact => continue,
                NavAction::Search => Rect::new(right - SEARCH_WIDTH, mid_y - 18.0, SEARCH_WIDTH, 36.0),
                _ => button(right),
            };
            right = rect.x - BUTTON_GAP;
            actions[index] = Some(rect);
        }

        let links = if compact {
            Vec::new()
        } else {
            let widths: Vec<f64> = config
                .links
                .iter()
                .map(|l| estimate_text_width(&l.label, LINK_TEXT))
                .collect();
            let total = widths.iter().sum::<f64>() + LINK_GAP * widths.len().saturating_sub(1) as f64;
            let mut x = bar.center().x - total / 2.0;
            widths
                .iter()
                .map(|w| {
                    let rect = Rect::new(x, mid_y - 14.0, *w, 28.0);
                    x += w + LINK_GAP;
                    rect
                })
                .collect()
        };

        let menu_height = config.menu.len() as f64 * MENU_ROW + 2.0 * MENU_PADDING;
        let menu = Rect::new(profile.right() - MENU_WIDTH, bar.bottom() + 8.0, MENU_WIDTH, menu_height);
        let menu_rows = (0..config.menu.len())
            .map(|i| {
                Rect::new(
                    menu.x + MENU_PADDING,
                    menu.y + MENU_PADDING + i as f64 * MENU_ROW,
                    MENU_WIDTH - 2.0 * MENU_PADDING,
                    MENU_ROW,
                )
            })
            .collect();

        Self {
            bar,
            links,
            actions,
            profile,
            menu,
            menu_rows,
        }
    }
}

/// Render the navigation bar, plus the profile dropdown when open.
pub fn render_nav(config: &NavConfig, menu: &ProfileMenu, viewport: &Viewport) -> Vec<RenderCommand> {
    if viewport.width <= 0.0 || config.height <= 0.0 {
        return Vec::new();
    }
    let layout = NavLayout::compute(config, viewport);
    let bar = layout.bar;
    let mid_y = bar.center().y;
    let mut commands = Vec::new();

    commands.push(RenderCommand::BeginGroup {
        id: "nav".into(),
        label: Some("Navigation".into()),
    });
    commands.push(RenderCommand::DrawRect {
        rect: bar,
        color: ThemeToken::NavBackground,
        border_color: None,
        corner_radius: 0.0,
        hit: None,
    });
    commands.push(RenderCommand::DrawLine {
        from: Point::new(bar.x, bar.bottom()),
        to: Point::new(bar.right(), bar.bottom()),
        color: ThemeToken::NavBorder,
        width: 1.0,
    });

    // Brand, badge, version
    let mut x = bar.x + EDGE_PADDING;
    commands.push(text(Point::new(x, mid_y), &config.brand, ThemeToken::NavText, BRAND_SIZE, TextAlign::Left));
    x += estimate_text_width(&config.brand, BRAND_SIZE) + 8.0;
    if !config.badge.is_empty() {
        let w = estimate_text_width(&config.badge, SMALL_TEXT) + 12.0;
        let badge = Rect::new(x, mid_y - 10.0, w, 20.0);
        commands.push(RenderCommand::DrawRect {
            rect: badge,
            color: ThemeToken::BadgeFill,
            border_color: None,
            corner_radius: 10.0,
            hit: None,
        });
        commands.push(text(badge.center(), &config.badge, ThemeToken::BadgeText, SMALL_TEXT, TextAlign::Center));
        x += w + 6.0;
    }
    if !config.version.is_empty() {
        commands.push(text(Point::new(x, mid_y), &config.version, ThemeToken::TextMuted, SMALL_TEXT, TextAlign::Left));
    }

    for (index, (rect, link)) in layout.links.iter().zip(&config.links).enumerate() {
        commands.push(hit_area(*rect, HitTarget::NavLink(index)));
        commands.push(text(rect.center(), &link.label, ThemeToken::NavText, LINK_TEXT, TextAlign::Center));
    }

    for (index, rect) in layout.actions.iter().enumerate() {
        let (Some(rect), Some(action)) = (rect, NavAction::from_index(index)) else {
            continue;
        };
        render_action(&mut commands, config, action, index, *rect);
    }

    commands.push(RenderCommand::DrawRect {
        rect: layout.profile,
        color: ThemeToken::Surface,
        border_color: Some(if menu.is_open() {
            ThemeToken::AccentIndigo
        } else {
            ThemeToken::NavBorder
        }),
        corner_radius: BUTTON_SIZE / 2.0,
        hit: Some(HitTarget::ProfileButton),
    });
    commands.push(text(layout.profile.center(), "◉", ThemeToken::NavText, 16.0, TextAlign::Center));

    if menu.is_open() {
        render_menu(&mut commands, config, &layout);
    }

    commands.push(RenderCommand::EndGroup);
    commands
}

fn render_action(
    commands: &mut Vec<RenderCommand>,
    config: &NavConfig,
    action: NavAction,
    index: usize,
    rect: Rect,
) {
    let hit = Some(HitTarget::NavAction(index));
    match action {
        NavAction::Search => {
            commands.push(RenderCommand::DrawRect {
                rect,
                color: ThemeToken::SearchFill,
                border_color: Some(ThemeToken::NavBorder),
                corner_radius: rect.h / 2.0,
                hit,
            });
            commands.push(text(
                Point::new(rect.x + 14.0, rect.center().y),
                &config.search_placeholder,
                ThemeToken::TextMuted,
                LINK_TEXT,
                TextAlign::Left,
            ));
        }
        NavAction::Discord => {
            commands.push(RenderCommand::DrawRect {
                rect,
                color: ThemeToken::DiscordFill,
                border_color: None,
                corner_radius: 8.0,
                hit,
            });
            commands.push(text(rect.center(), "D", ThemeToken::CtaText, 16.0, TextAlign::Center));
        }
        NavAction::Upload | NavAction::Notifications | NavAction::Cart => {
            let glyph = match action {
                NavAction::Upload => "⇪",
                NavAction::Notifications => "♪",
                _ => "▣",
            };
            commands.push(RenderCommand::DrawRect {
                rect,
                color: ThemeToken::NavBackground,
                border_color: None,
                corner_radius: 8.0,
                hit,
            });
            commands.push(text(rect.center(), glyph, ThemeToken::NavText, 16.0, TextAlign::Center));
            if action == NavAction::Notifications {
                commands.push(RenderCommand::DrawCircle {
                    center: Point::new(rect.right() - 8.0, rect.y + 8.0),
                    radius: 4.0,
                    color: ThemeToken::NotificationDot,
                });
            }
        }
    }
}

fn render_menu(commands: &mut Vec<RenderCommand>, config: &NavConfig, layout: &NavLayout) {
    commands.push(RenderCommand::BeginGroup {
        id: "profile-menu".into(),
        label: Some("Profile menu".into()),
    });
    commands.push(RenderCommand::DrawRect {
        rect: layout.menu,
        color: ThemeToken::MenuBackground,
        border_color: Some(ThemeToken::MenuBorder),
        corner_radius: 8.0,
        hit: Some(HitTarget::ProfileMenu),
    });
    for (index, (row, item)) in layout.menu_rows.iter().zip(&config.menu).enumerate() {
        if item.separator_before {
            commands.push(RenderCommand::DrawLine {
                from: Point::new(row.x, row.y),
                to: Point::new(row.right(), row.y),
                color: ThemeToken::MenuBorder,
                width: 1.0,
            });
        }
        commands.push(hit_area(*row, HitTarget::MenuItem(index)));
        commands.push(text(
            Point::new(row.x + 12.0, row.center().y),
            &item.label,
            ThemeToken::NavText,
            LINK_TEXT,
            TextAlign::Left,
        ));
    }
    commands.push(RenderCommand::EndGroup);
}

fn text(position: Point, text: &str, color: ThemeToken, font_size: f64, align: TextAlign) -> RenderCommand {
    RenderCommand::DrawText {
        position,
        text: text.to_owned(),
        color,
        font_size,
        align,
        caret: false,
    }
}

/// A borderless rect that exists to carry a hit target.
fn hit_area(rect: Rect, hit: HitTarget) -> RenderCommand {
    RenderCommand::DrawRect {
        rect,
        color: ThemeToken::NavBackground,
        border_color: None,
        corner_radius: 6.0,
        hit: Some(hit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hits(cmds: &[RenderCommand]) -> Vec<HitTarget> {
        cmds.iter()
            .filter_map(|c| match c {
                RenderCommand::DrawRect { hit: Some(h), .. } => Some(*h),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn wide_bar_has_links_and_search() {
        let cmds = render_nav(&NavConfig::default(), &ProfileMenu::new(), &Viewport::new(1280.0, 800.0));
        let hits = hits(&cmds);
        for i in 0..4 {
            assert!(hits.contains(&HitTarget::NavLink(i)));
        }
        for i in 0..NavAction::ALL.len() {
            assert!(hits.contains(&HitTarget::NavAction(i)));
        }
        assert!(hits.contains(&HitTarget::ProfileButton));
        assert!(!hits.contains(&HitTarget::ProfileMenu));
    }

    #[test]
    fn compact_bar_hides_links_and_search() {
        let cmds = render_nav(&NavConfig::default(), &ProfileMenu::new(), &Viewport::new(600.0, 800.0));
        let hits = hits(&cmds);
        assert!(!hits.iter().any(|h| matches!(h, HitTarget::NavLink(_))));
        assert!(!hits.contains(&HitTarget::NavAction(0)));
        assert!(hits.contains(&HitTarget::NavAction(4)));
    }

    #[test]
    fn open_menu_lists_items_with_separator() {
        let mut menu = ProfileMenu::new();
        menu.toggle();
        let config = NavConfig::default();
        let cmds = render_nav(&config, &menu, &Viewport::new(1280.0, 800.0));
        let hits = hits(&cmds);
        assert!(hits.contains(&HitTarget::ProfileMenu));
        assert_eq!(
            hits.iter().filter(|h| matches!(h, HitTarget::MenuItem(_))).count(),
            config.menu.len()
        );
        let separators = config.menu.iter().filter(|m| m.separator_before).count();
        let lines = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawLine { color: ThemeToken::MenuBorder, .. }))
            .count();
        assert_eq!(lines, separators);
    }

    #[test]
    fn menu_hangs_under_profile_button() {
        let layout = NavLayout::compute(&NavConfig::default(), &Viewport::new(1280.0, 800.0));
        assert!((layout.menu.right() - layout.profile.right()).abs() < 1e-9);
        assert!(layout.menu.y > layout.bar.bottom());
        assert!((layout.menu.w - MENU_WIDTH).abs() < 1e-9);
        assert!(layout.profile.right() <= layout.bar.right());
    }

    #[test]
    fn actions_do_not_overlap() {
        let layout = NavLayout::compute(&NavConfig::default(), &Viewport::new(1280.0, 800.0));
        let rects: Vec<Rect> = layout.actions.iter().flatten().copied().collect();
        for pair in rects.windows(2) {
            assert!(pair[0].right() <= pair[1].x);
        }
        let last = rects.last().copied().unwrap_or_else(|| panic!("no actions"));
        assert!(last.right() <= layout.profile.x);
    }
}
