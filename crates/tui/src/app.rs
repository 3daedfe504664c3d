use std::time::Duration;

use dimli_core::views::nav::render_nav;
use dimli_core::{HeroConfig, HeroView, NavAction, ProfileMenu, StaticMetrics};
use dimli_protocol::{HitTarget, ThemeToken, Viewport};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Paragraph},
};

use crate::renderer::{self, CELL_H, CELL_W, CellHit};

const SCROLL_STEP: f64 = 48.0;

/// Terminal page state: the hero, the profile menu and the scroll offset.
pub struct App {
    hero: HeroView,
    menu: ProfileMenu,
    scroll_y: f64,
    section_height: f64,
    hits: Vec<CellHit>,
    last_action: Option<String>,
}

impl App {
    pub fn new(config: HeroConfig) -> Self {
        Self {
            hero: HeroView::new(config),
            menu: ProfileMenu::new(),
            scroll_y: 0.0,
            section_height: 0.0,
            hits: Vec::new(),
            last_action: None,
        }
    }

    pub fn hero(&self) -> &HeroView {
        &self.hero
    }

    fn metrics(&self) -> StaticMetrics {
        StaticMetrics::new(self.scroll_y, 0.0, self.section_height)
    }

    pub fn mount(&mut self, now: Duration, section_height: f64) {
        self.section_height = section_height;
        self.hero.mount(now, &self.metrics());
    }

    pub fn unmount(&mut self) {
        self.hero.unmount();
        self.menu.close();
    }

    pub fn resize(&mut self, section_height: f64) {
        if (section_height - self.section_height).abs() < f64::EPSILON {
            return;
        }
        self.section_height = section_height;
        self.scroll_y = self.scroll_y.clamp(0.0, section_height);
        self.hero.on_resize(&self.metrics());
    }

    /// Scroll by `steps` (negative is up). The page is two sections tall.
    pub fn scroll(&mut self, steps: f64) {
        self.scroll_y = (self.scroll_y + steps * SCROLL_STEP).clamp(0.0, self.section_height);
        self.hero.on_scroll(&self.metrics());
    }

    pub fn advance(&mut self, now: Duration) -> bool {
        self.hero.advance(now)
    }

    /// Move hover to the next visible icon, wrapping around.
    pub fn cycle_hover(&mut self, now: Duration) {
        let count = self.hero.icons().len();
        let start = self.hero.hovered().map_or(0, |i| i + 1);
        let next = (0..count)
            .map(|k| (start + k) % count)
            .find(|&i| self.hero.icon_visible(i, now));
        self.set_hover(next, now);
    }

    /// Esc: close the menu first, then drop hover.
    pub fn escape(&mut self) {
        if !self.menu.close() {
            self.set_hover(None, Duration::ZERO);
        }
    }

    pub fn toggle_menu(&mut self) {
        self.menu.toggle();
    }

    fn set_hover(&mut self, target: Option<usize>, now: Duration) {
        let current = self.hero.hovered();
        if current == target {
            return;
        }
        if let Some(index) = current {
            self.hero.pointer_leave(index);
        }
        if let Some(index) = target {
            self.hero.pointer_enter(index, now);
        }
    }

    pub fn pointer_moved(&mut self, col: u16, row: u16, now: Duration) {
        let target = match renderer::hit_test(&self.hits, col, row) {
            Some(HitTarget::Icon(index)) => Some(index),
            _ => None,
        };
        self.set_hover(target, now);
    }

    pub fn pointer_down(&mut self, col: u16, row: u16) {
        let hit = renderer::hit_test(&self.hits, col, row);
        self.menu.pointer_down(hit);
        let config = self.hero.config();
        let action = match hit {
            Some(HitTarget::ProfileButton) => {
                self.menu.toggle();
                None
            }
            Some(HitTarget::Cta) => Some(config.content.cta_href.clone()),
            Some(HitTarget::NavLink(i)) => config.nav.links.get(i).map(|l| l.href.clone()),
            Some(HitTarget::MenuItem(i)) => {
                let href = config.nav.menu.get(i).map(|m| m.href.clone());
                self.menu.close();
                href
            }
            Some(HitTarget::NavAction(i)) => NavAction::from_index(i).map(|a| a.label().to_owned()),
            _ => None,
        };
        if let Some(action) = action {
            tracing::info!(%action, "activated");
            self.last_action = Some(action);
        }
    }

    pub fn draw(&mut self, frame: &mut Frame, now: Duration) {
        let area = frame.area();
        let header = Rect::new(area.x, area.y, area.width, 1);
        let status = Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1);
        let page = Rect::new(area.x, area.y + 1, area.width, area.height.saturating_sub(2));

        frame.render_widget(
            Block::default()
                .title(format!(" {} ", self.hero.config().content.page_title))
                .style(Style::default().fg(Color::White).bg(Color::DarkGray)),
            header,
        );

        let viewport = Viewport::new(
            f64::from(page.width) * CELL_W,
            f64::from(page.height) * CELL_H,
        );
        let hero_cmds = self.hero.render(&viewport, now);
        let nav_cmds = render_nav(&self.hero.config().nav, &self.menu, &viewport);

        let buf = frame.buffer_mut();
        let background = renderer::theme_to_color(ThemeToken::Background);
        for y in page.top()..page.bottom() {
            for x in page.left()..page.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(' ').set_bg(background);
                }
            }
        }
        let mut hits = renderer::paint(buf, page, (0.0, self.scroll_y), &hero_cmds);
        hits.extend(renderer::paint(buf, page, (0.0, 0.0), &nav_cmds));
        self.hits = hits;

        let line = format!(
            " ↑↓ scroll | tab hover | p menu | esc close | q quit   progress {:.2}  {:?}{}",
            self.hero.progress(),
            self.hero.typewriter().phase(),
            self.last_action
                .as_deref()
                .map(|a| format!("  → {a}"))
                .unwrap_or_default(),
        );
        frame.render_widget(
            Paragraph::new(line).style(Style::default().fg(Color::Gray).bg(Color::Black)),
            status,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn tab_cycles_visible_icons() {
        let mut app = App::new(HeroConfig::default());
        app.mount(ms(0), 640.0);
        // Icons 0 and 1 are visible at 500ms.
        app.cycle_hover(ms(500));
        assert_eq!(app.hero().hovered(), Some(0));
        app.cycle_hover(ms(500));
        assert_eq!(app.hero().hovered(), Some(1));
        app.cycle_hover(ms(500));
        assert_eq!(app.hero().hovered(), Some(0));
    }

    #[test]
    fn escape_closes_menu_before_hover() {
        let mut app = App::new(HeroConfig::default());
        app.mount(ms(0), 640.0);
        app.cycle_hover(ms(5_000));
        app.toggle_menu();
        app.escape();
        assert_eq!(app.hero().hovered(), Some(0));
        app.escape();
        assert_eq!(app.hero().hovered(), None);
    }

    #[test]
    fn scroll_is_clamped_to_section() {
        let mut app = App::new(HeroConfig::default());
        app.mount(ms(0), 640.0);
        app.scroll(-3.0);
        assert_eq!(app.hero().progress(), 0.0);
        app.scroll(100.0);
        assert!((app.hero().progress() - 1.0).abs() < 1e-12);
    }
}
