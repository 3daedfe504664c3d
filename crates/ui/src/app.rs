use std::time::Duration;

use dimli_core::views::nav::render_nav;
use dimli_core::{HeroConfig, HeroView, NavAction, ProfileMenu, StaticMetrics};
use dimli_protocol::{HitTarget, RenderCommand, Viewport};
use eframe::egui;

use crate::renderer::{self, RenderResult};
use crate::theme::{self, ThemeMode};

/// The landing page: sticky navigation over the hero, with one extra
/// screen of page below it so the parallax has somewhere to go.
pub struct HeroApp {
    hero: HeroView,
    menu: ProfileMenu,
    theme_mode: ThemeMode,
    /// Page scroll offset in pixels, clamped to the page height.
    scroll_y: f32,
    /// Section height last reported to the hero.
    section_height: f32,
    /// Hero viewport of the last painted frame.
    viewport: Viewport,
    /// Error message to display.
    error: Option<String>,
}

impl HeroApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: HeroConfig) -> Self {
        cc.egui_ctx.set_visuals(theme::visuals(ThemeMode::Dark));
        Self {
            hero: HeroView::new(config),
            menu: ProfileMenu::new(),
            theme_mode: ThemeMode::Dark,
            scroll_y: 0.0,
            section_height: 0.0,
            viewport: Viewport::new(0.0, 0.0),
            error: None,
        }
    }

    fn metrics(&self) -> StaticMetrics {
        StaticMetrics::new(f64::from(self.scroll_y), 0.0, f64::from(self.section_height))
    }

    /// Hero and nav commands for the current frame, in paint order.
    fn page_commands(&self, viewport: &Viewport, now: Duration) -> (Vec<RenderCommand>, Vec<RenderCommand>) {
        let hero = self.hero.render(viewport, now);
        let nav = render_nav(&self.hero.config().nav, &self.menu, viewport);
        (hero, nav)
    }

    fn update_hover(&mut self, hit: Option<HitTarget>, now: Duration) {
        let target = match hit {
            Some(HitTarget::Icon(index)) => Some(index),
            _ => None,
        };
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

    fn click(&mut self, ctx: &egui::Context, hit: Option<HitTarget>) {
        self.menu.pointer_down(hit);
        let config = self.hero.config();
        let href = match hit {
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
            Some(HitTarget::NavAction(i)) => match NavAction::from_index(i) {
                Some(NavAction::Discord) => Some(config.nav.discord_url.clone()),
                Some(action) => {
                    tracing::info!(action = action.label(), "nav action");
                    None
                }
                None => None,
            },
            Some(HitTarget::Icon(_) | HitTarget::ProfileMenu) | None => None,
        };
        if let Some(href) = href {
            tracing::info!(%href, "navigate");
            ctx.open_url(egui::OpenUrl::same_tab(href));
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn export_svg(&mut self, viewport: &Viewport, now: Duration) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG", &["svg"])
            .set_file_name("hero.svg")
            .save_file()
        else {
            return;
        };
        let (mut commands, nav) = self.page_commands(viewport, now);
        commands.extend(nav);
        let svg = dimli_core::svg::render_svg(
            &commands,
            viewport.width,
            viewport.height,
            self.theme_mode.is_dark(),
        );
        match std::fs::write(&path, svg) {
            Ok(()) => tracing::info!(path = %path.display(), "exported svg"),
            Err(e) => self.error = Some(format!("Failed to write {}: {e}", path.display())),
        }
    }
}

impl eframe::App for HeroApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Duration::from_secs_f64(ctx.input(|i| i.time).max(0.0));

        // Status bar
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let theme_label = match self.theme_mode {
                    ThemeMode::Dark => "Dark",
                    ThemeMode::Light => "Light",
                };
                if ui.button(theme_label).clicked() {
                    self.theme_mode = self.theme_mode.toggled();
                    ctx.set_visuals(theme::visuals(self.theme_mode));
                }
                if ui.button("Replay").clicked() {
                    self.hero.unmount();
                    self.hero.mount(now, &self.metrics());
                }
                #[cfg(not(target_arch = "wasm32"))]
                if ui.button("Export SVG").clicked() {
                    let viewport = self.viewport;
                    self.export_svg(&viewport, now);
                }
                ui.separator();
                if let Some(err) = &self.error {
                    ui.colored_label(egui::Color32::RED, err);
                } else {
                    ui.label(format!(
                        "scroll {:.0}px · progress {:.2} · {:?}",
                        self.scroll_y,
                        self.hero.progress(),
                        self.hero.typewriter().phase(),
                    ));
                }
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let available = ui.available_rect_before_wrap();
                let response = ui.allocate_rect(available, egui::Sense::click());

                let height = available.height();
                if !self.hero.is_mounted() {
                    self.section_height = height;
                    self.hero.mount(now, &self.metrics());
                } else if (height - self.section_height).abs() > f32::EPSILON {
                    self.section_height = height;
                    self.scroll_y = self.scroll_y.clamp(0.0, height);
                    self.hero.on_resize(&self.metrics());
                }

                let scroll = ui.input(|i| i.smooth_scroll_delta.y);
                if scroll != 0.0 && response.hovered() {
                    self.scroll_y = (self.scroll_y - scroll).clamp(0.0, self.section_height);
                    self.hero.on_scroll(&self.metrics());
                }

                self.hero.advance(now);

                let viewport = Viewport::new(f64::from(available.width()), f64::from(height));
                self.viewport = viewport;
                let (hero_cmds, nav_cmds) = self.page_commands(&viewport, now);

                let mut painter = ui.painter_at(available);
                let page_bg = theme::resolve(dimli_protocol::ThemeToken::Surface, self.theme_mode);
                painter.rect_filled(available, egui::CornerRadius::ZERO, page_bg);

                let hero_origin = egui::pos2(available.left(), available.top() - self.scroll_y);
                let hero_hits = renderer::render_commands(&mut painter, &hero_cmds, hero_origin, self.theme_mode);
                let nav_hits = renderer::render_commands(&mut painter, &nav_cmds, available.min, self.theme_mode);

                let hit = pointer_hit(ui, &nav_hits, &hero_hits);
                self.update_hover(hit, now);
                if hit.is_some() {
                    ctx.set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                if ui.input(|i| i.pointer.primary_pressed()) {
                    self.click(ctx, hit);
                }
            });

        // Particles and the scroll indicator never stop moving.
        ctx.request_repaint();
    }
}

impl Drop for HeroApp {
    fn drop(&mut self) {
        self.hero.unmount();
    }
}

/// The nav sits above the hero, so its regions win.
fn pointer_hit(ui: &egui::Ui, nav: &RenderResult, hero: &RenderResult) -> Option<HitTarget> {
    let pos = ui.input(|i| i.pointer.hover_pos())?;
    nav.hit_test(pos).or_else(|| hero.hit_test(pos))
}
