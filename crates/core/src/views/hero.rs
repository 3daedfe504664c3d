use std::time::Duration;

use dimli_protocol::{
    HitTarget, Point, Rect, RenderCommand, TextAlign, ThemeToken, Viewport,
};

use crate::easing;
use crate::hero::HeroView;
use crate::typewriter::CaretTarget;

use super::estimate_text_width;

pub const ICON_SIZE: f64 = 56.0;
const ICON_RADIUS: f64 = 14.0;
const ICON_GLYPH_SIZE: f64 = 24.0;
const CTA_HEIGHT: f64 = 56.0;
const CTA_PADDING_X: f64 = 32.0;
const CTA_FONT_SIZE: f64 = 18.0;

const BACKGROUND_FADE: Duration = Duration::from_millis(1500);
const BACKGROUND_START_SCALE: f64 = 1.1;
const INDICATOR_DELAY: Duration = Duration::from_millis(1500);
const INDICATOR_FADE: Duration = Duration::from_millis(500);
const INDICATOR_HALF_PERIOD: Duration = Duration::from_secs(1);

/// Render the hero section into `viewport`.
///
/// Layers, back to front: background, particles, decorative icons, copy,
/// call to action, scroll indicator, and finally the tooltip of the hovered
/// icon so it is never covered.
pub fn render_hero(view: &HeroView, viewport: &Viewport, now: Duration) -> Vec<RenderCommand> {
    let area = viewport.rect();
    if area.w <= 0.0 || area.h <= 0.0 {
        return Vec::new();
    }
    let elapsed = view.elapsed(now);
    let mut commands = Vec::with_capacity(64 + view.icons().len() * 8);

    commands.push(RenderCommand::BeginGroup {
        id: "hero".into(),
        label: Some("Hero section".into()),
    });
    commands.push(RenderCommand::SetClip { rect: area });

    render_background(&mut commands, &area, elapsed);
    render_particles(&mut commands, view, &area, elapsed);
    render_icons(&mut commands, view, &area, now);
    render_copy(&mut commands, view, &area, now);
    render_cta(&mut commands, view, &area);
    render_scroll_indicator(&mut commands, &area, elapsed);
    render_tooltip(&mut commands, view, &area, now);

    commands.push(RenderCommand::ClearClip);
    commands.push(RenderCommand::EndGroup);
    commands
}

/// Screen rect of icon `index` after parallax, or `None` if it is hidden.
pub fn icon_rect(view: &HeroView, index: usize, area: &Rect, now: Duration) -> Option<Rect> {
    if !view.icon_visible(index, now) {
        return None;
    }
    let t = view.icon_transform(index)?;
    let size = ICON_SIZE * t.scale;
    Some(Rect::centered_at(t.position.to_point(area), size, size))
}

fn render_background(commands: &mut Vec<RenderCommand>, area: &Rect, elapsed: Duration) {
    commands.push(RenderCommand::DrawRect {
        rect: *area,
        color: ThemeToken::Background,
        border_color: None,
        corner_radius: 0.0,
        hit: None,
    });

    let t = easing::power3_out(easing::progress(elapsed, BACKGROUND_FADE));
    let scale = BACKGROUND_START_SCALE + (1.0 - BACKGROUND_START_SCALE) * t;
    commands.push(RenderCommand::PushOpacity { alpha: t });
    commands.push(RenderCommand::PushTransform {
        translate: area.center(),
        scale: Point::new(scale, scale),
    });
    commands.push(RenderCommand::DrawRect {
        rect: Rect::centered_at(Point::new(0.0, 0.0), area.w, area.h),
        color: ThemeToken::BackgroundGlow,
        border_color: None,
        corner_radius: 0.0,
        hit: None,
    });
    commands.push(RenderCommand::PopTransform);
    commands.push(RenderCommand::PopOpacity);
}

fn render_particles(
    commands: &mut Vec<RenderCommand>,
    view: &HeroView,
    area: &Rect,
    elapsed: Duration,
) {
    let field = view.particles();
    if field.particles().is_empty() {
        return;
    }
    commands.push(RenderCommand::BeginGroup {
        id: "particles".into(),
        label: None,
    });
    for particle in field.particles() {
        let base = particle.base.to_point(area);
        let offset = particle.offset(elapsed);
        commands.push(RenderCommand::DrawCircle {
            center: Point::new(base.x + offset.x, base.y + offset.y),
            radius: field.size() / 2.0,
            color: ThemeToken::Particle,
        });
    }
    commands.push(RenderCommand::EndGroup);
}

fn render_icons(commands: &mut Vec<RenderCommand>, view: &HeroView, area: &Rect, now: Duration) {
    for (index, icon) in view.icons().iter().enumerate() {
        if !view.icon_visible(index, now) {
            continue;
        }
        let Some(t) = view.icon_transform(index) else {
            continue;
        };
        let center = t.position.to_point(area);
        let hovered = view.hovered() == Some(index);

        commands.push(RenderCommand::BeginGroup {
            id: format!("icon-{}", icon.id),
            label: Some(icon.title.clone()),
        });
        commands.push(RenderCommand::PushOpacity {
            alpha: view.icon_opacity(index, now),
        });
        commands.push(RenderCommand::PushTransform {
            translate: center,
            scale: Point::new(t.scale, t.scale),
        });
        commands.push(RenderCommand::DrawRect {
            rect: Rect::centered_at(Point::new(0.0, 0.0), ICON_SIZE, ICON_SIZE),
            color: icon.accent,
            border_color: Some(if hovered {
                ThemeToken::TooltipBorder
            } else {
                ThemeToken::Border
            }),
            corner_radius: ICON_RADIUS,
            hit: Some(HitTarget::Icon(index)),
        });
        commands.push(RenderCommand::DrawText {
            position: Point::new(0.0, 0.0),
            text: icon.glyph.clone(),
            color: ThemeToken::TextPrimary,
            font_size: ICON_GLYPH_SIZE,
            align: TextAlign::Center,
            caret: false,
        });
        commands.push(RenderCommand::PopTransform);
        commands.push(RenderCommand::PopOpacity);
        commands.push(RenderCommand::EndGroup);
    }
}

pub fn title_font_size(area: &Rect) -> f64 {
    (area.w / 16.0).clamp(28.0, 72.0)
}

pub fn subtitle_font_size(area: &Rect) -> f64 {
    (area.w / 50.0).clamp(14.0, 24.0)
}

fn render_copy(commands: &mut Vec<RenderCommand>, view: &HeroView, area: &Rect, now: Duration) {
    let typewriter = view.typewriter();
    let caret = view.visible_caret(now);
    let cx = area.center().x;

    commands.push(RenderCommand::DrawText {
        position: Point::new(cx, area.y + area.h * 0.36),
        text: typewriter.primary_text().to_owned(),
        color: ThemeToken::TextPrimary,
        font_size: title_font_size(area),
        align: TextAlign::Center,
        caret: caret == Some(CaretTarget::Primary),
    });
    commands.push(RenderCommand::DrawText {
        position: Point::new(cx, area.y + area.h * 0.56),
        text: typewriter.secondary_text().to_owned(),
        color: ThemeToken::TextSecondary,
        font_size: subtitle_font_size(area),
        align: TextAlign::Center,
        caret: caret == Some(CaretTarget::Secondary),
    });
}

/// Rect of the call-to-action button.
pub fn cta_rect(view: &HeroView, area: &Rect) -> Rect {
    let label = &view.config().content.cta_label;
    let w = estimate_text_width(label, CTA_FONT_SIZE) + 2.0 * CTA_PADDING_X;
    Rect::centered_at(
        Point::new(area.center().x, area.y + area.h * 0.72),
        w,
        CTA_HEIGHT,
    )
}

fn render_cta(commands: &mut Vec<RenderCommand>, view: &HeroView, area: &Rect) {
    let rect = cta_rect(view, area);
    commands.push(RenderCommand::DrawRect {
        rect,
        color: ThemeToken::CtaFill,
        border_color: None,
        corner_radius: 8.0,
        hit: Some(HitTarget::Cta),
    });
    commands.push(RenderCommand::DrawText {
        position: rect.center(),
        text: view.config().content.cta_label.clone(),
        color: ThemeToken::CtaText,
        font_size: CTA_FONT_SIZE,
        align: TextAlign::Center,
        caret: false,
    });
}

fn render_scroll_indicator(commands: &mut Vec<RenderCommand>, area: &Rect, elapsed: Duration) {
    let Some(since) = elapsed.checked_sub(INDICATOR_DELAY) else {
        return;
    };
    let alpha = easing::progress(since, INDICATOR_FADE);
    let wave = easing::cubic_in_out(easing::yoyo(elapsed, INDICATOR_HALF_PERIOD));

    let shell = Rect::new(
        area.center().x - 12.0,
        area.bottom() - 32.0 - 40.0 + wave * 10.0,
        24.0,
        40.0,
    );
    let dot = Rect::new(shell.center().x - 2.0, shell.y + 8.0 + wave * 12.0, 4.0, 12.0);

    commands.push(RenderCommand::PushOpacity { alpha });
    commands.push(RenderCommand::DrawRect {
        rect: shell,
        color: ThemeToken::Background,
        border_color: Some(ThemeToken::ScrollIndicator),
        corner_radius: 12.0,
        hit: None,
    });
    commands.push(RenderCommand::DrawRect {
        rect: dot,
        color: ThemeToken::ScrollIndicator,
        border_color: None,
        corner_radius: 2.0,
        hit: None,
    });
    commands.push(RenderCommand::PopOpacity);
}

fn render_tooltip(commands: &mut Vec<RenderCommand>, view: &HeroView, area: &Rect, now: Duration) {
    let Some(index) = view.hovered() else {
        return;
    };
    let (Some(icon), Some(target), Some(anchor)) = (
        view.icons().get(index),
        icon_rect(view, index, area, now),
        view.tooltip_placement(index),
    ) else {
        return;
    };
    commands.push(RenderCommand::PushOpacity {
        alpha: view.tooltip_opacity(now),
    });
    commands.push(RenderCommand::BeginGroup {
        id: "tooltip".into(),
        label: Some(icon.title.clone()),
    });
    commands.push(RenderCommand::DrawTooltip {
        target,
        anchor,
        title: icon.title.clone(),
        body: icon.description.clone(),
    });
    commands.push(RenderCommand::EndGroup);
    commands.push(RenderCommand::PopOpacity);
}
