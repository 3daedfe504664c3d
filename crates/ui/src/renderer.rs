use egui::{CornerRadius, FontId, Pos2, Rect, Stroke, StrokeKind};
use dimli_core::views::{TOOLTIP_BODY_SIZE, TOOLTIP_MAX_WIDTH, TOOLTIP_PADDING, TOOLTIP_TITLE_SIZE};
use dimli_protocol::{HitTarget, RenderCommand, TextAlign, ThemeToken};

use crate::theme::{self, ThemeMode};

/// Transform state for PushTransform/PopTransform.
#[derive(Debug, Clone, Copy)]
struct Transform {
    tx: f64,
    ty: f64,
    sx: f64,
    sy: f64,
}

impl Transform {
    fn identity() -> Self {
        Self {
            tx: 0.0,
            ty: 0.0,
            sx: 1.0,
            sy: 1.0,
        }
    }

    fn apply_x(&self, x: f64) -> f32 {
        (x * self.sx + self.tx) as f32
    }

    fn apply_y(&self, y: f64) -> f32 {
        (y * self.sy + self.ty) as f32
    }

    fn scale_w(&self, w: f64) -> f32 {
        (w * self.sx) as f32
    }

    fn scale_h(&self, h: f64) -> f32 {
        (h * self.sy) as f32
    }
}

/// Screen area of something the pointer can interact with.
pub struct HitRegion {
    pub rect: Rect,
    pub target: HitTarget,
}

/// Result of rendering a command list: includes hit regions for interaction.
pub struct RenderResult {
    pub hit_regions: Vec<HitRegion>,
}

impl RenderResult {
    /// Topmost target under `pos`. Later regions are drawn over earlier ones.
    pub fn hit_test(&self, pos: Pos2) -> Option<HitTarget> {
        self.hit_regions
            .iter()
            .rev()
            .find(|r| r.rect.contains(pos))
            .map(|r| r.target)
    }
}

/// Render a list of `RenderCommand` into an egui `Painter`.
///
/// `offset` is the top-left pixel position of the rendering area.
/// Returns hit regions for click/hover interaction.
pub fn render_commands(
    painter: &mut egui::Painter,
    commands: &[RenderCommand],
    offset: Pos2,
    mode: ThemeMode,
) -> RenderResult {
    let mut transform_stack: Vec<Transform> = vec![Transform::identity()];
    let mut opacity_stack: Vec<f32> = vec![1.0];
    let mut clip_stack: Vec<Rect> = Vec::new();
    let mut hit_regions: Vec<HitRegion> = Vec::new();

    for cmd in commands {
        let tf = transform_stack
            .last()
            .copied()
            .unwrap_or(Transform::identity());
        let alpha = opacity_stack.last().copied().unwrap_or(1.0);
        let color = |token: ThemeToken| theme::fade(theme::resolve(token, mode), alpha);

        match cmd {
            RenderCommand::DrawRect {
                rect,
                color: fill,
                border_color,
                corner_radius,
                hit,
            } => {
                let x = tf.apply_x(rect.x) + offset.x;
                let y = tf.apply_y(rect.y) + offset.y;
                let w = tf.scale_w(rect.w);
                let h = tf.scale_h(rect.h);

                if w < 0.5 || h < 0.5 {
                    continue;
                }

                let egui_rect = Rect::from_min_size(Pos2::new(x, y), egui::vec2(w, h));

                // Recorded even when culled.
                if let Some(target) = hit {
                    hit_regions.push(HitRegion {
                        rect: egui_rect.intersect(painter.clip_rect()),
                        target: *target,
                    });
                }

                if !painter.clip_rect().intersects(egui_rect) || alpha <= 0.0 {
                    continue;
                }

                let radius = corner(*corner_radius * tf.sx.min(tf.sy));
                painter.rect_filled(egui_rect, radius, color(*fill));

                if let Some(bc) = border_color {
                    painter.rect_stroke(
                        egui_rect,
                        radius,
                        Stroke::new(1.0, color(*bc)),
                        StrokeKind::Inside,
                    );
                }
            }

            RenderCommand::DrawCircle {
                center,
                radius,
                color: fill,
            } => {
                let c = Pos2::new(tf.apply_x(center.x) + offset.x, tf.apply_y(center.y) + offset.y);
                let r = tf.scale_w(*radius);
                if r >= 0.25 && alpha > 0.0 {
                    painter.circle_filled(c, r, color(*fill));
                }
            }

            RenderCommand::DrawText {
                position,
                text,
                color: fill,
                font_size,
                align,
                caret,
            } => {
                let size = (*font_size * tf.sy) as f32;
                if size < 1.0 || alpha <= 0.0 {
                    continue;
                }
                let anchor = Pos2::new(
                    tf.apply_x(position.x) + offset.x,
                    tf.apply_y(position.y) + offset.y,
                );
                draw_text_block(
                    painter,
                    anchor,
                    text,
                    size,
                    *align,
                    color(*fill),
                    caret.then(|| color(ThemeToken::Caret)),
                );
            }

            RenderCommand::DrawLine {
                from,
                to,
                color: stroke,
                width,
            } => {
                let p1 = Pos2::new(tf.apply_x(from.x) + offset.x, tf.apply_y(from.y) + offset.y);
                let p2 = Pos2::new(tf.apply_x(to.x) + offset.x, tf.apply_y(to.y) + offset.y);
                painter.line_segment([p1, p2], Stroke::new(*width as f32, color(*stroke)));
            }

            RenderCommand::DrawTooltip {
                target,
                anchor,
                title,
                body,
            } => {
                if alpha <= 0.0 {
                    continue;
                }
                let pad = TOOLTIP_PADDING as f32;
                let title_galley = painter.layout_no_wrap(
                    title.clone(),
                    FontId::proportional(TOOLTIP_TITLE_SIZE as f32),
                    color(ThemeToken::TooltipTitle),
                );
                let body_galley = painter.layout(
                    body.clone(),
                    FontId::proportional(TOOLTIP_BODY_SIZE as f32),
                    color(ThemeToken::TooltipText),
                    TOOLTIP_MAX_WIDTH as f32 - 2.0 * pad,
                );
                let w = title_galley.size().x.max(body_galley.size().x) + 2.0 * pad;
                let h = title_galley.size().y + 4.0 + body_galley.size().y + 2.0 * pad;

                // Placement happens in screen space; the offset is never scaled.
                let screen_target = dimli_protocol::Rect::new(
                    f64::from(tf.apply_x(target.x) + offset.x),
                    f64::from(tf.apply_y(target.y) + offset.y),
                    f64::from(tf.scale_w(target.w)),
                    f64::from(tf.scale_h(target.h)),
                );
                let placed = anchor.place(&screen_target, f64::from(w), f64::from(h));
                let frame = Rect::from_min_size(
                    Pos2::new(placed.x as f32, placed.y as f32),
                    egui::vec2(w, h),
                );

                painter.rect_filled(frame, CornerRadius::same(8), color(ThemeToken::TooltipBackground));
                painter.rect_stroke(
                    frame,
                    CornerRadius::same(8),
                    Stroke::new(1.0, color(ThemeToken::TooltipBorder)),
                    StrokeKind::Inside,
                );
                let title_h = title_galley.size().y;
                let title_color = color(ThemeToken::TooltipTitle);
                let body_color = color(ThemeToken::TooltipText);
                painter.galley(frame.min + egui::vec2(pad, pad), title_galley, title_color);
                painter.galley(
                    frame.min + egui::vec2(pad, pad + title_h + 4.0),
                    body_galley,
                    body_color,
                );
            }

            RenderCommand::SetClip { rect } => {
                let x = tf.apply_x(rect.x) + offset.x;
                let y = tf.apply_y(rect.y) + offset.y;
                let w = tf.scale_w(rect.w);
                let h = tf.scale_h(rect.h);
                let clip_rect = Rect::from_min_size(Pos2::new(x, y), egui::vec2(w, h));
                clip_stack.push(painter.clip_rect());
                let intersected = painter.clip_rect().intersect(clip_rect);
                painter.set_clip_rect(intersected);
            }

            RenderCommand::ClearClip => {
                if let Some(prev) = clip_stack.pop() {
                    painter.set_clip_rect(prev);
                }
            }

            RenderCommand::PushTransform { translate, scale } => {
                let parent = tf;
                transform_stack.push(Transform {
                    tx: parent.tx + translate.x * parent.sx,
                    ty: parent.ty + translate.y * parent.sy,
                    sx: parent.sx * scale.x,
                    sy: parent.sy * scale.y,
                });
            }

            RenderCommand::PopTransform => {
                if transform_stack.len() > 1 {
                    transform_stack.pop();
                }
            }

            RenderCommand::PushOpacity { alpha: a } => {
                opacity_stack.push(alpha * (*a as f32).clamp(0.0, 1.0));
            }

            RenderCommand::PopOpacity => {
                if opacity_stack.len() > 1 {
                    opacity_stack.pop();
                }
            }

            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {
                // Groups are semantic, no visual effect in egui
            }
        }
    }

    RenderResult { hit_regions }
}

fn corner(radius: f64) -> CornerRadius {
    CornerRadius::same(radius.clamp(0.0, 255.0).round() as u8)
}

/// Draw `text` line by line around `anchor`, vertically centered on it.
fn draw_text_block(
    painter: &egui::Painter,
    anchor: Pos2,
    text: &str,
    size: f32,
    align: TextAlign,
    fill: egui::Color32,
    caret: Option<egui::Color32>,
) {
    let font = FontId::proportional(size);
    let galleys: Vec<_> = text
        .split('\n')
        .map(|line| painter.layout_no_wrap(line.to_owned(), font.clone(), fill))
        .collect();
    let line_h = galleys.first().map_or(size * 1.25, |g| g.size().y);
    let mut y = anchor.y - galleys.len() as f32 * line_h / 2.0;
    let mut caret_pos = Pos2::new(anchor.x, anchor.y);

    for galley in galleys {
        let width = galley.size().x;
        let x = match align {
            TextAlign::Left => anchor.x,
            TextAlign::Center => anchor.x - width / 2.0,
            TextAlign::Right => anchor.x - width,
        };
        caret_pos = Pos2::new(x + width + 2.0, y);
        painter.galley(Pos2::new(x, y), galley, fill);
        y += line_h;
    }

    if let Some(caret_color) = caret {
        let bar = Rect::from_min_size(caret_pos, egui::vec2((size / 12.0).max(2.0), line_h));
        painter.rect_filled(bar, CornerRadius::ZERO, caret_color);
    }
}
