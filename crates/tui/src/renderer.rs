use dimli_core::views::wrap_words;
use dimli_protocol::{HitTarget, RenderCommand, TextAlign, ThemeToken};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

/// Logical pixels per terminal column.
pub const CELL_W: f64 = 8.0;
/// Logical pixels per terminal row.
pub const CELL_H: f64 = 16.0;

/// Below this opacity nothing is drawn; cells have no partial alpha.
const VISIBLE_ALPHA: f64 = 0.4;
const TOOLTIP_MAX_COLS: usize = 36;

pub fn theme_to_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background => Color::Black,
        ThemeToken::BackgroundGlow => Color::Rgb(20, 18, 40),
        ThemeToken::Surface => Color::Rgb(24, 24, 37),
        ThemeToken::Border => Color::DarkGray,
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextSecondary => Color::Gray,
        ThemeToken::TextMuted => Color::DarkGray,
        ThemeToken::Caret => Color::LightBlue,
        ThemeToken::AccentIndigo => Color::Rgb(99, 102, 241),
        ThemeToken::AccentPurple => Color::Magenta,
        ThemeToken::AccentBlue => Color::Blue,
        ThemeToken::AccentPink => Color::LightMagenta,
        ThemeToken::AccentTeal => Color::Cyan,
        ThemeToken::AccentAmber => Color::Yellow,
        ThemeToken::Particle => Color::Rgb(129, 140, 248),
        ThemeToken::CtaFill => Color::Rgb(79, 70, 229),
        ThemeToken::CtaHover => Color::Rgb(67, 56, 202),
        ThemeToken::CtaText => Color::White,
        ThemeToken::TooltipBackground => Color::Rgb(30, 30, 46),
        ThemeToken::TooltipBorder => Color::LightBlue,
        ThemeToken::TooltipTitle => Color::White,
        ThemeToken::TooltipText => Color::Gray,
        ThemeToken::NavBackground => Color::Rgb(24, 24, 37),
        ThemeToken::NavBorder => Color::DarkGray,
        ThemeToken::NavText => Color::Gray,
        ThemeToken::NavTextHover => Color::White,
        ThemeToken::BadgeFill => Color::Magenta,
        ThemeToken::BadgeText => Color::White,
        ThemeToken::DiscordFill => Color::Rgb(88, 101, 242),
        ThemeToken::NotificationDot => Color::Red,
        ThemeToken::SearchFill => Color::Rgb(30, 30, 46),
        ThemeToken::MenuBackground => Color::Rgb(30, 30, 46),
        ThemeToken::MenuBorder => Color::DarkGray,
        ThemeToken::MenuItemHover => Color::Rgb(49, 50, 68),
        ThemeToken::ScrollIndicator => Color::Gray,
    }
}

/// Cells covered by something the pointer can interact with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellHit {
    pub area: Rect,
    pub target: HitTarget,
}

/// Topmost target at (`col`, `row`).
pub fn hit_test(hits: &[CellHit], col: u16, row: u16) -> Option<HitTarget> {
    hits.iter()
        .rev()
        .find(|h| {
            col >= h.area.x
                && col < h.area.x + h.area.width
                && row >= h.area.y
                && row < h.area.y + h.area.height
        })
        .map(|h| h.target)
}

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

    fn apply(&self, r: &dimli_protocol::Rect) -> dimli_protocol::Rect {
        dimli_protocol::Rect::new(
            r.x * self.sx + self.tx,
            r.y * self.sy + self.ty,
            r.w * self.sx,
            r.h * self.sy,
        )
    }

    fn apply_point(&self, p: &dimli_protocol::Point) -> (f64, f64) {
        (p.x * self.sx + self.tx, p.y * self.sy + self.ty)
    }
}

/// Rasterizes commands onto terminal cells. `origin` is the logical pixel
/// position of `area`'s top-left corner in command space.
struct CellPainter<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    origin: (f64, f64),
    clip: Rect,
}

impl CellPainter<'_> {
    fn col(&self, x: f64) -> i32 {
        i32::from(self.area.x) + ((x - self.origin.0) / CELL_W).floor() as i32
    }

    fn row(&self, y: f64) -> i32 {
        i32::from(self.area.y) + ((y - self.origin.1) / CELL_H).floor() as i32
    }

    /// Pixel rect to the cells it touches, clipped. `None` when empty.
    fn cells(&self, r: &dimli_protocol::Rect) -> Option<Rect> {
        let x0 = self.col(r.x);
        let y0 = self.row(r.y);
        let x1 = self.col(r.x + r.w - 0.01).max(x0) + 1;
        let y1 = self.row(r.y + r.h - 0.01).max(y0) + 1;
        clip_rect(x0, y0, x1, y1, self.clip)
    }

    fn fill(&mut self, rect: Rect, bg: Color) {
        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                if let Some(cell) = self.buf.cell_mut((x, y)) {
                    cell.set_char(' ').set_bg(bg);
                }
            }
        }
    }

    fn outline(&mut self, rect: Rect, fg: Color) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        Block::bordered()
            .border_style(Style::default().fg(fg))
            .render(rect, self.buf);
    }

    fn put(&mut self, col: i32, row: i32, ch: char, fg: Color) {
        let (Ok(x), Ok(y)) = (u16::try_from(col), u16::try_from(row)) else {
            return;
        };
        if !self.clip.contains((x, y).into()) {
            return;
        }
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(ch).set_fg(fg);
        }
    }

    fn text(&mut self, x: f64, center_y: f64, text: &str, align: TextAlign, fg: Color, caret: Option<Color>) {
        let lines: Vec<&str> = text.split('\n').collect();
        let first_row = self.row(center_y) - (lines.len() as i32 - 1) / 2;
        let anchor = self.col(x);
        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.iter().enumerate() {
            let len = line.chars().count() as i32;
            let start = match align {
                TextAlign::Left => anchor,
                TextAlign::Center => anchor - len / 2,
                TextAlign::Right => anchor - len,
            };
            let row = first_row + i as i32;
            for (j, ch) in line.chars().enumerate() {
                self.put(start + j as i32, row, ch, fg);
            }
            if i == last
                && let Some(caret) = caret
            {
                self.put(start + len, row, '▌', caret);
            }
        }
    }
}

fn clip_rect(x0: i32, y0: i32, x1: i32, y1: i32, clip: Rect) -> Option<Rect> {
    let cx0 = x0.max(i32::from(clip.left()));
    let cy0 = y0.max(i32::from(clip.top()));
    let cx1 = x1.min(i32::from(clip.right()));
    let cy1 = y1.min(i32::from(clip.bottom()));
    if cx1 <= cx0 || cy1 <= cy0 {
        return None;
    }
    Some(Rect::new(
        u16::try_from(cx0).ok()?,
        u16::try_from(cy0).ok()?,
        u16::try_from(cx1 - cx0).ok()?,
        u16::try_from(cy1 - cy0).ok()?,
    ))
}

/// Paint `commands` into `buf` within `area` and return the hit cells.
pub fn paint(buf: &mut Buffer, area: Rect, origin: (f64, f64), commands: &[RenderCommand]) -> Vec<CellHit> {
    let mut painter = CellPainter {
        buf,
        area,
        origin,
        clip: area,
    };
    let mut transform_stack = vec![Transform::identity()];
    let mut opacity_stack = vec![1.0_f64];
    let mut clip_stack: Vec<Rect> = Vec::new();
    let mut hits = Vec::new();

    for cmd in commands {
        let tf = transform_stack.last().copied().unwrap_or(Transform::identity());
        let visible = opacity_stack.last().copied().unwrap_or(1.0) >= VISIBLE_ALPHA;

        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                hit,
                ..
            } => {
                let Some(cells) = painter.cells(&tf.apply(rect)) else {
                    continue;
                };
                if let Some(target) = hit {
                    hits.push(CellHit {
                        area: cells,
                        target: *target,
                    });
                }
                if !visible {
                    continue;
                }
                painter.fill(cells, theme_to_color(*color));
                if let Some(border) = border_color {
                    painter.outline(cells, theme_to_color(*border));
                }
            }
            RenderCommand::DrawCircle { center, color, .. } => {
                if visible {
                    let (x, y) = tf.apply_point(center);
                    let (col, row) = (painter.col(x), painter.row(y));
                    painter.put(col, row, '•', theme_to_color(*color));
                }
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                align,
                caret,
                ..
            } => {
                if visible {
                    let (x, y) = tf.apply_point(position);
                    painter.text(
                        x,
                        y,
                        text,
                        *align,
                        theme_to_color(*color),
                        caret.then(|| theme_to_color(ThemeToken::Caret)),
                    );
                }
            }
            RenderCommand::DrawLine { from, to, color, .. } => {
                if !visible {
                    continue;
                }
                let (x0, y0) = tf.apply_point(from);
                let (x1, y1) = tf.apply_point(to);
                let fg = theme_to_color(*color);
                let (r0, r1) = (painter.row(y0), painter.row(y1));
                let (c0, c1) = (painter.col(x0), painter.col(x1));
                if r0 == r1 {
                    for col in c0.min(c1)..=c0.max(c1) {
                        painter.put(col, r0, '─', fg);
                    }
                } else if c0 == c1 {
                    for row in r0.min(r1)..=r0.max(r1) {
                        painter.put(c0, row, '│', fg);
                    }
                }
            }
            RenderCommand::DrawTooltip {
                target,
                anchor,
                title,
                body,
            } => {
                if !visible {
                    continue;
                }
                let inner = TOOLTIP_MAX_COLS - 4;
                let lines = wrap_words(body, inner);
                let widest = lines
                    .iter()
                    .map(|l| l.chars().count())
                    .chain(std::iter::once(title.chars().count()))
                    .max()
                    .unwrap_or(0);
                let cols = (widest + 4).min(TOOLTIP_MAX_COLS);
                let rows = lines.len() + 3;
                let placed = anchor.place(
                    &tf.apply(target),
                    cols as f64 * CELL_W,
                    rows as f64 * CELL_H,
                );
                let Some(cells) = painter.cells(&placed) else {
                    continue;
                };
                let mut text = vec![Line::from(Span::styled(
                    title.clone(),
                    Style::default().fg(theme_to_color(ThemeToken::TooltipTitle)),
                ))];
                text.extend(lines.into_iter().map(|l| {
                    Line::from(Span::styled(
                        l,
                        Style::default().fg(theme_to_color(ThemeToken::TooltipText)),
                    ))
                }));
                Clear.render(cells, painter.buf);
                Paragraph::new(Text::from(text))
                    .style(Style::default().bg(theme_to_color(ThemeToken::TooltipBackground)))
                    .block(
                        Block::bordered()
                            .border_style(Style::default().fg(theme_to_color(ThemeToken::TooltipBorder))),
                    )
                    .render(cells, painter.buf);
            }
            RenderCommand::SetClip { rect } => {
                clip_stack.push(painter.clip);
                let clipped = painter.cells(&tf.apply(rect)).unwrap_or_default();
                painter.clip = clipped;
            }
            RenderCommand::ClearClip => {
                if let Some(prev) = clip_stack.pop() {
                    painter.clip = prev;
                }
            }
            RenderCommand::PushTransform { translate, scale } => {
                transform_stack.push(Transform {
                    tx: tf.tx + translate.x * tf.sx,
                    ty: tf.ty + translate.y * tf.sy,
                    sx: tf.sx * scale.x,
                    sy: tf.sy * scale.y,
                });
            }
            RenderCommand::PopTransform => {
                if transform_stack.len() > 1 {
                    transform_stack.pop();
                }
            }
            RenderCommand::PushOpacity { alpha } => {
                let parent = opacity_stack.last().copied().unwrap_or(1.0);
                opacity_stack.push(parent * alpha.clamp(0.0, 1.0));
            }
            RenderCommand::PopOpacity => {
                if opacity_stack.len() > 1 {
                    opacity_stack.pop();
                }
            }
            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use dimli_protocol::{HorizontalAnchor, Point, TooltipAnchor, VerticalAnchor};

    fn rect(x: f64, y: f64, w: f64, h: f64) -> dimli_protocol::Rect {
        dimli_protocol::Rect::new(x, y, w, h)
    }

    fn row_text(buf: &Buffer, row: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, row)].symbol().to_string())
            .collect()
    }

    #[test]
    fn rect_hit_maps_to_cells() {
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        let cmds = vec![RenderCommand::DrawRect {
            rect: rect(16.0, 32.0, 32.0, 32.0),
            color: ThemeToken::CtaFill,
            border_color: None,
            corner_radius: 0.0,
            hit: Some(HitTarget::Cta),
        }];
        let hits = paint(&mut buf, area, (0.0, 0.0), &cmds);
        assert_eq!(hits, vec![CellHit { area: Rect::new(2, 2, 4, 2), target: HitTarget::Cta }]);
        assert_eq!(hit_test(&hits, 3, 3), Some(HitTarget::Cta));
        assert_eq!(hit_test(&hits, 6, 3), None);
    }

    #[test]
    fn centered_text_with_caret() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        let cmds = vec![RenderCommand::DrawText {
            position: Point::new(80.0, 24.0),
            text: "abcd".into(),
            color: ThemeToken::TextPrimary,
            font_size: 32.0,
            align: TextAlign::Center,
            caret: true,
        }];
        paint(&mut buf, area, (0.0, 0.0), &cmds);
        assert_eq!(row_text(&buf, 1).trim_end(), "        abcd▌");
    }

    #[test]
    fn faded_content_is_skipped_but_hits_remain() {
        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);
        let cmds = vec![
            RenderCommand::PushOpacity { alpha: 0.1 },
            RenderCommand::DrawRect {
                rect: rect(0.0, 0.0, 16.0, 16.0),
                color: ThemeToken::AccentTeal,
                border_color: None,
                corner_radius: 0.0,
                hit: Some(HitTarget::Icon(0)),
            },
            RenderCommand::PopOpacity,
        ];
        let hits = paint(&mut buf, area, (0.0, 0.0), &cmds);
        assert_eq!(hits.len(), 1);
        assert_eq!(buf[(0, 0)].bg, Color::Reset);
    }

    #[test]
    fn origin_scrolls_content() {
        let area = Rect::new(0, 1, 10, 4);
        let mut buf = Buffer::empty(Rect::new(0, 0, 10, 5));
        let cmds = vec![RenderCommand::DrawRect {
            rect: rect(0.0, 32.0, 8.0, 16.0),
            color: ThemeToken::CtaFill,
            border_color: None,
            corner_radius: 0.0,
            hit: Some(HitTarget::Cta),
        }];
        let hits = paint(&mut buf, area, (0.0, 16.0), &cmds);
        assert_eq!(hits[0].area, Rect::new(0, 2, 1, 1));
    }

    #[test]
    fn tooltip_is_drawn_inside_area() {
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        let cmds = vec![RenderCommand::DrawTooltip {
            target: rect(80.0, 32.0, 32.0, 32.0),
            anchor: TooltipAnchor {
                vertical: VerticalAnchor::Below,
                horizontal: HorizontalAnchor::LeftFlush,
                offset: 0.0,
            },
            title: "Models".into(),
            body: "Print ready".into(),
        }];
        paint(&mut buf, area, (0.0, 0.0), &cmds);
        assert!(row_text(&buf, 5).contains("Models"));
        assert!(row_text(&buf, 6).contains("Print ready"));
    }
}
