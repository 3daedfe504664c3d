//! SVG renderer: converts `RenderCommand` lists into standalone SVG strings.

use dimli_protocol::{RenderCommand, TextAlign, ThemeToken};

use crate::views::{
    LINE_HEIGHT, TOOLTIP_BODY_SIZE, TOOLTIP_MAX_WIDTH, TOOLTIP_PADDING, TOOLTIP_TITLE_SIZE,
    chars_per_line, estimate_tooltip_size, wrap_words,
};

/// Render a list of commands as an SVG document string.
///
/// `width` and `height` define the SVG viewBox dimensions.
/// `dark` selects the color palette.
pub fn render_svg(commands: &[RenderCommand], width: f64, height: f64, dark: bool) -> String {
    let mut svg = String::with_capacity(commands.len() * 160);
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" width="{width}" height="{height}" style="font-family:system-ui,-apple-system,sans-serif">"#,
    ));
    svg.push_str(&format!(
        r#"<rect width="{width}" height="{height}" fill="{}"/>"#,
        resolve_color(ThemeToken::Background, dark)
    ));

    let mut clips = 0usize;
    // Every push opens exactly one <g>; pops close one. Unbalanced pops are
    // ignored so a malformed list never produces invalid markup.
    let mut open_groups = 0usize;
    let mut clip_open = false;

    for cmd in commands {
        match cmd {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                corner_radius,
                ..
            } => {
                svg.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{corner_radius}" fill="{}""#,
                    rect.x,
                    rect.y,
                    rect.w,
                    rect.h,
                    resolve_color(*color, dark),
                ));
                if let Some(border) = border_color {
                    svg.push_str(&format!(r#" stroke="{}" stroke-width="1""#, resolve_color(*border, dark)));
                }
                svg.push_str("/>");
            }
            RenderCommand::DrawCircle {
                center,
                radius,
                color,
            } => {
                svg.push_str(&format!(
                    r#"<circle cx="{}" cy="{}" r="{radius}" fill="{}"/>"#,
                    center.x,
                    center.y,
                    resolve_color(*color, dark),
                ));
            }
            RenderCommand::DrawLine {
                from,
                to,
                color,
                width: line_width,
            } => {
                svg.push_str(&format!(
                    r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{line_width}"/>"#,
                    from.x,
                    from.y,
                    to.x,
                    to.y,
                    resolve_color(*color, dark),
                ));
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
                caret,
            } => {
                let lines: Vec<&str> = text.split('\n').collect();
                write_text(
                    &mut svg,
                    position.x,
                    position.y,
                    &lines,
                    resolve_color(*color, dark),
                    *font_size,
                    *align,
                    caret.then(|| resolve_color(ThemeToken::Caret, dark)),
                );
            }
            RenderCommand::DrawTooltip {
                target,
                anchor,
                title,
                body,
            } => {
                let (w, h) = estimate_tooltip_size(title, body);
                let rect = anchor.place(target, w, h);
                svg.push_str(&format!(
                    r#"<g role="tooltip"><rect x="{}" y="{}" width="{w}" height="{h}" rx="8" fill="{}" stroke="{}" stroke-width="1"/>"#,
                    rect.x,
                    rect.y,
                    resolve_color(ThemeToken::TooltipBackground, dark),
                    resolve_color(ThemeToken::TooltipBorder, dark),
                ));
                let x = rect.x + TOOLTIP_PADDING;
                let title_h = TOOLTIP_TITLE_SIZE * LINE_HEIGHT;
                write_text(
                    &mut svg,
                    x,
                    rect.y + TOOLTIP_PADDING + title_h / 2.0,
                    &[title.as_str()],
                    resolve_color(ThemeToken::TooltipTitle, dark),
                    TOOLTIP_TITLE_SIZE,
                    TextAlign::Left,
                    None,
                );
                let max_chars = chars_per_line(TOOLTIP_MAX_WIDTH - 2.0 * TOOLTIP_PADDING, TOOLTIP_BODY_SIZE);
                let wrapped = wrap_words(body, max_chars);
                let body_lines: Vec<&str> = wrapped.iter().map(String::as_str).collect();
                let body_h = body_lines.len() as f64 * TOOLTIP_BODY_SIZE * LINE_HEIGHT;
                write_text(
                    &mut svg,
                    x,
                    rect.y + TOOLTIP_PADDING + title_h + 4.0 + body_h / 2.0,
                    &body_lines,
                    resolve_color(ThemeToken::TooltipText, dark),
                    TOOLTIP_BODY_SIZE,
                    TextAlign::Left,
                    None,
                );
                svg.push_str("</g>");
            }
            RenderCommand::SetClip { rect } => {
                if clip_open {
                    svg.push_str("</g>");
                }
                clips += 1;
                svg.push_str(&format!(
                    r#"<clipPath id="clip{clips}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath><g clip-path="url(#clip{clips})">"#,
                    rect.x, rect.y, rect.w, rect.h,
                ));
                clip_open = true;
            }
            RenderCommand::ClearClip => {
                if std::mem::take(&mut clip_open) {
                    svg.push_str("</g>");
                }
            }
            RenderCommand::PushTransform { translate, scale } => {
                svg.push_str(&format!(
                    r#"<g transform="translate({} {}) scale({} {})">"#,
                    translate.x, translate.y, scale.x, scale.y,
                ));
                open_groups += 1;
            }
            RenderCommand::PushOpacity { alpha } => {
                svg.push_str(&format!(r#"<g opacity="{}">"#, alpha.clamp(0.0, 1.0)));
                open_groups += 1;
            }
            RenderCommand::BeginGroup { id, label } => {
                svg.push_str(&format!(r#"<g data-id="{}">"#, escape_xml(id)));
                if let Some(label) = label {
                    svg.push_str(&format!("<title>{}</title>", escape_xml(label)));
                }
                open_groups += 1;
            }
            RenderCommand::PopTransform | RenderCommand::PopOpacity | RenderCommand::EndGroup => {
                if open_groups > 0 {
                    open_groups -= 1;
                    svg.push_str("</g>");
                }
            }
        }
    }

    for _ in 0..open_groups {
        svg.push_str("</g>");
    }
    if clip_open {
        svg.push_str("</g>");
    }
    svg.push_str("</svg>");
    svg
}

#[allow(clippy::too_many_arguments)]
fn write_text(
    svg: &mut String,
    x: f64,
    center_y: f64,
    lines: &[&str],
    fill: &str,
    font_size: f64,
    align: TextAlign,
    caret: Option<&str>,
) {
    let anchor = match align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    };
    let line_h = font_size * LINE_HEIGHT;
    let first_y = center_y - (lines.len().saturating_sub(1)) as f64 * line_h / 2.0;
    svg.push_str(&format!(
        r#"<text x="{x}" y="{first_y}" fill="{fill}" font-size="{font_size}" text-anchor="{anchor}" dominant-baseline="middle">"#,
    ));
    let last = lines.len().saturating_sub(1);
    for (i, line) in lines.iter().enumerate() {
        let dy = if i == 0 { 0.0 } else { line_h };
        svg.push_str(&format!(r#"<tspan x="{x}" dy="{dy}">{}"#, escape_xml(line)));
        if i == last
            && let Some(caret) = caret
        {
            svg.push_str(&format!(r#"<tspan fill="{caret}">▍</tspan>"#));
        }
        svg.push_str("</tspan>");
    }
    svg.push_str("</text>");
}

/// Hex color for `token` in the dark or light palette.
pub fn resolve_color(token: ThemeToken, dark: bool) -> &'static str {
    use ThemeToken::*;
    if dark {
        match token {
            Background | NavBackground => "#0b0b14",
            BackgroundGlow => "#1e1b4b",
            Surface | SearchFill => "#1a1a2e",
            Border | NavBorder | TooltipBorder | MenuBorder => "#2e2e48",
            TextPrimary | NavTextHover | TooltipTitle => "#f5f5fa",
            TextSecondary | NavText | TooltipText => "#b4b4c8",
            TextMuted => "#7a7a90",
            Caret => "#a5b4fc",
            AccentIndigo | CtaFill => "#6366f1",
            AccentPurple => "#a855f7",
            AccentBlue => "#3b82f6",
            AccentPink => "#ec4899",
            AccentTeal => "#14b8a6",
            AccentAmber => "#f59e0b",
            Particle => "#818cf8",
            CtaHover => "#4f46e5",
            CtaText | BadgeText => "#ffffff",
            TooltipBackground | MenuBackground => "#14141f",
            BadgeFill => "#4338ca",
            DiscordFill => "#5865f2",
            NotificationDot => "#ef4444",
            MenuItemHover => "#24243a",
            ScrollIndicator => "#9ca3af",
        }
    } else {
        match token {
            Background | NavBackground => "#ffffff",
            BackgroundGlow => "#eef2ff",
            Surface | SearchFill => "#f4f4f8",
            Border | NavBorder | TooltipBorder | MenuBorder => "#e2e2ea",
            TextPrimary | NavTextHover | TooltipTitle => "#111827",
            TextSecondary | NavText | TooltipText => "#4b5563",
            TextMuted => "#9ca3af",
            Caret => "#4f46e5",
            AccentIndigo | CtaFill => "#4f46e5",
            AccentPurple => "#9333ea",
            AccentBlue => "#2563eb",
            AccentPink => "#db2777",
            AccentTeal => "#0d9488",
            AccentAmber => "#d97706",
            Particle => "#a5b4fc",
            CtaHover => "#4338ca",
            CtaText | BadgeText => "#ffffff",
            TooltipBackground | MenuBackground => "#ffffff",
            BadgeFill => "#6366f1",
            DiscordFill => "#5865f2",
            NotificationDot => "#dc2626",
            MenuItemHover => "#f3f4f6",
            ScrollIndicator => "#6b7280",
        }
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dimli_protocol::{HorizontalAnchor, Point, Rect, TooltipAnchor, VerticalAnchor};

    fn text(s: &str, caret: bool) -> RenderCommand {
        RenderCommand::DrawText {
            position: Point::new(10.0, 10.0),
            text: s.into(),
            color: ThemeToken::TextPrimary,
            font_size: 16.0,
            align: TextAlign::Center,
            caret,
        }
    }

    fn count(haystack: &str, needle: &str) -> usize {
        haystack.matches(needle).count()
    }

    #[test]
    fn basic_svg_output() {
        let commands = vec![RenderCommand::DrawRect {
            rect: Rect::new(10.0, 20.0, 100.0, 18.0),
            color: ThemeToken::AccentPink,
            border_color: Some(ThemeToken::Border),
            corner_radius: 4.0,
            hit: None,
        }];
        let svg = render_svg(&commands, 800.0, 400.0, true);
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("#ec4899"));
        assert!(svg.contains(r#"rx="4""#));
        assert!(svg.contains(r##"stroke="#2e2e48""##));
    }

    #[test]
    fn escapes_xml_entities() {
        let svg = render_svg(&[text("Buy & <Sell>", false)], 400.0, 100.0, false);
        assert!(svg.contains("Buy &amp; &lt;Sell&gt;"));
    }

    #[test]
    fn multiline_text_becomes_tspans() {
        let svg = render_svg(&[text("one\ntwo", false)], 400.0, 100.0, true);
        assert_eq!(count(&svg, "<tspan"), 2);
        assert!(svg.contains(r#"text-anchor="middle""#));
    }

    #[test]
    fn caret_only_when_flagged() {
        let with = render_svg(&[text("Dis", true)], 400.0, 100.0, true);
        let without = render_svg(&[text("Dis", false)], 400.0, 100.0, true);
        assert!(with.contains('▍'));
        assert!(!without.contains('▍'));
    }

    #[test]
    fn stacks_map_to_balanced_groups() {
        let commands = vec![
            RenderCommand::SetClip {
                rect: Rect::new(0.0, 0.0, 100.0, 100.0),
            },
            RenderCommand::BeginGroup {
                id: "icon".into(),
                label: Some("Icon".into()),
            },
            RenderCommand::PushOpacity { alpha: 0.5 },
            RenderCommand::PushTransform {
                translate: Point::new(5.0, 6.0),
                scale: Point::new(0.7, 0.7),
            },
            RenderCommand::PopTransform,
            RenderCommand::PopOpacity,
            RenderCommand::EndGroup,
            RenderCommand::ClearClip,
            // Stray pop is ignored.
            RenderCommand::PopOpacity,
        ];
        let svg = render_svg(&commands, 100.0, 100.0, true);
        assert_eq!(count(&svg, "<g"), count(&svg, "</g>"));
        assert!(svg.contains(r#"translate(5 6) scale(0.7 0.7)"#));
        assert!(svg.contains(r#"opacity="0.5""#));
        assert!(svg.contains("clip-path"));
    }

    #[test]
    fn tooltip_is_placed_by_anchor() {
        let target = Rect::new(100.0, 100.0, 50.0, 50.0);
        let commands = vec![RenderCommand::DrawTooltip {
            target,
            anchor: TooltipAnchor {
                vertical: VerticalAnchor::Below,
                horizontal: HorizontalAnchor::LeftFlush,
                offset: 12.0,
            },
            title: "3D Models".into(),
            body: "Print-ready and game-ready models".into(),
        }];
        let svg = render_svg(&commands, 800.0, 600.0, true);
        assert!(svg.contains(r#"role="tooltip""#));
        assert!(svg.contains(r#"<rect x="100" y="162""#));
        assert!(svg.contains("3D Models"));
    }

    #[test]
    fn unclosed_groups_are_closed() {
        let commands = vec![RenderCommand::PushOpacity { alpha: 1.0 }];
        let svg = render_svg(&commands, 10.0, 10.0, false);
        assert_eq!(count(&svg, "<g"), count(&svg, "</g>"));
    }
}
