//! Integration test: load a hero config from TOML, drive a full mount /
//! type / scroll / hover / unmount cycle and check the rendered output.

use std::time::Duration;

use dimli_core::svg::render_svg;
use dimli_core::views::nav::render_nav;
use dimli_core::{CaretTarget, Clock, HeroConfig, HeroView, ManualClock, ProfileMenu, StaticMetrics};
use dimli_protocol::{HitTarget, HorizontalAnchor, RenderCommand, VerticalAnchor, Viewport};

fn fixture() -> HeroConfig {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/hero.toml");
    HeroConfig::load(path).expect("fixture should load")
}

fn tooltip_titles(cmds: &[RenderCommand]) -> Vec<String> {
    cmds.iter()
        .filter_map(|c| match c {
            RenderCommand::DrawTooltip { title, .. } => Some(title.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn fixture_overrides_defaults() {
    let config = fixture();
    assert_eq!(config.icons.len(), 3);
    assert_eq!(config.content.title, "Buy\nSell");
    assert_eq!(config.particles.count, 3);
    // Unspecified sections keep their defaults.
    assert_eq!(config.nav.brand, "3DIMLI");
    assert_eq!(config.typing.caret_period_ms, 1000);
}

#[test]
fn typing_timeline() {
    let clock = ManualClock::new();
    let mut hero = HeroView::new(fixture());
    hero.mount(clock.now(), &StaticMetrics::new(0.0, 0.0, 800.0));

    let text_at = |hero: &mut HeroView, ms: u64| {
        clock.set(Duration::from_millis(ms));
        hero.advance(clock.now());
        (
            hero.typewriter().primary_text().to_owned(),
            hero.typewriter().secondary_text().to_owned(),
        )
    };

    assert_eq!(text_at(&mut hero, 799), (String::new(), String::new()));
    assert_eq!(text_at(&mut hero, 800).0, "B");
    assert_eq!(text_at(&mut hero, 1_100).0, "Buy\n");
    // Eight chars; the last lands at 1500ms.
    assert_eq!(text_at(&mut hero, 1_500).0, "Buy\nSell");
    // One interval plus the pause before the subtitle starts.
    assert_eq!(text_at(&mut hero, 2_099).1, "");
    assert_eq!(text_at(&mut hero, 2_100).1, "3");
    assert_eq!(text_at(&mut hero, 2_500).1, "3D models");
    assert!(hero.typewriter().is_done());
    assert_eq!(hero.next_deadline(), None);
    assert_eq!(hero.visible_caret(clock.now()), None);
}

#[test]
fn caret_moves_from_title_to_subtitle() {
    let clock = ManualClock::new();
    let mut hero = HeroView::new(fixture());
    hero.mount(clock.now(), &StaticMetrics::new(0.0, 0.0, 800.0));

    clock.set(Duration::from_millis(1_000));
    hero.advance(clock.now());
    assert_eq!(hero.visible_caret(clock.now()), Some(CaretTarget::Primary));

    // Title complete, subtitle not started: no caret anywhere.
    clock.set(Duration::from_millis(2_000));
    hero.advance(clock.now());
    assert_eq!(hero.typewriter().caret(), None);

    clock.set(Duration::from_millis(2_200));
    hero.advance(clock.now());
    assert_eq!(hero.visible_caret(clock.now()), Some(CaretTarget::Secondary));
}

#[test]
fn hover_scroll_and_teardown() {
    let clock = ManualClock::new();
    let viewport = Viewport::new(1280.0, 800.0);
    let mut hero = HeroView::new(fixture());
    hero.mount(clock.now(), &StaticMetrics::new(0.0, 0.0, 800.0));

    // Only the first icon is visible at 300ms.
    clock.set(Duration::from_millis(300));
    assert!(!hero.pointer_enter(1, clock.now()));
    assert!(hero.pointer_enter(0, clock.now()));

    clock.set(Duration::from_millis(1_000));
    let cmds = hero.render(&viewport, clock.now());
    assert_eq!(tooltip_titles(&cmds), vec!["Top left".to_string()]);
    let anchor = hero.tooltip_placement(0).expect("icon 0");
    assert_eq!(anchor.vertical, VerticalAnchor::Below);
    assert_eq!(anchor.horizontal, HorizontalAnchor::LeftFlush);

    // Moving to another icon replaces the tooltip.
    assert!(hero.pointer_enter(2, clock.now()));
    let cmds = hero.render(&viewport, clock.now());
    assert_eq!(tooltip_titles(&cmds), vec!["Right edge".to_string()]);
    let anchor = hero.tooltip_placement(2).expect("icon 2");
    assert_eq!(anchor.vertical, VerticalAnchor::Above);
    assert_eq!(anchor.horizontal, HorizontalAnchor::RightFlush);

    assert!(hero.on_scroll(&StaticMetrics::new(200.0, 0.0, 800.0)));
    assert!((hero.progress() - 0.25).abs() < 1e-12);

    assert!(hero.pointer_leave(2));
    assert!(tooltip_titles(&hero.render(&viewport, clock.now())).is_empty());

    hero.pointer_enter(1, clock.now());
    hero.unmount();
    assert_eq!(hero.hovered(), None);
    assert_eq!(hero.progress(), 0.0);
    clock.advance_ms(10_000);
    assert!(!hero.advance(clock.now()));
    assert_eq!(hero.typewriter().primary_text(), "");
}

#[test]
fn page_renders_to_svg() {
    let viewport = Viewport::new(1280.0, 800.0);
    let mut hero = HeroView::new(fixture());
    hero.mount(Duration::ZERO, &StaticMetrics::new(0.0, 0.0, 800.0));
    let now = Duration::from_secs(5);
    hero.advance(now);
    hero.pointer_enter(1, now);

    let mut menu = ProfileMenu::new();
    menu.toggle();
    let mut cmds = hero.render(&viewport, now);
    cmds.extend(render_nav(&hero.config().nav, &menu, &viewport));

    assert!(cmds.iter().any(|c| matches!(
        c,
        RenderCommand::DrawRect {
            hit: Some(HitTarget::MenuItem(_)),
            ..
        }
    )));

    let svg = render_svg(&cmds, viewport.width, viewport.height, true);
    assert!(svg.contains("Centered"));
    assert!(svg.contains("My Orders"));
    assert!(svg.contains("Browse"));
    assert_eq!(svg.matches("<g").count(), svg.matches("</g>").count());
}

#[test]
fn invalid_config_is_rejected() {
    let err = HeroConfig::from_toml_str(
        r#"
        [[icons]]
        id = "a"
        x = 120.0
        y = 10.0
        title = "t"
        description = "d"
        "#,
    )
    .expect_err("out of bounds icon");
    assert!(err.to_string().contains("outside"));
}

#[test]
fn render_output_survives_json() {
    let viewport = Viewport::new(1280.0, 800.0);
    let mut hero = HeroView::new(fixture());
    hero.mount(Duration::ZERO, &StaticMetrics::new(0.0, 0.0, 800.0));
    let now = Duration::from_secs(3);
    hero.advance(now);
    hero.pointer_enter(1, now);

    let cmds = hero.render(&viewport, now);
    let json = serde_json::to_string(&cmds).expect("serialize commands");
    let back: Vec<RenderCommand> = serde_json::from_str(&json).expect("deserialize commands");

    let hits = |cmds: &[RenderCommand]| -> Vec<HitTarget> {
        cmds.iter()
            .filter_map(|c| match c {
                RenderCommand::DrawRect { hit, .. } => *hit,
                _ => None,
            })
            .collect()
    };
    assert_eq!(back.len(), cmds.len());
    assert_eq!(hits(&back), hits(&cmds));
    assert_eq!(tooltip_titles(&back), vec!["Centered".to_string()]);

    let config_json = serde_json::to_string(hero.config()).expect("serialize config");
    let config: HeroConfig = serde_json::from_str(&config_json).expect("deserialize config");
    assert_eq!(&config, hero.config());
}
