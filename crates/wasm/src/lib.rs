//! JS bridge: pages live in a registry and are addressed by handle. Time
//! is passed in as milliseconds (e.g. `performance.now()`), geometry as
//! plain numbers, and render output leaves as JSON command lists.

use std::sync::Mutex;
use std::time::{Duration, TryFromFloatSecsError};

use dimli_core::views::nav::render_nav as render_nav_commands;
use dimli_core::{HeroConfig, HeroView, ProfileMenu, StaticMetrics};
use dimli_protocol::{HitTarget, Viewport};
use wasm_bindgen::prelude::*;

struct Page {
    hero: HeroView,
    menu: ProfileMenu,
}

static PAGES: Mutex<Vec<Page>> = Mutex::new(Vec::new());

fn js_err(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn with_page<R>(handle: usize, f: impl FnOnce(&mut Page) -> Result<R, JsError>) -> Result<R, JsError> {
    let mut pages = PAGES.lock().map_err(|_| JsError::new("page registry poisoned"))?;
    let page = pages
        .get_mut(handle)
        .ok_or_else(|| JsError::new("invalid page handle"))?;
    f(page)
}

/// Host milliseconds to a `Duration`. Negative and NaN clamp to zero;
/// infinite or overflowing times are rejected.
fn at(now_ms: f64) -> Result<Duration, TryFromFloatSecsError> {
    Duration::try_from_secs_f64(now_ms.max(0.0) / 1000.0)
}

fn viewport(x: f64, y: f64, width: f64, height: f64, dpr: f64) -> Viewport {
    Viewport {
        x,
        y,
        width,
        height,
        dpr,
    }
}

/// Create a page from a TOML config, or the built-in content when `None`.
/// Returns a handle for later calls.
#[wasm_bindgen]
pub fn create_hero(config_toml: Option<String>) -> Result<usize, JsError> {
    let config = match config_toml {
        Some(src) => HeroConfig::from_toml_str(&src).map_err(js_err)?,
        None => HeroConfig::default(),
    };
    let mut pages = PAGES.lock().map_err(|_| JsError::new("page registry poisoned"))?;
    let idx = pages.len();
    pages.push(Page {
        hero: HeroView::new(config),
        menu: ProfileMenu::new(),
    });
    Ok(idx)
}

#[wasm_bindgen]
pub fn mount(
    handle: usize,
    now_ms: f64,
    scroll_y: f64,
    section_top: f64,
    section_height: f64,
) -> Result<(), JsError> {
    let now = at(now_ms).map_err(js_err)?;
    with_page(handle, |page| {
        let metrics = StaticMetrics::new(scroll_y, section_top, section_height);
        page.hero.mount(now, &metrics);
        Ok(())
    })
}

#[wasm_bindgen]
pub fn unmount(handle: usize) -> Result<(), JsError> {
    with_page(handle, |page| {
        page.hero.unmount();
        page.menu.close();
        Ok(())
    })
}

/// Run due typewriter steps. Returns whether a repaint is needed.
#[wasm_bindgen]
pub fn advance(handle: usize, now_ms: f64) -> Result<bool, JsError> {
    let now = at(now_ms).map_err(js_err)?;
    with_page(handle, |page| Ok(page.hero.advance(now)))
}

/// When `advance` next has work, in the same clock as `now_ms`.
#[wasm_bindgen]
pub fn next_deadline_ms(handle: usize) -> Result<Option<f64>, JsError> {
    with_page(handle, |page| {
        Ok(page.hero.next_deadline().map(|d| d.as_secs_f64() * 1000.0))
    })
}

#[wasm_bindgen]
pub fn on_scroll(
    handle: usize,
    scroll_y: f64,
    section_top: f64,
    section_height: f64,
) -> Result<bool, JsError> {
    with_page(handle, |page| {
        Ok(page
            .hero
            .on_scroll(&StaticMetrics::new(scroll_y, section_top, section_height)))
    })
}

#[wasm_bindgen]
pub fn on_resize(
    handle: usize,
    scroll_y: f64,
    section_top: f64,
    section_height: f64,
) -> Result<bool, JsError> {
    with_page(handle, |page| {
        Ok(page
            .hero
            .on_resize(&StaticMetrics::new(scroll_y, section_top, section_height)))
    })
}

#[wasm_bindgen]
pub fn pointer_enter(handle: usize, icon_index: usize, now_ms: f64) -> Result<bool, JsError> {
    let now = at(now_ms).map_err(js_err)?;
    with_page(handle, |page| Ok(page.hero.pointer_enter(icon_index, now)))
}

#[wasm_bindgen]
pub fn pointer_leave(handle: usize, icon_index: usize) -> Result<bool, JsError> {
    with_page(handle, |page| Ok(page.hero.pointer_leave(icon_index)))
}

/// Replace the headline copy, restarting the reveal if it changed.
#[wasm_bindgen]
pub fn set_copy(handle: usize, title: &str, subtitle: &str, now_ms: f64) -> Result<bool, JsError> {
    let now = at(now_ms).map_err(js_err)?;
    with_page(handle, |page| Ok(page.hero.set_copy(title, subtitle, now)))
}

/// Render the hero section, returning render commands as JSON.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn render_hero(
    handle: usize,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    dpr: f64,
    now_ms: f64,
) -> Result<String, JsError> {
    let now = at(now_ms).map_err(js_err)?;
    with_page(handle, |page| {
        let commands = page.hero.render(&viewport(x, y, width, height, dpr), now);
        serde_json::to_string(&commands).map_err(js_err)
    })
}

/// Render the navigation bar (and open profile menu) as JSON.
#[wasm_bindgen]
pub fn render_nav(
    handle: usize,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    dpr: f64,
) -> Result<String, JsError> {
    with_page(handle, |page| {
        let commands = render_nav_commands(
            &page.hero.config().nav,
            &page.menu,
            &viewport(x, y, width, height, dpr),
        );
        serde_json::to_string(&commands).map_err(js_err)
    })
}

/// Hero plus nav as a standalone SVG document.
#[wasm_bindgen]
pub fn render_svg(handle: usize, width: f64, height: f64, now_ms: f64, dark: bool) -> Result<String, JsError> {
    let now = at(now_ms).map_err(js_err)?;
    with_page(handle, |page| {
        let vp = Viewport::new(width, height);
        let mut commands = page.hero.render(&vp, now);
        commands.extend(render_nav_commands(&page.hero.config().nav, &page.menu, &vp));
        Ok(dimli_core::svg::render_svg(&commands, width, height, dark))
    })
}

/// Profile button clicked. Returns whether the menu is now open.
#[wasm_bindgen]
pub fn toggle_profile_menu(handle: usize) -> Result<bool, JsError> {
    with_page(handle, |page| {
        page.menu.toggle();
        Ok(page.menu.is_open())
    })
}

/// A pointer went down on the page. `hit_json` is the serialized
/// `HitTarget` under the pointer, if any. Returns whether the menu closed.
#[wasm_bindgen]
pub fn profile_pointer_down(handle: usize, hit_json: Option<String>) -> Result<bool, JsError> {
    let hit: Option<HitTarget> = match hit_json {
        Some(src) => Some(serde_json::from_str(&src).map_err(js_err)?),
        None => None,
    };
    with_page(handle, |page| Ok(page.menu.pointer_down(hit)))
}

/// Tooltip anchor for an icon as JSON, or `null` for unknown icons.
#[wasm_bindgen]
pub fn tooltip_placement(handle: usize, icon_index: usize) -> Result<String, JsError> {
    with_page(handle, |page| {
        serde_json::to_string(&page.hero.tooltip_placement(icon_index)).map_err(js_err)
    })
}

/// The page's effective config as JSON.
#[wasm_bindgen]
pub fn get_config(handle: usize) -> Result<String, JsError> {
    with_page(handle, |page| serde_json::to_string(page.hero.config()).map_err(js_err))
}
