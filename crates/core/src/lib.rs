//! Core state and view transforms for the 3DIMLI landing hero.
//!
//! Everything here is renderer-agnostic: time arrives as a `Duration`
//! from the caller, viewport geometry through [`scroll::ViewportMetrics`],
//! and output leaves as `RenderCommand` lists.

pub mod clock;
pub mod config;
pub mod easing;
pub mod hero;
pub mod hover;
pub mod nav;
pub mod particles;
pub mod scroll;
pub mod svg;
pub mod tooltip;
pub mod typewriter;
pub mod views;

pub use clock::{Clock, ManualClock, ScheduledTask};
#[cfg(not(target_arch = "wasm32"))]
pub use clock::SystemClock;
pub use config::{ConfigError, HeroConfig};
pub use hero::HeroView;
pub use nav::{NavAction, ProfileMenu};
pub use scroll::{MetricsSample, StaticMetrics, ViewportMetrics};
pub use typewriter::{CaretTarget, Phase, Typewriter};
