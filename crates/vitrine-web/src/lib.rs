#![forbid(unsafe_code)]

//! Browser behavior layer for the vitrine resume site.
//!
//! This crate is the `wasm-bindgen` boundary around `vitrine-core`. It
//! exports [`PageController`]: constructed once with optional JSON
//! options, attached when the document is ready, and detachable. The
//! controller wires browser events (scroll, clicks, pointer, keyboard,
//! intersection) to the core state machines and applies their decisions
//! to the DOM once per animation frame.
//!
//! Submodules that carry no DOM types (`css`, `banner`, `options`) test
//! natively; everything touching `web-sys` is gated to wasm32.
//!
//! # Usage
//!
//! ```js
//! import init, { PageController } from "./pkg/vitrine_web.js";
//!
//! await init();
//! const controller = new PageController(null);
//! controller.attach();
//! // ... later, e.g. on a SPA route change:
//! controller.detach();
//! ```

pub mod banner;
pub mod css;
pub mod options;

#[cfg(target_arch = "wasm32")]
mod dom;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::PageController;
