//! The exported page controller.
//!
//! # Design
//!
//! One [`PageController`] owns every piece of transient state behind a
//! single `Rc<RefCell<PageState>>`. Effect wiring functions borrow it;
//! nothing lives in module globals. Event handlers do the minimum
//! possible work (scroll handlers only record a sample) and a single
//! `requestAnimationFrame` chain advances all time-driven machines with
//! measured deltas, applying only the changes they report.
//!
//! Every listener, observer, and scheduled callback is held in a handle
//! that unregisters itself on drop, so `detach` (or dropping the
//! controller from JS via `free()`) returns the page to its pre-attach
//! state.
//!
//! # Failure Modes
//!
//! Selector misses disable single effects and log at debug level; they
//! never abort attach. Only structural absences (no window, no document,
//! no head) surface as errors.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, EventTarget, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent,
};
use web_time::{Duration, Instant};

use vitrine_core::reveal::{ANIMATE_PROFILE, ENTRANCE_PROFILE, ObserverProfile, stagger_delay_css};
use vitrine_core::{
    ActiveSectionTracker, EffectConfig, EffectFlags, FloatingCard, KeyCode, KonamiDetector,
    NavbarState, ProgressTracker, RainbowTimer, RevealTracker, ScrollCoalescer, ScrollSample,
    ScrollTracker, SectionSpan, Transform, Typewriter, resolve_active,
};

use crate::banner::WELCOME_BANNER;
use crate::css;
use crate::dom;
use crate::options::ControllerOptions;

// ---------------------------------------------------------------------------
// Selector and class contracts
// ---------------------------------------------------------------------------

const NAV_LINK_SELECTOR: &str = ".nav-link";
const NAVBAR_SELECTOR: &str = ".navbar";
const HERO_SELECTOR: &str = ".hero";
const HERO_TITLE_SELECTOR: &str = ".hero-title";
const FLOATING_CARD_SELECTOR: &str = ".floating-card";
const IDENTIFIED_SECTION_SELECTOR: &str = "section[id]";
const SKILL_ITEM_SELECTOR: &str = ".skill-list li";
const REVEAL_SELECTOR: &str =
    ".skill-category, .timeline-item, .education-card, .training-provider, .volunteer-card";

const HOVER_CAPABLE_QUERY: &str = "(hover: hover) and (pointer: fine)";

const ACTIVE_CLASS: &str = "active";
const SCROLLED_CLASS: &str = "scrolled";
const FADE_IN_CLASS: &str = "fade-in";
const VISIBLE_CLASS: &str = "visible";
const ANIMATE_CLASS: &str = "animate";
const TOUCH_DEVICE_CLASS: &str = "touch-device";
const PROGRESS_BAR_CLASS: &str = "scroll-progress";
const CURSOR_CLASS: &str = "cursor";

#[wasm_bindgen(start)]
fn module_init() {
    console_error_panic_hook::set_once();
}

// ---------------------------------------------------------------------------
// Registration handles
// ---------------------------------------------------------------------------

/// A registered event listener, unregistered on drop.
struct ListenerHandle {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl ListenerHandle {
    fn attach(
        target: &EventTarget,
        event: &'static str,
        closure: Closure<dyn FnMut(web_sys::Event)>,
    ) -> Result<Self, JsValue> {
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// An intersection observer, disconnected on drop.
struct ObserverHandle {
    observer: IntersectionObserver,
    _closure: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl Drop for ObserverHandle {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// The controller's `requestAnimationFrame` chain.
///
/// The closure reschedules itself through a shared slot; stopping takes
/// the closure out of the slot, which breaks the slot/closure cycle and
/// cancels the pending frame.
struct FrameLoop {
    raf_id: Rc<RefCell<Option<i32>>>,
    closure: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameLoop {
    fn start(state: &Rc<RefCell<PageState>>) -> Result<Self, JsValue> {
        let raf_id: Rc<RefCell<Option<i32>>> = Rc::new(RefCell::new(None));
        let closure_slot: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

        let state = Rc::clone(state);
        let id_slot = Rc::clone(&raf_id);
        let self_slot = Rc::clone(&closure_slot);
        *closure_slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            frame(&state);
            let next = web_sys::window().and_then(|win| {
                self_slot
                    .borrow()
                    .as_ref()
                    .and_then(|cb| win.request_animation_frame(cb.as_ref().unchecked_ref()).ok())
            });
            *id_slot.borrow_mut() = next;
        }) as Box<dyn FnMut()>));

        let win = dom::window()?;
        let first = {
            let slot = closure_slot.borrow();
            let cb = slot
                .as_ref()
                .ok_or_else(|| JsValue::from_str("frame closure missing"))?;
            win.request_animation_frame(cb.as_ref().unchecked_ref())?
        };
        *raf_id.borrow_mut() = Some(first);

        Ok(Self {
            raf_id,
            closure: closure_slot,
        })
    }

    fn stop(&self) {
        if let Some(id) = self.raf_id.borrow_mut().take()
            && let Some(win) = web_sys::window()
        {
            let _ = win.cancel_animation_frame(id);
        }
        self.closure.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Default)]
struct Handles {
    listeners: Vec<ListenerHandle>,
    observers: Vec<ObserverHandle>,
    frame_loop: Option<FrameLoop>,
    injected: Vec<web_sys::Element>,
}

// ---------------------------------------------------------------------------
// Controller state
// ---------------------------------------------------------------------------

struct CardBinding {
    el: HtmlElement,
    state: FloatingCard,
}

/// Everything the effects read and mutate.
struct PageState {
    config: EffectConfig,
    flags: EffectFlags,
    attached: bool,
    wired: bool,

    coalescer: ScrollCoalescer,
    scroll: ScrollTracker,
    navbar_state: NavbarState,
    sections: ActiveSectionTracker,
    progress: ProgressTracker,
    reveal: RevealTracker,
    konami: KonamiDetector,
    rainbow: RainbowTimer,
    typewriter: Option<Typewriter>,
    cards: Vec<CardBinding>,
    last_tick: Instant,

    navbar: Option<HtmlElement>,
    hero: Option<HtmlElement>,
    hero_title: Option<HtmlElement>,
    progress_bar: Option<HtmlElement>,
    nav_links: Vec<HtmlElement>,
    section_els: Vec<HtmlElement>,
    reveal_els: Vec<web_sys::Element>,
    cursor_el: Option<HtmlElement>,
    animate_observer: Option<IntersectionObserver>,
}

impl PageState {
    fn new(config: EffectConfig, flags: EffectFlags) -> Self {
        let navbar_state = NavbarState::new(&config);
        let rainbow = RainbowTimer::new(Duration::from_millis(config.rainbow_duration_ms));
        Self {
            config,
            flags,
            attached: false,
            wired: false,
            coalescer: ScrollCoalescer::new(),
            scroll: ScrollTracker::new(),
            navbar_state,
            sections: ActiveSectionTracker::new(),
            progress: ProgressTracker::new(),
            reveal: RevealTracker::default(),
            konami: KonamiDetector::new(),
            rainbow,
            typewriter: None,
            cards: Vec::new(),
            last_tick: Instant::now(),
            navbar: None,
            hero: None,
            hero_title: None,
            progress_bar: None,
            nav_links: Vec::new(),
            section_els: Vec::new(),
            reveal_els: Vec::new(),
            cursor_el: None,
            animate_observer: None,
        }
    }

    /// Fresh machines for a new attach cycle. Without this, stale change
    /// suppression would swallow the first DOM writes after a re-attach.
    fn reset_machines(&mut self) {
        self.coalescer = ScrollCoalescer::new();
        self.scroll = ScrollTracker::new();
        self.navbar_state = NavbarState::new(&self.config);
        self.sections = ActiveSectionTracker::new();
        self.progress = ProgressTracker::new();
        self.reveal = RevealTracker::default();
        self.konami.reset();
        self.rainbow = RainbowTimer::new(Duration::from_millis(self.config.rainbow_duration_ms));
        self.typewriter = None;
    }

    fn clear_dom(&mut self) {
        self.navbar = None;
        self.hero = None;
        self.hero_title = None;
        self.progress_bar = None;
        self.nav_links.clear();
        self.section_els.clear();
        self.reveal_els.clear();
        self.cursor_el = None;
        self.animate_observer = None;
        self.cards.clear();
    }
}

// ---------------------------------------------------------------------------
// Exported controller
// ---------------------------------------------------------------------------

/// The page's behavior layer: construct once, `attach`, optionally
/// `detach`.
#[wasm_bindgen]
pub struct PageController {
    state: Rc<RefCell<PageState>>,
    handles: Rc<RefCell<Handles>>,
}

#[wasm_bindgen]
impl PageController {
    /// Build a controller from an optional JSON options document
    /// (`{"config": {...}, "disabled": [...]}`). Pass `null` for
    /// defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(options_json: Option<String>) -> Result<PageController, JsValue> {
        let options = ControllerOptions::from_json(options_json.as_deref())
            .map_err(|err| JsValue::from_str(&format!("invalid controller options: {err}")))?;
        for name in options.unknown_disabled() {
            tracing::warn!(name, "unknown effect name in disabled list; ignoring");
        }
        let config = options.effect_config();
        let flags = options.effect_flags();
        Ok(Self {
            state: Rc::new(RefCell::new(PageState::new(config, flags))),
            handles: Rc::new(RefCell::new(Handles::default())),
        })
    }

    /// Inject the stylesheets and wire every enabled effect, deferring to
    /// `DOMContentLoaded` when the document is still loading. Calling
    /// attach on an attached controller is a no-op.
    pub fn attach(&self) -> Result<(), JsValue> {
        {
            let mut st = self.state.borrow_mut();
            if st.attached {
                tracing::debug!("attach called on an attached controller; ignoring");
                return Ok(());
            }
            st.attached = true;
        }

        let doc = dom::document()?;
        {
            let mut handles = self.handles.borrow_mut();
            for css_text in css::injected_styles() {
                handles.injected.push(dom::inject_style(&doc, css_text)?);
            }
        }

        web_sys::console::log_1(&JsValue::from_str(WELCOME_BANNER));

        if doc.ready_state() == "loading" {
            let state = Rc::clone(&self.state);
            let handles = Rc::clone(&self.handles);
            let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
                if let Err(err) = wire_all(&state, &handles) {
                    tracing::error!(?err, "wiring failed after DOMContentLoaded");
                }
            }) as Box<dyn FnMut(web_sys::Event)>);
            let handle = ListenerHandle::attach(&doc, "DOMContentLoaded", closure)?;
            self.handles.borrow_mut().listeners.push(handle);
        } else {
            wire_all(&self.state, &self.handles)?;
        }
        Ok(())
    }

    /// Undo `attach`: stop the frame loop, unregister every handler and
    /// observer, remove injected nodes, and restore mutated elements.
    pub fn detach(&self) {
        self.teardown();
    }

    /// Enroll `selector` matches with the strict one-shot "animate"
    /// watcher. Returns how many elements were enrolled.
    pub fn observe_animate(&self, selector: &str) -> Result<u32, JsValue> {
        let doc = dom::document()?;
        let st = self.state.borrow();
        let Some(observer) = st.animate_observer.as_ref() else {
            return Ok(0);
        };
        let els = dom::query_all(&doc, selector);
        for el in &els {
            observer.observe(el);
        }
        Ok(els.len() as u32)
    }

    /// Whether effects are currently wired.
    #[wasm_bindgen(getter)]
    pub fn attached(&self) -> bool {
        self.state.borrow().wired
    }

    /// Identifier of the section currently driving the nav highlight.
    #[wasm_bindgen(getter)]
    pub fn active_section(&self) -> Option<String> {
        self.state.borrow().sections.current().map(str::to_owned)
    }

    /// Scroll events observed since attach.
    #[wasm_bindgen(getter)]
    pub fn scroll_samples_seen(&self) -> f64 {
        self.state.borrow().coalescer.samples_seen() as f64
    }

    /// Frames that processed a scroll sample since attach.
    #[wasm_bindgen(getter)]
    pub fn scroll_frames_processed(&self) -> f64 {
        self.state.borrow().coalescer.frames_processed() as f64
    }

    /// Content cards revealed so far.
    #[wasm_bindgen(getter)]
    pub fn revealed_count(&self) -> f64 {
        self.state.borrow().reveal.visible_count() as f64
    }
}

impl PageController {
    fn teardown(&self) {
        {
            let mut handles = self.handles.borrow_mut();
            if let Some(frame_loop) = handles.frame_loop.take() {
                frame_loop.stop();
            }
            handles.listeners.clear();
            handles.observers.clear();
            for node in handles.injected.drain(..) {
                node.remove();
            }
        }

        let mut st = self.state.borrow_mut();
        if let Ok(doc) = dom::document()
            && let Some(body) = doc.body()
        {
            dom::clear_style(&body, "animation");
            dom::remove_class(&body, TOUCH_DEVICE_CLASS);
        }
        if let Some(bar) = st.progress_bar.take() {
            bar.remove();
        }
        if let Some(cursor) = st.cursor_el.take() {
            cursor.remove();
        }
        if let (Some(title), Some(tw)) = (st.hero_title.as_ref(), st.typewriter.as_ref()) {
            title.set_text_content(Some(tw.full_text()));
        }
        if let Some(navbar) = st.navbar.as_ref() {
            dom::clear_style(navbar, "transform");
            dom::remove_class(navbar, SCROLLED_CLASS);
        }
        for link in &st.nav_links {
            dom::remove_class(link, ACTIVE_CLASS);
        }
        st.clear_dom();
        st.reset_machines();
        st.attached = false;
        st.wired = false;
        tracing::info!("page controller detached");
    }
}

impl Drop for PageController {
    fn drop(&mut self) {
        self.teardown();
    }
}

// ---------------------------------------------------------------------------
// Wiring
// ---------------------------------------------------------------------------

fn wire_all(
    state: &Rc<RefCell<PageState>>,
    handles: &Rc<RefCell<Handles>>,
) -> Result<(), JsValue> {
    if state.borrow().wired {
        return Ok(());
    }

    let doc = dom::document()?;

    // Hover capability gates the pointer effects and tags the body for
    // CSS targeting, the same check CSS media queries would make.
    let supports_hover = dom::supports_hover(&dom::window()?, HOVER_CAPABLE_QUERY);
    if !supports_hover {
        let mut st = state.borrow_mut();
        st.flags &= !EffectFlags::HOVER_GATED;
        drop(st);
        if let Some(body) = doc.body() {
            dom::add_class(&body, TOUCH_DEVICE_CLASS);
        }
    }

    bind_dom(state, &doc)?;

    wire_nav_clicks(state, handles)?;
    wire_scroll_listener(state, handles)?;
    wire_entrance_observer(state, handles, &doc)?;
    wire_animate_observer(state, handles)?;
    wire_card_hover(state, handles)?;
    wire_skill_hover(state, handles, &doc)?;
    wire_keyboard(state, handles, &doc)?;

    handles.borrow_mut().frame_loop = Some(FrameLoop::start(state)?);

    let mut st = state.borrow_mut();
    st.wired = true;
    st.last_tick = Instant::now();
    tracing::info!(flags = ?st.flags, supports_hover, "page controller attached");
    Ok(())
}

/// Resolve every selector the effects depend on. Misses are logged and
/// leave the corresponding effect dormant.
fn bind_dom(state: &Rc<RefCell<PageState>>, doc: &Document) -> Result<(), JsValue> {
    let mut st = state.borrow_mut();

    st.nav_links = dom::query_all_html(doc, NAV_LINK_SELECTOR);
    st.section_els = dom::query_all_html(doc, IDENTIFIED_SECTION_SELECTOR);
    st.navbar = dom::query(doc, NAVBAR_SELECTOR).and_then(|el| el.dyn_into::<HtmlElement>().ok());
    st.hero = dom::query(doc, HERO_SELECTOR).and_then(|el| el.dyn_into::<HtmlElement>().ok());
    if st.navbar.is_none() {
        tracing::debug!(selector = NAVBAR_SELECTOR, "selector miss; navbar effects dormant");
    }

    if st.flags.contains(EffectFlags::TYPEWRITER) {
        st.hero_title =
            dom::query(doc, HERO_TITLE_SELECTOR).and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(title) = st.hero_title.as_ref() {
            let text = title.text_content().unwrap_or_default();
            // Blank the title now; the machine re-reveals it.
            title.set_text_content(Some(""));
            st.typewriter = Some(Typewriter::new(text, &st.config));
        } else {
            tracing::debug!(selector = HERO_TITLE_SELECTOR, "selector miss; typewriter skipped");
        }
    }

    if st.flags.intersects(EffectFlags::FLOATING_CARDS | EffectFlags::PARALLAX) {
        let card_els = dom::query_all_html(doc, FLOATING_CARD_SELECTOR);
        let base_seed = js_sys::Date::now() as u64;
        st.cards = card_els
            .into_iter()
            .enumerate()
            .map(|(index, el)| CardBinding {
                state: FloatingCard::new(
                    index,
                    base_seed.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)),
                    &st.config,
                ),
                el,
            })
            .collect();
    }

    if st.flags.contains(EffectFlags::PROGRESS) {
        let bar = doc.create_element("div")?;
        dom::add_class(&bar, PROGRESS_BAR_CLASS);
        if let Some(body) = doc.body() {
            body.append_child(&bar)?;
            st.progress_bar = bar.dyn_into::<HtmlElement>().ok();
        }
    }

    Ok(())
}

fn wire_nav_clicks(
    state: &Rc<RefCell<PageState>>,
    handles: &Rc<RefCell<Handles>>,
) -> Result<(), JsValue> {
    let (enabled, links, header_offset) = {
        let st = state.borrow();
        (
            st.flags.contains(EffectFlags::SMOOTH_SCROLL),
            st.nav_links.clone(),
            st.config.header_offset_px,
        )
    };
    if !enabled || links.is_empty() {
        return Ok(());
    }

    let mut handles_mut = handles.borrow_mut();
    for link in &links {
        let state_rc = Rc::clone(state);
        let link_el = link.clone();
        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            event.prevent_default();
            let Some(href) = link_el.get_attribute("href") else {
                return;
            };
            if !href.starts_with('#') {
                return;
            }
            let Ok(doc) = dom::document() else { return };
            // A selector miss leaves the click a no-op.
            let Some(target) =
                dom::query(&doc, &href).and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                return;
            };
            let Ok(win) = dom::window() else { return };
            dom::scroll_to_smooth(&win, f64::from(target.offset_top()) - header_offset);

            // The clicked link becomes the sole active one.
            let st = state_rc.borrow();
            for other in &st.nav_links {
                dom::remove_class(other, ACTIVE_CLASS);
            }
            dom::add_class(&link_el, ACTIVE_CLASS);
        }) as Box<dyn FnMut(web_sys::Event)>);
        handles_mut
            .listeners
            .push(ListenerHandle::attach(link, "click", closure)?);
    }
    Ok(())
}

fn wire_scroll_listener(
    state: &Rc<RefCell<PageState>>,
    handles: &Rc<RefCell<Handles>>,
) -> Result<(), JsValue> {
    let needs_scroll = state.borrow().flags.intersects(
        EffectFlags::NAVBAR | EffectFlags::SECTIONS | EffectFlags::PARALLAX | EffectFlags::PROGRESS,
    );
    if !needs_scroll {
        return Ok(());
    }

    let win = dom::window()?;
    let state_rc = Rc::clone(state);
    let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        // Record only; the frame loop does the layout work.
        if let Some(win) = web_sys::window() {
            let offset_y = dom::scroll_offset(&win);
            state_rc
                .borrow_mut()
                .coalescer
                .push(ScrollSample { offset_y });
        }
    }) as Box<dyn FnMut(web_sys::Event)>);
    handles
        .borrow_mut()
        .listeners
        .push(ListenerHandle::attach(&win, "scroll", closure)?);
    Ok(())
}

fn wire_entrance_observer(
    state: &Rc<RefCell<PageState>>,
    handles: &Rc<RefCell<Handles>>,
    doc: &Document,
) -> Result<(), JsValue> {
    if !state.borrow().flags.contains(EffectFlags::REVEAL) {
        return Ok(());
    }
    let els = dom::query_all(doc, REVEAL_SELECTOR);
    if els.is_empty() {
        tracing::debug!(
            selector = REVEAL_SELECTOR,
            "selector miss; entrance animations skipped"
        );
        return Ok(());
    }

    {
        let mut st = state.borrow_mut();
        for (index, el) in els.iter().enumerate() {
            dom::add_class(el, FADE_IN_CLASS);
            if let Some(html) = el.dyn_ref::<HtmlElement>() {
                dom::set_style(
                    html,
                    "animation-delay",
                    &stagger_delay_css(index, st.config.reveal_stagger_ms),
                );
            }
        }
        st.reveal = RevealTracker::with_len(els.len());
        st.reveal_els = els.clone();
    }

    let state_rc = Rc::clone(state);
    let closure = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                let mut st = state_rc.borrow_mut();
                let Some(index) = st.reveal_els.iter().position(|el| *el == target) else {
                    continue;
                };
                // One-shot: the first crossing wins, later ones are
                // already-marked no-ops.
                if st.reveal.mark_visible(index) {
                    dom::add_class(&target, VISIBLE_CLASS);
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let observer = new_observer(&closure, &ENTRANCE_PROFILE)?;
    for el in &els {
        observer.observe(el);
    }
    handles.borrow_mut().observers.push(ObserverHandle {
        observer,
        _closure: closure,
    });
    Ok(())
}

/// The strict one-shot watcher. Elements enroll through
/// [`PageController::observe_animate`]; each is dropped from observation
/// the first time it crosses in.
fn wire_animate_observer(
    state: &Rc<RefCell<PageState>>,
    handles: &Rc<RefCell<Handles>>,
) -> Result<(), JsValue> {
    if !state.borrow().flags.contains(EffectFlags::REVEAL) {
        return Ok(());
    }

    let closure = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if !entry.is_intersecting() {
                    continue;
                }
                let target = entry.target();
                dom::add_class(&target, ANIMATE_CLASS);
                observer.unobserve(&target);
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let observer = new_observer(&closure, &ANIMATE_PROFILE)?;
    state.borrow_mut().animate_observer = Some(observer.clone());
    handles.borrow_mut().observers.push(ObserverHandle {
        observer,
        _closure: closure,
    });
    Ok(())
}

fn new_observer(
    closure: &Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
    profile: &ObserverProfile,
) -> Result<IntersectionObserver, JsValue> {
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(profile.threshold));
    init.set_root_margin(profile.root_margin);
    IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)
}

fn wire_card_hover(
    state: &Rc<RefCell<PageState>>,
    handles: &Rc<RefCell<Handles>>,
) -> Result<(), JsValue> {
    let (enabled, count) = {
        let st = state.borrow();
        (
            st.flags.contains(EffectFlags::FLOATING_CARDS),
            st.cards.len(),
        )
    };
    if !enabled || count == 0 {
        return Ok(());
    }

    let mut handles_mut = handles.borrow_mut();
    for index in 0..count {
        let el = state.borrow().cards[index].el.clone();

        let state_rc = Rc::clone(state);
        let enter = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            let mut st = state_rc.borrow_mut();
            if let Some(binding) = st.cards.get_mut(index)
                && binding.state.pointer_enter()
            {
                let transform = binding.state.transform();
                dom::set_transform(&binding.el, &transform);
            }
        }) as Box<dyn FnMut(web_sys::Event)>);
        handles_mut
            .listeners
            .push(ListenerHandle::attach(&el, "mouseenter", enter)?);

        let state_rc = Rc::clone(state);
        let leave = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            let mut st = state_rc.borrow_mut();
            if let Some(binding) = st.cards.get_mut(index)
                && binding.state.pointer_leave()
            {
                let transform = binding.state.transform();
                dom::set_transform(&binding.el, &transform);
            }
        }) as Box<dyn FnMut(web_sys::Event)>);
        handles_mut
            .listeners
            .push(ListenerHandle::attach(&el, "mouseleave", leave)?);
    }
    Ok(())
}

fn wire_skill_hover(
    state: &Rc<RefCell<PageState>>,
    handles: &Rc<RefCell<Handles>>,
    doc: &Document,
) -> Result<(), JsValue> {
    if !state.borrow().flags.contains(EffectFlags::SKILL_HOVER) {
        return Ok(());
    }
    let items = dom::query_all_html(doc, SKILL_ITEM_SELECTOR);
    if items.is_empty() {
        return Ok(());
    }

    let mut handles_mut = handles.borrow_mut();
    for item in items {
        let enter_el = item.clone();
        let enter = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            dom::set_style(&enter_el, "background", "rgba(255, 255, 255, 0.1)");
            dom::set_style(&enter_el, "border-radius", "8px");
            dom::set_style(&enter_el, "transition", "all 0.3s ease");
        }) as Box<dyn FnMut(web_sys::Event)>);
        handles_mut
            .listeners
            .push(ListenerHandle::attach(&item, "mouseenter", enter)?);

        let leave_el = item.clone();
        let leave = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            dom::set_style(&leave_el, "background", "transparent");
        }) as Box<dyn FnMut(web_sys::Event)>);
        handles_mut
            .listeners
            .push(ListenerHandle::attach(&item, "mouseleave", leave)?);
    }
    Ok(())
}

fn wire_keyboard(
    state: &Rc<RefCell<PageState>>,
    handles: &Rc<RefCell<Handles>>,
    doc: &Document,
) -> Result<(), JsValue> {
    if !state.borrow().flags.contains(EffectFlags::KONAMI) {
        return Ok(());
    }

    let state_rc = Rc::clone(state);
    let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let code = KeyCode::from_dom_code(&key_event.code());
        let mut st = state_rc.borrow_mut();
        if st.konami.feed(code) && st.rainbow.trigger() {
            let animation = format!("rainbow {}ms infinite", st.config.rainbow_duration_ms);
            drop(st);
            if let Ok(doc) = dom::document()
                && let Some(body) = doc.body()
            {
                dom::set_style(&body, "animation", &animation);
            }
            tracing::debug!("rainbow animation started");
        }
    }) as Box<dyn FnMut(web_sys::Event)>);
    handles
        .borrow_mut()
        .listeners
        .push(ListenerHandle::attach(doc, "keydown", closure)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Frame processing
// ---------------------------------------------------------------------------

fn frame(state: &Rc<RefCell<PageState>>) {
    let mut st = state.borrow_mut();
    let now = Instant::now();
    let delta = now.duration_since(st.last_tick);
    st.last_tick = now;

    if let Some(sample) = st.coalescer.take() {
        apply_scroll_sample(&mut st, sample);
    }

    tick_typewriter(&mut st, delta);

    if st.flags.contains(EffectFlags::FLOATING_CARDS) {
        for binding in &mut st.cards {
            if binding.state.tick(delta) {
                let transform = binding.state.transform();
                dom::set_transform(&binding.el, &transform);
            }
        }
    }

    if st.rainbow.tick(delta) {
        st.konami.reset();
        if let Ok(doc) = dom::document()
            && let Some(body) = doc.body()
        {
            dom::clear_style(&body, "animation");
        }
        tracing::debug!("rainbow animation finished");
    }
}

fn apply_scroll_sample(st: &mut PageState, sample: ScrollSample) {
    let direction = st.scroll.observe(sample.offset_y);

    if st.flags.contains(EffectFlags::NAVBAR) && st.navbar.is_some() {
        if let Some(change) = st.navbar_state.apply(sample.offset_y, direction)
            && let Some(navbar) = st.navbar.as_ref()
        {
            if let Some(scrolled) = change.scrolled {
                if scrolled {
                    dom::add_class(navbar, SCROLLED_CLASS);
                } else {
                    dom::remove_class(navbar, SCROLLED_CLASS);
                }
            }
            if let Some(hidden) = change.hidden {
                let value = if hidden { "translateY(-100%)" } else { "translateY(0)" };
                dom::set_style(navbar, "transform", value);
            }
        }
    }

    if st.flags.contains(EffectFlags::SECTIONS) && !st.section_els.is_empty() {
        let spans: Vec<SectionSpan> = st
            .section_els
            .iter()
            .map(|el| {
                SectionSpan::new(el.id(), f64::from(el.offset_top()), f64::from(el.client_height()))
            })
            .collect();
        let resolved = resolve_active(&spans, sample.offset_y, st.config.section_probe_offset_px);
        if let Some(change) = st.sections.update(resolved) {
            for link in &st.nav_links {
                dom::remove_class(link, ACTIVE_CLASS);
            }
            if let Some(current) = change.current.as_deref() {
                let fragment = format!("#{current}");
                for link in &st.nav_links {
                    if link.get_attribute("href").as_deref() == Some(fragment.as_str()) {
                        dom::add_class(link, ACTIVE_CLASS);
                    }
                }
            }
        }
    }

    if st.flags.contains(EffectFlags::PARALLAX) && st.hero.is_some() && !st.cards.is_empty() {
        let hero_y = sample.offset_y * st.config.parallax_hero_rate;
        if let Some(hero) = st.hero.as_ref() {
            dom::set_transform(hero, &Transform::translate_y(hero_y));
        }
        for index in 0..st.cards.len() {
            let rate = st.config.parallax_card_rate(index);
            let binding = &mut st.cards[index];
            if binding.state.set_parallax_y(sample.offset_y * rate) {
                let transform = binding.state.transform();
                dom::set_transform(&binding.el, &transform);
            }
        }
    }

    if st.flags.contains(EffectFlags::PROGRESS)
        && st.progress_bar.is_some()
        && let (Ok(win), Ok(doc)) = (dom::window(), dom::document())
    {
        let max = dom::max_scroll(&win, &doc);
        if let Some(percent) = st.progress.update(sample.offset_y, max)
            && let Some(bar) = st.progress_bar.as_ref()
        {
            dom::set_style(bar, "width", &format!("{percent}%"));
        }
    }
}

fn tick_typewriter(st: &mut PageState, delta: Duration) {
    let Some(tick) = st.typewriter.as_mut().map(|tw| tw.tick(delta)) else {
        return;
    };
    if tick.is_noop() {
        return;
    }
    let Some(title) = st.hero_title.clone() else {
        return;
    };

    if tick.revealed
        && let Some(tw) = st.typewriter.as_ref()
    {
        title.set_text_content(Some(tw.visible_text()));
    }
    if tick.append_cursor
        && let Ok(doc) = dom::document()
        && let Ok(cursor) = doc.create_element("span")
    {
        dom::add_class(&cursor, CURSOR_CLASS);
        cursor.set_text_content(Some("|"));
        if title.append_child(&cursor).is_ok() {
            st.cursor_el = cursor.dyn_into::<HtmlElement>().ok();
        }
    }
    if tick.start_blink
        && let Some(cursor) = st.cursor_el.as_ref()
    {
        dom::set_style(cursor, "animation", "blink 1s infinite");
    }
}
