//! The carousel controller: layout state, current index, and the
//! gesture-to-transform decision tree.

use serde::{Deserialize, Serialize};
use swipekit_transform_core::{Ease, ElementId, Engine, Property, RenderSurface};

use crate::error::ViewError;
use crate::gesture::{GestureEvent, SwipeDirection};
use crate::metrics::Metrics;

/// Damping divisor applied to pan deltas past a boundary — the elastic
/// overscroll feel.
const RESISTANCE: f64 = 4.0;
/// Fixed nudge distance for swipes on a zoomed image.
const NUDGE_PX: f64 = 150.0;
/// Slide-and-settle duration after a neutral swipe.
const SLIDE_MS: f64 = 250.0;
/// Post-gesture snap duration (strip settle, bound snap-back, scale clamp).
const SNAP_MS: f64 = 300.0;
/// Double-tap zoom toggle duration.
const ZOOM_MS: f64 = 300.0;
/// Double-tap zooms to this scale; gesture end clamps down to it.
const ZOOM_SCALE: f64 = 2.0;

/// Viewport dimensions the pages are laid out against. Sizing the actual
/// wrapper/strip boxes is the host's styling bootstrap, not ours.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub viewport_width: f64,
    pub viewport_height: f64,
}

/// Pan limits for the active zoomed image, derived at gesture start from
/// its rendered rectangle vs. the viewport. `left`/`top` are the maximum
/// allowed translations, `right`/`bottom` the minimums; an exactly zero
/// pair means the image does not exceed the viewport on that axis and
/// panning there is locked.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Bounds {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

/// Transient per-gesture state, reset at every `Start`.
#[derive(Debug, Default)]
struct GestureState {
    active: Option<ElementId>,
    press_moved: bool,
    double_tapped: bool,
    initial_scale: f64,
    bounds: Bounds,
}

/// The carousel view controller. Owns the strip element, the ordered page
/// images, and the current index; translates gesture events into engine
/// writes. Events arriving without a preceding `Start` are no-ops.
#[derive(Debug)]
pub struct View {
    cfg: ViewConfig,
    strip: ElementId,
    images: Vec<ElementId>,
    index: usize,
    gesture: GestureState,
}

impl View {
    /// Wire a carousel over already-created elements: the sliding strip
    /// and one image per page, in display order. Watches all of them.
    pub fn new<S: RenderSurface>(
        engine: &mut Engine<S>,
        cfg: ViewConfig,
        strip: ElementId,
        images: Vec<ElementId>,
    ) -> Result<Self, ViewError> {
        if images.is_empty() {
            return Err(ViewError::NoPages);
        }
        if !(cfg.viewport_width > 0.0 && cfg.viewport_height > 0.0) {
            return Err(ViewError::EmptyViewport {
                width: cfg.viewport_width,
                height: cfg.viewport_height,
            });
        }
        engine.watch(strip);
        for &image in &images {
            engine.watch(image);
        }
        Ok(Self {
            cfg,
            strip,
            images,
            index: 0,
            gesture: GestureState::default(),
        })
    }

    /// Current page, 0-based, always within `[0, page_count - 1]`.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn page_count(&self) -> usize {
        self.images.len()
    }

    pub fn strip(&self) -> ElementId {
        self.strip
    }

    /// The image of the current page — the target of zoom gestures.
    pub fn active_image(&self) -> ElementId {
        self.images[self.index]
    }

    /// Feed one normalized gesture event through the state machine.
    pub fn handle<S: RenderSurface>(
        &mut self,
        engine: &mut Engine<S>,
        metrics: &dyn Metrics,
        event: GestureEvent,
    ) {
        match event {
            GestureEvent::Start => self.on_start(engine, metrics),
            GestureEvent::DoubleTap { x, y } => self.on_double_tap(engine, metrics, x, y),
            GestureEvent::PressMove { dx, dy } => self.on_press_move(engine, dx, dy),
            GestureEvent::Swipe { direction, dx, dy } => self.on_swipe(engine, direction, dx, dy),
            GestureEvent::Pinch { scale } => self.on_pinch(engine, scale),
            GestureEvent::End => self.on_end(engine),
        }
    }

    /// Capture the active image, reset flags, and — when already zoomed —
    /// halt its in-flight tweens and derive the pan bounds from its
    /// rendered size. A bound collapses to zero when the image does not
    /// exceed the viewport on that axis.
    fn on_start<S: RenderSurface>(&mut self, engine: &mut Engine<S>, metrics: &dyn Metrics) {
        let el = self.images[self.index];
        self.gesture = GestureState {
            active: Some(el),
            press_moved: false,
            double_tapped: false,
            initial_scale: engine.get(el, Property::ScaleX),
            bounds: Bounds::default(),
        };
        if self.gesture.initial_scale > 1.0 {
            engine.stop(el, false);
            let rect = metrics.bounding_rect(el);
            let mut lr = (self.cfg.viewport_width - rect.width) / 2.0;
            let mut tb = (self.cfg.viewport_height - rect.height) / 2.0;
            if lr > 0.0 {
                lr = 0.0;
            }
            if tb > 0.0 {
                tb = 0.0;
            }
            self.gesture.bounds = Bounds {
                left: -lr,
                right: lr,
                top: -tb,
                bottom: tb,
            };
        }
    }

    /// Toggle between resting scale and a centered 2× zoom on the tap
    /// point. The zoom-in translate recenters the tap, zeroed per axis
    /// when the doubled image would still fit the viewport there.
    fn on_double_tap<S: RenderSurface>(
        &mut self,
        engine: &mut Engine<S>,
        metrics: &dyn Metrics,
        x: f64,
        y: f64,
    ) {
        let Some(el) = self.gesture.active else {
            return;
        };
        self.gesture.double_tapped = true;
        if engine.get(el, Property::ScaleX) > 1.0 {
            log::debug!("double-tap: reset zoom on {el:?}");
            engine.animate(
                el,
                [
                    (Property::ScaleX, 1.0),
                    (Property::ScaleY, 1.0),
                    (Property::TranslateX, 0.0),
                    (Property::TranslateY, 0.0),
                ],
                (ZOOM_MS, Ease::InOutSine),
            );
        } else {
            let rect = metrics.bounding_rect(el);
            let mut tx = rect.width / 2.0 - (x - rect.left);
            let mut ty = rect.height / 2.0 - (y - rect.top);
            if self.cfg.viewport_width - rect.width * ZOOM_SCALE > 0.0 {
                tx = 0.0;
            }
            if self.cfg.viewport_height - rect.height * ZOOM_SCALE > 0.0 {
                ty = 0.0;
            }
            log::debug!("double-tap: zoom {el:?} to {ZOOM_SCALE}x around ({x}, {y})");
            engine.animate(
                el,
                [
                    (Property::ScaleX, ZOOM_SCALE),
                    (Property::ScaleY, ZOOM_SCALE),
                    (Property::TranslateX, tx),
                    (Property::TranslateY, ty),
                ],
                (ZOOM_MS, Ease::InOutSine),
            );
        }
    }

    /// Live drag. Neutral scale pans the whole strip; zoomed pans the
    /// image per axis. Past a boundary the delta is damped by the
    /// resistance divisor; a zero bound locks its axis entirely.
    fn on_press_move<S: RenderSurface>(&mut self, engine: &mut Engine<S>, dx: f64, dy: f64) {
        let Some(el) = self.gesture.active else {
            return;
        };
        self.gesture.press_moved = true;
        let scale = engine.get(el, Property::ScaleX);
        if scale == 1.0 {
            let min_x = 0.0;
            let max_x = -((self.images.len() - 1) as f64) * self.cfg.viewport_width;
            let tx = engine.get(self.strip, Property::TranslateX);
            let mut dx = dx;
            if tx > min_x || tx < max_x {
                dx /= RESISTANCE;
            }
            engine.set(self.strip, Property::TranslateX, tx + dx);
        } else if scale > 1.0 {
            let b = self.gesture.bounds;
            let tx = engine.get(el, Property::TranslateX);
            let ty = engine.get(el, Property::TranslateY);
            let mut dx = dx;
            let mut dy = dy;
            if tx > b.left || tx < b.right {
                dx /= RESISTANCE;
            }
            if ty > b.top || ty < b.bottom {
                dy /= RESISTANCE;
            }
            if b.right == 0.0 {
                dx = 0.0;
            }
            if b.bottom == 0.0 {
                dy = 0.0;
            }
            engine.set(el, Property::TranslateX, tx + dx);
            engine.set(el, Property::TranslateY, ty + dy);
        }
    }

    /// Neutral: step the index one page in the swipe direction (clamped)
    /// and settle the strip. Zoomed: nudge the image a fixed distance per
    /// delta axis, hard-clamped to the pan bounds.
    fn on_swipe<S: RenderSurface>(
        &mut self,
        engine: &mut Engine<S>,
        direction: SwipeDirection,
        dx: f64,
        dy: f64,
    ) {
        let Some(el) = self.gesture.active else {
            return;
        };
        let scale = engine.get(el, Property::ScaleX);
        if scale == 1.0 {
            let before = self.index;
            match direction {
                SwipeDirection::Left => {
                    self.index = (self.index + 1).min(self.images.len() - 1);
                }
                SwipeDirection::Right => {
                    self.index = self.index.saturating_sub(1);
                }
                SwipeDirection::Up | SwipeDirection::Down => {}
            }
            if self.index != before {
                log::debug!("swipe {direction:?}: page {before} -> {}", self.index);
            }
            self.slide(engine, SLIDE_MS, Ease::OutSine);
        } else if scale > 1.0 {
            let b = self.gesture.bounds;
            if dx > 0.0 {
                let mut x = engine.get(el, Property::TranslateX) + NUDGE_PX;
                if x > b.left {
                    x = b.left;
                }
                engine.animate(el, [(Property::TranslateX, x)], (SNAP_MS, Ease::OutSine));
            } else if dx < 0.0 {
                let mut x = engine.get(el, Property::TranslateX) - NUDGE_PX;
                if x < b.right {
                    x = b.right;
                }
                engine.animate(el, [(Property::TranslateX, x)], (SNAP_MS, Ease::OutSine));
            }
            if dy > 0.0 {
                let mut y = engine.get(el, Property::TranslateY) + NUDGE_PX;
                if y > b.top {
                    y = b.top;
                }
                engine.animate(el, [(Property::TranslateY, y)], (SNAP_MS, Ease::OutSine));
            } else if dy < 0.0 {
                let mut y = engine.get(el, Property::TranslateY) - NUDGE_PX;
                if y < b.bottom {
                    y = b.bottom;
                }
                engine.animate(el, [(Property::TranslateY, y)], (SNAP_MS, Ease::OutSine));
            }
        }
    }

    /// Live pinch: both scale axes track `initial_scale × factor`,
    /// unanimated, for the duration of the pinch.
    fn on_pinch<S: RenderSurface>(&mut self, engine: &mut Engine<S>, factor: f64) {
        let Some(el) = self.gesture.active else {
            return;
        };
        let s = self.gesture.initial_scale * factor;
        engine.set(el, Property::ScaleX, s);
        engine.set(el, Property::ScaleY, s);
    }

    /// Post-gesture snapping. Scale below resting snaps to 1 (translate
    /// reset), above the zoom ceiling snaps to it (translate reset); both
    /// decisions read the pre-snap scale. Then: a panned neutral strip
    /// settles on the current index; a panned zoomed image snaps each
    /// axis back to its violated bound — unless this gesture was a
    /// double-tap, whose own tween already completes the transition.
    fn on_end<S: RenderSurface>(&mut self, engine: &mut Engine<S>) {
        let Some(el) = self.gesture.active else {
            return;
        };
        let scale = engine.get(el, Property::ScaleX);
        if scale < 1.0 {
            log::debug!("end: snapping {el:?} back to resting scale");
            engine.animate(
                el,
                [
                    (Property::ScaleX, 1.0),
                    (Property::ScaleY, 1.0),
                    (Property::TranslateX, 0.0),
                    (Property::TranslateY, 0.0),
                ],
                SNAP_MS,
            );
        } else if scale > ZOOM_SCALE {
            log::debug!("end: clamping {el:?} down to {ZOOM_SCALE}x");
            engine.animate(
                el,
                [
                    (Property::ScaleX, ZOOM_SCALE),
                    (Property::ScaleY, ZOOM_SCALE),
                    (Property::TranslateX, 0.0),
                    (Property::TranslateY, 0.0),
                ],
                SNAP_MS,
            );
        }
        if scale == 1.0 {
            if self.gesture.press_moved {
                self.slide(engine, SNAP_MS, Ease::Linear);
            }
        } else if scale > 1.0 {
            if self.gesture.double_tapped {
                return;
            }
            if self.gesture.press_moved {
                let b = self.gesture.bounds;
                let tx = engine.get(el, Property::TranslateX);
                if tx > b.left {
                    engine.animate(el, [(Property::TranslateX, b.left)], SNAP_MS);
                } else if tx < b.right {
                    engine.animate(el, [(Property::TranslateX, b.right)], SNAP_MS);
                }
                let ty = engine.get(el, Property::TranslateY);
                if ty > b.top {
                    engine.animate(el, [(Property::TranslateY, b.top)], SNAP_MS);
                } else if ty < b.bottom {
                    engine.animate(el, [(Property::TranslateY, b.bottom)], SNAP_MS);
                }
            }
        }
    }

    /// Animate the strip to the current index's resting position.
    fn slide<S: RenderSurface>(&mut self, engine: &mut Engine<S>, duration_ms: f64, ease: Ease) {
        let x = -(self.index as f64) * self.cfg.viewport_width;
        engine.animate(self.strip, [(Property::TranslateX, x)], (duration_ms, ease));
    }
}
