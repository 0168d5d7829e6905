//! Engine: element table ownership and the public API — watch, live
//! property writes, tween scheduling, cancellation, and the tick loop.
//!
//! Concurrency model: single-threaded, cooperative, tick-driven. All
//! animation progress advances inside `tick`; nothing blocks, nothing
//! overlaps, no locks. An element may carry several records at once
//! (independent property sets run concurrently); two records targeting the
//! same property race last-writer-wins in registry order — callers that
//! care `stop` first.

use crate::cell::Cell;
use crate::config::Config;
use crate::ease::Ease;
use crate::ids::{AnimId, ElementId, IdAllocator};
use crate::matrix::{Affine2d, Affine3d, Matrix2d, Matrix3d};
use crate::outputs::{Change, EngineEvent, Outputs};
use crate::props::{OriginValue, Property, PropertyBag};
use crate::scratch::Scratch;
use crate::surface::RenderSurface;

/// Options for `Engine::animate`. The duration falls back to
/// `Config::default_duration_ms` when unset.
#[derive(Clone, Copy, Debug, Default)]
pub struct AnimateOpts {
    pub duration_ms: Option<f64>,
    pub ease: Ease,
}

impl AnimateOpts {
    pub fn new(duration_ms: f64, ease: Ease) -> Self {
        Self {
            duration_ms: Some(duration_ms),
            ease,
        }
    }
}

/// Duration-only form: `engine.animate(el, targets, 300.0)`.
impl From<f64> for AnimateOpts {
    fn from(duration_ms: f64) -> Self {
        Self {
            duration_ms: Some(duration_ms),
            ease: Ease::default(),
        }
    }
}

/// Duration-and-curve form: `engine.animate(el, targets, (250.0, Ease::OutSine))`.
impl From<(f64, Ease)> for AnimateOpts {
    fn from((duration_ms, ease): (f64, Ease)) -> Self {
        Self {
            duration_ms: Some(duration_ms),
            ease,
        }
    }
}

/// Curve-only form, default duration.
impl From<Ease> for AnimateOpts {
    fn from(ease: Ease) -> Self {
        Self {
            duration_ms: None,
            ease,
        }
    }
}

/// One tweened property within a record, captured at `animate` time.
#[derive(Clone, Copy, Debug)]
struct TweenTrack {
    prop: Property,
    start: f64,
    end: f64,
    delta: f64,
}

/// One in-flight animation. `started` latches at the record's first
/// observed tick so a deterministic driver owns time entirely.
#[derive(Debug)]
struct AnimRecord {
    id: AnimId,
    tracks: Vec<TweenTrack>,
    duration_ms: f64,
    ease: Ease,
    started: Option<f64>,
}

/// Per-element engine-owned state: the cell set and the animation registry.
#[derive(Debug)]
struct ElementState {
    props: PropertyBag,
    origin_x: Cell<OriginValue>,
    origin_y: Cell<OriginValue>,
    origin_z: Cell<OriginValue>,
    animations: Vec<AnimRecord>,
}

impl ElementState {
    fn new() -> Self {
        Self {
            props: PropertyBag::new(),
            origin_x: Cell::new(OriginValue::Center),
            origin_y: Cell::new(OriginValue::Center),
            origin_z: Cell::new(OriginValue::Px(0.0)),
            animations: Vec::new(),
        }
    }

    fn affine2(&self) -> Affine2d {
        Affine2d {
            translate_x: self.props.get(Property::TranslateX),
            translate_y: self.props.get(Property::TranslateY),
            scale_x: self.props.get(Property::ScaleX),
            scale_y: self.props.get(Property::ScaleY),
            skew_x: self.props.get(Property::SkewX),
            skew_y: self.props.get(Property::SkewY),
            rotate: self.props.get(Property::Rotate),
            rotate_z: self.props.get(Property::RotateZ),
        }
    }

    fn affine3(&self) -> Affine3d {
        Affine3d {
            translate_x: self.props.get(Property::TranslateX),
            translate_y: self.props.get(Property::TranslateY),
            translate_z: self.props.get(Property::TranslateZ),
            scale_x: self.props.get(Property::ScaleX),
            scale_y: self.props.get(Property::ScaleY),
            scale_z: self.props.get(Property::ScaleZ),
            rotate_x: self.props.get(Property::RotateX),
            rotate_y: self.props.get(Property::RotateY),
            rotate_z: self.props.get(Property::RotateZ),
            rotate: self.props.get(Property::Rotate),
            skew_x: self.props.get(Property::SkewX),
            skew_y: self.props.get(Property::SkewY),
        }
    }
}

/// Arena-style element table keyed by the host's stable handles.
#[derive(Default, Debug)]
struct ElementTable {
    items: Vec<(ElementId, ElementState)>,
}

impl ElementTable {
    fn get(&self, id: ElementId) -> Option<&ElementState> {
        self.items
            .iter()
            .find_map(|(e, st)| if *e == id { Some(st) } else { None })
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut ElementState> {
        self.items
            .iter_mut()
            .find_map(|(e, st)| if *e == id { Some(st) } else { None })
    }

    fn insert(&mut self, id: ElementId, state: ElementState) {
        self.items.push((id, state));
    }
}

/// The reactive transform engine. Owns the element table, composers, and
/// the injected render surface; the host (or a [`crate::StepScheduler`])
/// drives it by calling `tick` from its frame callback.
#[derive(Debug)]
pub struct Engine<S: RenderSurface> {
    cfg: Config,
    ids: IdAllocator,
    elements: ElementTable,

    // Composer scratch, selected once by the capability probe result.
    m2: Matrix2d,
    m3: Matrix3d,
    scratch: Scratch,

    outputs: Outputs,
    surface: S,
}

impl<S: RenderSurface> Engine<S> {
    pub fn new(cfg: Config, surface: S) -> Self {
        Self {
            cfg,
            ids: IdAllocator::new(),
            elements: ElementTable::default(),
            m2: Matrix2d::new(),
            m3: Matrix3d::new(),
            scratch: Scratch::default(),
            outputs: Outputs::default(),
            surface,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Changes and events accumulated since the last tick began.
    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    pub fn is_watched(&self, el: ElementId) -> bool {
        self.elements.get(el).is_some()
    }

    pub fn is_animating(&self, el: ElementId) -> bool {
        self.elements
            .get(el)
            .is_some_and(|st| !st.animations.is_empty())
    }

    pub fn has_active_animations(&self) -> bool {
        self.elements
            .items
            .iter()
            .any(|(_, st)| !st.animations.is_empty())
    }

    /// Start observing an element. Idempotent: an already-watched element
    /// returns immediately. Installs the full property vocabulary at its
    /// resting values and performs the one initial recomposition (the
    /// identity transform write). The origin string is only written once
    /// an origin property is first assigned.
    pub fn watch(&mut self, el: ElementId) {
        if self.elements.get(el).is_some() {
            return;
        }
        self.elements.insert(el, ElementState::new());
        self.recompose(el);
    }

    /// Last stored value, or the property's resting value if never watched.
    pub fn get(&self, el: ElementId, prop: Property) -> f64 {
        match self.elements.get(el) {
            Some(st) => st.props.get(prop),
            None => prop.default_value(),
        }
    }

    /// Write a property through its cell. Auto-watches. On change: records
    /// the write, recomposes, and pushes the transform string — exactly
    /// once. Equal writes return false and do nothing. In 2D mode, z-axis
    /// properties store without recomposing.
    pub fn set(&mut self, el: ElementId, prop: Property, value: f64) -> bool {
        self.watch(el);
        let changed = match self.elements.get_mut(el) {
            Some(st) => st.props.set(prop, value),
            None => false,
        };
        if changed && (self.cfg.supports_3d || prop.observed_2d()) {
            self.outputs.push_change(Change {
                element: el,
                prop,
                value,
            });
            self.recompose(el);
        }
        changed
    }

    pub fn set_origin_x(&mut self, el: ElementId, value: OriginValue) {
        self.watch(el);
        let changed = match self.elements.get_mut(el) {
            Some(st) => st.origin_x.set(value),
            None => false,
        };
        if changed {
            self.apply_origin(el);
        }
    }

    pub fn set_origin_y(&mut self, el: ElementId, value: OriginValue) {
        self.watch(el);
        let changed = match self.elements.get_mut(el) {
            Some(st) => st.origin_y.set(value),
            None => false,
        };
        if changed {
            self.apply_origin(el);
        }
    }

    /// Origin depth in pixels (3D only on the render side; stored either way).
    pub fn set_origin_z(&mut self, el: ElementId, px: f64) {
        self.watch(el);
        let changed = match self.elements.get_mut(el) {
            Some(st) => st.origin_z.set(OriginValue::Px(px)),
            None => false,
        };
        if changed {
            self.apply_origin(el);
        }
    }

    /// Register a tween. Auto-watches. Captures start/end/delta per target
    /// at call time and parks the record in the element's registry; the
    /// first subsequent tick starts its clock. Returns the record's id.
    ///
    /// An empty target set still completes (and emits its finished event)
    /// at expiry. A second record targeting a property the first is still
    /// animating silently races it — last writer per tick wins.
    pub fn animate<I>(&mut self, el: ElementId, targets: I, opts: impl Into<AnimateOpts>) -> AnimId
    where
        I: IntoIterator<Item = (Property, f64)>,
    {
        self.watch(el);
        let opts = opts.into();
        let duration_ms = opts.duration_ms.unwrap_or(self.cfg.default_duration_ms);
        let id = self.ids.alloc_anim();
        let tracks: Vec<TweenTrack> = targets
            .into_iter()
            .map(|(prop, end)| {
                let start = self.get(el, prop);
                TweenTrack {
                    prop,
                    start,
                    end,
                    delta: end - start,
                }
            })
            .collect();
        log::trace!(
            "animate {el:?} {id:?}: {} tracks over {duration_ms}ms",
            tracks.len()
        );
        if let Some(st) = self.elements.get_mut(el) {
            st.animations.push(AnimRecord {
                id,
                tracks,
                duration_ms,
                ease: opts.ease,
                started: None,
            });
        }
        id
    }

    /// Advance every running record to `now_ms`. Each in-flight record
    /// writes `start + ease(elapsed/duration) * delta` per target; each
    /// changed write recomposes. Records at or past expiry snap their
    /// exact end values, leave the registry, and emit
    /// [`EngineEvent::AnimationFinished`].
    pub fn tick(&mut self, now_ms: f64) -> &Outputs {
        self.outputs.clear();
        let mut scratch = std::mem::take(&mut self.scratch);

        for i in 0..self.elements.items.len() {
            scratch.begin_frame();
            let el = self.elements.items[i].0;
            {
                let st = &mut self.elements.items[i].1;
                for rec in st.animations.iter_mut() {
                    let started = *rec.started.get_or_insert(now_ms);
                    let elapsed = now_ms - started;
                    if elapsed >= rec.duration_ms {
                        for tw in &rec.tracks {
                            scratch.writes.push((tw.prop, tw.end));
                        }
                        scratch.finished.push(rec.id);
                    } else {
                        let k = rec.ease.eval(elapsed / rec.duration_ms);
                        for tw in &rec.tracks {
                            scratch.writes.push((tw.prop, tw.start + k * tw.delta));
                        }
                    }
                }
            }
            for &(prop, value) in &scratch.writes {
                self.set(el, prop, value);
            }
            if !scratch.finished.is_empty() {
                let st = &mut self.elements.items[i].1;
                st.animations.retain(|r| !scratch.finished.contains(&r.id));
                for &anim in &scratch.finished {
                    self.outputs
                        .push_event(EngineEvent::AnimationFinished { element: el, anim });
                }
            }
        }

        self.scratch = scratch;
        &self.outputs
    }

    /// Cancel every record on the element. A never-watched or idle element
    /// is a safe no-op (returns 0). With `finish`, each record's targets
    /// snap to their end values and its finished event fires before the
    /// next record is processed; without, values freeze where the last
    /// tick left them. Cancelled records never tick again.
    pub fn stop(&mut self, el: ElementId, finish: bool) -> usize {
        let records = match self.elements.get_mut(el) {
            Some(st) if !st.animations.is_empty() => std::mem::take(&mut st.animations),
            _ => return 0,
        };
        log::debug!(
            "stop {el:?}: cancelling {} record(s), finish={finish}",
            records.len()
        );
        for rec in &records {
            if finish {
                for tw in &rec.tracks {
                    self.set(el, tw.prop, tw.end);
                }
                self.outputs.push_event(EngineEvent::AnimationFinished {
                    element: el,
                    anim: rec.id,
                });
            } else {
                self.outputs.push_event(EngineEvent::AnimationInterrupted {
                    element: el,
                    anim: rec.id,
                });
            }
        }
        records.len()
    }

    /// `stop` over every element with a non-empty registry.
    pub fn stop_all(&mut self, finish: bool) {
        let busy: Vec<ElementId> = self
            .elements
            .items
            .iter()
            .filter(|(_, st)| !st.animations.is_empty())
            .map(|(id, _)| *id)
            .collect();
        for el in busy {
            self.stop(el, finish);
        }
    }

    /// Rebuild the element's basis from its current cells and push the
    /// rendered transform string. Always from scratch — no frame-to-frame
    /// accumulation, so repeated recompositions cannot drift.
    fn recompose(&mut self, el: ElementId) {
        let digits = self.cfg.trig_digits;
        if self.cfg.supports_3d {
            let t = match self.elements.get(el) {
                Some(st) => st.affine3(),
                None => return,
            };
            let rendered = self.m3.reset().compose(&t, digits).render();
            self.surface.set_transform(el, &rendered);
        } else {
            let t = match self.elements.get(el) {
                Some(st) => st.affine2(),
                None => return,
            };
            let rendered = self.m2.reset().compose(&t, digits).render();
            self.surface.set_transform(el, &rendered);
        }
    }

    fn apply_origin(&mut self, el: ElementId) {
        let rendered = match self.elements.get(el) {
            Some(st) => format!(
                "{} {} {}",
                st.origin_x.get(),
                st.origin_y.get(),
                st.origin_z.get()
            ),
            None => return,
        };
        self.surface.set_origin(el, &rendered);
    }
}
