//! Shared fixtures for the swipekit test suites: a recording render
//! surface, fake viewport metrics, and canonical carousel scenes loaded
//! from an embedded manifest.

use std::collections::HashMap;

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

use swipekit_transform_core::{
    Config, ElementId, Engine, IdAllocator, RenderSurface, StepScheduler,
};
use swipekit_view_core::{GestureEvent, Metrics, Rect, View, ViewConfig};

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../scenes/manifest.json");
    serde_json::from_str(raw).expect("scene manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    scenes: HashMap<String, SceneSpec>,
}

/// One canonical carousel layout: viewport size, page count, and the
/// natural (unscaled) rendered size of every page image.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SceneSpec {
    pub viewport: [f64; 2],
    pub pages: usize,
    pub image: [f64; 2],
}

pub fn scene(name: &str) -> Result<SceneSpec> {
    MANIFEST
        .scenes
        .get(name)
        .copied()
        .ok_or_else(|| anyhow!("unknown scene {name:?}"))
}

/// Render surface that records the last transform/origin string written
/// per element, plus write counts, so tests can assert both content and
/// recomposition frequency.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    transforms: HashMap<ElementId, (String, usize)>,
    origins: HashMap<ElementId, (String, usize)>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transform_of(&self, element: ElementId) -> Option<&str> {
        self.transforms.get(&element).map(|(s, _)| s.as_str())
    }

    pub fn origin_of(&self, element: ElementId) -> Option<&str> {
        self.origins.get(&element).map(|(s, _)| s.as_str())
    }

    /// How many transform strings have been written for this element.
    pub fn transform_writes(&self, element: ElementId) -> usize {
        self.transforms.get(&element).map_or(0, |(_, n)| *n)
    }

    pub fn origin_writes(&self, element: ElementId) -> usize {
        self.origins.get(&element).map_or(0, |(_, n)| *n)
    }
}

impl RenderSurface for RecordingSurface {
    fn set_transform(&mut self, element: ElementId, transform: &str) {
        let entry = self
            .transforms
            .entry(element)
            .or_insert_with(|| (String::new(), 0));
        entry.0.clear();
        entry.0.push_str(transform);
        entry.1 += 1;
    }

    fn set_origin(&mut self, element: ElementId, origin: &str) {
        let entry = self
            .origins
            .entry(element)
            .or_insert_with(|| (String::new(), 0));
        entry.0.clear();
        entry.0.push_str(origin);
        entry.1 += 1;
    }
}

/// Viewport measurement fake: tests decide what each element's rendered
/// rectangle currently is (measurement belongs to the host, so the
/// fixtures make it explicit instead of deriving it from transforms).
#[derive(Debug, Default)]
pub struct FakeMetrics {
    rects: HashMap<ElementId, Rect>,
}

impl FakeMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rect(&mut self, element: ElementId, rect: Rect) {
        self.rects.insert(element, rect);
    }

    /// Rect of a `natural`-sized box centered in `viewport` and scaled
    /// about its center — how a zoomed carousel image actually measures.
    pub fn set_centered(
        &mut self,
        element: ElementId,
        viewport: [f64; 2],
        natural: [f64; 2],
        scale: f64,
    ) {
        let w = natural[0] * scale;
        let h = natural[1] * scale;
        self.set_rect(
            element,
            Rect::new((viewport[0] - w) / 2.0, (viewport[1] - h) / 2.0, w, h),
        );
    }
}

impl Metrics for FakeMetrics {
    fn bounding_rect(&self, element: ElementId) -> Rect {
        self.rects.get(&element).copied().unwrap_or_default()
    }
}

/// A fully wired carousel: engine over a recording surface, view, fake
/// metrics with every image measured at natural size, and a 16 ms step
/// driver.
pub struct CarouselHarness {
    pub engine: Engine<RecordingSurface>,
    pub view: View,
    pub metrics: FakeMetrics,
    pub scheduler: StepScheduler,
    pub strip: ElementId,
    pub images: Vec<ElementId>,
    pub spec: SceneSpec,
}

impl CarouselHarness {
    /// Feed one gesture event through the view.
    pub fn handle(&mut self, event: GestureEvent) {
        self.view.handle(&mut self.engine, &self.metrics, event);
    }

    /// Drive ticks until all animations are done (bounded). Returns the
    /// number of ticks executed.
    pub fn settle(&mut self, max_ticks: usize) -> usize {
        self.scheduler.run_until_idle(&mut self.engine, max_ticks)
    }

    /// Re-measure an image as centered at the given zoom scale.
    pub fn measure_scaled(&mut self, element: ElementId, scale: f64) {
        self.metrics
            .set_centered(element, self.spec.viewport, self.spec.image, scale);
    }
}

/// Build the named scene into a ready harness.
pub fn carousel(scene_name: &str) -> Result<CarouselHarness> {
    let spec = scene(scene_name)?;
    let mut ids = IdAllocator::new();
    let strip = ids.alloc_element();
    let images: Vec<ElementId> = (0..spec.pages).map(|_| ids.alloc_element()).collect();

    let mut engine = Engine::new(Config::default(), RecordingSurface::new());
    let cfg = ViewConfig {
        viewport_width: spec.viewport[0],
        viewport_height: spec.viewport[1],
    };
    let view = View::new(&mut engine, cfg, strip, images.clone())
        .with_context(|| format!("building carousel view for scene {scene_name:?}"))?;

    let mut metrics = FakeMetrics::new();
    for &image in &images {
        metrics.set_centered(image, spec.viewport, spec.image, 1.0);
    }

    Ok(CarouselHarness {
        engine,
        view,
        metrics,
        scheduler: StepScheduler::default(),
        strip,
        images,
        spec,
    })
}
