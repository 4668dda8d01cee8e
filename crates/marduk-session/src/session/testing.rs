//! Counting collaborators for lifecycle and host tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::{Result, bail};

use crate::core::{App, AppControl, DragTarget, InputController};
use crate::device::{
    BackendFactory, BackendVariant, BoxedPolicy, ContextPolicy, PresentSurface, ResumeStatus,
    SurfaceDesc, SurfaceTransform, SuspendableDevice, SwapchainDevice, SwapchainPolicy,
};
use crate::input::PointerSample;
use crate::time::FrameTime;

/// Ordered record of what the mock device did to its surfaces.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DeviceEvent {
    SurfaceCreated,
    SurfaceDropped,
    IdleWait,
}

#[derive(Debug, Default)]
pub struct Counters {
    pub surfaces_created: Cell<u32>,
    pub surfaces_dropped: Cell<u32>,
    pub idle_waits: Cell<u32>,
    pub context_resumes: Cell<u32>,
    pub context_suspends: Cell<u32>,
    pub invalidates: Cell<u32>,
    pub events: RefCell<Vec<DeviceEvent>>,
}

impl Counters {
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn live_surfaces(&self) -> u32 {
        self.surfaces_created.get() - self.surfaces_dropped.get()
    }

    pub fn events(&self) -> Vec<DeviceEvent> {
        self.events.borrow().clone()
    }

    fn record(&self, event: DeviceEvent) {
        self.events.borrow_mut().push(event);
    }
}

fn bump(c: &Cell<u32>) {
    c.set(c.get() + 1);
}

/// Native window stand-in. Clones share geometry so a test can rotate or
/// resize the "physical" window under a live surface.
#[derive(Debug, Clone)]
pub struct MockWindow {
    geometry: Rc<Cell<SurfaceDesc>>,
    usable: bool,
}

impl MockWindow {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            geometry: Rc::new(Cell::new(SurfaceDesc::new(
                width,
                height,
                SurfaceTransform::Identity,
            ))),
            usable: true,
        }
    }

    /// A window whose handle cannot back a surface.
    pub fn unusable() -> Self {
        Self {
            usable: false,
            ..Self::new(0, 0)
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        let mut g = self.geometry.get();
        g.width = width;
        g.height = height;
        self.geometry.set(g);
    }

    pub fn rotate(&self, transform: SurfaceTransform) {
        let mut g = self.geometry.get();
        g.pre_transform = transform;
        self.geometry.set(g);
    }
}

#[derive(Debug)]
pub struct MockSurface {
    window: MockWindow,
    desc: SurfaceDesc,
    counters: Rc<Counters>,
}

impl MockSurface {
    pub fn new(window: MockWindow, counters: Rc<Counters>) -> Self {
        bump(&counters.surfaces_created);
        counters.record(DeviceEvent::SurfaceCreated);
        Self {
            desc: window.geometry.get(),
            window,
            counters,
        }
    }
}

impl Drop for MockSurface {
    fn drop(&mut self) {
        bump(&self.counters.surfaces_dropped);
        self.counters.record(DeviceEvent::SurfaceDropped);
    }
}

impl PresentSurface for MockSurface {
    fn refit(&mut self, size_hint: Option<(u32, u32)>, _transform: SurfaceTransform) -> SurfaceDesc {
        let actual = self.window.geometry.get();
        let (width, height) = size_hint.unwrap_or((actual.width, actual.height));
        self.desc = SurfaceDesc::new(width, height, actual.pre_transform);
        self.desc
    }

    fn desc(&self) -> SurfaceDesc {
        self.desc
    }
}

pub struct MockSwapchainDevice {
    counters: Rc<Counters>,
}

impl SwapchainDevice for MockSwapchainDevice {
    type Window = MockWindow;
    type Surface = MockSurface;

    fn create_surface(&mut self, window: &MockWindow) -> Result<MockSurface> {
        if !window.usable {
            bail!("window cannot back a surface");
        }
        let g = window.geometry.get();
        if g.width == 0 || g.height == 0 {
            bail!("window has zero size ({}x{})", g.width, g.height);
        }
        Ok(MockSurface::new(window.clone(), Rc::clone(&self.counters)))
    }

    fn wait_idle(&self) {
        bump(&self.counters.idle_waits);
        self.counters.record(DeviceEvent::IdleWait);
    }
}

pub struct MockContextDevice {
    counters: Rc<Counters>,
    surface: Option<MockSurface>,
}

impl SuspendableDevice for MockContextDevice {
    type Window = MockWindow;
    type Surface = MockSurface;

    fn resume(&mut self, window: &MockWindow) -> ResumeStatus {
        bump(&self.counters.context_resumes);
        if !window.usable {
            return ResumeStatus::BadNativeWindow;
        }
        if self.surface.is_none() {
            self.surface = Some(MockSurface::new(window.clone(), Rc::clone(&self.counters)));
        }
        ResumeStatus::Success
    }

    fn suspend(&mut self) {
        bump(&self.counters.context_suspends);
        self.surface = None;
    }

    fn invalidate(&mut self) {
        bump(&self.counters.invalidates);
    }

    fn surface(&self) -> Option<&MockSurface> {
        self.surface.as_ref()
    }

    fn surface_mut(&mut self) -> Option<&mut MockSurface> {
        self.surface.as_mut()
    }
}

pub struct MockFactory {
    pub counters: Rc<Counters>,
    /// Simulates a variant with no working GPU binding.
    pub fail: bool,
}

impl MockFactory {
    pub fn new() -> Self {
        Self {
            counters: Counters::shared(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }
}

impl BackendFactory for MockFactory {
    type Window = MockWindow;
    type Surface = MockSurface;

    fn create(
        &mut self,
        window: &MockWindow,
        variant: BackendVariant,
    ) -> Result<BoxedPolicy<MockWindow, MockSurface>> {
        if self.fail {
            bail!("no GPU binding for {variant}");
        }
        if !window.usable {
            bail!("window cannot back a surface");
        }

        let counters = Rc::clone(&self.counters);
        let surface = MockSurface::new(window.clone(), Rc::clone(&counters));
        let policy: BoxedPolicy<MockWindow, MockSurface> = match variant {
            BackendVariant::SwapchainRecreate => {
                Box::new(SwapchainPolicy::new(MockSwapchainDevice { counters }, surface))
            }
            BackendVariant::ContextSuspend => Box::new(ContextPolicy::new(MockContextDevice {
                counters,
                surface: Some(surface),
            })),
        };
        Ok(policy)
    }
}

/// Gesture callbacks as seen by the application.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Begin(f32, f32),
    Move(f32, f32),
    End,
    StartPinch(PointerSample, PointerSample),
    PinchMove(PointerSample, PointerSample),
    EndPinch,
    DoubleTap(PointerSample),
}

#[derive(Debug, Default)]
pub struct RecordingApp {
    pub resizes: Vec<(u32, u32)>,
    /// `true` for a surface handed over, `false` for a release.
    pub swap_chain_resets: Vec<bool>,
    pub frames: Vec<SurfaceDesc>,
    pub gestures: Vec<Gesture>,
    pub exit_on_frame: bool,
}

impl DragTarget for RecordingApp {
    fn begin_drag(&mut self, x: f32, y: f32) -> bool {
        self.gestures.push(Gesture::Begin(x, y));
        true
    }

    fn drag_move(&mut self, x: f32, y: f32) -> bool {
        self.gestures.push(Gesture::Move(x, y));
        true
    }

    fn end_drag(&mut self) {
        self.gestures.push(Gesture::End);
    }
}

impl InputController for RecordingApp {
    fn start_pinch(&mut self, a: PointerSample, b: PointerSample) {
        self.gestures.push(Gesture::StartPinch(a, b));
    }

    fn pinch_move(&mut self, a: PointerSample, b: PointerSample) {
        self.gestures.push(Gesture::PinchMove(a, b));
    }

    fn end_pinch(&mut self) {
        self.gestures.push(Gesture::EndPinch);
    }

    fn double_tap(&mut self, at: PointerSample) {
        self.gestures.push(Gesture::DoubleTap(at));
    }
}

impl App<MockSurface> for RecordingApp {
    fn on_resize(&mut self, width: u32, height: u32) {
        self.resizes.push((width, height));
    }

    fn reset_swap_chain(&mut self, surface: Option<&MockSurface>) {
        self.swap_chain_resets.push(surface.is_some());
    }

    fn on_frame(&mut self, surface: &mut MockSurface, _time: FrameTime) -> AppControl {
        self.frames.push(surface.desc());
        if self.exit_on_frame {
            AppControl::Exit
        } else {
            AppControl::Continue
        }
    }
}
