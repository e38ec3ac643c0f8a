//! Drawer open/close state machine.
//!
//! The controller models the animation as a progress value in `0.0..=1.0`
//! advanced by explicit [`DrawerController::advance`] steps; rendering is
//! out of scope. Gesture-driven dismissal maps drag distance onto the same
//! progress value.

use std::fmt;
use std::time::Duration;

use tracing::debug;

use tally_core::config::DrawerConfig;

/// Drawer lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerState {
    Closed,
    Opening,
    Open,
    Closing,
}

type SelectFn = Box<dyn FnMut(&str) + Send>;

/// What a screen wants the drawer to show.
pub struct DrawerRequest {
    pub title: String,
    pub options: Vec<String>,
    on_select: SelectFn,
}

impl DrawerRequest {
    pub fn new(
        title: impl Into<String>,
        options: Vec<String>,
        on_select: impl FnMut(&str) + Send + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            options,
            on_select: Box::new(on_select),
        }
    }

    fn select(&mut self, value: &str) {
        (self.on_select)(value);
    }
}

impl fmt::Debug for DrawerRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawerRequest")
            .field("title", &self.title)
            .field("options", &self.options.len())
            .finish_non_exhaustive()
    }
}

/// An in-flight progress animation between two values.
#[derive(Debug)]
struct Animation {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
}

impl Animation {
    const fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    fn value(&self) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let t = (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        (self.to - self.from).mul_add(t, self.from)
    }

    fn done(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// The single shared drawer instance.
#[derive(Debug)]
pub struct DrawerController {
    config: DrawerConfig,
    state: DrawerState,
    request: Option<DrawerRequest>,
    progress: f32,
    animation: Option<Animation>,
}

impl DrawerController {
    pub const fn new(config: DrawerConfig) -> Self {
        Self {
            config,
            state: DrawerState::Closed,
            request: None,
            progress: 0.0,
            animation: None,
        }
    }

    pub const fn state(&self) -> DrawerState {
        self.state
    }

    /// Animation progress, 0.0 (hidden) to 1.0 (fully open).
    pub const fn progress(&self) -> f32 {
        self.progress
    }

    pub fn title(&self) -> Option<&str> {
        self.request.as_ref().map(|r| r.title.as_str())
    }

    pub fn options(&self) -> Option<&[String]> {
        self.request.as_ref().map(|r| r.options.as_slice())
    }

    /// Open with `request`. From Closed this starts the opening animation;
    /// while already opening/open it only replaces the stored request.
    /// Closing is deliberately treated like Closed: reopening mid-close
    /// restarts the opening animation from the current progress instead of
    /// forcing the user to wait for the close to land.
    pub fn open(&mut self, request: DrawerRequest) {
        match self.state {
            DrawerState::Closed | DrawerState::Closing => {
                debug!(title = %request.title, "Opening drawer");
                self.request = Some(request);
                self.state = DrawerState::Opening;
                self.animation = Some(Animation::new(
                    self.progress,
                    1.0,
                    self.config.open_duration(),
                ));
            }
            DrawerState::Opening | DrawerState::Open => {
                debug!(title = %request.title, "Replacing drawer request");
                self.request = Some(request);
            }
        }
    }

    /// Animate closed and clear the request once the animation lands.
    /// No-op when already closed or closing.
    pub fn close(&mut self) {
        match self.state {
            DrawerState::Opening | DrawerState::Open => {
                debug!("Closing drawer");
                self.state = DrawerState::Closing;
                self.animation = Some(Animation::new(
                    self.progress,
                    0.0,
                    self.config.close_duration(),
                ));
            }
            DrawerState::Closed | DrawerState::Closing => {}
        }
    }

    /// Deliver a selection to the request's callback, then close. Valid
    /// only while fully open; returns whether a selection was delivered.
    pub fn select_option(&mut self, value: &str) -> bool {
        if self.state != DrawerState::Open {
            return false;
        }
        if let Some(request) = &mut self.request {
            request.select(value);
        }
        self.close();
        true
    }

    /// Track a downward drag while open: progress falls linearly with
    /// distance up to the configured maximum.
    pub fn drag_update(&mut self, distance: f32) {
        if self.state != DrawerState::Open {
            return;
        }
        self.animation = None;
        self.progress = 1.0 - (distance / self.config.drag_max_distance).clamp(0.0, 1.0);
    }

    /// End a drag: past the dismiss threshold commit to closing,
    /// otherwise snap back to fully open.
    pub fn drag_release(&mut self, distance: f32) {
        if self.state != DrawerState::Open {
            return;
        }
        if distance >= self.config.dismiss_threshold {
            self.close();
        } else {
            self.animation = Some(Animation::new(
                self.progress,
                1.0,
                self.config.close_duration(),
            ));
        }
    }

    /// Advance the running animation by `dt`, settling terminal states.
    pub fn advance(&mut self, dt: Duration) {
        let Some(animation) = &mut self.animation else {
            return;
        };
        animation.elapsed += dt;
        self.progress = animation.value();

        if animation.done() {
            self.animation = None;
            match self.state {
                DrawerState::Opening => self.state = DrawerState::Open,
                DrawerState::Closing => {
                    self.state = DrawerState::Closed;
                    self.request = None;
                }
                // Snap-back after a released drag ends here.
                DrawerState::Open | DrawerState::Closed => {}
            }
        }
    }
}
