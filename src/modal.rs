// src/modal.rs
//
// Project detail overlay lifecycle. Each transition produces a Choreography:
// a list of timed cues the component plays back with timers. The machine owns
// the resulting visual scene, so the component view only renders it.

use crate::error::TransitionError;
use crate::project_catalog::{Project, ProjectCatalog};

pub const OPEN_FRAME_DELAY_MS: u32 = 50;
pub const BACKDROP_DELAY_MS: u32 = 200;
pub const BACKDROP_FADE_MS: u32 = 500;
pub const HERO_EXPAND_MS: u32 = 600;
pub const CONTENT_STAGGER_MS: u32 = 300;
pub const CONTENT_FADE_MS: u32 = 400;
pub const TITLE_DELAY_MS: u32 = 100;
pub const ACTIVATE_DELAY_MS: u32 = 10;
pub const OVERLAY_FADE_MS: u32 = 300;
pub const CONTENT_HIDE_MS: u32 = 200;
pub const HERO_RETURN_MS: u32 = 400;

pub const PINNED_RADIUS_PX: f64 = 12.0;
pub const EXPANDED_BRIGHTNESS: f64 = 0.7;
pub const BACKDROP_ALPHA: f64 = 0.95;
const PINNED_Z_INDEX: i32 = 9999;
const EXPANDED_Z_INDEX: i32 = 1;
const HERO_EASING: &str = "cubic-bezier(0.4, 0.0, 0.2, 1)";

/// On-screen bounding box in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// Thumbnail source and position captured at click time.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickOrigin {
    pub src: String,
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    Button,
    Backdrop,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Attach,
    Activate,
    Expand,
    RevealContent,
    Settle,
    HideContent,
    ReturnHero,
    Deactivate,
    Detach,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub at_ms: u32,
    pub cue: Cue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choreography {
    pub generation: u32,
    pub steps: Vec<Step>,
}

impl Choreography {
    fn new(generation: u32, steps: Vec<(u32, Cue)>) -> Self {
        Self {
            generation,
            steps: steps
                .into_iter()
                .map(|(at_ms, cue)| Step { at_ms, cue })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeroPlacement {
    Pinned(Rect),
    Filled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeroStyle {
    pub placement: HeroPlacement,
    pub radius_px: f64,
    pub brightness: f64,
    pub z_index: i32,
    pub transition: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fade {
    pub opacity: f64,
    pub transition: Option<String>,
}

/// Visual state of the overlay. `None` styles are left to the stylesheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModalScene {
    pub attached: bool,
    pub active: bool,
    pub scroll_locked: bool,
    pub backdrop: Option<Fade>,
    pub hero: Option<HeroStyle>,
    pub content: Option<Fade>,
    pub title: Option<Fade>,
}

fn secs(ms: u32) -> f64 {
    ms as f64 / 1000.0
}

fn transition_css(transition: &Option<String>) -> &str {
    transition.as_deref().unwrap_or("none")
}

impl HeroStyle {
    fn pinned(rect: Rect, transition: Option<String>) -> Self {
        Self {
            placement: HeroPlacement::Pinned(rect),
            radius_px: PINNED_RADIUS_PX,
            brightness: 1.0,
            z_index: PINNED_Z_INDEX,
            transition,
        }
    }

    pub fn css(&self) -> String {
        let position = match self.placement {
            HeroPlacement::Pinned(rect) => format!(
                "position: fixed; top: {}px; left: {}px; width: {}px; height: {}px;",
                rect.top, rect.left, rect.width, rect.height
            ),
            HeroPlacement::Filled => {
                "position: absolute; top: 0; left: 0; width: 100%; height: 100%;".to_string()
            }
        };
        format!(
            "{} object-fit: cover; border-radius: {}px; filter: brightness({}); z-index: {}; transition: {};",
            position,
            self.radius_px,
            self.brightness,
            self.z_index,
            transition_css(&self.transition)
        )
    }
}

impl Fade {
    fn new(opacity: f64, transition: Option<String>) -> Self {
        Self {
            opacity,
            transition,
        }
    }

    pub fn opacity_css(&self) -> String {
        format!(
            "opacity: {}; transition: {};",
            self.opacity,
            transition_css(&self.transition)
        )
    }

    pub fn background_css(&self) -> String {
        format!(
            "background: rgba(0, 0, 0, {}); transition: {};",
            self.opacity,
            transition_css(&self.transition)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalMachine {
    phase: ModalPhase,
    origin: Option<ClickOrigin>,
    scene: ModalScene,
    generation: u32,
}

impl ModalMachine {
    pub fn new(origin: Option<ClickOrigin>) -> Self {
        Self {
            phase: ModalPhase::Closed,
            origin,
            scene: ModalScene::default(),
            generation: 0,
        }
    }

    pub fn scene(&self) -> &ModalScene {
        &self.scene
    }

    pub fn origin(&self) -> Option<&ClickOrigin> {
        self.origin.as_ref()
    }

    /// The Escape listener must exist exactly while this is true.
    pub fn listens_for_escape(&self) -> bool {
        matches!(self.phase, ModalPhase::Opening | ModalPhase::Open)
    }

    pub fn open(&mut self) -> Result<Choreography, TransitionError> {
        if self.phase != ModalPhase::Closed {
            return Err(TransitionError {
                from: self.phase,
                action: "open",
            });
        }
        self.phase = ModalPhase::Opening;
        self.generation += 1;

        let steps = if self.origin.is_some() {
            let expand_at = OPEN_FRAME_DELAY_MS;
            let reveal_at = expand_at + CONTENT_STAGGER_MS;
            let settle_at = expand_at
                + HERO_EXPAND_MS
                    .max(BACKDROP_DELAY_MS + BACKDROP_FADE_MS)
                    .max(CONTENT_STAGGER_MS + CONTENT_FADE_MS + TITLE_DELAY_MS);
            vec![
                (0, Cue::Attach),
                (expand_at, Cue::Expand),
                (reveal_at, Cue::RevealContent),
                (settle_at, Cue::Settle),
            ]
        } else {
            vec![
                (0, Cue::Attach),
                (ACTIVATE_DELAY_MS, Cue::Activate),
                (ACTIVATE_DELAY_MS + OVERLAY_FADE_MS, Cue::Settle),
            ]
        };
        Ok(Choreography::new(self.generation, steps))
    }

    pub fn close(&mut self, trigger: CloseTrigger) -> Result<Choreography, TransitionError> {
        if !matches!(self.phase, ModalPhase::Opening | ModalPhase::Open) {
            return Err(TransitionError {
                from: self.phase,
                action: "close",
            });
        }
        log::debug!("closing modal from {:?} via {:?}", self.phase, trigger);
        self.phase = ModalPhase::Closing;
        self.generation += 1;

        let steps = if self.origin.is_some() {
            let deactivate_at = CONTENT_HIDE_MS + HERO_RETURN_MS;
            vec![
                (0, Cue::HideContent),
                (CONTENT_HIDE_MS, Cue::ReturnHero),
                (deactivate_at, Cue::Deactivate),
                (deactivate_at + OVERLAY_FADE_MS, Cue::Detach),
            ]
        } else {
            vec![(0, Cue::Deactivate), (OVERLAY_FADE_MS, Cue::Detach)]
        };
        Ok(Choreography::new(self.generation, steps))
    }

    /// Apply one cue. Cues from a superseded choreography are ignored and
    /// reported as `false`.
    pub fn apply(&mut self, generation: u32, cue: Cue) -> bool {
        if generation != self.generation {
            log::debug!("dropping stale modal cue {:?}", cue);
            return false;
        }

        let origin_rect = self.origin.as_ref().map(|o| o.rect);
        let scene = &mut self.scene;
        match cue {
            Cue::Attach => {
                scene.attached = true;
                scene.scroll_locked = true;
                if let Some(rect) = origin_rect {
                    scene.active = true;
                    scene.backdrop = Some(Fade::new(0.0, None));
                    scene.hero = Some(HeroStyle::pinned(rect, None));
                    scene.content = Some(Fade::new(0.0, None));
                    scene.title = Some(Fade::new(0.0, None));
                }
            }
            Cue::Activate => scene.active = true,
            Cue::Expand => {
                scene.backdrop = Some(Fade::new(
                    BACKDROP_ALPHA,
                    Some(format!(
                        "background {}s ease {}s",
                        secs(BACKDROP_FADE_MS),
                        secs(BACKDROP_DELAY_MS)
                    )),
                ));
                scene.hero = Some(HeroStyle {
                    placement: HeroPlacement::Filled,
                    radius_px: 0.0,
                    brightness: EXPANDED_BRIGHTNESS,
                    z_index: EXPANDED_Z_INDEX,
                    transition: Some(format!("all {}s {}", secs(HERO_EXPAND_MS), HERO_EASING)),
                });
            }
            Cue::RevealContent => {
                scene.content = Some(Fade::new(
                    1.0,
                    Some(format!("opacity {}s ease", secs(CONTENT_FADE_MS))),
                ));
                scene.title = Some(Fade::new(
                    1.0,
                    Some(format!(
                        "opacity {}s ease {}s",
                        secs(CONTENT_FADE_MS),
                        secs(TITLE_DELAY_MS)
                    )),
                ));
            }
            Cue::Settle => {
                if self.phase == ModalPhase::Opening {
                    self.phase = ModalPhase::Open;
                }
            }
            Cue::HideContent => {
                let hide = Some(format!("opacity {}s ease", secs(CONTENT_HIDE_MS)));
                scene.content = Some(Fade::new(0.0, hide.clone()));
                scene.title = Some(Fade::new(0.0, hide));
            }
            Cue::ReturnHero => {
                if let Some(rect) = origin_rect {
                    scene.hero = Some(HeroStyle::pinned(
                        rect,
                        Some(format!("all {}s {}", secs(HERO_RETURN_MS), HERO_EASING)),
                    ));
                }
            }
            Cue::Deactivate => scene.active = false,
            Cue::Detach => {
                *scene = ModalScene::default();
                self.phase = ModalPhase::Closed;
            }
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OpenRequest<'a> {
    Accepted(&'a Project),
    UnknownProject,
    Busy,
}

/// Admits at most one modal instance at a time. A request made while an
/// instance exists (in any phase) is refused rather than queued.
#[derive(Debug, Default)]
pub struct ModalSlot {
    active: Option<String>,
}

impl ModalSlot {
    pub fn request<'c>(&mut self, catalog: &'c ProjectCatalog, id: &str) -> OpenRequest<'c> {
        if self.active.is_some() {
            return OpenRequest::Busy;
        }
        match catalog.get(id) {
            Some(project) => {
                self.active = Some(id.to_string());
                OpenRequest::Accepted(project)
            }
            None => OpenRequest::UnknownProject,
        }
    }

    pub fn release(&mut self) {
        self.active = None;
    }

    pub fn is_occupied(&self) -> bool {
        self.active.is_some()
    }
}
