// src/components/project_modal.rs
use crate::modal::{Choreography, ClickOrigin, CloseTrigger, Cue, Fade, ModalMachine};
use crate::project_catalog::{DetailItem, Project};
use crate::utils;
use gloo::timers::callback::Timeout;
use gloo_events::EventListener;
use gloo_utils::document;
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProjectModalProps {
    pub project: Project,
    #[prop_or_default]
    pub origin: Option<ClickOrigin>,
    /// Fired once the overlay has been detached after closing.
    pub on_closed: Callback<()>,
}

pub enum ProjectModalMsg {
    Cue(u32, Cue),
    Close(CloseTrigger),
}

pub struct ProjectModal {
    machine: ModalMachine,
    timers: Vec<Timeout>,
    escape: Option<EventListener>,
    scroll_locked: bool,
}

impl Component for ProjectModal {
    type Message = ProjectModalMsg;
    type Properties = ProjectModalProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut modal = Self {
            machine: ModalMachine::new(ctx.props().origin.clone()),
            timers: Vec::new(),
            escape: None,
            scroll_locked: false,
        };

        match modal.machine.open() {
            Ok(choreography) => {
                log::info!("opening project {}", ctx.props().project.id);
                let link = ctx.link().clone();
                modal.escape = Some(EventListener::new(&document(), "keydown", move |event| {
                    if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                        if key.key() == "Escape" {
                            link.send_message(ProjectModalMsg::Close(CloseTrigger::Escape));
                        }
                    }
                }));
                modal.play(ctx, choreography);
            }
            Err(e) => log::warn!("{}", e),
        }
        modal
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ProjectModalMsg::Cue(generation, cue) => self.apply(ctx, generation, cue),
            ProjectModalMsg::Close(trigger) => match self.machine.close(trigger) {
                Ok(choreography) => {
                    // Deregister before anything else so a second Escape
                    // cannot reach a closing overlay.
                    self.escape = None;
                    self.play(ctx, choreography);
                    true
                }
                Err(e) => {
                    log::debug!("{}", e);
                    false
                }
            },
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let scene = self.machine.scene();
        if !scene.attached {
            return html! {};
        }

        let project = &ctx.props().project;
        let hero_src = self
            .machine
            .origin()
            .map(|origin| origin.src.clone())
            .unwrap_or_else(|| utils::resource_url(&project.hero_image));

        let on_backdrop = ctx
            .link()
            .callback(|_: MouseEvent| ProjectModalMsg::Close(CloseTrigger::Backdrop));
        // Clicks inside the content never reach the backdrop handler.
        let keep_open = Callback::from(|e: MouseEvent| e.stop_propagation());
        let on_close_button = {
            let link = ctx.link().clone();
            Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                e.stop_propagation();
                link.send_message(ProjectModalMsg::Close(CloseTrigger::Button));
            })
        };

        html! {
            <div
                class={classes!("project-detail-overlay", scene.active.then_some("active"))}
                style={scene.backdrop.as_ref().map(Fade::background_css)}
                onclick={on_backdrop}
            >
                <div class="project-detail-content" onclick={keep_open}>
                    <button class="detail-close-btn" onclick={on_close_button}>{"×"}</button>
                    <div class="detail-hero">
                        <img
                            src={hero_src}
                            alt={project.name.clone()}
                            class="detail-hero-image"
                            style={scene.hero.as_ref().map(|hero| hero.css())}
                        />
                        <div class="detail-title-overlay" style={scene.title.as_ref().map(Fade::opacity_css)}>
                            <h1 class="detail-title">{ project.name.clone() }</h1>
                        </div>
                    </div>
                    <div class="detail-content" style={scene.content.as_ref().map(Fade::opacity_css)}>
                        { for project.items.iter().map(render_detail_item) }
                    </div>
                </div>
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if self.scroll_locked {
            utils::set_body_class("modal-open", false);
        }
    }
}

impl ProjectModal {
    /// Schedule a choreography, replacing whatever was still pending.
    fn play(&mut self, ctx: &Context<Self>, choreography: Choreography) {
        self.timers.clear();
        let generation = choreography.generation;
        for step in choreography.steps {
            if step.at_ms == 0 {
                self.apply(ctx, generation, step.cue);
                continue;
            }
            let link = ctx.link().clone();
            let cue = step.cue;
            self.timers.push(Timeout::new(step.at_ms, move || {
                link.send_message(ProjectModalMsg::Cue(generation, cue));
            }));
        }
    }

    fn apply(&mut self, ctx: &Context<Self>, generation: u32, cue: Cue) -> bool {
        if !self.machine.apply(generation, cue) {
            return false;
        }

        if !self.machine.listens_for_escape() {
            self.escape = None;
        }

        let locked = self.machine.scene().scroll_locked;
        if locked != self.scroll_locked {
            utils::set_body_class("modal-open", locked);
            self.scroll_locked = locked;
        }

        if cue == Cue::Detach {
            log::info!("closed project {}", ctx.props().project.id);
            ctx.props().on_closed.emit(());
        }
        true
    }
}

fn render_detail_item(item: &DetailItem) -> Html {
    html! {
        <div class="detail-item">
            <div class="detail-item-content">
                <div class="detail-text">
                    <h3>{ item.title.clone() }</h3>
                    <p>{ item.description.clone() }</p>
                    <div class="detail-stats">
                        { for item.stats.iter().map(|stat| html! {
                            <div class="stat-box">
                                <div class="stat-number">{ stat.number.clone() }</div>
                                <div class="stat-label">{ stat.label.clone() }</div>
                            </div>
                        }) }
                    </div>
                </div>
                <div class="detail-image">
                    <img src={utils::resource_url(&item.image)} alt={item.title.clone()} />
                </div>
            </div>
        </div>
    }
}
