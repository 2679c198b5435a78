// src/components/projects_page.rs
use crate::components::project_modal::ProjectModal;
use crate::modal::{ClickOrigin, ModalSlot, OpenRequest};
use crate::motion_config::MotionConfig;
use crate::project_catalog::{Project, ProjectCatalog};
use crate::scroll_fx::{fade_ratio, FadeUpdate, ItemFade};
use crate::utils;
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use gloo_events::EventListener;
use gloo_utils::{document, window};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlImageElement, KeyboardEvent};
use yew::prelude::*;

const APPEAR_STAGGER_MS: u32 = 100;

#[derive(Properties, PartialEq)]
pub struct ProjectsPageProps {
    pub catalog: ProjectCatalog,
    pub config: MotionConfig,
}

pub enum ProjectsPageMsg {
    IntroFinished,
    ScheduleFade,
    ApplyFade,
    Appear(usize),
    SelectItem(usize),
    ModalClosed,
    ImageLoaded(usize),
    ImageFailed(usize),
    Escape,
}

#[derive(Clone, Copy, PartialEq)]
enum ImageStatus {
    Loading,
    Loaded,
    Failed,
}

struct ItemView {
    fade: ItemFade,
    appear: Option<Timeout>,
    image: ImageStatus,
    item_ref: NodeRef,
    image_ref: NodeRef,
}

struct ActiveModal {
    project: Project,
    origin: Option<ClickOrigin>,
}

pub struct ProjectsPage {
    items: Vec<ItemView>,
    intro_active: bool,
    frame_pending: bool,
    frame: Option<AnimationFrame>,
    listeners: Vec<EventListener>,
    intro: Option<Timeout>,
    slot: ModalSlot,
    active: Option<ActiveModal>,
}

impl Component for ProjectsPage {
    type Message = ProjectsPageMsg;
    type Properties = ProjectsPageProps;

    fn create(ctx: &Context<Self>) -> Self {
        utils::set_body_class("intro-active", true);
        utils::scroll_to_top();

        let link = ctx.link().clone();
        let intro = Timeout::new(ctx.props().config.intro.listing_ms, move || {
            link.send_message(ProjectsPageMsg::IntroFinished);
        });

        let link = ctx.link().clone();
        let escape = EventListener::new(&document(), "keydown", move |event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                if key.key() == "Escape" {
                    link.send_message(ProjectsPageMsg::Escape);
                }
            }
        });

        let items = (0..ctx.props().catalog.len())
            .map(|_| ItemView {
                fade: ItemFade::default(),
                appear: None,
                image: ImageStatus::Loading,
                item_ref: NodeRef::default(),
                image_ref: NodeRef::default(),
            })
            .collect();

        Self {
            items,
            intro_active: true,
            frame_pending: false,
            frame: None,
            listeners: vec![escape],
            intro: Some(intro),
            slot: ModalSlot::default(),
            active: None,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            ProjectsPageMsg::IntroFinished => {
                self.intro_active = false;
                self.intro = None;
                utils::set_body_class("intro-active", false);

                let link = ctx.link().clone();
                self.listeners
                    .push(EventListener::new(&window(), "scroll", move |_| {
                        link.send_message(ProjectsPageMsg::ScheduleFade);
                    }));
                ctx.link().send_message(ProjectsPageMsg::ScheduleFade);
                true
            }
            ProjectsPageMsg::ScheduleFade => {
                if self.frame_pending {
                    return false;
                }
                self.frame_pending = true;
                let link = ctx.link().clone();
                self.frame = Some(request_animation_frame(move |_| {
                    link.send_message(ProjectsPageMsg::ApplyFade);
                }));
                false
            }
            ProjectsPageMsg::ApplyFade => {
                self.frame_pending = false;
                self.frame = None;
                self.apply_fade(ctx)
            }
            ProjectsPageMsg::Appear(index) => match self.items.get_mut(index) {
                Some(item) => {
                    item.appear = None;
                    item.fade.appear()
                }
                None => false,
            },
            ProjectsPageMsg::SelectItem(index) => {
                if self.intro_active {
                    return false;
                }
                let catalog = &ctx.props().catalog;
                let Some(id) = catalog.id_at(index) else {
                    return false;
                };
                match self.slot.request(catalog, id) {
                    OpenRequest::Accepted(project) => {
                        let origin = self.capture_origin(index);
                        log::debug!("project {} clicked at {:?}", id, origin.as_ref().map(|o| o.rect));
                        self.active = Some(ActiveModal {
                            project: project.clone(),
                            origin,
                        });
                        true
                    }
                    OpenRequest::UnknownProject => {
                        log::debug!("no project named {}", id);
                        false
                    }
                    OpenRequest::Busy => {
                        log::debug!("ignoring {}: a project is already open", id);
                        false
                    }
                }
            }
            ProjectsPageMsg::ModalClosed => {
                self.slot.release();
                self.active = None;
                true
            }
            ProjectsPageMsg::ImageLoaded(index) => self.set_image_status(index, ImageStatus::Loaded),
            ProjectsPageMsg::ImageFailed(index) => {
                let src = self
                    .items
                    .get(index)
                    .and_then(|item| item.image_ref.cast::<HtmlImageElement>())
                    .map(|img| img.src())
                    .unwrap_or_default();
                log::warn!("Failed to load image: {}", src);
                self.set_image_status(index, ImageStatus::Failed)
            }
            ProjectsPageMsg::Escape => {
                if !self.slot.is_occupied() {
                    utils::navigate("index.html");
                }
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let catalog = &ctx.props().catalog;
        let modal = match &self.active {
            Some(active) => html! {
                <ProjectModal
                    project={active.project.clone()}
                    origin={active.origin.clone()}
                    on_closed={ctx.link().callback(|_| ProjectsPageMsg::ModalClosed)}
                />
            },
            None => html! {},
        };

        html! {
            <div class="projects-page">
                <section class="projects-grid">
                    { for catalog
                        .listed()
                        .zip(self.items.iter())
                        .enumerate()
                        .map(|(index, (project, item))| self.render_item(ctx, index, project, item)) }
                </section>
                { modal }
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if self.intro_active {
            utils::set_body_class("intro-active", false);
        }
    }
}

impl ProjectsPage {
    fn apply_fade(&mut self, ctx: &Context<Self>) -> bool {
        let Some(metrics) = utils::scroll_metrics() else {
            return false;
        };

        let mut changed = false;
        for (index, item) in self.items.iter_mut().enumerate() {
            let Some(element) = item.item_ref.cast::<Element>() else {
                continue;
            };
            let ratio = fade_ratio(utils::element_span(&element), metrics.viewport_height);

            match item.fade.observe(ratio) {
                FadeUpdate::Unchanged => {}
                FadeUpdate::Changed => changed = true,
                FadeUpdate::ScheduleAppear => {
                    let link = ctx.link().clone();
                    let delay = index as u32 * APPEAR_STAGGER_MS;
                    item.appear = Some(Timeout::new(delay, move || {
                        link.send_message(ProjectsPageMsg::Appear(index));
                    }));
                }
                // Dropping the timer cancels the staggered appearance.
                FadeUpdate::CancelAppear => item.appear = None,
            }
        }
        changed
    }

    fn capture_origin(&self, index: usize) -> Option<ClickOrigin> {
        let image = self.items.get(index)?.image_ref.cast::<HtmlImageElement>()?;
        Some(ClickOrigin {
            src: image.src(),
            rect: utils::element_rect(&image),
        })
    }

    fn set_image_status(&mut self, index: usize, status: ImageStatus) -> bool {
        match self.items.get_mut(index) {
            Some(item) if item.image != status => {
                item.image = status;
                true
            }
            _ => false,
        }
    }

    fn render_item(&self, ctx: &Context<Self>, index: usize, project: &Project, item: &ItemView) -> Html {
        let onclick = ctx.link().callback(move |_: MouseEvent| ProjectsPageMsg::SelectItem(index));
        let onload = ctx.link().callback(move |_: Event| ProjectsPageMsg::ImageLoaded(index));
        let onerror = ctx.link().callback(move |_: Event| ProjectsPageMsg::ImageFailed(index));

        let item_style = (!self.intro_active).then(|| format!("opacity: {};", item.fade.opacity));
        let image_style = match item.image {
            ImageStatus::Loading => None,
            ImageStatus::Loaded => Some("opacity: 1;"),
            ImageStatus::Failed => Some("opacity: 0.5;"),
        };

        html! {
            <article
                key={project.id.clone()}
                ref={item.item_ref.clone()}
                class={classes!("project-item", item.fade.animated.then_some("animate"))}
                style={item_style}
                data-delay={index.to_string()}
            >
                <div class="project-image-container" {onclick}>
                    <img
                        ref={item.image_ref.clone()}
                        class="project-image"
                        src={utils::resource_url(&project.hero_image)}
                        alt={project.name.clone()}
                        style={image_style}
                        {onload}
                        {onerror}
                    />
                    <div class="project-overlay">
                        <h2 class="project-title">{ project.name.clone() }</h2>
                    </div>
                </div>
            </article>
        }
    }
}
