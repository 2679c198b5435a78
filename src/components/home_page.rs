// src/components/home_page.rs
use crate::motion_config::MotionConfig;
use crate::reveal::{RevealInputs, RevealState, RevealTuning, ScrollMetrics};
use crate::scroll_fx::{self, TeaserState};
use crate::site_content::{InlineKind, SiteContent};
use crate::tokenizer::{
    tokenize_blocks, Segment, TokenizedBlock, TokenizedContent, TokenizedElement,
    TokenizedInline,
};
use crate::utils;
use gloo::render::{request_animation_frame, AnimationFrame};
use gloo::timers::callback::Timeout;
use gloo_events::EventListener;
use web_sys::Element;
use yew::prelude::*;

const TEASER_ANIMATE_DELAY_MS: u32 = 300;

#[derive(Properties, PartialEq)]
pub struct HomePageProps {
    pub content: SiteContent,
    pub config: MotionConfig,
}

pub enum HomePageMsg {
    IntroFinished,
    ScheduleReveal,
    Reveal,
    ToggleReadMore,
    AnimateTeaser,
    OpenLink,
    OpenProjects,
}

impl HomePageMsg {
    /// Reader input, ignored until the intro has released the page.
    fn needs_release(&self) -> bool {
        matches!(
            self,
            HomePageMsg::ToggleReadMore | HomePageMsg::OpenLink | HomePageMsg::OpenProjects
        )
    }
}

pub struct HomePage {
    tuning: RevealTuning,
    tokens: TokenizedContent,
    states: Vec<RevealState>,
    expanded: bool,
    intro_active: bool,
    // one recomputation per animation frame
    frame_pending: bool,
    frame: Option<AnimationFrame>,
    // the read-more toggle changed the layout under the last classification
    relayout: bool,
    listeners: Vec<EventListener>,
    timers: Vec<Timeout>,
    teaser: TeaserState,
    teaser_animated: bool,
    list_ref: NodeRef,
    teaser_ref: NodeRef,
}

impl Component for HomePage {
    type Message = HomePageMsg;
    type Properties = HomePageProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();

        // Hold the page at the top until the intro animation has played.
        utils::set_body_class("intro-active", true);
        utils::scroll_to_top();

        let link = ctx.link().clone();
        let intro = Timeout::new(props.config.intro.home_ms, move || {
            link.send_message(HomePageMsg::IntroFinished);
        });

        let tokens = tokenize_blocks(props.content.visible_blocks(false));
        let states = vec![RevealState::Upcoming; tokens.total_units];

        Self {
            tuning: props.config.reveal.clone(),
            tokens,
            states,
            expanded: false,
            intro_active: true,
            frame_pending: false,
            frame: None,
            relayout: false,
            listeners: Vec::new(),
            timers: vec![intro],
            teaser: TeaserState::default(),
            teaser_animated: false,
            list_ref: NodeRef::default(),
            teaser_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        if self.intro_active && msg.needs_release() {
            return false;
        }
        match msg {
            HomePageMsg::IntroFinished => {
                self.intro_active = false;
                utils::set_body_class("intro-active", false);
                utils::scroll_to_top();

                let window = gloo_utils::window();
                for event in ["scroll", "resize", "load"] {
                    let link = ctx.link().clone();
                    self.listeners
                        .push(EventListener::new(&window, event, move |_| {
                            link.send_message(HomePageMsg::ScheduleReveal);
                        }));
                }

                let link = ctx.link().clone();
                self.timers
                    .push(Timeout::new(self.tuning.initial_delay_ms, move || {
                        link.send_message(HomePageMsg::Reveal);
                    }));

                log::info!(
                    "intro finished, revealing {} words",
                    self.tokens.total_units
                );
                true
            }
            HomePageMsg::ScheduleReveal => {
                if self.intro_active || self.frame_pending {
                    return false;
                }
                self.frame_pending = true;
                let link = ctx.link().clone();
                self.frame = Some(request_animation_frame(move |_| {
                    link.send_message(HomePageMsg::Reveal);
                }));
                false
            }
            HomePageMsg::Reveal => {
                self.frame_pending = false;
                self.frame = None;
                self.recompute(ctx)
            }
            HomePageMsg::ToggleReadMore => {
                self.expanded = !self.expanded;
                // The visible text changed, so every index is reassigned.
                let metrics = utils::scroll_metrics();
                let list_reached = metrics.is_some_and(|m| self.list_reached(&m));
                let (tokens, states) = retokenize(
                    &ctx.props().content,
                    &self.tuning,
                    self.expanded,
                    metrics,
                    list_reached,
                );
                self.tokens = tokens;
                self.states = states;
                self.relayout = true;
                log::debug!(
                    "read more {}, {} words visible",
                    if self.expanded { "expanded" } else { "collapsed" },
                    self.tokens.total_units
                );
                true
            }
            HomePageMsg::AnimateTeaser => {
                self.teaser_animated = true;
                true
            }
            HomePageMsg::OpenLink => {
                utils::open_in_new_tab(&ctx.props().content.link.url);
                false
            }
            HomePageMsg::OpenProjects => {
                utils::navigate("projects.html");
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let content = &ctx.props().content;
        let toggle = ctx.link().callback(|_| HomePageMsg::ToggleReadMore);
        let first_list = self
            .tokens
            .sections
            .iter()
            .position(|s| matches!(s.block, TokenizedBlock::List(_)));

        let sections = |hidden: bool| -> Html {
            self.tokens
                .sections
                .iter()
                .enumerate()
                .filter(|(_, s)| s.hidden == hidden)
                .map(|(i, s)| self.render_block(&s.block, first_list == Some(i)))
                .collect()
        };

        html! {
            <div class="main-content">
                <header class="intro">
                    <h1 class="intro-title">{ content.headline.clone() }</h1>
                </header>

                <section class="content">
                    { sections(false) }
                    <div id="hiddenContent" class={classes!("hidden-content", self.expanded.then_some("show"))}>
                        { sections(true) }
                    </div>
                    <button
                        id="readMoreBtn"
                        class={classes!("read-more-btn", self.expanded.then_some("expanded"))}
                        onclick={toggle}
                    >
                        { if self.expanded { "Read Less" } else { "Read More" } }
                    </button>
                </section>

                { self.render_link_section(ctx) }
                { self.render_teaser(ctx) }
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        if std::mem::take(&mut self.relayout) {
            ctx.link().send_message(HomePageMsg::Reveal);
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if self.intro_active {
            utils::set_body_class("intro-active", false);
        }
    }
}

impl HomePage {
    fn recompute(&mut self, ctx: &Context<Self>) -> bool {
        let Some(metrics) = utils::scroll_metrics() else {
            return false;
        };

        let list_reached = self.list_reached(&metrics);
        let states = self.tuning.classify(&RevealInputs {
            metrics,
            total_units: self.tokens.total_units,
            expanded: self.expanded,
            list_reached,
        });
        let mut changed = states != self.states;
        self.states = states;

        if let Some(section) = self.teaser_ref.cast::<Element>() {
            let before = self.teaser;
            if self
                .teaser
                .observe(utils::element_span(&section), metrics.viewport_height)
            {
                let link = ctx.link().clone();
                self.timers
                    .push(Timeout::new(TEASER_ANIMATE_DELAY_MS, move || {
                        link.send_message(HomePageMsg::AnimateTeaser);
                    }));
            }
            changed |= before != self.teaser;
        }

        changed
    }

    fn list_reached(&self, metrics: &ScrollMetrics) -> bool {
        self.list_ref
            .cast::<Element>()
            .map(|list| scroll_fx::scrolled_past(utils::element_span(&list), metrics.viewport_height))
            .unwrap_or(false)
    }

    fn render_block(&self, block: &TokenizedBlock, is_first_list: bool) -> Html {
        match block {
            TokenizedBlock::Paragraph(element) => html! {
                <p>{ self.render_element(element) }</p>
            },
            TokenizedBlock::List(items) => {
                let list_ref = if is_first_list {
                    self.list_ref.clone()
                } else {
                    NodeRef::default()
                };
                html! {
                    <ol class="list" ref={list_ref}>
                        { for items.iter().map(|item| html! { <li>{ self.render_element(item) }</li> }) }
                    </ol>
                }
            }
        }
    }

    fn render_element(&self, element: &TokenizedElement) -> Html {
        element.iter().map(|inline| self.render_inline(inline)).collect()
    }

    fn render_inline(&self, inline: &TokenizedInline) -> Html {
        let words: Html = inline
            .segments
            .iter()
            .map(|segment| match segment {
                Segment::Gap(space) => html! { { space.clone() } },
                Segment::Unit(unit) => {
                    let state = self
                        .states
                        .get(unit.index)
                        .copied()
                        .unwrap_or(RevealState::Upcoming);
                    html! {
                        <span
                            class={classes!("word-span", state.class_name())}
                            data-word-index={unit.index.to_string()}
                        >
                            { unit.text.clone() }
                        </span>
                    }
                }
            })
            .collect();

        match inline.kind {
            InlineKind::Text => words,
            InlineKind::Strong => html! { <strong>{ words }</strong> },
            InlineKind::Emphasis => html! { <em>{ words }</em> },
        }
    }

    fn render_link_section(&self, ctx: &Context<Self>) -> Html {
        let link = &ctx.props().content.link;
        let open = ctx.link().callback(|_| HomePageMsg::OpenLink);
        html! {
            <section class="link-section">
                <h2 class="link-title" onclick={open}>{ link.title.clone() }</h2>
                <img class="link-image" src={utils::resource_url(&link.image)} alt={link.title.clone()} />
            </section>
        }
    }

    fn render_teaser(&self, ctx: &Context<Self>) -> Html {
        let teaser = &ctx.props().content.teaser;
        let open = ctx.link().callback(|_| HomePageMsg::OpenProjects);
        let animate = self.teaser_animated.then_some("animate");
        html! {
            <section
                ref={self.teaser_ref.clone()}
                class={classes!("projects-section", self.teaser.visible.then_some("visible"))}
            >
                <div class="sliding-image-container" onclick={open}>
                    <img
                        class={classes!("sliding-image", animate)}
                        src={utils::resource_url(&teaser.image)}
                        alt={teaser.caption.clone()}
                    />
                    <div class={classes!("overlay-text", animate)}>{ teaser.caption.clone() }</div>
                </div>
            </section>
        }
    }
}

/// Tokenize the text visible in the given expansion state and classify it at
/// the current scroll position, if there is one.
fn retokenize(
    content: &SiteContent,
    tuning: &RevealTuning,
    expanded: bool,
    metrics: Option<ScrollMetrics>,
    list_reached: bool,
) -> (TokenizedContent, Vec<RevealState>) {
    let tokens = tokenize_blocks(content.visible_blocks(expanded));
    let states = match metrics {
        Some(metrics) => tuning.classify(&RevealInputs {
            metrics,
            total_units: tokens.total_units,
            expanded,
            list_reached,
        }),
        None => vec![RevealState::Upcoming; tokens.total_units],
    };
    (tokens, states)
}
