// src/main.rs
mod components;
mod error;
mod modal;
mod motion_config;
mod project_catalog;
mod reveal;
mod scroll_fx;
mod site_content;
mod tokenizer;
mod utils;

use components::home_page::HomePage;
use components::projects_page::ProjectsPage;
use error::SiteError;
use motion_config::MotionConfig;
use project_catalog::ProjectCatalog;
use site_content::SiteContent;
use utils::Route;
use yew::prelude::*;

enum PageData {
    Home(SiteContent),
    Projects(ProjectCatalog),
}

pub struct App {
    config: MotionConfig,
    page: Result<PageData, SiteError>,
}

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let route = utils::current_route();
        let page = match route {
            Route::Home => SiteContent::load().map(PageData::Home),
            Route::Projects => ProjectCatalog::load().map(PageData::Projects),
        };

        match &page {
            Ok(PageData::Home(content)) => log::info!("Loaded home page with {} blocks", content.blocks.len()),
            Ok(PageData::Projects(catalog)) => log::info!("Loaded {} projects", catalog.len()),
            Err(e) => log::error!("Failed to load {:?} page: {}", route, e),
        }

        Self {
            config: MotionConfig::load_or_default(),
            page,
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        match &self.page {
            Ok(PageData::Home(content)) => html! {
                <HomePage content={content.clone()} config={self.config.clone()} />
            },
            Ok(PageData::Projects(catalog)) => html! {
                <ProjectsPage catalog={catalog.clone()} config={self.config.clone()} />
            },
            Err(e) => html! {
                <div class="error">{ format!("Error: {}", e) }</div>
            },
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
