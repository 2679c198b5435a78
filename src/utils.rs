// src/utils.rs
use crate::modal::Rect;
use crate::reveal::ScrollMetrics;
use crate::scroll_fx::Span;
use web_sys::{window, Element};

const DEPLOY_PREFIX: &str = "/scroll-reveal/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Projects,
}

/// Path prefix every site URL is served under: `/scroll-reveal` when the
/// current page lives below it, empty when served from the root.
pub fn get_base_url() -> String {
    if let Some(window) = window() {
        if let Ok(location) = window.location().pathname() {
            if location.starts_with(DEPLOY_PREFIX) {
                return DEPLOY_PREFIX.trim_end_matches('/').to_string();
            }
        }
    }
    String::new()
}

/// Site-relative asset or page path, rooted at the deploy prefix.
pub fn resource_url(path: &str) -> String {
    join_base(&get_base_url(), path)
}

fn join_base(base: &str, path: &str) -> String {
    let clean_path = path.trim_start_matches('/');

    if base.is_empty() {
        format!("/{}", clean_path)
    } else {
        format!("{}/{}", base, clean_path)
    }
}

pub fn route_for_path(pathname: &str) -> Route {
    let last = pathname.trim_end_matches('/').rsplit('/').next().unwrap_or("");
    match last {
        "projects.html" | "projects" => Route::Projects,
        _ => Route::Home,
    }
}

pub fn current_route() -> Route {
    window()
        .and_then(|w| w.location().pathname().ok())
        .map(|path| route_for_path(&path))
        .unwrap_or(Route::Home)
}

/// Full-page navigation to another page of the site.
pub fn navigate(page: &str) {
    if let Some(window) = window() {
        if let Err(e) = window.location().set_href(&resource_url(page)) {
            log::warn!("navigation to {} failed: {:?}", page, e);
        }
    }
}

pub fn open_in_new_tab(url: &str) {
    if let Some(window) = window() {
        if let Err(e) = window.open_with_url_and_target(url, "_blank") {
            log::warn!("could not open {}: {:?}", url, e);
        }
    }
}

pub fn scroll_to_top() {
    if let Some(window) = window() {
        window.scroll_to_with_x_and_y(0.0, 0.0);
    }
}

/// Add or remove a class on `<body>`; a missing body is ignored.
pub fn set_body_class(class: &str, on: bool) {
    let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) else {
        return;
    };
    let classes = body.class_list();
    let result = if on {
        classes.add_1(class)
    } else {
        classes.remove_1(class)
    };
    if let Err(e) = result {
        log::warn!("could not toggle body class {}: {:?}", class, e);
    }
}

/// Current scroll geometry, or `None` outside a browser window.
pub fn scroll_metrics() -> Option<ScrollMetrics> {
    let window = window()?;
    let document_height = window
        .document()
        .and_then(|d| d.document_element())
        .map(|root| root.scroll_height() as f64)?;

    Some(ScrollMetrics {
        scroll_top: window.page_y_offset().ok()?,
        viewport_width: window.inner_width().ok()?.as_f64()?,
        viewport_height: window.inner_height().ok()?.as_f64()?,
        document_height,
    })
}

pub fn element_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect {
        top: rect.top(),
        left: rect.left(),
        width: rect.width(),
        height: rect.height(),
    }
}

pub fn element_span(element: &Element) -> Span {
    let rect = element.get_bounding_client_rect();
    Span {
        top: rect.top(),
        bottom: rect.bottom(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_base_under_deploy_prefix() {
        assert_eq!(join_base("", "/BG.jpg"), "/BG.jpg");
        assert_eq!(join_base("", "BG.jpg"), "/BG.jpg");
        assert_eq!(join_base("/scroll-reveal", "projects.html"), "/scroll-reveal/projects.html");
        assert_eq!(join_base("/scroll-reveal", "/index.html"), "/scroll-reveal/index.html");
    }

    #[test]
    fn test_route_detection() {
        assert_eq!(route_for_path("/"), Route::Home);
        assert_eq!(route_for_path("/index.html"), Route::Home);
        assert_eq!(route_for_path("/projects.html"), Route::Projects);
        assert_eq!(route_for_path("/scroll-reveal/projects"), Route::Projects);
        assert_eq!(route_for_path("/scroll-reveal/projects/"), Route::Projects);
        assert_eq!(route_for_path("/scroll-reveal/"), Route::Home);
    }
}
