pub mod home_page;
pub mod project_modal;
pub mod projects_page;
