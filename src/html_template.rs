use askama::Template;
use uuid::Uuid;

use crate::constants::PAGE_TITLE;
use crate::render::ViewTemplate;

// Document shell for the map page; the view itself is rendered server-side
#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate {
    pub title: &'static str,
    pub session_id: Uuid,
    pub view: ViewTemplate,
}

impl PageTemplate {
    pub fn new(session_id: Uuid, view: ViewTemplate) -> Self {
        Self {
            title: PAGE_TITLE,
            session_id,
            view,
        }
    }
}
