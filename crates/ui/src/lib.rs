pub mod page;
pub mod templates;
pub mod vm;

pub use page::render_page;
pub use templates::SsrTemplates;
