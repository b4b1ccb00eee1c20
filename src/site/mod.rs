//! The site around the renderer: page assembly, templates, metadata and
//! feeds.

pub mod alphabet;
pub mod content;
pub mod feeds;
pub mod metadata;
pub mod pages;
pub mod related;
pub mod structured_data;
pub mod templates;

pub use alphabet::{Alphabet, Gender, Letter};
pub use metadata::{format_date_tr, seo_description, PageMetadata};
pub use pages::{Page, Site};
pub use templates::SiteTemplates;
