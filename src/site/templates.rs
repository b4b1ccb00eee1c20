// src/site/templates.rs
//! Handlebars page templates, compiled into the binary and registered once.

use super::metadata::PageMetadata;
use crate::config::SiteConfig;
use crate::error::AppError;
use crate::rendering::node::escape_attr;
use chrono::{Datelike, Utc};
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;

const LAYOUT: &str = "layout";

const PAGES: [(&str, &str); 10] = [
    (LAYOUT, include_str!("../../templates/layout.hbs")),
    ("home", include_str!("../../templates/home.hbs")),
    ("blog", include_str!("../../templates/blog.hbs")),
    ("post", include_str!("../../templates/post.hbs")),
    ("names", include_str!("../../templates/names.hbs")),
    ("name", include_str!("../../templates/name.hbs")),
    ("letters", include_str!("../../templates/letters.hbs")),
    ("letter", include_str!("../../templates/letter.hbs")),
    ("error", include_str!("../../templates/error.hbs")),
    ("not_found", include_str!("../../templates/not_found.hbs")),
];

const PARTIALS: [(&str, &str); 4] = [
    ("card", include_str!("../../templates/partials/card.hbs")),
    ("alphabet", include_str!("../../templates/partials/alphabet.hbs")),
    ("breadcrumbs", include_str!("../../templates/partials/breadcrumbs.hbs")),
    ("byline", include_str!("../../templates/partials/byline.hbs")),
];

/// The registered template set.
pub struct SiteTemplates {
    registry: Handlebars<'static>,
}

impl std::fmt::Debug for SiteTemplates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteTemplates").finish_non_exhaustive()
    }
}

impl SiteTemplates {
    /// Compiles every page and partial.
    pub fn new() -> Result<Self, AppError> {
        let mut registry = Handlebars::new();
        // Keep `=` and backticks readable in URLs; only the HTML specials
        // need escaping.
        registry.register_escape_fn(escape_attr);

        for (name, source) in PARTIALS {
            registry
                .register_partial(name, source)
                .map_err(|e| template_error(name, e))?;
        }
        for (name, source) in PAGES {
            registry
                .register_template_string(name, source)
                .map_err(|e| template_error(name, e))?;
        }

        log::debug!(
            "Registered {} templates and {} partials",
            PAGES.len(),
            PARTIALS.len()
        );
        Ok(Self { registry })
    }

    /// Renders `template` with `data`, then wraps it in the layout.
    pub fn render_page<T: Serialize>(
        &self,
        template: &str,
        data: &T,
        meta: &PageMetadata,
        config: &SiteConfig,
    ) -> Result<String, AppError> {
        let body = self.render(template, data)?;
        let identity = &config.identity;

        let layout_data = json!({
            "meta": meta,
            "site": {
                "name": identity.name,
                "title": identity.full_title(),
                "tagline": identity.tagline,
                "locale": identity.locale,
                "url": config.site_url.as_str(),
            },
            "year": Utc::now().year(),
            "body": body,
        });
        self.render(LAYOUT, &layout_data)
    }

    fn render<T: Serialize>(&self, template: &str, data: &T) -> Result<String, AppError> {
        self.registry
            .render(template, data)
            .map_err(|e| AppError::TemplateRenderError {
                name: template.to_string(),
                message: e.to_string(),
            })
    }
}

fn template_error(name: &str, err: impl std::fmt::Display) -> AppError {
    AppError::TemplateRenderError {
        name: name.to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ApiKey, DatabaseId, SiteUrl};

    fn config() -> SiteConfig {
        SiteConfig::new(
            ApiKey::new("secret_0123456789abcdef0123456789abcdef").unwrap(),
            DatabaseId::parse("0123456789abcdef0123456789abcdef").unwrap(),
            DatabaseId::parse("fedcba9876543210fedcba9876543210").unwrap(),
            SiteUrl::parse("https://minikadlar.com").unwrap(),
        )
    }

    #[test]
    fn every_template_compiles() {
        assert!(SiteTemplates::new().is_ok());
    }

    #[test]
    fn layout_escapes_metadata_but_not_body() {
        let templates = SiteTemplates::new().unwrap();
        let meta = PageMetadata::website(
            "Ali & Veli",
            "\"tırnak\"",
            "https://minikadlar.com/?a=1",
        );
        let html = templates
            .render_page(
                "error",
                &json!({ "message": "<b>olmadı</b>", "retry": "/isim/ali" }),
                &meta,
                &config(),
            )
            .unwrap();

        assert!(html.contains("<title>Ali &amp; Veli</title>"));
        assert!(html.contains("content=\"&quot;tırnak&quot;\""));
        assert!(html.contains("href=\"https://minikadlar.com/?a=1\""));
        assert!(html.contains("&lt;b&gt;olmadı&lt;/b&gt;"));
        assert!(html.contains("href=\"/isim/ali\""));
    }
}
