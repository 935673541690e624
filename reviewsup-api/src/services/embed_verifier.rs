//! Widget embedding verification
//!
//! Confirms that a third-party page actually carries a showcase widget:
//! the page must contain both the showcase marker element and the embed
//! loader script pointing at our origin. The result is the logical AND of
//! the two checks.

use reviewsup_common::models::RrResponse;
use scraper::{Html, Selector};
use std::sync::Arc;
use tracing::{debug, warn};

use super::renderer_client::{RendererClient, RendererError};

/// Pluggable markup querying: does a CSS selector match anywhere in the
/// document? Kept behind a trait so the HTML parser can be swapped without
/// touching verification logic.
pub trait MarkupQuery: Send + Sync {
    fn exists(&self, html: &str, selector: &str) -> bool;
}

/// `scraper`-backed selector queries
#[derive(Debug, Default)]
pub struct CssQuery;

impl MarkupQuery for CssQuery {
    fn exists(&self, html: &str, selector: &str) -> bool {
        let parsed = match Selector::parse(selector) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(selector, "Invalid CSS selector: {e:?}");
                return false;
            }
        };
        Html::parse_document(html).select(&parsed).next().is_some()
    }
}

/// Embedding verifier for showcase widgets
pub struct EmbedVerifier {
    renderer: RendererClient,
    markup: Arc<dyn MarkupQuery>,
    app_url: String,
}

impl EmbedVerifier {
    pub fn new(renderer: RendererClient, markup: Arc<dyn MarkupQuery>, app_url: &str) -> Self {
        Self {
            renderer,
            markup,
            app_url: app_url.trim_end_matches('/').to_string(),
        }
    }

    /// Selector for the widget mount point, e.g.
    /// `<div id="reviewsup-showcase-1db8f570b48">`
    fn widget_selector(short_id: &str) -> String {
        format!("#reviewsup-showcase-{short_id}")
    }

    /// Selector for the embed loader script. The script id is a historical
    /// wire constant; widgets in the field carry it verbatim.
    fn script_selector(&self) -> String {
        format!(
            r#"script#revewsup-embed-js[src="{}/js/embed.js"]"#,
            self.app_url
        )
    }

    /// Check already-fetched markup for both expected fragments
    pub fn check_markup(&self, html: &str, short_id: &str) -> bool {
        let widget_exists = self.markup.exists(html, &Self::widget_selector(short_id));
        debug!(short_id, widget_exists, "Widget marker check");

        let script_exists = self.markup.exists(html, &self.script_selector());
        debug!(short_id, script_exists, "Embed script check");

        widget_exists && script_exists
    }

    /// Fetch the target page through the headless renderer and verify the
    /// embedding. Fetch failures propagate; there is no degraded result.
    pub async fn verify(
        &self,
        url: &str,
        short_id: &str,
    ) -> Result<RrResponse<bool>, RendererError> {
        let page = self.renderer.extract_content(url).await?;
        let embedded = self.check_markup(&page.content, short_id);

        Ok(RrResponse {
            code: 200,
            message: "Widget verification successful".to_string(),
            data: embedded,
        })
    }
}
