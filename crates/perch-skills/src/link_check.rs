//! The `404-finder` skill: fetch a page, walk its anchors, and report any
//! link that answers with a server or client error.

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::debug;
use url::{Position, Url};

use perch_core::{PerchError, Result, Skill, SkillContext};

/// Statuses that count as a broken link. 401/403 and redirects do not —
/// the page exists, it just doesn't want an anonymous HEAD.
const BROKEN_STATUSES: [u16; 5] = [404, 500, 502, 503, 504];

pub struct LinkCheckSkill;

pub fn is_broken(status: u16) -> bool {
    BROKEN_STATUSES.contains(&status)
}

/// Extract checkable link targets from a page.
///
/// Root-relative (`/...`) and fragment (`#...`) targets resolve against the
/// page's own scheme and host; `mailto:` and `tel:` targets are skipped
/// outright; everything else is taken verbatim.
pub fn extract_targets(html: &str, page_url: &str) -> Result<Vec<String>> {
    let base = Url::parse(page_url)
        .map_err(|e| PerchError::Skill(format!("invalid url {page_url}: {e}")))?;
    let origin = &base[..Position::BeforePath];

    let document = Html::parse_document(html);
    let selector =
        Selector::parse("a[href]").map_err(|_| PerchError::Skill("anchor selector".into()))?;

    let mut targets = Vec::new();
    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if href.is_empty() {
            continue;
        }

        let target = if href.starts_with('/') || href.starts_with('#') {
            format!("{origin}{href}")
        } else {
            href.to_string()
        };

        if target.starts_with("mailto:") || target.starts_with("tel:") {
            continue;
        }
        targets.push(target);
    }

    Ok(targets)
}

async fn check_link(ctx: &SkillContext, url: &str) -> Result<()> {
    let resp = ctx
        .http
        .head(url)
        .send()
        .await
        .map_err(|e| PerchError::http(format!("HEAD {url}"), e))?;

    let status = resp.status().as_u16();
    debug!(url, status, "checked link");
    if is_broken(status) {
        ctx.reply(format!(":warning: {url} returned status **{status}**"))
            .await?;
    }
    Ok(())
}

async fn check_links(ctx: &SkillContext, url: &str) -> Result<()> {
    // A failed page fetch aborts the whole run.
    let resp = ctx
        .http
        .get(url)
        .send()
        .await
        .map_err(|e| PerchError::http(format!("GET {url}"), e))?
        .error_for_status()
        .map_err(|e| PerchError::http(format!("GET {url}"), e))?;

    let body = resp
        .text()
        .await
        .map_err(|e| PerchError::http(format!("read {url}"), e))?;

    for target in extract_targets(&body, url)? {
        check_link(ctx, &target).await?;
    }

    ctx.reply(format!("Finished checking `{url}` for 404s")).await
}

#[async_trait]
impl Skill for LinkCheckSkill {
    fn name(&self) -> &str {
        "404-finder"
    }

    fn description(&self) -> &str {
        "Check all the links on a page to make sure they all resolve"
    }

    fn usage(&self) -> &str {
        "404-finder {url} — fetch the page and report every link that \
         returns 404/500/502/503/504"
    }

    async fn execute(&self, ctx: &SkillContext) -> Result<()> {
        let url = ctx.arguments.trim();
        if url.is_empty() {
            ctx.reply("You didn't say anything").await?;
            return Ok(());
        }
        check_links(ctx, url).await
    }
}
