//! Paging over vendor list endpoints

use crate::client::AppsApi;
use crate::error::{AppsError, Result};
use crate::wire::{Deployment, Links};
use reqwest::Url;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_PER_PAGE: u32 = 200;

/// Page selection for list requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub page: u32,
    pub per_page: u32,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl Links {
    /// No paging links, or no `next` link, means this was the last page
    pub fn is_last_page(&self) -> bool {
        self.pages
            .as_ref()
            .and_then(|pages| pages.next.as_deref())
            .is_none_or(str::is_empty)
    }

    /// Page number of the response these links came with
    ///
    /// Derived from the `page` query parameter of the `prev` link; the first
    /// page has no `prev`.
    pub fn current_page(&self) -> Result<u32> {
        let Some(prev) = self
            .pages
            .as_ref()
            .and_then(|pages| pages.prev.as_deref())
            .filter(|prev| !prev.is_empty())
        else {
            return Ok(1);
        };

        let url = Url::parse(prev).map_err(|e| AppsError::InvalidPageLink(format!("{prev}: {e}")))?;
        let page = url
            .query_pairs()
            .find(|(key, _)| key == "page")
            .map(|(_, page)| page.into_owned())
            .ok_or_else(|| AppsError::InvalidPageLink(format!("{prev}: missing page parameter")))?;
        let page: u32 = page
            .parse()
            .map_err(|_| AppsError::InvalidPageLink(format!("{prev}: bad page {page:?}")))?;

        Ok(page + 1)
    }
}

/// Fetch every deployment of an app, most recent first
pub async fn list_all_deployments<A>(
    api: &A,
    app_id: &str,
    per_page: u32,
    cancel: &CancellationToken,
) -> Result<Vec<Deployment>>
where
    A: AppsApi + ?Sized,
{
    let mut opts = ListOptions { page: 1, per_page };
    let mut all = Vec::new();

    loop {
        let (deployments, links) = api.list_deployments(app_id, &opts, cancel).await?;
        all.extend(deployments);

        if links.is_last_page() {
            break;
        }
        opts.page = links.current_page()? + 1;
        tracing::debug!("Fetching deployments page {} for app {}", opts.page, app_id);
    }

    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;
    use crate::wire::Pages;

    fn links(prev: Option<&str>, next: Option<&str>) -> Links {
        Links {
            pages: Some(Pages {
                prev: prev.map(str::to_string),
                next: next.map(str::to_string),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_is_last_page() {
        assert!(Links::default().is_last_page());
        assert!(links(None, None).is_last_page());
        assert!(links(None, Some("")).is_last_page());
        assert!(!links(None, Some("https://api.example/v2/apps/a/deployments?page=2")).is_last_page());
    }

    #[test]
    fn test_current_page() {
        assert_eq!(Links::default().current_page().unwrap(), 1);
        assert_eq!(links(None, Some("x")).current_page().unwrap(), 1);

        let l = links(
            Some("https://api.example/v2/apps/a/deployments?page=2&per_page=200"),
            Some("https://api.example/v2/apps/a/deployments?page=4&per_page=200"),
        );
        assert_eq!(l.current_page().unwrap(), 3);
    }

    #[test]
    fn test_current_page_rejects_bad_links() {
        let err = links(Some("not a url"), None).current_page().unwrap_err();
        assert!(matches!(err, AppsError::InvalidPageLink(_)));

        let err = links(Some("https://api.example/v2/apps?page=abc"), None)
            .current_page()
            .unwrap_err();
        assert!(err.to_string().contains("bad page"));

        let err = links(Some("https://api.example/v2/apps?per_page=20"), None)
            .current_page()
            .unwrap_err();
        assert!(err.to_string().contains("missing page parameter"));
    }

    #[tokio::test]
    async fn test_list_all_follows_pages() {
        let api = FakeApi::new();
        api.paged_deployments(vec![
            vec!["dep-5", "dep-4"],
            vec!["dep-3", "dep-2"],
            vec!["dep-1"],
        ]);

        let all = list_all_deployments(&api, "app-1", 2, &CancellationToken::new())
            .await
            .unwrap();
        let ids: Vec<&str> = all.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["dep-5", "dep-4", "dep-3", "dep-2", "dep-1"]);
        assert_eq!(api.list_requests(), vec![(1, 2), (2, 2), (3, 2)]);
    }
}
