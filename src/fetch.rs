use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::error::ExtractError;
use crate::model::DocumentSnapshot;
use crate::parser;

/// Documentation page scraped by default.
pub const API_URL: &str = "https://fakerjs.dev/api/";

/// Base joined in front of relative hrefs when opening a page in the browser.
pub const SITE_BASE: &str = "https://fakerjs.dev";

/// Fetch the documentation page at `url` and parse it into a snapshot.
///
/// The fetch is cancellable: if `cancel` fires first the in-flight request is
/// dropped, not awaited, and `ExtractError::Cancelled` is returned. Only the
/// latest completed fetch ever reaches the cache, so no ordering guarantee is
/// needed across aborted fetches.
pub async fn fetch_snapshot(
    url: &str,
    cancel: CancellationToken,
) -> Result<DocumentSnapshot, ExtractError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ExtractError::Cancelled),
        res = fetch_and_parse(url) => res,
    }
}

async fn fetch_and_parse(url: &str) -> Result<DocumentSnapshot, ExtractError> {
    info!("Fetching API documentation: {}", url);
    let client = reqwest::Client::new();
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    debug!(bytes = body.len(), "Fetched page body");

    let snapshot = parser::parse_document(&body)?;
    info!(
        version = %snapshot.version,
        categories = snapshot.categories.len(),
        methods = snapshot.method_count(),
        "Parsed documentation page"
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cancelled_token_aborts_before_any_request() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        // 127.0.0.1:9 would refuse anyway; the biased select must win first.
        let err = fetch_snapshot("http://127.0.0.1:9/api/", cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Cancelled));
    }
}
