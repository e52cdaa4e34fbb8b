//! Generic paginated fetch loop shared by all pipeline passes.

use std::future::Future;

use iotex_history::HistoryError;

/// Fetch pages `0..max_iterations` from `provider`, stopping early on a
/// short page.
///
/// A page shorter than `page_limit` is the source's end-of-data signal, so
/// the loop halts even when `max_iterations` has not been reached. The
/// provider maps the page index to whatever pagination the source uses
/// (item offset or page number). The loop never issues more than
/// `max_iterations` requests, bounding worst-case network calls even when
/// a source misreports its item counts.
///
/// # Errors
///
/// Returns the provider's error unchanged; nothing fetched so far is kept.
pub async fn fetch_pages<T, F, Fut>(
    page_limit: usize,
    max_iterations: usize,
    mut provider: F,
) -> Result<Vec<T>, HistoryError>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<Vec<T>, HistoryError>>,
{
    let mut out = Vec::new();
    for page in 0..max_iterations {
        let items = provider(page).await?;
        let short = items.len() < page_limit;
        out.extend(items);
        if short {
            break;
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::ready;

    #[tokio::test]
    async fn short_page_terminates_early() {
        // Pages of [N, N, N-1] for page_limit N: exactly 3 calls.
        let mut calls = 0usize;
        let items = fetch_pages(100, 50, |page| {
            calls += 1;
            let len = if page < 2 { 100 } else { 99 };
            ready(Ok(vec![0u8; len]))
        })
        .await
        .unwrap();

        assert_eq!(calls, 3, "short page must stop the loop");
        assert_eq!(items.len(), 299, "all fetched items are kept");
    }

    #[tokio::test]
    async fn max_iterations_bounds_requests() {
        // A source that always returns full pages never terminates on its
        // own; the budget must cut it off.
        let mut calls = 0usize;
        let items = fetch_pages(100, 4, |_page| {
            calls += 1;
            ready(Ok(vec![0u8; 100]))
        })
        .await
        .unwrap();

        assert_eq!(calls, 4, "budget caps the number of requests");
        assert_eq!(items.len(), 400, "every full page is accumulated");
    }

    #[tokio::test]
    async fn empty_page_halts_after_one_call() {
        let mut calls = 0usize;
        let items: Vec<u8> = fetch_pages(100, 10, |_page| {
            calls += 1;
            ready(Ok(Vec::new()))
        })
        .await
        .unwrap();

        assert_eq!(calls, 1, "an empty page is a short page");
        assert!(items.is_empty(), "nothing accumulated");
    }

    #[tokio::test]
    async fn provider_error_propagates() {
        let result: Result<Vec<u8>, _> = fetch_pages(100, 10, |page| {
            ready(if page == 0 {
                Ok(vec![0u8; 100])
            } else {
                Err(HistoryError::RemoteUnavailable("boom".into()))
            })
        })
        .await;

        assert!(
            matches!(result, Err(HistoryError::RemoteUnavailable(_))),
            "a failed page aborts the whole loop"
        );
    }
}
