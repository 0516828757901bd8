use super::*;
use futures_util::StreamExt;
use std::collections::VecDeque;
use std::future::ready;
use std::sync::{Arc, Mutex};
use tonic::Code;

#[derive(Debug, Clone, Default, PartialEq)]
struct FakeRequest {
    page_size: i64,
    page_token: String,
}

impl PageRequest for FakeRequest {
    fn page_size(&self) -> i64 {
        self.page_size
    }

    fn set_page_size(&mut self, page_size: i64) {
        self.page_size = page_size;
    }

    fn page_token(&self) -> &str {
        &self.page_token
    }

    fn set_page_token(&mut self, page_token: String) {
        self.page_token = page_token;
    }
}

#[derive(Debug)]
struct FakePage {
    items: Vec<u32>,
    next_page_token: String,
}

impl PageResponse for FakePage {
    type Item = u32;

    fn into_page(self) -> (Vec<u32>, String) {
        (self.items, self.next_page_token)
    }
}

type Calls = Arc<Mutex<Vec<FakeRequest>>>;

fn page(items: impl IntoIterator<Item = u32>, next_page_token: &str) -> Result<FakePage, Status> {
    Ok(FakePage {
        items: items.into_iter().collect(),
        next_page_token: next_page_token.to_string(),
    })
}

/// Answers with the given responses in order, recording every request.
fn scripted(
    responses: Vec<Result<FakePage, Status>>,
) -> (impl ListCall<FakeRequest, Response = FakePage>, Calls) {
    let calls = Calls::default();
    let recorded = calls.clone();
    let mut responses = VecDeque::from(responses);

    let list = move |request: FakeRequest| {
        recorded.lock().unwrap().push(request);
        let response = responses
            .pop_front()
            .expect("list called more times than scripted");
        ready(response)
    };

    (list, calls)
}

/// Serves the items `0..total`, honouring the requested page size. Tokens are offsets.
fn dataset(total: u32) -> (impl ListCall<FakeRequest, Response = FakePage>, Calls) {
    let calls = Calls::default();
    let recorded = calls.clone();

    let list = move |request: FakeRequest| {
        recorded.lock().unwrap().push(request.clone());
        let start: u32 = request.page_token.parse().unwrap_or(0);
        let size = u32::try_from(request.page_size).unwrap();
        let end = (start + size).min(total);
        let next = if end < total {
            end.to_string()
        } else {
            String::new()
        };
        ready(page(start..end, &next))
    };

    (list, calls)
}

fn page_sizes(calls: &Calls) -> Vec<i64> {
    calls.lock().unwrap().iter().map(|r| r.page_size).collect()
}

#[tokio::test]
async fn test_take_all_concatenates_pages_in_order() {
    let (list, calls) = scripted(vec![
        page([1, 2, 3], "a"),
        page([4, 5], "b"),
        page([6], ""),
    ]);

    let mut pager = Pager::new(list, FakeRequest::default());

    let items = pager.take_all().await.unwrap();

    assert_eq!(items, vec![1, 2, 3, 4, 5, 6]);

    let tokens: Vec<_> = calls
        .lock()
        .unwrap()
        .iter()
        .map(|r| r.page_token.clone())
        .collect();
    assert_eq!(tokens, vec!["", "a", "b"]);
    assert!(pager.last_error().is_none());
}

#[tokio::test]
async fn test_empty_listing_issues_a_single_call() {
    let (list, calls) = scripted(vec![page([], "")]);

    let mut pager = Pager::new(list, FakeRequest::default());

    assert!(pager.take_all().await.unwrap().is_empty());
    assert!(!pager.advance().await);
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_last_page_on_first_call_issues_a_single_call() {
    let (list, calls) = scripted(vec![page([1, 2], "")]);

    let mut pager = Pager::new(list, FakeRequest::default());

    let items = pager.take_up_to(5000).await.unwrap();

    assert_eq!(items, vec![1, 2]);
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_take_up_to_stops_at_limit_without_overfetching() {
    let (list, calls) = dataset(25);

    let mut pager = Pager::new(list, FakeRequest::default()).with_page_size(10);

    let items = pager.take_up_to(13).await.unwrap();

    assert_eq!(items, (0..13).collect::<Vec<_>>());
    // remaining >= page size, then remaining < page size
    assert_eq!(page_sizes(&calls), vec![10, 3]);
}

#[tokio::test]
async fn test_take_up_to_smaller_than_page_size_fetches_exactly_what_is_needed() {
    let (list, calls) = dataset(100);

    let mut pager = Pager::new(list, FakeRequest::default());

    let items = pager.take_up_to(5).await.unwrap();

    assert_eq!(items, vec![0, 1, 2, 3, 4]);
    assert_eq!(page_sizes(&calls), vec![5]);
}

#[tokio::test]
async fn test_default_page_size_is_used_when_request_has_none() {
    let (list, calls) = dataset(3);

    let mut pager = Pager::new(list, FakeRequest::default());
    assert_eq!(pager.page_size(), DEFAULT_PAGE_SIZE);

    pager.take_all().await.unwrap();

    assert_eq!(page_sizes(&calls), vec![DEFAULT_PAGE_SIZE]);
}

#[tokio::test]
async fn test_request_page_size_is_the_configured_page_size() {
    let (list, calls) = dataset(7);

    let request = FakeRequest {
        page_size: 3,
        ..Default::default()
    };
    let mut pager = Pager::new(list, request);

    let items = pager.take_all().await.unwrap();

    assert_eq!(items.len(), 7);
    assert_eq!(page_sizes(&calls), vec![3, 3, 3]);
}

#[tokio::test]
async fn test_failure_on_second_page_returns_collected_items_and_error() {
    let (list, calls) = scripted(vec![
        page([1, 2], "a"),
        Err(Status::unavailable("connection reset")),
        page([3], ""),
    ]);

    let mut pager = Pager::new(list, FakeRequest::default());

    let (items, status) = pager.take_all().await.unwrap_err().into_parts();

    assert_eq!(items, vec![1, 2]);
    assert_eq!(status.code(), Code::Unavailable);

    let last = pager.last_error().expect("terminal error must be kept");
    assert_eq!(last.code(), Code::Unavailable);
    assert_eq!(last.message(), "connection reset");
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_terminal_state_never_calls_again() {
    let (list, calls) = scripted(vec![Err(Status::permission_denied("nope"))]);

    let mut pager = Pager::new(list, FakeRequest::default());

    assert!(!pager.advance().await);
    assert!(!pager.advance().await);

    let err = pager.take_up_to(10).await.unwrap_err();
    assert!(err.items.is_empty());
    assert_eq!(err.status.code(), Code::PermissionDenied);

    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
#[should_panic(expected = "without a successful Pager::advance")]
async fn test_current_before_advance_panics() {
    let (list, _calls) = scripted(vec![]);

    let pager = Pager::new(list, FakeRequest::default());

    let _ = pager.current();
}

#[tokio::test]
#[should_panic(expected = "without a successful Pager::advance")]
async fn test_current_after_exhaustion_panics() {
    let (list, _calls) = scripted(vec![page([1], "")]);

    let mut pager = Pager::new(list, FakeRequest::default());

    assert!(pager.advance().await);
    assert!(!pager.advance().await);

    let _ = pager.current();
}

#[tokio::test]
async fn test_single_advances_walk_across_pages() {
    let (list, calls) = scripted(vec![page([1, 2], "a"), page([3], "")]);

    let mut pager = Pager::new(list, FakeRequest::default());

    let mut seen = Vec::new();
    while pager.advance().await {
        seen.push(*pager.current());
    }

    assert_eq!(seen, vec![1, 2, 3]);
    assert_eq!(calls.lock().unwrap().len(), 2);
    assert!(pager.last_error().is_none());
}

#[tokio::test]
async fn test_mixed_single_and_bulk_pulls_reuse_the_pager() {
    let (list, calls) = dataset(12);

    let mut pager = Pager::new(list, FakeRequest::default()).with_page_size(4);

    assert!(pager.advance().await);
    assert_eq!(*pager.current(), 0);

    let bulk = pager.take_up_to(2).await.unwrap();
    assert_eq!(bulk, vec![1, 2]);

    // The take is over: the next fetch goes back to the configured page size.
    assert!(pager.advance().await);
    assert_eq!(*pager.current(), 3);
    assert!(pager.advance().await);
    assert_eq!(*pager.current(), 4);

    let rest = pager.take_all().await.unwrap();
    assert_eq!(rest, (5..12).collect::<Vec<_>>());

    assert_eq!(page_sizes(&calls), vec![4, 4, 4]);
}

#[tokio::test]
async fn test_bulk_take_after_partial_page_only_fetches_missing_items() {
    let (list, calls) = dataset(50);

    let mut pager = Pager::new(list, FakeRequest::default()).with_page_size(10);

    let first = pager.take_up_to(4).await.unwrap();
    assert_eq!(first, vec![0, 1, 2, 3]);

    // Only the current item is buffered, so the next take starts with a fetch.
    let second = pager.take_up_to(15).await.unwrap();
    assert_eq!(second, (4..19).collect::<Vec<_>>());

    assert_eq!(page_sizes(&calls), vec![4, 10, 5]);
}

#[tokio::test]
async fn test_empty_page_with_token_ends_listing() {
    let (list, calls) = scripted(vec![page([1], "a"), page([], "b")]);

    let mut pager = Pager::new(list, FakeRequest::default());

    let items = pager.take_all().await.unwrap();

    assert_eq!(items, vec![1]);
    assert_eq!(calls.lock().unwrap().len(), 2);
    assert_eq!(pager.next_page_token(), "b");
}

#[tokio::test]
async fn test_advance_after_empty_page_resumes_from_its_token() {
    let (list, calls) = scripted(vec![page([1], "a"), page([], "b"), page([2], "")]);

    let mut pager = Pager::new(list, FakeRequest::default());

    assert_eq!(pager.take_all().await.unwrap(), vec![1]);

    // The empty page ended that pull only; the listing itself is not over.
    assert!(pager.advance().await);
    assert_eq!(*pager.current(), 2);
    assert!(!pager.advance().await);

    let tokens: Vec<_> = calls
        .lock()
        .unwrap()
        .iter()
        .map(|r| r.page_token.clone())
        .collect();
    assert_eq!(tokens, vec!["", "a", "b"]);
}

#[tokio::test]
async fn test_items_are_moved_out_without_cloning() {
    #[derive(Debug, PartialEq)]
    struct Blob(u32);

    struct BlobPage(Vec<Blob>, String);

    impl PageResponse for BlobPage {
        type Item = Blob;

        fn into_page(self) -> (Vec<Blob>, String) {
            (self.0, self.1)
        }
    }

    let list = |request: FakeRequest| {
        let response = match request.page_token.as_str() {
            "" => BlobPage(vec![Blob(1), Blob(2)], "next".to_string()),
            _ => BlobPage(vec![Blob(3)], String::new()),
        };
        ready(Ok::<_, Status>(response))
    };

    let mut pager = Pager::new(list, FakeRequest::default());

    assert!(pager.advance().await);
    assert_eq!(pager.current(), &Blob(1));
    assert_eq!(pager.take_all().await.unwrap(), vec![Blob(2), Blob(3)]);
}

#[tokio::test]
#[should_panic(expected = "without a successful Pager::advance")]
async fn test_current_after_bulk_take_panics() {
    let (list, _calls) = dataset(5);

    let mut pager = Pager::new(list, FakeRequest::default());

    assert_eq!(pager.take_up_to(2).await.unwrap(), vec![0, 1]);

    let _ = pager.current();
}

#[tokio::test]
async fn test_initial_page_token_resumes_listing() {
    let (list, calls) = dataset(10);

    let request = FakeRequest {
        page_size: 4,
        page_token: "6".to_string(),
    };
    let mut pager = Pager::new(list, request);

    let items = pager.take_all().await.unwrap();

    assert_eq!(items, vec![6, 7, 8, 9]);
    assert_eq!(calls.lock().unwrap()[0].page_token, "6");
}

#[tokio::test]
async fn test_into_stream_yields_items_then_error_once() {
    let (list, calls) = scripted(vec![page([1, 2], "a"), Err(Status::internal("boom"))]);

    let pager = Pager::new(list, FakeRequest::default());

    let results: Vec<_> = pager.into_stream().collect().await;

    assert_eq!(results.len(), 3);
    assert_eq!(*results[0].as_ref().unwrap(), 1);
    assert_eq!(*results[1].as_ref().unwrap(), 2);
    assert_eq!(results[2].as_ref().unwrap_err().code(), Code::Internal);
    assert_eq!(calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn test_into_stream_ends_cleanly() {
    let (list, _calls) = dataset(5);

    let pager = Pager::new(list, FakeRequest::default()).with_page_size(2);

    let items: Vec<u32> = pager
        .into_stream()
        .map(|r| r.unwrap())
        .collect()
        .await;

    assert_eq!(items, vec![0, 1, 2, 3, 4]);
}
