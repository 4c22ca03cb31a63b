//! Comment aggregation against the fake feed.

use crate::harness::{post, reply, thread, FakeFeed};
use atpub_core::{count_comments, fetch_comments, flatten_comments, FetchOptions, PLATFORM_BLUESKY};

const ROOT: &str = "at://did:plc:alice/app.bsky.feed.post/3kroot";
const PAGE: &str = "https://alice.test/posts/hello";

fn options() -> FetchOptions {
    FetchOptions {
        root_post: Some(ROOT.to_string()),
        url: Some(PAGE.to_string()),
        ..Default::default()
    }
}

fn populated_feed() -> FakeFeed {
    // Root announcement with a small conversation under it, plus two
    // standalone posts mentioning the page (one of which duplicates a
    // reply already in the thread).
    FakeFeed::new()
        .with_thread(
            ROOT,
            thread(
                post(ROOT, "new post up!", 100),
                vec![
                    thread(
                        post("at://r1", "nice read", 120),
                        vec![reply("at://r1a", "agreed", 140)],
                    ),
                    reply("at://r2", "typo in para 2", 110),
                ],
            ),
        )
        .with_post(post("at://r1", &format!("nice read {PAGE}"), 120))
        .with_post(post("at://m1", &format!("everyone should read {PAGE}"), 90))
}

#[tokio::test]
async fn test_thread_and_mentions_merge_into_tree() {
    let tree = fetch_comments(&populated_feed(), &options()).await;

    // Roots sorted chronologically: the mention predates the replies.
    let roots: Vec<_> = tree.iter().map(|c| c.address.as_str()).collect();
    assert_eq!(roots, ["at://m1", "at://r2", "at://r1"]);

    // Nesting preserved from the thread structure.
    let r1 = tree.iter().find(|c| c.address == "at://r1").unwrap();
    assert_eq!(r1.replies.len(), 1);
    assert_eq!(r1.replies[0].address, "at://r1a");

    // The duplicated mention of at://r1 appears exactly once overall.
    assert_eq!(count_comments(&tree), 4);
    let flat = flatten_comments(&tree);
    assert_eq!(flat.iter().filter(|c| c.address == "at://r1").count(), 1);
    assert!(flat.iter().all(|c| c.platform == PLATFORM_BLUESKY));
}

#[tokio::test]
async fn test_mention_only_page() {
    let feed = FakeFeed::new().with_post(post("at://m1", &format!("see {PAGE}"), 50));
    let opts = FetchOptions {
        root_post: None,
        url: Some(PAGE.to_string()),
        ..Default::default()
    };

    let tree = fetch_comments(&feed, &opts).await;
    assert_eq!(tree.len(), 1);
    assert_eq!(tree[0].address, "at://m1");
    assert!(tree[0].parent.is_none());
}

#[tokio::test]
async fn test_unknown_root_yields_empty() {
    let feed = FakeFeed::new();
    let opts = FetchOptions {
        root_post: Some(ROOT.to_string()),
        url: None,
        ..Default::default()
    };
    assert!(fetch_comments(&feed, &opts).await.is_empty());
}

#[tokio::test]
async fn test_broken_search_does_not_break_thread() {
    let mut feed = populated_feed();
    feed.fail_search = true;

    let tree = fetch_comments(&feed, &options()).await;
    let flat = flatten_comments(&tree);
    let addresses: Vec<_> = flat.iter().map(|c| c.address.as_str()).collect();
    assert_eq!(addresses, ["at://r2", "at://r1", "at://r1a"]);
}

#[tokio::test]
async fn test_broken_thread_does_not_break_search() {
    let mut feed = populated_feed();
    feed.fail_thread = true;

    let tree = fetch_comments(&feed, &options()).await;
    let roots: Vec<_> = tree.iter().map(|c| c.address.as_str()).collect();
    assert_eq!(roots, ["at://m1", "at://r1"]);
}

#[tokio::test]
async fn test_cap_truncates_mentions_first() {
    let mut feed = FakeFeed::new().with_thread(
        ROOT,
        thread(
            post(ROOT, "announcement", 10),
            vec![
                reply("at://r1", "one", 20),
                reply("at://r2", "two", 21),
                reply("at://r3", "three", 22),
            ],
        ),
    );
    for i in 0..5 {
        feed = feed.with_post(post(&format!("at://m{i}"), &format!("mention {PAGE}"), 30 + i));
    }

    let opts = FetchOptions {
        max_comments: 5,
        ..options()
    };
    let tree = fetch_comments(&feed, &opts).await;
    let flat = flatten_comments(&tree);
    assert_eq!(flat.len(), 5);
    for kept in ["at://r1", "at://r2", "at://r3"] {
        assert!(flat.iter().any(|c| c.address == kept), "missing {kept}");
    }
}
