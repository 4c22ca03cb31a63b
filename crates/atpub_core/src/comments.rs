//! Comment aggregation: reply threads and URL mentions, rebuilt as a tree.

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Platform tag attached to every aggregated comment.
pub const PLATFORM_BLUESKY: &str = "bluesky";

/// Author of a post, reduced to what rendering needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentAuthor {
    /// Author DID.
    pub did: String,
    /// Author handle.
    pub handle: String,
    /// Display name, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Avatar URL, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// One aggregated comment, with its replies resolved into owned children.
///
/// Until [`build_tree`] runs, the parent/child relation lives in the
/// `parent` address field; afterwards children are owned by `replies` and
/// ordered chronologically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// at:// URI of the post.
    pub address: String,
    /// Content hash of the post.
    pub cid: String,
    /// Post text.
    pub text: String,
    /// Post author.
    pub author: CommentAuthor,
    /// Post creation time.
    pub created_at: DateTime<Utc>,
    /// Source platform tag.
    pub platform: String,
    /// Human-facing URL of the post.
    pub source_url: String,
    /// at:// URI of the parent post, when this is a structural reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Like count, when the platform reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    /// Reply count, when the platform reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_count: Option<u64>,
    /// Child comments, chronologically ascending.
    #[serde(default)]
    pub replies: Vec<Comment>,
}

/// A post as returned by the social read API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    /// at:// URI of the post.
    pub uri: String,
    /// Content hash of the post.
    pub cid: String,
    /// Post author.
    pub author: CommentAuthor,
    /// Post text.
    pub text: String,
    /// Post creation time.
    pub created_at: DateTime<Utc>,
    /// Like count, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub like_count: Option<u64>,
    /// Reply count, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_count: Option<u64>,
}

/// A node in the nested reply structure returned by the thread endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadNode {
    /// The post at this node.
    pub post: PostView,
    /// Direct replies.
    #[serde(default)]
    pub replies: Vec<ThreadNode>,
}

/// Federated social read API, injected so aggregation is testable offline.
#[async_trait]
pub trait FeedReader: Send + Sync {
    /// Fetches the reply thread rooted at a post. `None` means the thread
    /// was not found, which aggregation treats as "no comments", not an
    /// error.
    async fn get_post_thread(&self, uri: &str, depth: usize) -> Result<Option<ThreadNode>>;

    /// Full-text search for posts mentioning a query string.
    async fn search_posts(&self, query: &str, limit: usize) -> Result<Vec<PostView>>;
}

/// Options for [`fetch_comments`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// at:// URI of the root post whose replies to collect.
    pub root_post: Option<String>,
    /// Canonical URL to search independent mentions of.
    pub url: Option<String>,
    /// Maximum reply depth requested from the thread endpoint.
    pub max_depth: usize,
    /// Hard cap on total comments; excess is truncated by prefix.
    pub max_comments: usize,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            root_post: None,
            url: None,
            max_depth: 3,
            max_comments: 100,
        }
    }
}

/// Fetches and assembles the comment tree for a rendering request.
///
/// Thread replies are collected first, then URL mentions (deduplicated by
/// exact address against the replies and the root post), the combined list
/// is truncated to `max_comments`, and the result is linked into a tree
/// sorted chronologically at every level.
///
/// Either fetch sub-step failing degrades to an empty contribution from
/// that sub-step; this function never fails.
pub async fn fetch_comments<F: FeedReader>(reader: &F, options: &FetchOptions) -> Vec<Comment> {
    let mut collected: Vec<Comment> = Vec::new();

    if let Some(root) = &options.root_post {
        match reader.get_post_thread(root, options.max_depth).await {
            Ok(Some(node)) => {
                // The root post itself is not a comment; only descendants
                // count, each with its parent taken from the nesting.
                let root_uri = node.post.uri.clone();
                for reply in node.replies {
                    flatten_thread(reply, &root_uri, &mut collected);
                }
            }
            Ok(None) => {}
            Err(e) => warn!(root = %root, error = %e, "thread fetch failed; skipping replies"),
        }
    }

    if let Some(url) = &options.url {
        let limit = options.max_comments.saturating_sub(collected.len()).max(10);
        match reader.search_posts(url, limit).await {
            Ok(posts) => {
                for post in posts {
                    let is_root = options.root_post.as_deref() == Some(post.uri.as_str());
                    let seen = collected.iter().any(|c| c.address == post.uri);
                    if !is_root && !seen {
                        collected.push(comment_from_post(post, None));
                    }
                }
            }
            Err(e) => warn!(%url, error = %e, "mention search failed; skipping mentions"),
        }
    }

    collected.truncate(options.max_comments);
    build_tree(collected)
}

/// Links a flat comment list into a tree by parent address.
///
/// Two passes: index every retained address, then attach each comment to
/// its parent when that parent is present, so source order between parent
/// and child does not matter. Comments without a resolvable parent become
/// roots. Every level ends up sorted by creation time ascending.
pub fn build_tree(comments: Vec<Comment>) -> Vec<Comment> {
    let present: HashSet<String> = comments.iter().map(|c| c.address.clone()).collect();

    let mut roots: Vec<Comment> = Vec::new();
    let mut children: HashMap<String, Vec<Comment>> = HashMap::new();

    for comment in comments {
        match &comment.parent {
            Some(parent) if present.contains(parent) && *parent != comment.address => {
                children.entry(parent.clone()).or_default().push(comment);
            }
            _ => roots.push(comment),
        }
    }

    for root in &mut roots {
        attach_children(root, &mut children);
    }

    sort_recursive(&mut roots);
    roots
}

fn attach_children(node: &mut Comment, children: &mut HashMap<String, Vec<Comment>>) {
    if let Some(mut kids) = children.remove(&node.address) {
        for kid in &mut kids {
            attach_children(kid, children);
        }
        node.replies = kids;
    }
}

fn sort_recursive(comments: &mut [Comment]) {
    comments.sort_by_key(|c| c.created_at);
    for comment in comments {
        sort_recursive(&mut comment.replies);
    }
}

/// Flattens a comment tree back to a list, depth-first with each parent
/// before its children. Child links are dropped from the emitted copies.
pub fn flatten_comments(comments: &[Comment]) -> Vec<Comment> {
    fn walk(comment: &Comment, out: &mut Vec<Comment>) {
        let mut flat = comment.clone();
        flat.replies = Vec::new();
        out.push(flat);
        for reply in &comment.replies {
            walk(reply, out);
        }
    }

    let mut out = Vec::new();
    for comment in comments {
        walk(comment, &mut out);
    }
    out
}

/// Counts all comments in a tree, at every depth.
pub fn count_comments(comments: &[Comment]) -> usize {
    comments.iter().map(|c| 1 + count_comments(&c.replies)).sum()
}

fn flatten_thread(node: ThreadNode, parent_uri: &str, out: &mut Vec<Comment>) {
    let uri = node.post.uri.clone();
    out.push(comment_from_post(node.post, Some(parent_uri.to_string())));
    for reply in node.replies {
        flatten_thread(reply, &uri, out);
    }
}

fn comment_from_post(post: PostView, parent: Option<String>) -> Comment {
    let source_url = post_web_url(&post.author.handle, &post.uri);
    Comment {
        address: post.uri,
        cid: post.cid,
        text: post.text,
        author: post.author,
        created_at: post.created_at,
        platform: PLATFORM_BLUESKY.to_string(),
        source_url,
        parent,
        like_count: post.like_count,
        reply_count: post.reply_count,
        replies: Vec::new(),
    }
}

/// Human-facing URL of a post on the platform's web app.
fn post_web_url(handle: &str, uri: &str) -> String {
    let rkey = uri.rsplit('/').next().unwrap_or_default();
    format!("https://bsky.app/profile/{handle}/post/{rkey}")
}
