use sqlx::PgPool;
use uuid::Uuid;

use crate::models::forum::{
    CategoryWithCount, CreatePostRequest, CreateThreadRequest, PostWithAuthor, ThreadDetail,
    ThreadSummary,
};

const THREAD_SUMMARY_COLS: &str = "t.id, t.category_id, t.author_id, u.full_name AS author_name,
     t.title, t.content, t.view_count, t.is_pinned,
     (SELECT COUNT(*) FROM forum_posts p WHERE p.thread_id = t.id) AS reply_count,
     t.created_at";

/// Ranking used by the trending box: replies weigh five times a view.
pub fn trending_score(view_count: i32, reply_count: i64) -> i64 {
    view_count as i64 + reply_count * 5
}

pub struct ForumService;

impl ForumService {
    pub async fn list_categories(pool: &PgPool) -> anyhow::Result<Vec<CategoryWithCount>> {
        let categories = sqlx::query_as::<_, CategoryWithCount>(
            "SELECT c.id, c.name, c.description, c.icon, c.color, c.position,
                    (SELECT COUNT(*) FROM forum_threads t WHERE t.category_id = c.id) AS thread_count
             FROM forum_categories c
             ORDER BY c.position",
        )
        .fetch_all(pool)
        .await?;
        Ok(categories)
    }

    /// Threads in a category: pinned first, then newest first.
    pub async fn list_threads(
        pool: &PgPool,
        category_id: Uuid,
    ) -> anyhow::Result<Vec<ThreadSummary>> {
        let threads = sqlx::query_as::<_, ThreadSummary>(&format!(
            "SELECT {THREAD_SUMMARY_COLS}
             FROM forum_threads t
             JOIN users u ON u.id = t.author_id
             WHERE t.category_id = $1
             ORDER BY t.is_pinned DESC, t.created_at DESC"
        ))
        .bind(category_id)
        .fetch_all(pool)
        .await?;
        Ok(threads)
    }

    pub async fn create_thread(
        pool: &PgPool,
        author_id: Uuid,
        req: &CreateThreadRequest,
    ) -> anyhow::Result<ThreadSummary> {
        if req.title.trim().is_empty() || req.content.trim().is_empty() {
            anyhow::bail!("Title and content are required");
        }

        let thread_id: Uuid = sqlx::query_scalar(
            "INSERT INTO forum_threads (category_id, author_id, title, content)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(req.category_id)
        .bind(author_id)
        .bind(req.title.trim())
        .bind(req.content.trim())
        .fetch_one(pool)
        .await?;

        Self::fetch_summary(pool, thread_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Thread not found after insert"))
    }

    /// Thread detail with its posts. Each fetch by someone other than the
    /// author counts one view; the author's own visits do not.
    pub async fn thread_detail(
        pool: &PgPool,
        thread_id: Uuid,
        viewer_id: Uuid,
    ) -> anyhow::Result<Option<ThreadDetail>> {
        sqlx::query(
            "UPDATE forum_threads SET view_count = view_count + 1
             WHERE id = $1 AND author_id != $2",
        )
        .bind(thread_id)
        .bind(viewer_id)
        .execute(pool)
        .await?;

        let Some(thread) = Self::fetch_summary(pool, thread_id).await? else {
            return Ok(None);
        };

        let posts = sqlx::query_as::<_, PostWithAuthor>(
            "SELECT p.id, p.thread_id, p.author_id, u.full_name AS author_name, p.content, p.created_at
             FROM forum_posts p
             JOIN users u ON u.id = p.author_id
             WHERE p.thread_id = $1
             ORDER BY p.created_at",
        )
        .bind(thread_id)
        .fetch_all(pool)
        .await?;

        Ok(Some(ThreadDetail { thread, posts }))
    }

    pub async fn add_post(
        pool: &PgPool,
        thread_id: Uuid,
        author_id: Uuid,
        req: &CreatePostRequest,
    ) -> anyhow::Result<Option<PostWithAuthor>> {
        if req.content.trim().is_empty() {
            anyhow::bail!("Content is required");
        }

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM forum_threads WHERE id = $1)")
                .bind(thread_id)
                .fetch_one(pool)
                .await?;
        if !exists {
            return Ok(None);
        }

        let post = sqlx::query_as::<_, PostWithAuthor>(
            "WITH inserted AS (
                 INSERT INTO forum_posts (thread_id, author_id, content)
                 VALUES ($1, $2, $3)
                 RETURNING *
             )
             SELECT i.id, i.thread_id, i.author_id, u.full_name AS author_name, i.content, i.created_at
             FROM inserted i
             JOIN users u ON u.id = i.author_id",
        )
        .bind(thread_id)
        .bind(author_id)
        .bind(req.content.trim())
        .fetch_one(pool)
        .await?;

        crate::services::metrics::FORUM_POSTS_COUNTER.inc();
        Ok(Some(post))
    }

    /// Top five threads across all categories by view/reply score.
    pub async fn trending(pool: &PgPool) -> anyhow::Result<Vec<ThreadSummary>> {
        let mut threads = sqlx::query_as::<_, ThreadSummary>(&format!(
            "SELECT {THREAD_SUMMARY_COLS}
             FROM forum_threads t
             JOIN users u ON u.id = t.author_id"
        ))
        .fetch_all(pool)
        .await?;

        threads.sort_by_key(|t| std::cmp::Reverse(trending_score(t.view_count, t.reply_count)));
        threads.truncate(5);
        Ok(threads)
    }

    async fn fetch_summary(
        pool: &PgPool,
        thread_id: Uuid,
    ) -> anyhow::Result<Option<ThreadSummary>> {
        let thread = sqlx::query_as::<_, ThreadSummary>(&format!(
            "SELECT {THREAD_SUMMARY_COLS}
             FROM forum_threads t
             JOIN users u ON u.id = t.author_id
             WHERE t.id = $1"
        ))
        .bind(thread_id)
        .fetch_optional(pool)
        .await?;
        Ok(thread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trending_score_weighs_replies_five_to_one() {
        assert_eq!(trending_score(10, 0), 10);
        assert_eq!(trending_score(0, 2), 10);
        assert_eq!(trending_score(7, 3), 22);
    }

    #[test]
    fn test_trending_order() {
        // (views, replies) — the middle thread wins on replies despite fewer views.
        let mut entries = vec![(40, 0), (10, 8), (25, 2)];
        entries.sort_by_key(|(v, r)| std::cmp::Reverse(trending_score(*v, *r)));
        assert_eq!(entries, vec![(10, 8), (40, 0), (25, 2)]);
    }
}
