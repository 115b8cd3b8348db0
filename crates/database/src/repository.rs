use crate::DbError;
use core_types::{Article, ArticleSummary, Comment, Topic, User};
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPool;

/// The `NewsRepository` provides a high-level, application-specific
/// interface to the database. It encapsulates all SQL queries and the
/// classification of their failures.
#[derive(Debug, Clone)]
pub struct NewsRepository {
    pool: PgPool,
}

/// Shared numeric-validation policy for path identifiers. Every operation
/// that accepts an id runs it through here before touching the pool, so a
/// malformed id fails the same way everywhere.
fn parse_id(raw: &str) -> Result<i32, DbError> {
    raw.parse::<i32>()
        .map_err(|_| DbError::Validation("Invalid input"))
}

/// Extracts the vote increment from a raw JSON value. Only JSON numbers
/// within i32 range count; numeric-looking strings are rejected.
fn vote_delta(inc_votes: Option<&JsonValue>) -> Result<i32, DbError> {
    inc_votes
        .and_then(JsonValue::as_i64)
        .and_then(|delta| i32::try_from(delta).ok())
        .ok_or(DbError::Validation("Input should be a number!"))
}

impl NewsRepository {
    /// Creates a new `NewsRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches all topics, unordered.
    pub async fn list_topics(&self) -> Result<Vec<Topic>, DbError> {
        let topics = sqlx::query_as::<_, Topic>("SELECT slug, description FROM topics")
            .fetch_all(&self.pool)
            .await?;
        Ok(topics)
    }

    /// Fetches a single article, body included.
    pub async fn article_by_id(&self, raw_id: &str) -> Result<Article, DbError> {
        let article_id = parse_id(raw_id)?;
        let article = sqlx::query_as::<_, Article>(
            r#"
            SELECT article_id, title, topic, author, body, created_at, votes, article_img_url
            FROM articles
            WHERE article_id = $1
            "#,
        )
        .bind(article_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound("Article doesn't exist!"))?;

        Ok(article)
    }

    /// Fetches article summaries (no body) with their comment counts,
    /// newest first. A topic filter restricts the result to that topic;
    /// an unknown topic is a failure, a known topic with no articles is an
    /// empty success.
    pub async fn list_articles(
        &self,
        topic: Option<&str>,
    ) -> Result<Vec<ArticleSummary>, DbError> {
        if let Some(slug) = topic {
            self.topic_must_exist(slug).await?;
        }

        let mut query = String::from(
            r#"
            SELECT articles.article_id, articles.title, articles.topic, articles.author,
                   articles.created_at, articles.votes, articles.article_img_url,
                   COUNT(comments.comment_id) AS comment_count
            FROM articles
            LEFT JOIN comments ON articles.article_id = comments.article_id
            "#,
        );
        if topic.is_some() {
            query.push_str("WHERE articles.topic = $1\n");
        }
        query.push_str("GROUP BY articles.article_id ORDER BY articles.created_at DESC");

        let mut articles = sqlx::query_as::<_, ArticleSummary>(&query);
        if let Some(slug) = topic {
            articles = articles.bind(slug);
        }

        Ok(articles.fetch_all(&self.pool).await?)
    }

    /// Atomically adjusts an article's vote count by a relative increment
    /// and returns the updated row. The count is never set absolutely.
    pub async fn adjust_article_votes(
        &self,
        raw_id: &str,
        inc_votes: Option<&JsonValue>,
    ) -> Result<Article, DbError> {
        // The increment is validated before the id; a request with both
        // malformed reports the increment failure.
        let delta = vote_delta(inc_votes)?;
        let article_id = parse_id(raw_id)?;

        let updated = sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles SET votes = votes + $1
            WHERE article_id = $2
            RETURNING article_id, title, topic, author, body, created_at, votes, article_img_url
            "#,
        )
        .bind(delta)
        .bind(article_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DbError::NotFound("Article doesn't exist!"))?;

        Ok(updated)
    }

    /// Fetches the comments on an article, newest first. The article must
    /// exist; an article without comments yields an empty list.
    pub async fn comments_for_article(&self, raw_id: &str) -> Result<Vec<Comment>, DbError> {
        let article = self.article_by_id(raw_id).await?;

        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT comment_id, article_id, author, body, votes, created_at
            FROM comments
            WHERE article_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(article.article_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    /// Inserts a comment on an article and returns the created row.
    ///
    /// Required fields are checked first (author, then body), then the
    /// article's existence. An author unknown to the users table surfaces
    /// as a foreign-key violation and is classified at the boundary.
    pub async fn insert_comment(
        &self,
        raw_id: &str,
        author: Option<&str>,
        body: Option<&str>,
    ) -> Result<Comment, DbError> {
        let author = author.ok_or(DbError::Validation("Username is required!"))?;
        let body = body.ok_or(DbError::Validation("Comment is required!"))?;

        let article = self.article_by_id(raw_id).await?;

        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (article_id, author, body)
            VALUES ($1, $2, $3)
            RETURNING comment_id, article_id, author, body, votes, created_at
            "#,
        )
        .bind(article.article_id)
        .bind(author)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    /// Deletes a comment. Succeeds silently; a miss is a failure.
    pub async fn delete_comment(&self, raw_id: &str) -> Result<(), DbError> {
        let comment_id = parse_id(raw_id)?;

        let result = sqlx::query("DELETE FROM comments WHERE comment_id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound("Comment doesn't exist!"));
        }
        Ok(())
    }

    /// Fetches all users. An empty table is an empty list, not a failure.
    pub async fn list_users(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>("SELECT username, name, avatar_url FROM users")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    /// Existence check backing the topic filter of `list_articles`.
    async fn topic_must_exist(&self, slug: &str) -> Result<(), DbError> {
        sqlx::query("SELECT slug FROM topics WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(DbError::NotFound("The specific topic does not exist!"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_id_accepts_well_formed_integers() {
        assert_eq!(parse_id("1").unwrap(), 1);
        assert_eq!(parse_id("999999").unwrap(), 999999);
        assert_eq!(parse_id("-3").unwrap(), -3);
    }

    #[test]
    fn parse_id_rejects_non_numeric_input() {
        for raw in ["dog", "", "1.5", "1e3", "0x10", " 1"] {
            match parse_id(raw) {
                Err(DbError::Validation(msg)) => assert_eq!(msg, "Invalid input"),
                other => panic!("{raw:?} produced {other:?}"),
            }
        }
    }

    #[test]
    fn parse_id_rejects_out_of_range_input() {
        assert!(matches!(
            parse_id("99999999999999"),
            Err(DbError::Validation("Invalid input"))
        ));
    }

    #[test]
    fn vote_delta_accepts_json_numbers() {
        let one = json!(1);
        let negative = json!(-100);
        assert_eq!(vote_delta(Some(&one)).unwrap(), 1);
        assert_eq!(vote_delta(Some(&negative)).unwrap(), -100);
    }

    #[test]
    fn vote_delta_rejects_missing_and_non_numeric_input() {
        let cases = [json!("cat"), json!("5"), json!(1.5), json!(null), json!([1])];
        for value in &cases {
            match vote_delta(Some(value)) {
                Err(DbError::Validation(msg)) => assert_eq!(msg, "Input should be a number!"),
                other => panic!("{value} produced {other:?}"),
            }
        }
        assert!(matches!(
            vote_delta(None),
            Err(DbError::Validation("Input should be a number!"))
        ));
    }

    #[test]
    fn vote_delta_rejects_values_outside_i32_range() {
        let huge = json!(10_000_000_000_i64);
        assert!(matches!(
            vote_delta(Some(&huge)),
            Err(DbError::Validation("Input should be a number!"))
        ));
    }
}
