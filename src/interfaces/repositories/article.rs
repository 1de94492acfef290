use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::{
    entities::article::{Article, ArticleCounter, ArticleFilter, ArticleInsert},
    errors::AppError,
    repositories::sqlx_repo::SqlxArticleRepo,
};

const ARTICLE_ORDER: &str = " ORDER BY published_at DESC, id DESC";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn list_articles(&self) -> Result<Vec<Article>, AppError>;
    async fn list_articles_filtered(&self, filter: ArticleFilter) -> Result<Vec<Article>, AppError>;
    async fn get_article_by_id(&self, id: i32) -> Result<Option<Article>, AppError>;
    async fn create_article(&self, article: &ArticleInsert) -> Result<Article, AppError>;
    async fn update_article(&self, id: i32, article: &ArticleInsert) -> Result<Option<Article>, AppError>;
    async fn update_article_pdf_path(&self, id: i32, pdf_path: &str) -> Result<Option<Article>, AppError>;
    async fn delete_article(&self, id: i32) -> Result<Option<Article>, AppError>;

    /// Atomically bumps a counter and returns its new value.
    async fn increment_article_counter(&self, id: i32, counter: ArticleCounter) -> Result<Option<i32>, AppError>;
}

impl SqlxArticleRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxArticleRepo { pool }
    }
}

#[async_trait]
impl ArticleRepository for SqlxArticleRepo {
    async fn list_articles(&self) -> Result<Vec<Article>, AppError> {
        let articles = QueryBuilder::<Postgres>::new("SELECT * FROM articles")
            .push(ARTICLE_ORDER)
            .build_query_as::<Article>()
            .fetch_all(&self.pool)
            .await?;

        Ok(articles)
    }

    async fn list_articles_filtered(&self, filter: ArticleFilter) -> Result<Vec<Article>, AppError> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM articles WHERE ");

        match filter {
            ArticleFilter::Featured => query.push("featured = TRUE"),
            ArticleFilter::Category(category) => query.push("category = ").push_bind(category),
            ArticleFilter::Tag(tag) => query.push_bind(tag).push(" = ANY(tags)"),
        };
        query.push(ARTICLE_ORDER);

        let articles = query
            .build_query_as::<Article>()
            .fetch_all(&self.pool)
            .await?;

        Ok(articles)
    }

    async fn get_article_by_id(&self, id: i32) -> Result<Option<Article>, AppError> {
        let article = sqlx::query_as::<_, Article>(
            r#"SELECT * FROM articles WHERE id = $1"#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(article)
    }

    async fn create_article(&self, article: &ArticleInsert) -> Result<Article, AppError> {
        let created = sqlx::query_as::<_, Article>(
            r#"
            INSERT INTO articles (
                title, excerpt, content, pdf_path, author, read_time,
                tags, featured, image, category
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#
        )
        .bind(&article.title)
        .bind(&article.excerpt)
        .bind(&article.content)
        .bind(&article.pdf_path)
        .bind(&article.author)
        .bind(&article.read_time)
        .bind(&article.tags)
        .bind(article.featured)
        .bind(&article.image)
        .bind(&article.category)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update_article(&self, id: i32, article: &ArticleInsert) -> Result<Option<Article>, AppError> {
        let updated = sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles SET
                title = $1,
                excerpt = $2,
                content = $3,
                pdf_path = $4,
                author = $5,
                read_time = $6,
                tags = $7,
                featured = $8,
                image = $9,
                category = $10,
                updated_at = NOW()
            WHERE id = $11
            RETURNING *
            "#
        )
        .bind(&article.title)
        .bind(&article.excerpt)
        .bind(&article.content)
        .bind(&article.pdf_path)
        .bind(&article.author)
        .bind(&article.read_time)
        .bind(&article.tags)
        .bind(article.featured)
        .bind(&article.image)
        .bind(&article.category)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn update_article_pdf_path(&self, id: i32, pdf_path: &str) -> Result<Option<Article>, AppError> {
        let updated = sqlx::query_as::<_, Article>(
            r#"
            UPDATE articles
            SET pdf_path = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING *
            "#
        )
        .bind(pdf_path)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete_article(&self, id: i32) -> Result<Option<Article>, AppError> {
        let deleted = sqlx::query_as::<_, Article>(
            r#"DELETE FROM articles WHERE id = $1 RETURNING *"#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deleted)
    }

    async fn increment_article_counter(&self, id: i32, counter: ArticleCounter) -> Result<Option<i32>, AppError> {
        let column = counter.column();
        let sql = format!(
            "UPDATE articles SET {column} = {column} + 1 WHERE id = $1 RETURNING {column}"
        );

        let value = sqlx::query_scalar::<_, i32>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }
}
