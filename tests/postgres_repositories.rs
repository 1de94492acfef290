//! Tests against a real PostgreSQL database.
//!
//! Run with `APP_TEST_DATABASE_URL=postgres://... cargo test -- --ignored`.
//! Each test scopes its rows with a unique category or marker, so the suite
//! can run in parallel against a shared database.

use std::net::TcpListener;

use actix_web::{web, App, HttpServer};
use portfolio_content_api::{
    entities::{
        article::{ArticleCounter, ArticleFilter, ArticleInsert},
        contact::ContactMessageInsert,
        experience::ExperienceInsert,
        project::{ProjectFilter, ProjectInsert, ProjectStatus},
    },
    handlers::system::route_not_found,
    middlewares::error_envelope::ErrorEnvelope,
    repositories::{
        article::ArticleRepository,
        contact::ContactMessageRepository,
        experience::ExperienceRepository,
        project::ProjectRepository,
        sqlx_repo::{SqlxArticleRepo, SqlxContactMessageRepo, SqlxExperienceRepo, SqlxProjectRepo},
    },
    routes::{configure_body_limits, configure_routes},
    settings::{AppConfig, AppEnvironment},
    AppState,
};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use sqlx::{postgres::PgPoolOptions, PgPool};

fn test_database_url() -> String {
    dotenv::dotenv().ok();
    std::env::var("APP_TEST_DATABASE_URL")
        .expect("APP_TEST_DATABASE_URL must be set for database tests")
}

async fn test_pool() -> PgPool {
    let pool = PgPoolOptions::new()
        .max_connections(60)
        .connect(&test_database_url())
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

fn marker() -> String {
    format!("test-{}", rand::random::<u64>())
}

fn article(category: &str) -> ArticleInsert {
    ArticleInsert {
        title: "Counting under contention".into(),
        excerpt: "Atomic increments".into(),
        content: "Body".into(),
        pdf_path: None,
        author: "Ada".into(),
        read_time: Some("3 min".into()),
        tags: vec!["postgres".into(), category.to_string()],
        featured: false,
        image: None,
        category: Some(category.to_string()),
    }
}

fn project(category: &str, title: &str, featured: bool) -> ProjectInsert {
    ProjectInsert {
        title: title.into(),
        description: "Tool".into(),
        technologies: vec!["Rust".into()],
        github: Some("https://github.com/example/tool".into()),
        demo: None,
        image: None,
        category: Some(category.to_string()),
        featured,
        status: ProjectStatus::InProgress,
    }
}

#[actix_rt::test]
#[ignore]
async fn fifty_concurrent_likes_are_all_counted() {
    let pool = test_pool().await;
    let repo = SqlxArticleRepo::new(pool);
    let created = repo.create_article(&article(&marker())).await.unwrap();
    let id = created.id;

    let tasks: Vec<_> = (0..50)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.increment_article_counter(id, ArticleCounter::Likes).await
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let reloaded = repo.get_article_by_id(id).await.unwrap().unwrap();
    assert_eq!(reloaded.likes, 50);
    assert_eq!(reloaded.views, 0);

    repo.delete_article(id).await.unwrap();
}

#[actix_rt::test]
#[ignore]
async fn article_create_read_delete_round_trip() {
    let pool = test_pool().await;
    let repo = SqlxArticleRepo::new(pool);
    let category = marker();

    let created = repo.create_article(&article(&category)).await.unwrap();
    assert_eq!(created.tags, vec!["postgres".to_string(), category.clone()]);
    assert_eq!(created.views, 0);

    let fetched = repo.get_article_by_id(created.id).await.unwrap();
    assert_eq!(fetched.as_ref(), Some(&created));

    let by_tag = repo.list_articles_filtered(ArticleFilter::Tag(category.clone())).await.unwrap();
    assert_eq!(by_tag.len(), 1);

    let deleted = repo.delete_article(created.id).await.unwrap();
    assert_eq!(deleted.map(|a| a.id), Some(created.id));
    assert!(repo.get_article_by_id(created.id).await.unwrap().is_none());
    assert!(repo.delete_article(created.id).await.unwrap().is_none());
}

#[actix_rt::test]
#[ignore]
async fn update_replaces_pdf_path_with_the_given_value() {
    let pool = test_pool().await;
    let repo = SqlxArticleRepo::new(pool);

    let mut insert = article(&marker());
    insert.pdf_path = Some("/uploads/blogs/first-1-1.pdf".into());
    let created = repo.create_article(&insert).await.unwrap();

    insert.pdf_path = Some("/uploads/blogs/second-2-2.pdf".into());
    insert.title = "Renamed".into();
    let updated = repo.update_article(created.id, &insert).await.unwrap().unwrap();
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.pdf_path.as_deref(), Some("/uploads/blogs/second-2-2.pdf"));
    assert!(updated.updated_at >= created.updated_at);

    insert.pdf_path = None;
    let cleared = repo.update_article(created.id, &insert).await.unwrap().unwrap();
    assert_eq!(cleared.pdf_path, None);

    repo.delete_article(created.id).await.unwrap();
}

#[actix_rt::test]
#[ignore]
async fn full_and_filtered_article_lists_share_one_order() {
    let pool = test_pool().await;
    let repo = SqlxArticleRepo::new(pool);
    let category = marker();

    let older = repo.create_article(&article(&category)).await.unwrap();
    let newer = repo.create_article(&article(&category)).await.unwrap();

    let everything: Vec<i32> = repo
        .list_articles()
        .await
        .unwrap()
        .into_iter()
        .filter(|a| a.category.as_deref() == Some(category.as_str()))
        .map(|a| a.id)
        .collect();
    let filtered: Vec<i32> = repo
        .list_articles_filtered(ArticleFilter::Category(category.clone()))
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.id)
        .collect();

    assert_eq!(everything, vec![newer.id, older.id]);
    assert_eq!(filtered, everything);

    repo.delete_article(older.id).await.unwrap();
    repo.delete_article(newer.id).await.unwrap();
}

#[actix_rt::test]
#[ignore]
async fn update_of_missing_row_writes_nothing() {
    let pool = test_pool().await;
    let repo = SqlxProjectRepo::new(pool);
    let category = marker();

    let result = repo.update_project(i32::MAX, &project(&category, "Ghost", false)).await.unwrap();
    assert!(result.is_none());

    let rows = repo.list_projects_filtered(ProjectFilter::Category(category)).await.unwrap();
    assert!(rows.is_empty());
}

#[actix_rt::test]
#[ignore]
async fn project_filters_keep_newest_first() {
    let pool = test_pool().await;
    let repo = SqlxProjectRepo::new(pool);
    let category = marker();

    let first = repo.create_project(&project(&category, "first", true)).await.unwrap();
    let second = repo.create_project(&project(&category, "second", false)).await.unwrap();
    assert_eq!(first.status, ProjectStatus::InProgress);

    let rows = repo.list_projects_filtered(ProjectFilter::Category(category)).await.unwrap();
    let ids: Vec<i32> = rows.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    repo.delete_project(first.id).await.unwrap();
    repo.delete_project(second.id).await.unwrap();
}

#[actix_rt::test]
#[ignore]
async fn experience_orders_by_index_then_newest() {
    let pool = test_pool().await;
    let repo = SqlxExperienceRepo::new(pool);
    let company = marker();

    let entry = |position: &str, order_index: i32| ExperienceInsert {
        company: company.clone(),
        position: position.into(),
        duration: None,
        description: None,
        order_index,
    };

    let late = repo.create_experience(&entry("late", 5)).await.unwrap();
    let early_old = repo.create_experience(&entry("early-old", 1)).await.unwrap();
    let early_new = repo.create_experience(&entry("early-new", 1)).await.unwrap();

    let ours: Vec<i32> = repo
        .list_experience()
        .await
        .unwrap()
        .into_iter()
        .filter(|e| e.company == company)
        .map(|e| e.id)
        .collect();
    assert_eq!(ours, vec![early_new.id, early_old.id, late.id]);

    for id in [late.id, early_old.id, early_new.id] {
        repo.delete_experience(id).await.unwrap();
    }
}

#[actix_rt::test]
#[ignore]
async fn messages_round_trip() {
    let pool = test_pool().await;
    let repo = SqlxContactMessageRepo::new(pool);
    let name = marker();

    let stored = repo
        .create_message(&ContactMessageInsert {
            name: name.clone(),
            email: "grace@example.com".into(),
            message: "Hello".into(),
        })
        .await
        .unwrap();

    let fetched = repo.get_message_by_id(stored.id).await.unwrap();
    assert_eq!(fetched.as_ref(), Some(&stored));

    let deleted = repo.delete_message(stored.id).await.unwrap();
    assert_eq!(deleted, Some(stored));
}

// ───── Over HTTP ────────────────────────────────────────────────────

fn test_config() -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Portfolio-Content-API-Test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        worker_count: 2,
        database_url: test_database_url(),
        db_max_connections: 20,
        db_acquire_timeout_secs: 5,
        cors_allowed_origins: vec!["http://localhost:5173".to_string()],
        upload_dir: std::env::temp_dir()
            .join(format!("portfolio-uploads-{}", marker()))
            .to_string_lossy()
            .into_owned(),
        max_upload_bytes: 10 * 1024 * 1024,
    }
}

async fn spawn_server(pool: PgPool) -> String {
    let config = test_config();
    let state = web::Data::new(AppState::new(&config, pool));

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let max_upload_bytes = config.max_upload_bytes;
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(ErrorEnvelope::new(false))
            .configure(configure_body_limits(max_upload_bytes))
            .configure(configure_routes)
            .default_service(web::route().to(route_not_found))
    })
    .listen(listener)
    .expect("Failed to start server")
    .workers(config.worker_count)
    .run();

    tokio::spawn(server);
    format!("http://127.0.0.1:{}", port)
}

#[actix_rt::test]
#[ignore]
async fn concurrent_likes_over_http_are_all_counted() {
    let pool = test_pool().await;
    let address = spawn_server(pool.clone()).await;
    let client = Client::new();

    let created: Value = client
        .post(format!("{address}/api/articles"))
        .json(&serde_json::json!({
            "title": "Over the wire",
            "excerpt": "HTTP likes",
            "content": "Body",
            "author": "Ada",
            "category": marker()
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let id = created["data"]["id"].as_i64().unwrap();

    let likes = (0..50).map(|_| {
        client
            .post(format!("{address}/api/articles/{id}/like"))
            .send()
    });
    for response in futures::future::join_all(likes).await {
        assert_eq!(response.unwrap().status(), StatusCode::OK);
    }

    let article: Value = client
        .get(format!("{address}/api/articles/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(article["data"]["likes"], 50);
    assert_eq!(article["data"]["views"], 1);

    let health: Value = client
        .get(format!("{address}/api/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["database"], "OK");

    let response = client
        .delete(format!("{address}/api/articles/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
