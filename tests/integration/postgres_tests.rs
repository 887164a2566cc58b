//! PostgreSQL integration tests
//!
//! Need a database: `DATABASE_URL=postgres://... cargo test -- --ignored`

use std::io::Write;

use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;

use openlib_loader::{
    config::{DataDumpConfig, LoaderConfig},
    models::{book::UNKNOWN_AUTHOR, Author},
    repository::{AuthorStore, Repository},
    services::InitialLoad,
};

async fn repository() -> Repository {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    Repository::new(pool)
}

fn dump(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

#[tokio::test]
#[ignore]
async fn test_author_upsert_and_find() {
    let repository = repository().await;
    let authors = &repository.authors;

    let mut author = Author {
        id: "OLTEST1A".to_string(),
        name: "Before".to_string(),
        personal_name: String::new(),
    };
    authors.save(&author).await.unwrap();

    author.name = "After".to_string();
    authors.save(&author).await.unwrap();

    let found = authors.find_by_id("OLTEST1A").await.unwrap().unwrap();
    assert_eq!(found, author);
    assert!(authors.find_by_id("OLTEST404A").await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn test_initial_load_into_postgres() {
    let repository = repository().await;

    let author_dump = dump(&[
        "/type/author\t/authors/OLTEST2A\t1\t2008-04-01T03:28:50.625462\t{\"name\": \"Tove Jansson\", \"key\": \"/authors/OLTEST2A\"}",
    ]);
    let works_dump = dump(&[
        "/type/work\t/works/OLTEST2W\t1\t2009-12-11T01:57:19.964652\t{\"title\": \"Moominvalley in November\", \"key\": \"/works/OLTEST2W\", \"covers\": [12345], \"created\": {\"value\": \"2008-01-01T00:00:00.000000\"}, \"authors\": [{\"author\": {\"key\": \"/authors/OLTEST2A\"}}, {\"author\": {\"key\": \"/authors/OLTEST404A\"}}]}",
        "/type/work\t/works/OLTEST3W\t1\t2009-12-11T01:57:19.964652\t{\"title\": \"Authorless\", \"key\": \"/works/OLTEST3W\"}",
    ]);
    let dumps = DataDumpConfig {
        author: author_dump.path().to_path_buf(),
        works: works_dump.path().to_path_buf(),
    };

    for _ in 0..2 {
        InitialLoad::new(
            repository.author_store(),
            repository.book_store(),
            dumps.clone(),
            &LoaderConfig::default(),
        )
        .run()
        .await
        .unwrap();
    }

    let book = repository.books.get_by_id("OLTEST2W").await.unwrap().unwrap();
    assert_eq!(book.name, "Moominvalley in November");
    assert_eq!(book.published_date, NaiveDate::from_ymd_opt(2008, 1, 1));
    assert_eq!(book.cover_ids, vec!["12345"]);
    assert_eq!(book.author_ids, vec!["OLTEST2A", "OLTEST404A"]);
    assert_eq!(book.author_names, vec!["Tove Jansson", UNKNOWN_AUTHOR]);

    assert!(repository.books.get_by_id("OLTEST3W").await.unwrap().is_none());
}
