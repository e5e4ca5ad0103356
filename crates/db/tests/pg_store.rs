//! Postgres-backed store tests. They need `DATABASE_URL` pointing at a
//! server where `sqlx::test` may create scratch databases:
//!
//! `cargo test -p folio-db --test pg_store -- --ignored`

use std::sync::Arc;

use folio_core::collection::Collection;
use folio_db::{to_fields, DocumentStore, PgDocumentStore};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn concurrent_first_sets_of_one_id_all_succeed(pool: PgPool) {
    let store = Arc::new(PgDocumentStore::new(pool));

    let writers = (0..8).map(|n| {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            let fields = to_fields(&json!({ "writer": n, "shared": true })).unwrap();
            store
                .set_document(Collection::Settings, "layout", fields, true)
                .await
        })
    });
    let writers: Vec<_> = writers.collect();
    for writer in writers {
        writer.await.unwrap().unwrap();
    }

    let docs = store.get_documents(Collection::Settings, &[]).await.unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, "layout");
    assert_eq!(docs[0].fields["shared"], true);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn set_merges_into_an_existing_document(pool: PgPool) {
    let store = PgDocumentStore::new(pool);
    let first = to_fields(&json!({ "a": 1, "nested": { "x": 1 } })).unwrap();
    store
        .set_document(Collection::Settings, "layout", first, false)
        .await
        .unwrap();

    let second = to_fields(&json!({ "nested": { "y": 2 } })).unwrap();
    let doc = store
        .set_document(Collection::Settings, "layout", second, true)
        .await
        .unwrap();
    assert_eq!(doc.fields["a"], 1);
    assert_eq!(doc.fields["nested"], json!({ "x": 1, "y": 2 }));
}
