//! Audited mutation contract of the Diesel adapters against PostgreSQL.
//!
//! Set `INVENTORY_TEST_DATABASE_URL` to a disposable database to run these
//! tests; they truncate every inventory table. Without it they are skipped.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use diesel_async::RunQueryDsl;
use rstest::rstest;

use inventory_backend::domain::ports::{
    HistoryRepository, InventoryRepository, UserPersistenceError, UserRepository,
};
use inventory_backend::domain::{
    AuditStamp, DefaultDataSeeder, HistoryAction, InventoryItem, ItemDraft, ItemId, PasswordHash,
    Role, User, UserId, UserProfile,
};
use inventory_backend::outbound::persistence::{
    DbPool, DieselHistoryRepository, DieselInventoryRepository, DieselSeedRepository,
    DieselUserRepository, PoolConfig, run_pending_migrations,
};
use inventory_backend::outbound::security::BcryptPasswordHasher;

const DATABASE_URL_VAR: &str = "INVENTORY_TEST_DATABASE_URL";

async fn fresh_pool() -> Option<DbPool> {
    let Ok(url) = std::env::var(DATABASE_URL_VAR) else {
        eprintln!("skipping: {DATABASE_URL_VAR} is not set");
        return None;
    };
    run_pending_migrations(&url).await.expect("migrations apply");
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(2))
        .await
        .expect("pool builds");
    let mut conn = pool.get().await.expect("connection");
    diesel::sql_query("TRUNCATE users, inventory_items, history_entries")
        .execute(&mut conn)
        .await
        .expect("tables truncate");
    drop(conn);
    Some(pool)
}

fn stamp(minute: u32) -> AuditStamp {
    AuditStamp::at(
        Utc.with_ymd_and_hms(2026, 6, 1, 8, minute, 0)
            .single()
            .expect("valid timestamp"),
    )
}

fn item(id: ItemId, quantity: u32) -> InventoryItem {
    InventoryItem::new(
        id,
        ItemDraft::new("Needle Pack", "Accessories", quantity, 120.0).expect("valid draft"),
    )
}

fn user(email: &str, user_name: &str) -> User {
    User::new(
        UserProfile {
            id: UserId::random(),
            full_name: "Test User".to_owned(),
            email: email.to_owned(),
            user_name: user_name.to_owned(),
            role: Role::Employee,
        },
        PasswordHash::new("$2b$04$abcdefghijklmnopqrstuu"),
    )
}

// One sequential scenario: the tables are shared, so parallel tests would race.
#[rstest]
#[tokio::test]
async fn diesel_adapters_honour_audit_contract() {
    let Some(pool) = fresh_pool().await else {
        return;
    };
    let items = DieselInventoryRepository::new(pool.clone());
    let history = DieselHistoryRepository::new(pool.clone());
    let users = DieselUserRepository::new(pool.clone());

    let id = ItemId::random();
    let added = items.create(&item(id, 10), stamp(0)).await.expect("create");
    assert_eq!(added.action(), HistoryAction::Added);

    let updated = items
        .update(&item(id, 7), stamp(1))
        .await
        .expect("update")
        .expect("item exists");
    assert_eq!(updated.product().quantity(), 7);

    // Same timestamp as the update: insertion order breaks the tie.
    let deleted = items
        .delete(&id, stamp(1))
        .await
        .expect("delete")
        .expect("item exists");
    assert_eq!(deleted.product().quantity(), 7);

    assert!(items.update(&item(id, 1), stamp(2)).await.expect("update").is_none());
    assert!(items.delete(&id, stamp(2)).await.expect("delete").is_none());
    assert!(items.list_items().await.expect("list").is_empty());

    let actions: Vec<HistoryAction> = history
        .list_entries()
        .await
        .expect("history")
        .iter()
        .map(|entry| entry.action())
        .collect();
    assert_eq!(
        actions,
        [HistoryAction::Deleted, HistoryAction::Updated, HistoryAction::Added]
    );

    let ann = user("ann@test.com", "ann");
    users.insert(&ann).await.expect("insert");
    assert!(users.exists_with("ann@test.com", "other").await.expect("exists"));
    assert_eq!(
        users.insert(&user("ann@test.com", "ann2")).await,
        Err(UserPersistenceError::duplicate("email"))
    );
    assert_eq!(
        users.insert(&user("ann2@test.com", "ann")).await,
        Err(UserPersistenceError::duplicate("userName"))
    );
    let found = users
        .find_by_email("ann@test.com")
        .await
        .expect("lookup")
        .expect("stored user");
    assert_eq!(found.profile(), ann.profile());

    let seeder = DefaultDataSeeder::new(
        Arc::new(DieselSeedRepository::new(pool.clone())),
        Arc::new(BcryptPasswordHasher::new(4)),
    );
    let outcome = seeder.seed().await.expect("seed");
    assert!(!outcome.users_seeded, "users table already has rows");
    assert!(outcome.items_seeded);
    assert_eq!(items.list_items().await.expect("list").len(), 3);
    assert_eq!(history.list_entries().await.expect("history").len(), 3);
}
