use hs_core::{Profile, Role};
use hs_db::create_memory_pool;
use sqlx::SqlitePool;

/// In-memory pool with foreign keys on and the schema applied
pub async fn create_test_pool() -> SqlitePool {
    create_memory_pool()
        .await
        .expect("Failed to create test pool")
}

/// Insert a profile row so foreign keys from the other tables resolve
pub async fn create_test_profile(pool: &SqlitePool, id: &str, role: Role) -> Profile {
    let profile = Profile::new(
        id.to_string(),
        format!("{}@example.com", id),
        format!("Test {}", id),
        role,
    );

    sqlx::query(
        "INSERT INTO profiles (id, email, full_name, role, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&profile.id)
    .bind(&profile.email)
    .bind(&profile.full_name)
    .bind(role.as_str())
    .bind(profile.created_at.timestamp())
    .execute(pool)
    .await
    .expect("Failed to create test profile");

    profile
}

/// Insert a profile row with an arbitrary (possibly NULL) role column
pub async fn create_raw_profile(pool: &SqlitePool, id: &str, role: Option<&str>) {
    sqlx::query(
        "INSERT INTO profiles (id, email, full_name, role, created_at) VALUES (?, ?, ?, ?, 0)",
    )
    .bind(id)
    .bind(format!("{}@example.com", id))
    .bind("Half Finished")
    .bind(role)
    .execute(pool)
    .await
    .expect("Failed to create raw profile");
}
