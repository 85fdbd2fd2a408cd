use sqlx::FromRow;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: u64,                      // assigned by AUTO_INCREMENT
    pub name: String,                 // display name, up to 100 chars
    pub email: String,                // unique login key, up to 120 chars
    #[sqlx(rename = "password")]
    pub password_hash: String,        // Argon2 PHC string, never plaintext
}

/// Fields needed to insert a user; the id comes from the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
