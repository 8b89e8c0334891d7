#[derive(Debug, serde::Serialize, sqlx::FromRow)]
pub struct Actor {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub gender: String,
}
