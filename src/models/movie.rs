use chrono::NaiveDate;

#[derive(Debug, serde::Serialize, sqlx::FromRow)]
pub struct Movie {
    pub id: i64,
    pub title: String,
    pub release_date: NaiveDate,
}
