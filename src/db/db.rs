use sqlx::{Pool, Postgres};

#[derive(Clone)]
pub struct DBClient {
    pub pool: Pool<Postgres>,
}

impl std::fmt::Debug for DBClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DBClient")
            .field("pool", &"Pool<Postgres>")
            .finish()
    }
}

impl DBClient {
    pub fn new(pool: Pool<Postgres>) -> Self {
        DBClient { pool }
    }
}

/// True when the store rejected a statement because a relation or column is
/// not (yet) part of the visible schema: undefined_table (42P01) or
/// undefined_column (42703). Callers recover from these by falling back to
/// an older query shape; every other error propagates.
pub fn is_schema_missing(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            matches!(db_err.code().as_deref(), Some("42P01") | Some("42703"))
        }
        _ => false,
    }
}
