use std::error::Error;
use std::str::FromStr;

use heapless::String as HeaplessString;
use sqlx::postgres::PgRow;
use sqlx::Row;

/// A trait for converting a database row into a model.
pub trait TryFromRow<R>: Sized {
    /// Performs the conversion.
    fn try_from_row(row: &R) -> Result<Self, Box<dyn Error + Send + Sync>>;
}

/// Extension methods for decoding bounded text columns off a postgres
/// row. The bound is enforced on read: a column value longer than the
/// model's capacity is a decoding error, not a silent truncation.
pub trait PgRowExt {
    fn bounded_text<const N: usize>(
        &self,
        col: &str,
    ) -> Result<HeaplessString<N>, Box<dyn Error + Send + Sync>>;

    fn bounded_text_opt<const N: usize>(
        &self,
        col: &str,
    ) -> Result<Option<HeaplessString<N>>, Box<dyn Error + Send + Sync>>;
}

impl PgRowExt for PgRow {
    fn bounded_text<const N: usize>(
        &self,
        col: &str,
    ) -> Result<HeaplessString<N>, Box<dyn Error + Send + Sync>> {
        let value: String = self.try_get(col)?;
        HeaplessString::from_str(&value)
            .map_err(|_| format!("value in column '{col}' exceeds {N} chars").into())
    }

    fn bounded_text_opt<const N: usize>(
        &self,
        col: &str,
    ) -> Result<Option<HeaplessString<N>>, Box<dyn Error + Send + Sync>> {
        let value: Option<String> = self.try_get(col)?;
        value
            .map(|v| HeaplessString::from_str(&v))
            .transpose()
            .map_err(|_| format!("value in column '{col}' exceeds {N} chars").into())
    }
}
