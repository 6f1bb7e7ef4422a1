//! Favourite records and where they come from

use super::ExportError;
use async_trait::async_trait;
use chrono::{Local, NaiveDate};

/// One row of the favourites sheet
#[derive(Debug, Clone, PartialEq)]
pub struct FavouriteRecord {
    pub name: String,
    pub rating: f64,
    pub date: NaiveDate,
}

impl FavouriteRecord {
    pub fn new(name: impl Into<String>, rating: f64, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            rating,
            date,
        }
    }
}

/// Supplies the records to export
#[async_trait]
pub trait FavouritesSource: Send + Sync {
    async fn favourites(&self) -> Result<Vec<FavouriteRecord>, ExportError>;
}

/// Single placeholder favourite dated today
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoFavourites;

#[async_trait]
impl FavouritesSource for DemoFavourites {
    async fn favourites(&self) -> Result<Vec<FavouriteRecord>, ExportError> {
        Ok(vec![FavouriteRecord::new(
            "Delilah Miami",
            4.6,
            Local::now().date_naive(),
        )])
    }
}

/// A fixed list of favourites
#[derive(Debug, Clone, Default)]
pub struct StaticFavourites {
    records: Vec<FavouriteRecord>,
}

impl StaticFavourites {
    pub fn new(records: Vec<FavouriteRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl FavouritesSource for StaticFavourites {
    async fn favourites(&self) -> Result<Vec<FavouriteRecord>, ExportError> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_favourites() {
        let before = Local::now().date_naive();
        let records = DemoFavourites.favourites().await.unwrap();
        let after = Local::now().date_naive();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Delilah Miami");
        assert_eq!(records[0].rating, 4.6);
        assert!(records[0].date == before || records[0].date == after);
    }
}
