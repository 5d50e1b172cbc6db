use crate::{error::AppResult, models::RatingRecord};

use super::RatingSource;

/// Source serving a fixed in-memory corpus, for synthetic data and tests
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<RatingRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<RatingRecord>) -> Self {
        Self { records }
    }
}

#[async_trait::async_trait]
impl RatingSource for StaticSource {
    async fn load(&self) -> AppResult<Vec<RatingRecord>> {
        Ok(self.records.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
