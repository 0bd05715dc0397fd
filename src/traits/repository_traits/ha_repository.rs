use crate::common::*;

#[async_trait]
pub trait HaRepository: Send + Sync {
    #[doc = "
        Fetch the state history of the given entities over the half-open window [start, end)
        # Arguments
        * `entities` - Entity ids to query
        * `start` - Window start (inclusive)
        * `end` - Window end (exclusive)
    "]
    async fn get_history_period(
        &self,
        entities: &[String],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Value, anyhow::Error>;

    #[doc = "Fetch the current state object of a single entity"]
    async fn get_entity_state(&self, entity_id: &str) -> Result<Value, anyhow::Error>;
}
