use crate::common::*;

use crate::dto::entity_history::*;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait QueryService: Send + Sync {
    #[doc = "
        Retrieve the sample history and display names of the given entities
        over the half-open window [start, end). Entities without samples are
        omitted from the result.
    "]
    async fn get_entity_history(
        &self,
        entities: &[String],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<EntityHistory>;
}
