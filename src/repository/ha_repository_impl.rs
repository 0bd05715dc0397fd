use crate::common::*;

use crate::model::configs::ha_server_config::*;

use crate::traits::repository_traits::ha_repository::*;

#[derive(Debug, Getters, Clone)]
pub struct HaRepositoryImpl {
    ha_clients: Vec<HaClient>,
}

#[derive(Debug, Getters, Clone, new)]
pub(crate) struct HaClient {
    client: Client,
    base_url: String,
    api_token: String,
}

impl HaRepositoryImpl {
    pub fn new(ha_config: &HaServerConfig) -> Result<Self, anyhow::Error> {
        let mut ha_clients: Vec<HaClient> = Vec::new();

        for host in ha_config.ha_host() {
            let base_url: String = if host.starts_with("http://") || host.starts_with("https://") {
                host.trim_end_matches('/').to_string()
            } else {
                format!("http://{}", host.trim_end_matches('/'))
            };

            let client: Client = Client::builder().timeout(Duration::new(5, 0)).build()?;

            ha_clients.push(HaClient::new(
                client,
                base_url,
                ha_config.ha_token().clone(),
            ));
        }

        Ok(HaRepositoryImpl { ha_clients })
    }

    #[doc = "Common logic: common node failure handling and node selection"]
    async fn execute_on_any_node<F, Fut>(&self, operation: F) -> Result<Response, anyhow::Error>
    where
        F: Fn(HaClient) -> Fut + Send + Sync,
        Fut: Future<Output = Result<Response, anyhow::Error>> + Send,
    {
        let mut last_error: Option<anyhow::Error> = None;

        let mut rng: StdRng = StdRng::from_entropy();
        let mut shuffled_clients = self.ha_clients.clone();
        shuffled_clients.shuffle(&mut rng);

        for ha_client in shuffled_clients {
            match operation(ha_client).await {
                Ok(response) => return Ok(response),
                Err(err) => {
                    last_error = Some(err);
                }
            }
        }

        Err(anyhow::anyhow!(
            "All Home Assistant hosts failed. Last error: {:?}",
            last_error
        ))
    }

    #[doc = "응답이 성공 코드인지 확인하고 본문을 JSON으로 파싱해주는 함수"]
    async fn parse_success_body(&self, response: Response, context: &str) -> Result<Value, anyhow::Error> {
        if response.status().is_success() {
            let response_body: Value = response.json::<Value>().await?;
            Ok(response_body)
        } else {
            Err(anyhow!(
                "[HaRepositoryImpl->{}] Home Assistant returned status {}",
                context,
                response.status()
            ))
        }
    }
}

#[async_trait]
impl HaRepository for HaRepositoryImpl {
    #[doc = "Function that EXECUTES the history period query against the REST API"]
    async fn get_history_period(
        &self,
        entities: &[String],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Value, anyhow::Error> {
        let start_str: String = start.to_rfc3339();
        let end_str: String = end.to_rfc3339();
        let entity_filter: String = entities.join(",");

        let response = self
            .execute_on_any_node(|ha_client| {
                let url: String = format!(
                    "{}/api/history/period/{}?filter_entity_id={}&end_time={}",
                    ha_client.base_url,
                    encode(&start_str),
                    encode(&entity_filter),
                    encode(&end_str)
                );

                async move {
                    let response: Response = ha_client
                        .client
                        .get(&url)
                        .bearer_auth(&ha_client.api_token)
                        .send()
                        .await?;

                    Ok(response)
                }
            })
            .await?;

        self.parse_success_body(response, "get_history_period").await
    }

    #[doc = "Function that EXECUTES the current state query for one entity"]
    async fn get_entity_state(&self, entity_id: &str) -> Result<Value, anyhow::Error> {
        let response = self
            .execute_on_any_node(|ha_client| {
                let url: String = format!(
                    "{}/api/states/{}",
                    ha_client.base_url,
                    encode(entity_id)
                );

                async move {
                    let response: Response = ha_client
                        .client
                        .get(&url)
                        .bearer_auth(&ha_client.api_token)
                        .send()
                        .await?;

                    Ok(response)
                }
            })
            .await?;

        self.parse_success_body(response, "get_entity_state").await
    }
}
