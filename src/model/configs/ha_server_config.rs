use crate::common::*;

#[doc = "Home Assistant 접속 정보"]
#[derive(Debug, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct HaServerConfig {
    pub ha_host: Vec<String>,
    pub ha_token: String,
}
