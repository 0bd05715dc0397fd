use crate::common::*;

#[doc = "차트 이미지 출력 디렉토리 정보. share_dir가 없으면 www_dir로 대체된다."]
#[derive(Debug, Clone, Deserialize, Getters, new)]
#[getset(get = "pub")]
pub struct OutputConfig {
    pub share_dir: String,
    pub www_dir: String,
}
