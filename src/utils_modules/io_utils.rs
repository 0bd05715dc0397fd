use crate::common::*;

use crate::model::configs::output_config::*;

#[doc = r#"
    TOML 형식의 설정 파일을 읽어와서 지정된 구조체 타입으로 역직렬화하는 제네릭 함수.

    애플리케이션의 다양한 설정 파일들(서버 설정, 차트 목록 등)을 TOML 형식으로
    관리하며, 이 함수를 통해 타입 안전하게 구조체로 변환한다.

    1. 지정된 경로의 TOML 파일을 문자열로 읽어온다
    2. `toml::from_str()`을 사용하여 TOML 문자열을 제네릭 타입 T로 파싱
    3. serde의 역직렬화 기능을 활용하여 구조체로 변환

    # Type Parameters
    * `T` - `DeserializeOwned` 트레이트를 구현한 구조체 타입

    # Arguments
    * `file_path` - 읽을 대상 toml 파일이 존재하는 경로

    # Returns
    * `Result<T, anyhow::Error>` - 성공 시 역직렬화된 구조체, 실패 시 오류
"#]
pub fn read_toml_from_file<T: DeserializeOwned>(file_path: &str) -> Result<T, anyhow::Error> {
    let toml_content = std::fs::read_to_string(file_path)?;
    let toml: T = toml::from_str(&toml_content)?;

    Ok(toml)
}

#[doc = r#"
    렌더링된 차트 이미지가 저장될 최종 경로를 결정해주는 함수.

    기본 공유 디렉토리가 존재하면 그 아래에, 존재하지 않으면 웹 서버용 대체
    디렉토리 아래에 파일을 배치한다. 존재 여부만 확인하는 best-effort 정책이며,
    실제 쓰기 가능 여부는 파일 저장 시점에 판별된다.

    # Arguments
    * `output_config` - 기본/대체 출력 디렉토리 설정
    * `filename` - 저장할 이미지 파일명

    # Returns
    * `PathBuf` - 결정된 출력 파일 경로
"#]
pub fn resolve_output_path(output_config: &OutputConfig, filename: &str) -> PathBuf {
    let share_dir: &Path = Path::new(output_config.share_dir());

    if share_dir.exists() {
        share_dir.join(filename)
    } else {
        Path::new(output_config.www_dir()).join(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_output_path_prefers_share_dir() {
        let share = tempfile::tempdir().unwrap();
        let www = tempfile::tempdir().unwrap();

        let output_config = OutputConfig::new(
            share.path().to_string_lossy().to_string(),
            www.path().to_string_lossy().to_string(),
        );

        let resolved = resolve_output_path(&output_config, "x.png");
        assert_eq!(resolved, share.path().join("x.png"));
    }

    #[test]
    fn resolve_output_path_falls_back_when_share_dir_missing() {
        let www = tempfile::tempdir().unwrap();
        let missing = www.path().join("no_such_dir");

        let output_config = OutputConfig::new(
            missing.to_string_lossy().to_string(),
            www.path().to_string_lossy().to_string(),
        );

        let resolved = resolve_output_path(&output_config, "x.png");
        assert_eq!(resolved, www.path().join("x.png"));
    }

    #[test]
    fn read_toml_from_file_deserializes_struct() {
        use std::io::Write;

        #[derive(Deserialize)]
        struct Sample {
            name: String,
            count: usize,
        }

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "name = \"abc\"\ncount = 3\n").unwrap();

        let sample: Sample =
            read_toml_from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(sample.name, "abc");
        assert_eq!(sample.count, 3);
    }
}
