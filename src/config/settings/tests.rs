use super::*;
use tempfile::TempDir;

#[test]
fn default_config() {
    let config = Config::default();
    assert_eq!(config.embedding.provider, EmbeddingProvider::Ollama);
    assert_eq!(config.embedding.hashing_dimension, DEFAULT_HASHING_DIMENSION);
    assert_eq!(config.ollama.protocol, "http");
    assert_eq!(config.ollama.host, "localhost");
    assert_eq!(config.ollama.port, 11434);
    assert_eq!(config.ollama.model, "bge-m3:latest");
    assert_eq!(config.ollama.batch_size, 16);
    assert_eq!(config.recommender.retrieval_k, 20);
    assert_eq!(config.recommender.filter_limit, 10);
    assert_eq!(config.recommender.max_recommendations, 5);
    assert_eq!(
        config.data.csv_path,
        PathBuf::from("datas/merged_data.csv")
    );
    assert_eq!(config.geocoder.user_agent, "suwon-map-app");
}

#[test]
fn config_validation() {
    let config = Config::default();
    assert!(config.validate().is_ok());

    let mut invalid_config = config.clone();
    invalid_config.ollama.protocol = "ftp".to_string();
    assert!(invalid_config.validate().is_err());

    let mut invalid_config = config.clone();
    invalid_config.ollama.port = 0;
    assert!(invalid_config.validate().is_err());

    let mut invalid_config = config.clone();
    invalid_config.ollama.model = String::new();
    assert!(invalid_config.validate().is_err());

    let mut invalid_config = config.clone();
    invalid_config.ollama.batch_size = 1001;
    assert!(invalid_config.validate().is_err());

    let mut invalid_config = config.clone();
    invalid_config.embedding.hashing_dimension = 32;
    assert!(matches!(
        invalid_config.validate(),
        Err(ConfigError::InvalidHashingDimension(32))
    ));

    let mut invalid_config = config.clone();
    invalid_config.recommender.retrieval_k = 0;
    assert!(matches!(
        invalid_config.validate(),
        Err(ConfigError::InvalidRetrievalK(0))
    ));

    let mut invalid_config = config.clone();
    invalid_config.recommender.filter_limit = 0;
    assert!(invalid_config.validate().is_err());

    let mut invalid_config = config.clone();
    invalid_config.recommender.max_recommendations = 0;
    assert!(invalid_config.validate().is_err());

    let mut invalid_config = config.clone();
    invalid_config.data.csv_path = PathBuf::new();
    assert!(matches!(
        invalid_config.validate(),
        Err(ConfigError::InvalidDataPath)
    ));

    let mut invalid_config = config.clone();
    invalid_config.geocoder.timeout_seconds = 0;
    assert!(invalid_config.validate().is_err());

    let mut invalid_config = config;
    invalid_config.geocoder.base_url = "not a url".to_string();
    assert!(invalid_config.validate().is_err());
}

#[test]
fn ollama_url_generation() {
    let config = Config::default();
    let url = config
        .ollama_url()
        .expect("should generate ollama_url successfully");
    assert_eq!(url.as_str(), "http://localhost:11434/");
}

#[test]
fn toml_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string(&config).expect("should serialize toml correctly");
    let parsed_config: Config = toml::from_str(&toml_str).expect("should parse toml correctly");
    assert_eq!(config, parsed_config);
}

#[test]
fn provider_is_lowercase_in_toml() {
    let config: Config = toml::from_str(
        r#"
            [embedding]
            provider = "hashing"
        "#,
    )
    .expect("should parse toml correctly");
    assert_eq!(config.embedding.provider, EmbeddingProvider::Hashing);
    assert_eq!(EmbeddingProvider::Hashing.as_str(), "hashing");

    let result: Result<Config, toml::de::Error> = toml::from_str(
        r#"
            [embedding]
            provider = "openai"
        "#,
    );
    assert!(result.is_err());
}

#[test]
fn setter_validation() {
    let mut config = OllamaConfig {
        model: "test-model".to_string(),
        batch_size: 32,
        ..OllamaConfig::default()
    };

    assert!(config.set_protocol("https".to_string()).is_ok());
    assert!(config.set_host("example.com".to_string()).is_ok());
    assert!(config.set_port(8080).is_ok());
    assert!(config.set_model("new-model".to_string()).is_ok());
    assert!(config.set_batch_size(128).is_ok());

    assert!(config.set_protocol("ftp".to_string()).is_err());
    assert!(config.set_port(0).is_err());
    assert!(config.set_model(String::new()).is_err());
    assert!(config.set_batch_size(0).is_err());
    assert!(config.set_batch_size(1001).is_err());

    let mut geocoder = GeocoderConfig::default();
    assert!(geocoder.set_base_url("http://127.0.0.1:8080".to_string()).is_ok());
    assert!(geocoder.set_base_url("nominatim".to_string()).is_err());
    assert_eq!(geocoder.base_url, "http://127.0.0.1:8080");
}

#[test]
fn load_missing_config() {
    let temp_dir = TempDir::new().expect("should create temp dir");

    let config = Config::load_from(temp_dir.path()).expect("missing config falls back to defaults");

    assert_eq!(config.base_dir, temp_dir.path());
    assert_eq!(config.ollama, OllamaConfig::default());
    assert_eq!(config.recommender, RecommenderConfig::default());
}

#[test]
fn save_and_load_round_trip() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let mut config = Config {
        base_dir: temp_dir.path().join("nested"),
        ..Config::default()
    };
    config.embedding.provider = EmbeddingProvider::Hashing;
    config.data.csv_path = PathBuf::from("/srv/restaurants.csv");

    config.save().expect("should save config");
    assert!(config.config_file_path().exists());

    let loaded = Config::load_from(temp_dir.path().join("nested")).expect("should load config");
    assert_eq!(loaded, config);
}

#[test]
fn load_rejects_invalid_values() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    fs::write(
        temp_dir.path().join("config.toml"),
        "[recommender]\nretrieval_k = 0\n",
    )
    .expect("should write config");

    assert!(Config::load_from(temp_dir.path()).is_err());
}

#[test]
fn https_url_generation() {
    let mut config = Config::default();
    config.ollama.protocol = "https".to_string();
    config.ollama.host = "secure.example.com".to_string();
    config.ollama.port = 443;

    let url = config
        .ollama_url()
        .expect("should generate https url successfully");
    assert_eq!(url.as_str(), "https://secure.example.com/");
}

#[test]
fn protocol_validation() {
    let mut config = OllamaConfig::default();

    assert!(config.set_protocol("http".to_string()).is_ok());
    assert!(config.set_protocol("https".to_string()).is_ok());

    assert!(config.set_protocol("ftp".to_string()).is_err());
    assert!(config.set_protocol("ws".to_string()).is_err());
    assert!(config.set_protocol(String::new()).is_err());
    assert!(config.set_protocol("HTTP".to_string()).is_err()); // case sensitive
}
