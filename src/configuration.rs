use config::Config;

#[derive(Debug, serde::Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
}

impl Settings {
    // later files override earlier ones, env vars override both
    pub fn try_load(paths: &[impl AsRef<str>]) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder();
        for path in paths {
            builder = builder.add_source(config::File::with_name(path.as_ref()));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("APP"))
            .build()?;

        settings.try_deserialize::<Self>()
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(Debug, serde::Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, serde::Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
}
