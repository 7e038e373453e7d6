use camino::Utf8Path;
use config::{Config, ConfigBuilder, ConfigError, FileFormat, builder::DefaultState};

pub use huebind_api::config::*;

fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("bridge.name", "Hue bridge")?
        .set_default("bridge.state_file", "bridge-state.yaml")?
        .set_default("defaults.mirek_min", 153)?
        .set_default("defaults.mirek_max", 500)
}

pub fn parse(filename: &Utf8Path) -> Result<AppConfig, ConfigError> {
    let settings = builder()?
        .add_source(config::File::with_name(filename.as_str()))
        .build()?;

    settings.try_deserialize()
}

pub fn parse_str(yaml: &str) -> Result<AppConfig, ConfigError> {
    let settings = builder()?
        .add_source(config::File::from_str(yaml, FileFormat::Yaml))
        .build()?;

    settings.try_deserialize()
}
