//! Environment source: TREEHASH__HASH__VERSION=v1 sets hash.version.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("TREEHASH")
            .prefix_separator("__")
            .separator("__"),
    )
}
