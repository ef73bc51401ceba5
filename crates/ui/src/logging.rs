//! `tracing` output for the browser console

use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_wasm::WASMLayerConfigBuilder;

/// Most verbose level to emit, or `None` when logging is off
pub fn max_level(filter: LevelFilter) -> Option<Level> {
    filter.into_level()
}

/// Install `tracing-wasm` as the global subscriber
pub fn init(filter: LevelFilter) {
    let Some(level) = max_level(filter) else {
        return;
    };
    let config = WASMLayerConfigBuilder::new().set_max_level(level).build();
    tracing_wasm::set_as_global_default_with_config(config);
}
