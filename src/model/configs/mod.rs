pub mod ha_server_config;
pub mod output_config;
pub mod system_config;
pub mod total_config;
