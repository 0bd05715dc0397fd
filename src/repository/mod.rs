pub mod ha_repository_impl;
