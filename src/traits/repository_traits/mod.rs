pub mod ha_repository;
