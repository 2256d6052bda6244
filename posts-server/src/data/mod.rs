pub mod in_memory_post_repository;
pub mod post_repository;
