//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_definition_repository;

pub use in_memory_definition_repository::InMemoryDefinitionRepository;
