//! Application services, ports, and visibility evaluation.

#![forbid(unsafe_code)]

mod definition_ports;
mod fieldkit_service;
pub mod render;
mod registry;
pub mod visibility;

pub use definition_ports::{
    DefinitionRepository, SaveFieldInput, SaveFormInput, UpdateFieldInput, UpdateFormInput,
};
pub use fieldkit_service::FieldKitService;
pub use registry::{InputTypeEntry, InputTypeRegistry};
