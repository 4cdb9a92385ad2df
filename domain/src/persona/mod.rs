//! Persona subdomain: the static philosopher catalog.

pub mod catalog;

pub use catalog::{Persona, PersonaCatalog};
