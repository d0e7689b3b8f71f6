// Internal types - shared between services and stores, never serialized to API
pub mod audit;
pub mod principal;

pub use principal::Principal;
