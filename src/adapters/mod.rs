//! Adapters implementing the persistence port.
//!
//! [`JsonRepository`] writes the portable textual format and is what the
//! agents' `save`/`load` use by default. [`MsgPackRepository`] stores the same
//! documents in compact binary form; [`InMemoryRepository`] keeps them in
//! process memory.

pub mod in_memory_repository;
pub mod json_repository;
pub mod msgpack_repository;

pub use in_memory_repository::InMemoryRepository;
pub use json_repository::JsonRepository;
pub use msgpack_repository::MsgPackRepository;
