pub mod cli;
pub mod config;
pub mod error;
pub mod manager;
pub mod parser;
pub mod setup;

pub type Map<K, V> = hashbrown::HashMap<K, V>;
pub type Set<T> = hashbrown::HashSet<T>;
