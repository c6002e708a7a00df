use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Trait para os tipos de identificador dos agregados
pub trait AggregateId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    /// Converter o ID em string
    fn as_string(&self) -> String;

    /// Criar o ID a partir de uma string
    fn from_string(s: &str) -> Result<Self, String>;
}

impl AggregateId for uuid::Uuid {
    fn as_string(&self) -> String {
        ToString::to_string(self)
    }

    fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s).map_err(|e| format!("Invalid UUID: {}", e))
    }
}
