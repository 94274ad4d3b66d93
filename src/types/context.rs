use std::fmt;

use uuid::Uuid;

use crate::types::user::Identity;

/// Where an operation was initiated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationSource {
    /// Interactive menu session
    Menu,

    /// One-shot CLI subcommand
    Cli,

    /// Automated or test-driven operation
    System,
}

impl fmt::Display for OperationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Menu => f.write_str("menu"),
            Self::Cli => f.write_str("cli"),
            Self::System => f.write_str("system"),
        }
    }
}

/// Context that flows through the service and store layers
///
/// Carries the fields recorded on every log line emitted for an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationContext {
    /// Unique identifier for this operation (for correlating log lines)
    pub request_id: Uuid,

    pub source: OperationSource,

    /// Actor who initiated the operation
    pub actor: String,
}

impl OperationContext {
    /// Context for an operation performed inside a menu session
    ///
    /// Anonymous menu actions (registration, login attempts) pass `None`.
    pub fn for_menu(identity: Option<&Identity>) -> Self {
        let actor = match identity {
            Some(identity) => format!("{}:{}", identity.role, identity.username),
            None => "anonymous".to_string(),
        };
        Self {
            request_id: Uuid::new_v4(),
            source: OperationSource::Menu,
            actor,
        }
    }

    /// Context for a CLI subcommand
    pub fn for_cli(command_name: &str) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            source: OperationSource::Cli,
            actor: format!("cli:{}", command_name),
        }
    }

    /// Context for system operations
    pub fn for_system(operation_name: &str) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            source: OperationSource::System,
            actor: format!("system:{}", operation_name),
        }
    }
}
