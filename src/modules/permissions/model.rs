//! Engine request/response DTOs.
//!
//! The types live in `hrdesk-models` so the HTTP store and the CLI can share
//! them; this module re-exports what the permission endpoints use.

pub use hrdesk_core::permissions::{ActionRow, CellState, MatrixCell, ModuleMatrix};
pub use hrdesk_models::permissions::{
    ActionSummary, CheckPermissionDto, CheckPermissionResponse, DiffPermissionsDto,
    DiffPermissionsResponse, MatrixDto, ModuleSummary, SaveResponse, TogglePermissionDto,
    TogglePermissionResponse,
};
