//! Domain primitives and ports.
//!
//! Purpose: define the liqueur record, its value types, the transport
//! agnostic error payload and the repository port that persistence adapters
//! implement. Nothing in here knows about HTTP or SQL.
//!
//! Public surface:
//! - `Error`, `ErrorCode`: error payload shared by every adapter.
//! - `Liqueur`, `NewLiqueur`, `LiqueurPatch` and their value types.
//! - `UpdateOutcome`, `DeleteOutcome`: write acknowledgements.
//! - `TraceId`: request correlation identifier.

pub mod error;
pub mod liqueur;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::liqueur::{
    DegreeOfAlcohol, DeleteOutcome, Liqueur, LiqueurId, LiqueurName, LiqueurPatch,
    LiqueurValidationError, ManufacturingDate, NewLiqueur, UpdateOutcome,
};
pub use self::trace_id::TraceId;
