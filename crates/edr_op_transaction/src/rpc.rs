/// Tri-state JSON fields.
pub mod field;
/// JSON-RPC transaction form and conversions.
pub mod transaction;

pub use self::{
    field::JsonField,
    transaction::{ConversionError, CopyInto, RpcTransaction},
};
