//! Resource declarations, one module per managed service family.
//!
//! Each function returns a single [`Resource`](crate::template::Resource);
//! wiring between resources is done by logical id in `topology`.

pub mod compute;
pub mod dns;
pub mod messaging;
pub mod storage;
