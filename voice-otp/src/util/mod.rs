//! Small helpers shared across modules.

pub mod phone;

pub use phone::mask_phone_number;
