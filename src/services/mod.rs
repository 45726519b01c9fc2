pub mod delivery;
pub mod i_notify;
pub mod i_registry;
pub mod notify;
pub mod registry;
