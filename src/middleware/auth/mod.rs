pub mod access;
pub mod role;

pub use access::restricted;
pub use role::only;
