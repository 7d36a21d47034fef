// Utils compartidos

pub mod address;
pub mod kakao_ffi;

pub use address::clean_address;
