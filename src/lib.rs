pub mod dto;
pub mod error;
pub mod response;
pub mod util;
