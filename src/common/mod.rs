pub(crate) mod data;
pub mod util;
