mod classification;
pub(crate) mod common;
