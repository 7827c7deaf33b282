// Utils compartidos

pub mod storage;
pub mod format;

