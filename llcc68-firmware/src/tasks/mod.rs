//! Embassy tasks

mod dio1;
mod radio;

pub use dio1::dio1_task;
pub use radio::radio_task;
