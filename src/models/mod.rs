pub mod task;
pub mod user;

pub use task::{CreatedTask, Task, TaskForm, TaskStats};
pub use user::User;
