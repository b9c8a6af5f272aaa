// handlers/protected/academy/mod.rs - Skill tracking
//
// Skills are visible only to the users listed in their `user_ids`. Anyone
// else gets 404 for the same path.

pub mod dashboard;
pub mod generate;
pub mod status;
pub mod submit;

pub use dashboard::get as dashboard_get;
pub use generate::post as generate_post;
pub use status::get as status_get;
pub use submit::post as submit_post;
