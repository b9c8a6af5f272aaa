// handlers/protected/user/mod.rs - Profile and social links of the caller

pub mod profile;
pub mod socials;

pub use profile::get as profile_get;
pub use socials::post as update_socials;
