pub mod get_profile;
pub mod get_user_by_username;
pub mod update_profile;
