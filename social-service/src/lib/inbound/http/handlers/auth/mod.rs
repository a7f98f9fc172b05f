pub mod login;
pub mod login_session;
pub mod logout;
pub mod me;
pub mod refresh_token;
pub mod register;
pub mod status;
