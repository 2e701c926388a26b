mod get_user;
mod login;
mod register;
