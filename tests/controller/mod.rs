mod auth;
mod order;
