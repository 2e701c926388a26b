mod batch_delete;
mod get;
mod upload;
