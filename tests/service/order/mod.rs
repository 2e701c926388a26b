mod batch_delete;
mod search;
