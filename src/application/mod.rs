// Application layer - Page pipeline, auth flows and the gateway seam
pub mod api_client;
pub mod auth;
pub mod gateway;
pub mod page_controller;
pub mod pages;
pub mod sequencer;
pub mod session_store;

#[cfg(test)]
pub mod testing;
