pub mod activity_form;
pub mod auth_state;
pub mod fetch_state;
