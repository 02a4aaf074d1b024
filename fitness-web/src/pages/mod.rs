mod activity_details;
mod dashboard;
pub mod login;

pub use activity_details::ActivityDetailsPage;
pub use dashboard::DashboardPage;
pub use login::LoginPage;
