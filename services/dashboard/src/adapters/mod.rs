pub mod auth;
pub mod blog;
pub mod chat;
pub mod commissions;
pub mod documents;
pub mod finance;
pub mod gallery;
pub mod http;
pub mod packages;
pub mod payments;
pub mod registrations;
pub mod users;

pub use auth::AuthAdapter;
pub use blog::BlogAdapter;
pub use chat::ChatAdapter;
pub use commissions::CommissionAdapter;
pub use documents::DocumentAdapter;
pub use finance::FinanceAdapter;
pub use gallery::GalleryAdapter;
pub use http::BackendClient;
pub use packages::PackageAdapter;
pub use payments::PaymentAdapter;
pub use registrations::RegistrationAdapter;
pub use users::UserAdapter;
