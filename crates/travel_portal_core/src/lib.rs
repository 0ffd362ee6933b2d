pub mod chat;
pub mod domain;
pub mod guard;
pub mod listing;
pub mod normalize;
pub mod ports;
pub mod validation;

pub use domain::{
    BlogPost, ChatMessage, Commission, CommissionListing, CommissionSummary, Conversation,
    Document, FinanceSummary, GalleryItem, Package, Paginated, PaginationMeta, Payment,
    ReferralCode, Registration, Role, Session, Upload, UserProfile,
};
pub use guard::{evaluate, GuardDecision, LOGIN_PATH, PROTECTED_AREA, REGISTER_PATH};
pub use listing::{ListController, ListQuery, LoadState, Notification, NotificationLevel, Pagination};
pub use ports::{
    AuthService, BlogService, ChatService, CommissionService, DocumentService, ErrorKind,
    FinanceService, GalleryService, PackageService, PaymentService, PortError, PortResult,
    RegistrationService, UserService,
};
