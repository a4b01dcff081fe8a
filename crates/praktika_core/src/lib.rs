pub mod domain;
pub mod forms;
pub mod guard;
pub mod navigation;
pub mod notifications;
pub mod ports;
pub mod session;
pub mod workflow;

pub use domain::{
    FieldValue, Identity, Internship, NavigationItem, Notification, Role, SubmissionPayload,
};
pub use guard::AccessDecision;
pub use notifications::{NotificationFeed, Refresh};
pub use ports::{MarketplaceApi, PortError, PortResult};
pub use session::{AuthError, SessionStore};
pub use workflow::{SubmissionWorkflow, SubmitError, WorkflowState};
