pub mod bulk;
pub mod events;
pub mod gate;
pub mod interceptor;
pub mod session;
pub mod store;

pub use bulk::{FormOutcome, FormSubmission};
pub use events::{EventBus, GridEvent, Subscription};
pub use gate::PersistenceGate;
pub use interceptor::{Capture, ChangeInterceptor, EditState};
pub use session::{EditOutcome, GridSession};
pub use store::RowStore;
