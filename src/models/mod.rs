pub mod dashboard;
pub mod event;
pub mod lenient;
pub mod order;
pub mod ticket;
pub mod user;
pub mod venue;

pub use dashboard::DashboardMetrics;
pub use event::{Event, NewEvent};
pub use order::{Order, OrderRequest, OrderStatus, PaymentMethod};
pub use ticket::{Ticket, TicketType};
pub use user::{NewUser, Role, User, UserStatus};
pub use venue::{Address, NewVenue, Venue};
