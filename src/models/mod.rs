pub mod request;
pub mod response;

pub use request::{DEFAULT_PRIORITY, NewTicket, TicketStatus};
pub use response::{
    ApiErrorBody, CommentCreated, CreateTicketResponse, HealthStatus, StatusUpdate, Ticket,
    TicketEnvelope, TicketRef,
};
