//! Tickets and ticket tokens

#[allow(clippy::module_inception)]
mod ticket;
mod token;

pub use ticket::{ClosedTicket, SpotLocation, Ticket, TicketView};
pub use token::{TicketToken, TokenMinter, TokenScheme};
