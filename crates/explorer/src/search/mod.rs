//! Search boundary between user input and the resolver.
//!
//! [`SearchSession`] applies the checks a search form needs before anything
//! touches the network (wallet gate, blank query, address format), then
//! resolves the identifier. Searches are last-request-wins: starting a new
//! search cancels any older one still in flight, and the published record
//! only ever moves forward in request order.

mod session;

pub use session::{PublishedRecord, SearchError, SearchSession, WalletSession};
